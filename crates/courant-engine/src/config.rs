//! Timestep configuration, validation, and error types.
//!
//! [`TimestepConfig`] is the immutable run configuration handed to
//! [`TimestepAggregator::new`](crate::TimestepAggregator::new), which
//! calls [`validate()`](TimestepConfig::validate) once so that the
//! per-block computation never has to re-check it.

use std::error::Error;
use std::fmt;

use courant_kernel::{ConductionMode, HydroMethod};

// ── CosmicRayConfig ────────────────────────────────────────────────

/// Cosmic-ray diffusion mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrDiffusion {
    /// No diffusion limit.
    Off,
    /// Isotropic diffusion. The limit is subcycled, so it is multiplied
    /// by the ghost-zone count.
    Isotropic,
    /// Diffusion along magnetic field lines.
    Anisotropic,
}

/// How the diffusion and streaming limits merge into one candidate
/// when both are enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CosmicRayCombine {
    /// Take the smaller of the two limits.
    #[default]
    Minimum,
    /// The streaming limit replaces the diffusion limit.
    LastWins,
}

/// Cosmic-ray model parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct CosmicRayConfig {
    /// Adiabatic index of the cosmic-ray fluid. Default: 4/3.
    pub gamma: f64,
    /// Diffusion mode. Default: [`CrDiffusion::Off`].
    pub diffusion: CrDiffusion,
    /// Whether cosmic-ray streaming is enabled. Default: false.
    pub streaming: bool,
    /// Safety factor applied to the transport limit. Default: 0.5.
    pub safety: f64,
    /// Merge rule for diffusion and streaming. Default: minimum.
    pub combine: CosmicRayCombine,
}

impl Default for CosmicRayConfig {
    fn default() -> Self {
        Self {
            gamma: 4.0 / 3.0,
            diffusion: CrDiffusion::Off,
            streaming: false,
            safety: 0.5,
            combine: CosmicRayCombine::Minimum,
        }
    }
}

// ── FreeFallConfig ─────────────────────────────────────────────────

/// One-zone free-fall collapse test mode.
///
/// When present the timestep is the free-fall time alone and every
/// other process is ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct FreeFallConfig {
    /// Fraction of the free-fall time taken per step.
    pub timestep_fraction: f64,
    /// Gravitational constant in code units.
    pub gravitational_constant: f64,
}

// ── RadiationConfig ────────────────────────────────────────────────

/// Radiative-transfer timestep limits.
#[cfg(feature = "transfer")]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RadiationConfig {
    /// Limit the step by the radiation-pressure acceleration fields.
    /// Default: false.
    pub pressure: bool,
    /// Hard velocity cap in km/s; `0` disables it. Default: 0.
    pub safety_velocity_kms: f64,
    /// Fixed maximum step for flux-limited-diffusion transfer.
    /// Default: `None`.
    pub max_radiation_dt: Option<f64>,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`TimestepConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A safety factor is NaN, infinite, zero, or negative.
    InvalidSafetyNumber {
        /// Which safety factor.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// An adiabatic index is not finite or not above 1.
    InvalidGamma {
        /// Which index.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// Any other physical parameter outside its domain.
    InvalidParameter {
        /// Which parameter.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// Ghost-zone count is zero.
    ZeroGhostZones,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSafetyNumber { name, value } => {
                write!(f, "{name} must be finite and positive, got {value}")
            }
            Self::InvalidGamma { name, value } => {
                write!(f, "{name} must be finite and greater than 1, got {value}")
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid {name}: {value}")
            }
            Self::ZeroGhostZones => write!(f, "ghost_zones must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── TimestepConfig ─────────────────────────────────────────────────

/// Complete configuration of the per-block timestep computation.
///
/// `Option` fields enable a process; `None` leaves its candidate
/// unconstrained.
#[derive(Clone, Debug, PartialEq)]
pub struct TimestepConfig {
    /// Hydrodynamics method. Default: [`HydroMethod::PpmDirectEuler`].
    pub hydro_method: HydroMethod,
    /// Courant safety number for hydro, MHD, and quantum pressure.
    /// Default: 0.6.
    pub courant_safety_number: f64,
    /// Safety number for the particle limit. Default: 0.5.
    pub particle_courant_safety_number: f64,
    /// Quadratic artificial-viscosity coefficient (Zeus). Default: 2.0.
    pub zeus_viscosity: f64,
    /// Adiabatic index of the gas. Default: 5/3.
    pub gamma: f64,
    /// Pressure-free (dust) hydrodynamics. Default: false.
    pub pressure_free: bool,
    /// Read internal energy from the dual-energy field. Default: false.
    pub dual_energy_formalism: bool,
    /// Comoving coordinates: query the cosmology for `a` and apply the
    /// expansion limit. Default: false.
    pub comoving: bool,
    /// Self-gravity is active. Default: false.
    pub self_gravity: bool,
    /// Ghost zones per side; multiplies subcycled diffusion limits.
    /// Default: 3.
    pub ghost_zones: usize,
    /// Thermal conduction mode. Default: `None`.
    pub conduction: Option<ConductionMode>,
    /// Cosmic-ray model. Default: `None`.
    pub cosmic_rays: Option<CosmicRayConfig>,
    /// Gas drag coefficient. Default: `None`.
    pub gas_drag: Option<f64>,
    /// Cooling-time safety factor; enables the cooling limit.
    /// Default: `None`.
    pub cooling_safety: Option<f64>,
    /// Fuzzy-dark-matter particle mass in units of 1e-22 eV; enables
    /// the quantum-pressure limit. Default: `None`.
    pub quantum_pressure: Option<f64>,
    /// One-zone free-fall test mode. Default: `None`.
    pub free_fall: Option<FreeFallConfig>,
    /// Radiative-transfer limits.
    #[cfg(feature = "transfer")]
    pub radiation: RadiationConfig,
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            hydro_method: HydroMethod::PpmDirectEuler,
            courant_safety_number: 0.6,
            particle_courant_safety_number: 0.5,
            zeus_viscosity: 2.0,
            gamma: 5.0 / 3.0,
            pressure_free: false,
            dual_energy_formalism: false,
            comoving: false,
            self_gravity: false,
            ghost_zones: 3,
            conduction: None,
            cosmic_rays: None,
            gas_drag: None,
            cooling_safety: None,
            quantum_pressure: None,
            free_fall: None,
            #[cfg(feature = "transfer")]
            radiation: RadiationConfig::default(),
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSafetyNumber { name, value })
    }
}

fn adiabatic(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidGamma { name, value })
    }
}

fn parameter(name: &'static str, value: f64, ok: bool) -> Result<(), ConfigError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

impl TimestepConfig {
    /// Validate all parameters.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidSafetyNumber`] for any non-positive or
    ///   non-finite safety factor or free-fall fraction.
    /// - [`ConfigError::InvalidGamma`] for a gas or cosmic-ray index
    ///   not above 1.
    /// - [`ConfigError::InvalidParameter`] for a negative viscosity or
    ///   drag coefficient, a non-positive particle mass or gravitational
    ///   constant, or an invalid radiation limit.
    /// - [`ConfigError::ZeroGhostZones`] if `ghost_zones == 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("courant_safety_number", self.courant_safety_number)?;
        positive(
            "particle_courant_safety_number",
            self.particle_courant_safety_number,
        )?;
        adiabatic("gamma", self.gamma)?;
        parameter(
            "zeus_viscosity",
            self.zeus_viscosity,
            self.zeus_viscosity >= 0.0,
        )?;
        if self.ghost_zones == 0 {
            return Err(ConfigError::ZeroGhostZones);
        }
        if let Some(cr) = &self.cosmic_rays {
            adiabatic("cosmic_rays.gamma", cr.gamma)?;
            positive("cosmic_rays.safety", cr.safety)?;
        }
        if let Some(drag) = self.gas_drag {
            parameter("gas_drag", drag, drag >= 0.0)?;
        }
        if let Some(safety) = self.cooling_safety {
            positive("cooling_safety", safety)?;
        }
        if let Some(mass) = self.quantum_pressure {
            parameter("quantum_pressure", mass, mass > 0.0)?;
        }
        if let Some(ff) = &self.free_fall {
            positive("free_fall.timestep_fraction", ff.timestep_fraction)?;
            parameter(
                "free_fall.gravitational_constant",
                ff.gravitational_constant,
                ff.gravitational_constant > 0.0,
            )?;
        }
        #[cfg(feature = "transfer")]
        {
            let r = &self.radiation;
            parameter(
                "radiation.safety_velocity_kms",
                r.safety_velocity_kms,
                r.safety_velocity_kms >= 0.0,
            )?;
            if let Some(dt) = r.max_radiation_dt {
                parameter("radiation.max_radiation_dt", dt, dt > 0.0)?;
            }
        }
        Ok(())
    }
}
