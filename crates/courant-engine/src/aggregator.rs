//! The per-block timestep aggregator.

use courant_block::BlockState;
use courant_core::{Axis, FieldRole, KernelError, TimestepError, HBAR_OVER_M_FDM, UNCONSTRAINED};
use courant_kernel::{HydroView, Kernels, MhdView, Units};

use crate::candidates::{Candidates, Process};
use crate::config::{ConfigError, CosmicRayCombine, CrDiffusion, FreeFallConfig, TimestepConfig};
use crate::constraints;
use crate::limiting::{
    below_diagnostic_threshold, find_limiting_cell, LimitingCell, LimitingCellInput,
};
use crate::signal::SignalSpeed;

/// Outcome of one timestep computation.
#[derive(Clone, Debug, PartialEq)]
pub struct TimestepReport {
    /// The block timestep: the minimum over every candidate.
    pub dt: f64,
    /// Every per-process candidate after its safety factor.
    pub candidates: Candidates,
    /// The process that set `dt`, or `None` if nothing constrained it.
    pub limiter: Option<Process>,
    /// Limiting cell, present when the hydro step fell below the
    /// diagnostic threshold.
    pub limiting_cell: Option<LimitingCell>,
}

/// Computes the largest stable timestep for one block.
///
/// Holds an immutable validated configuration and the collaborators for
/// the run. [`compute`](Self::compute) reads the block, allocates its own
/// scratch buffers, and returns; one aggregator may serve many blocks,
/// concurrently if its kernels allow it.
///
/// Enabled processes, in reduction order:
///
/// 1. Hydro Courant limit (finite-difference kernel, or the Riemann
///    scan for `HydroRk`), with the viscous limit for Zeus.
/// 2. MHD fast-magnetosonic limit (`MhdRk` scan or `MhdLi` kernel).
/// 3. Particle velocities.
/// 4. Cosmological expansion.
/// 5. Gravitational acceleration.
/// 6. Conduction, cosmic rays, gas drag, cooling, quantum pressure.
/// 7. Radiation limits (with the `transfer` feature).
///
/// The one-zone free-fall mode replaces all of these.
#[derive(Debug)]
pub struct TimestepAggregator<'k> {
    config: TimestepConfig,
    kernels: Kernels<'k>,
}

fn kernel_err(kernel: &'static str) -> impl FnOnce(KernelError) -> TimestepError {
    move |err| TimestepError::kernel(kernel, err)
}

/// Velocity buffers for kernels that always read three components.
///
/// Active axes must be present; missing inactive axes read `zeros`.
fn velocity_fields<'v>(
    block: &BlockState<'v>,
    zeros: &'v [f64],
) -> Result<[&'v [f64]; 3], TimestepError> {
    let rank = block.geometry().rank();
    let mut out = [zeros; 3];
    for axis in Axis::ALL {
        let role = FieldRole::velocity(axis);
        if axis.index() < rank {
            out[axis.index()] = block.require(role)?;
        } else if let Some(v) = block.field(role) {
            out[axis.index()] = v;
        }
    }
    Ok(out)
}

impl<'k> TimestepAggregator<'k> {
    /// Create an aggregator.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by
    /// [`TimestepConfig::validate`].
    pub fn new(config: TimestepConfig, kernels: Kernels<'k>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, kernels })
    }

    /// The configuration.
    pub fn config(&self) -> &TimestepConfig {
        &self.config
    }

    /// The collaborators.
    pub fn kernels(&self) -> &Kernels<'k> {
        &self.kernels
    }

    /// Compute the timestep for `block`.
    ///
    /// # Errors
    ///
    /// - [`TimestepError::KernelFailed`] if any collaborator fails,
    ///   including the unit system and the cosmology.
    /// - [`TimestepError::MissingKernel`] if an enabled process has no
    ///   collaborator.
    /// - [`TimestepError::MissingField`] if an enabled process needs a
    ///   field the block does not carry.
    ///
    /// No partial result is returned.
    pub fn compute(&self, block: &BlockState<'_>) -> Result<TimestepReport, TimestepError> {
        let time = block.time();
        let units = self
            .kernels
            .units()?
            .units(time)
            .map_err(kernel_err("units"))?;
        let a = self.expansion_factor(time)?;

        let mut candidates = Candidates::new();
        let mut limiting_cell = None;

        if block.has_baryons() {
            if let Some(free_fall) = &self.config.free_fall {
                candidates.set(Process::FreeFall, self.free_fall(block, free_fall)?);
                return Ok(self.finish(candidates, None));
            }
            limiting_cell = self.baryons(block, &units, a, &mut candidates)?;
        }

        self.particles(block, a, &mut candidates);
        self.expansion(time, &mut candidates)?;
        self.acceleration(block, &mut candidates);
        self.transport(block, &mut candidates)?;
        self.sources(block, &units, a, &mut candidates)?;
        #[cfg(feature = "transfer")]
        self.radiation(block, &units, a, &mut candidates)?;

        Ok(self.finish(candidates, limiting_cell))
    }

    fn expansion_factor(&self, time: f64) -> Result<f64, TimestepError> {
        if !self.config.comoving {
            return Ok(1.0);
        }
        let expansion = self
            .kernels
            .cosmology()?
            .expansion_factor(time)
            .map_err(kernel_err("cosmology"))?;
        if !(expansion.a > 0.0) || !expansion.a.is_finite() {
            return Err(TimestepError::kernel(
                "cosmology",
                KernelError::NonFinite {
                    quantity: "expansion factor",
                    value: expansion.a,
                },
            ));
        }
        Ok(expansion.a)
    }

    fn free_fall(
        &self,
        block: &BlockState<'_>,
        free_fall: &FreeFallConfig,
    ) -> Result<f64, TimestepError> {
        let geom = block.geometry();
        let density = block.require(FieldRole::Density)?;
        let mut factor = vec![0.0; geom.size()];
        self.kernels
            .collapse_factor()?
            .collapse_factor(block, &mut factor)
            .map_err(kernel_err("collapse_factor"))?;

        let g = free_fall.gravitational_constant;
        let mut dt = UNCONSTRAINED;
        for (_, n) in geom.active_cells() {
            let arg = 3.0 * std::f64::consts::PI / (32.0 * g * density[n] * (1.0 - factor[n]));
            if arg > 0.0 && arg.is_finite() {
                dt = dt.min(arg.sqrt());
            }
        }
        log::trace!("courant: free-fall mode, t_ff = {dt:e}");
        Ok(dt * free_fall.timestep_fraction)
    }

    fn baryons(
        &self,
        block: &BlockState<'_>,
        units: &Units,
        a: f64,
        candidates: &mut Candidates,
    ) -> Result<Option<LimitingCell>, TimestepError> {
        let cfg = &self.config;
        log::trace!("courant: baryon limit via {:?}", cfg.hydro_method);
        let method = cfg.hydro_method;
        if method.uses_courant_kernel() {
            return self.finite_difference_hydro(block, units, a, candidates);
        }
        if !method.is_riemann() {
            self.finite_difference_mhd(block, a, candidates)?;
            return Ok(None);
        }
        let (signal, process) = match (&cfg.cosmic_rays, method.is_mhd()) {
            (_, false) => (SignalSpeed::Hydro, Process::Baryons),
            (Some(cr), true) => (SignalSpeed::MhdCosmicRay { gamma_cr: cr.gamma }, Process::Mhd),
            (None, true) => (SignalSpeed::Mhd, Process::Mhd),
        };
        let dt = signal.timestep(
            block,
            self.kernels.eos()?,
            cfg.dual_energy_formalism,
            a,
            cfg.courant_safety_number,
        )?;
        candidates.set(process, dt);
        Ok(None)
    }

    fn pressure(&self, block: &BlockState<'_>) -> Result<Vec<f64>, TimestepError> {
        let mut pressure = vec![0.0; block.geometry().size()];
        self.kernels
            .pressure()?
            .compute_pressure(block, &mut pressure)
            .map_err(kernel_err("pressure"))?;
        Ok(pressure)
    }

    fn finite_difference_hydro(
        &self,
        block: &BlockState<'_>,
        units: &Units,
        a: f64,
        candidates: &mut Candidates,
    ) -> Result<Option<LimitingCell>, TimestepError> {
        let cfg = &self.config;
        let geom = block.geometry();
        let density = block.require(FieldRole::Density)?;
        let zeros = vec![0.0; geom.size()];
        let velocity = velocity_fields(block, &zeros)?;
        let pressure = self.pressure(block)?;

        let view = HydroView {
            geometry: geom,
            method: cfg.hydro_method,
            viscosity: cfg.zeus_viscosity,
            gamma: cfg.gamma,
            pressure_free: cfg.pressure_free,
            expansion_factor: a,
            density,
            pressure: &pressure,
            velocity,
        };
        let step = self
            .kernels
            .courant()?
            .courant_timestep(&view)
            .map_err(kernel_err("courant"))?;

        candidates.set(Process::Baryons, step.dt * cfg.courant_safety_number);
        candidates.set(Process::Viscous, step.dt_viscous);

        if !below_diagnostic_threshold(step.dt, cfg.courant_safety_number, units.time) {
            return Ok(None);
        }
        let cell = find_limiting_cell(&LimitingCellInput::from(&view));
        log::warn!(
            "courant: hydro step {:e} s is below {} yr; limiting {cell}",
            step.dt * cfg.courant_safety_number * units.time,
            courant_core::DIAGNOSTIC_THRESHOLD_YEARS,
        );
        Ok(Some(cell))
    }

    fn finite_difference_mhd(
        &self,
        block: &BlockState<'_>,
        a: f64,
        candidates: &mut Candidates,
    ) -> Result<(), TimestepError> {
        let cfg = &self.config;
        let geom = block.geometry();
        let density = block.require(FieldRole::Density)?;
        let zeros = vec![0.0; geom.size()];
        let velocity = velocity_fields(block, &zeros)?;
        let magnetic = [
            block.require(FieldRole::MagneticField1)?,
            block.require(FieldRole::MagneticField2)?,
            block.require(FieldRole::MagneticField3)?,
        ];
        let pressure = self.pressure(block)?;

        // The fast-speed kernel always runs on a rank-3 geometry.
        let promoted = geom.promoted_to_3d();
        let view = MhdView {
            geometry: &promoted,
            gamma: cfg.gamma,
            density,
            pressure: &pressure,
            velocity,
            magnetic,
            total_energy: block.field(FieldRole::TotalEnergy),
        };
        let dt = self
            .kernels
            .fast_speed()?
            .fast_speed_timestep(&view)
            .map_err(kernel_err("fast_speed"))?;
        candidates.set(Process::Mhd, dt * cfg.courant_safety_number * a);
        Ok(())
    }

    fn particles(&self, block: &BlockState<'_>, a: f64, candidates: &mut Candidates) {
        if block.particles().is_empty() {
            return;
        }
        let dt = constraints::particle_timestep(block, a);
        candidates.set(
            Process::Particles,
            dt * self.config.particle_courant_safety_number,
        );
    }

    fn expansion(&self, time: f64, candidates: &mut Candidates) -> Result<(), TimestepError> {
        if !self.config.comoving {
            return Ok(());
        }
        let dt = self
            .kernels
            .cosmology()?
            .expansion_timestep(time)
            .map_err(kernel_err("cosmology"))?;
        candidates.set(Process::Expansion, dt);
        Ok(())
    }

    fn acceleration(&self, block: &BlockState<'_>, candidates: &mut Candidates) {
        if self.config.self_gravity {
            candidates.set(
                Process::Acceleration,
                constraints::acceleration_timestep(block),
            );
        }
    }

    fn transport(
        &self,
        block: &BlockState<'_>,
        candidates: &mut Candidates,
    ) -> Result<(), TimestepError> {
        let cfg = &self.config;
        let ghost_zones = cfg.ghost_zones as f64;

        if let Some(mode) = cfg.conduction {
            let dt = self
                .kernels
                .conduction()?
                .conduction_timestep(block, mode)
                .map_err(kernel_err("conduction"))?;
            candidates.set(Process::Conduction, dt * ghost_zones);
        }

        if let Some(cr) = &cfg.cosmic_rays {
            let diffusion = match cr.diffusion {
                CrDiffusion::Off => None,
                CrDiffusion::Isotropic | CrDiffusion::Anisotropic => Some(
                    self.kernels
                        .cosmic_ray()?
                        .diffusion_timestep(block)
                        .map_err(kernel_err("cosmic_ray"))?,
                ),
            };
            let streaming = if cr.streaming {
                Some(
                    self.kernels
                        .cosmic_ray()?
                        .streaming_timestep(block)
                        .map_err(kernel_err("cosmic_ray"))?,
                )
            } else {
                None
            };
            let combined = match (diffusion, streaming, cr.combine) {
                (Some(d), Some(s), CosmicRayCombine::Minimum) => Some(d.min(s)),
                (_, Some(s), _) => Some(s),
                (d, None, _) => d,
            };
            if let Some(mut dt) = combined {
                dt *= cr.safety;
                if cr.diffusion == CrDiffusion::Isotropic {
                    dt *= ghost_zones;
                }
                candidates.set(Process::CosmicRays, dt);
            }
        }
        Ok(())
    }

    fn sources(
        &self,
        block: &BlockState<'_>,
        units: &Units,
        a: f64,
        candidates: &mut Candidates,
    ) -> Result<(), TimestepError> {
        let cfg = &self.config;
        let geom = block.geometry();

        if let Some(coefficient) = cfg.gas_drag {
            if coefficient != 0.0 {
                candidates.set(Process::GasDrag, 0.5 / coefficient);
            }
        }

        if let Some(safety) = cfg.cooling_safety {
            let mut cooling_time = vec![0.0; geom.size()];
            self.kernels
                .cooling()?
                .cooling_time(block, &mut cooling_time)
                .map_err(kernel_err("cooling"))?;
            let (nan, active) = constraints::active_nan_count(geom, &cooling_time);
            if nan > 0 && nan == active {
                return Err(TimestepError::kernel(
                    "cooling",
                    KernelError::NonFinite {
                        quantity: "cooling time",
                        value: f64::NAN,
                    },
                ));
            }
            if nan > 0 {
                log::warn!("courant: {nan} of {active} active cells have a NaN cooling time");
            }
            let dt = constraints::active_minimum(geom, &cooling_time);
            candidates.set(Process::Cooling, dt * safety);
        }

        if let Some(fdm_mass) = cfg.quantum_pressure {
            let hmcoef = constraints::quantum_coefficient(
                HBAR_OVER_M_FDM,
                units.time,
                units.length,
                a,
                fdm_mass,
            );
            let potential = if cfg.self_gravity {
                block.potential()
            } else {
                None
            };
            let dt = constraints::quantum_timestep(
                geom,
                hmcoef,
                a,
                cfg.courant_safety_number,
                potential,
            );
            candidates.set(Process::Quantum, dt);
        }
        Ok(())
    }

    #[cfg(feature = "transfer")]
    fn radiation(
        &self,
        block: &BlockState<'_>,
        units: &Units,
        a: f64,
        candidates: &mut Candidates,
    ) -> Result<(), TimestepError> {
        let radiation = &self.config.radiation;
        if radiation.pressure {
            candidates.set(
                Process::RadiationPressure,
                constraints::radiation_pressure_timestep(block)?,
            );
        }
        if radiation.safety_velocity_kms > 0.0 {
            candidates.set(
                Process::SafetyVelocity,
                constraints::safety_velocity_timestep(
                    block.geometry(),
                    radiation.safety_velocity_kms,
                    units.velocity,
                    a,
                ),
            );
        }
        if let Some(dt) = radiation.max_radiation_dt {
            candidates.set(Process::RadiationTransfer, dt);
        }
        Ok(())
    }

    fn finish(
        &self,
        candidates: Candidates,
        limiting_cell: Option<LimitingCell>,
    ) -> TimestepReport {
        let dt = candidates.min();
        let limiter = candidates.limiter();
        log::debug!("courant: dt = {dt:e} ({candidates})");
        TimestepReport {
            dt,
            candidates,
            limiter,
            limiting_cell,
        }
    }
}
