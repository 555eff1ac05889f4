//! The bundle of collaborators supplied to one aggregator.

use crate::cosmology::Cosmology;
use crate::eos::EquationOfState;
use crate::hydro::{CourantKernel, FastSpeedKernel, PressureSolver};
use crate::source::{CollapseFactor, CoolingKernel};
use crate::transport::{ConductionKernel, CosmicRayKernel};
use crate::units::UnitSystem;
use courant_core::TimestepError;
use std::fmt;

/// Borrowed collaborators for a timestep computation.
///
/// Every slot is optional. A process that is enabled in the
/// configuration but whose collaborator is absent makes the computation
/// fail with [`TimestepError::MissingKernel`]; absent collaborators for
/// disabled processes are never consulted.
///
/// ```
/// use courant_kernel::{Kernels, UnitSystem, Units};
/// use courant_core::KernelError;
///
/// struct Cgs;
/// impl UnitSystem for Cgs {
///     fn units(&self, _time: f64) -> Result<Units, KernelError> {
///         Ok(Units::default())
///     }
/// }
///
/// let kernels = Kernels::new().with_units(&Cgs);
/// assert!(kernels.units().is_ok());
/// assert!(kernels.cosmology().is_err());
/// ```
#[derive(Clone, Copy, Default)]
pub struct Kernels<'k> {
    units: Option<&'k dyn UnitSystem>,
    eos: Option<&'k dyn EquationOfState>,
    pressure: Option<&'k dyn PressureSolver>,
    cosmology: Option<&'k dyn Cosmology>,
    courant: Option<&'k dyn CourantKernel>,
    fast_speed: Option<&'k dyn FastSpeedKernel>,
    conduction: Option<&'k dyn ConductionKernel>,
    cosmic_ray: Option<&'k dyn CosmicRayKernel>,
    cooling: Option<&'k dyn CoolingKernel>,
    collapse_factor: Option<&'k dyn CollapseFactor>,
}

fn require<'a, T: ?Sized>(
    slot: Option<&'a T>,
    kernel: &'static str,
) -> Result<&'a T, TimestepError> {
    slot.ok_or(TimestepError::MissingKernel { kernel })
}

impl<'k> Kernels<'k> {
    /// An empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unit system.
    pub fn with_units(mut self, units: &'k dyn UnitSystem) -> Self {
        self.units = Some(units);
        self
    }

    /// Set the equation of state used by the Riemann scans.
    pub fn with_eos(mut self, eos: &'k dyn EquationOfState) -> Self {
        self.eos = Some(eos);
        self
    }

    /// Set the pressure evaluator.
    pub fn with_pressure(mut self, pressure: &'k dyn PressureSolver) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Set the cosmology integrator.
    pub fn with_cosmology(mut self, cosmology: &'k dyn Cosmology) -> Self {
        self.cosmology = Some(cosmology);
        self
    }

    /// Set the finite-difference Courant kernel.
    pub fn with_courant(mut self, courant: &'k dyn CourantKernel) -> Self {
        self.courant = Some(courant);
        self
    }

    /// Set the MHD fast-speed kernel.
    pub fn with_fast_speed(mut self, fast_speed: &'k dyn FastSpeedKernel) -> Self {
        self.fast_speed = Some(fast_speed);
        self
    }

    /// Set the conduction kernel.
    pub fn with_conduction(mut self, conduction: &'k dyn ConductionKernel) -> Self {
        self.conduction = Some(conduction);
        self
    }

    /// Set the cosmic-ray transport kernel.
    pub fn with_cosmic_ray(mut self, cosmic_ray: &'k dyn CosmicRayKernel) -> Self {
        self.cosmic_ray = Some(cosmic_ray);
        self
    }

    /// Set the cooling-time kernel.
    pub fn with_cooling(mut self, cooling: &'k dyn CoolingKernel) -> Self {
        self.cooling = Some(cooling);
        self
    }

    /// Set the free-fall collapse-factor provider.
    pub fn with_collapse_factor(mut self, collapse_factor: &'k dyn CollapseFactor) -> Self {
        self.collapse_factor = Some(collapse_factor);
        self
    }

    /// The unit system.
    ///
    /// # Errors
    ///
    /// [`TimestepError::MissingKernel`] if none was supplied. The same
    /// holds for every accessor below.
    pub fn units(&self) -> Result<&'k dyn UnitSystem, TimestepError> {
        require(self.units, "units")
    }

    /// The equation of state.
    pub fn eos(&self) -> Result<&'k dyn EquationOfState, TimestepError> {
        require(self.eos, "eos")
    }

    /// The pressure evaluator.
    pub fn pressure(&self) -> Result<&'k dyn PressureSolver, TimestepError> {
        require(self.pressure, "pressure")
    }

    /// The cosmology integrator.
    pub fn cosmology(&self) -> Result<&'k dyn Cosmology, TimestepError> {
        require(self.cosmology, "cosmology")
    }

    /// The finite-difference Courant kernel.
    pub fn courant(&self) -> Result<&'k dyn CourantKernel, TimestepError> {
        require(self.courant, "courant")
    }

    /// The MHD fast-speed kernel.
    pub fn fast_speed(&self) -> Result<&'k dyn FastSpeedKernel, TimestepError> {
        require(self.fast_speed, "fast_speed")
    }

    /// The conduction kernel.
    pub fn conduction(&self) -> Result<&'k dyn ConductionKernel, TimestepError> {
        require(self.conduction, "conduction")
    }

    /// The cosmic-ray transport kernel.
    pub fn cosmic_ray(&self) -> Result<&'k dyn CosmicRayKernel, TimestepError> {
        require(self.cosmic_ray, "cosmic_ray")
    }

    /// The cooling-time kernel.
    pub fn cooling(&self) -> Result<&'k dyn CoolingKernel, TimestepError> {
        require(self.cooling, "cooling")
    }

    /// The collapse-factor provider.
    pub fn collapse_factor(&self) -> Result<&'k dyn CollapseFactor, TimestepError> {
        require(self.collapse_factor, "collapse_factor")
    }
}

impl fmt::Debug for Kernels<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernels")
            .field("units", &self.units.is_some())
            .field("eos", &self.eos.is_some())
            .field("pressure", &self.pressure.is_some())
            .field("cosmology", &self.cosmology.is_some())
            .field("courant", &self.courant.is_some())
            .field("fast_speed", &self.fast_speed.is_some())
            .field("conduction", &self.conduction.is_some())
            .field("cosmic_ray", &self.cosmic_ray.is_some())
            .field("cooling", &self.cooling.is_some())
            .field("collapse_factor", &self.collapse_factor.is_some())
            .finish()
    }
}
