//! Fixed-answer kernel fixtures.
//!
//! - [`FixedCourant`]: constant pressure and a constant Courant step.
//! - [`FixedFastSpeed`]: constant fast-speed step; records the rank it saw.
//! - [`FixedTransport`]: constant diffusion and streaming steps.
//! - [`FixedCosmology`], [`FixedCooling`], [`FixedCollapse`]: constants.
//! - [`FailingKernel`]: every capability fails deterministically.

use std::sync::atomic::{AtomicUsize, Ordering};

use courant_block::BlockState;
use courant_core::KernelError;
use courant_kernel::{
    CollapseFactor, ConductionKernel, ConductionMode, CoolingKernel, CosmicRayKernel, Cosmology,
    CourantKernel, CourantStep, EosState, EquationOfState, Expansion, FastSpeedKernel, HydroView,
    MhdView, PressureSolver, UnitSystem, Units,
};

/// Fills pressure with a constant and returns a fixed Courant step.
///
/// Counts Courant calls so tests can check dispatch.
pub struct FixedCourant {
    pub dt: f64,
    pub dt_viscous: f64,
    pub pressure: f64,
    calls: AtomicUsize,
}

impl FixedCourant {
    pub fn new(dt: f64, dt_viscous: f64) -> Self {
        Self {
            dt,
            dt_viscous,
            pressure: 1.0,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `courant_timestep` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl PressureSolver for FixedCourant {
    fn compute_pressure(
        &self,
        _block: &BlockState<'_>,
        out: &mut [f64],
    ) -> Result<(), KernelError> {
        out.fill(self.pressure);
        Ok(())
    }
}

impl CourantKernel for FixedCourant {
    fn courant_timestep(&self, _view: &HydroView<'_>) -> Result<CourantStep, KernelError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(CourantStep {
            dt: self.dt,
            dt_viscous: self.dt_viscous,
        })
    }
}

/// Returns a fixed fast-magnetosonic step and records the rank of the
/// geometry it was handed.
pub struct FixedFastSpeed {
    pub dt: f64,
    last_rank: AtomicUsize,
}

impl FixedFastSpeed {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            last_rank: AtomicUsize::new(0),
        }
    }

    /// Rank of the last geometry seen; 0 if never called.
    pub fn last_rank(&self) -> usize {
        self.last_rank.load(Ordering::Relaxed)
    }
}

impl FastSpeedKernel for FixedFastSpeed {
    fn fast_speed_timestep(&self, view: &MhdView<'_>) -> Result<f64, KernelError> {
        self.last_rank
            .store(view.geometry.rank(), Ordering::Relaxed);
        Ok(self.dt)
    }
}

/// Constant transport steps. Conduction reports the diffusion step
/// regardless of mode.
pub struct FixedTransport {
    pub diffusion: f64,
    pub streaming: f64,
}

impl FixedTransport {
    pub fn new(diffusion: f64, streaming: f64) -> Self {
        Self {
            diffusion,
            streaming,
        }
    }
}

impl ConductionKernel for FixedTransport {
    fn conduction_timestep(
        &self,
        _block: &BlockState<'_>,
        _mode: ConductionMode,
    ) -> Result<f64, KernelError> {
        Ok(self.diffusion)
    }
}

impl CosmicRayKernel for FixedTransport {
    fn diffusion_timestep(&self, _block: &BlockState<'_>) -> Result<f64, KernelError> {
        Ok(self.diffusion)
    }

    fn streaming_timestep(&self, _block: &BlockState<'_>) -> Result<f64, KernelError> {
        Ok(self.streaming)
    }
}

/// Constant expansion state and expansion step.
pub struct FixedCosmology {
    pub expansion: Expansion,
    pub dt: f64,
}

impl FixedCosmology {
    pub fn new(a: f64, dadt: f64, dt: f64) -> Self {
        Self {
            expansion: Expansion { a, dadt },
            dt,
        }
    }
}

impl Cosmology for FixedCosmology {
    fn expansion_factor(&self, _time: f64) -> Result<Expansion, KernelError> {
        Ok(self.expansion)
    }

    fn expansion_timestep(&self, _time: f64) -> Result<f64, KernelError> {
        Ok(self.dt)
    }
}

/// Writes the same cooling time into every cell.
pub struct FixedCooling(pub f64);

impl CoolingKernel for FixedCooling {
    fn cooling_time(&self, _block: &BlockState<'_>, out: &mut [f64]) -> Result<(), KernelError> {
        out.fill(self.0);
        Ok(())
    }
}

/// Writes the same collapse factor into every cell.
pub struct FixedCollapse(pub f64);

impl CollapseFactor for FixedCollapse {
    fn collapse_factor(&self, _block: &BlockState<'_>, out: &mut [f64]) -> Result<(), KernelError> {
        out.fill(self.0);
        Ok(())
    }
}

/// Every capability fails with [`KernelError::ExecutionFailed`].
///
/// The EOS cannot fail, so it returns NaN instead.
pub struct FailingKernel {
    pub reason: String,
}

impl FailingKernel {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> Result<T, KernelError> {
        Err(KernelError::ExecutionFailed {
            reason: self.reason.clone(),
        })
    }
}

impl UnitSystem for FailingKernel {
    fn units(&self, _time: f64) -> Result<Units, KernelError> {
        self.fail()
    }
}

impl EquationOfState for FailingKernel {
    fn evaluate(&self, _density: f64, _internal_energy: f64) -> EosState {
        EosState {
            pressure: f64::NAN,
            enthalpy: f64::NAN,
            sound_speed: f64::NAN,
            dp_drho: f64::NAN,
            dp_de: f64::NAN,
        }
    }
}

impl PressureSolver for FailingKernel {
    fn compute_pressure(
        &self,
        _block: &BlockState<'_>,
        _out: &mut [f64],
    ) -> Result<(), KernelError> {
        self.fail()
    }
}

impl CourantKernel for FailingKernel {
    fn courant_timestep(&self, _view: &HydroView<'_>) -> Result<CourantStep, KernelError> {
        self.fail()
    }
}

impl FastSpeedKernel for FailingKernel {
    fn fast_speed_timestep(&self, _view: &MhdView<'_>) -> Result<f64, KernelError> {
        self.fail()
    }
}

impl Cosmology for FailingKernel {
    fn expansion_factor(&self, _time: f64) -> Result<Expansion, KernelError> {
        self.fail()
    }

    fn expansion_timestep(&self, _time: f64) -> Result<f64, KernelError> {
        self.fail()
    }
}

impl ConductionKernel for FailingKernel {
    fn conduction_timestep(
        &self,
        _block: &BlockState<'_>,
        _mode: ConductionMode,
    ) -> Result<f64, KernelError> {
        self.fail()
    }
}

impl CosmicRayKernel for FailingKernel {
    fn diffusion_timestep(&self, _block: &BlockState<'_>) -> Result<f64, KernelError> {
        self.fail()
    }

    fn streaming_timestep(&self, _block: &BlockState<'_>) -> Result<f64, KernelError> {
        self.fail()
    }
}

impl CoolingKernel for FailingKernel {
    fn cooling_time(&self, _block: &BlockState<'_>, _out: &mut [f64]) -> Result<(), KernelError> {
        self.fail()
    }
}

impl CollapseFactor for FailingKernel {
    fn collapse_factor(
        &self,
        _block: &BlockState<'_>,
        _out: &mut [f64],
    ) -> Result<(), KernelError> {
        self.fail()
    }
}
