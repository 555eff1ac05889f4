//! Hydrodynamic and MHD kernel capabilities.
//!
//! These are the finite-difference collaborators: a pressure evaluator,
//! a per-cell Courant kernel returning the raw and viscous limits, and an
//! MHD fast-speed kernel. The Riemann-solver methods do not use them;
//! their scans live in the engine.

use courant_block::{BlockGeometry, BlockState};
use courant_core::KernelError;

/// Hydrodynamics method configured for the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HydroMethod {
    /// Piecewise-parabolic method, direct Eulerian.
    PpmDirectEuler,
    /// Piecewise-parabolic method, Lagrange + remap.
    PpmLagrangeRemap,
    /// Zeus-style finite difference with artificial viscosity.
    Zeus,
    /// Runge–Kutta Riemann-solver hydrodynamics.
    HydroRk,
    /// Runge–Kutta Riemann-solver MHD.
    MhdRk,
    /// Finite-difference constrained-transport MHD.
    MhdLi,
}

impl HydroMethod {
    /// Whether the method delegates its Courant limit to a [`CourantKernel`].
    pub fn uses_courant_kernel(self) -> bool {
        matches!(
            self,
            Self::PpmDirectEuler | Self::PpmLagrangeRemap | Self::Zeus
        )
    }

    /// Whether the method evolves magnetic fields.
    pub fn is_mhd(self) -> bool {
        matches!(self, Self::MhdRk | Self::MhdLi)
    }

    /// Whether the method computes its limit with an inline Riemann scan.
    pub fn is_riemann(self) -> bool {
        matches!(self, Self::HydroRk | Self::MhdRk)
    }
}

/// Inputs of a finite-difference Courant computation.
///
/// All buffers cover the whole block; kernels restrict themselves to the
/// geometry's active range.
#[derive(Clone, Copy, Debug)]
pub struct HydroView<'a> {
    /// Block geometry.
    pub geometry: &'a BlockGeometry,
    /// Hydro method (selects the viscous limit for [`HydroMethod::Zeus`]).
    pub method: HydroMethod,
    /// Quadratic artificial-viscosity coefficient.
    pub viscosity: f64,
    /// Adiabatic index.
    pub gamma: f64,
    /// Pressure-free (dust) flow: sound speed is negligible.
    pub pressure_free: bool,
    /// Cosmological expansion factor.
    pub expansion_factor: f64,
    /// Density.
    pub density: &'a [f64],
    /// Pressure from the [`PressureSolver`].
    pub pressure: &'a [f64],
    /// Velocity components; unused axes hold zeros.
    pub velocity: [&'a [f64]; 3],
}

/// Raw Courant limit and the separate viscous limit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CourantStep {
    /// Courant timestep before the safety factor.
    pub dt: f64,
    /// Artificial-viscosity timestep.
    pub dt_viscous: f64,
}

/// Inputs of a finite-difference MHD fast-speed computation.
///
/// The geometry is always rank 3: lower-rank blocks are promoted with
/// unit stand-in widths before the call.
#[derive(Clone, Copy, Debug)]
pub struct MhdView<'a> {
    /// Rank-3 block geometry.
    pub geometry: &'a BlockGeometry,
    /// Adiabatic index.
    pub gamma: f64,
    /// Density.
    pub density: &'a [f64],
    /// Pressure from the [`PressureSolver`].
    pub pressure: &'a [f64],
    /// Velocity components.
    pub velocity: [&'a [f64]; 3],
    /// Cell-centred magnetic field components.
    pub magnetic: [&'a [f64]; 3],
    /// Specific total energy, if the block carries it.
    pub total_energy: Option<&'a [f64]>,
}

/// Fills a per-cell pressure buffer for the block.
pub trait PressureSolver: Send + Sync {
    /// Write the pressure of every block cell into `out`
    /// (`out.len() == block.geometry().size()`).
    fn compute_pressure(&self, block: &BlockState<'_>, out: &mut [f64]) -> Result<(), KernelError>;
}

/// Per-cell Courant-number kernel for finite-difference hydro.
pub trait CourantKernel: Send + Sync {
    /// Raw Courant and viscous limits over the active range.
    fn courant_timestep(&self, view: &HydroView<'_>) -> Result<CourantStep, KernelError>;
}

/// Fast-magnetosonic timestep kernel for finite-difference MHD.
pub trait FastSpeedKernel: Send + Sync {
    /// Raw fast-speed limit over the active range, before the safety
    /// factor and expansion factor.
    fn fast_speed_timestep(&self, view: &MhdView<'_>) -> Result<f64, KernelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_families() {
        assert!(HydroMethod::Zeus.uses_courant_kernel());
        assert!(HydroMethod::PpmDirectEuler.uses_courant_kernel());
        assert!(!HydroMethod::MhdLi.uses_courant_kernel());
        assert!(!HydroMethod::HydroRk.uses_courant_kernel());
        assert!(HydroMethod::MhdLi.is_mhd());
        assert!(HydroMethod::MhdRk.is_riemann());
        assert!(!HydroMethod::MhdLi.is_riemann());
    }
}
