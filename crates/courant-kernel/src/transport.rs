//! Diffusive transport capabilities: thermal conduction and cosmic rays.

use courant_block::BlockState;
use courant_core::KernelError;

/// Which thermal-conduction physics is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConductionMode {
    /// Isotropic (Spitzer) conduction.
    Isotropic,
    /// Conduction along magnetic field lines only.
    Anisotropic,
    /// Both isotropic and anisotropic terms.
    Both,
}

/// Explicit thermal-conduction timestep.
pub trait ConductionKernel: Send + Sync {
    /// Largest stable explicit conduction step for the block, before
    /// the subcycling multiplier.
    fn conduction_timestep(
        &self,
        block: &BlockState<'_>,
        mode: ConductionMode,
    ) -> Result<f64, KernelError>;
}

/// Cosmic-ray transport timesteps.
pub trait CosmicRayKernel: Send + Sync {
    /// Explicit cosmic-ray diffusion timestep.
    fn diffusion_timestep(&self, block: &BlockState<'_>) -> Result<f64, KernelError>;

    /// Cosmic-ray streaming timestep.
    fn streaming_timestep(&self, block: &BlockState<'_>) -> Result<f64, KernelError>;
}
