//! Constant-coefficient transport kernels.

use courant_block::BlockState;
use courant_core::{KernelError, UNCONSTRAINED};
use courant_kernel::{ConductionKernel, ConductionMode, CosmicRayKernel};

fn check_coefficient(name: &str, value: f64) -> Result<(), String> {
    if !(value >= 0.0) || !value.is_finite() {
        return Err(format!("{name} must be finite and >= 0, got {value}"));
    }
    Ok(())
}

/// Explicit diffusion limit `½ Δ_min² / (rank κ)`.
fn diffusion_limit(block: &BlockState<'_>, kappa: f64) -> f64 {
    if kappa <= 0.0 {
        return UNCONSTRAINED;
    }
    let geom = block.geometry();
    let dx = geom.min_cell_width();
    0.5 * dx * dx / (geom.rank() as f64 * kappa)
}

/// Thermal conduction with a uniform diffusivity.
///
/// With [`ConductionMode::Both`] the isotropic and anisotropic terms add,
/// so the effective diffusivity doubles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantConduction {
    kappa: f64,
}

impl ConstantConduction {
    /// Create a conduction kernel with diffusivity `kappa`.
    ///
    /// # Errors
    ///
    /// Returns an error if `kappa` is negative or not finite.
    pub fn new(kappa: f64) -> Result<Self, String> {
        check_coefficient("kappa", kappa)?;
        Ok(Self { kappa })
    }
}

impl ConductionKernel for ConstantConduction {
    fn conduction_timestep(
        &self,
        block: &BlockState<'_>,
        mode: ConductionMode,
    ) -> Result<f64, KernelError> {
        let kappa = match mode {
            ConductionMode::Isotropic | ConductionMode::Anisotropic => self.kappa,
            ConductionMode::Both => 2.0 * self.kappa,
        };
        Ok(diffusion_limit(block, kappa))
    }
}

/// Cosmic-ray transport with a uniform diffusivity and streaming speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantCosmicRay {
    kappa: f64,
    streaming_speed: f64,
}

impl ConstantCosmicRay {
    /// Create a cosmic-ray kernel.
    ///
    /// # Errors
    ///
    /// Returns an error if either coefficient is negative or not finite.
    pub fn new(kappa: f64, streaming_speed: f64) -> Result<Self, String> {
        check_coefficient("kappa", kappa)?;
        check_coefficient("streaming_speed", streaming_speed)?;
        Ok(Self {
            kappa,
            streaming_speed,
        })
    }
}

impl CosmicRayKernel for ConstantCosmicRay {
    fn diffusion_timestep(&self, block: &BlockState<'_>) -> Result<f64, KernelError> {
        Ok(diffusion_limit(block, self.kappa))
    }

    fn streaming_timestep(&self, block: &BlockState<'_>) -> Result<f64, KernelError> {
        if self.streaming_speed <= 0.0 {
            return Ok(UNCONSTRAINED);
        }
        Ok(block.geometry().min_cell_width() / self.streaming_speed)
    }
}
