//! Per-cell source-term providers.

use courant_block::BlockState;
use courant_core::{FieldRole, KernelError, UNCONSTRAINED};
use courant_kernel::{CollapseFactor, CoolingKernel};

fn check_out(out: &[f64], size: usize) -> Result<(), KernelError> {
    if out.len() == size {
        Ok(())
    } else {
        Err(KernelError::Unavailable {
            reason: format!("output buffer holds {} cells, block has {size}", out.len()),
        })
    }
}

/// Cooling with a constant rate coefficient.
///
/// The specific energy loss rate is `Λ ρ`, so the cooling time is
/// `t = e / (Λ ρ)` with `e` the specific internal energy (the total
/// energy is used when the block has no internal-energy field). Cells
/// that do not cool get [`UNCONSTRAINED`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantLambdaCooling {
    lambda: f64,
}

impl ConstantLambdaCooling {
    /// Create a cooling kernel with rate coefficient `lambda`.
    ///
    /// # Errors
    ///
    /// Returns an error if `lambda` is negative or not finite.
    pub fn new(lambda: f64) -> Result<Self, String> {
        if !(lambda >= 0.0) || !lambda.is_finite() {
            return Err(format!("lambda must be finite and >= 0, got {lambda}"));
        }
        Ok(Self { lambda })
    }
}

impl CoolingKernel for ConstantLambdaCooling {
    fn cooling_time(&self, block: &BlockState<'_>, out: &mut [f64]) -> Result<(), KernelError> {
        check_out(out, block.geometry().size())?;
        let density = block
            .field(FieldRole::Density)
            .ok_or_else(|| KernelError::Unavailable {
                reason: "cooling needs density".into(),
            })?;
        let energy = block
            .field(FieldRole::InternalEnergy)
            .or_else(|| block.field(FieldRole::TotalEnergy))
            .ok_or_else(|| KernelError::Unavailable {
                reason: "cooling needs an energy field".into(),
            })?;
        for (t, (&d, &e)) in out.iter_mut().zip(density.iter().zip(energy)) {
            let rate = self.lambda * d;
            *t = if rate > 0.0 && e > 0.0 {
                e / rate
            } else {
                UNCONSTRAINED
            };
        }
        Ok(())
    }
}

/// The same collapse factor in every cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformCollapse {
    factor: f64,
}

impl UniformCollapse {
    /// Create a provider returning `factor` everywhere.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 ≤ factor < 1`.
    pub fn new(factor: f64) -> Result<Self, String> {
        if !(0.0..1.0).contains(&factor) {
            return Err(format!("collapse factor must be in [0, 1), got {factor}"));
        }
        Ok(Self { factor })
    }
}

impl CollapseFactor for UniformCollapse {
    fn collapse_factor(&self, block: &BlockState<'_>, out: &mut [f64]) -> Result<(), KernelError> {
        check_out(out, block.geometry().size())?;
        out.fill(self.factor);
        Ok(())
    }
}
