//! Per-cell source-term capabilities that fill a scratch field.

use courant_block::BlockState;
use courant_core::KernelError;

/// Radiative cooling time per cell.
pub trait CoolingKernel: Send + Sync {
    /// Write the cooling time of every block cell into `out`.
    fn cooling_time(&self, block: &BlockState<'_>, out: &mut [f64]) -> Result<(), KernelError>;
}

/// Collapse factor for the one-zone free-fall test.
///
/// `f` in `sqrt(3π / (32 G ρ (1 − f)))`: the fraction of gravity
/// offset by pressure support.
pub trait CollapseFactor: Send + Sync {
    /// Write the collapse factor of every block cell into `out`.
    fn collapse_factor(&self, block: &BlockState<'_>, out: &mut [f64]) -> Result<(), KernelError>;
}
