//! Cosmological expansion capability.

use courant_core::KernelError;

/// Expansion factor and its rate of change at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Expansion {
    /// Scale factor `a` relating comoving to physical length.
    pub a: f64,
    /// `da/dt`.
    pub dadt: f64,
}

/// Integrates the background cosmology.
pub trait Cosmology: Send + Sync {
    /// Expansion factor at `time`.
    fn expansion_factor(&self, time: f64) -> Result<Expansion, KernelError>;

    /// Largest step the expansion integrator allows from `time`.
    fn expansion_timestep(&self, time: f64) -> Result<f64, KernelError>;
}
