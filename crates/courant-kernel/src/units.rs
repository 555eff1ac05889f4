//! Unit-system capability.

use courant_core::KernelError;

/// Conversion factors from code units to cgs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Units {
    /// g cm⁻³ per code density unit.
    pub density: f64,
    /// cm per code length unit.
    pub length: f64,
    /// K per code temperature unit.
    pub temperature: f64,
    /// s per code time unit.
    pub time: f64,
    /// cm s⁻¹ per code velocity unit.
    pub velocity: f64,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            density: 1.0,
            length: 1.0,
            temperature: 1.0,
            time: 1.0,
            velocity: 1.0,
        }
    }
}

/// Supplies unit conversion factors, which may evolve with time in
/// comoving runs.
pub trait UnitSystem: Send + Sync {
    /// Conversion factors valid at `time`.
    fn units(&self, time: f64) -> Result<Units, KernelError>;
}
