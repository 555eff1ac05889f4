//! Fixed conversion factors.

use courant_core::KernelError;
use courant_kernel::{UnitSystem, Units};

/// A unit system whose conversion factors never change.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CodeUnits {
    units: Units,
}

impl CodeUnits {
    /// Use the given conversion factors at every time.
    pub fn new(units: Units) -> Self {
        Self { units }
    }

    /// Code units are cgs (every factor is 1).
    pub fn cgs() -> Self {
        Self::default()
    }
}

impl UnitSystem for CodeUnits {
    fn units(&self, _time: f64) -> Result<Units, KernelError> {
        Ok(self.units)
    }
}
