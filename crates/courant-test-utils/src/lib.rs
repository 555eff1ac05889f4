//! Test utilities and mock types for Courant development.
//!
//! Provides a map-backed [`FieldLocator`] mock and the fixed-answer
//! kernels in [`fixtures`] for driving the aggregator through each of
//! its processes in isolation.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashMap;

use courant_block::BlockGeometry;
use courant_core::{FieldLocator, FieldRole};

pub use fixtures::{
    FailingKernel, FixedCollapse, FixedCooling, FixedCosmology, FixedCourant, FixedFastSpeed,
    FixedTransport,
};

/// Mock implementation of [`FieldLocator`].
///
/// Backed by a `HashMap<FieldRole, Vec<f64>>`, so buffers are owned and
/// no size validation happens. Pre-populate with
/// [`set_field`](MockFieldLocator::set_field) before building a block.
#[derive(Default)]
pub struct MockFieldLocator {
    fields: HashMap<FieldRole, Vec<f64>>,
}

impl MockFieldLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a field with data for testing.
    pub fn set_field(&mut self, role: FieldRole, data: Vec<f64>) {
        self.fields.insert(role, data);
    }

    /// Builder form of [`set_field`](Self::set_field).
    pub fn with_field(mut self, role: FieldRole, data: Vec<f64>) -> Self {
        self.set_field(role, data);
        self
    }

    /// Fill `role` with `value` in every cell of `geometry`.
    pub fn with_uniform(self, geometry: &BlockGeometry, role: FieldRole, value: f64) -> Self {
        self.with_field(role, vec![value; geometry.size()])
    }

    /// Returns the number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl FieldLocator for MockFieldLocator {
    fn field(&self, role: FieldRole) -> Option<&[f64]> {
        self.fields.get(&role).map(|v| v.as_slice())
    }
}

/// A uniform hydro state: density, internal and total energy, and
/// three velocity components, each constant over the block.
pub fn uniform_gas(
    geometry: &BlockGeometry,
    density: f64,
    internal_energy: f64,
    velocity: [f64; 3],
) -> MockFieldLocator {
    let kinetic = 0.5 * velocity.iter().map(|v| v * v).sum::<f64>();
    MockFieldLocator::new()
        .with_uniform(geometry, FieldRole::Density, density)
        .with_uniform(geometry, FieldRole::InternalEnergy, internal_energy)
        .with_uniform(geometry, FieldRole::TotalEnergy, internal_energy + kinetic)
        .with_uniform(geometry, FieldRole::Velocity1, velocity[0])
        .with_uniform(geometry, FieldRole::Velocity2, velocity[1])
        .with_uniform(geometry, FieldRole::Velocity3, velocity[2])
}

/// A cubic block of `n³` cells with unit widths and no ghost zones.
///
/// Panics if `n` is zero.
pub fn cube(n: usize) -> BlockGeometry {
    BlockGeometry::builder()
        .rank(3)
        .dims([n, n, n])
        .build()
        .expect("cube geometry")
}

/// A one-dimensional block of `n` cells of width `dx`.
///
/// Panics if `n` is zero or `dx` is not positive.
pub fn line(n: usize, dx: f64) -> BlockGeometry {
    BlockGeometry::builder()
        .rank(1)
        .dims([n, 1, 1])
        .cell_widths([dx, 1.0, 1.0])
        .build()
        .expect("line geometry")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_locator_reports_baryons_by_density() {
        let geom = line(4, 1.0);
        let empty = MockFieldLocator::new();
        assert!(!empty.has_baryons());
        let gas = uniform_gas(&geom, 1.0, 2.0, [1.0, 0.0, 0.0]);
        assert!(gas.has_baryons());
        assert_eq!(gas.field_count(), 6);
        assert_eq!(gas.field(FieldRole::TotalEnergy), Some(&[2.5; 4][..]));
    }
}
