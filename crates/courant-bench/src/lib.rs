//! Benchmark profiles for the Courant timestep resolver.
//!
//! Provides deterministic block states for benchmarking:
//!
//! - [`reference_profile`]: 64³ block (~262K cells) with ghost zones
//! - [`tube_profile`]: 1-D shock tube of 4096 cells
//!
//! Field values vary smoothly with position and never depend on a
//! random source, so runs are comparable across machines.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use courant_block::{BlockFields, BlockGeometry};
use courant_core::{Axis, FieldRole};

/// A block geometry together with owned field buffers.
pub struct BenchProfile {
    /// Geometry of the block.
    pub geometry: BlockGeometry,
    fields: Vec<(FieldRole, Vec<f64>)>,
}

impl BenchProfile {
    /// Borrow the buffers as a [`BlockFields`] locator.
    pub fn fields(&self) -> BlockFields<'_> {
        let mut fields = BlockFields::new(&self.geometry);
        for (role, data) in &self.fields {
            fields.insert(*role, data).unwrap();
        }
        fields
    }

    /// Owned buffer for `role`, if the profile carries it.
    pub fn buffer(&self, role: FieldRole) -> Option<&[f64]> {
        self.fields
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, d)| d.as_slice())
    }
}

/// Density, internal and total energy, and velocities sampled from
/// smooth functions of the cell coordinates.
fn gas_fields(geometry: &BlockGeometry) -> Vec<(FieldRole, Vec<f64>)> {
    let dims = geometry.dims();
    let size = geometry.size();
    let mut density = Vec::with_capacity(size);
    let mut eint = Vec::with_capacity(size);
    let mut etot = Vec::with_capacity(size);
    let mut velocity = [
        Vec::with_capacity(size),
        Vec::with_capacity(size),
        Vec::with_capacity(size),
    ];

    for k in 0..dims[2] {
        for j in 0..dims[1] {
            for i in 0..dims[0] {
                let x = i as f64 / dims[0] as f64;
                let y = j as f64 / dims[1] as f64;
                let z = k as f64 / dims[2] as f64;
                let rho = 1.0 + 0.5 * (6.283 * x).sin() * (6.283 * y).cos();
                let e = 1.0 + 0.25 * (6.283 * z).cos();
                let v = [
                    0.3 * (6.283 * y).sin(),
                    0.2 * (6.283 * z).sin(),
                    0.1 * (6.283 * x).sin(),
                ];
                let kinetic = 0.5 * (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]);
                density.push(rho);
                eint.push(e);
                etot.push(e + kinetic);
                for axis in Axis::ALL {
                    velocity[axis.index()].push(v[axis.index()]);
                }
            }
        }
    }

    let [v1, v2, v3] = velocity;
    vec![
        (FieldRole::Density, density),
        (FieldRole::InternalEnergy, eint),
        (FieldRole::TotalEnergy, etot),
        (FieldRole::Velocity1, v1),
        (FieldRole::Velocity2, v2),
        (FieldRole::Velocity3, v3),
    ]
}

/// 64³ cells (60³ active) of smoothly perturbed gas.
pub fn reference_profile() -> BenchProfile {
    let geometry = BlockGeometry::builder()
        .rank(3)
        .dims([64, 64, 64])
        .ghost_zones(2)
        .cell_widths([1.0 / 60.0; 3])
        .build()
        .unwrap();
    let fields = gas_fields(&geometry);
    BenchProfile { geometry, fields }
}

/// 4096-cell 1-D tube with a density jump at the midpoint.
pub fn tube_profile() -> BenchProfile {
    let geometry = BlockGeometry::builder()
        .rank(1)
        .dims([4096, 1, 1])
        .ghost_zones(3)
        .cell_widths([1.0 / 4090.0, 1.0, 1.0])
        .build()
        .unwrap();
    let mut fields = gas_fields(&geometry);
    if let Some((_, density)) = fields.iter_mut().find(|(r, _)| *r == FieldRole::Density) {
        for (i, rho) in density.iter_mut().enumerate() {
            if i >= 2048 {
                *rho *= 0.125;
            }
        }
    }
    BenchProfile { geometry, fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courant_core::FieldLocator;

    #[test]
    fn profiles_carry_full_gas_state() {
        let p = tube_profile();
        let fields = p.fields();
        assert_eq!(fields.len(), 6);
        assert!(fields.has_baryons());
        let d = p.buffer(FieldRole::Density).unwrap();
        assert!(d[4000] < d[10]);
    }

    #[test]
    fn reference_profile_is_deterministic() {
        let a = reference_profile();
        let b = reference_profile();
        assert_eq!(
            a.buffer(FieldRole::TotalEnergy),
            b.buffer(FieldRole::TotalEnergy)
        );
    }
}
