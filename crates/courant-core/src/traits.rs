//! Core abstraction traits for locating block data.

use crate::id::{Axis, FieldRole};

/// Read-only access to the field buffers of one block.
///
/// This is the physical-quantity locator: it maps a [`FieldRole`] to the
/// flattened buffer holding that quantity. Returns `None` if the block
/// does not carry the quantity.
pub trait FieldLocator {
    /// The buffer for `role`, indexed `i + j*nx + k*nx*ny`.
    fn field(&self, role: FieldRole) -> Option<&[f64]>;

    /// Whether the block carries baryon fields at all.
    ///
    /// Default: the block has baryons iff it has a density field.
    fn has_baryons(&self) -> bool {
        self.field(FieldRole::Density).is_some()
    }
}

/// Read-only access to the particles living on one block.
///
/// Two particle kinds are exposed: ordinary particles, addressed per
/// axis, and extended ("active") particles that carry their own
/// velocity vector.
pub trait ParticleStore {
    /// Number of ordinary particles.
    fn particle_count(&self) -> usize;

    /// Velocity of ordinary particle `index` along `axis`.
    fn particle_velocity(&self, index: usize, axis: Axis) -> f64;

    /// Number of extended particles.
    fn active_particle_count(&self) -> usize {
        0
    }

    /// Velocity vector of extended particle `index`.
    fn active_particle_velocity(&self, _index: usize) -> [f64; 3] {
        [0.0; 3]
    }

    /// Whether the block holds any particle of either kind.
    fn is_empty(&self) -> bool {
        self.particle_count() == 0 && self.active_particle_count() == 0
    }
}

/// A block without particles.
impl ParticleStore for () {
    fn particle_count(&self) -> usize {
        0
    }

    fn particle_velocity(&self, _index: usize, _axis: Axis) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OnlyDensity(Vec<f64>);

    impl FieldLocator for OnlyDensity {
        fn field(&self, role: FieldRole) -> Option<&[f64]> {
            (role == FieldRole::Density).then_some(self.0.as_slice())
        }
    }

    struct NoFields;

    impl FieldLocator for NoFields {
        fn field(&self, _role: FieldRole) -> Option<&[f64]> {
            None
        }
    }

    #[test]
    fn baryons_follow_density() {
        assert!(OnlyDensity(vec![1.0]).has_baryons());
        assert!(!NoFields.has_baryons());
    }

    #[test]
    fn unit_particle_store_is_empty() {
        assert!(().is_empty());
        assert_eq!(().active_particle_velocity(0), [0.0; 3]);
    }
}
