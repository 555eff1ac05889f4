//! The per-call view of a block handed to the timestep aggregator.

use crate::error::BlockError;
use crate::geometry::BlockGeometry;
use courant_core::{Axis, FieldLocator, FieldRole, ParticleStore, TimestepError};

const NO_PARTICLES: &() = &();

/// Potential field on the gravitating-mass mesh.
///
/// The gravity mesh usually carries extra boundary cells, so its
/// dimensions are independent of the baryon block.
#[derive(Clone, Copy, Debug)]
pub struct GravityField<'a> {
    dims: [usize; 3],
    data: &'a [f64],
}

impl<'a> GravityField<'a> {
    /// Dimensions of the gravity mesh.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Flattened potential values.
    pub fn data(&self) -> &'a [f64] {
        self.data
    }
}

/// Everything one timestep computation reads about a block.
///
/// All data is borrowed; the state is discarded after the call.
///
/// # Split between fields and auxiliary inputs
///
/// Baryon quantities come through the [`FieldLocator`] so that roles the
/// block does not carry can be detected. Gravitational acceleration and
/// potential are produced by the gravity solver on their own schedule
/// and are attached explicitly; an axis with no attached acceleration is
/// simply absent from the gravity constraint.
pub struct BlockState<'a> {
    geometry: &'a BlockGeometry,
    fields: &'a dyn FieldLocator,
    particles: &'a dyn ParticleStore,
    acceleration: [Option<&'a [f64]>; 3],
    potential: Option<GravityField<'a>>,
    time: f64,
}

impl<'a> BlockState<'a> {
    /// A block state without particles, acceleration, or potential.
    pub fn new(geometry: &'a BlockGeometry, fields: &'a dyn FieldLocator, time: f64) -> Self {
        Self {
            geometry,
            fields,
            particles: NO_PARTICLES,
            acceleration: [None; 3],
            potential: None,
            time,
        }
    }

    /// Attach the block's particle store.
    pub fn with_particles(mut self, particles: &'a dyn ParticleStore) -> Self {
        self.particles = particles;
        self
    }

    /// Attach the gravitational acceleration along `axis`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::FieldSizeMismatch`] if `data` does not hold
    /// one value per block cell.
    pub fn with_acceleration(mut self, axis: Axis, data: &'a [f64]) -> Result<Self, BlockError> {
        let expected = self.geometry.size();
        if data.len() != expected {
            return Err(BlockError::FieldSizeMismatch {
                name: format!("acceleration_{axis}"),
                expected,
                actual: data.len(),
            });
        }
        self.acceleration[axis.index()] = Some(data);
        Ok(self)
    }

    /// Attach the gravitational potential on a mesh of dimensions `dims`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::FieldSizeMismatch`] if `data.len()` is not
    /// the product of `dims`.
    pub fn with_potential(mut self, dims: [usize; 3], data: &'a [f64]) -> Result<Self, BlockError> {
        let expected: usize = dims.iter().product();
        if data.len() != expected {
            return Err(BlockError::FieldSizeMismatch {
                name: "potential".to_string(),
                expected,
                actual: data.len(),
            });
        }
        self.potential = Some(GravityField { dims, data });
        Ok(self)
    }

    /// Block geometry.
    pub fn geometry(&self) -> &'a BlockGeometry {
        self.geometry
    }

    /// Physical-quantity locator.
    pub fn fields(&self) -> &'a dyn FieldLocator {
        self.fields
    }

    /// Particle store (empty unless attached).
    pub fn particles(&self) -> &'a dyn ParticleStore {
        self.particles
    }

    /// Gravitational acceleration along `axis`, if attached.
    pub fn acceleration(&self, axis: Axis) -> Option<&'a [f64]> {
        self.acceleration[axis.index()]
    }

    /// Gravitational potential, if attached.
    pub fn potential(&self) -> Option<GravityField<'a>> {
        self.potential
    }

    /// Simulation time at which the timestep is requested.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Whether the block carries baryon fields.
    pub fn has_baryons(&self) -> bool {
        self.fields.has_baryons()
    }

    /// The buffer for `role`, or `None` if the block lacks it.
    pub fn field(&self, role: FieldRole) -> Option<&'a [f64]> {
        let fields: &'a dyn FieldLocator = self.fields;
        fields.field(role)
    }

    /// The buffer for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`TimestepError::MissingField`] if the locator cannot
    /// resolve `role`.
    pub fn require(&self, role: FieldRole) -> Result<&'a [f64], TimestepError> {
        self.field(role)
            .ok_or(TimestepError::MissingField { role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::BlockFields;
    use crate::particles::ParticleList;

    fn square() -> BlockGeometry {
        BlockGeometry::builder()
            .rank(2)
            .dims([3, 3, 1])
            .build()
            .unwrap()
    }

    #[test]
    fn defaults_are_empty() {
        let geom = square();
        let fields = BlockFields::new(&geom);
        let state = BlockState::new(&geom, &fields, 0.5);
        assert!(state.particles().is_empty());
        assert!(state.acceleration(Axis::X).is_none());
        assert!(state.potential().is_none());
        assert_eq!(state.time(), 0.5);
        assert!(!state.has_baryons());
    }

    #[test]
    fn require_reports_missing_role() {
        let geom = square();
        let density = [1.0; 9];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::Density, &density)
            .unwrap();
        let state = BlockState::new(&geom, &fields, 0.0);
        assert_eq!(state.require(FieldRole::Density).unwrap().len(), 9);
        assert_eq!(
            state.require(FieldRole::Velocity3).unwrap_err(),
            TimestepError::MissingField {
                role: FieldRole::Velocity3
            }
        );
    }

    #[test]
    fn acceleration_must_match_block_size() {
        let geom = square();
        let fields = BlockFields::new(&geom);
        let short = [0.0; 4];
        let result = BlockState::new(&geom, &fields, 0.0).with_acceleration(Axis::Y, &short);
        assert!(matches!(
            result,
            Err(BlockError::FieldSizeMismatch { expected: 9, actual: 4, .. })
        ));
    }

    #[test]
    fn potential_uses_its_own_dims() {
        let geom = square();
        let fields = BlockFields::new(&geom);
        let phi = [1.0; 5 * 5];
        let state = BlockState::new(&geom, &fields, 0.0)
            .with_potential([5, 5, 1], &phi)
            .unwrap();
        let gravity = state.potential().unwrap();
        assert_eq!(gravity.dims(), [5, 5, 1]);
        assert_eq!(gravity.data().len(), 25);
    }

    #[test]
    fn particles_attach() {
        let geom = square();
        let fields = BlockFields::new(&geom);
        let mut list = ParticleList::new();
        list.push([1.0, 0.0, 0.0]);
        let state = BlockState::new(&geom, &fields, 0.0).with_particles(&list);
        assert_eq!(state.particles().particle_count(), 1);
    }
}
