//! Owned particle velocities for a block.

use courant_core::{Axis, ParticleStore};

/// Standard [`ParticleStore`] holding ordinary particle velocities in
/// structure-of-arrays form and extended particle velocities as vectors.
#[derive(Clone, Debug, Default)]
pub struct ParticleList {
    velocities: [Vec<f64>; 3],
    active: Vec<[f64; 3]>,
}

impl ParticleList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ordinary particle.
    pub fn push(&mut self, velocity: [f64; 3]) {
        for (axis, v) in velocity.into_iter().enumerate() {
            self.velocities[axis].push(v);
        }
    }

    /// Append an extended particle.
    pub fn push_active(&mut self, velocity: [f64; 3]) {
        self.active.push(velocity);
    }
}

impl ParticleStore for ParticleList {
    fn particle_count(&self) -> usize {
        self.velocities[0].len()
    }

    fn particle_velocity(&self, index: usize, axis: Axis) -> f64 {
        self.velocities[axis.index()][index]
    }

    fn active_particle_count(&self) -> usize {
        self.active.len()
    }

    fn active_particle_velocity(&self, index: usize) -> [f64; 3] {
        self.active[index]
    }
}
