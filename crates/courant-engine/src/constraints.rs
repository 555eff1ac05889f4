//! Inline per-process constraints.
//!
//! Each function returns its raw candidate before the process safety
//! factor; [`UNCONSTRAINED`] means the process found nothing to limit.

use courant_block::{BlockGeometry, BlockState, GravityField};
use courant_core::{Axis, TINY_NUMBER, UNCONSTRAINED};

#[cfg(feature = "transfer")]
use courant_core::{FieldRole, TimestepError, KM_PER_S};

/// Particle crossing time `Δ·a / max(|v|, ε)` over every particle of
/// both kinds and every active axis.
pub fn particle_timestep(block: &BlockState<'_>, expansion_factor: f64) -> f64 {
    let geom = block.geometry();
    let particles = block.particles();
    let mut dt = UNCONSTRAINED;
    for axis in Axis::active(geom.rank()) {
        let cell = geom.cell_width(axis) * expansion_factor;
        for i in 0..particles.particle_count() {
            let v = particles.particle_velocity(i, axis).abs();
            dt = dt.min(cell / v.max(TINY_NUMBER));
        }
        for i in 0..particles.active_particle_count() {
            let v = particles.active_particle_velocity(i)[axis.index()].abs();
            dt = dt.min(cell / v.max(TINY_NUMBER));
        }
    }
    dt
}

/// `sqrt(Δ / (|g| + ε))` over every cell of each field, halved unless
/// no field contributed.
fn acceleration_limit<'a>(
    geom: &BlockGeometry,
    fields: impl Iterator<Item = (Axis, &'a [f64])>,
) -> f64 {
    let mut dt = UNCONSTRAINED;
    for (axis, g) in fields {
        let width = geom.cell_width(axis);
        for &value in g {
            dt = dt.min((width / (value.abs() + TINY_NUMBER)).sqrt());
        }
    }
    if dt != UNCONSTRAINED {
        dt *= 0.5;
    }
    dt
}

/// Self-gravity limit over every active axis with an attached
/// acceleration field.
///
/// Stays [`UNCONSTRAINED`] (never halved) when no field is attached.
pub fn acceleration_timestep(block: &BlockState<'_>) -> f64 {
    let geom = block.geometry();
    let fields = Axis::active(geom.rank())
        .into_iter()
        .filter_map(|axis| block.acceleration(axis).map(|g| (axis, g)));
    acceleration_limit(geom, fields)
}

/// Minimum of `data` over the active range.
pub fn active_minimum(geom: &BlockGeometry, data: &[f64]) -> f64 {
    geom.active_cells()
        .map(|(_, n)| data[n])
        .fold(UNCONSTRAINED, f64::min)
}

/// Count of NaN values over the active range, alongside the number of
/// active cells.
pub fn active_nan_count(geom: &BlockGeometry, data: &[f64]) -> (usize, usize) {
    geom.active_cells().fold((0, 0), |(nan, active), (_, n)| {
        (nan + usize::from(data[n].is_nan()), active + 1)
    })
}

/// Quantum-pressure coefficient `ħ/m` in code units.
pub fn quantum_coefficient(
    hbar_over_m: f64,
    time_units: f64,
    length_units: f64,
    expansion_factor: f64,
    fdm_mass: f64,
) -> f64 {
    let length = length_units / expansion_factor;
    hbar_over_m * time_units / (length * length) / fdm_mass
}

/// Quantum-pressure limit `Δ² / (2 hmcoef) · safety`, where `Δ` is the
/// smallest comoving width, further capped by `|hmcoef / φ|` over the
/// whole gravity mesh when a potential is given.
pub fn quantum_timestep(
    geom: &BlockGeometry,
    hmcoef: f64,
    expansion_factor: f64,
    safety: f64,
    potential: Option<GravityField<'_>>,
) -> f64 {
    let dx = geom.min_cell_width() * expansion_factor;
    let mut dt = dx * dx / hmcoef / 2.0 * safety;
    if let Some(phi) = potential {
        for &value in phi.data() {
            dt = dt.min((hmcoef / value).abs());
        }
    }
    dt
}

/// Radiation-pressure limit, treated like gravity.
///
/// # Errors
///
/// [`TimestepError::MissingField`] if an active axis has no
/// radiation-pressure acceleration field.
#[cfg(feature = "transfer")]
pub fn radiation_pressure_timestep(block: &BlockState<'_>) -> Result<f64, TimestepError> {
    let geom = block.geometry();
    let mut fields = Vec::with_capacity(geom.rank());
    for axis in Axis::active(geom.rank()) {
        fields.push((axis, block.require(FieldRole::radiation_pressure(axis))?));
    }
    Ok(acceleration_limit(geom, fields.into_iter()))
}

/// Time to cross one x-cell at `velocity_kms`, or [`UNCONSTRAINED`] if
/// the cap is disabled.
#[cfg(feature = "transfer")]
pub fn safety_velocity_timestep(
    geom: &BlockGeometry,
    velocity_kms: f64,
    velocity_units: f64,
    expansion_factor: f64,
) -> f64 {
    if velocity_kms > 0.0 {
        expansion_factor * geom.cell_width(Axis::X) / (velocity_kms * KM_PER_S / velocity_units)
    } else {
        UNCONSTRAINED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courant_block::{BlockFields, ParticleList};

    fn plane() -> BlockGeometry {
        BlockGeometry::builder()
            .rank(2)
            .dims([3, 2, 1])
            .cell_widths([2.0, 1.0, 1.0])
            .build()
            .unwrap()
    }

    #[test]
    fn particles_use_both_kinds_and_active_axes() {
        let geom = plane();
        let fields = BlockFields::new(&geom);
        let mut list = ParticleList::new();
        list.push([1.0, 0.0, 1.0e9]);
        list.push_active([0.0, -4.0, 0.0]);
        let block = BlockState::new(&geom, &fields, 0.0).with_particles(&list);
        // Active particle along y: 1 * 0.5 / 4
        assert!((particle_timestep(&block, 0.5) - 0.125).abs() < 1e-15);
    }

    #[test]
    fn resting_particle_uses_tiny_floor() {
        let geom = plane();
        let fields = BlockFields::new(&geom);
        let mut list = ParticleList::new();
        list.push([0.0; 3]);
        let block = BlockState::new(&geom, &fields, 0.0).with_particles(&list);
        let dt = particle_timestep(&block, 1.0);
        assert!(dt.is_finite());
        assert_eq!(dt, 1.0 / TINY_NUMBER);
    }

    #[test]
    fn no_particles_is_unconstrained() {
        let geom = plane();
        let fields = BlockFields::new(&geom);
        let block = BlockState::new(&geom, &fields, 0.0);
        assert_eq!(particle_timestep(&block, 1.0), UNCONSTRAINED);
    }

    #[test]
    fn acceleration_guard_keeps_sentinel() {
        let geom = plane();
        let fields = BlockFields::new(&geom);
        let block = BlockState::new(&geom, &fields, 0.0);
        assert_eq!(acceleration_timestep(&block), UNCONSTRAINED);
    }

    #[test]
    fn acceleration_is_halved() {
        let geom = plane();
        let fields = BlockFields::new(&geom);
        let gx = [0.5; 6];
        let gy = [4.0; 6];
        let block = BlockState::new(&geom, &fields, 0.0)
            .with_acceleration(Axis::X, &gx)
            .unwrap()
            .with_acceleration(Axis::Y, &gy)
            .unwrap();
        // min(sqrt(2 / 0.5), sqrt(1 / 4)) = 0.5, halved
        assert!((acceleration_timestep(&block) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn zero_acceleration_is_finite() {
        let geom = plane();
        let fields = BlockFields::new(&geom);
        let gx = [0.0; 6];
        let block = BlockState::new(&geom, &fields, 0.0)
            .with_acceleration(Axis::X, &gx)
            .unwrap();
        let dt = acceleration_timestep(&block);
        assert!(dt.is_finite());
    }

    #[test]
    fn active_minimum_skips_ghosts() {
        let geom = BlockGeometry::builder()
            .rank(1)
            .dims([5, 1, 1])
            .ghost_zones(1)
            .build()
            .unwrap();
        let data = [0.1, 3.0, 2.0, 4.0, 0.2];
        assert_eq!(active_minimum(&geom, &data), 2.0);
    }

    #[test]
    fn active_minimum_includes_last_active_cell() {
        let geom = BlockGeometry::builder()
            .rank(1)
            .dims([5, 1, 1])
            .ghost_zones(1)
            .build()
            .unwrap();
        let data = [0.1, 3.0, 2.0, 1.5, 0.2];
        assert_eq!(active_minimum(&geom, &data), 1.5);
    }

    #[test]
    fn nan_count_covers_active_range_only() {
        let geom = BlockGeometry::builder()
            .rank(1)
            .dims([5, 1, 1])
            .ghost_zones(1)
            .build()
            .unwrap();
        let data = [f64::NAN, 3.0, f64::NAN, 1.5, f64::NAN];
        assert_eq!(active_nan_count(&geom, &data), (1, 3));
        assert_eq!(active_minimum(&geom, &data), 1.5);
    }

    #[test]
    fn quantum_limit_and_potential_cap() {
        let geom = plane();
        let hmcoef = quantum_coefficient(2.0, 1.0, 1.0, 1.0, 1.0);
        assert_eq!(hmcoef, 2.0);
        // dx = 1: 1 / 2 / 2 * 0.5
        assert_eq!(quantum_timestep(&geom, hmcoef, 1.0, 0.5, None), 0.125);

        let fields = BlockFields::new(&geom);
        let phi = [-100.0, 40.0, 0.0, 1.0e3];
        let block = BlockState::new(&geom, &fields, 0.0)
            .with_potential([2, 2, 1], &phi)
            .unwrap();
        let dt = quantum_timestep(&geom, hmcoef, 1.0, 0.5, block.potential());
        assert!((dt - 0.002).abs() < 1e-15);
    }

    #[test]
    fn quantum_coefficient_scales_with_comoving_length() {
        // length / a = 2 -> divide by 4
        assert_eq!(quantum_coefficient(8.0, 1.0, 4.0, 2.0, 1.0), 2.0);
        assert_eq!(quantum_coefficient(8.0, 1.0, 1.0, 1.0, 4.0), 2.0);
    }

    #[cfg(feature = "transfer")]
    #[test]
    fn radiation_pressure_needs_active_fields() {
        let geom = plane();
        let rx = [1.0; 6];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::RadiationPressure1, &rx)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        assert_eq!(
            radiation_pressure_timestep(&block),
            Err(TimestepError::MissingField {
                role: FieldRole::RadiationPressure2
            })
        );
    }

    #[cfg(feature = "transfer")]
    #[test]
    fn radiation_pressure_like_gravity() {
        let geom = plane();
        let rx = [2.0; 6];
        let ry = [0.0; 6];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::RadiationPressure1, &rx)
            .unwrap()
            .with(FieldRole::RadiationPressure2, &ry)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        // sqrt(2 / 2) halved
        let dt = radiation_pressure_timestep(&block).unwrap();
        assert!((dt - 0.5).abs() < 1e-9);
    }

    #[cfg(feature = "transfer")]
    #[test]
    fn safety_velocity_in_kms() {
        let geom = plane();
        // 2 cm at 1 km/s in cgs
        let dt = safety_velocity_timestep(&geom, 1.0, 1.0, 1.0);
        assert!((dt - 2.0e-5).abs() < 1e-18);
        assert_eq!(safety_velocity_timestep(&geom, 0.0, 1.0, 1.0), UNCONSTRAINED);
    }
}
