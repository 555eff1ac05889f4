//! Limiting-cell diagnostic.
//!
//! When the finite-difference Courant step converts to an implausibly
//! short physical time, the aggregator re-scans the active region with
//! an independent Godunov-style estimate to find which cell is
//! responsible. The result is for reporting only.

use std::fmt;

use courant_block::BlockGeometry;
use courant_core::{Axis, DIAGNOSTIC_THRESHOLD_YEARS, TINY_NUMBER, YEAR_S};
use courant_kernel::HydroView;

/// Inputs of [`find_limiting_cell`].
#[derive(Clone, Copy, Debug)]
pub struct LimitingCellInput<'a> {
    /// Block geometry.
    pub geometry: &'a BlockGeometry,
    /// Adiabatic index.
    pub gamma: f64,
    /// Pressure-free flow: use a vanishing sound speed in the estimate.
    pub pressure_free: bool,
    /// Cosmological expansion factor.
    pub expansion_factor: f64,
    /// Density.
    pub density: &'a [f64],
    /// Pressure.
    pub pressure: &'a [f64],
    /// Velocity components.
    pub velocity: [&'a [f64]; 3],
}

impl<'a> From<&HydroView<'a>> for LimitingCellInput<'a> {
    fn from(view: &HydroView<'a>) -> Self {
        Self {
            geometry: view.geometry,
            gamma: view.gamma,
            pressure_free: view.pressure_free,
            expansion_factor: view.expansion_factor,
            density: view.density,
            pressure: view.pressure,
            velocity: view.velocity,
        }
    }
}

/// The cell with the smallest Godunov timestep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LimitingCell {
    /// Density of the limiting cell.
    pub density: f64,
    /// Sound speed `sqrt(γ p / ρ)` of the limiting cell.
    pub sound_speed: f64,
    /// Cell width along the first axis.
    pub cell_width: f64,
    /// Godunov timestep of the limiting cell.
    pub dt: f64,
    /// Flat index of the limiting cell; `None` if no cell qualified.
    pub index: Option<usize>,
}

impl LimitingCell {
    /// Result when no cell qualified: every scalar is zero.
    pub const NONE: LimitingCell = LimitingCell {
        density: 0.0,
        sound_speed: 0.0,
        cell_width: 0.0,
        dt: 0.0,
        index: None,
    };

    /// Whether a cell was found.
    pub fn is_found(&self) -> bool {
        self.index.is_some()
    }
}

impl fmt::Display for LimitingCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(
                f,
                "cell {index}: dt = {:e}, rho = {}, cs = {}, dx = {}",
                self.dt, self.density, self.sound_speed, self.cell_width
            ),
            None => f.write_str("no limiting cell"),
        }
    }
}

/// Scan the active range and return the cell with the smallest
///
/// ```text
/// dt_cell = a / Σ_axes (cs + |v − v_grid|) / Δ
/// ```
///
/// Cells with non-positive density or pressure, or whose denominator
/// does not exceed [`TINY_NUMBER`], are skipped. Axes beyond the rank
/// contribute nothing. Ties keep the first cell in storage order.
///
/// Returns [`LimitingCell::NONE`] if no cell qualifies.
///
/// # Examples
///
/// ```
/// use courant_block::BlockGeometry;
/// use courant_engine::{find_limiting_cell, LimitingCellInput};
///
/// let geom = BlockGeometry::builder().rank(1).dims([2, 1, 1]).build().unwrap();
/// let density = [1.0, 1.0];
/// let pressure = [1.0, 4.0];
/// let zero = [0.0, 0.0];
/// let cell = find_limiting_cell(&LimitingCellInput {
///     geometry: &geom,
///     gamma: 1.0,
///     pressure_free: false,
///     expansion_factor: 1.0,
///     density: &density,
///     pressure: &pressure,
///     velocity: [&zero, &zero, &zero],
/// });
/// assert_eq!(cell.index, Some(1));
/// assert_eq!(cell.dt, 0.5);
/// ```
pub fn find_limiting_cell(input: &LimitingCellInput<'_>) -> LimitingCell {
    let geom = input.geometry;
    let axes = Axis::active(geom.rank());
    let mut best: Option<(usize, f64)> = None;

    for (_, n) in geom.active_cells() {
        let rho = input.density[n];
        let p = input.pressure[n];
        if !(rho > 0.0) || !(p > 0.0) {
            continue;
        }
        let cs = if input.pressure_free {
            TINY_NUMBER
        } else {
            (input.gamma * p / rho).sqrt()
        };
        let denom: f64 = axes
            .iter()
            .map(|&axis| {
                let dv = (input.velocity[axis.index()][n] - geom.grid_velocity(axis)).abs();
                (cs + dv) / geom.cell_width(axis)
            })
            .sum();
        if !(denom > TINY_NUMBER) {
            continue;
        }
        let dt = input.expansion_factor / denom;
        if best.map_or(true, |(_, best_dt)| dt < best_dt) {
            best = Some((n, dt));
        }
    }

    match best {
        Some((n, dt)) => {
            let rho = input.density[n];
            LimitingCell {
                density: rho,
                sound_speed: (input.gamma * input.pressure[n] / rho).sqrt(),
                cell_width: geom.cell_width(Axis::X),
                dt,
                index: Some(n),
            }
        }
        None => LimitingCell::NONE,
    }
}

/// Whether a raw Courant step, once scaled by `safety` and converted
/// to seconds with `time_units`, is shorter than
/// [`DIAGNOSTIC_THRESHOLD_YEARS`].
pub fn below_diagnostic_threshold(dt: f64, safety: f64, time_units: f64) -> bool {
    dt * safety * time_units / YEAR_S < DIAGNOSTIC_THRESHOLD_YEARS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(
        geom: &'a BlockGeometry,
        d: &'a [f64],
        p: &'a [f64],
        v: [&'a [f64]; 3],
    ) -> LimitingCellInput<'a> {
        LimitingCellInput {
            geometry: geom,
            gamma: 1.0,
            pressure_free: false,
            expansion_factor: 1.0,
            density: d,
            pressure: p,
            velocity: v,
        }
    }

    fn cube() -> BlockGeometry {
        BlockGeometry::builder()
            .rank(3)
            .dims([2, 2, 2])
            .build()
            .unwrap()
    }

    #[test]
    fn all_empty_block_reports_zeros() {
        let geom = cube();
        let d = [0.0, -1.0, 0.0, -2.0, 0.0, 0.0, -0.5, 0.0];
        let p = [1.0; 8];
        let z = [0.0; 8];
        let cell = find_limiting_cell(&input(&geom, &d, &p, [&z, &z, &z]));
        assert_eq!(cell, LimitingCell::NONE);
        assert_eq!(cell.density, 0.0);
        assert_eq!(cell.sound_speed, 0.0);
        assert_eq!(cell.cell_width, 0.0);
        assert_eq!(cell.dt, 0.0);
        assert!(!cell.is_found());
    }

    #[test]
    fn single_valid_cell_is_returned_exactly() {
        let geom = cube();
        let mut d = [0.0; 8];
        let mut p = [1.0; 8];
        d[6] = 4.0;
        p[6] = 9.0;
        let mut vx = [0.0; 8];
        vx[6] = 0.25;
        let z = [0.0; 8];
        let cell = find_limiting_cell(&input(&geom, &d, &p, [&vx, &z, &z]));
        assert_eq!(cell.index, Some(6));
        assert_eq!(cell.density, 4.0);
        assert_eq!(cell.sound_speed, 1.5);
        assert_eq!(cell.cell_width, 1.0);
        // 1 / ((1.5 + 0.25) + 1.5 + 1.5)
        assert!((cell.dt - 1.0 / 4.75).abs() < 1e-15);
    }

    #[test]
    fn non_positive_pressure_is_skipped() {
        let geom = cube();
        let d = [1.0; 8];
        let mut p = [0.0; 8];
        p[2] = 1.0;
        let z = [0.0; 8];
        let cell = find_limiting_cell(&input(&geom, &d, &p, [&z, &z, &z]));
        assert_eq!(cell.index, Some(2));
    }

    #[test]
    fn ties_keep_first_cell() {
        let geom = cube();
        let d = [1.0; 8];
        let p = [1.0; 8];
        let z = [0.0; 8];
        let cell = find_limiting_cell(&input(&geom, &d, &p, [&z, &z, &z]));
        assert_eq!(cell.index, Some(0));
    }

    #[test]
    fn grid_velocity_is_subtracted() {
        let geom = BlockGeometry::builder()
            .rank(1)
            .dims([2, 1, 1])
            .grid_velocity([2.0, 0.0, 0.0])
            .build()
            .unwrap();
        let d = [1.0; 2];
        let p = [1.0; 2];
        let vx = [2.0, 0.0];
        let z = [0.0; 2];
        let cell = find_limiting_cell(&input(&geom, &d, &p, [&vx, &z, &z]));
        // Cell 0 moves with the grid; cell 1 is 2 against it.
        assert_eq!(cell.index, Some(1));
        assert!((cell.dt - 1.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn inactive_axes_ignore_field_contents() {
        let geom = BlockGeometry::builder()
            .rank(1)
            .dims([1, 1, 1])
            .build()
            .unwrap();
        let d = [1.0];
        let p = [1.0];
        let z = [0.0];
        let nan = [f64::NAN];
        let cell = find_limiting_cell(&input(&geom, &d, &p, [&z, &nan, &nan]));
        assert_eq!(cell.dt, 1.0);
    }

    #[test]
    fn pressure_free_uses_flow_speed_only() {
        let geom = BlockGeometry::builder()
            .rank(1)
            .dims([1, 1, 1])
            .build()
            .unwrap();
        let d = [1.0];
        let p = [4.0];
        let vx = [2.0];
        let z = [0.0];
        let mut i = input(&geom, &d, &p, [&vx, &z, &z]);
        i.pressure_free = true;
        let cell = find_limiting_cell(&i);
        assert!((cell.dt - 0.5).abs() < 1e-12);
        // The report still carries the thermal sound speed.
        assert_eq!(cell.sound_speed, 2.0);
    }

    #[test]
    fn threshold_boundary() {
        let hundred_years = DIAGNOSTIC_THRESHOLD_YEARS * YEAR_S;
        assert!(below_diagnostic_threshold(hundred_years * 0.99, 1.0, 1.0));
        assert!(!below_diagnostic_threshold(hundred_years * 1.01, 1.0, 1.0));
        assert!(!below_diagnostic_threshold(f64::INFINITY, 0.5, 1.0e10));
        assert!(below_diagnostic_threshold(1.0, 0.5, YEAR_S));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn threshold_matches_converted_years(
                dt in 1.0e-6f64..1.0e6,
                safety in 0.01f64..1.0,
                time_units in 1.0e3f64..1.0e15,
            ) {
                let years = dt * safety * time_units / YEAR_S;
                prop_assert_eq!(
                    below_diagnostic_threshold(dt, safety, time_units),
                    years < DIAGNOSTIC_THRESHOLD_YEARS
                );
            }

            #[test]
            fn limiting_cell_has_global_minimum(
                cells in prop::collection::vec((0.1f64..10.0, 0.1f64..10.0, -5.0f64..5.0), 8),
            ) {
                let geom = BlockGeometry::builder().rank(3).dims([2, 2, 2]).build().unwrap();
                let d: Vec<f64> = cells.iter().map(|c| c.0).collect();
                let p: Vec<f64> = cells.iter().map(|c| c.1).collect();
                let vx: Vec<f64> = cells.iter().map(|c| c.2).collect();
                let z = vec![0.0; 8];
                let cell = find_limiting_cell(&LimitingCellInput {
                    geometry: &geom,
                    gamma: 1.4,
                    pressure_free: false,
                    expansion_factor: 1.0,
                    density: &d,
                    pressure: &p,
                    velocity: [&vx, &z, &z],
                });
                let index = cell.index.unwrap();
                for n in 0..8 {
                    let cs = (1.4 * p[n] / d[n]).sqrt();
                    let dt = 1.0 / ((cs + vx[n].abs()) + 2.0 * cs);
                    prop_assert!(cell.dt <= dt * (1.0 + 1e-12));
                }
                prop_assert_eq!(cell.density, d[index]);
            }
        }
    }
}
