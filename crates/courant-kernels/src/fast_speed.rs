//! Fast-magnetosonic timestep for finite-difference MHD.

use courant_core::{Axis, KernelError, UNCONSTRAINED};
use courant_kernel::{FastSpeedKernel, MhdView};

/// Fast-magnetosonic signal-speed kernel.
///
/// For each active cell and axis the fast speed along that axis is
///
/// ```text
/// cf² = ½ (cs² + B²/ρ + sqrt((cs² + B²/ρ)² − 4 cs² B_axis² / ρ))
/// ```
///
/// and the cell limits the step to `Δ / (cf + |v_axis|)`. Cells with
/// `ρ ≤ 0` or `p ≤ 0` are skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FastMagnetosonic;

impl FastMagnetosonic {
    /// Create the kernel.
    pub fn new() -> Self {
        Self
    }
}

impl FastSpeedKernel for FastMagnetosonic {
    fn fast_speed_timestep(&self, view: &MhdView<'_>) -> Result<f64, KernelError> {
        let geom = view.geometry;
        let size = geom.size();
        let buffers = [view.density, view.pressure]
            .into_iter()
            .chain(view.velocity)
            .chain(view.magnetic);
        for buf in buffers {
            if buf.len() != size {
                return Err(KernelError::Unavailable {
                    reason: format!("MHD buffer holds {} cells, block has {size}", buf.len()),
                });
            }
        }

        let axes = Axis::active(geom.rank());
        let mut dt = UNCONSTRAINED;
        for (_, n) in geom.active_cells() {
            let d = view.density[n];
            let p = view.pressure[n];
            if d <= 0.0 || p <= 0.0 {
                continue;
            }
            let cs2 = view.gamma * p / d;
            let b = view.magnetic.map(|field| field[n]);
            let va2 = (b[0] * b[0] + b[1] * b[1] + b[2] * b[2]) / d;
            let sum = cs2 + va2;
            for &axis in &axes {
                let ax = axis.index();
                let disc = (sum * sum - 4.0 * cs2 * b[ax] * b[ax] / d).max(0.0);
                let cf = (0.5 * (sum + disc.sqrt())).sqrt();
                let speed = cf + view.velocity[ax][n].abs();
                if speed > 0.0 {
                    dt = dt.min(geom.cell_width(axis) / speed);
                }
            }
        }
        if dt.is_nan() {
            return Err(KernelError::NonFinite {
                quantity: "fast-speed timestep",
                value: dt,
            });
        }
        Ok(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courant_block::BlockGeometry;

    fn cube() -> BlockGeometry {
        BlockGeometry::builder()
            .rank(3)
            .dims([2, 2, 2])
            .cell_widths([1.0, 0.5, 2.0])
            .build()
            .unwrap()
    }

    #[test]
    fn unmagnetised_reduces_to_sound_speed() {
        let geom = cube();
        let d = [1.0; 8];
        let p = [1.0; 8];
        let z = [0.0; 8];
        let view = MhdView {
            geometry: &geom,
            gamma: 4.0,
            density: &d,
            pressure: &p,
            velocity: [&z, &z, &z],
            magnetic: [&z, &z, &z],
            total_energy: None,
        };
        // cs = 2, narrowest width 0.5
        let dt = FastMagnetosonic::new().fast_speed_timestep(&view).unwrap();
        assert!((dt - 0.25).abs() < 1e-12);
    }

    #[test]
    fn transverse_field_raises_signal_speed() {
        let geom = cube();
        let d = [1.0; 8];
        let p = [1.0; 8];
        let z = [0.0; 8];
        let bx = [3.0; 8];
        let view = MhdView {
            geometry: &geom,
            gamma: 1.0,
            density: &d,
            pressure: &p,
            velocity: [&z, &z, &z],
            magnetic: [&bx, &z, &z],
            total_energy: None,
        };
        // Along y the field is transverse: cf² = cs² + vA² = 10.
        let dt = FastMagnetosonic::new().fast_speed_timestep(&view).unwrap();
        assert!((dt - 0.5 / 10.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_block_is_unconstrained() {
        let geom = cube();
        let d = [0.0; 8];
        let p = [1.0; 8];
        let z = [0.0; 8];
        let view = MhdView {
            geometry: &geom,
            gamma: 1.4,
            density: &d,
            pressure: &p,
            velocity: [&z, &z, &z],
            magnetic: [&z, &z, &z],
            total_energy: None,
        };
        assert_eq!(
            FastMagnetosonic::new().fast_speed_timestep(&view).unwrap(),
            UNCONSTRAINED
        );
    }
}
