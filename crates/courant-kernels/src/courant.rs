//! Finite-difference Courant kernel.

use courant_core::{Axis, KernelError, TINY_NUMBER, UNCONSTRAINED};
use courant_kernel::{CourantKernel, CourantStep, HydroMethod, HydroView};

/// Courant kernel for the PPM and Zeus solvers.
///
/// Per active cell the Courant step is
///
/// ```text
/// dt = a / Σ_axes (cs + |v − v_grid|) / Δ
/// ```
///
/// with `cs = sqrt(γ p / ρ)`, or a vanishing sound speed for
/// pressure-free flow. Cells with `ρ ≤ 0` or `p ≤ 0` are skipped. For
/// [`HydroMethod::Zeus`] a quadratic artificial-viscosity limit
/// `a Δ / (4 C₂ |Δv|)` is evaluated on every compressing face.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FiniteDifferenceCourant;

impl FiniteDifferenceCourant {
    /// Create the kernel.
    pub fn new() -> Self {
        Self
    }
}

fn check_len(name: &'static str, data: &[f64], size: usize) -> Result<(), KernelError> {
    if data.len() == size {
        Ok(())
    } else {
        Err(KernelError::Unavailable {
            reason: format!("{name} holds {} cells, block has {size}", data.len()),
        })
    }
}

impl CourantKernel for FiniteDifferenceCourant {
    fn courant_timestep(&self, view: &HydroView<'_>) -> Result<CourantStep, KernelError> {
        let geom = view.geometry;
        let size = geom.size();
        check_len("density", view.density, size)?;
        check_len("pressure", view.pressure, size)?;
        for v in view.velocity {
            check_len("velocity", v, size)?;
        }

        let axes = Axis::active(geom.rank());
        let dims = geom.dims();
        let stride = [1, dims[0], dims[0] * dims[1]];
        let a = view.expansion_factor;
        let zeus = view.method == HydroMethod::Zeus && view.viscosity > 0.0;

        let mut dt = UNCONSTRAINED;
        let mut dt_viscous = UNCONSTRAINED;

        for (ijk, n) in geom.active_cells() {
            let d = view.density[n];
            let p = view.pressure[n];
            if d <= 0.0 || p <= 0.0 {
                continue;
            }
            let cs = if view.pressure_free {
                TINY_NUMBER
            } else {
                (view.gamma * p / d).sqrt()
            };

            let mut rate = 0.0;
            for &axis in &axes {
                let ax = axis.index();
                let width = geom.cell_width(axis);
                let v = view.velocity[ax][n] - geom.grid_velocity(axis);
                rate += (cs + v.abs()) / width;

                if zeus && ijk[ax] + 1 < dims[ax] {
                    let dv = view.velocity[ax][n + stride[ax]] - view.velocity[ax][n];
                    if dv < 0.0 {
                        dt_viscous = dt_viscous.min(a * width / (4.0 * view.viscosity * -dv));
                    }
                }
            }
            if rate > TINY_NUMBER && rate.is_finite() {
                dt = dt.min(a / rate);
            }
        }

        if dt.is_nan() {
            return Err(KernelError::NonFinite {
                quantity: "courant timestep",
                value: dt,
            });
        }
        Ok(CourantStep { dt, dt_viscous })
    }
}
