//! Riemann-solver signal-speed scan.
//!
//! The hydro, MHD, and MHD-with-cosmic-rays limits share one scan over
//! every cell of the block, ghost zones included. They differ only in
//! the per-axis signal speed, selected by [`SignalSpeed`].

use courant_block::BlockState;
use courant_core::{Axis, FieldRole, TimestepError, UNCONSTRAINED};
use courant_kernel::EquationOfState;
use smallvec::SmallVec;

/// Per-cell signal-speed model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SignalSpeed {
    /// Sound speed plus flow speed.
    Hydro,
    /// Fast magnetosonic speed plus flow speed.
    Mhd,
    /// As [`SignalSpeed::Mhd`], with cosmic-ray pressure stiffening the
    /// sound speed.
    MhdCosmicRay {
        /// Adiabatic index of the cosmic-ray fluid.
        gamma_cr: f64,
    },
}

/// Where the scan takes the specific internal energy from.
#[derive(Clone, Copy)]
enum Energy<'a> {
    Internal(&'a [f64]),
    Total(&'a [f64]),
}

struct ScanFields<'a> {
    density: &'a [f64],
    energy: Energy<'a>,
    velocity: [Option<&'a [f64]>; 3],
    magnetic: Option<[&'a [f64]; 3]>,
    cosmic_ray: Option<&'a [f64]>,
}

impl SignalSpeed {
    fn is_magnetic(self) -> bool {
        !matches!(self, Self::Hydro)
    }

    fn fields<'a>(
        self,
        block: &BlockState<'a>,
        dual_energy: bool,
    ) -> Result<ScanFields<'a>, TimestepError> {
        let rank = block.geometry().rank();
        let density = block.require(FieldRole::Density)?;
        let energy = if dual_energy {
            Energy::Internal(block.require(FieldRole::InternalEnergy)?)
        } else {
            Energy::Total(block.require(FieldRole::TotalEnergy)?)
        };
        let mut velocity = [None; 3];
        for axis in Axis::ALL {
            let role = FieldRole::velocity(axis);
            velocity[axis.index()] = if axis.index() < rank {
                Some(block.require(role)?)
            } else {
                block.field(role)
            };
        }
        let magnetic = if self.is_magnetic() {
            Some([
                block.require(FieldRole::MagneticField1)?,
                block.require(FieldRole::MagneticField2)?,
                block.require(FieldRole::MagneticField3)?,
            ])
        } else {
            None
        };
        let cosmic_ray = match self {
            Self::MhdCosmicRay { .. } => Some(block.require(FieldRole::CosmicRayEnergy)?),
            _ => None,
        };
        Ok(ScanFields {
            density,
            energy,
            velocity,
            magnetic,
            cosmic_ray,
        })
    }

    /// Largest `signal / (Δ · a)` over every cell and active axis.
    ///
    /// Cells with `ρ ≤ 0` or a non-finite signal are skipped. Returns
    /// `None` if no cell contributes a positive rate.
    ///
    /// # Errors
    ///
    /// [`TimestepError::MissingField`] if the block lacks density, the
    /// energy field, an active-axis velocity, a magnetic component (MHD),
    /// or the cosmic-ray energy (MHD with cosmic rays).
    pub fn max_rate(
        self,
        block: &BlockState<'_>,
        eos: &dyn EquationOfState,
        dual_energy: bool,
        expansion_factor: f64,
    ) -> Result<Option<f64>, TimestepError> {
        let geom = block.geometry();
        let fields = self.fields(block, dual_energy)?;
        let inv_width: SmallVec<[(usize, f64); 3]> = Axis::active(geom.rank())
            .into_iter()
            .map(|axis| (axis.index(), 1.0 / (geom.cell_width(axis) * expansion_factor)))
            .collect();

        let mut max_rate = 0.0_f64;
        let mut contributed = false;
        for n in 0..geom.size() {
            let rho = fields.density[n];
            if !(rho > 0.0) {
                continue;
            }
            let v = fields.velocity.map(|f| f.map_or(0.0, |f| f[n]));
            let b = fields.magnetic.map_or([0.0; 3], |f| f.map(|f| f[n]));
            let b2 = b[0] * b[0] + b[1] * b[1] + b[2] * b[2];

            let eint = match fields.energy {
                Energy::Internal(e) => e[n],
                Energy::Total(e) => {
                    let kinetic = 0.5 * (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]);
                    let magnetic = if self.is_magnetic() { 0.5 * b2 / rho } else { 0.0 };
                    e[n] - kinetic - magnetic
                }
            };
            let cs = eos.evaluate(rho, eint).sound_speed;
            let mut cs2 = cs * cs;
            if let (Self::MhdCosmicRay { gamma_cr }, Some(ecr)) = (self, fields.cosmic_ray) {
                cs2 += gamma_cr * (gamma_cr - 1.0) * ecr[n] / rho;
            }
            let total = cs2 + b2 / rho;

            let mut cell_rate = 0.0_f64;
            for &(ax, inv) in &inv_width {
                let speed = match self {
                    Self::Hydro => cs + v[ax].abs(),
                    Self::Mhd | Self::MhdCosmicRay { .. } => {
                        let disc = (total * total - 4.0 * cs2 * b[ax] * b[ax] / rho).max(0.0);
                        (0.5 * (total + disc.sqrt())).sqrt() + v[ax].abs()
                    }
                };
                cell_rate = cell_rate.max(speed * inv);
            }
            if !cell_rate.is_finite() || !(cell_rate > 0.0) {
                continue;
            }
            if cell_rate > max_rate {
                max_rate = cell_rate;
            }
            contributed = true;
        }
        Ok(contributed.then_some(max_rate))
    }

    /// `safety / max_rate`, or [`UNCONSTRAINED`] if no cell contributes.
    ///
    /// # Errors
    ///
    /// As [`max_rate`](Self::max_rate).
    pub fn timestep(
        self,
        block: &BlockState<'_>,
        eos: &dyn EquationOfState,
        dual_energy: bool,
        expansion_factor: f64,
        safety: f64,
    ) -> Result<f64, TimestepError> {
        Ok(self
            .max_rate(block, eos, dual_energy, expansion_factor)?
            .map_or(UNCONSTRAINED, |rate| safety / rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courant_block::{BlockFields, BlockGeometry};
    use courant_kernel::EosState;

    /// Sound speed fixed at `c` for any state.
    struct FixedSound(f64);

    impl EquationOfState for FixedSound {
        fn evaluate(&self, density: f64, _internal_energy: f64) -> EosState {
            EosState {
                pressure: density * self.0 * self.0,
                enthalpy: 0.0,
                sound_speed: self.0,
                dp_drho: 0.0,
                dp_de: 0.0,
            }
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
    fn hydro_rate_is_max_over_cells_and_axes() {
        let geom = cube();
        let d = [1.0; 8];
        let e = [10.0; 8];
        let mut vy = [0.0; 8];
        vy[5] = -3.0;
        let z = [0.0; 8];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::Density, &d)
            .unwrap()
            .with(FieldRole::TotalEnergy, &e)
            .unwrap()
            .with(FieldRole::Velocity1, &z)
            .unwrap()
            .with(FieldRole::Velocity2, &vy)
            .unwrap()
            .with(FieldRole::Velocity3, &z)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        let rate = SignalSpeed::Hydro
            .max_rate(&block, &FixedSound(1.0), false, 2.0)
            .unwrap();
        // (1 + 3) / (1 * 2)
        assert_eq!(rate, Some(2.0));
    }

    #[test]
    fn zero_density_cell_is_ignored() {
        let geom = cube();
        let mut d = [1.0; 8];
        d[3] = 0.0;
        let e = [10.0; 8];
        let mut vx = [0.0; 8];
        vx[3] = 1.0e30;
        let z = [0.0; 8];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::Density, &d)
            .unwrap()
            .with(FieldRole::TotalEnergy, &e)
            .unwrap()
            .with(FieldRole::Velocity1, &vx)
            .unwrap()
            .with(FieldRole::Velocity2, &z)
            .unwrap()
            .with(FieldRole::Velocity3, &z)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        let rate = SignalSpeed::Hydro
            .max_rate(&block, &FixedSound(2.0), false, 1.0)
            .unwrap();
        assert_eq!(rate, Some(2.0));
    }

    #[test]
    fn static_cold_block_does_not_contribute() {
        let geom = cube();
        let d = [1.0; 8];
        let e = [0.0; 8];
        let z = [0.0; 8];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::Density, &d)
            .unwrap()
            .with(FieldRole::InternalEnergy, &e)
            .unwrap()
            .with(FieldRole::Velocity1, &z)
            .unwrap()
            .with(FieldRole::Velocity2, &z)
            .unwrap()
            .with(FieldRole::Velocity3, &z)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        let dt = SignalSpeed::Hydro
            .timestep(&block, &FixedSound(0.0), true, 1.0, 0.5)
            .unwrap();
        assert_eq!(dt, UNCONSTRAINED);
    }

    #[test]
    fn mhd_transverse_field_adds_alfven_speed() {
        let geom = BlockGeometry::builder()
            .rank(1)
            .dims([2, 1, 1])
            .build()
            .unwrap();
        let d = [1.0; 2];
        let e = [0.0; 2];
        let z = [0.0; 2];
        let by = [3.0; 2];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::Density, &d)
            .unwrap()
            .with(FieldRole::InternalEnergy, &e)
            .unwrap()
            .with(FieldRole::Velocity1, &z)
            .unwrap()
            .with(FieldRole::MagneticField1, &z)
            .unwrap()
            .with(FieldRole::MagneticField2, &by)
            .unwrap()
            .with(FieldRole::MagneticField3, &z)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        let rate = SignalSpeed::Mhd
            .max_rate(&block, &FixedSound(4.0), true, 1.0)
            .unwrap()
            .unwrap();
        // cf² = cs² + B²/ρ = 16 + 9
        assert!((rate - 5.0).abs() < 1e-12);
    }

    #[test]
    fn cosmic_rays_stiffen_sound_speed() {
        let geom = BlockGeometry::builder()
            .rank(1)
            .dims([1, 1, 1])
            .build()
            .unwrap();
        let d = [1.0];
        let e = [0.0];
        let z = [0.0];
        let ecr = [3.0];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::Density, &d)
            .unwrap()
            .with(FieldRole::InternalEnergy, &e)
            .unwrap()
            .with(FieldRole::Velocity1, &z)
            .unwrap()
            .with(FieldRole::MagneticField1, &z)
            .unwrap()
            .with(FieldRole::MagneticField2, &z)
            .unwrap()
            .with(FieldRole::MagneticField3, &z)
            .unwrap()
            .with(FieldRole::CosmicRayEnergy, &ecr)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        let rate = SignalSpeed::MhdCosmicRay { gamma_cr: 2.0 }
            .max_rate(&block, &FixedSound(1.0), true, 1.0)
            .unwrap()
            .unwrap();
        // cs² = 1 + 2 * 1 * 3 = 7
        assert!((rate - 7.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn missing_cosmic_ray_field_is_fatal() {
        let geom = BlockGeometry::builder()
            .rank(1)
            .dims([1, 1, 1])
            .build()
            .unwrap();
        let one = [1.0];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::Density, &one)
            .unwrap()
            .with(FieldRole::TotalEnergy, &one)
            .unwrap()
            .with(FieldRole::Velocity1, &one)
            .unwrap()
            .with(FieldRole::MagneticField1, &one)
            .unwrap()
            .with(FieldRole::MagneticField2, &one)
            .unwrap()
            .with(FieldRole::MagneticField3, &one)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        let err = SignalSpeed::MhdCosmicRay { gamma_cr: 4.0 / 3.0 }
            .max_rate(&block, &FixedSound(1.0), false, 1.0)
            .unwrap_err();
        assert_eq!(
            err,
            TimestepError::MissingField {
                role: FieldRole::CosmicRayEnergy
            }
        );
    }

    #[test]
    fn inactive_axes_contribute_nothing() {
        let geom = BlockGeometry::builder()
            .rank(1)
            .dims([3, 1, 1])
            .cell_widths([0.5, 1.0, 1.0])
            .build()
            .unwrap();
        let d = [1.0; 3];
        let e = [1.0; 3];
        let vx = [1.0; 3];
        let huge = [1.0e300; 3];
        let nan = [f64::NAN; 3];
        let bx = [0.0; 3];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::Density, &d)
            .unwrap()
            .with(FieldRole::InternalEnergy, &e)
            .unwrap()
            .with(FieldRole::Velocity1, &vx)
            .unwrap()
            .with(FieldRole::Velocity2, &huge)
            .unwrap()
            .with(FieldRole::Velocity3, &nan)
            .unwrap()
            .with(FieldRole::MagneticField1, &bx)
            .unwrap()
            .with(FieldRole::MagneticField2, &bx)
            .unwrap()
            .with(FieldRole::MagneticField3, &bx)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        for signal in [SignalSpeed::Hydro, SignalSpeed::Mhd] {
            let rate = signal
                .max_rate(&block, &FixedSound(1.0), true, 1.0)
                .unwrap()
                .unwrap();
            assert!(rate.is_finite());
            // (1 + 1) / 0.5
            assert!((rate - 4.0).abs() < 1e-12, "{signal:?}: {rate}");
        }
    }
}
