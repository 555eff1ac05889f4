//! Ideal-gas pressure from the block's energy fields.

use courant_block::BlockState;
use courant_core::{Axis, FieldRole, KernelError, TINY_NUMBER};
use courant_kernel::PressureSolver;

/// Ideal-gas pressure evaluator.
///
/// The specific internal energy comes from the dual-energy field when
/// `dual_energy` is set, otherwise from the total energy minus the
/// kinetic term (and the magnetic term when `magnetic` is set).
/// Pressure is floored at [`TINY_NUMBER`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdealGasPressure {
    gamma: f64,
    dual_energy: bool,
    magnetic: bool,
}

fn missing(role: FieldRole) -> KernelError {
    KernelError::Unavailable {
        reason: format!("pressure needs the {role} field"),
    }
}

impl IdealGasPressure {
    /// Pressure from total energy, hydrodynamics only.
    ///
    /// # Errors
    ///
    /// Returns an error if `gamma` is not finite or not greater than 1.
    pub fn new(gamma: f64) -> Result<Self, String> {
        if !gamma.is_finite() || gamma <= 1.0 {
            return Err(format!("gamma must be finite and > 1, got {gamma}"));
        }
        Ok(Self {
            gamma,
            dual_energy: false,
            magnetic: false,
        })
    }

    /// Read the internal energy from the dual-energy field.
    pub fn with_dual_energy(mut self, enabled: bool) -> Self {
        self.dual_energy = enabled;
        self
    }

    /// Subtract magnetic energy from the total energy.
    pub fn with_magnetic(mut self, enabled: bool) -> Self {
        self.magnetic = enabled;
        self
    }
}

impl PressureSolver for IdealGasPressure {
    fn compute_pressure(&self, block: &BlockState<'_>, out: &mut [f64]) -> Result<(), KernelError> {
        let size = block.geometry().size();
        if out.len() != size {
            return Err(KernelError::Unavailable {
                reason: format!("pressure buffer holds {} cells, block has {size}", out.len()),
            });
        }
        let density = block
            .field(FieldRole::Density)
            .ok_or_else(|| missing(FieldRole::Density))?;
        let gm1 = self.gamma - 1.0;

        if self.dual_energy {
            let eint = block
                .field(FieldRole::InternalEnergy)
                .ok_or_else(|| missing(FieldRole::InternalEnergy))?;
            for (p, (&d, &e)) in out.iter_mut().zip(density.iter().zip(eint)) {
                *p = (gm1 * d * e).max(TINY_NUMBER);
            }
            return Ok(());
        }

        let total = block
            .field(FieldRole::TotalEnergy)
            .ok_or_else(|| missing(FieldRole::TotalEnergy))?;
        let velocity = Axis::ALL.map(|axis| block.field(FieldRole::velocity(axis)));
        let magnetic = if self.magnetic {
            let mut b = [None; 3];
            for axis in Axis::ALL {
                let role = FieldRole::magnetic(axis);
                b[axis.index()] = Some(block.field(role).ok_or_else(|| missing(role))?);
            }
            b
        } else {
            [None; 3]
        };

        for (n, p) in out.iter_mut().enumerate() {
            let d = density[n];
            let kinetic: f64 = velocity
                .iter()
                .flatten()
                .map(|v| 0.5 * v[n] * v[n])
                .sum();
            let mut eint = total[n] - kinetic;
            if d > 0.0 {
                let b2: f64 = magnetic.iter().flatten().map(|b| b[n] * b[n]).sum();
                eint -= 0.5 * b2 / d;
            }
            *p = (gm1 * d * eint).max(TINY_NUMBER);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courant_block::{BlockFields, BlockGeometry};

    fn line() -> BlockGeometry {
        BlockGeometry::builder()
            .rank(1)
            .dims([4, 1, 1])
            .build()
            .unwrap()
    }

    #[test]
    fn total_minus_kinetic() {
        let geom = line();
        let d = [1.0, 2.0, 1.0, 0.0];
        let e = [3.0, 3.0, 0.5, 1.0];
        let v = [2.0, 0.0, 2.0, 0.0];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::Density, &d)
            .unwrap()
            .with(FieldRole::TotalEnergy, &e)
            .unwrap()
            .with(FieldRole::Velocity1, &v)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        let mut p = [0.0; 4];
        IdealGasPressure::new(1.5)
            .unwrap()
            .compute_pressure(&block, &mut p)
            .unwrap();
        // (γ-1) ρ (E - v²/2) = 0.5 * 1 * 1
        assert!((p[0] - 0.5).abs() < 1e-12);
        assert!((p[1] - 3.0).abs() < 1e-12);
        // Negative internal energy floors to tiny.
        assert_eq!(p[2], TINY_NUMBER);
        assert_eq!(p[3], TINY_NUMBER);
    }

    #[test]
    fn dual_energy_uses_internal_field() {
        let geom = line();
        let d = [1.0; 4];
        let ge = [2.0; 4];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::Density, &d)
            .unwrap()
            .with(FieldRole::InternalEnergy, &ge)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        let mut p = [0.0; 4];
        IdealGasPressure::new(1.4)
            .unwrap()
            .with_dual_energy(true)
            .compute_pressure(&block, &mut p)
            .unwrap();
        assert!(p.iter().all(|&x| (x - 0.8).abs() < 1e-12));
    }

    #[test]
    fn magnetic_energy_is_removed() {
        let geom = line();
        let d = [2.0; 4];
        let e = [3.0; 4];
        let b = [2.0; 4];
        let zero = [0.0; 4];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::Density, &d)
            .unwrap()
            .with(FieldRole::TotalEnergy, &e)
            .unwrap()
            .with(FieldRole::MagneticField1, &b)
            .unwrap()
            .with(FieldRole::MagneticField2, &zero)
            .unwrap()
            .with(FieldRole::MagneticField3, &zero)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        let mut p = [0.0; 4];
        IdealGasPressure::new(2.0)
            .unwrap()
            .with_magnetic(true)
            .compute_pressure(&block, &mut p)
            .unwrap();
        // e = 3 - 0.5 * 4 / 2 = 2, p = 1 * 2 * 2
        assert!((p[0] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn missing_energy_is_unavailable() {
        let geom = line();
        let d = [1.0; 4];
        let fields = BlockFields::new(&geom)
            .with(FieldRole::Density, &d)
            .unwrap();
        let block = BlockState::new(&geom, &fields, 0.0);
        let mut p = [0.0; 4];
        let err = IdealGasPressure::new(1.4)
            .unwrap()
            .compute_pressure(&block, &mut p)
            .unwrap_err();
        assert!(matches!(err, KernelError::Unavailable { .. }));
    }

    #[test]
    fn wrong_buffer_length_is_rejected() {
        let geom = line();
        let fields = BlockFields::new(&geom);
        let block = BlockState::new(&geom, &fields, 0.0);
        let mut p = [0.0; 3];
        assert!(IdealGasPressure::new(1.4)
            .unwrap()
            .compute_pressure(&block, &mut p)
            .is_err());
    }
}
