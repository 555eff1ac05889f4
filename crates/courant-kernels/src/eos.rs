//! Analytic equations of state.

use courant_kernel::{EosState, EquationOfState};

/// Ideal gas with a constant adiabatic index.
///
/// `p = (γ − 1) ρ e`, `cs = sqrt(γ p / ρ)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdealGas {
    gamma: f64,
}

impl IdealGas {
    /// Create an ideal gas.
    ///
    /// # Errors
    ///
    /// Returns an error if `gamma` is not finite or not greater than 1.
    pub fn new(gamma: f64) -> Result<Self, String> {
        if !gamma.is_finite() || gamma <= 1.0 {
            return Err(format!("gamma must be finite and > 1, got {gamma}"));
        }
        Ok(Self { gamma })
    }

    /// Adiabatic index.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl EquationOfState for IdealGas {
    fn evaluate(&self, density: f64, internal_energy: f64) -> EosState {
        let gm1 = self.gamma - 1.0;
        let pressure = gm1 * density * internal_energy;
        let sound_speed = if density > 0.0 && pressure > 0.0 {
            (self.gamma * pressure / density).sqrt()
        } else {
            0.0
        };
        let enthalpy = if density > 0.0 {
            internal_energy + pressure / density
        } else {
            internal_energy
        };
        EosState {
            pressure,
            enthalpy,
            sound_speed,
            dp_drho: gm1 * internal_energy,
            dp_de: gm1 * density,
        }
    }
}

/// Isothermal gas with a fixed sound speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Isothermal {
    sound_speed: f64,
}

impl Isothermal {
    /// Create an isothermal gas.
    ///
    /// # Errors
    ///
    /// Returns an error if `sound_speed` is negative or not finite.
    pub fn new(sound_speed: f64) -> Result<Self, String> {
        if !(sound_speed >= 0.0) || !sound_speed.is_finite() {
            return Err(format!(
                "sound_speed must be finite and >= 0, got {sound_speed}"
            ));
        }
        Ok(Self { sound_speed })
    }
}

impl EquationOfState for Isothermal {
    fn evaluate(&self, density: f64, internal_energy: f64) -> EosState {
        let c2 = self.sound_speed * self.sound_speed;
        EosState {
            pressure: density * c2,
            enthalpy: internal_energy + c2,
            sound_speed: self.sound_speed,
            dp_drho: c2,
            dp_de: 0.0,
        }
    }
}
