//! Equation-of-state capability.

/// Thermodynamic state of one cell as returned by an [`EquationOfState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EosState {
    /// Gas pressure.
    pub pressure: f64,
    /// Specific enthalpy.
    pub enthalpy: f64,
    /// Adiabatic sound speed.
    pub sound_speed: f64,
    /// `∂p/∂ρ` at constant specific internal energy.
    pub dp_drho: f64,
    /// `∂p/∂e` at constant density.
    pub dp_de: f64,
}

/// Maps density and specific internal energy to pressure and sound speed.
///
/// Evaluated once per cell by the Riemann-solver scans; must be pure.
pub trait EquationOfState: Send + Sync {
    /// Evaluate the EOS for one cell.
    fn evaluate(&self, density: f64, internal_energy: f64) -> EosState;
}
