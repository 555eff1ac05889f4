//! Physical constants and numerical sentinels shared by every constraint.

/// Value of a candidate timestep that no process has constrained.
///
/// Every per-process candidate starts here, so a minimum reduction over
/// candidates of disabled processes is always safe.
pub const UNCONSTRAINED: f64 = f64::INFINITY;

/// Floor used to keep divisions by near-zero speeds and accelerations finite.
pub const TINY_NUMBER: f64 = 1.0e-20;

/// Seconds per year.
pub const YEAR_S: f64 = 3.1557e7;

/// Centimetres per second in one kilometre per second.
pub const KM_PER_S: f64 = 1.0e5;

/// `hbar / m` in cgs for a boson of mass `1e-22 eV`.
///
/// Divided by the configured particle mass (in units of `1e-22 eV`) to
/// obtain the quantum-pressure diffusion coefficient.
pub const HBAR_OVER_M_FDM: f64 = 5.9157166856e27;

/// Physical duration (years) under which the classic hydro timestep
/// triggers the limiting-cell diagnostic.
pub const DIAGNOSTIC_THRESHOLD_YEARS: f64 = 100.0;
