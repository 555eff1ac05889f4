//! Background cosmologies.

use courant_core::{KernelError, UNCONSTRAINED};
use courant_kernel::{Cosmology, Expansion};

/// A non-expanding background: `a = 1`, no expansion limit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StaticCosmology;

impl Cosmology for StaticCosmology {
    fn expansion_factor(&self, _time: f64) -> Result<Expansion, KernelError> {
        Ok(Expansion { a: 1.0, dadt: 0.0 })
    }

    fn expansion_timestep(&self, _time: f64) -> Result<f64, KernelError> {
        Ok(UNCONSTRAINED)
    }
}

/// Matter-dominated flat universe.
///
/// `a(t) = (t / t₀)^(2/3) / (1 + z₀)` in units where `a = 1` today, so
/// `da/dt = 2a / 3t`. The expansion timestep caps the fractional change
/// of `a` per step at `max_expansion_rate`.
///
/// ```
/// use courant_kernel::Cosmology;
/// use courant_kernels::EinsteinDeSitter;
///
/// let eds = EinsteinDeSitter::builder()
///     .initial_time(1.0)
///     .initial_redshift(99.0)
///     .build()
///     .unwrap();
/// let e = eds.expansion_factor(1.0).unwrap();
/// assert!((e.a - 0.01).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EinsteinDeSitter {
    initial_time: f64,
    initial_redshift: f64,
    max_expansion_rate: f64,
}

/// Builder for [`EinsteinDeSitter`].
///
/// Required: `initial_time`. Defaults: redshift 0, maximum expansion
/// rate 0.01.
#[derive(Clone, Copy, Debug)]
pub struct EinsteinDeSitterBuilder {
    initial_time: Option<f64>,
    initial_redshift: f64,
    max_expansion_rate: f64,
}

impl EinsteinDeSitter {
    /// Create a new builder.
    pub fn builder() -> EinsteinDeSitterBuilder {
        EinsteinDeSitterBuilder {
            initial_time: None,
            initial_redshift: 0.0,
            max_expansion_rate: 0.01,
        }
    }

    fn check_time(time: f64) -> Result<(), KernelError> {
        if time > 0.0 && time.is_finite() {
            Ok(())
        } else {
            Err(KernelError::ExecutionFailed {
                reason: format!("expansion undefined at time {time}"),
            })
        }
    }
}

impl EinsteinDeSitterBuilder {
    /// Code time at which the redshift equals `initial_redshift`.
    pub fn initial_time(mut self, time: f64) -> Self {
        self.initial_time = Some(time);
        self
    }

    /// Redshift at `initial_time`.
    pub fn initial_redshift(mut self, z: f64) -> Self {
        self.initial_redshift = z;
        self
    }

    /// Largest allowed `Δa / a` per step.
    pub fn max_expansion_rate(mut self, rate: f64) -> Self {
        self.max_expansion_rate = rate;
        self
    }

    /// Build the cosmology.
    ///
    /// # Errors
    ///
    /// Returns an error if `initial_time` is missing or not positive,
    /// `initial_redshift` is below 0, or `max_expansion_rate` is not
    /// positive. Non-finite values are rejected.
    pub fn build(self) -> Result<EinsteinDeSitter, String> {
        let initial_time = self
            .initial_time
            .ok_or_else(|| "initial_time is required".to_string())?;
        if !(initial_time > 0.0) || !initial_time.is_finite() {
            return Err(format!(
                "initial_time must be finite and > 0, got {initial_time}"
            ));
        }
        if !(self.initial_redshift >= 0.0) || !self.initial_redshift.is_finite() {
            return Err(format!(
                "initial_redshift must be finite and >= 0, got {}",
                self.initial_redshift
            ));
        }
        if !(self.max_expansion_rate > 0.0) || !self.max_expansion_rate.is_finite() {
            return Err(format!(
                "max_expansion_rate must be finite and > 0, got {}",
                self.max_expansion_rate
            ));
        }
        Ok(EinsteinDeSitter {
            initial_time,
            initial_redshift: self.initial_redshift,
            max_expansion_rate: self.max_expansion_rate,
        })
    }
}

impl Cosmology for EinsteinDeSitter {
    fn expansion_factor(&self, time: f64) -> Result<Expansion, KernelError> {
        Self::check_time(time)?;
        let a = (time / self.initial_time).powf(2.0 / 3.0) / (1.0 + self.initial_redshift);
        Ok(Expansion {
            a,
            dadt: 2.0 * a / (3.0 * time),
        })
    }

    fn expansion_timestep(&self, time: f64) -> Result<f64, KernelError> {
        let e = self.expansion_factor(time)?;
        Ok(self.max_expansion_rate * e.a / e.dadt)
    }
}
