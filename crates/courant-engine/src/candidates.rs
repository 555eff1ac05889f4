//! Per-process candidate timesteps.

use courant_core::UNCONSTRAINED;
use std::fmt;

/// A physical process that can limit the timestep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Process {
    /// Hydrodynamic Courant limit.
    Baryons,
    /// Artificial-viscosity limit from the Courant kernel.
    Viscous,
    /// MHD fast-magnetosonic limit.
    Mhd,
    /// Particle velocities.
    Particles,
    /// Cosmological expansion.
    Expansion,
    /// Gravitational acceleration.
    Acceleration,
    /// Thermal conduction.
    Conduction,
    /// Cosmic-ray transport.
    CosmicRays,
    /// Gas drag.
    GasDrag,
    /// Radiative cooling.
    Cooling,
    /// Fuzzy-dark-matter quantum pressure.
    Quantum,
    /// Radiation-pressure acceleration.
    RadiationPressure,
    /// Hard safety-velocity cap.
    SafetyVelocity,
    /// Flux-limited-diffusion maximum step.
    RadiationTransfer,
    /// One-zone free-fall time.
    FreeFall,
}

impl Process {
    /// Number of processes.
    pub const COUNT: usize = 15;

    /// Every process in reduction order.
    pub const ALL: [Process; Self::COUNT] = [
        Process::Baryons,
        Process::Viscous,
        Process::Mhd,
        Process::Particles,
        Process::Expansion,
        Process::Acceleration,
        Process::Conduction,
        Process::CosmicRays,
        Process::GasDrag,
        Process::Cooling,
        Process::Quantum,
        Process::RadiationPressure,
        Process::SafetyVelocity,
        Process::RadiationTransfer,
        Process::FreeFall,
    ];

    fn slot(self) -> usize {
        self as usize
    }

    /// Short label used in log output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Baryons => "baryons",
            Self::Viscous => "viscous",
            Self::Mhd => "mhd",
            Self::Particles => "particles",
            Self::Expansion => "expansion",
            Self::Acceleration => "acceleration",
            Self::Conduction => "conduction",
            Self::CosmicRays => "cosmic_rays",
            Self::GasDrag => "gas_drag",
            Self::Cooling => "cooling",
            Self::Quantum => "quantum",
            Self::RadiationPressure => "radiation_pressure",
            Self::SafetyVelocity => "safety_velocity",
            Self::RadiationTransfer => "radiation_transfer",
            Self::FreeFall => "free_fall",
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One candidate timestep per process, each already multiplied by its
/// own safety factor.
///
/// Every slot starts at [`UNCONSTRAINED`] and is only written when its
/// process is enabled, so the minimum over all slots is always safe.
///
/// ```
/// use courant_engine::{Candidates, Process};
///
/// let mut c = Candidates::new();
/// assert_eq!(c.min(), f64::INFINITY);
/// c.set(Process::Cooling, 2.0);
/// c.set(Process::Particles, 0.5);
/// assert_eq!(c.min(), 0.5);
/// assert_eq!(c.limiter(), Some(Process::Particles));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidates {
    values: [f64; Process::COUNT],
}

impl Default for Candidates {
    fn default() -> Self {
        Self {
            values: [UNCONSTRAINED; Process::COUNT],
        }
    }
}

impl Candidates {
    /// All candidates unconstrained.
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidate for `process`.
    pub fn get(&self, process: Process) -> f64 {
        self.values[process.slot()]
    }

    /// Store the candidate for `process`.
    pub fn set(&mut self, process: Process, dt: f64) {
        self.values[process.slot()] = dt;
    }

    /// Smallest candidate; [`UNCONSTRAINED`] if none was set.
    ///
    /// NaN candidates are ignored.
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(UNCONSTRAINED, f64::min)
    }

    /// The first process (in reduction order) whose candidate equals the
    /// minimum, or `None` if every candidate is unconstrained.
    pub fn limiter(&self) -> Option<Process> {
        let min = self.min();
        if min == UNCONSTRAINED {
            return None;
        }
        Process::ALL.into_iter().find(|&p| self.get(p) == min)
    }

    /// Candidates that are not [`UNCONSTRAINED`], in reduction order.
    pub fn constrained(&self) -> impl Iterator<Item = (Process, f64)> + '_ {
        Process::ALL
            .into_iter()
            .map(|p| (p, self.get(p)))
            .filter(|&(_, dt)| dt != UNCONSTRAINED)
    }
}

impl fmt::Display for Candidates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (process, dt) in self.constrained() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{process}={dt:e}")?;
            first = false;
        }
        if first {
            f.write_str("unconstrained")?;
        }
        Ok(())
    }
}
