//! Field roles and spatial axes.

use smallvec::SmallVec;
use std::fmt;

/// The physical quantity a block field buffer holds.
///
/// A [`FieldLocator`](crate::FieldLocator) maps each role to the buffer
/// storing it for the current block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldRole {
    /// Mass density.
    Density,
    /// Specific total energy (kinetic + internal [+ magnetic]).
    TotalEnergy,
    /// Specific internal energy, tracked separately under dual energy.
    InternalEnergy,
    /// Velocity along the first axis.
    Velocity1,
    /// Velocity along the second axis.
    Velocity2,
    /// Velocity along the third axis.
    Velocity3,
    /// Cell-centred magnetic field, first component.
    MagneticField1,
    /// Cell-centred magnetic field, second component.
    MagneticField2,
    /// Cell-centred magnetic field, third component.
    MagneticField3,
    /// Cosmic-ray energy density.
    CosmicRayEnergy,
    /// Radiation-pressure acceleration, first component.
    RadiationPressure1,
    /// Radiation-pressure acceleration, second component.
    RadiationPressure2,
    /// Radiation-pressure acceleration, third component.
    RadiationPressure3,
}

impl FieldRole {
    /// Velocity role for the given axis.
    pub fn velocity(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::Velocity1,
            Axis::Y => Self::Velocity2,
            Axis::Z => Self::Velocity3,
        }
    }

    /// Magnetic-field role for the given axis.
    pub fn magnetic(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::MagneticField1,
            Axis::Y => Self::MagneticField2,
            Axis::Z => Self::MagneticField3,
        }
    }

    /// Radiation-pressure role for the given axis.
    pub fn radiation_pressure(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::RadiationPressure1,
            Axis::Y => Self::RadiationPressure2,
            Axis::Z => Self::RadiationPressure3,
        }
    }

    /// Short lowercase name used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Density => "density",
            Self::TotalEnergy => "total_energy",
            Self::InternalEnergy => "internal_energy",
            Self::Velocity1 => "velocity1",
            Self::Velocity2 => "velocity2",
            Self::Velocity3 => "velocity3",
            Self::MagneticField1 => "magnetic_field1",
            Self::MagneticField2 => "magnetic_field2",
            Self::MagneticField3 => "magnetic_field3",
            Self::CosmicRayEnergy => "cosmic_ray_energy",
            Self::RadiationPressure1 => "radiation_pressure1",
            Self::RadiationPressure2 => "radiation_pressure2",
            Self::RadiationPressure3 => "radiation_pressure3",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three spatial axes of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// First (fastest-varying) axis.
    X,
    /// Second axis.
    Y,
    /// Third (slowest-varying) axis.
    Z,
}

impl Axis {
    /// All three axes in storage order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Zero-based index of this axis.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Axis with the given index, or `None` if `index >= 3`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The axes a block of the given rank actually resolves.
    ///
    /// Ranks above 3 are clamped to 3.
    pub fn active(rank: usize) -> SmallVec<[Axis; 3]> {
        Self::ALL.iter().take(rank.min(3)).copied().collect()
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}
