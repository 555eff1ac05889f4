//! Courant: adaptive timestep resolution for structured-mesh hydrodynamics.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Courant sub-crates. For most users, adding `courant` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use courant::prelude::*;
//! use courant::kernels::{CodeUnits, FiniteDifferenceCourant, IdealGasPressure};
//!
//! // A 16-cell tube of gas at rest with unit pressure.
//! let geom = BlockGeometry::builder()
//!     .rank(1)
//!     .dims([16, 1, 1])
//!     .cell_widths([0.5, 1.0, 1.0])
//!     .build()
//!     .unwrap();
//! let density = vec![1.0; 16];
//! let energy = vec![1.5; 16];
//! let velocity = vec![0.0; 16];
//! let fields = BlockFields::new(&geom)
//!     .with(FieldRole::Density, &density).unwrap()
//!     .with(FieldRole::TotalEnergy, &energy).unwrap()
//!     .with(FieldRole::Velocity1, &velocity).unwrap();
//! let block = BlockState::new(&geom, &fields, 0.0);
//!
//! let units = CodeUnits::cgs();
//! let pressure = IdealGasPressure::new(5.0 / 3.0).unwrap();
//! let courant = FiniteDifferenceCourant::new();
//! let kernels = Kernels::new()
//!     .with_units(&units)
//!     .with_pressure(&pressure)
//!     .with_courant(&courant);
//!
//! let aggregator = TimestepAggregator::new(TimestepConfig::default(), kernels).unwrap();
//! let report = aggregator.compute(&block).unwrap();
//! let cs = (5.0_f64 / 3.0).sqrt();
//! assert!((report.dt - 0.6 * 0.5 / cs).abs() < 1e-12);
//! assert_eq!(report.limiter, Some(Process::Baryons));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `courant-core` | Field roles, axes, constants, errors, locator traits |
//! | [`block`] | `courant-block` | Block geometry, field views, particles |
//! | [`kernel`] | `courant-kernel` | Collaborator capability traits |
//! | [`kernels`] | `courant-kernels` | Reference collaborator implementations |
//! | [`engine`] | `courant-engine` | The aggregator and the limiting-cell finder |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and constants (`courant-core`).
///
/// Contains [`types::FieldRole`], [`types::Axis`], the error types, and
/// the locator traits [`types::FieldLocator`] and
/// [`types::ParticleStore`].
pub use courant_core as types;

/// Block geometry and borrowed field views (`courant-block`).
pub use courant_block as block;

/// Collaborator capability traits (`courant-kernel`).
///
/// Implement these to plug a production EOS, flux solver, cosmology, or
/// source-term model into the aggregator.
pub use courant_kernel as kernel;

/// Reference collaborator implementations (`courant-kernels`).
pub use courant_kernels as kernels;

/// Timestep aggregation (`courant-engine`).
///
/// [`engine::TimestepAggregator`] for the per-block minimum,
/// [`engine::find_limiting_cell`] for the diagnostic.
pub use courant_engine as engine;

/// Common imports for typical Courant usage.
///
/// ```rust
/// use courant::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use courant_core::{
        Axis, FieldLocator, FieldRole, ParticleStore, TINY_NUMBER, UNCONSTRAINED,
    };

    // Errors
    pub use courant_core::{KernelError, TimestepError};
    pub use courant_engine::ConfigError;

    // Block
    pub use courant_block::{BlockFields, BlockGeometry, BlockState, ParticleList};

    // Kernels
    pub use courant_kernel::{HydroMethod, Kernels, Units};

    // Engine
    pub use courant_engine::{
        Candidates, LimitingCell, Process, TimestepAggregator, TimestepConfig, TimestepReport,
    };
}
