//! Adaptive timestep resolution for one block of a structured mesh.
//!
//! The [`TimestepAggregator`] asks every enabled physical process for
//! the largest stable step it allows on a block, scales each by its own
//! safety factor, and returns the minimum together with the full
//! per-process breakdown. When the hydrodynamic step is implausibly
//! short, [`find_limiting_cell`] names the cell responsible.
//!
//! # Example
//!
//! ```
//! use courant_block::{BlockFields, BlockGeometry, BlockState};
//! use courant_core::FieldRole;
//! use courant_engine::{Process, TimestepAggregator, TimestepConfig};
//! use courant_kernel::Kernels;
//! use courant_kernels::{CodeUnits, FiniteDifferenceCourant, IdealGasPressure};
//!
//! let geom = BlockGeometry::builder().rank(1).dims([8, 1, 1]).build().unwrap();
//! let density = [1.0; 8];
//! let energy = [1.5; 8];
//! let velocity = [0.0; 8];
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
//! assert!(report.dt > 0.0 && report.dt.is_finite());
//! assert_eq!(report.limiter, Some(Process::Baryons));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregator;
pub mod candidates;
pub mod config;
pub mod constraints;
pub mod limiting;
pub mod signal;

pub use aggregator::{TimestepAggregator, TimestepReport};
pub use candidates::{Candidates, Process};
#[cfg(feature = "transfer")]
pub use config::RadiationConfig;
pub use config::{
    ConfigError, CosmicRayCombine, CosmicRayConfig, CrDiffusion, FreeFallConfig, TimestepConfig,
};
pub use limiting::{below_diagnostic_threshold, find_limiting_cell, LimitingCell, LimitingCellInput};
pub use signal::SignalSpeed;
