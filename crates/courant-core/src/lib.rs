//! Core types and traits for the Courant timestep resolver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Courant workspace:
//! field roles, axes, physical constants, error types, and the traits
//! through which block data is located.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod error;
pub mod id;
pub mod traits;

pub use constants::{
    DIAGNOSTIC_THRESHOLD_YEARS, HBAR_OVER_M_FDM, KM_PER_S, TINY_NUMBER, UNCONSTRAINED, YEAR_S,
};
pub use error::{KernelError, TimestepError};
pub use id::{Axis, FieldRole};
pub use traits::{FieldLocator, ParticleStore};
