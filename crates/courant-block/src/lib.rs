//! Block geometry and borrowed field views for Courant.
//!
//! A block is one rectangular patch of the mesh with uniform cell
//! spacing. This crate validates its geometry once, at construction,
//! so the timestep scans can index without bounds bookkeeping.
//!
//! - [`BlockGeometry`]: rank, dimensions, active range, widths, bulk velocity
//! - [`BlockFields`]: role-to-buffer locator with size validation
//! - [`ParticleList`]: owned particle velocities for both particle kinds
//! - [`BlockState`]: everything one timestep call reads

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod fields;
pub mod geometry;
pub mod particles;
pub mod state;

pub use error::BlockError;
pub use fields::BlockFields;
pub use geometry::{BlockGeometry, BlockGeometryBuilder};
pub use particles::ParticleList;
pub use state::{BlockState, GravityField};
