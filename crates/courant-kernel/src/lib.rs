//! Capability traits for the external kernels a Courant timestep delegates to.
//!
//! The aggregator never calls a flux solver, EOS, or cosmology
//! integrator directly. Each collaborator family is a small trait taking
//! the block geometry and field views, so the aggregator's control flow
//! does not depend on any particular implementation. [`Kernels`] bundles
//! the collaborators supplied for one run.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cosmology;
pub mod eos;
pub mod hydro;
pub mod kernels;
pub mod source;
pub mod transport;
pub mod units;

pub use cosmology::{Cosmology, Expansion};
pub use eos::{EosState, EquationOfState};
pub use hydro::{
    CourantKernel, CourantStep, FastSpeedKernel, HydroMethod, HydroView, MhdView, PressureSolver,
};
pub use kernels::Kernels;
pub use source::{CollapseFactor, CoolingKernel};
pub use transport::{ConductionKernel, ConductionMode, CosmicRayKernel};
pub use units::{UnitSystem, Units};
