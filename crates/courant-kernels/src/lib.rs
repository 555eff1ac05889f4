//! Reference kernels for the Courant timestep resolver.
//!
//! Simple, self-contained implementations of every capability trait in
//! `courant-kernel`. They are good enough to drive the aggregator end to
//! end on test problems and benchmarks; production codes plug in their
//! own solvers through the same traits.
//!
//! | Capability | Implementation |
//! |---|---|
//! | equation of state | [`IdealGas`], [`Isothermal`] |
//! | pressure | [`IdealGasPressure`] |
//! | Courant limit | [`FiniteDifferenceCourant`] |
//! | MHD fast speed | [`FastMagnetosonic`] |
//! | cosmology | [`StaticCosmology`], [`EinsteinDeSitter`] |
//! | units | [`CodeUnits`] |
//! | conduction | [`ConstantConduction`] |
//! | cosmic rays | [`ConstantCosmicRay`] |
//! | cooling | [`ConstantLambdaCooling`] |
//! | free-fall collapse | [`UniformCollapse`] |

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod cosmology;
pub mod courant;
pub mod eos;
pub mod fast_speed;
pub mod pressure;
pub mod source;
pub mod transport;
pub mod units;

pub use cosmology::{EinsteinDeSitter, EinsteinDeSitterBuilder, StaticCosmology};
pub use courant::FiniteDifferenceCourant;
pub use eos::{IdealGas, Isothermal};
pub use fast_speed::FastMagnetosonic;
pub use pressure::IdealGasPressure;
pub use source::{ConstantLambdaCooling, UniformCollapse};
pub use transport::{ConstantConduction, ConstantCosmicRay};
pub use units::CodeUnits;
