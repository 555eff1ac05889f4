//! Error types for the Courant timestep resolver.
//!
//! Two layers: [`KernelError`] is what an external collaborator reports,
//! and [`TimestepError`] is what the aggregator returns to its caller.
//! Every `TimestepError` is fatal for the whole call; per-cell numerical
//! edge cases never surface here, they are skipped inside the scans.

use crate::id::FieldRole;
use std::error::Error;
use std::fmt;

/// Errors reported by an external collaborator (unit system, cosmology
/// integrator, pressure evaluator, numerical kernels).
#[derive(Clone, Debug, PartialEq)]
pub enum KernelError {
    /// The kernel ran but could not produce a result.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The kernel produced a non-finite or otherwise invalid value.
    NonFinite {
        /// The quantity that went bad.
        quantity: &'static str,
        /// The offending value.
        value: f64,
    },
    /// The kernel cannot serve this block (missing input, wrong shape).
    Unavailable {
        /// Why the kernel cannot run.
        reason: String,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::NonFinite { quantity, value } => {
                write!(f, "non-finite {quantity}: {value}")
            }
            Self::Unavailable { reason } => write!(f, "unavailable: {reason}"),
        }
    }
}

impl Error for KernelError {}

/// Fatal errors from a timestep computation.
///
/// There is no partial or degraded result: once one of these is
/// returned the caller must treat the block's timestep as unknown.
#[derive(Clone, Debug, PartialEq)]
pub enum TimestepError {
    /// A collaborator returned an error.
    KernelFailed {
        /// Name of the failing collaborator (e.g. `"cosmology"`).
        kernel: &'static str,
        /// The underlying collaborator error.
        reason: KernelError,
    },
    /// A process is enabled but no collaborator was supplied for it.
    MissingKernel {
        /// Name of the absent collaborator.
        kernel: &'static str,
    },
    /// The physical-quantity locator could not resolve a required field.
    MissingField {
        /// The unresolved role.
        role: FieldRole,
    },
    /// The block violates a structural invariant the scans rely on.
    InvalidBlock {
        /// Description of the violated invariant.
        reason: String,
    },
}

impl TimestepError {
    /// Wrap a collaborator error with the collaborator's name.
    pub fn kernel(kernel: &'static str, reason: KernelError) -> Self {
        Self::KernelFailed { kernel, reason }
    }
}

impl fmt::Display for TimestepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KernelFailed { kernel, reason } => {
                write!(f, "kernel '{kernel}' failed: {reason}")
            }
            Self::MissingKernel { kernel } => {
                write!(f, "process enabled but no '{kernel}' kernel supplied")
            }
            Self::MissingField { role } => write!(f, "field '{role}' not found on block"),
            Self::InvalidBlock { reason } => write!(f, "invalid block: {reason}"),
        }
    }
}

impl Error for TimestepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::KernelFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
