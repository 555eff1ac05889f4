//! Error types for block construction.

use courant_core::Axis;
use std::fmt;

/// Errors arising from block geometry or field-view construction.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockError {
    /// Rank outside `1..=3`.
    InvalidRank {
        /// The rejected rank.
        rank: usize,
    },
    /// A required builder input was never set.
    MissingParameter {
        /// Name of the missing builder input.
        name: &'static str,
    },
    /// An active axis has zero cells.
    EmptyAxis {
        /// The empty axis.
        axis: Axis,
    },
    /// An active range does not fit inside the axis dimension.
    ActiveRangeOutOfBounds {
        /// The offending axis.
        axis: Axis,
        /// First active index.
        start: usize,
        /// Last active index (inclusive).
        end: usize,
        /// Total cells along the axis.
        dim: usize,
    },
    /// A cell width is zero, negative, or non-finite.
    InvalidCellWidth {
        /// The offending axis.
        axis: Axis,
        /// The rejected width.
        value: f64,
    },
    /// A buffer length does not match the block (or gravity mesh) size.
    FieldSizeMismatch {
        /// Name of the buffer.
        name: String,
        /// Expected number of cells.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRank { rank } => write!(f, "rank must be 1, 2 or 3, got {rank}"),
            Self::MissingParameter { name } => write!(f, "{name} is required"),
            Self::EmptyAxis { axis } => write!(f, "axis {axis} has zero cells"),
            Self::ActiveRangeOutOfBounds {
                axis,
                start,
                end,
                dim,
            } => write!(
                f,
                "active range [{start}, {end}] on axis {axis} does not fit dimension {dim}"
            ),
            Self::InvalidCellWidth { axis, value } => {
                write!(f, "cell width on axis {axis} must be finite and > 0, got {value}")
            }
            Self::FieldSizeMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "buffer '{name}' has {actual} cells, block expects {expected}"
            ),
        }
    }
}

impl std::error::Error for BlockError {}
