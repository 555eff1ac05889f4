//! Borrowed, size-checked field buffers for one block.

use crate::error::BlockError;
use crate::geometry::BlockGeometry;
use courant_core::{FieldLocator, FieldRole};
use indexmap::IndexMap;

/// Standard [`FieldLocator`]: an ordered map from [`FieldRole`] to a
/// borrowed buffer.
///
/// Every buffer must hold exactly one value per block cell (ghost zones
/// included); mismatches are rejected at insertion so the scans never
/// index out of range.
///
/// # Examples
///
/// ```
/// use courant_block::{BlockFields, BlockGeometry};
/// use courant_core::{FieldLocator, FieldRole};
///
/// let geom = BlockGeometry::builder().rank(1).dims([4, 1, 1]).build().unwrap();
/// let density = [1.0, 2.0, 3.0, 4.0];
/// let fields = BlockFields::new(&geom)
///     .with(FieldRole::Density, &density)
///     .unwrap();
/// assert_eq!(fields.field(FieldRole::Density), Some(&density[..]));
/// assert!(fields.field(FieldRole::TotalEnergy).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct BlockFields<'a> {
    size: usize,
    buffers: IndexMap<FieldRole, &'a [f64]>,
}

impl<'a> BlockFields<'a> {
    /// An empty locator for a block of the given geometry.
    pub fn new(geometry: &BlockGeometry) -> Self {
        Self {
            size: geometry.size(),
            buffers: IndexMap::new(),
        }
    }

    /// Register `data` under `role`, replacing any previous buffer.
    pub fn insert(&mut self, role: FieldRole, data: &'a [f64]) -> Result<(), BlockError> {
        if data.len() != self.size {
            return Err(BlockError::FieldSizeMismatch {
                name: role.name().to_string(),
                expected: self.size,
                actual: data.len(),
            });
        }
        self.buffers.insert(role, data);
        Ok(())
    }

    /// Chaining form of [`insert`](Self::insert).
    pub fn with(mut self, role: FieldRole, data: &'a [f64]) -> Result<Self, BlockError> {
        self.insert(role, data)?;
        Ok(self)
    }

    /// Roles registered so far, in insertion order.
    pub fn roles(&self) -> impl Iterator<Item = FieldRole> + '_ {
        self.buffers.keys().copied()
    }

    /// Number of registered buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether no buffer has been registered.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

impl FieldLocator for BlockFields<'_> {
    fn field(&self, role: FieldRole) -> Option<&[f64]> {
        self.buffers.get(&role).copied()
    }
}
