//! Rectangular block geometry with a ghost-zone-excluding active range.

use crate::error::BlockError;
use courant_core::Axis;

/// Geometry of one rectangular block.
///
/// Storage is flattened in C order with the first axis fastest:
/// `index = i + j*nx + k*nx*ny`. Axes at or beyond the rank are
/// degenerate: one cell, active range `[0, 0]`, unit stand-in width and
/// zero bulk velocity. These are forced by the builder, so scans can
/// always iterate three nested ranges.
///
/// # Examples
///
/// ```
/// use courant_block::BlockGeometry;
/// use courant_core::Axis;
///
/// let geom = BlockGeometry::builder()
///     .rank(2)
///     .dims([16, 8, 1])
///     .ghost_zones(3)
///     .cell_widths([0.5, 0.25, 7.0])
///     .build()
///     .unwrap();
///
/// assert_eq!(geom.size(), 128);
/// assert_eq!((geom.start(Axis::X), geom.end(Axis::X)), (3, 12));
/// assert_eq!((geom.start(Axis::Y), geom.end(Axis::Y)), (3, 4));
/// // Unused axis carries the unit stand-in width.
/// assert_eq!(geom.cell_width(Axis::Z), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BlockGeometry {
    rank: usize,
    dims: [usize; 3],
    start: [usize; 3],
    end: [usize; 3],
    cell_width: [f64; 3],
    grid_velocity: [f64; 3],
}

/// Builder for [`BlockGeometry`].
///
/// Required: `rank` and `dims`. Cell widths default to 1.0, bulk
/// velocity to zero, and the active range to the full dimension minus
/// `ghost_zones` cells on each side of every active axis.
#[derive(Clone, Debug, Default)]
pub struct BlockGeometryBuilder {
    rank: Option<usize>,
    dims: Option<[usize; 3]>,
    ghost_zones: usize,
    active: [Option<(usize, usize)>; 3],
    cell_width: Option<[f64; 3]>,
    grid_velocity: [f64; 3],
}

impl BlockGeometry {
    /// Create a new builder.
    pub fn builder() -> BlockGeometryBuilder {
        BlockGeometryBuilder::default()
    }

    /// Number of resolved axes (1–3).
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Total cells along every axis, ghost zones included.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Total cells along `axis`.
    pub fn dim(&self, axis: Axis) -> usize {
        self.dims[axis.index()]
    }

    /// First active index along `axis`.
    pub fn start(&self, axis: Axis) -> usize {
        self.start[axis.index()]
    }

    /// Last active index along `axis` (inclusive).
    pub fn end(&self, axis: Axis) -> usize {
        self.end[axis.index()]
    }

    /// Uniform cell width along `axis`.
    pub fn cell_width(&self, axis: Axis) -> f64 {
        self.cell_width[axis.index()]
    }

    /// Cell widths along all three axes.
    pub fn cell_widths(&self) -> [f64; 3] {
        self.cell_width
    }

    /// Bulk velocity of the grid frame along `axis`.
    pub fn grid_velocity(&self, axis: Axis) -> f64 {
        self.grid_velocity[axis.index()]
    }

    /// Whether `axis` is resolved by this block.
    pub fn is_active_axis(&self, axis: Axis) -> bool {
        axis.index() < self.rank
    }

    /// Total number of cells, ghost zones included.
    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    /// Number of cells in the active range.
    pub fn active_size(&self) -> usize {
        (0..3).map(|a| self.end[a] - self.start[a] + 1).product()
    }

    /// Flat index of cell `(i, j, k)`.
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        i + j * self.dims[0] + k * self.dims[0] * self.dims[1]
    }

    /// Iterate the active range in storage order, yielding the cell
    /// coordinates and flat index.
    pub fn active_cells(&self) -> impl Iterator<Item = ([usize; 3], usize)> + '_ {
        let (s, e) = (self.start, self.end);
        (s[2]..=e[2]).flat_map(move |k| {
            (s[1]..=e[1]).flat_map(move |j| {
                (s[0]..=e[0]).map(move |i| ([i, j, k], self.index(i, j, k)))
            })
        })
    }

    /// Smallest cell width over the resolved axes.
    pub fn min_cell_width(&self) -> f64 {
        Axis::active(self.rank)
            .iter()
            .map(|&axis| self.cell_width(axis))
            .fold(f64::INFINITY, f64::min)
    }

    /// The same block viewed as rank 3.
    ///
    /// Degenerate axes already carry one cell, unit width and zero bulk
    /// velocity, so only the rank changes. Used by kernels that always
    /// operate on a three-dimensional geometry.
    pub fn promoted_to_3d(&self) -> Self {
        Self {
            rank: 3,
            ..self.clone()
        }
    }
}

impl BlockGeometryBuilder {
    /// Set the rank (number of resolved axes).
    pub fn rank(mut self, rank: usize) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Set the total cells along each axis, ghost zones included.
    ///
    /// Entries for unused axes are ignored and forced to 1.
    pub fn dims(mut self, dims: [usize; 3]) -> Self {
        self.dims = Some(dims);
        self
    }

    /// Exclude `n` ghost cells on both sides of every active axis.
    pub fn ghost_zones(mut self, n: usize) -> Self {
        self.ghost_zones = n;
        self
    }

    /// Set an explicit inclusive active range on `axis`, overriding
    /// the ghost-zone default for that axis.
    pub fn active_range(mut self, axis: Axis, start: usize, end: usize) -> Self {
        self.active[axis.index()] = Some((start, end));
        self
    }

    /// Set all three cell widths. Unused axes are forced to 1.0.
    pub fn cell_widths(mut self, widths: [f64; 3]) -> Self {
        self.cell_width = Some(widths);
        self
    }

    /// Set the bulk velocity of the grid frame. Unused axes are forced to 0.
    pub fn grid_velocity(mut self, velocity: [f64; 3]) -> Self {
        self.grid_velocity = velocity;
        self
    }

    /// Build the geometry, validating all invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `rank` or `dims` is not set
    /// - `rank` is outside `1..=3`
    /// - an active axis has zero cells
    /// - an active range does not fit its dimension (ghost zones too wide)
    /// - an active-axis width is not finite and positive
    pub fn build(self) -> Result<BlockGeometry, BlockError> {
        let rank = self
            .rank
            .ok_or(BlockError::MissingParameter { name: "rank" })?;
        if !(1..=3).contains(&rank) {
            return Err(BlockError::InvalidRank { rank });
        }
        let requested = self
            .dims
            .ok_or(BlockError::MissingParameter { name: "dims" })?;
        let widths = self.cell_width.unwrap_or([1.0; 3]);

        let mut dims = [1usize; 3];
        let mut start = [0usize; 3];
        let mut end = [0usize; 3];
        let mut cell_width = [1.0f64; 3];
        let mut grid_velocity = [0.0f64; 3];

        for axis in Axis::active(rank) {
            let a = axis.index();
            let dim = requested[a];
            if dim == 0 {
                return Err(BlockError::EmptyAxis { axis });
            }
            let (s, e) = match self.active[a] {
                Some(range) => range,
                None => {
                    let g = self.ghost_zones;
                    if dim <= 2 * g {
                        return Err(BlockError::ActiveRangeOutOfBounds {
                            axis,
                            start: g,
                            end: dim.saturating_sub(g + 1),
                            dim,
                        });
                    }
                    (g, dim - g - 1)
                }
            };
            if s > e || e >= dim {
                return Err(BlockError::ActiveRangeOutOfBounds {
                    axis,
                    start: s,
                    end: e,
                    dim,
                });
            }
            let w = widths[a];
            if !w.is_finite() || w <= 0.0 {
                return Err(BlockError::InvalidCellWidth { axis, value: w });
            }
            dims[a] = dim;
            start[a] = s;
            end[a] = e;
            cell_width[a] = w;
            grid_velocity[a] = self.grid_velocity[a];
        }

        Ok(BlockGeometry {
            rank,
            dims,
            start,
            end,
            cell_width,
            grid_velocity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(n: usize, ghost: usize) -> BlockGeometry {
        BlockGeometry::builder()
            .rank(3)
            .dims([n, n, n])
            .ghost_zones(ghost)
            .cell_widths([0.1, 0.2, 0.3])
            .build()
            .unwrap()
    }

    #[test]
    fn builder_requires_rank_and_dims() {
        let err = BlockGeometry::builder().dims([4, 1, 1]).build().unwrap_err();
        assert_eq!(err, BlockError::MissingParameter { name: "rank" });
        let err = BlockGeometry::builder().rank(1).build().unwrap_err();
        assert_eq!(err, BlockError::MissingParameter { name: "dims" });
    }

    #[test]
    fn builder_rejects_bad_rank() {
        for rank in [0, 4] {
            let err = BlockGeometry::builder()
                .rank(rank)
                .dims([4, 4, 4])
                .build()
                .unwrap_err();
            assert_eq!(err, BlockError::InvalidRank { rank });
        }
    }

    #[test]
    fn builder_rejects_ghost_zones_wider_than_block() {
        let err = BlockGeometry::builder()
            .rank(1)
            .dims([6, 1, 1])
            .ghost_zones(3)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            BlockError::ActiveRangeOutOfBounds { axis: Axis::X, .. }
        ));
    }

    #[test]
    fn builder_rejects_non_positive_width() {
        let err = BlockGeometry::builder()
            .rank(2)
            .dims([4, 4, 1])
            .cell_widths([1.0, 0.0, 1.0])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BlockError::InvalidCellWidth {
                axis: Axis::Y,
                value: 0.0
            }
        );
    }

    #[test]
    fn builder_rejects_explicit_range_past_end() {
        let err = BlockGeometry::builder()
            .rank(1)
            .dims([4, 1, 1])
            .active_range(Axis::X, 1, 4)
            .build()
            .unwrap_err();
        assert!(matches!(err, BlockError::ActiveRangeOutOfBounds { .. }));
    }

    #[test]
    fn unused_axes_are_degenerate() {
        let geom = BlockGeometry::builder()
            .rank(1)
            .dims([8, 5, 5])
            .cell_widths([0.5, f64::NAN, -2.0])
            .grid_velocity([1.0, 2.0, 3.0])
            .build()
            .unwrap();
        assert_eq!(geom.dims(), [8, 1, 1]);
        assert_eq!(geom.cell_widths(), [0.5, 1.0, 1.0]);
        assert_eq!(geom.grid_velocity(Axis::X), 1.0);
        assert_eq!(geom.grid_velocity(Axis::Y), 0.0);
        assert_eq!(geom.grid_velocity(Axis::Z), 0.0);
        assert_eq!((geom.start(Axis::Z), geom.end(Axis::Z)), (0, 0));
    }

    #[test]
    fn flat_index_is_c_order() {
        let geom = BlockGeometry::builder()
            .rank(3)
            .dims([4, 3, 2])
            .build()
            .unwrap();
        assert_eq!(geom.index(0, 0, 0), 0);
        assert_eq!(geom.index(1, 0, 0), 1);
        assert_eq!(geom.index(0, 1, 0), 4);
        assert_eq!(geom.index(0, 0, 1), 12);
        assert_eq!(geom.index(3, 2, 1), geom.size() - 1);
    }

    #[test]
    fn active_cells_skip_ghosts() {
        let geom = cube(6, 2);
        let cells: Vec<_> = geom.active_cells().collect();
        assert_eq!(cells.len(), 8);
        assert_eq!(geom.active_size(), 8);
        assert_eq!(cells[0], ([2, 2, 2], geom.index(2, 2, 2)));
        assert_eq!(cells[7], ([3, 3, 3], geom.index(3, 3, 3)));
    }

    #[test]
    fn min_width_ignores_unused_axes() {
        let geom = BlockGeometry::builder()
            .rank(2)
            .dims([4, 4, 1])
            .cell_widths([3.0, 2.0, 0.5])
            .build()
            .unwrap();
        assert_eq!(geom.min_cell_width(), 2.0);
        assert_eq!(cube(4, 0).min_cell_width(), 0.1);
    }

    #[test]
    fn promotion_keeps_stand_in_widths() {
        let geom = BlockGeometry::builder()
            .rank(1)
            .dims([8, 1, 1])
            .cell_widths([0.25, 1.0, 1.0])
            .build()
            .unwrap();
        let promoted = geom.promoted_to_3d();
        assert_eq!(promoted.rank(), 3);
        assert_eq!(promoted.cell_widths(), [0.25, 1.0, 1.0]);
        assert_eq!(promoted.size(), geom.size());
        assert_eq!(promoted.active_size(), geom.active_size());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn active_cells_count_matches_active_size(
                rank in 1usize..=3,
                nx in 1usize..7,
                ny in 1usize..7,
                nz in 1usize..7,
                ghost in 0usize..3,
            ) {
                let built = BlockGeometry::builder()
                    .rank(rank)
                    .dims([nx + 2 * ghost, ny + 2 * ghost, nz + 2 * ghost])
                    .ghost_zones(ghost)
                    .build();
                let geom = built.unwrap();
                prop_assert_eq!(geom.active_cells().count(), geom.active_size());
                for (_, idx) in geom.active_cells() {
                    prop_assert!(idx < geom.size());
                }
            }
        }
    }
}
