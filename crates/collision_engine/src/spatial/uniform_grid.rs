//! Uniform grid spatial index
//!
//! Divides the world into fixed square cells. Each cell owns a bucket of
//! handles; a handle is stored in every bucket its rectangle overlaps, so a
//! large entity is discoverable from any cell it touches.
//!
//! The grid never owns entities. Callers must remove a handle with the same
//! rectangle it was inserted with, otherwise the handle stays behind in
//! buckets it no longer overlaps.

use crate::foundation::math::{Rect, Vec2};

/// Errors raised when building a grid with unusable dimensions
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Cell size must be a positive finite number
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),

    /// World extent must be positive and finite on both axes
    #[error("world extent must be positive and finite, got {width}x{height}")]
    InvalidWorldExtent {
        /// Requested world width
        width: f32,
        /// Requested world height
        height: f32,
    },
}

/// Check grid dimensions without building the bucket table
pub fn validate_dimensions(world_width: f32, world_height: f32, cell_size: f32) -> Result<(), GridError> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(GridError::InvalidCellSize(cell_size));
    }
    let valid_extent = |v: f32| v.is_finite() && v > 0.0;
    if !(valid_extent(world_width) && valid_extent(world_height)) {
        return Err(GridError::InvalidWorldExtent {
            width: world_width,
            height: world_height,
        });
    }
    Ok(())
}

/// Inclusive range of cells covered by a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSpan {
    /// First column
    pub min_col: usize,
    /// First row
    pub min_row: usize,
    /// Last column (inclusive)
    pub max_col: usize,
    /// Last row (inclusive)
    pub max_row: usize,
}

impl CellSpan {
    /// Number of cells in the span
    pub const fn cell_count(&self) -> usize {
        (self.max_col - self.min_col + 1) * (self.max_row - self.min_row + 1)
    }

    /// Check if a cell lies inside the span
    pub const fn contains(&self, col: usize, row: usize) -> bool {
        col >= self.min_col && col <= self.max_col && row >= self.min_row && row <= self.max_row
    }

    /// Iterate `(col, row)` pairs in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let span = *self;
        (span.min_row..=span.max_row)
            .flat_map(move |row| (span.min_col..=span.max_col).map(move |col| (col, row)))
    }
}

/// Fixed-size spatial index mapping rectangles to buckets of handles
#[derive(Debug, Clone)]
pub struct UniformGrid<K> {
    cell_size: f32,
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<K>>,
}

impl<K: Copy + PartialEq> UniformGrid<K> {
    /// Create a grid covering `[0, world_width] x [0, world_height]`
    pub fn new(world_width: f32, world_height: f32, cell_size: f32) -> Result<Self, GridError> {
        validate_dimensions(world_width, world_height, cell_size)?;

        let cols = ((world_width / cell_size).ceil() as usize).max(1);
        let rows = ((world_height / cell_size).ceil() as usize).max(1);

        log::debug!(
            "Creating uniform grid: {}x{} cells of size {} for a {}x{} world",
            cols, rows, cell_size, world_width, world_height
        );

        Ok(Self {
            cell_size,
            cols,
            rows,
            buckets: vec![Vec::new(); cols * rows],
        })
    }

    /// Side length of a cell
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of handle entries across all buckets (duplicates included)
    pub fn entry_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Cell coordinates containing a point, clamped to the grid
    pub fn cell_of(&self, point: Vec2) -> (usize, usize) {
        (
            Self::clamp_index(point.x / self.cell_size, self.cols),
            Self::clamp_index(point.y / self.cell_size, self.rows),
        )
    }

    /// Cells spanned by a rectangle, clamped to the grid
    ///
    /// Rectangles partly or fully outside the world are clamped, never rejected.
    pub fn span(&self, rect: &Rect) -> CellSpan {
        let (min_col, min_row) = self.cell_of(rect.min());
        let (max_col, max_row) = self.cell_of(rect.max());
        CellSpan {
            min_col,
            min_row,
            max_col: max_col.max(min_col),
            max_row: max_row.max(min_row),
        }
    }

    /// Add a handle to every bucket the rectangle spans
    pub fn insert(&mut self, key: K, rect: &Rect) {
        for index in self.flat_indices(rect) {
            self.buckets[index].push(key);
        }
    }

    /// Erase every occurrence of a handle from the buckets the rectangle spans
    pub fn remove(&mut self, key: K, rect: &Rect) {
        for index in self.flat_indices(rect) {
            self.buckets[index].retain(|k| *k != key);
        }
    }

    /// Visit every handle in the buckets the rectangle spans
    ///
    /// A handle stored in several spanned cells is visited once per cell.
    pub fn query<F: FnMut(K)>(&self, rect: &Rect, mut visit: F) {
        for index in self.flat_indices(rect) {
            for key in &self.buckets[index] {
                visit(*key);
            }
        }
    }

    /// Contents of a single bucket, empty for out-of-range coordinates
    pub fn bucket(&self, col: usize, row: usize) -> &[K] {
        if col >= self.cols || row >= self.rows {
            return &[];
        }
        &self.buckets[row * self.cols + col]
    }

    /// World-space rectangle covered by a cell
    pub fn cell_rect(&self, col: usize, row: usize) -> Rect {
        Rect::new(
            col as f32 * self.cell_size,
            row as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// Empty every bucket
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    fn flat_indices(&self, rect: &Rect) -> impl Iterator<Item = usize> {
        let cols = self.cols;
        self.span(rect).cells().map(move |(col, row)| row * cols + col)
    }

    fn clamp_index(scaled: f32, count: usize) -> usize {
        // NaN casts to 0; huge values saturate before the clamp
        let cell = scaled.floor() as i64;
        cell.clamp(0, count as i64 - 1) as usize
    }
}
