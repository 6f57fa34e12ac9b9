//! Immutable tile grid describing the kitchen floor plan.

use kitchen_core::{CellCoord, CellKind, WorldPoint};
use thiserror::Error;

use crate::layout::Layout;

/// Errors raised by spatial queries against the grid.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The requested cell lies outside the grid bounds.
    #[error("cell ({column}, {row}) lies outside the {columns}x{rows} grid")]
    OutOfBounds {
        /// Requested column.
        column: u32,
        /// Requested row.
        row: u32,
        /// Number of columns in the grid.
        columns: u32,
        /// Number of rows in the grid.
        rows: u32,
    },
}

/// Fixed-size tile grid classifying every cell of the kitchen.
#[derive(Clone, Debug)]
pub struct Grid {
    columns: u32,
    rows: u32,
    tile_length: f32,
    cells: Vec<CellKind>,
}

impl Grid {
    pub(crate) fn from_layout(layout: &Layout, tile_length: f32) -> Self {
        Self {
            columns: layout.columns(),
            rows: layout.rows(),
            tile_length,
            cells: layout.cells().to_vec(),
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile expressed in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Kind of the provided cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when the cell lies outside the grid.
    pub fn cell_at(&self, cell: CellCoord) -> Result<CellKind, GridError> {
        self.index(cell)
            .map(|index| self.cells[index])
            .ok_or(GridError::OutOfBounds {
                column: cell.column(),
                row: cell.row(),
                columns: self.columns,
                rows: self.rows,
            })
    }

    /// Reports whether the actor may stand on the cell.
    #[must_use]
    pub fn is_walkable(&self, cell: CellCoord) -> bool {
        matches!(self.cell_at(cell), Ok(CellKind::Floor))
    }

    /// Cells of the provided kind in row-major order.
    pub fn cells_of(&self, kind: CellKind) -> impl Iterator<Item = CellCoord> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, candidate)| **candidate == kind)
            .filter_map(move |(index, _)| {
                let index = u32::try_from(index).ok()?;
                Some(CellCoord::new(index % columns, index / columns))
            })
    }

    /// Tile containing the provided point, if it lies on the grid.
    #[must_use]
    pub fn tile_of(&self, point: WorldPoint) -> Option<CellCoord> {
        self.tile_at(
            (point.x() / self.tile_length).floor(),
            (point.y() / self.tile_length).floor(),
        )
    }

    /// Centre of the provided tile in world units.
    #[must_use]
    pub fn centre_of(&self, cell: CellCoord) -> WorldPoint {
        let half = self.tile_length / 2.0;
        WorldPoint::new(
            cell.column() as f32 * self.tile_length + half,
            cell.row() as f32 * self.tile_length + half,
        )
    }

    /// Tile addressed by already floored tile indices; negative indices fall off the grid.
    pub(crate) fn tile_at(&self, column: f32, row: f32) -> Option<CellCoord> {
        if !column.is_finite() || !row.is_finite() || column < 0.0 || row < 0.0 {
            return None;
        }
        let cell = CellCoord::new(column as u32, row as u32);
        self.contains(cell).then_some(cell)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_core::Ingredient;

    fn sample_grid() -> Grid {
        let layout = Layout::parse(&["#T#", "K.S", "#$X"]).expect("layout parses");
        Grid::from_layout(&layout, 32.0)
    }

    #[test]
    fn cell_at_reports_out_of_bounds() {
        let grid = sample_grid();
        for cell in [CellCoord::new(3, 0), CellCoord::new(0, 3), CellCoord::new(7, 9)] {
            assert_eq!(
                grid.cell_at(cell),
                Err(GridError::OutOfBounds {
                    column: cell.column(),
                    row: cell.row(),
                    columns: 3,
                    rows: 3,
                })
            );
        }
    }

    #[test]
    fn cell_at_classifies_stations() {
        let grid = sample_grid();
        assert_eq!(
            grid.cell_at(CellCoord::new(1, 0)),
            Ok(CellKind::Dispenser(Ingredient::Tomato))
        );
        assert_eq!(grid.cell_at(CellCoord::new(0, 1)), Ok(CellKind::CuttingBoard));
        assert_eq!(grid.cell_at(CellCoord::new(2, 1)), Ok(CellKind::Stove));
        assert_eq!(grid.cell_at(CellCoord::new(1, 2)), Ok(CellKind::Checkout));
        assert_eq!(grid.cell_at(CellCoord::new(2, 2)), Ok(CellKind::Trash));
    }

    #[test]
    fn only_floor_is_walkable() {
        let grid = sample_grid();
        assert!(grid.is_walkable(CellCoord::new(1, 1)));
        assert!(!grid.is_walkable(CellCoord::new(0, 0)));
        assert!(!grid.is_walkable(CellCoord::new(2, 1)));
        assert!(!grid.is_walkable(CellCoord::new(5, 5)));
    }

    #[test]
    fn tile_of_round_trips_centres() {
        let grid = sample_grid();
        let cell = CellCoord::new(2, 1);
        assert_eq!(grid.centre_of(cell), WorldPoint::new(80.0, 48.0));
        assert_eq!(grid.tile_of(grid.centre_of(cell)), Some(cell));
        assert_eq!(grid.tile_of(WorldPoint::new(-1.0, 5.0)), None);
        assert_eq!(grid.tile_of(WorldPoint::new(96.0, 5.0)), None);
    }

    #[test]
    fn cells_of_lists_matching_cells() {
        let grid = sample_grid();
        let stoves: Vec<_> = grid.cells_of(CellKind::Stove).collect();
        assert_eq!(stoves, vec![CellCoord::new(2, 1)]);
    }
}
