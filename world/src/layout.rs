//! Character-map floor plans that configure the grid.

use kitchen_core::{CellCoord, CellKind, Ingredient};
use thiserror::Error;

/// Floor plan of the reference kitchen: a counter border with stations cut into it.
pub const REFERENCE_LAYOUT: [&str; 10] = [
    "##T#M#O#S#",
    "#........S",
    "#........#",
    "K........#",
    "K........$",
    "#........$",
    "#........#",
    "X........#",
    "#........#",
    "##########",
];

/// Errors raised while parsing a floor plan.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The floor plan contained no rows or an empty first row.
    #[error("layout must contain at least one non-empty row")]
    Empty,
    /// A row's length differed from the first row.
    #[error("layout row {row} has {found} tiles, expected {expected}")]
    Ragged {
        /// Zero-based index of the offending row.
        row: u32,
        /// Width of the first row.
        expected: u32,
        /// Width of the offending row.
        found: u32,
    },
    /// A character did not map to any tile kind.
    #[error("unknown tile symbol '{symbol}' at ({column}, {row})")]
    UnknownTile {
        /// Offending character.
        symbol: char,
        /// Column of the character.
        column: u32,
        /// Row of the character.
        row: u32,
    },
}

/// Parsed floor plan ready to build a grid from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
}

impl Layout {
    /// Parses a floor plan from rows of tile symbols.
    ///
    /// `.` floor, `#` counter, `T`/`M`/`O` tomato, mushroom and onion
    /// dispensers, `K` cutting board, `S` stove, `$` checkout, `X` trash.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] for empty, ragged, or unknown input.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, LayoutError> {
        let expected = rows
            .first()
            .map(|row| row.as_ref().chars().count())
            .filter(|width| *width > 0)
            .ok_or(LayoutError::Empty)?;

        let mut cells = Vec::with_capacity(expected * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row_index = to_u32(row_index);
            let found = row.as_ref().chars().count();
            if found != expected {
                return Err(LayoutError::Ragged {
                    row: row_index,
                    expected: to_u32(expected),
                    found: to_u32(found),
                });
            }

            for (column_index, symbol) in row.as_ref().chars().enumerate() {
                let kind = kind_for_symbol(symbol).ok_or(LayoutError::UnknownTile {
                    symbol,
                    column: to_u32(column_index),
                    row: row_index,
                })?;
                cells.push(kind);
            }
        }

        Ok(Self {
            columns: to_u32(expected),
            rows: to_u32(rows.len()),
            cells,
        })
    }

    /// Floor plan of the reference kitchen.
    #[must_use]
    pub fn reference() -> Self {
        Self::parse(&REFERENCE_LAYOUT).expect("reference layout is well formed")
    }

    /// Number of columns in the floor plan.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the floor plan.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Kind of the provided cell, if it lies inside the plan.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<CellKind> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let index = cell.row() as usize * self.columns as usize + cell.column() as usize;
        self.cells.get(index).copied()
    }

    pub(crate) fn cells(&self) -> &[CellKind] {
        &self.cells
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::reference()
    }
}

fn kind_for_symbol(symbol: char) -> Option<CellKind> {
    let kind = match symbol {
        '.' => CellKind::Floor,
        '#' => CellKind::Counter,
        'T' => CellKind::Dispenser(Ingredient::Tomato),
        'M' => CellKind::Dispenser(Ingredient::Mushroom),
        'O' => CellKind::Dispenser(Ingredient::Onion),
        'K' => CellKind::CuttingBoard,
        'S' => CellKind::Stove,
        '$' => CellKind::Checkout,
        'X' => CellKind::Trash,
        _ => return None,
    };
    Some(kind)
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_layout_is_ten_by_ten() {
        let layout = Layout::reference();
        assert_eq!(layout.columns(), 10);
        assert_eq!(layout.rows(), 10);
        assert_eq!(layout.cell(CellCoord::new(5, 5)), Some(CellKind::Floor));
        assert_eq!(layout.cell(CellCoord::new(0, 1)), Some(CellKind::Counter));
        assert_eq!(
            layout.cell(CellCoord::new(2, 0)),
            Some(CellKind::Dispenser(Ingredient::Tomato))
        );
    }

    #[test]
    fn reference_layout_is_walled_in() {
        let layout = Layout::reference();
        for column in 0..layout.columns() {
            for row in [0, layout.rows() - 1] {
                assert_ne!(layout.cell(CellCoord::new(column, row)), Some(CellKind::Floor));
            }
        }
        for row in 0..layout.rows() {
            for column in [0, layout.columns() - 1] {
                assert_ne!(layout.cell(CellCoord::new(column, row)), Some(CellKind::Floor));
            }
        }
    }

    #[test]
    fn rejects_empty_layout() {
        let rows: [&str; 0] = [];
        assert_eq!(Layout::parse(&rows), Err(LayoutError::Empty));
        assert_eq!(Layout::parse(&[""]), Err(LayoutError::Empty));
    }

    #[test]
    fn rejects_ragged_rows() {
        assert_eq!(
            Layout::parse(&["###", "#.", "###"]),
            Err(LayoutError::Ragged {
                row: 1,
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn rejects_unknown_symbols() {
        assert_eq!(
            Layout::parse(&["###", "#?#"]),
            Err(LayoutError::UnknownTile {
                symbol: '?',
                column: 1,
                row: 1,
            })
        );
    }
}
