//! The rectangular knot grid.
//!
//! Rows are reference counted so cloning a grid is cheap and a write copies
//! only the row it lands in. Rows untouched since a clone stay
//! pointer-identical, which lets consumers detect changes without comparing
//! cells.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{KnotError, Result};

use super::Colour;

/// A row-major grid of colours with explicit dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr", into = "GridRepr")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Arc<Vec<Colour>>>,
}

/// On-disk shape of a grid.
#[derive(Serialize, Deserialize)]
struct GridRepr {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Colour>>,
}

impl Grid {
    /// A grid with every cell set to `colour`.
    pub fn filled(rows: usize, cols: usize, colour: Colour) -> Self {
        Self {
            rows,
            cols,
            cells: (0..rows).map(|_| Arc::new(vec![colour; cols])).collect(),
        }
    }

    /// Build a grid from explicit rows.
    ///
    /// Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Colour>>) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.len());
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(KnotError::Parse {
                message: format!(
                    "Ragged grid: expected {} cells per row, found a row with {}",
                    cols,
                    bad.len()
                ),
                help: None,
            });
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().map(Arc::new).collect(),
        })
    }

    /// Build a grid by calling `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Colour) -> Self {
        Self {
            rows,
            cols,
            cells: (0..rows)
                .map(|r| Arc::new((0..cols).map(|c| f(r, c)).collect()))
                .collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the dimensions as (rows, cols).
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True when the grid has no cells to show.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Get the colour at a cell, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Colour> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Write a cell.
    ///
    /// Returns true if the cell's colour changed. Writing the colour a cell
    /// already holds (or writing out of bounds) leaves the row untouched.
    pub fn set(&mut self, row: usize, col: usize, colour: Colour) -> bool {
        match self.get(row, col) {
            Some(current) if current != colour => {
                Arc::make_mut(&mut self.cells[row])[col] = colour;
                true
            }
            _ => false,
        }
    }

    /// Borrow a row.
    pub fn row(&self, row: usize) -> Option<&[Colour]> {
        self.cells.get(row).map(|r| r.as_slice())
    }

    /// Iterate over rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Colour]> {
        self.cells.iter().map(|r| r.as_slice())
    }

    /// True when `row` is the same allocation in both grids.
    pub fn row_shared(&self, other: &Grid, row: usize) -> bool {
        match (self.cells.get(row), other.cells.get(row)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Apply `f` to every cell, producing a new grid.
    pub fn map(&self, mut f: impl FnMut(Colour) -> Colour) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .map(|r| Arc::new(r.iter().map(|&c| f(c)).collect()))
                .collect(),
        }
    }

    /// Copy out as plain nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<Colour>> {
        self.cells.iter().map(|r| r.as_ref().clone()).collect()
    }
}

impl From<Grid> for GridRepr {
    fn from(grid: Grid) -> Self {
        Self {
            rows: grid.rows,
            cols: grid.cols,
            cells: grid.to_rows(),
        }
    }
}

impl TryFrom<GridRepr> for Grid {
    type Error = KnotError;

    fn try_from(repr: GridRepr) -> Result<Self> {
        let grid = Grid::from_rows(repr.cells)?;
        // With no rows there are no cells to disagree with `cols`.
        let cols_ok = grid.rows == 0 || grid.cols == repr.cols;
        if grid.rows != repr.rows || !cols_ok {
            return Err(KnotError::DimensionMismatch {
                rows: repr.rows,
                cols: repr.cols,
                actual_rows: grid.rows,
                actual_cols: grid.cols,
            });
        }
        Ok(Self {
            rows: repr.rows,
            cols: repr.cols,
            ..grid
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filled() {
        let grid = Grid::filled(2, 3, Colour::WHITE);
        assert_eq!(grid.size(), (2, 3));
        assert_eq!(grid.get(1, 2), Some(Colour::WHITE));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn test_from_rows_ragged() {
        let result = Grid::from_rows(vec![vec![Colour::BLACK; 2], vec![Colour::BLACK; 3]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_rows_round_trip() {
        let rows = vec![
            vec![Colour::rgb(1, 2, 3), Colour::rgb(4, 5, 6)],
            vec![Colour::rgb(7, 8, 9), Colour::rgb(10, 11, 12)],
        ];
        let grid = Grid::from_rows(rows.clone()).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, &colour) in row.iter().enumerate() {
                assert_eq!(grid.get(r, c), Some(colour));
            }
        }
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn test_set_copies_only_touched_row() {
        let original = Grid::filled(3, 3, Colour::BLACK);
        let mut edited = original.clone();

        assert!(edited.set(1, 1, Colour::WHITE));

        assert!(edited.row_shared(&original, 0));
        assert!(!edited.row_shared(&original, 1));
        assert!(edited.row_shared(&original, 2));
        assert_eq!(original.get(1, 1), Some(Colour::BLACK));
    }

    #[test]
    fn test_set_same_colour_is_noop() {
        let original = Grid::filled(2, 2, Colour::BLACK);
        let mut edited = original.clone();

        assert!(!edited.set(0, 0, Colour::BLACK));
        assert!(!edited.set(5, 5, Colour::WHITE));
        assert!(edited.row_shared(&original, 0));
    }

    #[test]
    fn test_map() {
        let grid = Grid::filled(2, 2, Colour::BLACK).map(|_| Colour::WHITE);
        assert_eq!(grid, Grid::filled(2, 2, Colour::WHITE));
    }

    #[test]
    fn test_serde_round_trip() {
        let grid = Grid::from_fn(2, 3, |r, c| Colour::rgb(r as u8, c as u8, 0));
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_deserialize_rejects_wrong_dims() {
        let json = r##"{"rows":2,"cols":1,"cells":[["#000000"]]}"##;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }

    #[test]
    fn test_deserialize_requires_every_row() {
        let missing = r#"{"rows":3,"cols":0,"cells":[]}"#;
        assert!(serde_json::from_str::<Grid>(missing).is_err());

        let empty_rows = r#"{"rows":3,"cols":0,"cells":[[],[],[]]}"#;
        let grid: Grid = serde_json::from_str(empty_rows).unwrap();
        assert_eq!(grid.size(), (3, 0));
        assert_eq!(grid.iter_rows().count(), 3);

        let none = r#"{"rows":0,"cols":0,"cells":[]}"#;
        assert!(serde_json::from_str::<Grid>(none).unwrap().is_empty());
    }
}
