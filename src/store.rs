//! Grid store - the authoritative knot grid of a session.

use crate::error::{KnotError, Result};
use crate::types::{blend, Colour, Grid};

/// Owns the current grid and enforces its dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct GridStore {
    grid: Grid,
}

impl GridStore {
    /// A blank (white) store of the given size.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid: Grid::filled(rows, cols, Colour::WHITE),
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Borrow the current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Swap in a whole new grid of the same dimensions.
    ///
    /// A grid of any other size is rejected and the current grid is kept.
    pub fn replace(&mut self, grid: Grid) -> Result<()> {
        if grid.size() != self.grid.size() {
            return Err(KnotError::DimensionMismatch {
                rows: self.rows(),
                cols: self.cols(),
                actual_rows: grid.rows(),
                actual_cols: grid.cols(),
            });
        }
        self.grid = grid;
        Ok(())
    }

    /// Adopt a grid along with its dimensions.
    ///
    /// Used when the configured size itself changes.
    pub(crate) fn reset(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// Colour at a cell, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Colour> {
        self.grid.get(row, col)
    }

    /// Blend `colour` into the `size x size` square around a cell.
    ///
    /// The square starts `size / 2` cells above and left of the centre, so
    /// even sizes lean toward the top left. Cells outside the grid are
    /// skipped, as are cells whose colour would not change. Returns the
    /// number of cells that changed.
    pub fn paint_region(
        &mut self,
        center_row: usize,
        center_col: usize,
        size: usize,
        colour: Colour,
        alpha: f32,
    ) -> usize {
        let size = size.max(1) as i64;
        let offset = size / 2;
        let (rows, cols) = (self.rows() as i64, self.cols() as i64);
        let mut changed = 0;

        for dy in 0..size {
            let row = center_row as i64 - offset + dy;
            if row < 0 || row >= rows {
                continue;
            }
            for dx in 0..size {
                let col = center_col as i64 - offset + dx;
                if col < 0 || col >= cols {
                    continue;
                }

                let (row, col) = (row as usize, col as usize);
                let Some(current) = self.grid.get(row, col) else {
                    continue;
                };
                if self.grid.set(row, col, blend(current, colour, alpha)) {
                    changed += 1;
                }
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replace_round_trip() {
        let grid = Grid::from_fn(3, 4, |r, c| Colour::rgb(r as u8 * 10, c as u8 * 20, 7));
        let mut store = GridStore::new(3, 4);
        store.replace(grid.clone()).unwrap();

        for r in 0..3 {
            for c in 0..4 {
                assert_eq!(store.get(r, c), grid.get(r, c));
            }
        }
    }

    #[test]
    fn test_replace_rejects_wrong_size() {
        let mut store = GridStore::new(3, 3);
        let before = store.clone();
        let result = store.replace(Grid::filled(3, 4, Colour::BLACK));
        assert!(matches!(result, Err(KnotError::DimensionMismatch { .. })));
        assert_eq!(store, before);
    }

    #[test]
    fn test_paint_single_cell_full_opacity() {
        let mut store = GridStore::new(2, 2);
        store.replace(Grid::filled(2, 2, Colour::BLACK)).unwrap();

        let changed = store.paint_region(0, 1, 1, Colour::WHITE, 1.0);
        assert_eq!(changed, 1);
        assert_eq!(store.get(0, 1).unwrap().hex(), "#ffffff");
        assert_eq!(store.get(0, 0), Some(Colour::BLACK));
    }

    #[test]
    fn test_paint_clips_at_edges() {
        let mut store = GridStore::new(3, 3);
        store.replace(Grid::filled(3, 3, Colour::BLACK)).unwrap();

        // Size 3 around the corner reaches (-1..=1, -1..=1); only 4 cells exist.
        let changed = store.paint_region(0, 0, 3, Colour::WHITE, 1.0);
        assert_eq!(changed, 4);
        for (r, c) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
            assert_eq!(store.get(r, c), Some(Colour::WHITE));
        }
        assert_eq!(store.get(2, 2), Some(Colour::BLACK));
        assert_eq!(store.get(0, 2), Some(Colour::BLACK));
    }

    #[test]
    fn test_paint_centered_covers_whole_3x3() {
        let mut store = GridStore::new(3, 3);
        store.replace(Grid::filled(3, 3, Colour::BLACK)).unwrap();
        assert_eq!(store.paint_region(1, 1, 3, Colour::WHITE, 1.0), 9);
    }

    #[test]
    fn test_paint_even_size_leans_up_left() {
        let mut store = GridStore::new(4, 4);
        store.replace(Grid::filled(4, 4, Colour::BLACK)).unwrap();

        // offset = 1, so rows/cols 0..=1 around (1, 1)
        assert_eq!(store.paint_region(1, 1, 2, Colour::WHITE, 1.0), 4);
        assert_eq!(store.get(0, 0), Some(Colour::WHITE));
        assert_eq!(store.get(0, 1), Some(Colour::WHITE));
        assert_eq!(store.get(1, 0), Some(Colour::WHITE));
        assert_eq!(store.get(1, 1), Some(Colour::WHITE));
        assert_eq!(store.get(1, 2), Some(Colour::BLACK));
        assert_eq!(store.get(2, 1), Some(Colour::BLACK));
        assert_eq!(store.get(2, 2), Some(Colour::BLACK));
    }

    #[test]
    fn test_paint_noop_keeps_rows_identical() {
        let mut store = GridStore::new(2, 2);
        store.replace(Grid::filled(2, 2, Colour::WHITE)).unwrap();
        let before = store.grid().clone();

        assert_eq!(store.paint_region(0, 0, 2, Colour::WHITE, 0.5), 0);
        assert!(store.grid().row_shared(&before, 0));
        assert!(store.grid().row_shared(&before, 1));
    }

    #[test]
    fn test_paint_tiny_alpha_rounds_to_noop() {
        let mut store = GridStore::new(1, 1);
        store.replace(Grid::filled(1, 1, Colour::BLACK)).unwrap();
        let before = store.grid().clone();

        // 255 * 0.001 rounds to 0.
        assert_eq!(store.paint_region(0, 0, 1, Colour::WHITE, 0.001), 0);
        assert!(store.grid().row_shared(&before, 0));
    }

    #[test]
    fn test_paint_only_copies_touched_rows() {
        let mut store = GridStore::new(5, 5);
        store.replace(Grid::filled(5, 5, Colour::BLACK)).unwrap();
        let before = store.grid().clone();

        store.paint_region(2, 2, 1, Colour::WHITE, 1.0);
        assert!(store.grid().row_shared(&before, 0));
        assert!(!store.grid().row_shared(&before, 2));
        assert!(store.grid().row_shared(&before, 4));
    }

    #[test]
    fn test_paint_partial_alpha() {
        let mut store = GridStore::new(1, 1);
        store.replace(Grid::filled(1, 1, Colour::BLACK)).unwrap();
        store.paint_region(0, 0, 1, Colour::rgb(200, 100, 50), 0.5);
        assert_eq!(store.get(0, 0), Some(Colour::rgb(100, 50, 25)));
    }
}
