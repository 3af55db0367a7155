use serde::{Deserialize, Serialize};

/// Near-square subplot grid used by per-series chart layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubplotGrid {
    pub rows: usize,
    pub columns: usize,
}

/// Zero-based cell of a `SubplotGrid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
}

impl SubplotGrid {
    /// Grid for `count` panels: `columns = ceil(count / 2)`,
    /// `rows = ceil(count / columns)`. Returns `None` for zero panels.
    #[must_use]
    pub fn for_count(count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        let columns = count.div_ceil(2);
        let rows = count.div_ceil(columns);
        Some(Self { rows, columns })
    }

    #[must_use]
    pub fn capacity(self) -> usize {
        self.rows * self.columns
    }

    /// Row-major cell for the `ordinal`-th panel.
    #[must_use]
    pub fn cell(self, ordinal: usize) -> Option<GridCell> {
        (ordinal < self.capacity()).then(|| GridCell {
            row: ordinal / self.columns,
            column: ordinal % self.columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_shapes_for_small_counts() {
        let expected = [(1, 1, 1), (2, 2, 1), (3, 2, 2), (4, 2, 2), (5, 2, 3), (6, 2, 3)];
        for (count, rows, columns) in expected {
            let grid = SubplotGrid::for_count(count).expect("grid");
            assert_eq!((grid.rows, grid.columns), (rows, columns), "count={count}");
        }
        assert!(SubplotGrid::for_count(0).is_none());
    }

    #[test]
    fn cells_fill_row_major() {
        let grid = SubplotGrid::for_count(5).expect("grid");
        assert_eq!(grid.cell(0), Some(GridCell { row: 0, column: 0 }));
        assert_eq!(grid.cell(3), Some(GridCell { row: 1, column: 0 }));
        assert_eq!(grid.cell(6), None);
    }
}
