//! Dense row-major 2D grid shared by noise fields and biome maps.

/// A `width × height` grid stored row-major (`index = y * width + x`).
///
/// Grids are only built inside this crate, so every instance holds exactly
/// `width * height` cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// A normalized scalar field with every value in `[0.0, 1.0]`.
pub type NoiseField = Grid<f64>;

impl<T> Grid<T> {
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total cell count (`width * height`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for grids produced by this crate.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the cell at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    /// Raw row-major cell storage.
    pub fn values(&self) -> &[T] {
        &self.cells
    }

    /// Iterates `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (i % width, i / width, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_indexing() {
        let grid = Grid::from_cells(3, 2, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(grid.get(0, 0), Some(&0));
        assert_eq!(grid.get(2, 0), Some(&2));
        assert_eq!(grid.get(0, 1), Some(&3));
        assert_eq!(grid.get(2, 1), Some(&5));
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let grid = Grid::from_cells(3, 2, vec![0u8; 6]);
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, 2).is_none());
    }

    #[test]
    fn test_iter_yields_coordinates() {
        let grid = Grid::from_cells(2, 2, vec!['a', 'b', 'c', 'd']);
        let cells: Vec<_> = grid.iter().map(|(x, y, v)| (x, y, *v)).collect();
        assert_eq!(
            cells,
            vec![(0, 0, 'a'), (1, 0, 'b'), (0, 1, 'c'), (1, 1, 'd')]
        );
    }
}
