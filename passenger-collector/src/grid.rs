use miette::*;

/// Cell value that no walker may ever occupy.
pub const OBSTACLE: i32 = -1;

/// A dense, immutable square grid stored row-major.
///
/// Cells are `-1` (obstacle), `0` (empty) or `1` (passenger) by convention,
/// but any integer is accepted and scored as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<i32>,
}

impl Grid {
    /// Builds an `size`×`size` grid from row-major `cells`.
    ///
    /// Fails when the grid would be empty or when `cells` cannot fill a
    /// square of the requested size.
    pub fn new(size: usize, cells: Vec<i32>) -> Result<Self> {
        ensure!(size > 0, "grid must have at least one cell");

        let expected = size
            .checked_mul(size)
            .ok_or(miette!("grid size {size} is too large"))?;
        ensure!(
            cells.len() == expected,
            "a {size}x{size} grid needs {expected} cells, got {}",
            cells.len()
        );

        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the value at (row, col), or `None` if out of bounds.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row >= self.size || col >= self.size {
            None
        } else {
            Some(self.cells[row * self.size + col])
        }
    }

    /// Returns the value at (row, col) if a walker may stand there.
    #[inline(always)]
    pub fn passable(&self, row: usize, col: usize) -> Option<i32> {
        self.get(row, col).filter(|&v| v != OBSTACLE)
    }

    /// Out-of-bounds positions are impassable too.
    #[inline(always)]
    pub fn is_obstacle(&self, row: usize, col: usize) -> bool {
        self.passable(row, col).is_none()
    }

    pub fn transpose(&self) -> Self {
        let n = self.size;
        let cells = (0..n)
            .flat_map(|row| (0..n).map(move |col| self.cells[col * n + row]))
            .collect();
        Self { size: n, cells }
    }
}
