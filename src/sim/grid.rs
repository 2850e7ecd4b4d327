//! Level grid: the tile layout a level is built from
//!
//! A grid is square. Cells are addressed by (column, row) with (0, 0) at the
//! top-left.

use glam::IVec2;
use rand::Rng;

/// Number of steel cells scattered inside the border
pub const INTERIOR_STEEL: usize = 6;
/// Share of all cells turned into bricks
pub const BRICK_DENSITY: f64 = 0.12;
/// Upper bound on rejection-sampling draws per placement pass
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Brick,
    Steel,
    PlayerSpawn,
}

impl Cell {
    /// Character used in level files
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Brick => '#',
            Cell::Steel => '@',
            Cell::PlayerSpawn => 'p',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Brick),
            '@' => Some(Cell::Steel),
            'p' => Some(Cell::PlayerSpawn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A `size`×`size` grid with every cell set to `cell`
    pub fn filled(size: usize, cell: Cell) -> Self {
        Self {
            size,
            cells: vec![cell; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        if col < self.size && row < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Set a cell; coordinates outside the grid are ignored
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        if col < self.size && row < self.size {
            self.cells[row * self.size + col] = cell;
        }
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics, and an empty grid has no rows anyway
        self.cells.chunks(self.size.max(1))
    }

    /// All cells as (column, row, cell)
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % self.size, i / self.size, cell))
    }

    /// First player spawn cell in row-major order
    pub fn spawn(&self) -> Option<IVec2> {
        self.iter()
            .find(|&(_, _, cell)| cell == Cell::PlayerSpawn)
            .map(|(col, row, _)| IVec2::new(col as i32, row as i32))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Level file text: one line per row, newline terminated
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.size * (self.size + 1));
        for row in self.rows() {
            text.extend(row.iter().map(|c| c.symbol()));
            text.push('\n');
        }
        text
    }

    /// Generate a random level layout.
    ///
    /// Steel border, a few interior steel cells, bricks over roughly 12% of
    /// the grid, the player spawn at the bottom centre and a brick nest around
    /// it. Sizes below 3 have no interior and come back as solid steel.
    pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut grid = Grid::filled(size, Cell::Empty);
        if size < 3 {
            grid.cells.fill(Cell::Steel);
            return grid;
        }

        for i in 0..size {
            grid.set(i, 0, Cell::Steel);
            grid.set(i, size - 1, Cell::Steel);
            grid.set(0, i, Cell::Steel);
            grid.set(size - 1, i, Cell::Steel);
        }

        grid.scatter(Cell::Steel, INTERIOR_STEEL, rng);
        let bricks = (size as f64 * size as f64 * BRICK_DENSITY) as usize;
        grid.scatter(Cell::Brick, bricks, rng);

        let (px, py) = (size / 2, size - 2);
        grid.set(px, py, Cell::PlayerSpawn);

        for row in py - 1..=py {
            for col in px - 1..=px + 1 {
                if (col, row) == (px, py) {
                    continue;
                }
                let interior = col > 0 && col < size - 1 && row > 0 && row < size - 1;
                if interior {
                    grid.set(col, row, Cell::Brick);
                }
            }
        }

        grid
    }

    /// Place up to `count` cells of `cell` on empty interior cells.
    ///
    /// Gives up after [`MAX_PLACEMENT_ATTEMPTS`] draws so crowded grids
    /// still terminate. Returns how many were placed.
    fn scatter<R: Rng + ?Sized>(&mut self, cell: Cell, count: usize, rng: &mut R) -> usize {
        let mut placed = 0;
        let mut attempts = 0;
        while placed < count && attempts < MAX_PLACEMENT_ATTEMPTS {
            attempts += 1;
            let col = rng.random_range(1..=self.size - 2);
            let row = rng.random_range(1..=self.size - 2);
            if self.get(col, row) == Some(Cell::Empty) {
                self.set(col, row, cell);
                placed += 1;
            }
        }
        if placed < count {
            log::warn!(
                "Placed only {}/{} {:?} cells on a {}x{} grid",
                placed,
                count,
                cell,
                self.size,
                self.size
            );
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn border_is_steel(grid: &Grid) -> bool {
        let n = grid.size();
        (0..n).all(|i| {
            grid.get(i, 0) == Some(Cell::Steel)
                && grid.get(i, n - 1) == Some(Cell::Steel)
                && grid.get(0, i) == Some(Cell::Steel)
                && grid.get(n - 1, i) == Some(Cell::Steel)
        })
    }

    #[test]
    fn test_generate_standard_level() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let grid = Grid::generate(20, &mut rng);

        assert_eq!(grid.size(), 20);
        assert!(border_is_steel(&grid));
        assert_eq!(grid.spawn(), Some(IVec2::new(10, 18)));
        assert_eq!(grid.count(Cell::PlayerSpawn), 1);
        // 76 border cells plus the scattered ones, some of which the spawn
        // and nest may have overwritten
        let steel = grid.count(Cell::Steel);
        assert!((76..=76 + INTERIOR_STEEL).contains(&steel));

        // Nest: the five neighbours above and beside the spawn
        for (col, row) in [(9, 17), (10, 17), (11, 17), (9, 18), (11, 18)] {
            assert_eq!(grid.get(col, row), Some(Cell::Brick), "nest at {col},{row}");
        }
        // 48 scattered bricks, minus one if the spawn landed on a brick
        assert!(grid.count(Cell::Brick) >= 47);
    }

    #[test]
    fn test_tiny_grids() {
        let mut rng = Pcg32::seed_from_u64(1);
        let grid = Grid::generate(2, &mut rng);
        assert_eq!(grid.count(Cell::Steel), 4);
        assert_eq!(grid.spawn(), None);

        let grid = Grid::generate(3, &mut rng);
        assert!(border_is_steel(&grid));
        assert_eq!(grid.get(1, 1), Some(Cell::PlayerSpawn));
    }

    #[test]
    fn test_text_layout() {
        let mut grid = Grid::filled(3, Cell::Steel);
        grid.set(1, 1, Cell::PlayerSpawn);
        assert_eq!(grid.to_text(), "@@@\n@p@\n@@@\n");
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = Grid::filled(4, Cell::Empty);
        grid.set(4, 0, Cell::Brick);
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.count(Cell::Brick), 0);
    }

    proptest! {
        #[test]
        fn prop_generated_grid_is_bordered(size in 3usize..40, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let grid = Grid::generate(size, &mut rng);
            prop_assert_eq!(grid.size(), size);
            prop_assert!(border_is_steel(&grid));
            prop_assert_eq!(grid.count(Cell::PlayerSpawn), 1);
            prop_assert_eq!(
                grid.spawn(),
                Some(IVec2::new((size / 2) as i32, (size - 2) as i32))
            );
        }
    }
}
