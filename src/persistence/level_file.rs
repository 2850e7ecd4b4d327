//! Plain-text level file format
//!
//! One line per grid row, one character per column:
//!
//! ```plaintext
//! @@@@@
//! @.#.@
//! @.p.@
//! @@@@@
//! ```
//!
//! `.` empty, `#` brick, `@` steel, `p` player spawn. Reading is lenient:
//! damaged files are repaired to the expected size and every repair is
//! reported back so the caller can log it.

use std::fmt;

use crate::sim::grid::{Cell, Grid};

/// One fix applied while reading a level file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    /// Row was shorter than the grid and got padded with empty cells
    PaddedRow { row: usize, len: usize },
    /// Row was longer than the grid and got cut
    TruncatedRow { row: usize, len: usize },
    /// Unknown character read as an empty cell
    UnknownSymbol { row: usize, col: usize, symbol: char },
    /// File ended early; the remaining rows are empty
    MissingRows { from: usize },
    /// Lines past the last row were ignored
    ExtraRows { count: usize },
}

impl fmt::Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repair::PaddedRow { row, len } => write!(f, "row {} has only {} cells, padded", row, len),
            Repair::TruncatedRow { row, len } => write!(f, "row {} has {} cells, truncated", row, len),
            Repair::UnknownSymbol { row, col, symbol } => {
                write!(f, "unknown symbol {:?} at row {} col {}, read as empty", symbol, row, col)
            }
            Repair::MissingRows { from } => write!(f, "rows {}.. missing, filled empty", from),
            Repair::ExtraRows { count } => write!(f, "{} extra rows ignored", count),
        }
    }
}

/// Parse level text into a `size`×`size` grid, repairing what does not fit
pub fn parse_level(text: &str, size: usize) -> (Grid, Vec<Repair>) {
    let mut grid = Grid::filled(size, Cell::Empty);
    let mut repairs = Vec::new();

    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    // A trailing blank line is just the final newline of an editor
    let rows = match lines.iter().rposition(|l| !l.is_empty()) {
        Some(last) => &lines[..=last],
        None => &lines[..0],
    };

    for (row, line) in rows.iter().enumerate().take(size) {
        let len = line.chars().count();
        if len < size {
            repairs.push(Repair::PaddedRow { row, len });
        } else if len > size {
            repairs.push(Repair::TruncatedRow { row, len });
        }

        for (col, symbol) in line.chars().enumerate().take(size) {
            let cell = Cell::from_symbol(symbol).unwrap_or_else(|| {
                repairs.push(Repair::UnknownSymbol { row, col, symbol });
                Cell::Empty
            });
            grid.set(col, row, cell);
        }
    }

    if rows.len() < size {
        repairs.push(Repair::MissingRows { from: rows.len() });
    } else if rows.len() > size {
        repairs.push(Repair::ExtraRows {
            count: rows.len() - size,
        });
    }

    (grid, repairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_clean_file() {
        let (grid, repairs) = parse_level("@@@\n@p@\n@#@\n", 3);
        assert!(repairs.is_empty());
        assert_eq!(grid.get(1, 1), Some(Cell::PlayerSpawn));
        assert_eq!(grid.get(1, 2), Some(Cell::Brick));
        assert_eq!(grid.count(Cell::Steel), 7);
    }

    #[test]
    fn test_generated_grid_reads_back() {
        let mut rng = Pcg32::seed_from_u64(77);
        let grid = Grid::generate(20, &mut rng);
        let (parsed, repairs) = parse_level(&grid.to_text(), 20);
        assert!(repairs.is_empty());
        assert_eq!(parsed, grid);
    }

    #[test]
    fn test_short_and_long_rows() {
        let (grid, repairs) = parse_level("@@\n@p@@\n@@@\n", 3);
        assert_eq!(
            repairs,
            vec![
                Repair::PaddedRow { row: 0, len: 2 },
                Repair::TruncatedRow { row: 1, len: 4 },
            ]
        );
        assert_eq!(grid.get(2, 0), Some(Cell::Empty));
        assert_eq!(grid.get(2, 1), Some(Cell::Steel));
    }

    #[test]
    fn test_unknown_symbols_are_empty() {
        let (grid, repairs) = parse_level("@x@\n@p@\n@@@\n", 3);
        assert_eq!(
            repairs,
            vec![Repair::UnknownSymbol {
                row: 0,
                col: 1,
                symbol: 'x'
            }]
        );
        assert_eq!(grid.get(1, 0), Some(Cell::Empty));
    }

    #[test]
    fn test_row_count_mismatch() {
        let (_, repairs) = parse_level("@@@\n", 3);
        assert_eq!(repairs, vec![Repair::MissingRows { from: 1 }]);

        let (_, repairs) = parse_level("@@@\n@@@\n@@@\n@@@\n", 3);
        assert_eq!(repairs, vec![Repair::ExtraRows { count: 1 }]);

        let (grid, repairs) = parse_level("", 3);
        assert_eq!(repairs, vec![Repair::MissingRows { from: 0 }]);
        assert_eq!(grid.count(Cell::Empty), 9);
    }

    #[test]
    fn test_windows_line_endings() {
        let (grid, repairs) = parse_level("@@@\r\n@p@\r\n@@@\r\n", 3);
        assert!(repairs.is_empty());
        assert_eq!(grid.spawn().map(|s| (s.x, s.y)), Some((1, 1)));
    }
}
