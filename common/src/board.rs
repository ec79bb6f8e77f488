use std::fmt;

/// Raw value of an impassable border cell.
pub const WALL: i16 = -1;
/// Raw value of a passable, non-matchable cell.
pub const EMPTY: i16 = 0;

/// A typed view of a single raw cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Empty,
    Tile(u16), // The u16 is the tile type id, always >= 1.
}

impl From<i16> for Cell {
    fn from(value: i16) -> Self {
        match value {
            v if v < 0 => Cell::Wall,
            0 => Cell::Empty,
            v => Cell::Tile(v as u16),
        }
    }
}

/// The playing field: a flat, row-major sequence of cell values.
///
/// Negative values are walls, zero is empty space and positive values are tiles
/// of that type id. A generated board always carries a ring of wall around a ring
/// of empty space, so every outward walk along a row or column terminates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<i16>,
}

impl Board {
    /// Builds a board from raw cell values, checking that they fill the grid exactly.
    pub fn from_cells(width: usize, height: usize, cells: Vec<i16>) -> anyhow::Result<Self> {
        if width == 0 || height == 0 {
            anyhow::bail!("board_empty");
        }
        let Some(size) = width.checked_mul(height) else {
            anyhow::bail!("board_too_large: {} x {}", width, height);
        };
        if cells.len() != size {
            anyhow::bail!(
                "board_size_mismatch: expected {} cells, got {}",
                size,
                cells.len()
            );
        }
        Ok(Board {
            width,
            height,
            cells,
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw value at `position`, or `None` when the position is off the board.
    pub fn get(&self, position: usize) -> Option<i16> {
        self.cells.get(position).copied()
    }

    pub fn cell(&self, position: usize) -> Option<Cell> {
        self.get(position).map(Cell::from)
    }

    /// True when `position` is on the board and holds a tile.
    pub fn is_tile(&self, position: usize) -> bool {
        self.get(position).is_some_and(|v| v > EMPTY)
    }

    /// Number of cells still holding a tile.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v > EMPTY).count()
    }

    /// Returns a copy of this board with both positions cleared to empty space.
    pub fn with_removed(&self, a: usize, b: usize) -> Board {
        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, &v)| if i == a || i == b { EMPTY } else { v })
            .collect();
        Board {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    // --- Geometry (row-major) ---

    pub fn x(&self, position: usize) -> usize {
        position % self.width
    }

    pub fn y(&self, position: usize) -> usize {
        position / self.width
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    /// Distance from `position` to the nearest edge of the grid.
    /// Zero is the wall ring, one is the empty margin.
    pub fn edge_distance(&self, position: usize) -> usize {
        let (x, y) = (self.x(position), self.y(position));
        x.min(y)
            .min(self.width - 1 - x)
            .min(self.height - 1 - y)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &value in row {
                match Cell::from(value) {
                    Cell::Wall => write!(f, " # ")?,
                    Cell::Empty => write!(f, " . ")?,
                    Cell::Tile(id) => write!(f, "{:^3}", id)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One of the two coordinate framings used by the path check.
///
/// `Row` reads positions as (U, V) = (x, y); `Column` swaps them to (y, x), so the
/// same routine checks paths that run mainly along a row or mainly along a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Row, Axis::Column];

    pub fn u(self, board: &Board, position: usize) -> usize {
        match self {
            Axis::Row => board.x(position),
            Axis::Column => board.y(position),
        }
    }

    pub fn v(self, board: &Board, position: usize) -> usize {
        match self {
            Axis::Row => board.y(position),
            Axis::Column => board.x(position),
        }
    }

    pub fn index(self, board: &Board, u: usize, v: usize) -> usize {
        match self {
            Axis::Row => board.index(u, v),
            Axis::Column => board.index(v, u),
        }
    }

    /// Number of distinct U coordinates under this framing.
    pub fn u_len(self, board: &Board) -> usize {
        match self {
            Axis::Row => board.width,
            Axis::Column => board.height,
        }
    }
}

#[cfg(test)]
impl Board {
    /// Builds a board from rows of characters: `#` wall, `.` empty, digits are tiles.
    pub(crate) fn from_rows(rows: &[&str]) -> Board {
        let width = rows[0].len();
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| match c {
                '#' => WALL,
                '.' => EMPTY,
                d => d.to_digit(10).expect("tile digit") as i16,
            })
            .collect();
        Board::from_cells(width, rows.len(), cells).unwrap()
    }
}
