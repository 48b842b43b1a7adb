//! Immutable square-cell grid: classification, bounds checks, and the
//! textual format used by tests and demo call sites.

use crate::error::GridError;

/// A cell position, `(row, col)`, with row 0 at the bottom of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Classification of a single grid cell.
///
/// Permanent and temporary obstacles are both impassable for planning
/// purposes; the distinction is informational only (e.g. for display).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Free,
    PermanentObstacle,
    TemporaryObstacle,
}

impl CellKind {
    fn from_symbol(ch: char) -> Self {
        match ch {
            '.' => CellKind::Free,
            '+' => CellKind::TemporaryObstacle,
            // '#' and anything else unrecognised are both impassable.
            _ => CellKind::PermanentObstacle,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, CellKind::Free)
    }
}

/// An immutable `H x W` grid, classified into free cells and obstacles.
///
/// The grid is a snapshot: nothing in the planning stack mutates it after
/// construction.
#[derive(Debug, Clone)]
pub struct Grid {
    height: u32,
    width: u32,
    // Row-major; index = row * width + col.
    cells: Vec<CellKind>,
}

impl Grid {
    /// Build a grid from an explicit row-major cell classification.
    pub fn new(height: u32, width: u32, cells: Vec<CellKind>) -> Self {
        assert_eq!(
            cells.len(),
            (height as usize) * (width as usize),
            "cell data does not match height * width"
        );
        Self { height, width, cells }
    }

    /// Build a fully free `H x W` grid.
    pub fn empty(height: u32, width: u32) -> Self {
        Self::new(height, width, vec![CellKind::Free; (height as usize) * (width as usize)])
    }

    /// Parse a grid from its textual form: one line per row, `.` for free,
    /// `#` for a permanent obstacle, `+` for a temporary obstacle. Row 0 of
    /// the grid is the *last* line of input, matching this spec's
    /// bottom-left-origin coordinate convention.
    pub fn parse(input: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = input.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.is_empty() {
            return Err(GridError::MissingHeader("rows"));
        }

        let width = lines[0].chars().count() as u32;
        let height = lines.len() as u32;

        let mut cells = vec![CellKind::Free; (height as usize) * (width as usize)];
        for (line_from_top, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() as u32 != width {
                return Err(GridError::RowWidthMismatch {
                    row: line_from_top as u32,
                    expected: width,
                    got: chars.len() as u32,
                });
            }
            // Input is given top-to-bottom; row 0 is the bottom row.
            let row = height - 1 - line_from_top as u32;
            for (col, ch) in chars.into_iter().enumerate() {
                cells[(row * width + col as u32) as usize] = CellKind::from_symbol(ch);
            }
        }

        Ok(Self { height, width, cells })
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Classification of `cell`, or `None` if out of bounds.
    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(self.cells[(cell.row * self.width + cell.col) as usize])
    }

    /// Whether `cell` is in bounds and free of any obstacle.
    pub fn is_open(&self, cell: Cell) -> bool {
        self.kind(cell).map(CellKind::is_open).unwrap_or(false)
    }

    /// The four axis-aligned open neighbours of `cell`, in a stable
    /// North/South/West/East order.
    pub fn open_neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        const DELTAS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];
        DELTAS.iter().filter_map(move |&(dr, dc)| {
            let row = cell.row as i64 + dr;
            let col = cell.col as i64 + dc;
            if row < 0 || col < 0 {
                return None;
            }
            let neighbour = Cell::new(row as u32, col as u32);
            self.is_open(neighbour).then_some(neighbour)
        })
    }

    /// World-space centre of `cell`, given a square cell side length `s`:
    /// `((col+0.5)*s, (row+0.5)*s)`.
    pub fn cell_center(&self, cell: Cell, cell_side: f64) -> (f64, f64) {
        (
            (cell.col as f64 + 0.5) * cell_side,
            (cell.row as f64 + 0.5) * cell_side,
        )
    }
}

/// True iff `a` and `b` are 4-connected neighbours (exactly one axis
/// differs by exactly one).
pub fn is_adjacent(a: Cell, b: Cell) -> bool {
    let dr = (a.row as i64 - b.row as i64).abs();
    let dc = (a.col as i64 - b.col as i64).abs();
    (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
}
