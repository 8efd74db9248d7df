use serde::{Deserialize, Serialize};

use super::{piece::ActivePiece, tetromino::PieceColor};

/// Default board width in cells.
pub const BOARD_WIDTH: usize = 10;
/// Default board height in cells.
pub const BOARD_HEIGHT: usize = 20;

/// A single cell of the board.
///
/// Cells are plain values compared by content; a filled cell remembers only
/// the color of the piece that locked into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Cell {
    /// No block in this cell.
    #[default]
    Empty,
    /// A locked block of the given color.
    Filled(PieceColor),
}

impl Cell {
    #[must_use]
    pub fn is_filled(self) -> bool {
        self != Cell::Empty
    }

    /// Returns the cell's color, or `None` for an empty cell.
    #[must_use]
    pub fn color(self) -> Option<PieceColor> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

/// The playfield: a fixed-size grid of [`Cell`]s.
///
/// Dimensions are set at construction and never change. All accessors are
/// total: out-of-range reads return [`Cell::Empty`] and out-of-range writes
/// are no-ops, so callers never deal with bounds errors.
///
/// Rows above the visible grid (`y < 0`) are treated as empty, open space -
/// a piece may occupy them while spawning or rotating, but nothing is ever
/// stored there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board with the standard 10×20 dimensions.
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Creates an empty board with custom dimensions.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn with_size(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be non-zero");
        Self {
            width,
            height,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        #[expect(clippy::cast_sign_loss)]
        let inside = x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height;
        inside
    }

    /// Returns the cell at `(x, y)`, or [`Cell::Empty`] when out of range.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if self.in_bounds(x, y) {
            #[expect(clippy::cast_sign_loss)]
            let cell = self.rows[y as usize][x as usize];
            cell
        } else {
            Cell::Empty
        }
    }

    /// Writes a cell at `(x, y)`. Out-of-range writes are silently dropped.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if self.in_bounds(x, y) {
            #[expect(clippy::cast_sign_loss)]
            let (col, row) = (x as usize, y as usize);
            self.rows[row][col] = cell;
        }
    }

    /// Returns the locked rows, top to bottom, for rendering.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Checks whether every occupied cell of the piece is unobstructed.
    ///
    /// Side and bottom walls are hard bounds. Cells above the visible board
    /// (`y < 0`) are allowed as long as their column is in range, so a piece
    /// may spawn or rotate partly above the top edge.
    #[must_use]
    pub fn can_place(&self, piece: &ActivePiece) -> bool {
        #[expect(clippy::cast_possible_wrap)]
        let (width, height) = (self.width as i32, self.height as i32);
        for (x, y) in piece.occupied_cells() {
            if x < 0 || x >= width || y >= height {
                return false;
            }
            if y >= 0 && self.cell(x, y).is_filled() {
                return false;
            }
        }
        true
    }

    /// Locks the piece's occupied cells into the grid with its color.
    ///
    /// Occupied cells that fall outside the grid are silently dropped.
    pub fn lock(&mut self, piece: &ActivePiece) {
        let color = piece.color();
        for (x, y) in piece.occupied_cells() {
            self.set(x, y, Cell::Filled(color));
        }
    }

    /// True iff a freshly spawned piece already collides at its position.
    #[must_use]
    pub fn is_game_over(&self, piece: &ActivePiece) -> bool {
        !self.can_place(piece)
    }

    /// Removes every complete row in one pass and returns how many.
    ///
    /// All complete rows are removed simultaneously; the remaining rows keep
    /// their relative order and that many empty rows appear at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..self.height).rev() {
            if self.rows[y].iter().all(|cell| cell.is_filled()) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows.swap(y, y + count);
            }
        }
        for row in &mut self.rows[..count] {
            row.fill(Cell::Empty);
        }
        count
    }

    /// Clears every cell. Dimensions are unchanged.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Empty);
        }
    }

    /// Returns a composite grid of locked cells with the active piece
    /// overlaid, for rendering. The board itself is not modified.
    #[must_use]
    pub fn merged_view(&self, piece: &ActivePiece) -> Vec<Vec<Cell>> {
        let mut merged = self.rows.clone();
        let color = piece.color();
        for (x, y) in piece.occupied_cells() {
            if self.in_bounds(x, y) {
                #[expect(clippy::cast_sign_loss)]
                let (col, row) = (x as usize, y as usize);
                merged[row][col] = Cell::Filled(color);
            }
        }
        merged
    }

    /// Builds a board from ASCII art for tests and fixtures.
    ///
    /// `'#'` marks a filled cell (cyan), `'.'` an empty one. Rows are given
    /// top to bottom; missing rows at the bottom stay empty.
    ///
    /// # Panics
    ///
    /// Panics if a row's cell count does not match the board width, or if
    /// there are more rows than the board height.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut board = Self::new();
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(lines.len() <= board.height, "too many rows for the board");

        for (y, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                cells.len(),
                board.width,
                "each row must have exactly {} cells, got {} at row {y}",
                board.width,
                cells.len(),
            );
            for (x, &ch) in cells.iter().enumerate() {
                if ch == '#' {
                    board.rows[y][x] = Cell::Filled(PieceColor::Cyan);
                }
            }
        }
        board
    }
}
