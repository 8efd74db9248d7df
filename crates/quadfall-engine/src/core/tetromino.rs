use serde::{Deserialize, Serialize};

/// Board column where every piece's 4×4 bounding box spawns.
///
/// The box is 4 cells wide on a 10-cell board, so column 3 centers it.
pub const SPAWN_X: i32 = 3;
/// Board row where every piece's 4×4 bounding box spawns.
pub const SPAWN_Y: i32 = 0;

/// Occupancy of a piece within its 4×4 bounding box.
///
/// Indexed as `mask[row][col]`, row 0 at the top. `true` means the cell is
/// part of the piece.
pub type BlockMask = [[bool; 4]; 4];

/// Enum representing the type of tetromino.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum TetrominoKind {
    /// I-piece: four cells in a line.
    I = 0,
    /// O-piece: static 2×2 square.
    O = 1,
    /// T-piece: three in a row with a center stem.
    T = 2,
    /// S-piece: right-leaning zigzag.
    S = 3,
    /// Z-piece: left-leaning zigzag.
    Z = 4,
    /// J-piece: L-piece mirrored.
    J = 5,
    /// L-piece.
    L = 6,
}

/// Display color of a piece and of the cells it locks into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PieceColor {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl TetrominoKind {
    /// Number of piece types (7).
    pub const COUNT: usize = 7;

    /// All piece types, in catalog order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::I,
        Self::O,
        Self::T,
        Self::S,
        Self::Z,
        Self::J,
        Self::L,
    ];

    /// Returns the occupancy mask for this piece at the given rotation.
    ///
    /// The rotation index is normalized into `[0, 4)`, so any integer
    /// (including negatives) is a valid input.
    #[must_use]
    pub fn blocks(self, rotation: i32) -> BlockMask {
        #[expect(clippy::cast_sign_loss)]
        let r = rotation.rem_euclid(4) as usize;
        MASKS[self as usize][r]
    }

    /// Returns the fixed color of this piece type.
    #[must_use]
    pub const fn color(self) -> PieceColor {
        match self {
            TetrominoKind::I => PieceColor::Cyan,
            TetrominoKind::O => PieceColor::Yellow,
            TetrominoKind::T => PieceColor::Purple,
            TetrominoKind::S => PieceColor::Green,
            TetrominoKind::Z => PieceColor::Red,
            TetrominoKind::J => PieceColor::Blue,
            TetrominoKind::L => PieceColor::Orange,
        }
    }

    /// Returns the board position where this piece's bounding box spawns.
    ///
    /// Every type spawns at the same spot; kept per-type so the catalog stays
    /// the single authority on spawn placement.
    #[must_use]
    pub const fn spawn_position(self) -> (i32, i32) {
        (SPAWN_X, SPAWN_Y)
    }

    /// Returns the single character representation of this piece type.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            TetrominoKind::I => 'I',
            TetrominoKind::O => 'O',
            TetrominoKind::T => 'T',
            TetrominoKind::S => 'S',
            TetrominoKind::Z => 'Z',
            TetrominoKind::J => 'J',
            TetrominoKind::L => 'L',
        }
    }

    /// Parses a piece type from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(TetrominoKind::I),
            'O' => Some(TetrominoKind::O),
            'T' => Some(TetrominoKind::T),
            'S' => Some(TetrominoKind::S),
            'Z' => Some(TetrominoKind::Z),
            'J' => Some(TetrominoKind::J),
            'L' => Some(TetrominoKind::L),
            _ => None,
        }
    }
}

// The masks are authored per orientation rather than derived by rotating a
// base shape: I, S and Z alternate between two states, O has a single state,
// and the four-state pieces pivot inside a 3×3 region of the box. Indexed by
// kind, then rotation.
const MASKS: [[BlockMask; 4]; TetrominoKind::COUNT] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];

    const fn one_state(a: BlockMask) -> [BlockMask; 4] {
        [a, a, a, a]
    }
    const fn two_state(a: BlockMask, b: BlockMask) -> [BlockMask; 4] {
        [a, b, a, b]
    }

    [
        // I: horizontal bar, vertical bar
        two_state(
            [EEEE, [C, C, C, C], EEEE, EEEE],
            [[E, E, C, E], [E, E, C, E], [E, E, C, E], [E, E, C, E]],
        ),
        // O: centered 2×2, rotation is a no-op
        one_state([EEEE, [E, C, C, E], [E, C, C, E], EEEE]),
        // T: stem points down, left, up, right as rotation advances
        [
            [EEEE, [C, C, C, E], [E, C, E, E], EEEE],
            [[E, C, E, E], [C, C, E, E], [E, C, E, E], EEEE],
            [[E, C, E, E], [C, C, C, E], EEEE, EEEE],
            [[E, C, E, E], [E, C, C, E], [E, C, E, E], EEEE],
        ],
        // S: two zigzag states
        two_state(
            [EEEE, [E, C, C, E], [C, C, E, E], EEEE],
            [[E, C, E, E], [E, C, C, E], [E, E, C, E], EEEE],
        ),
        // Z: mirror of S
        two_state(
            [EEEE, [C, C, E, E], [E, C, C, E], EEEE],
            [[E, E, C, E], [E, C, C, E], [E, C, E, E], EEEE],
        ),
        // J
        [
            [EEEE, [C, C, C, E], [E, E, C, E], EEEE],
            [[E, C, E, E], [E, C, E, E], [C, C, E, E], EEEE],
            [[C, E, E, E], [C, C, C, E], EEEE, EEEE],
            [[E, C, C, E], [E, C, E, E], [E, C, E, E], EEEE],
        ],
        // L
        [
            [EEEE, [C, C, C, E], [C, E, E, E], EEEE],
            [[C, C, E, E], [E, C, E, E], [E, C, E, E], EEEE],
            [[E, E, C, E], [C, C, C, E], EEEE, EEEE],
            [[E, C, E, E], [E, C, E, E], [E, C, C, E], EEEE],
        ],
    ]
};
