use super::tetromino::{BlockMask, PieceColor, TetrominoKind};

/// The falling piece: a tetromino type plus its position and rotation.
///
/// `(x, y)` is the top-left corner of the piece's 4×4 bounding box in board
/// coordinates; the box may hang over the board edges as long as every
/// occupied cell stays legal (the [`Board`](super::board::Board) decides
/// that, not this type).
///
/// Pieces are immutable values - [`moved`](Self::moved) and
/// [`rotated`](Self::rotated) return new instances without checking
/// legality, which lets callers build a trial piece, test it against the
/// board, and discard it on rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    kind: TetrominoKind,
    x: i32,
    y: i32,
    rotation: i32,
}

impl ActivePiece {
    /// Creates a piece at an arbitrary position and rotation.
    #[must_use]
    pub const fn new(kind: TetrominoKind, x: i32, y: i32, rotation: i32) -> Self {
        Self {
            kind,
            x,
            y,
            rotation,
        }
    }

    /// Creates a piece at its catalog spawn position, rotation 0.
    #[must_use]
    pub const fn spawn(kind: TetrominoKind) -> Self {
        let (x, y) = kind.spawn_position();
        Self::new(kind, x, y, 0)
    }

    #[must_use]
    pub const fn kind(&self) -> TetrominoKind {
        self.kind
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Raw rotation index. May be any integer; the catalog normalizes it
    /// modulo 4 when looking up the mask.
    #[must_use]
    pub const fn rotation(&self) -> i32 {
        self.rotation
    }

    /// Returns the occupancy mask for the piece's current rotation.
    #[must_use]
    pub fn blocks(&self) -> BlockMask {
        self.kind.blocks(self.rotation)
    }

    #[must_use]
    pub const fn color(&self) -> PieceColor {
        self.kind.color()
    }

    /// Returns a copy of this piece translated by `(dx, dy)`.
    #[must_use]
    pub const fn moved(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.kind, self.x + dx, self.y + dy, self.rotation)
    }

    /// Returns a copy of this piece rotated one step.
    #[must_use]
    pub const fn rotated(&self, clockwise: bool) -> Self {
        let rotation = if clockwise {
            self.rotation + 1
        } else {
            self.rotation - 1
        };
        Self::new(self.kind, self.x, self.y, rotation)
    }

    /// Iterates over the occupied cells in board coordinates.
    ///
    /// Cells may lie outside the board (negative coordinates included); the
    /// board's accessors decide what that means.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let mask = self.blocks();
        let (x, y) = (self.x, self.y);
        (0..4i32).flat_map(move |row| {
            (0..4i32).filter_map(move |col| {
                #[expect(clippy::cast_sign_loss)]
                let occupied = mask[row as usize][col as usize];
                occupied.then_some((x + col, y + row))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moved_returns_translated_copy() {
        let piece = ActivePiece::spawn(TetrominoKind::T);
        let moved = piece.moved(-1, 2);
        assert_eq!(moved.x(), piece.x() - 1);
        assert_eq!(moved.y(), piece.y() + 2);
        assert_eq!(moved.rotation(), piece.rotation());
        assert_eq!(moved.kind(), piece.kind());
        // original unchanged
        assert_eq!(piece, ActivePiece::spawn(TetrominoKind::T));
    }

    #[test]
    fn rotation_four_times_restores_the_mask() {
        for kind in TetrominoKind::ALL {
            let piece = ActivePiece::spawn(kind);
            let mut rotated = piece;
            for _ in 0..4 {
                rotated = rotated.rotated(true);
            }
            assert_eq!(rotated.rotation().rem_euclid(4), piece.rotation());
            assert_eq!(rotated.blocks(), piece.blocks());
        }
    }

    #[test]
    fn counterclockwise_rotation_goes_negative_but_masks_match() {
        let piece = ActivePiece::spawn(TetrominoKind::J).rotated(false);
        assert_eq!(piece.rotation(), -1);
        assert_eq!(piece.blocks(), TetrominoKind::J.blocks(3));
    }

    #[test]
    fn occupied_cells_of_spawned_i_piece() {
        // Horizontal I at spawn: mask row 1, cols 0-3, translated by (3, 0).
        let piece = ActivePiece::spawn(TetrominoKind::I);
        let cells: Vec<_> = piece.occupied_cells().collect();
        assert_eq!(cells, vec![(3, 1), (4, 1), (5, 1), (6, 1)]);
    }

    #[test]
    fn occupied_cells_can_be_negative() {
        let piece = ActivePiece::new(TetrominoKind::I, -1, -2, 0);
        let cells: Vec<_> = piece.occupied_cells().collect();
        assert_eq!(cells, vec![(-1, -1), (0, -1), (1, -1), (2, -1)]);
    }
}
