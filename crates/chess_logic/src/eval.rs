//! Material and piece-square evaluation, maintained incrementally.
//!
//! Tables follow the "simplified evaluation function" values. The
//! piece-square tables are stored from Black's point of view; White squares
//! are mirrored through `flip_horizontal` before lookup. The running estimate
//! is always from White's point of view.

use crate::types::{flip_horizontal, Color, Piece, PieceType, Score, Square, Turn};

/// Piece values indexed by `PieceType::idx()`. The king outweighs every other
/// piece combined so its loss is never an acceptable trade.
pub const PIECE_VALUES: [Score; 6] = [
    20_000, // king
    900,    // queen
    330,    // bishop
    320,    // knight
    500,    // rook
    100,    // pawn
];

/// Piece-square tables indexed by `PieceType::idx()`, then by square from
/// Black's point of view.
pub const PIECE_SQUARE_TABLE: [[Score; 64]; 6] = [
    // King
    [
        -30, -40, -40, -50, -50, -40, -40, -30, //
        -30, -40, -40, -50, -50, -40, -40, -30, //
        -30, -40, -40, -50, -50, -40, -40, -30, //
        -30, -40, -40, -50, -50, -40, -40, -30, //
        -20, -30, -30, -40, -40, -30, -30, -20, //
        -10, -20, -20, -20, -20, -20, -20, -10, //
        20, 20, 0, 0, 0, 0, 20, 20, //
        20, 30, 10, 0, 0, 10, 30, 20,
    ],
    // Queen
    [
        -20, -10, -10, -5, -5, -10, -10, -20, //
        -10, 0, 0, 0, 0, 0, 0, -10, //
        -10, 0, 5, 5, 5, 5, 0, -10, //
        -5, 0, 5, 5, 5, 5, 0, -5, //
        0, 0, 5, 5, 5, 5, 0, -5, //
        -10, 5, 5, 5, 5, 5, 0, -10, //
        -10, 0, 5, 0, 0, 0, 0, -10, //
        -20, -10, -10, -5, -5, -10, -10, -20,
    ],
    // Bishop
    [
        -20, -10, -10, -10, -10, -10, -10, -20, //
        -10, 0, 0, 0, 0, 0, 0, -10, //
        -10, 0, 5, 10, 10, 5, 0, -10, //
        -10, 5, 5, 10, 10, 5, 5, -10, //
        -10, 0, 10, 10, 10, 10, 0, -10, //
        -10, 10, 10, 10, 10, 10, 10, -10, //
        -10, 5, 0, 0, 0, 0, 5, -10, //
        -20, -10, -10, -10, -10, -10, -10, -20,
    ],
    // Knight
    [
        -50, -40, -30, -30, -30, -30, -40, -50, //
        -40, -20, 0, 0, 0, 0, -20, -40, //
        -30, 0, 10, 15, 15, 10, 0, -30, //
        -30, 5, 15, 20, 20, 15, 5, -30, //
        -30, 0, 15, 20, 20, 15, 0, -30, //
        -30, 5, 10, 15, 15, 10, 5, -30, //
        -40, -20, 0, 5, 5, 0, -20, -40, //
        -50, -40, -30, -30, -30, -30, -40, -50,
    ],
    // Rook
    [
        0, 0, 0, 0, 0, 0, 0, 0, //
        5, 10, 10, 10, 10, 10, 10, 5, //
        -5, 0, 0, 0, 0, 0, 0, -5, //
        -5, 0, 0, 0, 0, 0, 0, -5, //
        -5, 0, 0, 0, 0, 0, 0, -5, //
        -5, 0, 0, 0, 0, 0, 0, -5, //
        -5, 0, 0, 0, 0, 0, 0, -5, //
        0, 0, 0, 5, 5, 0, 0, 0,
    ],
    // Pawn
    [
        0, 0, 0, 0, 0, 0, 0, 0, //
        50, 50, 50, 50, 50, 50, 50, 50, //
        10, 10, 20, 30, 30, 20, 10, 10, //
        5, 5, 10, 25, 25, 10, 5, 5, //
        0, 0, 0, 20, 20, 0, 0, 0, //
        5, -5, -10, 0, 0, -10, -5, 5, //
        5, 10, 10, -20, -20, 10, 10, 5, //
        0, 0, 0, 0, 0, 0, 0, 0,
    ],
];

#[inline(always)]
fn pst(kind: PieceType, color: Color, sq: Square) -> Score {
    let psq = match color {
        Color::Black => sq,
        Color::White => flip_horizontal(sq),
    };
    PIECE_SQUARE_TABLE[kind.idx()][psq as usize]
}

/// Running material + piece-square estimate, white-POV.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IncrementalEvaluator {
    estimated_score: Score,
}

impl IncrementalEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from scratch over the given piece placement.
    pub fn full_estimate<I>(pieces: I) -> Score
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        let mut score = 0;
        for (sq, piece) in pieces {
            let worth = PIECE_VALUES[piece.kind.idx()] + pst(piece.kind, piece.color, sq);
            match piece.color {
                Color::White => score += worth,
                Color::Black => score -= worth,
            }
        }
        score
    }

    pub fn from_pieces<I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        Self {
            estimated_score: Self::full_estimate(pieces),
        }
    }

    /// A piece left `turn.from` and arrived on `turn.to`. Material is
    /// unaffected, only the square bias changes.
    pub fn on_move(&mut self, turn: &Turn) {
        let delta = pst(turn.piece.kind, turn.piece.color, turn.to)
            - pst(turn.piece.kind, turn.piece.color, turn.from);
        match turn.piece.color {
            Color::White => self.estimated_score += delta,
            Color::Black => self.estimated_score -= delta,
        }
    }

    /// `piece` was captured on `sq`.
    pub fn on_capture(&mut self, sq: Square, piece: Piece) {
        let worth = PIECE_VALUES[piece.kind.idx()] + pst(piece.kind, piece.color, sq);
        match piece.color {
            Color::White => self.estimated_score -= worth,
            Color::Black => self.estimated_score += worth,
        }
    }

    /// The pawn on `turn.to` became `target`. Called after `on_move`, so the
    /// pawn's square bias for `to` is already in the estimate.
    pub fn on_promotion(&mut self, turn: &Turn, target: PieceType) {
        let pawn_worth =
            PIECE_VALUES[PieceType::Pawn.idx()] + pst(PieceType::Pawn, turn.piece.color, turn.to);
        let target_worth = PIECE_VALUES[target.idx()] + pst(target, turn.piece.color, turn.to);
        match turn.piece.color {
            Color::White => self.estimated_score += target_worth - pawn_worth,
            Color::Black => self.estimated_score -= target_worth - pawn_worth,
        }
    }

    #[inline(always)]
    pub fn score(&self, color: Color) -> Score {
        match color {
            Color::White => self.estimated_score,
            Color::Black => -self.estimated_score,
        }
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
