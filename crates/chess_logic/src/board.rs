//! Position state: per-piece bitboards, castle rights, en passant, clocks,
//! game-end flags, and the incrementally maintained evaluation and Zobrist
//! hash. The board is a plain value type; search copies it instead of
//! unmaking moves.

use std::fmt;

use thiserror::Error;

use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::eval::IncrementalEvaluator;
use crate::types::{
    file_of, rank_of, square_at, square_from_name, square_name, Action, Color, Piece, PieceType,
    Score, Square, Turn, LOSE_SCORE, WIN_SCORE,
};
use crate::zobrist::{
    CASTLE_BLACK_LONG, CASTLE_BLACK_SHORT, CASTLE_WHITE_LONG, CASTLE_WHITE_SHORT, ZOBRIST,
};

/// Index of the per-color union board in `bb`.
pub(crate) const ALL_PIECES: usize = 6;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, got {0}")]
    MissingFields(usize),
    #[error("malformed piece placement: {0}")]
    BadPlacement(String),
    #[error("invalid piece character '{0}'")]
    BadPiece(char),
    #[error("invalid active color '{0}'")]
    BadActiveColor(String),
    #[error("invalid castling character '{0}'")]
    BadCastling(char),
    #[error("invalid en passant square '{0}'")]
    BadEnPassant(String),
    #[error("invalid clock value '{0}'")]
    BadClock(String),
}

#[derive(Clone, Debug)]
pub struct ChessBoard {
    /// Occupancy per color and piece type, plus the all-pieces union at
    /// index `ALL_PIECES`. The union is rebuilt after every mutation.
    pub(crate) bb: [[Bitboard; 7]; 2],
    pub(crate) short_castle_right: [bool; 2],
    pub(crate) long_castle_right: [bool; 2],
    pub(crate) en_passant_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    next_player: Color,
    king_in_check: [bool; 2],
    checkmate: [bool; 2],
    stalemate: bool,
    forfeited_by: Option<Color>,
    last_captured: Option<Piece>,
    evaluator: IncrementalEvaluator,
    hash: u64,
}

impl ChessBoard {
    /// Standard opening position.
    pub fn new() -> Self {
        let w = Color::White.idx();
        let b = Color::Black.idx();
        let mut bb = [[Bitboard::EMPTY; 7]; 2];

        bb[w][PieceType::King.idx()] = Bitboard::from_square(4);
        bb[w][PieceType::Queen.idx()] = Bitboard::from_square(3);
        bb[w][PieceType::Bishop.idx()] = Bitboard::from_square(2) | Bitboard::from_square(5);
        bb[w][PieceType::Knight.idx()] = Bitboard::from_square(1) | Bitboard::from_square(6);
        bb[w][PieceType::Rook.idx()] = Bitboard::from_square(0) | Bitboard::from_square(7);
        bb[w][PieceType::Pawn.idx()] = Bitboard::RANK_2;

        bb[b][PieceType::King.idx()] = Bitboard::from_square(60);
        bb[b][PieceType::Queen.idx()] = Bitboard::from_square(59);
        bb[b][PieceType::Bishop.idx()] = Bitboard::from_square(58) | Bitboard::from_square(61);
        bb[b][PieceType::Knight.idx()] = Bitboard::from_square(57) | Bitboard::from_square(62);
        bb[b][PieceType::Rook.idx()] = Bitboard::from_square(56) | Bitboard::from_square(63);
        bb[b][PieceType::Pawn.idx()] = Bitboard::RANK_7;

        let mut board = ChessBoard {
            bb,
            short_castle_right: [true; 2],
            long_castle_right: [true; 2],
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            next_player: Color::White,
            king_in_check: [false; 2],
            checkmate: [false; 2],
            stalemate: false,
            forfeited_by: None,
            last_captured: None,
            evaluator: IncrementalEvaluator::new(),
            hash: 0,
        };
        board.rebuild_unions();
        board.evaluator = IncrementalEvaluator::from_pieces(board.piece_list());
        board.hash = board.compute_hash();
        board
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let mut bb = [[Bitboard::EMPTY; 7]; 2];
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadPlacement(parts[0].to_string()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // FEN lists rank 8 first
            let mut file = 0u8;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as u8;
                } else {
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'k' => PieceType::King,
                        'q' => PieceType::Queen,
                        'b' => PieceType::Bishop,
                        'n' => PieceType::Knight,
                        'r' => PieceType::Rook,
                        'p' => PieceType::Pawn,
                        _ => return Err(FenError::BadPiece(ch)),
                    };
                    if file > 7 {
                        return Err(FenError::BadPlacement(rank_str.to_string()));
                    }
                    bb[color.idx()][kind.idx()].set(square_at(file, rank));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::BadPlacement(rank_str.to_string()));
                }
            }
            if file != 8 {
                return Err(FenError::BadPlacement(rank_str.to_string()));
            }
        }

        let next_player = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadActiveColor(other.to_string())),
        };

        let mut short_castle_right = [false; 2];
        let mut long_castle_right = [false; 2];
        if parts[2] != "-" {
            for ch in parts[2].chars() {
                match ch {
                    'K' => short_castle_right[Color::White.idx()] = true,
                    'Q' => long_castle_right[Color::White.idx()] = true,
                    'k' => short_castle_right[Color::Black.idx()] = true,
                    'q' => long_castle_right[Color::Black.idx()] = true,
                    _ => return Err(FenError::BadCastling(ch)),
                }
            }
        }

        let en_passant_square = if parts[3] == "-" {
            None
        } else {
            Some(square_from_name(parts[3]).ok_or_else(|| {
                FenError::BadEnPassant(parts[3].to_string())
            })?)
        };

        let halfmove_str = parts.get(4).copied().unwrap_or("0");
        let halfmove_clock: u32 = halfmove_str
            .parse()
            .map_err(|_| FenError::BadClock(halfmove_str.to_string()))?;
        let fullmove_str = parts.get(5).copied().unwrap_or("1");
        let fullmove_number: u32 = fullmove_str
            .parse()
            .map_err(|_| FenError::BadClock(fullmove_str.to_string()))?;

        let mut board = ChessBoard {
            bb,
            short_castle_right,
            long_castle_right,
            en_passant_square,
            halfmove_clock,
            fullmove_number,
            next_player,
            king_in_check: [false; 2],
            checkmate: [false; 2],
            stalemate: false,
            forfeited_by: None,
            last_captured: None,
            evaluator: IncrementalEvaluator::new(),
            hash: 0,
        };
        board.rebuild_unions();
        board.evaluator = IncrementalEvaluator::from_pieces(board.piece_list());
        board.hash = board.compute_hash();
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(square_at(file, rank)) {
                    None => empty += 1,
                    Some(piece) => {
                        if empty > 0 {
                            fen.push(char::from_digit(empty, 10).unwrap_or('0'));
                            empty = 0;
                        }
                        let letter = piece.kind.letter();
                        fen.push(match piece.color {
                            Color::White => letter,
                            Color::Black => letter.to_ascii_lowercase(),
                        });
                    }
                }
            }
            if empty > 0 {
                fen.push(char::from_digit(empty, 10).unwrap_or('0'));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.next_player {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let mut any_right = false;
        if self.short_castle_right[Color::White.idx()] {
            fen.push('K');
            any_right = true;
        }
        if self.long_castle_right[Color::White.idx()] {
            fen.push('Q');
            any_right = true;
        }
        if self.short_castle_right[Color::Black.idx()] {
            fen.push('k');
            any_right = true;
        }
        if self.long_castle_right[Color::Black.idx()] {
            fen.push('q');
            any_right = true;
        }
        if !any_right {
            fen.push('-');
        }

        fen.push(' ');
        match self.en_passant_square {
            Some(sq) => fen.push_str(&square_name(sq)),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }

    /// Execute a turn. The turn must come from the current legal turn list;
    /// anything else is a caller bug and the board state becomes unspecified.
    pub fn apply(&mut self, turn: Turn) {
        self.last_captured = None;

        match turn.action {
            Action::Forfeit => {
                self.forfeited_by = Some(turn.piece.color);
                return;
            }
            Action::Pass => {
                self.set_en_passant(None);
                self.halfmove_clock += 1;
                if self.next_player == Color::Black {
                    self.fullmove_number += 1;
                }
                self.flip_side();
                return;
            }
            _ => {}
        }

        let mover = turn.piece.color;
        let opp = mover.other();

        // Find the victim, if any. An en-passant victim sits behind the
        // target square, not on it.
        let mut captured: Option<(Square, Piece)> = None;
        if let Some(target) = self.colored_piece_at(opp, turn.to) {
            captured = Some((turn.to, target));
        } else if turn.piece.kind == PieceType::Pawn
            && self.en_passant_square == Some(turn.to)
            && file_of(turn.from) != file_of(turn.to)
        {
            let victim_sq = match mover {
                Color::White => turn.to - 8,
                Color::Black => turn.to + 8,
            };
            captured = self
                .colored_piece_at(opp, victim_sq)
                .map(|piece| (victim_sq, piece));
        }

        if let Some((victim_sq, victim)) = captured {
            self.bb[opp.idx()][victim.kind.idx()].clear(victim_sq);
            self.hash ^= ZOBRIST.piece_key(victim, victim_sq);
            self.evaluator.on_capture(victim_sq, victim);
            self.last_captured = Some(victim);
        }

        self.move_piece(turn.piece, turn.from, turn.to);

        if let Some(target) = turn.action.promotion_kind() {
            self.bb[mover.idx()][PieceType::Pawn.idx()].clear(turn.to);
            self.bb[mover.idx()][target.idx()].set(turn.to);
            self.hash ^= ZOBRIST.piece_key(turn.piece, turn.to);
            self.hash ^= ZOBRIST.piece_key(Piece::new(mover, target), turn.to);
            self.evaluator.on_promotion(&turn, target);
        }

        if turn.action == Action::Castle {
            // The rook lands on the square the king crossed.
            let base = match mover {
                Color::White => 0,
                Color::Black => 56,
            };
            let (rook_from, rook_to) = if file_of(turn.to) == 6 {
                (base + 7, base + 5)
            } else {
                (base, base + 3)
            };
            self.move_piece(Piece::new(mover, PieceType::Rook), rook_from, rook_to);
        }

        self.update_castle_rights(&turn, captured);

        let new_ep = if turn.piece.kind == PieceType::Pawn
            && rank_of(turn.from).abs_diff(rank_of(turn.to)) == 2
        {
            Some((turn.from + turn.to) / 2)
        } else {
            None
        };
        self.set_en_passant(new_ep);

        if turn.piece.kind == PieceType::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if mover == Color::Black {
            self.fullmove_number += 1;
        }

        self.flip_side();
        self.rebuild_unions();
    }

    /// Score from `color`'s point of view, with mate/draw overrides. `depth`
    /// shifts terminal scores so nearer wins and later losses rank higher.
    pub fn score(&self, color: Color, depth: usize) -> Score {
        if self.checkmate[color.idx()] {
            return LOSE_SCORE + depth as Score;
        }
        if self.checkmate[color.other().idx()] {
            return WIN_SCORE - depth as Score;
        }
        if self.stalemate || self.is_fifty_move_draw() {
            return 0;
        }
        self.evaluator.score(color)
    }

    /// True iff `by` attacks `sq` under the current occupancy.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        let them = by.idx();
        let occupied = self.occupied();

        // A pawn of `by` attacks `sq` iff a pawn of the other color standing
        // on `sq` would attack the pawn's square.
        if !(pawn_attacks(sq, by.other()) & self.bb[them][PieceType::Pawn.idx()]).is_empty() {
            return true;
        }
        if !(knight_attacks(sq) & self.bb[them][PieceType::Knight.idx()]).is_empty() {
            return true;
        }
        if !(king_attacks(sq) & self.bb[them][PieceType::King.idx()]).is_empty() {
            return true;
        }
        let rooks = self.bb[them][PieceType::Rook.idx()] | self.bb[them][PieceType::Queen.idx()];
        if !(rook_attacks(sq, occupied) & rooks).is_empty() {
            return true;
        }
        let bishops =
            self.bb[them][PieceType::Bishop.idx()] | self.bb[them][PieceType::Queen.idx()];
        !(bishop_attacks(sq, occupied) & bishops).is_empty()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        for color in Color::ALL {
            if let Some(piece) = self.colored_piece_at(color, sq) {
                return Some(piece);
            }
        }
        None
    }

    pub(crate) fn colored_piece_at(&self, color: Color, sq: Square) -> Option<Piece> {
        if !self.bb[color.idx()][ALL_PIECES].contains(sq) {
            return None;
        }
        for kind in PieceType::ALL {
            if self.bb[color.idx()][kind.idx()].contains(sq) {
                return Some(Piece::new(color, kind));
            }
        }
        None
    }

    /// Occupancy of one piece kind of one color.
    #[inline(always)]
    pub fn pieces(&self, color: Color, kind: PieceType) -> Bitboard {
        self.bb[color.idx()][kind.idx()]
    }

    /// Union of all of `color`'s piece boards.
    #[inline(always)]
    pub fn all_pieces(&self, color: Color) -> Bitboard {
        self.bb[color.idx()][ALL_PIECES]
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.bb[0][ALL_PIECES] | self.bb[1][ALL_PIECES]
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.bb[color.idx()][PieceType::King.idx()].msb()
    }

    #[inline(always)]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline(always)]
    pub fn next_player(&self) -> Color {
        self.next_player
    }

    pub fn king_in_check(&self, color: Color) -> bool {
        self.king_in_check[color.idx()]
    }

    pub fn checkmate(&self, color: Color) -> bool {
        self.checkmate[color.idx()]
    }

    pub fn stalemate(&self) -> bool {
        self.stalemate
    }

    pub fn short_castle_rights(&self) -> [bool; 2] {
        self.short_castle_right
    }

    pub fn long_castle_rights(&self) -> [bool; 2] {
        self.long_castle_right
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn last_captured(&self) -> Option<Piece> {
        self.last_captured
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    pub fn is_game_over(&self) -> bool {
        self.checkmate[0]
            || self.checkmate[1]
            || self.stalemate
            || self.is_fifty_move_draw()
            || self.forfeited_by.is_some()
    }

    /// Winning side, `None` while the game runs or on a draw.
    pub fn winner(&self) -> Option<Color> {
        for color in Color::ALL {
            if self.checkmate[color.idx()] || self.forfeited_by == Some(color) {
                return Some(color.other());
            }
        }
        None
    }

    pub(crate) fn set_king_in_check(&mut self, color: Color, value: bool) {
        self.king_in_check[color.idx()] = value;
    }

    pub(crate) fn set_checkmate(&mut self, color: Color, value: bool) {
        self.checkmate[color.idx()] = value;
    }

    pub(crate) fn set_stalemate(&mut self, value: bool) {
        self.stalemate = value;
    }

    /// From-scratch Zobrist hash; the incremental value must always match.
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for (sq, piece) in self.piece_list() {
            hash ^= ZOBRIST.piece_key(piece, sq);
        }
        if self.next_player == Color::Black {
            hash ^= ZOBRIST.black_to_move;
        }
        if self.short_castle_right[Color::White.idx()] {
            hash ^= ZOBRIST.castling_key(CASTLE_WHITE_SHORT);
        }
        if self.long_castle_right[Color::White.idx()] {
            hash ^= ZOBRIST.castling_key(CASTLE_WHITE_LONG);
        }
        if self.short_castle_right[Color::Black.idx()] {
            hash ^= ZOBRIST.castling_key(CASTLE_BLACK_SHORT);
        }
        if self.long_castle_right[Color::Black.idx()] {
            hash ^= ZOBRIST.castling_key(CASTLE_BLACK_LONG);
        }
        if let Some(sq) = self.en_passant_square {
            hash ^= ZOBRIST.ep_key(file_of(sq));
        }
        hash
    }

    /// From-scratch evaluation; the incremental value must always match.
    pub fn full_estimate(&self) -> Score {
        IncrementalEvaluator::full_estimate(self.piece_list())
    }

    pub(crate) fn piece_list(&self) -> Vec<(Square, Piece)> {
        let mut pieces = Vec::with_capacity(32);
        for color in Color::ALL {
            for kind in PieceType::ALL {
                for sq in self.bb[color.idx()][kind.idx()] {
                    pieces.push((sq, Piece::new(color, kind)));
                }
            }
        }
        pieces
    }

    fn move_piece(&mut self, piece: Piece, from: Square, to: Square) {
        self.bb[piece.color.idx()][piece.kind.idx()].clear(from);
        self.bb[piece.color.idx()][piece.kind.idx()].set(to);
        self.hash ^= ZOBRIST.piece_key(piece, from);
        self.hash ^= ZOBRIST.piece_key(piece, to);
        self.evaluator.on_move(&Turn::piece_move(piece, from, to));
    }

    fn update_castle_rights(&mut self, turn: &Turn, captured: Option<(Square, Piece)>) {
        let mover = turn.piece.color;

        if turn.piece.kind == PieceType::King {
            self.clear_short_right(mover);
            self.clear_long_right(mover);
        }
        if turn.piece.kind == PieceType::Rook {
            match (mover, turn.from) {
                (Color::White, 0) => self.clear_long_right(Color::White),
                (Color::White, 7) => self.clear_short_right(Color::White),
                (Color::Black, 56) => self.clear_long_right(Color::Black),
                (Color::Black, 63) => self.clear_short_right(Color::Black),
                _ => {}
            }
        }
        if let Some((victim_sq, victim)) = captured {
            if victim.kind == PieceType::Rook {
                match (victim.color, victim_sq) {
                    (Color::White, 0) => self.clear_long_right(Color::White),
                    (Color::White, 7) => self.clear_short_right(Color::White),
                    (Color::Black, 56) => self.clear_long_right(Color::Black),
                    (Color::Black, 63) => self.clear_short_right(Color::Black),
                    _ => {}
                }
            }
        }
    }

    fn clear_short_right(&mut self, color: Color) {
        if self.short_castle_right[color.idx()] {
            self.short_castle_right[color.idx()] = false;
            let key = match color {
                Color::White => CASTLE_WHITE_SHORT,
                Color::Black => CASTLE_BLACK_SHORT,
            };
            self.hash ^= ZOBRIST.castling_key(key);
        }
    }

    fn clear_long_right(&mut self, color: Color) {
        if self.long_castle_right[color.idx()] {
            self.long_castle_right[color.idx()] = false;
            let key = match color {
                Color::White => CASTLE_WHITE_LONG,
                Color::Black => CASTLE_BLACK_LONG,
            };
            self.hash ^= ZOBRIST.castling_key(key);
        }
    }

    fn set_en_passant(&mut self, sq: Option<Square>) {
        if let Some(old) = self.en_passant_square {
            self.hash ^= ZOBRIST.ep_key(file_of(old));
        }
        if let Some(new) = sq {
            self.hash ^= ZOBRIST.ep_key(file_of(new));
        }
        self.en_passant_square = sq;
    }

    fn flip_side(&mut self) {
        self.next_player = self.next_player.other();
        self.hash ^= ZOBRIST.black_to_move;
    }

    fn rebuild_unions(&mut self) {
        for color in 0..2 {
            let mut union = Bitboard::EMPTY;
            for kind in 0..6 {
                union |= self.bb[color][kind];
            }
            self.bb[color][ALL_PIECES] = union;
        }
    }
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality over the persistent position: placement, rights, en passant,
/// clocks, side to move. Check flags and capture memory are derived state.
impl PartialEq for ChessBoard {
    fn eq(&self, other: &Self) -> bool {
        self.bb == other.bb
            && self.short_castle_right == other.short_castle_right
            && self.long_castle_right == other.long_castle_right
            && self.en_passant_square == other.en_passant_square
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.next_player == other.next_player
    }
}

impl Eq for ChessBoard {}

impl fmt::Display for ChessBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let cell = match self.piece_at(square_at(file, rank)) {
                    None => '.',
                    Some(piece) => {
                        let letter = piece.kind.letter();
                        match piece.color {
                            Color::White => letter,
                            Color::Black => letter.to_ascii_lowercase(),
                        }
                    }
                };
                write!(f, "{cell} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
