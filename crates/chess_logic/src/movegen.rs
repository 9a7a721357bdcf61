//! Legal turn generation.
//!
//! The generator works on the raw bitboards: the opponent's attacked squares
//! are computed with the mover's king lifted off the board (a king stepping
//! backwards along a checking ray must still count as attacked), check
//! resolution intersects non-king destinations with the capture-or-block
//! squares of the checker, and a final make-and-test pass rejects anything
//! that would leave the mover's king attacked. Besides the turn list the
//! generator owns the board's check, checkmate and stalemate flags.

use crate::attacks::{
    between, bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks,
    rook_attacks,
};
use crate::bitboard::Bitboard;
use crate::board::ChessBoard;
use crate::types::{rank_of, Color, Piece, PieceType, Square, Turn};

#[derive(Clone, Debug, Default)]
pub struct TurnGenerator {
    turn_list: Vec<Turn>,
}

impl TurnGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turn_list(&self) -> &[Turn] {
        &self.turn_list
    }

    /// Regenerate the legal turn list for `player` and set the board's
    /// check/checkmate/stalemate flags.
    pub fn generate(&mut self, player: Color, board: &mut ChessBoard) {
        self.turn_list.clear();

        let opp = player.other();
        let occupied = board.occupied();
        let own_king = board.pieces(player, PieceType::King);
        let opp_attacks = attacked_squares(board, opp, occupied ^ own_king);
        let in_check = !(own_king & opp_attacks).is_empty();

        // The opponent cannot be in check when it is our turn; the flag is
        // stale from the previous half-move.
        board.set_king_in_check(opp, false);
        board.set_king_in_check(player, in_check);

        if in_check {
            let uncheck = uncheck_fields(player, board);
            self.collect_piece_turns(player, board, occupied, opp_attacks, Some(uncheck));
        } else {
            self.collect_castle_turns(player, board, occupied, opp_attacks);
            self.collect_piece_turns(player, board, occupied, opp_attacks, None);
        }

        // Reject anything that leaves our own king attacked: pinned pieces,
        // en-passant captures that open a ray, king steps the attack map
        // missed.
        let snapshot: &ChessBoard = board;
        self.turn_list.retain(|&turn| {
            let mut child = snapshot.clone();
            child.apply(turn);
            match child.king_square(player) {
                Some(king_sq) => !child.is_attacked(king_sq, opp),
                None => true,
            }
        });

        if self.turn_list.is_empty() {
            if in_check {
                board.set_checkmate(player, true);
            } else {
                board.set_stalemate(true);
            }
        }
    }

    fn collect_piece_turns(
        &mut self,
        player: Color,
        board: &ChessBoard,
        occupied: Bitboard,
        opp_attacks: Bitboard,
        uncheck: Option<Bitboard>,
    ) {
        let own = board.all_pieces(player);
        let enemy = board.all_pieces(player.other());

        for kind in PieceType::ALL {
            let piece = Piece::new(player, kind);
            for from in board.pieces(player, kind) {
                let mut targets = match kind {
                    PieceType::King => king_attacks(from) & !own & !opp_attacks,
                    PieceType::Queen => queen_attacks(from, occupied) & !own,
                    PieceType::Bishop => bishop_attacks(from, occupied) & !own,
                    PieceType::Knight => knight_attacks(from) & !own,
                    PieceType::Rook => rook_attacks(from, occupied) & !own,
                    PieceType::Pawn => pawn_targets(player, board, from, occupied, enemy),
                };
                if kind != PieceType::King {
                    if let Some(uncheck) = uncheck {
                        targets &= uncheck;
                    }
                }
                self.push_turns(piece, from, targets);
            }
        }
    }

    fn collect_castle_turns(
        &mut self,
        player: Color,
        board: &ChessBoard,
        occupied: Bitboard,
        opp_attacks: Bitboard,
    ) {
        let base: Square = match player {
            Color::White => 0,
            Color::Black => 56,
        };
        let king = Piece::new(player, PieceType::King);
        let king_from = base + 4;

        if board.short_castle_right[player.idx()] {
            let path = Bitboard::from_square(base + 5) | Bitboard::from_square(base + 6);
            let safe = Bitboard::from_square(base + 4) | path;
            if (occupied & path).is_empty() && (opp_attacks & safe).is_empty() {
                self.turn_list.push(Turn::castle(king, king_from, base + 6));
            }
        }
        if board.long_castle_right[player.idx()] {
            let path = Bitboard::from_square(base + 1)
                | Bitboard::from_square(base + 2)
                | Bitboard::from_square(base + 3);
            // The king only crosses d and c; the b-file square merely has to
            // be empty.
            let safe = Bitboard::from_square(base + 4)
                | Bitboard::from_square(base + 3)
                | Bitboard::from_square(base + 2);
            if (occupied & path).is_empty() && (opp_attacks & safe).is_empty() {
                self.turn_list.push(Turn::castle(king, king_from, base + 2));
            }
        }
    }

    /// Turn a destination set into turns, fanning pawn moves onto the last
    /// rank out into the four promotions.
    fn push_turns(&mut self, piece: Piece, from: Square, targets: Bitboard) {
        for to in targets {
            let last_rank = rank_of(to) == 0 || rank_of(to) == 7;
            if piece.kind == PieceType::Pawn && last_rank {
                self.turn_list.push(Turn::promotion_queen(piece, from, to));
                self.turn_list.push(Turn::promotion_bishop(piece, from, to));
                self.turn_list.push(Turn::promotion_rook(piece, from, to));
                self.turn_list.push(Turn::promotion_knight(piece, from, to));
            } else {
                self.turn_list.push(Turn::piece_move(piece, from, to));
            }
        }
    }
}

/// Pawn pushes and captures from `from`, including the en-passant target.
fn pawn_targets(
    player: Color,
    board: &ChessBoard,
    from: Square,
    occupied: Bitboard,
    enemy: Bitboard,
) -> Bitboard {
    let pawn = Bitboard::from_square(from);
    let empty = !occupied;

    let pushes = match player {
        Color::White => {
            let one = pawn.north() & empty;
            one | ((one & Bitboard::RANK_3).north() & empty)
        }
        Color::Black => {
            let one = pawn.south() & empty;
            one | ((one & Bitboard::RANK_6).south() & empty)
        }
    };

    let mut capture_targets = enemy;
    if let Some(ep) = board.en_passant_square {
        capture_targets |= Bitboard::from_square(ep);
    }

    pushes | (pawn_attacks(from, player) & capture_targets)
}

/// Every square `attacker` attacks under the given occupancy. Pawns count
/// both capture diagonals whether or not anything stands there; a defended
/// piece's square counts as attacked.
fn attacked_squares(board: &ChessBoard, attacker: Color, occupied: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;

    let pawns = board.pieces(attacker, PieceType::Pawn);
    attacks |= match attacker {
        Color::White => pawns.north_east() | pawns.north_west(),
        Color::Black => pawns.south_east() | pawns.south_west(),
    };

    for sq in board.pieces(attacker, PieceType::Knight) {
        attacks |= knight_attacks(sq);
    }
    for sq in board.pieces(attacker, PieceType::King) {
        attacks |= king_attacks(sq);
    }
    let rook_like =
        board.pieces(attacker, PieceType::Rook) | board.pieces(attacker, PieceType::Queen);
    for sq in rook_like {
        attacks |= rook_attacks(sq, occupied);
    }
    let bishop_like =
        board.pieces(attacker, PieceType::Bishop) | board.pieces(attacker, PieceType::Queen);
    for sq in bishop_like {
        attacks |= bishop_attacks(sq, occupied);
    }

    attacks
}

/// Squares a non-king piece may land on to resolve the check: the checker's
/// square, plus the blocking squares when the checker slides. Two checkers
/// leave nothing; only the king can move out of a double check.
fn uncheck_fields(player: Color, board: &ChessBoard) -> Bitboard {
    let king_sq = match board.king_square(player) {
        Some(sq) => sq,
        None => return Bitboard::EMPTY,
    };
    let opp = player.other();
    let occupied = board.occupied();

    let contact_checkers = (pawn_attacks(king_sq, player) & board.pieces(opp, PieceType::Pawn))
        | (knight_attacks(king_sq) & board.pieces(opp, PieceType::Knight))
        | (king_attacks(king_sq) & board.pieces(opp, PieceType::King));

    let rook_like = board.pieces(opp, PieceType::Rook) | board.pieces(opp, PieceType::Queen);
    let bishop_like = board.pieces(opp, PieceType::Bishop) | board.pieces(opp, PieceType::Queen);
    let sliding_checkers = (rook_attacks(king_sq, occupied) & rook_like)
        | (bishop_attacks(king_sq, occupied) & bishop_like);

    let checkers = contact_checkers | sliding_checkers;
    if checkers.popcount() >= 2 {
        return Bitboard::EMPTY;
    }

    match checkers.lsb() {
        Some(checker_sq) if sliding_checkers.contains(checker_sq) => {
            between(king_sq, checker_sq) | Bitboard::from_square(checker_sq)
        }
        Some(checker_sq) => {
            let mut fields = Bitboard::from_square(checker_sq);
            // A pawn that just double-stepped into check range can also be
            // taken en passant; the capture square differs from the
            // checker's square.
            if board.pieces(opp, PieceType::Pawn).contains(checker_sq) {
                if let Some(ep) = board.en_passant_square {
                    let behind = match player {
                        Color::White => checker_sq as i16 + 8,
                        Color::Black => checker_sq as i16 - 8,
                    };
                    if i16::from(ep) == behind {
                        fields.set(ep);
                    }
                }
            }
            fields
        }
        None => Bitboard::EMPTY,
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
