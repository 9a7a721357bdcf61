use super::*;
use crate::types::{Color, PieceType};

#[test]
fn all_keys_are_distinct() {
    let mut seen = std::collections::HashSet::new();

    for color in 0..2 {
        for kind in 0..6 {
            for sq in 0..64 {
                assert!(
                    seen.insert(ZOBRIST.pieces[color][kind][sq]),
                    "duplicate piece key"
                );
            }
        }
    }
    assert!(seen.insert(ZOBRIST.black_to_move), "side key collision");
    for i in 0..4 {
        assert!(seen.insert(ZOBRIST.castling[i]), "castling key collision");
    }
    for i in 0..8 {
        assert!(seen.insert(ZOBRIST.en_passant[i]), "en passant key collision");
    }
}

#[test]
fn piece_keys_depend_on_square_and_color() {
    let wp = Piece::new(Color::White, PieceType::Pawn);
    let bp = Piece::new(Color::Black, PieceType::Pawn);
    assert_ne!(ZOBRIST.piece_key(wp, 0), ZOBRIST.piece_key(wp, 1));
    assert_ne!(ZOBRIST.piece_key(wp, 0), ZOBRIST.piece_key(bp, 0));
}

#[test]
fn table_is_deterministic() {
    let again = ZobristKeys::new();
    assert_eq!(again.black_to_move, ZOBRIST.black_to_move);
    assert_eq!(again.pieces[1][5][63], ZOBRIST.pieces[1][5][63]);
    assert_eq!(again.castling, ZOBRIST.castling);
    assert_eq!(again.en_passant, ZOBRIST.en_passant);
}
