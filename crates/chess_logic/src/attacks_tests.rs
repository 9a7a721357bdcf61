use super::*;
use crate::types::square_from_name;

fn sq(name: &str) -> Square {
    square_from_name(name).unwrap()
}

#[test]
fn knight_attack_counts() {
    assert_eq!(knight_attacks(sq("a1")).popcount(), 2);
    assert_eq!(knight_attacks(sq("b1")).popcount(), 3);
    assert_eq!(knight_attacks(sq("d4")).popcount(), 8);
    assert_eq!(knight_attacks(sq("h8")).popcount(), 2);
}

#[test]
fn king_attack_counts() {
    assert_eq!(king_attacks(sq("a1")).popcount(), 3);
    assert_eq!(king_attacks(sq("e1")).popcount(), 5);
    assert_eq!(king_attacks(sq("d5")).popcount(), 8);
}

#[test]
fn pawn_attacks_respect_edges() {
    let w = pawn_attacks(sq("a2"), Color::White);
    assert_eq!(w.popcount(), 1);
    assert!(w.contains(sq("b3")));

    let b = pawn_attacks(sq("h7"), Color::Black);
    assert_eq!(b.popcount(), 1);
    assert!(b.contains(sq("g6")));

    assert_eq!(pawn_attacks(sq("e4"), Color::White).popcount(), 2);
}

#[test]
fn rays_do_not_include_origin() {
    for dir in 0..8 {
        for s in 0..64u8 {
            assert!(!RAYS[dir][s as usize].contains(s));
        }
    }
    // North ray from e4 is e5..e8.
    let north = RAYS[NORTH][sq("e4") as usize];
    assert_eq!(north.popcount(), 4);
    assert!(north.contains(sq("e8")));
    assert!(!north.contains(sq("e3")));
}

#[test]
fn rook_attacks_stop_at_blockers() {
    let occupied = Bitboard::from_square(sq("e7")) | Bitboard::from_square(sq("b4"));
    let attacks = rook_attacks(sq("e4"), occupied);
    // Blockers themselves are included, squares beyond are not.
    assert!(attacks.contains(sq("e7")));
    assert!(!attacks.contains(sq("e8")));
    assert!(attacks.contains(sq("b4")));
    assert!(!attacks.contains(sq("a4")));
    assert!(attacks.contains(sq("e1")));
    assert!(attacks.contains(sq("h4")));
}

#[test]
fn bishop_attacks_on_empty_board() {
    let attacks = bishop_attacks(sq("c1"), Bitboard::EMPTY);
    assert!(attacks.contains(sq("a3")));
    assert!(attacks.contains(sq("h6")));
    assert_eq!(attacks.popcount(), 7);
}

#[test]
fn queen_attacks_union() {
    let occ = Bitboard::EMPTY;
    let q = queen_attacks(sq("d4"), occ);
    assert_eq!(q, rook_attacks(sq("d4"), occ) | bishop_attacks(sq("d4"), occ));
    assert_eq!(q.popcount(), 27);
}

#[test]
fn between_aligned_squares() {
    let b = between(sq("a1"), sq("a8"));
    assert_eq!(b.popcount(), 6);
    assert!(b.contains(sq("a4")));
    assert!(!b.contains(sq("a1")));
    assert!(!b.contains(sq("a8")));

    let diag = between(sq("c1"), sq("f4"));
    assert_eq!(diag.popcount(), 2);
    assert!(diag.contains(sq("d2")));
    assert!(diag.contains(sq("e3")));

    // Symmetry and degenerate cases.
    assert_eq!(between(sq("f4"), sq("c1")), diag);
    assert_eq!(between(sq("a1"), sq("b3")), Bitboard::EMPTY);
    assert_eq!(between(sq("a1"), sq("a2")), Bitboard::EMPTY);
}
