//! Perft validation against known node counts. These positions collectively
//! exercise castling, en passant, promotions, pins and discovered checks.

use rayon::prelude::*;

use chess_logic::{perft, GameState};

const CASES: &[(&str, &[(u8, u64)])] = &[
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[(1, 20), (2, 400), (3, 8_902), (4, 197_281)],
    ),
    (
        // Kiwipete
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[(1, 48), (2, 2_039), (3, 97_862)],
    ),
    (
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[(1, 14), (2, 191), (3, 2_812), (4, 43_238)],
    ),
    (
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[(1, 6), (2, 264), (3, 9_467)],
    ),
    (
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[(1, 44), (2, 1_486), (3, 62_379)],
    ),
    (
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        &[(1, 46), (2, 2_079)],
    ),
];

#[test]
fn perft_matches_known_counts() {
    CASES.par_iter().for_each(|(fen, depths)| {
        let state = GameState::from_fen(fen).expect("test FEN parses");
        for &(depth, expected) in depths.iter() {
            let got = perft(&state, depth);
            assert_eq!(
                got, expected,
                "perft mismatch for '{fen}' at depth {depth}: expected {expected}, got {got}"
            );
        }
    });
}

#[test]
fn perft_depth_zero_is_one() {
    let state = GameState::new();
    assert_eq!(perft(&state, 0), 1);
}
