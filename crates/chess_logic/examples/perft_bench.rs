//! Perft benchmark for profiling the move generator.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_logic -- [depth] [fen]

use std::env;
use std::time::Instant;

use chess_logic::{perft, GameState};

const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("Rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    (
        "Promotion tangle",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    ),
];

fn main() {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    match args.get(2) {
        Some(fen) => run_position(fen, fen, depth),
        None => {
            for (name, fen) in TEST_POSITIONS {
                run_position(name, fen, depth);
            }
        }
    }
}

fn run_position(name: &str, fen: &str, depth: u8) {
    let state = match GameState::from_fen(fen) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("bad FEN '{fen}': {err}");
            return;
        }
    };

    let start = Instant::now();
    let nodes = perft(&state, depth);
    let elapsed = start.elapsed();

    let nps = nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    println!("{name:.<24} depth {depth}: {nodes:>12} nodes in {elapsed:>8.3?} ({nps:>10.0} nps)");
}
