use super::*;
use chess_logic::{square_from_name, GameState};

fn sq(name: &str) -> u8 {
    square_from_name(name).unwrap()
}

fn engine() -> Negamax {
    Negamax::new(SearchConfig {
        table_size: 1 << 12,
        ..SearchConfig::default()
    })
}

fn plain_engine() -> Negamax {
    Negamax::new(SearchConfig {
        ab_cutoff_enabled: false,
        move_ordering_enabled: false,
        transposition_table_enabled: false,
        table_size: 1,
        ..SearchConfig::default()
    })
}

#[test]
fn finds_some_move_from_the_start() {
    let state = GameState::new();
    let result = engine().search(&state, 3);
    assert!(result.turn.is_some());
    assert!(!result.is_victory_certain());
}

#[test]
fn finds_back_rank_mate_in_one() {
    // Lone black king on h8; Qa8 (or Qg7) mates on the spot.
    let state = GameState::from_fen("7k/8/6K1/8/8/8/8/Q7 w - - 0 1").unwrap();
    let result = engine().search(&state, 1);

    let turn = result.turn.expect("mate in one must yield a turn");
    let after = state.applied(turn);
    assert!(after.is_game_over());
    assert!(after.board().checkmate(chess_logic::Color::Black));
    assert!(result.score > WIN_SCORE_THRESHOLD);
    assert!(result.is_victory_certain());
}

#[test]
fn mating_score_is_depth_adjusted() {
    let state = GameState::from_fen("7k/8/6K1/8/8/8/8/Q7 w - - 0 1").unwrap();
    let shallow = engine().search(&state, 1);
    // The same mate found with a deeper horizon keeps its distance-to-mate
    // score: one ply from the root either way.
    let deep = engine().search(&state, 3);
    assert_eq!(shallow.score, deep.score);
}

#[test]
fn game_over_state_yields_no_turn() {
    let mate =
        GameState::from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4")
            .unwrap();
    let result = engine().search(&mate, 3);
    assert!(result.turn.is_none());
    assert!(result.score < 0);
}

#[test]
fn avoids_losing_the_queen() {
    // The white queen on e4 is attacked by the d5 pawn, and d5 itself is
    // defended by the queen on d8; depth 2 sees the recapture coming.
    let state = GameState::from_fen("3q1k2/8/8/3p4/4Q3/8/8/4K3 w - - 0 1").unwrap();
    let result = engine().search(&state, 2);
    let turn = result.turn.expect("some turn");
    assert_ne!(turn.to, sq("d5"));
}

#[test]
fn pruning_and_table_do_not_change_the_score() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "3q1k2/8/8/3p4/4Q3/8/8/4K3 w - - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let state = GameState::from_fen(fen).unwrap();
        let full = engine().search(&state, 3);
        let plain = plain_engine().search(&state, 3);
        assert_eq!(
            full.score, plain.score,
            "feature toggles changed the root score for {fen}"
        );
    }
}

#[test]
fn search_is_deterministic() {
    let state = GameState::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    let a = engine().search(&state, 3);
    let b = engine().search(&state, 3);
    assert_eq!(a, b);
}

#[test]
fn repeated_search_reuses_the_table() {
    let state = GameState::new();
    let mut searcher = engine();
    let first = searcher.search(&state, 3);
    let hits_after_first = searcher.counters().table_hits;

    let second = searcher.search(&state, 3);
    assert_eq!(first.score, second.score);
    assert!(
        searcher.counters().table_hits > hits_after_first
            || searcher.counters().nodes < 30,
        "second search should profit from stored entries"
    );
}

#[test]
fn negamax_symmetry_on_mirrored_position() {
    // Mirror a position by swapping colors and flipping ranks; scores negate.
    let white_pov = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    let black_pov = GameState::from_fen("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1").unwrap();

    let a = plain_engine().search(&white_pov, 2);
    let b = plain_engine().search(&black_pov, 2);
    assert_eq!(a.score, b.score);
}

#[test]
fn search_clears_a_stale_abort_flag() {
    let state = GameState::new();
    let mut searcher = engine();
    searcher.abort();
    // A fresh search resets the flag on entry and must complete normally.
    let result = searcher.search(&state, 2);
    assert!(result.turn.is_some());
}

#[test]
fn abort_mid_search_unwinds_with_none() {
    use std::thread;
    use std::time::Duration;

    let state = GameState::new();
    let mut searcher = Negamax::new(SearchConfig {
        max_depth: 6,
        table_size: 1 << 12,
        ..SearchConfig::default()
    });
    let flag = searcher.abort_flag();

    let killer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(5));
        flag.set();
    });

    // Deep enough that five milliseconds cannot finish it.
    let result = searcher.search(&state, 6);
    killer.join().unwrap();

    assert_eq!(result, SearchResult { score: 0, turn: None });
}
