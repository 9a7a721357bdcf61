use super::*;
use chess_logic::GameState;

#[test]
fn ai_player_returns_a_legal_turn() {
    let mut player = AiPlayer::new(SearchConfig {
        max_depth: 2,
        table_size: 1 << 12,
        ..SearchConfig::default()
    });
    let state = GameState::new();

    let turn = player.pick_turn(&state).expect("a turn from the start");
    assert!(state.turn_list().contains(&turn));
}

#[test]
fn ai_player_passes_on_finished_games() {
    let mut player = AiPlayer::default();
    let mate =
        GameState::from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4")
            .unwrap();
    assert!(player.pick_turn(&mate).is_none());
}

#[test]
fn random_player_stays_inside_the_turn_list() {
    let mut player = RandomPlayer::from_seed(7);
    let state = GameState::new();
    for _ in 0..20 {
        let turn = player.pick_turn(&state).expect("moves available");
        assert!(state.turn_list().contains(&turn));
    }
}

#[test]
fn random_player_is_reproducible_for_a_seed() {
    let state = GameState::new();
    let mut a = RandomPlayer::from_seed(42);
    let mut b = RandomPlayer::from_seed(42);
    for _ in 0..10 {
        assert_eq!(a.pick_turn(&state), b.pick_turn(&state));
    }
}

#[test]
fn random_player_has_nothing_in_stalemate() {
    let mut player = RandomPlayer::from_seed(1);
    let stalemate = GameState::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(player.pick_turn(&stalemate).is_none());
}
