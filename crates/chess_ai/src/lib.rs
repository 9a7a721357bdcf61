//! Chess AI: Negamax search with alpha-beta pruning, move ordering and a
//! transposition table, plus the `Player` abstraction the game driver talks
//! to. Rules and position representation live in `chess_logic`.

pub mod search;
pub mod table;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use chess_logic::{GameState, Turn};

pub use search::{AbortFlag, Negamax, PerfCounters, SearchConfig, SearchResult};
pub use table::{Bound, TableEntry, TranspositionTable, DEFAULT_TABLE_SIZE};

#[cfg(test)]
mod lib_tests;

/// A participant in a game: hand it the current state, get a turn back.
/// `None` means no turn is available: the game is over, or the search was
/// told to abort.
pub trait Player {
    fn pick_turn(&mut self, state: &GameState) -> Option<Turn>;

    fn name(&self) -> &str;
}

/// The engine as a player: a configured Negamax searched to the configured
/// horizon. Deterministic for a given state and table history.
pub struct AiPlayer {
    engine: Negamax,
}

impl AiPlayer {
    pub fn new(config: SearchConfig) -> Self {
        AiPlayer {
            engine: Negamax::new(config),
        }
    }

    /// Handle for cancelling a running `pick_turn` from another thread.
    pub fn abort_flag(&self) -> AbortFlag {
        self.engine.abort_flag()
    }

    pub fn last_counters(&self) -> PerfCounters {
        self.engine.counters()
    }
}

impl Player for AiPlayer {
    fn pick_turn(&mut self, state: &GameState) -> Option<Turn> {
        if state.is_game_over() {
            return None;
        }
        let depth = self.engine.config().max_depth;
        self.engine.search(state, depth).turn
    }

    fn name(&self) -> &str {
        "Negamax"
    }
}

impl Default for AiPlayer {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// Picks uniformly from the legal turn list. The seedable generator keeps
/// games reproducible under test; it is the only source of nondeterminism in
/// the crate.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn from_seed(seed: u64) -> Self {
        RandomPlayer {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn pick_turn(&mut self, state: &GameState) -> Option<Turn> {
        state.turn_list().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "Random"
    }
}
