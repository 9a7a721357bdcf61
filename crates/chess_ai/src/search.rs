//! Negamax search with alpha-beta pruning, move ordering and the
//! transposition table.
//!
//! The recursion copies the game state for every candidate turn instead of
//! unmaking moves; states are a few hundred bytes, so unmake-by-discard is
//! both simple and cheap at the depths this engine runs. Cancellation is
//! cooperative: the abort flag is read at recursion entry and after every
//! child, and an aborted search unwinds as `{0, None}`.

use std::fmt;
use std::ops::Neg;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chess_logic::{GameState, Score, Turn, MAX_SCORE, MIN_SCORE, WIN_SCORE_THRESHOLD};

use crate::table::{Bound, TableEntry, TranspositionTable, DEFAULT_TABLE_SIZE};

/// Feature switches for the search. Disabling a feature never changes the
/// root score, only how much work is spent finding it.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Search horizon in plies.
    pub max_depth: usize,
    pub ab_cutoff_enabled: bool,
    pub move_ordering_enabled: bool,
    pub transposition_table_enabled: bool,
    pub table_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 4,
            ab_cutoff_enabled: true,
            move_ordering_enabled: true,
            transposition_table_enabled: true,
            table_size: DEFAULT_TABLE_SIZE,
        }
    }
}

/// Shared stop signal, cheap to clone and safe to set from any thread. The
/// search polls it; callers cannot assume the search has exited until
/// `search` returns.
#[derive(Clone, Debug, Default)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Outcome of a (sub)search: the score and the turn that achieves it. A
/// missing turn at the root means "no result" (aborted search).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub score: Score,
    pub turn: Option<Turn>,
}

impl SearchResult {
    const ABORTED: SearchResult = SearchResult {
        score: 0,
        turn: None,
    };

    pub fn is_victory_certain(&self) -> bool {
        self.score > WIN_SCORE_THRESHOLD
    }
}

impl Neg for SearchResult {
    type Output = SearchResult;

    fn neg(self) -> SearchResult {
        SearchResult {
            score: -self.score,
            turn: self.turn,
        }
    }
}

/// Work counters for one search call.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerfCounters {
    pub nodes: u64,
    pub cutoffs: u64,
    pub updates: u64,
    pub table_hits: u64,
    pub duration: Duration,
}

impl fmt::Display for PerfCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.duration.as_millis().max(1);
        write!(
            f,
            "nodes={} (~{}/ms) cutoffs={} updates={} table_hits={} in {:?}",
            self.nodes,
            self.nodes / ms as u64,
            self.cutoffs,
            self.updates,
            self.table_hits,
            self.duration
        )
    }
}

pub struct Negamax {
    config: SearchConfig,
    table: TranspositionTable,
    abort: AbortFlag,
    counters: PerfCounters,
}

impl Negamax {
    pub fn new(config: SearchConfig) -> Self {
        let table = TranspositionTable::new(config.table_size);
        Negamax {
            config,
            table,
            abort: AbortFlag::new(),
            counters: PerfCounters::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn counters(&self) -> PerfCounters {
        self.counters
    }

    /// Handle for aborting this searcher from another thread.
    pub fn abort_flag(&self) -> AbortFlag {
        self.abort.clone()
    }

    pub fn abort(&self) {
        self.abort.set();
    }

    /// Search `state` to the given horizon. Returns `{0, None}` when
    /// aborted; a `None` turn with a game already over is a genuine "no
    /// move".
    pub fn search(&mut self, state: &GameState, max_depth: usize) -> SearchResult {
        self.abort.clear();
        self.counters = PerfCounters::default();

        tracing::debug!(
            max_depth,
            ab_cutoff = self.config.ab_cutoff_enabled,
            move_ordering = self.config.move_ordering_enabled,
            transposition_table = self.config.transposition_table_enabled,
            "starting search"
        );
        let start = Instant::now();

        let result = self.search_recurse(state, 0, max_depth, MIN_SCORE, MAX_SCORE);

        self.counters.duration = start.elapsed();
        if self.abort.is_set() {
            tracing::debug!("search aborted without result");
        } else {
            tracing::debug!(
                score = result.score,
                turn = %result.turn.map(|t| t.to_string()).unwrap_or_else(|| "none".into()),
                "search finished"
            );
        }
        tracing::debug!(counters = %self.counters, "search counters");

        result
    }

    fn search_recurse(
        &mut self,
        state: &GameState,
        depth: usize,
        max_depth: usize,
        mut alpha: Score,
        mut beta: Score,
    ) -> SearchResult {
        if self.abort.is_set() {
            return SearchResult::ABORTED;
        }

        let plies_left = max_depth - depth;
        if state.is_game_over() || plies_left == 0 {
            return SearchResult {
                score: state.score(depth),
                turn: None,
            };
        }

        let initial_alpha = alpha;

        if self.config.transposition_table_enabled {
            if let Some(entry) = self.table.lookup(state.hash()) {
                if entry.depth >= plies_left {
                    self.counters.table_hits += 1;
                    match entry.bound {
                        // Deep enough to answer outright.
                        Bound::Exact => {
                            return SearchResult {
                                score: entry.score,
                                turn: Some(entry.turn),
                            }
                        }
                        Bound::Lower => alpha = alpha.max(entry.score),
                        Bound::Upper => beta = beta.min(entry.score),
                    }
                    if self.config.ab_cutoff_enabled && alpha >= beta {
                        // The stored bound alone closes the window.
                        self.counters.cutoffs += 1;
                        return SearchResult {
                            score: entry.score,
                            turn: Some(entry.turn),
                        };
                    }
                }
            }
        }

        let mut best = SearchResult {
            score: MIN_SCORE,
            turn: None,
        };

        // Not game over, so the generator produced at least one turn.
        debug_assert!(!state.turn_list().is_empty());

        // Children are applied up front; move ordering needs their hashes
        // and estimates anyway.
        let mut options: Vec<(GameState, Turn, Score)> = state
            .turn_list()
            .iter()
            .map(|&turn| {
                let child = state.applied(turn);
                let estimate = self.estimate(&child, depth + 1);
                (child, turn, estimate)
            })
            .collect();

        if self.config.move_ordering_enabled {
            options.sort_by(|a, b| b.2.cmp(&a.2));
        }

        for (child, turn, _) in &options {
            self.counters.nodes += 1;

            let result = -self.search_recurse(child, depth + 1, max_depth, -beta, -alpha);

            if result.score > best.score {
                self.counters.updates += 1;
                best = SearchResult {
                    score: result.score,
                    turn: Some(*turn),
                };
            }

            alpha = alpha.max(result.score);
            if self.config.ab_cutoff_enabled && alpha >= beta {
                // The opponent already has a better option elsewhere;
                // further siblings cannot matter.
                self.counters.cutoffs += 1;
                break;
            }

            if self.abort.is_set() {
                return SearchResult::ABORTED;
            }
        }

        if self.config.transposition_table_enabled {
            if let Some(turn) = best.turn {
                let bound = if best.score <= initial_alpha {
                    Bound::Upper
                } else if best.score >= beta {
                    Bound::Lower
                } else {
                    Bound::Exact
                };
                self.table.maybe_update(TableEntry {
                    hash: state.hash(),
                    depth: plies_left,
                    score: best.score,
                    turn,
                    bound,
                });
            }
        }

        best
    }

    /// Move-ordering estimate for a child state. The child has the opponent
    /// to move, so table scores and static estimates are negated back into
    /// our point of view. Upper bounds are ranked first: their true score
    /// may be anything below the bound, and exploring them early costs
    /// nothing when they are weak.
    fn estimate(&self, child: &GameState, depth: usize) -> Score {
        if self.config.transposition_table_enabled {
            match self.table.lookup(child.hash()) {
                None => -child.score(depth),
                Some(entry) if entry.bound == Bound::Upper => -MIN_SCORE,
                Some(entry) => -entry.score,
            }
        } else {
            -child.score(depth)
        }
    }
}

impl Default for Negamax {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
