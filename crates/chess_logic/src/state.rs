//! Game state facade: a board plus the cached legal turn list for the side
//! to move. The list is regenerated on construction and after every apply,
//! so game-end flags are always current.

use std::fmt;

use crate::board::{ChessBoard, FenError};
use crate::movegen::TurnGenerator;
use crate::types::{Color, Score, Turn};

#[derive(Clone, Debug)]
pub struct GameState {
    board: ChessBoard,
    generator: TurnGenerator,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::from_board(ChessBoard::new())
    }

    pub fn from_board(board: ChessBoard) -> Self {
        let mut state = GameState {
            board,
            generator: TurnGenerator::new(),
        };
        state.regenerate();
        state
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_board(ChessBoard::from_fen(fen)?))
    }

    pub fn to_fen(&self) -> String {
        self.board.to_fen()
    }

    pub fn turn_list(&self) -> &[Turn] {
        self.generator.turn_list()
    }

    /// Apply a turn from the current turn list and regenerate for the other
    /// side.
    pub fn apply(&mut self, turn: Turn) {
        self.board.apply(turn);
        self.regenerate();
    }

    /// Copy-then-apply; the search's unmake-by-discard.
    pub fn applied(&self, turn: Turn) -> GameState {
        let mut next = self.clone();
        next.apply(turn);
        next
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn next_player(&self) -> Color {
        self.board.next_player()
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn winner(&self) -> Option<Color> {
        self.board.winner()
    }

    pub fn is_draw_due_to_50_moves_rule(&self) -> bool {
        self.board.is_fifty_move_draw()
    }

    /// Score from the next player's point of view; `depth` shifts terminal
    /// scores so the search prefers near wins and far losses.
    pub fn score(&self, depth: usize) -> Score {
        self.board.score(self.board.next_player(), depth)
    }

    pub fn hash(&self) -> u64 {
        self.board.hash()
    }

    fn regenerate(&mut self) {
        let player = self.board.next_player();
        self.generator.generate(player, &mut self.board);
    }
}

/// Turn lists are derived; two states are equal when their boards are.
impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for GameState {}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
