//! Chess rules and position representation.
//!
//! Bitboard-based board state with incremental evaluation and Zobrist
//! hashing, a legal turn generator, and the `GameState` facade the search
//! and the game driver build on. Search itself lives in the `chess_ai`
//! crate.

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod eval;
pub mod movegen;
pub mod perft;
pub mod state;
pub mod types;
pub mod zobrist;

pub use bitboard::Bitboard;
pub use board::{ChessBoard, FenError, STARTING_FEN};
pub use eval::IncrementalEvaluator;
pub use movegen::TurnGenerator;
pub use perft::perft;
pub use state::GameState;
pub use types::{
    file_of, flip_horizontal, rank_of, square_at, square_from_name, square_name, Action, Color,
    Piece, PieceType, Score, Square, Turn, LOSE_SCORE, MAX_SCORE, MIN_SCORE, WIN_SCORE,
    WIN_SCORE_THRESHOLD,
};
pub use zobrist::ZOBRIST;
