//! # Hive rules engine
//!
//! Move legality for the board game Hive: which cells a tile may be placed
//! on or moved to, given a board snapshot and the turn counter.
//!
//! - [`hex`]: axial hex coordinates and stack layers
//! - [`board`]: the value-type board with its two mutation entry points
//! - [`rules`]: turn policy, per-kind movement, the one hive rule and the
//!   [`legal_moves`] / [`is_legal`] queries built from them
//! - [`game`]: a driver that applies validated moves and detects the end
//!
//! ```
//! use hive::{is_legal, legal_moves, Board, Coordinate, PieceId, Player, TurnState};
//!
//! let board = Board::new();
//! let queen = PieceId::queen(Player::White);
//! let first = TurnState::new(1);
//! assert_eq!(legal_moves(queen, &board, &first).len(), 1);
//! assert!(is_legal(queen, Coordinate::ground(0, 0), &board, &first));
//! ```

pub mod board;
pub mod error;
pub mod game;
pub mod hex;
pub mod piece;
pub mod rules;

pub use board::Board;
pub use error::{MoveError, StructuralViolation};
pub use game::{Game, GameStatus};
pub use hex::{Coordinate, Direction, HexCoord};
pub use piece::{Piece, PieceId, PieceKind, Placement, Player};
pub use rules::{all_legal_moves, is_legal, legal_moves, Move, Rules, TurnState};

/// A turn-based game that generic tooling (perft, random playouts) can drive.
/// `Send` and `Sync` are required for parallel processing.
pub trait GameState: Clone + Send + Sync {
    /// The type of a move in the game.
    type Move: Clone + Eq + std::hash::Hash + std::fmt::Debug + std::fmt::Display + Send + Sync;
    /// The type identifying a side.
    type Player: Copy + Eq + std::fmt::Debug + std::fmt::Display + Send + Sync;

    /// Returns a vector of all possible moves from the current state.
    /// Empty exactly when the game is over.
    fn get_possible_moves(&self) -> Vec<Self::Move>;
    /// Applies a move to the state, modifying it.
    fn make_move(&mut self, mv: &Self::Move);
    /// Returns true if the game is over.
    fn is_terminal(&self) -> bool;
    /// Returns the winner of the game, if any.
    /// `None` for a draw or if the game is not over.
    fn get_winner(&self) -> Option<Self::Player>;
    /// Returns the player whose turn it is to move.
    fn get_current_player(&self) -> Self::Player;
}
