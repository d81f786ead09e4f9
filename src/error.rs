//! Error types.
//!
//! Legality queries never fail; they answer `false` or an empty set. Errors
//! only come out of the mutation API: [`StructuralViolation`] when a board
//! change would break the board's own invariants, and [`MoveError`] when the
//! game driver refuses a move.

use crate::hex::{Coordinate, HexCoord};
use crate::piece::{PieceId, Player};
use thiserror::Error;

/// A contract violation of [`Board::place`](crate::Board::place) or
/// [`Board::relocate`](crate::Board::relocate)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralViolation {
    #[error("{piece} cannot stack on the occupied cell {at}")]
    OccupiedBelowCapacity { piece: PieceId, at: HexCoord },
    #[error("{piece} cannot go to {at}, which is outside the playable range")]
    OutOfRange { piece: PieceId, at: HexCoord },
    #[error("{0} is already on the board")]
    AlreadyPlaced(PieceId),
    #[error("{0} is not on the board")]
    NotOnBoard(PieceId),
    #[error("{0} is covered and cannot be lifted")]
    Covered(PieceId),
    #[error("{0} is not part of this game")]
    UnknownPiece(PieceId),
}

/// Why the game driver rejected a move
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("{piece} cannot move to {target}")]
    Illegal { piece: PieceId, target: Coordinate },
    #[error("{0} has a legal move and cannot pass")]
    PassNotAllowed(Player),
    #[error(transparent)]
    Structural(#[from] StructuralViolation),
}
