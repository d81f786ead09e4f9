//! # Turn and Phase Policy
//!
//! Which kind of move a tile may make on a given turn:
//! - White moves on odd turns, Black on even turns
//! - Turns 1 and 2 are placements (there is nothing of the mover's to move yet)
//! - A player's Queen must be on the board by their fourth move; until then,
//!   on that move every other tile is frozen
//! - Tiles on the board may only move once their owner's Queen is placed
//!   (a rule variant, see [`Rules::relocation_requires_queen`])

use crate::board::Board;
use crate::piece::{Piece, PieceKind, Player};
use thiserror::Error;

/// Rule variants the engine supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Tiles on the board cannot move until their owner's Queen is placed.
    ///
    /// Common house rule; the official rules only forbid it implicitly
    /// through the queen deadline.
    pub relocation_requires_queen: bool,
    /// Personal move number by which the Queen must be placed
    pub queen_deadline: u32,
}

impl Rules {
    pub fn with_relocation_requires_queen(mut self, required: bool) -> Self {
        self.relocation_requires_queen = required;
        self
    }

    pub fn with_queen_deadline(mut self, personal_move: u32) -> Self {
        self.queen_deadline = personal_move;
        self
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            relocation_requires_queen: true,
            queen_deadline: 4,
        }
    }
}

/// The turn counter plus the rules it is played under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    /// Turn number (starts at 1)
    turn: u32,
    rules: Rules,
}

impl TurnState {
    /// Turn `turn` under the default rules; turn numbers start at 1
    pub fn new(turn: u32) -> Self {
        Self::with_rules(turn, Rules::default())
    }

    pub fn with_rules(turn: u32, rules: Rules) -> Self {
        Self {
            turn: turn.max(1),
            rules,
        }
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn player_to_move(&self) -> Player {
        if self.turn % 2 == 1 {
            Player::White
        } else {
            Player::Black
        }
    }

    /// How many moves the player to move has made, counting this one
    pub fn personal_move(&self) -> u32 {
        (self.turn + 1) / 2
    }

    /// The state after one more completed move
    pub fn next(self) -> Self {
        Self {
            turn: self.turn + 1,
            ..self
        }
    }
}

/// What a tile may do this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Enter the board from reserve
    Placement,
    /// Move to another cell
    Relocation,
}

/// Why the policy refuses to let a tile move this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("it is {to_move}'s turn")]
    NotYourTurn { to_move: Player },
    #[error("{0} must place the Queen on this move")]
    QueenDeadline(Player),
    #[error("{0} has not placed the Queen yet")]
    QueenNotPlaced(Player),
}

/// Decide whether `piece` may be placed or moved on this turn
pub fn permission(piece: &Piece, board: &Board, state: &TurnState) -> Result<Phase, Denial> {
    let player = piece.player();
    let to_move = state.player_to_move();
    if player != to_move {
        return Err(Denial::NotYourTurn { to_move });
    }

    let queen_placed = board.is_queen_placed(player);
    if !queen_placed
        && piece.kind() != PieceKind::Queen
        && state.personal_move() >= state.rules().queen_deadline
    {
        return Err(Denial::QueenDeadline(player));
    }

    if !piece.is_on_board() {
        return Ok(Phase::Placement);
    }
    if state.rules().relocation_requires_queen && !queen_placed {
        return Err(Denial::QueenNotPlaced(player));
    }
    Ok(Phase::Relocation)
}
