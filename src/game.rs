//! # Game Driver
//!
//! Owns a board and the turn counter, checks every intent with the move
//! validator before touching the board, and decides when the game is over:
//! a player wins when the opposing Queen is surrounded on all six sides, and
//! the game is drawn when both Queens are surrounded at once.

use crate::board::Board;
use crate::error::MoveError;
use crate::hex::Coordinate;
use crate::piece::{PieceId, Player};
use crate::rules::{all_legal_moves, is_legal, Move, Rules, TurnState};
use crate::GameState;
use log::{debug, warn};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

/// A game in progress
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    state: TurnState,
    history: Vec<Move>,
}

impl Game {
    /// Start a game under the default rules
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    pub fn with_rules(rules: Rules) -> Self {
        Self::from_board(Board::new(), TurnState::with_rules(1, rules))
    }

    /// Resume from an arbitrary position
    pub fn from_board(board: Board, state: TurnState) -> Self {
        Self {
            board,
            state,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn_state(&self) -> &TurnState {
        &self.state
    }

    /// Moves applied through this driver, oldest first
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn current_player(&self) -> Player {
        self.state.player_to_move()
    }

    /// All moves available to the player to move; empty means they must pass
    pub fn legal_moves(&self) -> Vec<Move> {
        all_legal_moves(&self.board, &self.state)
    }

    /// Place or move `piece` to `target`, then hand the turn over
    pub fn play(&mut self, piece: PieceId, target: Coordinate) -> Result<(), MoveError> {
        if self.status() != GameStatus::InProgress {
            return Err(MoveError::GameOver);
        }
        if !is_legal(piece, target, &self.board, &self.state) {
            return Err(MoveError::Illegal { piece, target });
        }

        let from = self.board.piece(piece).and_then(|p| p.position());
        let mv = match from {
            None => Move::Place {
                piece,
                to: self.board.place(piece, target)?,
            },
            Some(from) => Move::Relocate {
                piece,
                from,
                to: self.board.relocate(piece, target)?,
            },
        };
        self.finish_turn(mv);
        Ok(())
    }

    /// Skip a turn. Only allowed when the player to move has nothing to play.
    pub fn pass(&mut self) -> Result<(), MoveError> {
        if self.status() != GameStatus::InProgress {
            return Err(MoveError::GameOver);
        }
        if !self.legal_moves().is_empty() {
            return Err(MoveError::PassNotAllowed(self.current_player()));
        }
        self.finish_turn(Move::Pass);
        Ok(())
    }

    /// Apply a move produced by [`Game::legal_moves`]
    pub fn apply(&mut self, mv: &Move) -> Result<(), MoveError> {
        match *mv {
            Move::Place { piece, to } | Move::Relocate { piece, to, .. } => self.play(piece, to),
            Move::Pass => self.pass(),
        }
    }

    /// Copy of this game with `mv` applied
    pub fn after(&self, mv: &Move) -> Result<Game, MoveError> {
        let mut next = self.clone();
        next.apply(mv)?;
        Ok(next)
    }

    /// Number of move sequences `depth` plies deep from here, passes
    /// included. A refused move is an error, never a skipped branch.
    pub fn perft(&self, depth: u32) -> Result<u64, MoveError> {
        if depth == 0 {
            return Ok(1);
        }
        let moves = self.get_possible_moves();
        if depth == 1 {
            return Ok(moves.len() as u64);
        }
        moves
            .iter()
            .map(|mv| self.after(mv)?.perft(depth - 1))
            .sum()
    }

    fn finish_turn(&mut self, mv: Move) {
        debug!("turn {} ({}): {}", self.state.turn(), self.current_player(), mv);
        self.history.push(mv);
        self.state = self.state.next();
    }

    /// Whether all six cells around the player's Queen are occupied
    pub fn is_queen_surrounded(&self, player: Player) -> bool {
        self.board
            .queen_position(player)
            .is_some_and(|at| at.hex.neighbors().into_iter().all(|n| self.board.is_occupied(n)))
    }

    pub fn status(&self) -> GameStatus {
        let white_surrounded = self.is_queen_surrounded(Player::White);
        let black_surrounded = self.is_queen_surrounded(Player::Black);

        match (white_surrounded, black_surrounded) {
            (true, true) => GameStatus::Draw,
            (true, false) => GameStatus::Won(Player::Black),
            (false, true) => GameStatus::Won(Player::White),
            (false, false) => GameStatus::InProgress,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Game {
    type Move = Move;
    type Player = Player;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        let moves = self.legal_moves();
        if moves.is_empty() {
            vec![Move::Pass]
        } else {
            moves
        }
    }

    fn make_move(&mut self, mv: &Self::Move) {
        if let Err(err) = self.apply(mv) {
            warn!("rejected {} on turn {}: {}", mv, self.state.turn(), err);
        }
    }

    fn is_terminal(&self) -> bool {
        self.status() != GameStatus::InProgress
    }

    fn get_winner(&self) -> Option<Self::Player> {
        match self.status() {
            GameStatus::Won(player) => Some(player),
            GameStatus::Draw | GameStatus::InProgress => None,
        }
    }

    fn get_current_player(&self) -> Self::Player {
        self.current_player()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status() {
            GameStatus::InProgress => writeln!(
                f,
                "Turn {}, {} to move",
                self.state.turn(),
                self.current_player()
            )?,
            GameStatus::Won(player) => writeln!(f, "{} wins", player)?,
            GameStatus::Draw => writeln!(f, "Draw")?,
        }
        write!(f, "{}", self.board)
    }
}
