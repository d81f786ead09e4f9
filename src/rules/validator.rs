//! # Move Validator
//!
//! The entry point for legality queries. Turn policy decides whether a tile
//! is being placed or moved, the movement rules produce the raw candidates,
//! and the one hive rule filters them. Every query is a pure function of the
//! board snapshot and the turn state.

use super::connectivity::LiftedHive;
use super::movement::{movement_destinations, placement_destinations};
use super::turn::{permission, Phase, TurnState};
use crate::board::Board;
use crate::hex::Coordinate;
use crate::piece::{PieceId, PieceKind};
use log::{debug, trace};
use std::collections::HashSet;
use std::fmt;

/// A complete move by the player to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Put a tile from reserve onto the board
    Place { piece: PieceId, to: Coordinate },
    /// Move a tile already on the board
    Relocate {
        piece: PieceId,
        from: Coordinate,
        to: Coordinate,
    },
    /// Only valid when no other move exists
    Pass,
}

impl Move {
    /// The tile being moved, if any
    pub fn piece(&self) -> Option<PieceId> {
        match self {
            Move::Place { piece, .. } | Move::Relocate { piece, .. } => Some(*piece),
            Move::Pass => None,
        }
    }

    pub fn target(&self) -> Option<Coordinate> {
        match self {
            Move::Place { to, .. } | Move::Relocate { to, .. } => Some(*to),
            Move::Pass => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place { piece, to } => write!(f, "{} {}", piece, to),
            Move::Relocate { piece, from, to } => write!(f, "{} {}->{}", piece, from, to),
            Move::Pass => write!(f, "pass"),
        }
    }
}

/// Every cell `piece` may legally go to this turn.
///
/// Never fails: a tile that is not to move, is frozen by the turn policy,
/// is pinned, or holds the hive together simply gets an empty set.
pub fn legal_moves(piece: PieceId, board: &Board, state: &TurnState) -> HashSet<Coordinate> {
    let Some(tile) = board.piece(piece) else {
        debug!("{} is not part of this game", piece);
        return HashSet::new();
    };

    let mut cells = match permission(tile, board, state) {
        Ok(Phase::Placement) => {
            let cells = placement_destinations(board, tile.player(), state.turn());
            trace!("{}: {} placement cells on turn {}", piece, cells.len(), state.turn());
            cells
        }
        Ok(Phase::Relocation) => relocation_moves(piece, board),
        Err(denial) => {
            debug!("{} may not move on turn {}: {}", piece, state.turn(), denial);
            HashSet::new()
        }
    };
    // The board refuses cells past HexCoord::LIMIT
    cells.retain(|to| to.hex.is_in_range());
    cells
}

fn relocation_moves(piece: PieceId, board: &Board) -> HashSet<Coordinate> {
    let Some(hive) = LiftedHive::lift(board, piece) else {
        debug!("{} is covered", piece);
        return HashSet::new();
    };
    if !hive.is_intact() {
        debug!("{} holds the hive together", piece);
        return HashSet::new();
    }

    let candidates = movement_destinations(&hive, piece.kind);
    let total = candidates.len();
    let moves: HashSet<Coordinate> = candidates
        .into_iter()
        .filter(|to| hive.keeps_hive_with(to.hex))
        .collect();
    trace!("{}: {} of {} candidates keep one hive", piece, moves.len(), total);
    moves
}

/// Whether `piece` may go to `target` this turn.
///
/// Cells are compared by (q, r). The landing layer comes from the stack at
/// the target, so a target given at ground level is accepted for a climb.
pub fn is_legal(piece: PieceId, target: Coordinate, board: &Board, state: &TurnState) -> bool {
    legal_moves(piece, board, state)
        .into_iter()
        .any(|to| to.hex == target.hex && (target.layer == 0 || target.layer == to.layer))
}

/// Every move available to the player to move, in a stable order.
///
/// Tiles of one kind in reserve are interchangeable, so each kind is offered
/// once through its lowest-numbered tile. An empty result means the player
/// has to pass.
pub fn all_legal_moves(board: &Board, state: &TurnState) -> Vec<Move> {
    let player = state.player_to_move();
    let mut moves = Vec::new();

    for &kind in PieceKind::all() {
        let Some(piece) = board.next_in_reserve(player, kind) else {
            continue;
        };
        let mut targets: Vec<Coordinate> = legal_moves(piece, board, state).into_iter().collect();
        targets.sort();
        moves.extend(targets.into_iter().map(|to| Move::Place { piece, to }));
    }

    for tile in board.pieces_on_board(player) {
        let Some(from) = tile.position() else {
            continue;
        };
        let piece = tile.id;
        let mut targets: Vec<Coordinate> = legal_moves(piece, board, state).into_iter().collect();
        targets.sort();
        moves.extend(targets.into_iter().map(|to| Move::Relocate { piece, from, to }));
    }

    trace!("{} has {} moves on turn {}", player, moves.len(), state.turn());
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexCoord;
    use crate::piece::Player;
    use crate::rules::connectivity::is_connected;
    use crate::rules::turn::Rules;

    fn w(kind: PieceKind, number: u8) -> PieceId {
        PieceId::new(Player::White, kind, number)
    }

    fn b(kind: PieceKind, number: u8) -> PieceId {
        PieceId::new(Player::Black, kind, number)
    }

    fn board_with(tiles: &[(PieceId, (i32, i32))]) -> Board {
        let mut board = Board::new();
        for &(id, (q, r)) in tiles {
            board.place(id, Coordinate::ground(q, r)).unwrap();
        }
        board
    }

    fn ground(list: &[(i32, i32)]) -> HashSet<Coordinate> {
        list.iter().map(|&(q, r)| Coordinate::ground(q, r)).collect()
    }

    fn queens() -> Board {
        board_with(&[
            (PieceId::queen(Player::White), (0, 0)),
            (PieceId::queen(Player::Black), (0, -1)),
        ])
    }

    #[test]
    fn test_first_move() {
        let board = Board::new();
        let state = TurnState::new(1);
        assert_eq!(legal_moves(w(PieceKind::Spider, 1), &board, &state), ground(&[(0, 0)]));
        assert!(legal_moves(b(PieceKind::Spider, 1), &board, &state).is_empty());
    }

    #[test]
    fn test_placement_avoids_opponent() {
        let board = queens();
        let moves = legal_moves(w(PieceKind::Ant, 1), &board, &TurnState::new(3));
        assert_eq!(moves, ground(&[(1, 0), (0, 1), (-1, 1)]));
        for cell in &moves {
            assert!(!cell.hex.is_adjacent(HexCoord::new(0, -1)));
        }
    }

    #[test]
    fn test_queen_moves_one_step() {
        let board = queens();
        let moves = legal_moves(PieceId::queen(Player::White), &board, &TurnState::new(3));
        assert_eq!(moves, ground(&[(1, -1), (-1, 0)]));
        let neighbors: HashSet<Coordinate> =
            HexCoord::ORIGIN.neighbors().into_iter().map(Coordinate::from).collect();
        assert!(moves.is_subset(&neighbors));
    }

    #[test]
    fn test_only_player_to_move_gets_moves() {
        let board = queens();
        assert!(legal_moves(PieceId::queen(Player::Black), &board, &TurnState::new(3)).is_empty());
        assert!(!legal_moves(PieceId::queen(Player::Black), &board, &TurnState::new(4)).is_empty());
    }

    #[test]
    fn test_queen_deadline_freezes_other_pieces() {
        let board = board_with(&[
            (w(PieceKind::Ant, 1), (0, 0)),
            (PieceId::queen(Player::Black), (0, -1)),
            (w(PieceKind::Ant, 2), (0, 1)),
            (b(PieceKind::Ant, 1), (0, -2)),
            (w(PieceKind::Ant, 3), (0, 2)),
            (b(PieceKind::Ant, 2), (0, -3)),
        ]);
        let state = TurnState::new(7);
        for id in PieceId::set_of(Player::White).filter(|id| id.kind != PieceKind::Queen) {
            assert!(legal_moves(id, &board, &state).is_empty(), "{}", id);
        }
        assert!(!legal_moves(PieceId::queen(Player::White), &board, &state).is_empty());

        let moves = all_legal_moves(&board, &state);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|mv| mv.piece() == Some(PieceId::queen(Player::White))));
    }

    #[test]
    fn test_relocation_before_queen_is_a_variant() {
        let board = board_with(&[(w(PieceKind::Ant, 1), (0, 0)), (b(PieceKind::Ant, 1), (0, -1))]);
        let ant = w(PieceKind::Ant, 1);
        assert!(legal_moves(ant, &board, &TurnState::new(3)).is_empty());

        let relaxed = Rules::default().with_relocation_requires_queen(false);
        let moves = legal_moves(ant, &board, &TurnState::with_rules(3, relaxed));
        assert_eq!(moves, ground(&[(1, -1), (1, -2), (0, -2), (-1, -1), (-1, 0)]));
    }

    #[test]
    fn test_load_bearing_piece_has_no_moves() {
        // wQ (0,0) holds bQ (0,-1) and wA1 (0,1) together
        let board = board_with(&[
            (PieceId::queen(Player::White), (0, 0)),
            (PieceId::queen(Player::Black), (0, -1)),
            (w(PieceKind::Ant, 1), (0, 1)),
            (b(PieceKind::Ant, 1), (0, -2)),
        ]);
        let state = TurnState::new(5);
        assert!(legal_moves(PieceId::queen(Player::White), &board, &state).is_empty());

        let ant_moves = legal_moves(w(PieceKind::Ant, 1), &board, &state);
        assert!(!ant_moves.is_empty());
        let mut rest: HashSet<HexCoord> = board.occupied_hexes().collect();
        rest.remove(&HexCoord::new(0, 1));
        for to in ant_moves {
            let mut after = rest.clone();
            after.insert(to.hex);
            assert!(is_connected(&after), "wA1 to {}", to);
        }
    }

    #[test]
    fn test_beetle_climb_layer() {
        let board = board_with(&[
            (PieceId::queen(Player::White), (-1, 0)),
            (PieceId::queen(Player::Black), (0, -1)),
            (w(PieceKind::Beetle, 1), (0, 0)),
        ]);
        let beetle = w(PieceKind::Beetle, 1);
        let state = TurnState::new(5);
        let moves = legal_moves(beetle, &board, &state);
        assert!(moves.contains(&Coordinate::new(-1, 0, 1)));

        assert!(is_legal(beetle, Coordinate::ground(-1, 0), &board, &state));
        assert!(is_legal(beetle, Coordinate::new(-1, 0, 1), &board, &state));
        assert!(!is_legal(beetle, Coordinate::new(-1, 0, 2), &board, &state));
    }

    #[test]
    fn test_covered_piece_has_no_moves() {
        let mut board = queens();
        let beetle = b(PieceKind::Beetle, 1);
        board.place(beetle, Coordinate::ground(0, 0)).unwrap();
        assert!(legal_moves(PieceId::queen(Player::White), &board, &TurnState::new(3)).is_empty());
    }

    #[test]
    fn test_is_legal_matches_legal_moves() {
        let board = queens();
        let state = TurnState::new(3);
        let queen = PieceId::queen(Player::White);
        assert!(is_legal(queen, Coordinate::ground(1, -1), &board, &state));
        assert!(!is_legal(queen, Coordinate::ground(0, 1), &board, &state));
        assert!(!is_legal(queen, Coordinate::ground(5, 5), &board, &state));
    }

    #[test]
    fn test_queries_are_idempotent() {
        let board = queens();
        let state = TurnState::new(3);
        let snapshot = board.clone();
        let first = legal_moves(PieceId::queen(Player::White), &board, &state);
        let second = legal_moves(PieceId::queen(Player::White), &board, &state);
        assert_eq!(first, second);
        assert_eq!(all_legal_moves(&board, &state), all_legal_moves(&board, &state));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_opening_move_counts() {
        let board = Board::new();
        assert_eq!(all_legal_moves(&board, &TurnState::new(1)).len(), PieceKind::all().len());

        let board = board_with(&[(w(PieceKind::Grasshopper, 1), (0, 0))]);
        assert_eq!(all_legal_moves(&board, &TurnState::new(2)).len(), PieceKind::all().len() * 6);
    }

    #[test]
    fn test_moves_stay_inside_the_board_range() {
        let edge = HexCoord::LIMIT as i32;
        let board = board_with(&[(PieceId::queen(Player::White), (edge, 0))]);
        let moves = legal_moves(PieceId::queen(Player::Black), &board, &TurnState::new(2));
        assert_eq!(
            moves,
            ground(&[(edge, -1), (edge, 1), (edge - 1, 1), (edge - 1, 0)])
        );
        assert!(!is_legal(
            PieceId::queen(Player::Black),
            Coordinate::ground(edge + 1, 0),
            &board,
            &TurnState::new(2)
        ));
    }

    #[test]
    fn test_move_display() {
        let place = Move::Place {
            piece: w(PieceKind::Ant, 1),
            to: Coordinate::ground(1, -1),
        };
        assert_eq!(place.to_string(), "wA1 (1,-1)");
        assert_eq!(Move::Pass.to_string(), "pass");
        assert_eq!(Move::Pass.piece(), None);
    }
}
