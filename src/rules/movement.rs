//! # Movement Rules
//!
//! Raw destinations for a tile, before the one hive filter. Placement works
//! from the board; every on-board generator works from a [`LiftedHive`], so
//! the mover never blocks its own path.
//!
//! Ground movement is made of slide steps. A tile slides from one cell to an
//! adjacent empty cell only if exactly one of the two cells bordering both is
//! occupied: with both occupied the gap is too narrow to pass (freedom to
//! move), with neither occupied the tile would leave the edge of the hive.

use super::connectivity::LiftedHive;
use crate::board::Board;
use crate::hex::{Coordinate, Direction, HexCoord};
use crate::piece::{PieceKind, Player};
use std::collections::{HashSet, VecDeque};

/// Number of steps in a spider move
const SPIDER_STEPS: usize = 3;

/// Cells where `player` may put a tile from reserve.
///
/// `turn` is the game turn counter starting at 1. The first tile of the game
/// goes on the origin, the reply goes anywhere next to it, and from then on a
/// new tile must touch its own colour and no enemy tile.
pub fn placement_destinations(board: &Board, player: Player, turn: u32) -> HashSet<Coordinate> {
    if board.is_empty() {
        return HashSet::from([Coordinate::from(HexCoord::ORIGIN)]);
    }

    let frontier = board
        .occupied_hexes()
        .flat_map(|hex| hex.neighbors())
        .filter(|&hex| !board.is_occupied(hex));

    if turn <= 2 {
        return frontier.map(Coordinate::from).collect();
    }

    frontier
        .filter(|&hex| {
            let mut touches_own = false;
            let mut touches_opponent = false;
            for neighbor in hex.neighbors() {
                if let Some(top) = board.top_piece_at(neighbor) {
                    if top.player() == player {
                        touches_own = true;
                    } else {
                        touches_opponent = true;
                    }
                }
            }
            touches_own && !touches_opponent
        })
        .map(Coordinate::from)
        .collect()
}

/// Raw destinations of a lifted tile, dispatched on its kind
pub fn movement_destinations(hive: &LiftedHive, kind: PieceKind) -> HashSet<Coordinate> {
    match kind {
        PieceKind::Queen => ground(queen_moves(hive)),
        PieceKind::Beetle => beetle_moves(hive),
        PieceKind::Grasshopper => ground(grasshopper_moves(hive)),
        PieceKind::Spider => ground(spider_moves(hive)),
        PieceKind::Ant => ground(ant_moves(hive)),
    }
}

fn ground(cells: HashSet<HexCoord>) -> HashSet<Coordinate> {
    cells.into_iter().map(Coordinate::from).collect()
}

/// Check if a tile can physically slide from one cell to an adjacent empty one
fn can_slide(hive: &LiftedHive, from: HexCoord, to: HexCoord) -> bool {
    match from.common_neighbors(to) {
        Some([left, right]) => hive.is_occupied(left) != hive.is_occupied(right),
        None => false,
    }
}

/// Empty cells reachable from `from` by one slide step
fn slides_from(hive: &LiftedHive, from: HexCoord) -> impl Iterator<Item = HexCoord> + '_ {
    from.neighbors()
        .into_iter()
        .filter(move |&to| !hive.is_occupied(to) && can_slide(hive, from, to))
}

/// Queen Bee: one slide step
fn queen_moves(hive: &LiftedHive) -> HashSet<HexCoord> {
    slides_from(hive, hive.origin()).collect()
}

/// Beetle: one step in any direction, onto or off the hive.
///
/// Heights decide the gate: the step is blocked when both cells bordering
/// the move stand higher than both the height the beetle leaves from and the
/// height it lands on. At ground level this is the slide rule.
fn beetle_moves(hive: &LiftedHive) -> HashSet<Coordinate> {
    let from = hive.origin();
    let from_height = hive.layer();

    from.neighbors()
        .into_iter()
        .filter_map(|to| {
            let [left, right] = from.common_neighbors(to)?;
            let (h_left, h_right) = (hive.height(left), hive.height(right));
            let to_height = hive.height(to);
            let travel_height = from_height.max(to_height);

            let gated = h_left.min(h_right) > travel_height;
            let touching = travel_height > 0 || h_left.max(h_right) > 0;
            (!gated && touching).then(|| to.at_layer(to_height))
        })
        .collect()
}

/// Grasshopper: jump in a straight line over at least one tile
fn grasshopper_moves(hive: &LiftedHive) -> HashSet<HexCoord> {
    let from = hive.origin();

    Direction::ALL
        .into_iter()
        .filter(|&d| hive.is_occupied(from.neighbor(d)))
        .filter_map(|d| from.line_beyond(d).find(|&hex| !hive.is_occupied(hex)))
        .collect()
}

/// Spider: end cells of every path of exactly three slide steps that never
/// visits a cell twice
fn spider_moves(hive: &LiftedHive) -> HashSet<HexCoord> {
    let mut found = HashSet::new();
    let mut path = Vec::with_capacity(SPIDER_STEPS + 1);
    path.push(hive.origin());
    extend_spider_path(hive, &mut path, &mut found);
    found
}

fn extend_spider_path(
    hive: &LiftedHive,
    path: &mut Vec<HexCoord>,
    found: &mut HashSet<HexCoord>,
) {
    let Some(&here) = path.last() else {
        return;
    };
    if path.len() == SPIDER_STEPS + 1 {
        found.insert(here);
        return;
    }

    for next in slides_from(hive, here) {
        if path.contains(&next) {
            continue;
        }
        path.push(next);
        extend_spider_path(hive, path, found);
        path.pop();
    }
}

/// Ant: any number of slide steps around the hive
fn ant_moves(hive: &LiftedHive) -> HashSet<HexCoord> {
    let origin = hive.origin();
    let mut visited = HashSet::from([origin]);
    let mut queue = VecDeque::from([origin]);

    while let Some(current) = queue.pop_front() {
        for next in slides_from(hive, current) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    visited.remove(&origin);
    visited
}
