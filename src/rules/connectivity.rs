//! # One Hive Rule
//!
//! The tiles on the board must always form a single connected group. A move
//! is checked on its end position: the mover is lifted off the board once,
//! and each candidate destination is then tested against that lifted hive
//! instead of rebuilding the whole cell set per candidate.
//!
//! Lifting a tile leaves a connected hive or it does not. If it does not,
//! the tile is load-bearing and cannot move at all: the hive would be split
//! while the tile is in transit, even if some landing cell happens to join
//! the pieces up again. If it does, the end position is connected exactly
//! when the destination touches the lifted hive or lands on top of it.

use crate::board::Board;
use crate::hex::HexCoord;
use crate::piece::PieceId;
use std::collections::{HashMap, HashSet, VecDeque};

/// Whether a set of cells forms one group under hex adjacency.
///
/// Zero or one cell is trivially connected.
pub fn is_connected(cells: &HashSet<HexCoord>) -> bool {
    let Some(&start) = cells.iter().next() else {
        return true;
    };

    // BFS to check connectivity
    let mut visited = HashSet::with_capacity(cells.len());
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in current.neighbors() {
            if cells.contains(&neighbor) && visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited.len() == cells.len()
}

/// Whether the tiles currently on the board form one group
pub fn hive_is_connected(board: &Board) -> bool {
    is_connected(&board.occupied_hexes().collect())
}

/// The board as seen by a tile that has been picked up.
///
/// Heights count the tiles left on each cell once the mover is gone, so the
/// mover's own cell is empty unless it was standing on other tiles.
#[derive(Debug, Clone)]
pub struct LiftedHive {
    origin: HexCoord,
    /// Number of tiles the mover was standing on
    layer: u32,
    heights: HashMap<HexCoord, u32>,
    intact: bool,
}

impl LiftedHive {
    /// Pick up a tile. `None` if it is in reserve, unknown, or pinned under
    /// another tile.
    pub fn lift(board: &Board, mover: PieceId) -> Option<Self> {
        let at = board.piece(mover)?.position()?;
        if board.is_covered(mover) {
            return None;
        }

        let mut heights: HashMap<HexCoord, u32> = board
            .occupied_hexes()
            .map(|hex| (hex, board.stack_height_at(hex) as u32))
            .collect();
        if at.layer == 0 {
            heights.remove(&at.hex);
        } else {
            heights.insert(at.hex, at.layer);
        }

        let intact = at.layer > 0 || is_connected(&heights.keys().copied().collect());

        Some(Self {
            origin: at.hex,
            layer: at.layer,
            heights,
            intact,
        })
    }

    /// The cell the mover was lifted from
    pub fn origin(&self) -> HexCoord {
        self.origin
    }

    /// Height the mover starts from (0 on the ground)
    pub fn layer(&self) -> u32 {
        self.layer
    }

    pub fn height(&self, hex: HexCoord) -> u32 {
        self.heights.get(&hex).copied().unwrap_or(0)
    }

    pub fn is_occupied(&self, hex: HexCoord) -> bool {
        self.heights.contains_key(&hex)
    }

    /// Cells still occupied with the mover lifted
    pub fn cells(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.heights.keys().copied()
    }

    /// Whether the remaining tiles still form one group
    pub fn is_intact(&self) -> bool {
        self.intact
    }

    /// Whether putting the mover down on `to` leaves a single hive
    pub fn keeps_hive_with(&self, to: HexCoord) -> bool {
        if self.heights.is_empty() {
            return true;
        }
        let touches = to.neighbors().into_iter().any(|n| self.is_occupied(n));
        self.intact && (self.is_occupied(to) || touches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::Coordinate;
    use crate::piece::{PieceKind, Player};

    fn cells(list: &[(i32, i32)]) -> HashSet<HexCoord> {
        list.iter().map(|&(q, r)| HexCoord::new(q, r)).collect()
    }

    #[test]
    fn test_trivial_sets_are_connected() {
        assert!(is_connected(&HashSet::new()));
        assert!(is_connected(&cells(&[(5, -3)])));
    }

    #[test]
    fn test_connectivity() {
        assert!(is_connected(&cells(&[(0, 0), (0, -1), (1, -1), (2, -1)])));
        assert!(!is_connected(&cells(&[(0, 0), (2, 0)])));
        assert!(!is_connected(&cells(&[(0, 0), (0, 1), (0, 3), (0, 4)])));
    }

    /// Line of four: wQ (0,0), bQ (0,-1), wA1 (0,1), bA1 (0,-2)
    fn line_board() -> Board {
        let mut board = Board::new();
        board.place(PieceId::queen(Player::White), Coordinate::ground(0, 0)).unwrap();
        board.place(PieceId::queen(Player::Black), Coordinate::ground(0, -1)).unwrap();
        board
            .place(PieceId::new(Player::White, PieceKind::Ant, 1), Coordinate::ground(0, 1))
            .unwrap();
        board
            .place(PieceId::new(Player::Black, PieceKind::Ant, 1), Coordinate::ground(0, -2))
            .unwrap();
        board
    }

    #[test]
    fn test_load_bearing_piece_is_not_intact() {
        let board = line_board();
        assert!(hive_is_connected(&board));
        let hive = LiftedHive::lift(&board, PieceId::queen(Player::White)).unwrap();
        assert!(!hive.is_intact());
        assert!(!hive.keeps_hive_with(HexCoord::new(1, -1)));
    }

    #[test]
    fn test_end_piece_is_intact() {
        let board = line_board();
        let ant = PieceId::new(Player::White, PieceKind::Ant, 1);
        let hive = LiftedHive::lift(&board, ant).unwrap();
        assert!(hive.is_intact());
        assert!(!hive.is_occupied(HexCoord::new(0, 1)));
        assert_eq!(hive.origin(), HexCoord::new(0, 1));
        assert!(hive.keeps_hive_with(HexCoord::new(1, -2)));
        assert!(!hive.keeps_hive_with(HexCoord::new(0, 2)));
    }

    #[test]
    fn test_incremental_check_matches_rebuilt_set() {
        let board = line_board();
        for piece in board.pieces().filter(|p| p.is_on_board()) {
            let hive = LiftedHive::lift(&board, piece.id).unwrap();
            let rest: HashSet<HexCoord> = hive.cells().collect();
            for q in -3..=3 {
                for r in -4..=3 {
                    let to = HexCoord::new(q, r);
                    if !hive.is_intact() {
                        assert!(!hive.keeps_hive_with(to));
                        continue;
                    }
                    let mut after = rest.clone();
                    after.insert(to);
                    assert_eq!(
                        hive.keeps_hive_with(to),
                        is_connected(&after),
                        "{} to {}",
                        piece.id,
                        to
                    );
                }
            }
        }
    }

    #[test]
    fn test_beetle_on_stack_leaves_cell_occupied() {
        let mut board = line_board();
        let beetle = PieceId::new(Player::White, PieceKind::Beetle, 1);
        board.place(beetle, Coordinate::ground(0, 0)).unwrap();
        let hive = LiftedHive::lift(&board, beetle).unwrap();
        assert_eq!(hive.layer(), 1);
        assert_eq!(hive.height(HexCoord::ORIGIN), 1);
        assert!(hive.is_intact());

        // The queen under it cannot be lifted at all
        assert!(LiftedHive::lift(&board, PieceId::queen(Player::White)).is_none());
    }

    #[test]
    fn test_reserve_piece_cannot_be_lifted() {
        let board = line_board();
        let in_hand = PieceId::new(Player::Black, PieceKind::Spider, 1);
        assert!(LiftedHive::lift(&board, in_hand).is_none());
    }
}
