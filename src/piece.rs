//! # Pieces
//!
//! Players, piece kinds and the stable identity of every tile in the game.
//! Each player owns eleven tiles for the whole game:
//! - **Queen Bee** x1: moves one space
//! - **Beetle** x2: moves one space, can climb on top of the hive
//! - **Grasshopper** x3: jumps in a straight line over pieces
//! - **Spider** x2: moves exactly three spaces around the hive
//! - **Ant** x3: moves any number of spaces around the hive

use crate::hex::Coordinate;
use std::fmt;

/// The two sides of a game; White always moves first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn all() -> [Player; 2] {
        [Player::White, Player::Black]
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Get player index (0 for White, 1 for Black)
    pub fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    pub fn char(self) -> char {
        match self {
            Player::White => 'w',
            Player::Black => 'b',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

/// Piece types in Hive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Queen,
    Beetle,
    Grasshopper,
    Spider,
    Ant,
}

impl PieceKind {
    /// Get all piece types
    pub fn all() -> &'static [PieceKind] {
        &[
            PieceKind::Queen,
            PieceKind::Beetle,
            PieceKind::Grasshopper,
            PieceKind::Spider,
            PieceKind::Ant,
        ]
    }

    /// Get the count of each piece type per player
    pub fn count_per_player(self) -> u8 {
        match self {
            PieceKind::Queen => 1,
            PieceKind::Beetle => 2,
            PieceKind::Grasshopper => 3,
            PieceKind::Spider => 2,
            PieceKind::Ant => 3,
        }
    }

    /// Position of the first piece of this kind within a player's set
    fn first_slot(self) -> usize {
        match self {
            PieceKind::Queen => 0,
            PieceKind::Beetle => 1,
            PieceKind::Grasshopper => 3,
            PieceKind::Spider => 6,
            PieceKind::Ant => 8,
        }
    }

    /// Only beetles may share a cell with another piece
    pub fn can_climb(self) -> bool {
        matches!(self, PieceKind::Beetle)
    }

    /// Get a single-character representation of the piece
    pub fn char(self) -> char {
        match self {
            PieceKind::Queen => 'Q',
            PieceKind::Beetle => 'B',
            PieceKind::Grasshopper => 'G',
            PieceKind::Spider => 'S',
            PieceKind::Ant => 'A',
        }
    }
}

/// Number of tiles each player owns
pub const PIECES_PER_PLAYER: usize = 11;

/// Stable identity of a tile: owner, kind and sequence number (from 1).
///
/// Displays in Hive notation, e.g. `wQ`, `bA2`. Kinds with a single tile
/// carry no number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId {
    pub player: Player,
    pub kind: PieceKind,
    pub number: u8,
}

impl PieceId {
    pub fn new(player: Player, kind: PieceKind, number: u8) -> Self {
        Self {
            player,
            kind,
            number,
        }
    }

    /// Shorthand for a player's queen
    pub fn queen(player: Player) -> Self {
        Self::new(player, PieceKind::Queen, 1)
    }

    /// Every tile of one player, in inventory order
    pub fn set_of(player: Player) -> impl Iterator<Item = PieceId> {
        PieceKind::all().iter().flat_map(move |&kind| {
            (1..=kind.count_per_player()).map(move |number| PieceId::new(player, kind, number))
        })
    }

    /// Dense index into a full two-player inventory, `None` for ids that
    /// name a tile outside the game's quantities
    pub(crate) fn slot(self) -> Option<usize> {
        if self.number == 0 || self.number > self.kind.count_per_player() {
            return None;
        }
        Some(
            self.player.index() * PIECES_PER_PLAYER
                + self.kind.first_slot()
                + usize::from(self.number - 1),
        )
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.player.char(), self.kind.char())?;
        if self.kind.count_per_player() > 1 {
            write!(f, "{}", self.number)?;
        }
        Ok(())
    }
}

/// Where a tile currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Still in the player's hand
    Reserve,
    OnBoard(Coordinate),
}

/// A tile and its current placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub id: PieceId,
    pub placement: Placement,
}

impl Piece {
    pub fn in_reserve(id: PieceId) -> Self {
        Self {
            id,
            placement: Placement::Reserve,
        }
    }

    pub fn player(&self) -> Player {
        self.id.player
    }

    pub fn kind(&self) -> PieceKind {
        self.id.kind
    }

    pub fn position(&self) -> Option<Coordinate> {
        match self.placement {
            Placement::Reserve => None,
            Placement::OnBoard(at) => Some(at),
        }
    }

    pub fn is_on_board(&self) -> bool {
        self.position().is_some()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.placement {
            Placement::Reserve => write!(f, "{} (reserve)", self.id),
            Placement::OnBoard(at) => write!(f, "{} {}", self.id, at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_inventory_size() {
        let total: u8 = PieceKind::all().iter().map(|k| k.count_per_player()).sum();
        assert_eq!(usize::from(total), PIECES_PER_PLAYER);
        assert_eq!(PieceId::set_of(Player::Black).count(), PIECES_PER_PLAYER);
    }

    #[test]
    fn test_slots_are_dense_and_unique() {
        let slots: HashSet<usize> = Player::all()
            .into_iter()
            .flat_map(PieceId::set_of)
            .map(|id| id.slot().unwrap())
            .collect();
        assert_eq!(slots, (0..2 * PIECES_PER_PLAYER).collect());
    }

    #[test]
    fn test_out_of_range_ids_have_no_slot() {
        assert!(PieceId::new(Player::White, PieceKind::Queen, 2).slot().is_none());
        assert!(PieceId::new(Player::White, PieceKind::Ant, 0).slot().is_none());
        assert!(PieceId::new(Player::Black, PieceKind::Spider, 3).slot().is_none());
    }

    #[test]
    fn test_notation() {
        assert_eq!(PieceId::queen(Player::White).to_string(), "wQ");
        assert_eq!(PieceId::new(Player::Black, PieceKind::Ant, 2).to_string(), "bA2");
        assert_eq!(PieceId::new(Player::White, PieceKind::Beetle, 1).to_string(), "wB1");
    }

    #[test]
    fn test_only_beetles_climb() {
        for kind in PieceKind::all() {
            assert_eq!(kind.can_climb(), *kind == PieceKind::Beetle);
        }
    }
}
