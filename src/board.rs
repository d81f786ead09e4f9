//! # Board State
//!
//! Every tile of both players plus an index from cell to the stack of tiles
//! on it (bottom to top). The board is a plain value: queries borrow it,
//! clones are independent snapshots, and the only mutations are
//! [`Board::place`] and [`Board::relocate`].
//!
//! The board enforces its structural invariants (one tile per layer, stacking
//! only for beetles, every tile either in reserve or on the board). Game-rule
//! legality is the validator's job.

use crate::error::StructuralViolation;
use crate::hex::{Coordinate, HexCoord};
use crate::piece::{Piece, PieceId, PieceKind, Placement, Player, PIECES_PER_PLAYER};
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// All 22 tiles, indexed by `PieceId::slot`
    pieces: Vec<Piece>,
    /// The board: maps hex coordinates to stacks of pieces (bottom to top)
    stacks: HashMap<HexCoord, Vec<PieceId>>,
}

impl Board {
    /// Create a board with both players' full inventory in reserve
    pub fn new() -> Self {
        let pieces = Player::all()
            .into_iter()
            .flat_map(PieceId::set_of)
            .map(Piece::in_reserve)
            .collect::<Vec<_>>();
        debug_assert_eq!(pieces.len(), 2 * PIECES_PER_PLAYER);

        Self {
            pieces,
            stacks: HashMap::new(),
        }
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        id.slot().and_then(|slot| self.pieces.get(slot))
    }

    /// Every tile of the game, on board or not
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// The full stack at a cell, bottom to top
    pub fn stack_at(&self, hex: HexCoord) -> &[PieceId] {
        self.stacks.get(&hex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get the top piece at a position (if any)
    pub fn top_piece_at(&self, hex: HexCoord) -> Option<&Piece> {
        self.stack_at(hex).last().and_then(|&id| self.piece(id))
    }

    /// Number of tiles stacked on a cell; a tile landing there takes this layer
    pub fn stack_height_at(&self, hex: HexCoord) -> usize {
        self.stack_at(hex).len()
    }

    pub fn is_occupied(&self, hex: HexCoord) -> bool {
        !self.stack_at(hex).is_empty()
    }

    /// Get all occupied cells (one entry per cell)
    pub fn occupied_hexes(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.stacks.keys().copied()
    }

    /// Top-of-stack coordinate of every occupied cell
    pub fn occupied_cells(&self) -> HashSet<Coordinate> {
        self.stacks
            .iter()
            .map(|(hex, stack)| hex.at_layer(stack.len() as u32 - 1))
            .collect()
    }

    /// Every tile except the one named
    pub fn all_pieces_except(&self, id: PieceId) -> HashSet<Piece> {
        self.pieces.iter().filter(|p| p.id != id).copied().collect()
    }

    /// Whether a tile sits under another one and so cannot move
    pub fn is_covered(&self, id: PieceId) -> bool {
        match self.piece(id).and_then(Piece::position) {
            Some(at) => self.stack_at(at.hex).last() != Some(&id),
            None => false,
        }
    }

    /// Tiles of a player still in hand
    pub fn reserve(&self, player: Player) -> impl Iterator<Item = &Piece> {
        self.pieces
            .iter()
            .filter(move |p| p.player() == player && !p.is_on_board())
    }

    pub fn reserve_count(&self, player: Player, kind: PieceKind) -> usize {
        self.reserve(player).filter(|p| p.kind() == kind).count()
    }

    /// Lowest-numbered tile of a kind still in a player's hand
    pub fn next_in_reserve(&self, player: Player, kind: PieceKind) -> Option<PieceId> {
        self.reserve(player).map(|p| p.id).find(|id| id.kind == kind)
    }

    /// Get all pieces of a player currently on the board
    pub fn pieces_on_board(&self, player: Player) -> impl Iterator<Item = &Piece> {
        self.pieces
            .iter()
            .filter(move |p| p.player() == player && p.is_on_board())
    }

    pub fn queen_position(&self, player: Player) -> Option<Coordinate> {
        self.piece(PieceId::queen(player)).and_then(Piece::position)
    }

    /// Check if player's queen is placed
    pub fn is_queen_placed(&self, player: Player) -> bool {
        self.queen_position(player).is_some()
    }

    /// True before the first placement of the game
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Put a tile from reserve onto a cell.
    ///
    /// The tile lands on top of whatever is there, so the layer of `at` is
    /// ignored and the landing coordinate is returned.
    pub fn place(
        &mut self,
        id: PieceId,
        at: Coordinate,
    ) -> Result<Coordinate, StructuralViolation> {
        let piece = self.piece(id).ok_or(StructuralViolation::UnknownPiece(id))?;
        if piece.is_on_board() {
            return Err(StructuralViolation::AlreadyPlaced(id));
        }
        if !at.hex.is_in_range() {
            return Err(StructuralViolation::OutOfRange { piece: id, at: at.hex });
        }
        if self.is_occupied(at.hex) && !id.kind.can_climb() {
            return Err(StructuralViolation::OccupiedBelowCapacity { piece: id, at: at.hex });
        }
        Ok(self.push(id, at.hex))
    }

    /// Move a tile already on the board to another cell.
    ///
    /// Only the top tile of a stack can be lifted. As with [`Board::place`],
    /// the landing layer is resolved from the destination stack.
    pub fn relocate(
        &mut self,
        id: PieceId,
        to: Coordinate,
    ) -> Result<Coordinate, StructuralViolation> {
        let piece = self.piece(id).ok_or(StructuralViolation::UnknownPiece(id))?;
        let from = piece.position().ok_or(StructuralViolation::NotOnBoard(id))?;
        if self.is_covered(id) {
            return Err(StructuralViolation::Covered(id));
        }
        if !to.hex.is_in_range() {
            return Err(StructuralViolation::OutOfRange { piece: id, at: to.hex });
        }

        let mut landing_height = self.stack_height_at(to.hex);
        if to.hex == from.hex {
            landing_height -= 1;
        }
        if landing_height > 0 && !id.kind.can_climb() {
            return Err(StructuralViolation::OccupiedBelowCapacity { piece: id, at: to.hex });
        }

        if let Some(stack) = self.stacks.get_mut(&from.hex) {
            stack.pop();
            if stack.is_empty() {
                self.stacks.remove(&from.hex);
            }
        }
        Ok(self.push(id, to.hex))
    }

    fn push(&mut self, id: PieceId, hex: HexCoord) -> Coordinate {
        let stack = self.stacks.entry(hex).or_default();
        let at = hex.at_layer(stack.len() as u32);
        stack.push(id);
        if let Some(piece) = id.slot().and_then(|slot| self.pieces.get_mut(slot)) {
            piece.placement = Placement::OnBoard(at);
        }
        at
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stacks.is_empty() {
            return writeln!(f, "(empty)");
        }

        // Find bounds
        let mut min_q = i32::MAX;
        let mut max_q = i32::MIN;
        let mut min_r = i32::MAX;
        let mut max_r = i32::MIN;
        for hex in self.stacks.keys() {
            min_q = min_q.min(hex.q);
            max_q = max_q.max(hex.q);
            min_r = min_r.min(hex.r);
            max_r = max_r.max(hex.r);
        }

        // Rows of constant r, shifted so that axial neighbors line up
        for r in (min_r - 1)..=(max_r + 1) {
            for _ in 0..(r - min_r + 1) {
                write!(f, "  ")?;
            }
            for q in (min_q - 1)..=(max_q + 1) {
                let hex = HexCoord::new(q, r);
                match self.top_piece_at(hex) {
                    Some(top) if self.stack_height_at(hex) > 1 => {
                        write!(f, "{:<3}+", top.id.to_string())?
                    }
                    Some(top) => write!(f, "{:<4}", top.id.to_string())?,
                    None => write!(f, " .  ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
