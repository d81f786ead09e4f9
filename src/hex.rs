//! # Hex Coordinates
//!
//! Axial coordinates for the Hive playing surface. Hive has no board; the
//! pieces themselves form the grid, so the surface is an unbounded plane of
//! hexagons addressed by `(q, r)`.
//!
//! The hexagons use "flat-top" orientation. Neighbors in axial coords:
//! - ( 0, -1): North
//! - (+1, -1): Northeast
//! - (+1,  0): Southeast
//! - ( 0, +1): South
//! - (-1, +1): Southwest
//! - (-1,  0): Northwest
//!
//! The plane is unbounded in principle, but the board only accepts cells
//! with `|q|` and `|r|` up to [`HexCoord::LIMIT`], so neighbor and distance
//! arithmetic on board cells never overflows.
//!
//! A [`Coordinate`] adds the stacking layer (0 = ground) to a cell. Only
//! beetles ever sit above layer 0.

use std::collections::HashSet;
use std::fmt;

/// One of the six unit steps between neighboring hexes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    N,
    NE,
    SE,
    S,
    SW,
    NW,
}

impl Direction {
    /// All directions in clockwise order, starting at North
    pub const ALL: [Direction; 6] = [
        Direction::N,
        Direction::NE,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::NW,
    ];

    /// Axial `(dq, dr)` offset of a single step
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::SE => (1, 0),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::NW => (-1, 0),
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::N => 0,
            Direction::NE => 1,
            Direction::SE => 2,
            Direction::S => 3,
            Direction::SW => 4,
            Direction::NW => 5,
        }
    }

    pub fn clockwise(self) -> Direction {
        Direction::ALL[(self.index() + 1) % 6]
    }

    pub fn counter_clockwise(self) -> Direction {
        Direction::ALL[(self.index() + 5) % 6]
    }

    /// The direction leading from `from` to the adjacent cell `to`
    pub fn between(from: HexCoord, to: HexCoord) -> Option<Direction> {
        let delta = (to.q - from.q, to.r - from.r);
        Direction::ALL.into_iter().find(|d| d.offset() == delta)
    }
}

/// A single hexagonal cell in axial coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    /// The cell the first piece of every game is placed on
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    /// Largest `|q|` or `|r|` a tile may occupy
    pub const LIMIT: u32 = 1 << 24;

    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn is_in_range(self) -> bool {
        self.q.unsigned_abs() <= Self::LIMIT && self.r.unsigned_abs() <= Self::LIMIT
    }

    /// Get the neighbor in a specific direction
    pub fn neighbor(self, direction: Direction) -> HexCoord {
        let (dq, dr) = direction.offset();
        HexCoord::new(self.q + dq, self.r + dr)
    }

    /// Get all 6 neighboring hex coordinates, clockwise from North
    pub fn neighbors(self) -> [HexCoord; 6] {
        Direction::ALL.map(|d| self.neighbor(d))
    }

    pub fn is_adjacent(self, other: HexCoord) -> bool {
        Direction::between(self, other).is_some()
    }

    /// Number of single steps between two cells
    pub fn distance(self, other: HexCoord) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        (dq.unsigned_abs() + dr.unsigned_abs() + (dq + dr).unsigned_abs()) / 2
    }

    /// The two cells bordering both `self` and the adjacent cell `other`.
    ///
    /// These are the cells a piece squeezes between when it slides from one
    /// cell to the other. Returns `None` when the cells are not adjacent.
    pub fn common_neighbors(self, other: HexCoord) -> Option<[HexCoord; 2]> {
        let direction = Direction::between(self, other)?;
        Some([
            self.neighbor(direction.counter_clockwise()),
            self.neighbor(direction.clockwise()),
        ])
    }

    /// All cells exactly `radius` steps away; radius 0 is the cell itself
    pub fn ring(self, radius: u32) -> Vec<HexCoord> {
        let n = radius as i32;
        let mut cells = Vec::with_capacity((6 * radius).max(1) as usize);
        for dq in -n..=n {
            for dr in (-n).max(-dq - n)..=n.min(-dq + n) {
                let cell = HexCoord::new(self.q + dq, self.r + dr);
                if cell.distance(self) == radius {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// The endless straight line of cells beyond `self` in one direction
    pub fn line_beyond(self, direction: Direction) -> Line {
        Line {
            next: self.neighbor(direction),
            direction,
        }
    }

    pub fn at_layer(self, layer: u32) -> Coordinate {
        Coordinate { hex: self, layer }
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

/// A cell plus the stack height a piece occupies there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub hex: HexCoord,
    pub layer: u32,
}

impl Coordinate {
    pub fn new(q: i32, r: i32, layer: u32) -> Self {
        Self {
            hex: HexCoord::new(q, r),
            layer,
        }
    }

    /// A coordinate at ground level
    pub fn ground(q: i32, r: i32) -> Self {
        Self::new(q, r, 0)
    }
}

impl From<HexCoord> for Coordinate {
    fn from(hex: HexCoord) -> Self {
        hex.at_layer(0)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.layer == 0 {
            write!(f, "{}", self.hex)
        } else {
            write!(f, "{}^{}", self.hex, self.layer)
        }
    }
}

/// Iterator over a straight line of cells; never ends
#[derive(Debug, Clone)]
pub struct Line {
    next: HexCoord,
    direction: Direction,
}

impl Iterator for Line {
    type Item = HexCoord;

    fn next(&mut self) -> Option<HexCoord> {
        let current = self.next;
        self.next = current.neighbor(self.direction);
        Some(current)
    }
}

/// Neighbor of `c` in `direction`, always at ground level
pub fn neighbor(c: Coordinate, direction: Direction) -> Coordinate {
    c.hex.neighbor(direction).into()
}

/// Whether the cells of `a` and `b` touch, regardless of layer
pub fn are_adjacent(a: Coordinate, b: Coordinate) -> bool {
    a.hex.is_adjacent(b.hex)
}

/// Ground-level cells exactly `radius` steps from `center`
pub fn ring(center: Coordinate, radius: u32) -> HashSet<Coordinate> {
    center.hex.ring(radius).into_iter().map(Coordinate::from).collect()
}

/// Ground-level cells strictly beyond `a` in `direction`.
///
/// The sequence is infinite; clone it to restart from the same point.
pub fn straight_line_beyond(
    a: Coordinate,
    direction: Direction,
) -> impl Iterator<Item = Coordinate> + Clone {
    a.hex.line_beyond(direction).map(Coordinate::from)
}
