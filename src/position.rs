//! Board coordinates, diagonal directions, and square notation.
//!
//! Positions are `(x, y)` pairs with `x` the column (file `A` is 0) and `y`
//! the row. Row 0 is the top of the board and carries rank `8`; row 7
//! carries rank `1`.
//!
//! Coordinates are signed: the command parser may produce squares such as
//! `A9` (row -1) and leaves it to the engine to reject them.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::constants::{DIRECTION_DELTAS, SIZE};
use crate::error::MoveError;

/// A tile on (or off) the board.
///
/// The derived ordering only exists so positions can be kept in a
/// `BTreeSet`; it carries no spatial meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < SIZE && self.y < SIZE
    }

    /// Row-major index into a `SIZE * SIZE` grid. Caller checks bounds.
    pub(crate) fn index(self) -> usize {
        (self.y * SIZE + self.x) as usize
    }

    /// Convert to a two-character square name (e.g. "C4").
    ///
    /// Returns `None` for positions off the board.
    pub fn to_notation(self) -> Option<String> {
        if !self.in_bounds() {
            return None;
        }
        let file = (b'A' + self.x as u8) as char;
        let rank = (b'8' - self.y as u8) as char;
        Some(format!("{file}{rank}"))
    }

    /// Parse a two-character square name, case-insensitive.
    ///
    /// Any letter and digit are accepted; `Z9` parses to an off-board
    /// position rather than failing here.
    pub fn from_notation(s: &str) -> Result<Self, MoveError> {
        match s.as_bytes() {
            [file, rank] if file.is_ascii_alphabetic() && rank.is_ascii_digit() => {
                let x = (file.to_ascii_uppercase() - b'A') as i32;
                let y = b'8' as i32 - *rank as i32;
                Ok(Self::new(x, y))
            }
            _ => Err(MoveError::ParseFailure {
                reason: "square could not be parsed",
            }),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_notation() {
            Some(s) => f.write_str(&s),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, other: Position) -> Position {
        Position::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<i32> for Position {
    type Output = Position;

    fn mul(self, factor: i32) -> Position {
        Position::new(self.x * factor, self.y * factor)
    }
}

/// One of the four diagonal unit steps.
///
/// The declaration order fixes the indices 0..3 used for move enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self, MoveError> {
        Self::ALL.get(index).copied().ok_or(MoveError::MalformedMove)
    }

    pub fn delta(self) -> Position {
        let (dx, dy) = DIRECTION_DELTAS[self.index()];
        Position::new(dx, dy)
    }

    /// Match a unit vector against the direction table.
    pub fn from_delta(delta: Position) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.delta() == delta)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::UpLeft => "up-left",
            Direction::UpRight => "up-right",
            Direction::DownLeft => "down-left",
            Direction::DownRight => "down-right",
        };
        f.write_str(name)
    }
}
