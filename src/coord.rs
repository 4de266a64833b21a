use derive_more::{Display, Error};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A 1-based board coordinate.
///
/// Values of 0 or beyond the grid edge are representable; whether a
/// coordinate is actually on the board is the engine's decision, not the
/// coordinate's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Steps by one direction vector. Returns `None` when the step would
    /// leave the representable range entirely.
    pub(crate) fn offset(self, dx: i32, dy: i32) -> Option<Coord> {
        let x = u32::try_from(i64::from(self.x) + i64::from(dx)).ok()?;
        let y = u32::try_from(i64::from(self.y) + i64::from(dy)).ok()?;
        Some(Coord { x, y })
    }
}

/// Renders as `x,y`, the same notation the parser accepts.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("invalid coordinate, expected \"x,y\"")]
pub struct ParseCoordError;

/// Parses `"x,y"`. Both components must be present and numeric;
/// surrounding whitespace is tolerated. No range checking happens here:
/// out-of-range pairs parse fine and get rejected by the engine.
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let x = parts.next().ok_or(ParseCoordError)?;
        let y = parts.next().ok_or(ParseCoordError)?;
        if parts.next().is_some() {
            return Err(ParseCoordError);
        }
        let x = x.trim().parse().map_err(|_| ParseCoordError)?;
        let y = y.trim().parse().map_err(|_| ParseCoordError)?;
        Ok(Coord { x, y })
    }
}
