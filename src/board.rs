use crate::coord::Coord;
use crate::error::GameError;
use std::collections::{BTreeSet, HashMap};

/// The 8 compass direction vectors, (0,0) excluded.
pub(crate) const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A bounded sparse grid: only occupied coordinates are stored.
///
/// Cells hold roster indices; the roster itself lives on
/// [`Game`](crate::Game). The board knows nothing about turn order, it
/// only answers geometric questions: bounds, occupancy, and the
/// direction walks behind legal-move discovery and capture collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u32,
    height: u32,
    cells: HashMap<Coord, usize>,
}

impl Board {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: HashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        (1..=self.width).contains(&coord.x) && (1..=self.height).contains(&coord.y)
    }

    /// Returns the occupant's roster index, if any.
    pub fn get(&self, coord: Coord) -> Result<Option<usize>, GameError> {
        if !self.in_bounds(coord) {
            return Err(GameError::CoordOutOfRange);
        }
        Ok(self.cells.get(&coord).copied())
    }

    /// Places or overwrites a piece.
    pub fn set(&mut self, coord: Coord, player: usize) -> Result<(), GameError> {
        if !self.in_bounds(coord) {
            return Err(GameError::CoordOutOfRange);
        }
        self.cells.insert(coord, player);
        Ok(())
    }

    /// Iterates occupied coordinates with their owners, unordered.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, usize)> + '_ {
        self.cells.iter().map(|(&coord, &player)| (coord, player))
    }

    /// Legal destinations for `player` under the sandwich rule: every
    /// empty coordinate reached from one of `player`'s cells by walking a
    /// direction across at least one consecutive opposing cell. Walks stop
    /// at own-color cells and at the boundary.
    pub fn legal_moves(&self, player: usize) -> BTreeSet<Coord> {
        let mut legal = BTreeSet::new();
        for (origin, owner) in self.occupied() {
            if owner != player {
                continue;
            }
            for (dx, dy) in DIRECTIONS {
                let mut cursor = origin;
                let mut crossed = false;
                loop {
                    let Some(next) = cursor.offset(dx, dy) else {
                        break;
                    };
                    if !self.in_bounds(next) {
                        break;
                    }
                    match self.cells.get(&next) {
                        None => {
                            if crossed {
                                legal.insert(next);
                            }
                            break;
                        }
                        Some(&owner) if owner == player => break,
                        Some(_) => {
                            crossed = true;
                            cursor = next;
                        }
                    }
                }
            }
        }
        legal
    }

    /// Every empty in-bounds coordinate (the no-capture placement rule).
    pub fn empty_cells(&self) -> BTreeSet<Coord> {
        let mut empty = BTreeSet::new();
        for y in 1..=self.height {
            for x in 1..=self.width {
                let coord = Coord::new(x, y);
                if !self.cells.contains_key(&coord) {
                    empty.insert(coord);
                }
            }
        }
        empty
    }

    /// Opposing pieces flipped by placing `player` at `origin`: per
    /// direction, the run of consecutive opposing cells is kept only when
    /// the walk terminates on one of `player`'s own cells. Runs ending at
    /// an empty cell or the boundary capture nothing.
    pub fn collect_captures(&self, origin: Coord, player: usize) -> Vec<Coord> {
        let mut captures = Vec::new();
        for (dx, dy) in DIRECTIONS {
            let mut run = Vec::new();
            let mut cursor = origin;
            loop {
                let Some(next) = cursor.offset(dx, dy) else {
                    break;
                };
                if !self.in_bounds(next) {
                    break;
                }
                match self.cells.get(&next) {
                    None => break,
                    Some(&owner) if owner == player => {
                        captures.append(&mut run);
                        break;
                    }
                    Some(_) => {
                        run.push(next);
                        cursor = next;
                    }
                }
            }
        }
        captures
    }
}
