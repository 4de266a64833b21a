use crate::coord::Coord;
use serde::Serialize;
use std::fmt;

/// A player identity in the roster. Compared and displayed by label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Player(String);

impl Player {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One applied placement, recorded permanently. The ordered sequence of
/// turns is the sole source of whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// Index of the mover in [`Game::players`](crate::Game::players).
    pub player: usize,
    pub coord: Coord,
}

/// Which placement-legality rule the engine enforces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RuleVariant {
    /// Standard Othello: a move must sandwich at least one opposing piece,
    /// and every sandwiched piece flips to the mover.
    #[default]
    Capture,
    /// Reduced variant: any empty in-bounds cell is playable and nothing
    /// ever flips.
    NoCapture,
}

/// Public snapshot of a game, for embedding front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub width: u32,
    pub height: u32,
    /// Occupied cells as (coordinate, owner label), sorted by coordinate.
    pub cells: Vec<(Coord, String)>,
    /// Label of the player to move. `None` only in a terminal state.
    pub current_player: Option<String>,
    pub valid_moves: Vec<Coord>,
    pub turn_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_displays_its_label() {
        let player = Player::new("B");
        assert_eq!(player.to_string(), "B");
        assert_eq!(player.label(), "B");
    }

    #[test]
    fn default_variant_is_capture() {
        assert_eq!(RuleVariant::default(), RuleVariant::Capture);
    }
}
