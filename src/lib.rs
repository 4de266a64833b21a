//! Othello (Reversi) rules engine.
//!
//! [`Game`] owns the grid, the player roster, and the append-only turn
//! history, and applies the sandwich capture rule on every move. The
//! companion binary is a thin text console over the same API; other
//! front ends can consume [`Game::state`] snapshots instead.

pub mod board;
pub mod coord;
pub mod error;
pub mod game;
pub mod types;

pub use board::Board;
pub use coord::{Coord, ParseCoordError};
pub use error::{ConfigError, GameError};
pub use game::{Game, GameOptions};
pub use types::{GameState, Player, RuleVariant, Turn};
