use derive_more::{Display, Error};

/// Runtime failures of the engine. All are ordinary result values the
/// caller is expected to branch on; none abort the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Coordinate lies outside `[1, width] x [1, height]`.
    #[display("coordinate is outside the grid")]
    CoordOutOfRange,
    /// Move target is not in the current legal-move set (capture rule).
    #[display("coordinate is not a legal move")]
    NotValidCoord,
    /// Move target already holds a piece (no-capture rule).
    #[display("cell is already occupied")]
    CellOccupied,
    /// The game has reached a terminal state.
    ///
    /// Reserved: termination detection is out of scope, so the engine
    /// treats every position as live and never produces this today.
    #[display("the game is finished")]
    GameFinished,
    /// Current-player resolution failed while applying a move.
    #[display("could not resolve the current player")]
    PlayerGet,
    /// Placement failed its internal range check. The legality check runs
    /// first, so seeing this means an engine consistency bug.
    #[display("could not place the piece")]
    CellSet,
}

/// Construction-time configuration faults. Unlike [`GameError`] these are
/// not recoverable mid-game; they abort initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    #[display("a game needs at least two players")]
    NotEnoughPlayers,
    #[display("the starting block does not fit the grid")]
    SeedOutOfRange,
}
