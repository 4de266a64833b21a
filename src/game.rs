use crate::board::Board;
use crate::coord::Coord;
use crate::error::{ConfigError, GameError};
use crate::types::{GameState, Player, RuleVariant, Turn};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Construction options for a [`Game`].
///
/// Width and height default to `6 + players.len()` per side, which yields
/// the standard 8x8 board for the default two-player roster.
#[derive(Debug, Clone)]
pub struct GameOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Player labels in turn-rotation order. Must have at least two.
    pub players: Vec<String>,
    pub variant: RuleVariant,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            players: vec!["W".into(), "B".into()],
            variant: RuleVariant::default(),
        }
    }
}

/// The rules engine. Owns the grid, the roster, the append-only turn
/// history, and a cached legal-move set for the player to move.
///
/// The cache is rebuilt at construction and inside [`Game::next`] after
/// every mutation, so it is never observably stale.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: Vec<Player>,
    turns: Vec<Turn>,
    variant: RuleVariant,
    valid_moves: BTreeSet<Coord>,
}

impl Game {
    /// Standard game: two players `W`/`B` on 8x8, capture rule.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_options(GameOptions::default())
    }

    /// Seeds an n x n starting block (n = roster size) centered on the
    /// grid, assigned round-robin by `(dx + dy) % n` over the roster. For
    /// two players this is the canonical alternating four-cell start.
    pub fn with_options(options: GameOptions) -> Result<Self, ConfigError> {
        if options.players.len() < 2 {
            return Err(ConfigError::NotEnoughPlayers);
        }
        let players: Vec<Player> = options.players.into_iter().map(Player::new).collect();

        let n = players.len() as u32;
        let side = 6 + n;
        let width = options.width.unwrap_or(side);
        let height = options.height.unwrap_or(side);

        let mut board = Board::new(width, height);
        let x0 = (width.saturating_sub(n)) / 2 + 1;
        let y0 = (height.saturating_sub(n)) / 2 + 1;
        for dy in 0..n {
            for dx in 0..n {
                let player = ((dx + dy) % n) as usize;
                board
                    .set(Coord::new(x0 + dx, y0 + dy), player)
                    .map_err(|_| ConfigError::SeedOutOfRange)?;
            }
        }

        let mut game = Self {
            board,
            players,
            turns: Vec::new(),
            variant: options.variant,
            valid_moves: BTreeSet::new(),
        };
        game.recompute_valid_moves();
        Ok(game)
    }

    pub fn width(&self) -> u32 {
        self.board.width()
    }

    pub fn height(&self) -> u32 {
        self.board.height()
    }

    /// The roster, in turn-rotation order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The append-only turn history.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn variant(&self) -> RuleVariant {
        self.variant
    }

    /// Occupant of `coord`, if any. Fails for coordinates off the grid.
    pub fn cell(&self, coord: Coord) -> Result<Option<&Player>, GameError> {
        Ok(self.board.get(coord)?.map(|index| &self.players[index]))
    }

    /// The player to move: the roster successor (wrapping) of whoever made
    /// the last turn. With no turns yet, the LAST roster entry moves first,
    /// so the default `W`/`B` roster opens with `B`.
    pub fn current_player(&self) -> Result<&Player, GameError> {
        let index = self.current_index()?;
        Ok(&self.players[index])
    }

    fn current_index(&self) -> Result<usize, GameError> {
        if self.finished() {
            return Err(GameError::GameFinished);
        }
        Ok(match self.turns.last() {
            Some(turn) => (turn.player + 1) % self.players.len(),
            None => self.players.len() - 1,
        })
    }

    // Termination detection is out of scope; every position is live.
    fn finished(&self) -> bool {
        false
    }

    /// The cached legal-move set for the current player: sandwich
    /// destinations under the capture rule, every empty cell under the
    /// no-capture rule.
    pub fn valid_moves(&self) -> Result<&BTreeSet<Coord>, GameError> {
        self.current_index()?;
        Ok(&self.valid_moves)
    }

    /// Applies a move for the current player: validates the target,
    /// places the piece, flips every sandwiched opposing piece (capture
    /// rule only), records the turn, and recomputes the legal-move cache
    /// for the next player. Nothing is mutated on a validation failure.
    pub fn next(&mut self, coord: Coord) -> Result<(), GameError> {
        match self.variant {
            RuleVariant::Capture => {
                if !self.valid_moves.contains(&coord) {
                    return Err(GameError::NotValidCoord);
                }
            }
            RuleVariant::NoCapture => {
                if self.board.get(coord)?.is_some() {
                    return Err(GameError::CellOccupied);
                }
            }
        }

        let player = self.current_index().map_err(|_| GameError::PlayerGet)?;
        self.board
            .set(coord, player)
            .map_err(|_| GameError::CellSet)?;

        let captures = match self.variant {
            RuleVariant::Capture => self.board.collect_captures(coord, player),
            RuleVariant::NoCapture => Vec::new(),
        };
        for &capture in &captures {
            self.board
                .set(capture, player)
                .map_err(|_| GameError::CellSet)?;
        }
        debug!(
            player = %self.players[player],
            %coord,
            captures = captures.len(),
            "move applied"
        );

        self.turns.push(Turn { player, coord });
        self.recompute_valid_moves();
        Ok(())
    }

    fn recompute_valid_moves(&mut self) {
        let Ok(player) = self.current_index() else {
            self.valid_moves.clear();
            return;
        };
        self.valid_moves = match self.variant {
            RuleVariant::Capture => self.board.legal_moves(player),
            RuleVariant::NoCapture => self.board.empty_cells(),
        };
        trace!(
            player = %self.players[player],
            count = self.valid_moves.len(),
            "legal moves recomputed"
        );
    }

    /// Serializable snapshot of the whole game.
    pub fn state(&self) -> GameState {
        let mut cells: Vec<(Coord, String)> = self
            .board
            .occupied()
            .map(|(coord, index)| (coord, self.players[index].label().to_string()))
            .collect();
        cells.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        GameState {
            width: self.width(),
            height: self.height(),
            cells,
            current_player: self
                .current_player()
                .ok()
                .map(|player| player.label().to_string()),
            valid_moves: self.valid_moves.iter().copied().collect(),
            turn_count: self.turns.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(x: u32, y: u32) -> Coord {
        Coord::new(x, y)
    }

    fn default_game() -> Game {
        Game::new().unwrap()
    }

    fn label_at(game: &Game, x: u32, y: u32) -> Option<String> {
        game.cell(coord(x, y))
            .unwrap()
            .map(|player| player.label().to_string())
    }

    #[test]
    fn seeds_the_canonical_center_block() {
        let game = default_game();
        assert_eq!(game.width(), 8);
        assert_eq!(game.height(), 8);
        assert_eq!(label_at(&game, 4, 4).as_deref(), Some("W"));
        assert_eq!(label_at(&game, 5, 4).as_deref(), Some("B"));
        assert_eq!(label_at(&game, 4, 5).as_deref(), Some("B"));
        assert_eq!(label_at(&game, 5, 5).as_deref(), Some("W"));
        assert_eq!(game.state().cells.len(), 4);
        assert!(game.turns().is_empty());
    }

    #[test]
    fn first_mover_is_the_last_roster_entry() {
        let game = default_game();
        assert_eq!(game.current_player().unwrap().label(), "B");
    }

    #[test]
    fn opening_legal_moves_are_the_four_standard_ones() {
        let game = default_game();
        let expected: BTreeSet<Coord> = [(3, 4), (4, 3), (5, 6), (6, 5)]
            .into_iter()
            .map(|(x, y)| coord(x, y))
            .collect();
        assert_eq!(game.valid_moves().unwrap(), &expected);
    }

    #[test]
    fn occupied_cell_is_rejected_without_mutation() {
        let mut game = default_game();
        let before = game.state();

        assert_eq!(game.next(coord(4, 4)), Err(GameError::NotValidCoord));

        assert_eq!(game.state(), before);
        assert!(game.turns().is_empty());
        assert_eq!(game.current_player().unwrap().label(), "B");
    }

    #[test]
    fn out_of_range_target_is_not_a_valid_move() {
        let mut game = default_game();
        assert_eq!(game.next(coord(0, 0)), Err(GameError::NotValidCoord));
        assert_eq!(game.next(coord(9, 9)), Err(GameError::NotValidCoord));
    }

    #[test]
    fn legal_move_flips_the_sandwiched_piece() {
        let mut game = default_game();

        game.next(coord(3, 4)).unwrap();

        assert_eq!(label_at(&game, 3, 4).as_deref(), Some("B"));
        assert_eq!(label_at(&game, 4, 4).as_deref(), Some("B"));
        assert_eq!(label_at(&game, 5, 4).as_deref(), Some("B"));
        assert_eq!(game.turns().len(), 1);
        assert_eq!(game.turns()[0], Turn { player: 1, coord: coord(3, 4) });
        assert_eq!(game.current_player().unwrap().label(), "W");
    }

    #[test]
    fn rotation_wraps_back_to_the_first_mover() {
        let mut game = default_game();
        game.next(coord(3, 4)).unwrap();

        // W's replies after B took (3,4).
        let expected: BTreeSet<Coord> = [(3, 3), (3, 5), (5, 3)]
            .into_iter()
            .map(|(x, y)| coord(x, y))
            .collect();
        assert_eq!(game.valid_moves().unwrap(), &expected);

        game.next(coord(5, 3)).unwrap();
        assert_eq!(label_at(&game, 5, 4).as_deref(), Some("W"));
        assert_eq!(game.turns().len(), 2);
        assert_eq!(game.current_player().unwrap().label(), "B");
    }

    #[test]
    fn queries_are_idempotent_between_moves() {
        let game = default_game();
        assert_eq!(game.valid_moves().unwrap(), game.valid_moves().unwrap());
        assert_eq!(
            game.cell(coord(4, 4)).unwrap(),
            game.cell(coord(4, 4)).unwrap()
        );
    }

    #[test]
    fn lookups_at_the_boundary_fail() {
        let game = default_game();
        for target in [coord(0, 1), coord(1, 0), coord(9, 1), coord(1, 9)] {
            assert_eq!(game.cell(target), Err(GameError::CoordOutOfRange));
        }
    }

    #[test]
    fn no_capture_variant_accepts_any_empty_cell() {
        let mut game = Game::with_options(GameOptions {
            variant: RuleVariant::NoCapture,
            ..GameOptions::default()
        })
        .unwrap();

        assert_eq!(game.valid_moves().unwrap().len(), 60);

        game.next(coord(1, 1)).unwrap();
        assert_eq!(label_at(&game, 1, 1).as_deref(), Some("B"));
        // Nothing flips in this variant.
        assert_eq!(label_at(&game, 4, 4).as_deref(), Some("W"));

        assert_eq!(game.next(coord(1, 1)), Err(GameError::CellOccupied));
        assert_eq!(game.next(coord(0, 0)), Err(GameError::CoordOutOfRange));
        assert_eq!(game.current_player().unwrap().label(), "W");
    }

    #[test]
    fn three_player_game_seeds_and_rotates() {
        let mut game = Game::with_options(GameOptions {
            players: vec!["W".into(), "B".into(), "R".into()],
            ..GameOptions::default()
        })
        .unwrap();

        // Derived 9x9 grid with a 3x3 block at (4,4)..(6,6).
        assert_eq!(game.width(), 9);
        assert_eq!(game.height(), 9);
        assert_eq!(label_at(&game, 4, 4).as_deref(), Some("W"));
        assert_eq!(label_at(&game, 5, 4).as_deref(), Some("B"));
        assert_eq!(label_at(&game, 6, 4).as_deref(), Some("R"));
        assert_eq!(label_at(&game, 4, 5).as_deref(), Some("B"));
        assert_eq!(label_at(&game, 5, 5).as_deref(), Some("R"));
        assert_eq!(label_at(&game, 6, 5).as_deref(), Some("W"));
        assert_eq!(game.state().cells.len(), 9);

        // Last roster entry opens, then rotation wraps to the first.
        assert_eq!(game.current_player().unwrap().label(), "R");
        assert!(game.valid_moves().unwrap().contains(&coord(6, 7)));

        game.next(coord(6, 7)).unwrap();
        // Any non-mover counts as opposing, so the whole column flipped.
        assert_eq!(label_at(&game, 6, 6).as_deref(), Some("R"));
        assert_eq!(label_at(&game, 6, 5).as_deref(), Some("R"));
        assert_eq!(game.current_player().unwrap().label(), "W");
    }

    #[test]
    fn rejects_a_single_player_roster() {
        let result = Game::with_options(GameOptions {
            players: vec!["B".into()],
            ..GameOptions::default()
        });
        assert!(matches!(result, Err(ConfigError::NotEnoughPlayers)));
    }

    #[test]
    fn rejects_a_grid_too_small_for_the_seed_block() {
        let result = Game::with_options(GameOptions {
            width: Some(2),
            height: Some(2),
            players: vec!["W".into(), "B".into(), "R".into()],
            ..GameOptions::default()
        });
        assert!(matches!(result, Err(ConfigError::SeedOutOfRange)));
    }

    #[test]
    fn state_snapshot_serializes() {
        let game = default_game();
        let value = serde_json::to_value(game.state()).unwrap();
        assert_eq!(value["width"], 8);
        assert_eq!(value["current_player"], "B");
        assert_eq!(value["turn_count"], 0);
        assert_eq!(value["cells"].as_array().unwrap().len(), 4);
        assert_eq!(value["valid_moves"].as_array().unwrap().len(), 4);
    }
}
