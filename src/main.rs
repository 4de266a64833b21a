use anyhow::{Context, Result};
use clap::Parser;
use othello::{Coord, Game, GameOptions, RuleVariant};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Interactive Othello console.
#[derive(Debug, Parser)]
#[command(name = "othello", about = "Play Othello (Reversi) in the terminal")]
struct Cli {
    /// Grid width (default: derived from the player count).
    #[arg(long)]
    width: Option<u32>,

    /// Grid height (default: derived from the player count).
    #[arg(long)]
    height: Option<u32>,

    /// Player labels in turn-rotation order; the last listed moves first.
    #[arg(long, num_args = 2.., default_values_t = [String::from("W"), String::from("B")])]
    players: Vec<String>,

    /// Relax the placement rule to "any empty cell" and disable captures.
    #[arg(long)]
    no_capture: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let variant = if cli.no_capture {
        RuleVariant::NoCapture
    } else {
        RuleVariant::Capture
    };
    let mut game = Game::with_options(GameOptions {
        width: cli.width,
        height: cli.height,
        players: cli.players,
        variant,
    })
    .context("could not configure the game")?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        render(&game)?;
        let player = game.current_player()?.to_string();
        print!("{player} to move (x,y): ");
        io::stdout().flush()?;

        // EOF ends the session; everything else re-prompts.
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        let coord: Coord = match line.trim().parse() {
            Ok(coord) => coord,
            Err(err) => {
                println!("{err}, try again");
                continue;
            }
        };
        if let Err(err) = game.next(coord) {
            println!("{err}, try again");
        }
    }
    Ok(())
}

/// Renders the grid with numeric headers: `o` marks legal destinations,
/// `·` other empty cells, and occupied cells show the owner's label.
fn render(game: &Game) -> Result<()> {
    let valids = game.valid_moves()?;
    for y in 0..=game.height() {
        let mut row = Vec::new();
        for x in 0..=game.width() {
            if x == 0 {
                row.push(if y == 0 { " ".to_string() } else { y.to_string() });
                continue;
            }
            if y == 0 {
                row.push(x.to_string());
                continue;
            }
            let coord = Coord::new(x, y);
            row.push(match game.cell(coord)? {
                Some(player) => player.to_string(),
                None if valids.contains(&coord) => "o".to_string(),
                None => "·".to_string(),
            });
        }
        println!("{}", row.join(" "));
    }
    Ok(())
}
