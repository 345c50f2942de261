//! `5dice`: play 5Dice in the terminal.
//!
//! The game is saved to `--save-file` after every move and resumed on the
//! next start. A save file that fails validation is reported and the game
//! does not start.

mod input;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::style::Stylize;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use five_dice::game_engine::config::DEFAULT_SAVE_FILE;
use five_dice::game_engine::storage;
use five_dice::{Game, GameConfig, ScoreOutcome, StorageError, ValidationIssue};

use crate::input::{command_for, Command, KeyPacer};

#[derive(Parser, Debug)]
#[command(name = "5dice", version, about = "5Dice: a Yahtzee-style dice game for the terminal")]
struct Args {
    /// Where the game is saved and resumed from
    #[arg(long, default_value = DEFAULT_SAVE_FILE)]
    save_file: PathBuf,

    /// Fixed dice seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Show each roll immediately
    #[arg(long)]
    no_animation: bool,

    /// Animation frames per roll, the final roll included
    #[arg(long, default_value_t = 8)]
    frames: u32,

    /// Delay between animation frames
    #[arg(long, default_value_t = 50)]
    frame_delay_ms: u64,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            save_path: self.save_file.clone(),
            animation_frames: if self.no_animation { 1 } else { self.frames.max(1) },
            frame_delay_ms: self.frame_delay_ms,
            seed: self.seed,
        }
    }
}

type Term = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.config();
    let saved = match storage::load(&config.save_path) {
        Ok(saved) => saved,
        Err(StorageError::Invalid(issues)) => {
            report_invalid(&config.save_path, &issues);
            std::process::exit(1);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", config.save_path.display()));
        }
    };

    let mut game = config.new_game(saved);
    info!(
        save = %config.save_path.display(),
        turn = game.turn(),
        history = game.top_scores().len(),
        "starting 5dice"
    );

    let mut terminal = init_terminal()?;
    let result = run(&mut terminal, &mut game, &config);
    restore_terminal(&mut terminal)?;
    result
}

/// Raw mode plus the alternate screen. Undone before returning if any later
/// step fails.
fn init_terminal() -> Result<Term> {
    enable_raw_mode().context("enable raw mode")?;
    match enter_alternate_screen() {
        Ok(terminal) => Ok(terminal),
        Err(err) => {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(err)
        }
    }
}

fn enter_alternate_screen() -> Result<Term> {
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen).context("enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")?;
    terminal.clear().context("clear terminal")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn report_invalid(path: &Path, issues: &[ValidationIssue]) {
    eprintln!("{}", format!("{} is not a valid 5Dice save file:", path.display()).red().bold());
    for issue in issues {
        eprintln!("  {}", issue.to_string().red());
    }
    eprintln!("Fix or remove the file to start a new game.");
}

fn run(terminal: &mut Term, game: &mut Game, config: &GameConfig) -> Result<()> {
    let mut status = if game.is_game_start() {
        "Press Enter to roll".to_string()
    } else {
        "Game resumed".to_string()
    };

    loop {
        terminal.draw(|f| ui::draw(f, game, &status))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(command) = command_for(key) else {
            continue;
        };

        let changed = match command {
            Command::Quit => break,
            Command::Roll if config.is_animated() => {
                let mut draw_error = None;
                let rolled = game.roll_animated(
                    config.animation_frames,
                    config.frame_delay(),
                    &mut KeyPacer,
                    |g| {
                        if let Err(err) = terminal.draw(|f| ui::draw(f, g, &status)) {
                            draw_error.get_or_insert(err);
                        }
                    },
                );
                if let Some(err) = draw_error {
                    return Err(err).context("drawing roll animation");
                }
                rolled
            }
            Command::Roll => game.roll(),
            Command::Hold(index) => game.hold(index),
            Command::Score(category) => {
                let outcome = game.score(category);
                if let Some(message) = describe(&outcome) {
                    status = message;
                }
                outcome.is_changed()
            }
            Command::Restart => {
                status = "New game".to_string();
                game.restart()
            }
        };

        if changed && !game.is_rolling() {
            if let Err(err) = storage::save(&config.save_path, &game.state()) {
                warn!(error = %err, path = %config.save_path.display(), "could not save game");
                status = format!("Could not save: {err}");
            }
        }
    }

    Ok(())
}

fn describe(outcome: &ScoreOutcome) -> Option<String> {
    match outcome {
        ScoreOutcome::Ignored => None,
        ScoreOutcome::Recorded { category, value } => Some(format!("{category}: {value}")),
        ScoreOutcome::GameOver { final_score, rank, .. } => Some(match rank {
            Some(rank) => format!("Game over! {} points, #{} in top scores", final_score.score, rank + 1),
            None => format!("Game over! {} points", final_score.score),
        }),
    }
}
