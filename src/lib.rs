//! # five_dice
//!
//! The engine behind 5Dice, a terminal dice game in the Yahtzee family.
//!
//! A turn is up to three rolls of five dice. Between rolls any die can be
//! held. The turn ends by committing the dice to one of thirteen categories;
//! after thirteen turns the board is full, the total goes into a top-20
//! history and a new game starts.
//!
//! ## How it works
//!
//! 1. Build a [`Game`] around a [`DieRoller`]: [`RngRoller`] for real play
//!    (seeded or from entropy), [`ScriptedRoller`] for fixed sequences.
//! 2. Drive it with [`Game::roll`], [`Game::hold`], [`Game::score`] and
//!    [`Game::restart`]. Commands that don't apply right now are ignored.
//! 3. Read [`Game::potential_scores`] after each roll. It comes from
//!    [`compute_potential_scores`], a pure function of the dice and the
//!    recorded scores that also applies the joker rule for repeat
//!    five-of-a-kinds.
//! 4. Persist [`Game::state`] with [`game_engine::storage`] and resume
//!    with [`Game::from_state`].
//!
//! ## Quick start
//!
//! ```rust
//! use five_dice::{Category, Game, ScoreOutcome, ScriptedRoller};
//!
//! let mut game = Game::new(ScriptedRoller::new([6, 6, 3, 3, 3]));
//! game.roll();
//!
//! let potential = game.potential_scores();
//! assert_eq!(potential.get(Category::FullHouse), Some(25));
//! assert_eq!(potential.get(Category::Gamble), Some(21));
//!
//! let outcome = game.score(Category::FullHouse);
//! assert_eq!(outcome, ScoreOutcome::Recorded { category: Category::FullHouse, value: 25 });
//! assert_eq!(game.turn(), 0);
//! ```

pub mod game_engine;

// Convenience re-exports so callers can use `five_dice::Game`
// directly without reaching into `game_engine::`.
pub use game_engine::{
    compute_potential_scores, is_straight, Board, Category, Dice, Die, DieRoller, Game,
    GameConfig, GameState, NoPause, Pacer, PotentialScores, RngRoller, ScoreOutcome, Scores,
    ScriptedRoller, StorageError, ThreadPacer, TopScore, ValidationIssue,
};
