//! Core game engine: scoring, turn handling, history and persistence.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: categories, dice, scores, potential scores, save snapshot |
//! | `dice`      | Die-roller seam: seeded RNG roller, scripted roller, biased d6 for animation |
//! | `evaluator` | Pure scoring engine: straights, counts, potential scores, joker rule |
//! | `engine`    | `Game` state machine: roll / hold / score / restart plus derived totals |
//! | `history`   | Top-scores list: ordering and the 20-entry cap |
//! | `storage`   | JSON save file load/save with per-field validation |
//! | `config`    | `GameConfig`: save path, animation pacing, seed |

pub mod config;
pub mod dice;
pub mod engine;
pub mod evaluator;
pub mod history;
pub mod models;
pub mod storage;

// Re-export the public API surface so callers can use
// `game_engine::Game` without reaching into sub-modules.
pub use config::GameConfig;
pub use dice::{biased_d6, DieRoller, RngRoller, ScriptedRoller};
pub use engine::{Game, NoPause, Pacer, ScoreOutcome, ThreadPacer};
pub use evaluator::{compute_potential_scores, is_straight};
pub use models::{
    Board, Category, Dice, Die, GameState, PotentialScores, Scores, TopScore,
    DICE_COUNT, MAX_ROLLS,
};
pub use storage::{StorageError, ValidationIssue};
