use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game_engine::{dice::RngRoller, engine::Game, models::GameState};

/// Default save file, relative to the working directory.
pub const DEFAULT_SAVE_FILE: &str = "5dice.json";

/// Runtime settings shared by the terminal binary and headless players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub save_path: PathBuf,
    /// Frames per animated roll, the final authoritative one included.
    /// `1` disables the animation.
    pub animation_frames: u32,
    pub frame_delay_ms: u64,
    /// Fixed dice seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
            animation_frames: 8,
            frame_delay_ms: 50,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn is_animated(&self) -> bool {
        self.animation_frames > 1
    }

    pub fn roller(&self) -> RngRoller {
        RngRoller::seeded(self.seed)
    }

    /// A game resumed from `saved`, or a fresh one.
    pub fn new_game(&self, saved: Option<GameState>) -> Game {
        Game::from_state(saved.unwrap_or_default(), self.roller())
    }
}
