//! The game state machine: turn counter, dice, recorded scores and history.
//!
//! Every command is a silent no-op when its preconditions fail. Commands
//! report whether they changed anything so the caller knows when to redraw
//! and persist.

use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::game_engine::{
    dice::{biased_d6, DieRoller, RngRoller},
    evaluator::compute_potential_scores,
    history::{now_ms, record_top_score},
    models::{Board, Category, Dice, GameState, PotentialScores, Scores, TopScore, MAX_ROLLS},
};

/// Upper-board total needed for the bonus.
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
pub const UPPER_BONUS: u32 = 35;

/// Delay between cosmetic animation frames.
///
/// Returning `false` cancels the remaining frames; the roll itself still
/// completes.
pub trait Pacer {
    fn pause(&mut self, delay: Duration) -> bool;
}

/// Blocks the calling thread for the full delay.
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) -> bool {
        thread::sleep(delay);
        true
    }
}

/// Skips every delay. For tests and headless play.
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&mut self, _delay: Duration) -> bool {
        true
    }
}

/// Result of [`Game::score`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// Rolling, or the category wasn't on offer.
    Ignored,
    /// Category closed; a new turn begins.
    Recorded { category: Category, value: u32 },
    /// That was the last open category. The final total went into the
    /// history (`rank` is `None` if it missed the top list) and the board
    /// was cleared for a new game; `board` is the finished one.
    GameOver {
        category: Category,
        value: u32,
        final_score: TopScore,
        rank: Option<usize>,
        board: Scores,
    },
}

impl ScoreOutcome {
    pub fn is_changed(&self) -> bool {
        !matches!(self, ScoreOutcome::Ignored)
    }
}

/// One game of 5Dice plus the history of finished games.
pub struct Game<R: DieRoller = RngRoller> {
    dice: Dice,
    scores: Scores,
    turn: u8,
    rolling: bool,
    top_scores: Vec<TopScore>,
    roller: R,
}

impl<R: DieRoller> Game<R> {
    /// A fresh game with an empty history.
    pub fn new(roller: R) -> Self {
        Self::from_state(GameState::default(), roller)
    }

    /// Resume from a saved snapshot. The snapshot is trusted as-is;
    /// validate it first (see [`crate::game_engine::storage`]).
    pub fn from_state(state: GameState, roller: R) -> Self {
        Game {
            dice: state.dice,
            scores: state.scores,
            turn: state.turn,
            rolling: false,
            top_scores: state.top_scores,
            roller,
        }
    }

    /// Snapshot for persistence.
    pub fn state(&self) -> GameState {
        GameState {
            dice: self.dice,
            scores: self.scores.clone(),
            turn: self.turn,
            top_scores: self.top_scores.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Advance the turn and roll every unheld die.
    pub fn roll(&mut self) -> bool {
        if !self.begin_roll() {
            return false;
        }
        self.settle();
        true
    }

    /// Like [`Game::roll`], but first shows `frames - 1` cosmetic shakes of the
    /// unheld dice, handing each to `on_frame` and waiting `delay` between
    /// them. Only the final roll counts.
    pub fn roll_animated<P, F>(&mut self, frames: u32, delay: Duration, pacer: &mut P, mut on_frame: F) -> bool
    where
        P: Pacer + ?Sized,
        F: FnMut(&Self),
    {
        if !self.begin_roll() {
            return false;
        }

        for frame in 1..frames {
            self.shake();
            on_frame(self);
            if !pacer.pause(delay) {
                debug!(frame, "roll animation cut short");
                break;
            }
        }

        self.settle();
        true
    }

    /// Toggle the hold flag of die `index` (0..=4).
    pub fn hold(&mut self, index: usize) -> bool {
        if self.rolling || self.turn == 0 {
            return false;
        }
        let Some(die) = self.dice.get_mut(index) else {
            return false;
        };
        die.held = !die.held;
        debug!(index, held = die.held, "hold toggled");
        true
    }

    /// Commit the current roll to `category`.
    pub fn score(&mut self, category: Category) -> ScoreOutcome {
        if self.rolling {
            return ScoreOutcome::Ignored;
        }

        let potential = self.potential_scores();
        let Some(value) = potential.get(category) else {
            return ScoreOutcome::Ignored;
        };

        // A 5Dice box that is closed yet on offer means this is a joker roll:
        // the stacked bonus is banked whichever box the player picks.
        let joker = potential
            .get(Category::FiveDice)
            .filter(|_| self.scores.is_closed(Category::FiveDice));

        self.scores.record(category, value);
        if let Some(stacked) = joker.filter(|_| category != Category::FiveDice) {
            self.scores.record(Category::FiveDice, stacked);
        }
        debug!(%category, value, joker = joker.is_some(), "category scored");

        self.dice = Dice::default();
        self.turn = 0;

        if !self.is_game_over() {
            return ScoreOutcome::Recorded { category, value };
        }

        let final_score = TopScore { timestamp: now_ms(), score: self.total() };
        let rank = record_top_score(&mut self.top_scores, final_score);
        info!(score = final_score.score, ?rank, "game over");
        let board = std::mem::take(&mut self.scores);
        self.restart();

        ScoreOutcome::GameOver { category, value, final_score, rank, board }
    }

    /// Clear dice, scores and turn. History is kept.
    pub fn restart(&mut self) -> bool {
        self.dice = Dice::default();
        self.scores = Scores::default();
        self.turn = 0;
        debug!("game restarted");
        true
    }

    fn begin_roll(&mut self) -> bool {
        if !self.can_roll() {
            return false;
        }
        self.turn += 1;
        self.rolling = true;
        true
    }

    /// Cosmetic re-randomisation of the unheld dice.
    fn shake(&mut self) {
        for die in self.dice.iter_mut().filter(|d| !d.held) {
            die.value = Some(biased_d6(&mut self.roller, die.value));
        }
    }

    /// The authoritative roll.
    fn settle(&mut self) {
        for die in self.dice.iter_mut().filter(|d| !d.held) {
            die.value = Some(self.roller.roll_die());
        }
        self.rolling = false;
        debug!(turn = self.turn, dice = %self.dice, "dice rolled");
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    pub fn turn(&self) -> u8 {
        self.turn
    }

    pub fn rolls_left(&self) -> u8 {
        MAX_ROLLS.saturating_sub(self.turn)
    }

    pub fn is_rolling(&self) -> bool {
        self.rolling
    }

    pub fn top_scores(&self) -> &[TopScore] {
        &self.top_scores
    }

    pub fn can_roll(&self) -> bool {
        !self.is_game_over() && !self.rolling && self.turn < MAX_ROLLS
    }

    pub fn can_hold(&self) -> bool {
        !self.rolling && self.turn > 0
    }

    pub fn is_game_start(&self) -> bool {
        self.turn == 0 && self.scores.is_empty()
    }

    pub fn is_game_over(&self) -> bool {
        self.scores.is_complete()
    }

    pub fn upper_board_sum(&self) -> u32 {
        self.scores.board_sum(Board::Upper)
    }

    pub fn upper_board_bonus(&self) -> u32 {
        if self.upper_board_sum() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        }
    }

    pub fn lower_board_sum(&self) -> u32 {
        self.scores.board_sum(Board::Lower)
    }

    /// Repeat five-of-a-kinds banked so far. The first 50 doesn't count.
    pub fn joker_count(&self) -> u32 {
        self.scores.get(Category::FiveDice).unwrap_or(0) / 100
    }

    pub fn total(&self) -> u32 {
        self.upper_board_sum()
            .saturating_add(self.upper_board_bonus())
            .saturating_add(self.lower_board_sum())
    }

    /// What each open category is worth right now; empty while rolling or
    /// before the first roll of a turn.
    pub fn potential_scores(&self) -> PotentialScores {
        if self.rolling {
            return PotentialScores::default();
        }
        compute_potential_scores(&self.dice, &self.scores)
    }
}

impl Default for Game<RngRoller> {
    fn default() -> Self {
        Game::new(RngRoller::seeded(None))
    }
}

impl<R: DieRoller> std::fmt::Debug for Game<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("dice", &self.dice)
            .field("scores", &self.scores)
            .field("turn", &self.turn)
            .field("rolling", &self.rolling)
            .field("top_scores", &self.top_scores.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_engine::dice::ScriptedRoller;
    use crate::game_engine::models::DICE_COUNT;

    struct CountingPacer {
        pauses: usize,
        cancel_after: Option<usize>,
    }

    impl Pacer for CountingPacer {
        fn pause(&mut self, _delay: Duration) -> bool {
            self.pauses += 1;
            self.cancel_after.map_or(true, |n| self.pauses < n)
        }
    }

    #[test]
    fn animated_roll_pauses_between_cosmetic_frames() {
        let mut game = Game::new(RngRoller::seeded(Some(3)));
        let mut pacer = CountingPacer { pauses: 0, cancel_after: None };
        let mut frames_seen = 0;

        let rolled = game.roll_animated(8, Duration::from_millis(50), &mut pacer, |g| {
            assert!(g.is_rolling());
            assert!(g.dice().is_rolled());
            assert!(g.potential_scores().is_empty(), "no offers mid-roll");
            frames_seen += 1;
        });

        assert!(rolled);
        assert_eq!(frames_seen, 7);
        assert_eq!(pacer.pauses, 7);
        assert!(!game.is_rolling());
        assert_eq!(game.turn(), 1);
        assert!(!game.potential_scores().is_empty());
    }

    #[test]
    fn cancelled_animation_still_finishes_the_roll() {
        let mut game = Game::new(RngRoller::seeded(Some(4)));
        let mut pacer = CountingPacer { pauses: 0, cancel_after: Some(2) };
        let mut frames_seen = 0;

        game.roll_animated(8, Duration::ZERO, &mut pacer, |_| frames_seen += 1);

        assert_eq!(frames_seen, 2);
        assert!(!game.is_rolling());
        assert!(game.dice().is_rolled());
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn single_frame_animation_is_a_plain_roll() {
        let mut game = Game::new(ScriptedRoller::new([6, 6, 3, 3, 3]));
        let mut calls = 0;
        game.roll_animated(1, Duration::ZERO, &mut NoPause, |_| calls += 1);
        assert_eq!(calls, 0);
        assert_eq!(game.dice().values(), Some([6, 6, 3, 3, 3]));
    }

    #[test]
    fn held_dice_survive_animation() {
        let mut game = Game::new(ScriptedRoller::new([4, 1, 2, 3, 5, 6]));
        game.roll();
        assert!(game.hold(0));
        game.roll_animated(5, Duration::ZERO, &mut NoPause, |g| {
            assert_eq!(g.dice()[0].value, Some(4));
        });
        assert_eq!(game.dice()[0].value, Some(4));
        assert!(game.dice()[0].held);
    }

    #[test]
    fn hold_out_of_range_is_ignored() {
        let mut game = Game::new(ScriptedRoller::new([1, 2, 3, 4, 5]));
        game.roll();
        assert!(!game.hold(DICE_COUNT));
    }

    #[test]
    fn joker_count_ignores_base_fifty() {
        let state = GameState {
            scores: Scores::new().with(Category::FiveDice, 50),
            ..GameState::default()
        };
        let game = Game::from_state(state, ScriptedRoller::new([1]));
        assert_eq!(game.joker_count(), 0);

        let state = GameState {
            scores: Scores::new().with(Category::FiveDice, 250),
            ..GameState::default()
        };
        let game = Game::from_state(state, ScriptedRoller::new([1]));
        assert_eq!(game.joker_count(), 2);
    }
}
