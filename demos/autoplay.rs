//! Greedy auto-player.
//!
//! Run with: `cargo run --example autoplay [seed] [games]`
//!
//! Plays whole games of 5Dice against a seeded roller and prints each final
//! scoreboard. The same seed always plays the same games.
//!
//! ## Policy
//!
//! - Take a fixed-value box (full house, straights, 5Dice) as soon as it is
//!   offered.
//! - Otherwise hold every die showing the most common face (the higher face
//!   on ties) and roll again.
//! - After the third roll, score whichever offer is worth the most.

use std::time::Duration;

use five_dice::game_engine::evaluator::face_counts;
use five_dice::game_engine::history;
use five_dice::game_engine::engine::{UPPER_BONUS, UPPER_BONUS_THRESHOLD};
use five_dice::{Board, Category, Game, NoPause, PotentialScores, RngRoller, ScoreOutcome, Scores};

fn best_offer(potential: &PotentialScores) -> Option<(Category, u32)> {
    potential
        .iter()
        .max_by_key(|(category, value)| (*value, std::cmp::Reverse(*category)))
}

fn is_fixed_value(category: Category) -> bool {
    matches!(
        category,
        Category::FullHouse | Category::SmallStraight | Category::LargeStraight | Category::FiveDice
    )
}

/// Hold exactly the dice showing the most common face.
fn hold_most_common(game: &mut Game) {
    let Some(values) = game.dice().values() else {
        return;
    };
    let counts = face_counts(&values);
    let Some(keep) = (1..=6u8).max_by_key(|&face| (counts[face as usize], face)) else {
        return;
    };
    for (index, value) in values.iter().enumerate() {
        let want = *value == keep;
        if game.dice()[index].held != want {
            game.hold(index);
        }
    }
}

fn play_turn(game: &mut Game) -> ScoreOutcome {
    game.roll_animated(4, Duration::ZERO, &mut NoPause, |_| {});
    loop {
        let potential = game.potential_scores();
        let Some((category, value)) = best_offer(&potential) else {
            return ScoreOutcome::Ignored;
        };
        if !game.can_roll() || (is_fixed_value(category) && value > 0) {
            return game.score(category);
        }
        hold_most_common(game);
        game.roll();
    }
}

fn print_board(board: &Scores) {
    for category in Category::ALL {
        let value = board.get(category).map_or_else(|| "-".to_string(), |v| v.to_string());
        println!("  {:<16} {:>4}", category.to_string(), value);
        if category == Category::Sixes {
            let upper = board.board_sum(Board::Upper);
            let bonus = if upper >= UPPER_BONUS_THRESHOLD { UPPER_BONUS } else { 0 };
            println!("  {:<16} {:>4}", "Bonus", bonus);
            println!("  ─────────────────────");
        }
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let games: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    let mut game = Game::new(RngRoller::seeded(Some(seed)));

    for number in 1..=games {
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("  Game {number} (seed {seed})");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let mut turns = 0;
        loop {
            turns += 1;
            if let ScoreOutcome::GameOver { final_score, rank, board, .. } = play_turn(&mut game) {
                print_board(&board);
                println!("  {:<16} {:>4}", "Total", final_score.score);
                println!();
                match rank {
                    Some(rank) => println!("  {turns} turns, rank #{} in top scores", rank + 1),
                    None => println!("  {turns} turns, outside the top scores"),
                }
                break;
            }
        }
        println!();
    }

    if let Some(best) = history::best(game.top_scores()) {
        println!("Best score: {}", best.score);
    }
    println!("Top scores:");
    for (rank, entry) in game.top_scores().iter().enumerate() {
        println!("  {:>2}. {}", rank + 1, entry.score);
    }
}
