//! The scoring engine: what every open category is worth on a given roll.
//!
//! Everything here is a pure function of the dice and the recorded scores.

use crate::game_engine::models::{Category, Dice, PotentialScores, Scores, DICE_COUNT};

pub const FULL_HOUSE_SCORE: u32 = 25;
pub const SMALL_STRAIGHT_SCORE: u32 = 30;
pub const LARGE_STRAIGHT_SCORE: u32 = 40;
pub const FIVE_DICE_SCORE: u32 = 50;
/// Added to the recorded 5Dice score for every repeat five-of-a-kind.
pub const JOKER_BONUS: u32 = 100;

/// Repeat five-of-a-kinds one game can bank: every turn after the first 5Dice.
pub const MAX_JOKERS: u32 = 12;

/// True if `category` can end a turn holding `value`.
///
/// Zero is always reachable through the cannot-score fallback.
pub fn is_reachable_score(category: Category, value: u32) -> bool {
    if value == 0 {
        return true;
    }
    let max_sum = 6 * DICE_COUNT as u32;
    match category {
        Category::ThreeOfAKind | Category::FourOfAKind | Category::Gamble => {
            (DICE_COUNT as u32..=max_sum).contains(&value)
        }
        Category::FullHouse => value == FULL_HOUSE_SCORE,
        Category::SmallStraight => value == SMALL_STRAIGHT_SCORE,
        Category::LargeStraight => value == LARGE_STRAIGHT_SCORE,
        Category::FiveDice => value
            .checked_sub(FIVE_DICE_SCORE)
            .is_some_and(|extra| extra % JOKER_BONUS == 0 && extra / JOKER_BONUS <= MAX_JOKERS),
        upper => upper.face().is_some_and(|face| {
            let face = u32::from(face);
            value % face == 0 && value <= face * DICE_COUNT as u32
        }),
    }
}

/// How many dice show each face. Index 0 is unused so `counts[face]` reads naturally.
pub fn face_counts(values: &[u8; DICE_COUNT]) -> [u8; 7] {
    let mut counts = [0u8; 7];
    for &v in values {
        if let Some(slot) = counts.get_mut(v as usize) {
            *slot += 1;
        }
    }
    counts
}

pub fn dice_sum(values: &[u8; DICE_COUNT]) -> u32 {
    values.iter().map(|&v| u32::from(v)).sum()
}

/// The face shared by all five dice, if any.
pub fn five_of_a_kind(counts: &[u8; 7]) -> Option<u8> {
    (1..=6u8).find(|&face| counts[face as usize] as usize == DICE_COUNT)
}

/// True if `values` contains `size` distinct consecutive faces.
///
/// Duplicates are ignored. The scan gives up as soon as the faces left to
/// visit can no longer complete a run of `size`.
pub fn is_straight(values: &[u8], size: usize) -> bool {
    let mut faces = values.to_vec();
    faces.sort_unstable();
    faces.dedup();

    if faces.len() < size {
        return false;
    }

    let mut run = 0usize;
    let mut last: Option<u8> = None;

    for (index, &face) in faces.iter().enumerate() {
        run = match last {
            Some(prev) if face == prev + 1 => run + 1,
            _ => 1,
        };

        if run >= size {
            return true;
        }

        let remaining = faces.len() - (index + 1);
        if remaining + run < size {
            return false;
        }

        last = Some(face);
    }

    false
}

/// Potential score for every category still open on `scores`.
///
/// Returns an empty map while any die is unset. If nothing at all can be
/// offered, every open category is offered at 0 so the player can still end
/// the turn.
pub fn compute_potential_scores(dice: &Dice, scores: &Scores) -> PotentialScores {
    let Some(values) = dice.values() else {
        return PotentialScores::default();
    };

    let counts = face_counts(&values);
    let sum = dice_sum(&values);

    let mut potential = match (five_of_a_kind(&counts), scores.get(Category::FiveDice)) {
        (Some(face), Some(recorded)) if recorded > 0 => joker_scores(face, sum, recorded, scores),
        _ => standard_scores(&values, &counts, sum, scores),
    };

    if potential.is_empty() {
        for category in scores.open_categories() {
            potential.offer(category, 0);
        }
    }

    potential
}

/// Natural value of `category` for this roll, `None` if the dice don't qualify.
fn natural_value(category: Category, values: &[u8; DICE_COUNT], counts: &[u8; 7], sum: u32) -> Option<u32> {
    let has_count = |n: u8| counts[1..].iter().any(|&c| c >= n);
    let has_exact = |n: u8| counts[1..].contains(&n);

    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.face()?;
            let count = u32::from(counts[face as usize]);
            (count > 0).then_some(count * u32::from(face))
        }
        Category::ThreeOfAKind => has_count(3).then_some(sum),
        Category::FourOfAKind => has_count(4).then_some(sum),
        Category::FullHouse => (has_exact(2) && has_exact(3)).then_some(FULL_HOUSE_SCORE),
        Category::SmallStraight => is_straight(values, 4).then_some(SMALL_STRAIGHT_SCORE),
        Category::LargeStraight => is_straight(values, 5).then_some(LARGE_STRAIGHT_SCORE),
        Category::Gamble => Some(sum),
        Category::FiveDice => has_exact(5).then_some(FIVE_DICE_SCORE),
    }
}

fn standard_scores(values: &[u8; DICE_COUNT], counts: &[u8; 7], sum: u32, scores: &Scores) -> PotentialScores {
    scores
        .open_categories()
        .filter_map(|category| natural_value(category, values, counts, sum).map(|v| (category, v)))
        .collect()
}

/// Lower-board value under the joker rule: shape requirements are waived.
fn joker_lower_value(category: Category, sum: u32) -> Option<u32> {
    match category {
        Category::ThreeOfAKind | Category::FourOfAKind | Category::Gamble => Some(sum),
        Category::FullHouse => Some(FULL_HOUSE_SCORE),
        Category::SmallStraight => Some(SMALL_STRAIGHT_SCORE),
        Category::LargeStraight => Some(LARGE_STRAIGHT_SCORE),
        _ => None,
    }
}

/// A repeat five-of-a-kind after 5Dice was already scored positively.
///
/// The matching upper box must be used first if it is open; only then do the
/// lower-board boxes open up at their flat/sum values.
fn joker_scores(face: u8, sum: u32, recorded_five_dice: u32, scores: &Scores) -> PotentialScores {
    let mut potential = PotentialScores::default();
    potential.offer(Category::FiveDice, recorded_five_dice.saturating_add(JOKER_BONUS));

    if let Some(upper) = Category::from_face(face).filter(|c| scores.is_open(*c)) {
        potential.offer(upper, sum);
        return potential;
    }

    let lower_full = Category::LOWER
        .iter()
        .filter(|c| **c != Category::FiveDice)
        .all(|c| scores.is_closed(*c));

    if lower_full {
        for category in scores.open_categories() {
            potential.offer(category, 0);
        }
    } else {
        for category in scores.open_categories() {
            if let Some(value) = joker_lower_value(category, sum) {
                potential.offer(category, value);
            }
        }
    }

    potential
}
