use std::time::{SystemTime, UNIX_EPOCH};

use crate::game_engine::models::TopScore;

/// Entries kept in the top-scores history.
pub const MAX_TOP_SCORES: usize = 20;

/// Current wall-clock time as Unix epoch milliseconds.
pub fn now_ms() -> i64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as i64
}

/// Insert `entry`, keep the list sorted by score (highest first) and drop
/// everything past [`MAX_TOP_SCORES`].
///
/// Ties keep the older game ahead. Returns the 0-based rank of the new entry,
/// or `None` if it didn't make the cut.
pub fn record_top_score(history: &mut Vec<TopScore>, entry: TopScore) -> Option<usize> {
    history.push(entry);
    let newest = history.len() - 1;

    let mut indexed: Vec<(usize, TopScore)> = history.drain(..).enumerate().collect();
    indexed.sort_by(|a, b| b.1.score.cmp(&a.1.score));
    indexed.truncate(MAX_TOP_SCORES);

    let rank = indexed.iter().position(|(i, _)| *i == newest);
    history.extend(indexed.into_iter().map(|(_, e)| e));
    rank
}

/// Highest score on record.
pub fn best(history: &[TopScore]) -> Option<TopScore> {
    history.iter().copied().max_by(|a, b| a.score.cmp(&b.score).then(b.timestamp.cmp(&a.timestamp)))
}
