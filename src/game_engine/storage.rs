//! Save-file persistence.
//!
//! The file is plain JSON matching [`GameState`]. It is checked field by
//! field before it reaches the engine, so a hand-edited or truncated file is
//! reported with one issue per bad path instead of a single serde error.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::game_engine::{
    evaluator::is_reachable_score,
    history::MAX_TOP_SCORES,
    models::{Category, GameState, DICE_COUNT, MAX_ROLLS},
};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save file failed validation with {} issue(s)", .0.len())]
    Invalid(Vec<ValidationIssue>),
}

/// One problem found in a save file, located by a `a > b > c` style path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(path: &[String], message: impl Into<String>) -> Self {
        ValidationIssue {
            path: path.join(" > "),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} {}", self.path, self.message)
        }
    }
}

/// Read and validate the save file. A missing file is not an error.
pub fn load(path: &Path) -> Result<Option<GameState>, StorageError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no save file, starting fresh");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    parse(&text).map(Some)
}

/// Parse and validate a snapshot from JSON text.
pub fn parse(text: &str) -> Result<GameState, StorageError> {
    let raw: Value = serde_json::from_str(text)?;
    let issues = validate(&raw);
    if !issues.is_empty() {
        warn!(issues = issues.len(), "rejected save file");
        return Err(StorageError::Invalid(issues));
    }
    Ok(serde_json::from_value(raw)?)
}

/// Write the snapshot, replacing the file only once the new copy is complete.
pub fn save(path: &Path, state: &GameState) -> Result<(), StorageError> {
    let text = serde_json::to_string_pretty(state)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), turn = state.turn, "game saved");
    Ok(())
}

/// Every problem with `raw` as a [`GameState`]. Empty means it is safe to load.
pub fn validate(raw: &Value) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let Some(root) = raw.as_object() else {
        issues.push(ValidationIssue::new(&[], "expected an object"));
        return issues;
    };

    let turn = check_turn(root, &mut issues);
    let dice_set = check_dice(root, &mut issues);
    check_scores(root, &mut issues);
    check_top_scores(root, &mut issues);

    // Cross-field: dice are all set during a turn and all unset between turns.
    if let (Some(turn), Some(dice_set)) = (turn, dice_set) {
        let path = ["dice".to_string()];
        match (turn, dice_set) {
            (0, DiceSet::All) => issues.push(ValidationIssue::new(&path, "must be unset before the first roll")),
            (1.., DiceSet::None) => issues.push(ValidationIssue::new(&path, "must be rolled once the turn has started")),
            (_, DiceSet::Some) => issues.push(ValidationIssue::new(&path, "must be all rolled or all unset")),
            _ => {}
        }
    }

    issues
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiceSet {
    None,
    Some,
    All,
}

fn path_of(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

fn check_turn(root: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) -> Option<u8> {
    let path = path_of(&["turn"]);
    match root.get("turn").map(Value::as_u64) {
        None => issues.push(ValidationIssue::new(&path, "is required")),
        Some(Some(turn)) if turn <= u64::from(MAX_ROLLS) => return Some(turn as u8),
        Some(_) => issues.push(ValidationIssue::new(&path, format!("must be an integer 0-{MAX_ROLLS}"))),
    }
    None
}

fn check_dice(root: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) -> Option<DiceSet> {
    let Some(dice) = root.get("dice") else {
        issues.push(ValidationIssue::new(&path_of(&["dice"]), "is required"));
        return None;
    };
    let Some(dice) = dice.as_array() else {
        issues.push(ValidationIssue::new(&path_of(&["dice"]), "must be a list"));
        return None;
    };
    if dice.len() != DICE_COUNT {
        issues.push(ValidationIssue::new(
            &path_of(&["dice"]),
            format!("must hold exactly {DICE_COUNT} dice"),
        ));
        return None;
    }

    let before = issues.len();
    let mut set = 0usize;
    for (index, die) in dice.iter().enumerate() {
        let index = index.to_string();
        let index = index.as_str();
        let Some(die) = die.as_object() else {
            issues.push(ValidationIssue::new(&path_of(&["dice", index]), "must be an object"));
            continue;
        };

        let value = match die.get("value") {
            None | Some(Value::Null) => None,
            Some(v) => match v.as_u64() {
                Some(face @ 1..=6) => Some(face),
                _ => {
                    issues.push(ValidationIssue::new(
                        &path_of(&["dice", index, "value"]),
                        "must be null or an integer 1-6",
                    ));
                    continue;
                }
            },
        };
        if value.is_some() {
            set += 1;
        }

        match die.get("held") {
            Some(Value::Bool(true)) if value.is_none() => issues.push(ValidationIssue::new(
                &path_of(&["dice", index, "held"]),
                "cannot be set on an unrolled die",
            )),
            Some(Value::Bool(_)) => {}
            None => issues.push(ValidationIssue::new(&path_of(&["dice", index, "held"]), "is required")),
            Some(_) => issues.push(ValidationIssue::new(&path_of(&["dice", index, "held"]), "must be a boolean")),
        }
    }

    if issues.len() > before {
        return None;
    }
    Some(match set {
        0 => DiceSet::None,
        DICE_COUNT => DiceSet::All,
        _ => DiceSet::Some,
    })
}

fn check_scores(root: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    let Some(scores) = root.get("scores") else {
        issues.push(ValidationIssue::new(&path_of(&["scores"]), "is required"));
        return;
    };
    let Some(scores) = scores.as_object() else {
        issues.push(ValidationIssue::new(&path_of(&["scores"]), "must be an object"));
        return;
    };

    for (key, value) in scores {
        let path = path_of(&["scores", key.as_str()]);
        let Some(category) = Category::from_key(key) else {
            issues.push(ValidationIssue::new(&path, "is not a scoring category"));
            continue;
        };
        if value.is_null() {
            continue;
        }
        match value.as_u64().map(u32::try_from) {
            Some(Ok(points)) if is_reachable_score(category, points) => {}
            Some(_) => issues.push(ValidationIssue::new(
                &path,
                format!("{value} is not a possible {category} score"),
            )),
            None => issues.push(ValidationIssue::new(&path, "must be null or a non-negative integer")),
        }
    }
}

fn check_top_scores(root: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    let Some(top) = root.get("topScores") else {
        issues.push(ValidationIssue::new(&path_of(&["topScores"]), "is required"));
        return;
    };
    let Some(top) = top.as_array() else {
        issues.push(ValidationIssue::new(&path_of(&["topScores"]), "must be a list"));
        return;
    };
    if top.len() > MAX_TOP_SCORES {
        issues.push(ValidationIssue::new(
            &path_of(&["topScores"]),
            format!("must hold at most {MAX_TOP_SCORES} entries"),
        ));
    }

    for (index, entry) in top.iter().enumerate() {
        let index = index.to_string();
        let index = index.as_str();
        let Some(entry) = entry.as_object() else {
            issues.push(ValidationIssue::new(&path_of(&["topScores", index]), "must be an object"));
            continue;
        };
        if !entry.get("timestamp").is_some_and(|t| t.as_i64().is_some_and(|t| t >= 0)) {
            issues.push(ValidationIssue::new(
                &path_of(&["topScores", index, "timestamp"]),
                "must be epoch milliseconds",
            ));
        }
        if !entry
            .get("score")
            .is_some_and(|s| s.as_u64().is_some_and(|s| s <= u64::from(u32::MAX)))
        {
            issues.push(ValidationIssue::new(
                &path_of(&["topScores", index, "score"]),
                "must be a non-negative integer",
            ));
        }
    }
}
