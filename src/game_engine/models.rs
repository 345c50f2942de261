use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Number of dice in a hand.
pub const DICE_COUNT: usize = 5;

/// Rolls allowed per turn.
pub const MAX_ROLLS: u8 = 3;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Which half of the scoreboard a category lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Board {
    Upper,
    Lower,
}

/// One of the thirteen scoring boxes.
///
/// Serialized with the camelCase keys used by the save file
/// (`"ones"`, `"threeOfAKind"`, `"fiveDice"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Gamble,
    FiveDice,
}

impl Category {
    /// All thirteen categories in scoreboard order.
    pub const ALL: [Category; 13] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Gamble,
        Category::FiveDice,
    ];

    pub const UPPER: [Category; 6] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    pub const LOWER: [Category; 7] = [
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Gamble,
        Category::FiveDice,
    ];

    pub fn board(self) -> Board {
        match self.face() {
            Some(_) => Board::Upper,
            None => Board::Lower,
        }
    }

    /// The die face an upper-board category counts, `None` for the lower board.
    pub fn face(self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    /// Upper-board category for a die face (1 -> ones ... 6 -> sixes).
    pub fn from_face(face: u8) -> Option<Category> {
        match face {
            1 => Some(Category::Ones),
            2 => Some(Category::Twos),
            3 => Some(Category::Threes),
            4 => Some(Category::Fours),
            5 => Some(Category::Fives),
            6 => Some(Category::Sixes),
            _ => None,
        }
    }

    /// Keyboard shortcut shown next to the row.
    pub fn hotkey(self) -> char {
        match self {
            Category::Ones => '1',
            Category::Twos => '2',
            Category::Threes => '3',
            Category::Fours => '4',
            Category::Fives => '5',
            Category::Sixes => '6',
            Category::ThreeOfAKind => 'q',
            Category::FourOfAKind => 'w',
            Category::FullHouse => 'e',
            Category::SmallStraight => 'r',
            Category::LargeStraight => 't',
            Category::Gamble => 'y',
            Category::FiveDice => 'u',
        }
    }

    pub fn from_hotkey(key: char) -> Option<Category> {
        let key = key.to_ascii_lowercase();
        Category::ALL.into_iter().find(|c| c.hotkey() == key)
    }

    /// Save-file key, identical to the serde name.
    pub fn key(self) -> &'static str {
        match self {
            Category::Ones => "ones",
            Category::Twos => "twos",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::ThreeOfAKind => "threeOfAKind",
            Category::FourOfAKind => "fourOfAKind",
            Category::FullHouse => "fullHouse",
            Category::SmallStraight => "smallStraight",
            Category::LargeStraight => "largeStraight",
            Category::Gamble => "gamble",
            Category::FiveDice => "fiveDice",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Ones          => "Ones",
            Category::Twos          => "Twos",
            Category::Threes        => "Threes",
            Category::Fours         => "Fours",
            Category::Fives         => "Fives",
            Category::Sixes         => "Sixes",
            Category::ThreeOfAKind  => "Three of a kind",
            Category::FourOfAKind   => "Four of a kind",
            Category::FullHouse     => "Full house",
            Category::SmallStraight => "Small straight",
            Category::LargeStraight => "Large straight",
            Category::Gamble        => "Gamble",
            Category::FiveDice      => "5Dice",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Dice
// ---------------------------------------------------------------------------

/// A single die. `value` is `None` until the first roll of a turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    pub value: Option<u8>,
    pub held: bool,
}

impl Die {
    pub fn rolled(value: u8) -> Self {
        Die { value: Some(value), held: false }
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "-"),
        }
    }
}

/// The five dice, addressed by position 0..=4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dice(pub [Die; DICE_COUNT]);

impl Dice {
    /// Unheld dice showing the given faces.
    pub fn from_values(values: [u8; DICE_COUNT]) -> Self {
        Dice(values.map(Die::rolled))
    }

    /// Face values, or `None` if any die is still unset.
    pub fn values(&self) -> Option<[u8; DICE_COUNT]> {
        let mut out = [0u8; DICE_COUNT];
        for (slot, die) in out.iter_mut().zip(self.0.iter()) {
            *slot = die.value?;
        }
        Some(out)
    }

    pub fn is_rolled(&self) -> bool {
        self.values().is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Die> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Die> {
        self.0.iter_mut()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Die> {
        self.0.get_mut(index)
    }
}

impl Index<usize> for Dice {
    type Output = Die;

    fn index(&self, index: usize) -> &Die {
        &self.0[index]
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", faces.join(" "))
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Recorded category scores. A category absent from the map is open; a
/// present value (zero included) closes it for good.
///
/// On disk every category is written, open ones as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Category, Option<u32>>", into = "BTreeMap<Category, Option<u32>>")]
pub struct Scores(BTreeMap<Category, u32>);

impl Scores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<u32> {
        self.0.get(&category).copied()
    }

    pub fn is_open(&self, category: Category) -> bool {
        !self.0.contains_key(&category)
    }

    pub fn is_closed(&self, category: Category) -> bool {
        self.0.contains_key(&category)
    }

    /// Closes `category` with `value`.
    pub fn record(&mut self, category: Category, value: u32) {
        self.0.insert(category, value);
    }

    /// Builder-style `record`, handy for fixtures.
    pub fn with(mut self, category: Category, value: u32) -> Self {
        self.record(category, value);
        self
    }

    pub fn is_complete(&self) -> bool {
        Category::ALL.iter().all(|c| self.is_closed(*c))
    }

    pub fn open_categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(move |c| self.is_open(*c))
    }

    /// Sum of the closed categories in `board`, saturating at `u32::MAX`.
    pub fn board_sum(&self, board: Board) -> u32 {
        self.0
            .iter()
            .filter(|(c, _)| c.board() == board)
            .map(|(_, v)| *v)
            .fold(0, u32::saturating_add)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<Category, Option<u32>>> for Scores {
    fn from(raw: BTreeMap<Category, Option<u32>>) -> Self {
        Scores(raw.into_iter().filter_map(|(c, v)| v.map(|v| (c, v))).collect())
    }
}

impl From<Scores> for BTreeMap<Category, Option<u32>> {
    fn from(scores: Scores) -> Self {
        Category::ALL
            .into_iter()
            .map(|c| (c, scores.get(c)))
            .collect()
    }
}

impl FromIterator<(Category, u32)> for Scores {
    fn from_iter<I: IntoIterator<Item = (Category, u32)>>(iter: I) -> Self {
        Scores(iter.into_iter().collect())
    }
}

/// What each open category would score on the current roll.
///
/// Kept apart from [`Scores`] so an offer can never be mistaken for a
/// committed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PotentialScores(BTreeMap<Category, u32>);

impl PotentialScores {
    pub fn get(&self, category: Category) -> Option<u32> {
        self.0.get(&category).copied()
    }

    pub fn offer(&mut self, category: Category, value: u32) {
        self.0.insert(category, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Category, u32)> for PotentialScores {
    fn from_iter<I: IntoIterator<Item = (Category, u32)>>(iter: I) -> Self {
        PotentialScores(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Persisted snapshot
// ---------------------------------------------------------------------------

/// One finished game in the top-scores history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopScore {
    /// Unix epoch, milliseconds.
    pub timestamp: i64,
    pub score: u32,
}

/// Everything that survives between sessions: the save-file schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub dice: Dice,
    pub scores: Scores,
    pub turn: u8,
    pub top_scores: Vec<TopScore>,
}
