use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stuck-pattern archetypes in registry declaration order. The order is the
/// ranking tiebreak, so it must never be rearranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Overthink,
    Perfect,
    Info,
    Priority,
    Energy,
    Time,
    Distract,
    Motivation,
}

impl Category {
    pub const COUNT: usize = 8;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Overthink,
            Self::Perfect,
            Self::Info,
            Self::Priority,
            Self::Energy,
            Self::Time,
            Self::Distract,
            Self::Motivation,
        ]
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Overthink => "OVERTHINK",
            Self::Perfect => "PERFECT",
            Self::Info => "INFO",
            Self::Priority => "PRIORITY",
            Self::Energy => "ENERGY",
            Self::Time => "TIME",
            Self::Distract => "DISTRACT",
            Self::Motivation => "MOTIVATION",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.tag().eq_ignore_ascii_case(tag.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_tag(value).ok_or_else(|| UnknownOption::new("category", value))
    }
}

/// Primary difficulty picked before the question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trouble {
    Action,
    Decide,
    Focus,
    Tired,
    NoTime,
}

impl Trouble {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Action,
            Self::Decide,
            Self::Focus,
            Self::Tired,
            Self::NoTime,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Action => "ACTION",
            Self::Decide => "DECIDE",
            Self::Focus => "FOCUS",
            Self::Tired => "TIRED",
            Self::NoTime => "NO_TIME",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Action => "Can't keep taking action",
            Self::Decide => "Can't make decisions",
            Self::Focus => "Can't focus",
            Self::Tired => "Too tired to move",
            Self::NoTime => "No time",
        }
    }
}

impl FromStr for Trouble {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|trouble| trouble.key().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| UnknownOption::new("trouble", value))
    }
}

/// Weekday time the user can spend on themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeBucket {
    #[serde(rename = "0_15")]
    UpToFifteen,
    #[serde(rename = "30")]
    AboutThirty,
    #[serde(rename = "60")]
    HourOrMore,
}

impl TimeBucket {
    pub const fn ordered() -> [Self; 3] {
        [Self::UpToFifteen, Self::AboutThirty, Self::HourOrMore]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::UpToFifteen => "0_15",
            Self::AboutThirty => "30",
            Self::HourOrMore => "60",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UpToFifteen => "0-15 minutes",
            Self::AboutThirty => "About 30 minutes",
            Self::HourOrMore => "1 hour or more",
        }
    }
}

impl FromStr for TimeBucket {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|bucket| bucket.key() == normalized)
            .ok_or_else(|| UnknownOption::new("time bucket", value))
    }
}

/// Forced two-way answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
}

impl Choice {
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl TryFrom<char> for Choice {
    type Error = UnknownOption;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            other => Err(UnknownOption::new("choice", &other.to_string())),
        }
    }
}

impl FromStr for Choice {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut chars = value.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(single), None) => Self::try_from(single),
            _ => Err(UnknownOption::new("choice", value)),
        }
    }
}

/// Dense evidence contribution of one answer, keyed by every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeightVector([u32; Category::COUNT]);

impl WeightVector {
    pub const fn zero() -> Self {
        Self([0; Category::COUNT])
    }

    pub fn from_entries(entries: &[(Category, u32)]) -> Self {
        let mut weights = [0; Category::COUNT];
        for (category, weight) in entries {
            weights[category.index()] += weight;
        }
        Self(weights)
    }

    pub fn get(&self, category: Category) -> u32 {
        self.0[category.index()]
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|weight| *weight == 0)
    }

    /// Non-zero entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ordered()
            .into_iter()
            .map(|category| (category, self.get(category)))
            .filter(|(_, weight)| *weight > 0)
    }
}

/// Raised when free-form input names an option outside its closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownOption {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
