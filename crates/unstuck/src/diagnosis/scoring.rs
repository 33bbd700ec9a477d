use super::domain::{Category, WeightVector};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Accumulated evidence for every category. Values only ever grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreState([u32; Category::COUNT]);

impl ScoreState {
    pub const fn zero() -> Self {
        Self([0; Category::COUNT])
    }

    pub fn from_entries(entries: &[(Category, u32)]) -> Self {
        Self::zero().merge(&WeightVector::from_entries(entries))
    }

    /// Returns the per-category sum of `self` and `delta`; `self` is untouched.
    pub fn merge(&self, delta: &WeightVector) -> Self {
        let mut next = self.0;
        for category in Category::ordered() {
            next[category.index()] = next[category.index()].saturating_add(delta.get(category));
        }
        Self(next)
    }

    pub fn get(&self, category: Category) -> u32 {
        self.0[category.index()]
    }

    /// All categories by descending score; ties keep declaration order.
    pub fn rank(&self) -> Ranking {
        let mut entries: Vec<RankedCategory> = Category::ordered()
            .into_iter()
            .map(|category| RankedCategory {
                category,
                score: self.get(category),
            })
            .collect();
        // sort_by is stable, which is what makes the tiebreak deterministic
        entries.sort_by(|left, right| right.score.cmp(&left.score));
        Ranking { entries }
    }

    pub fn confidence(&self) -> f64 {
        self.rank().confidence()
    }
}

impl Serialize for ScoreState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::COUNT))?;
        for category in Category::ordered() {
            map.serialize_entry(category.tag(), &self.get(category))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedCategory {
    pub category: Category,
    pub score: u32,
}

/// Ordered view of a [`ScoreState`]. Always holds every category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<RankedCategory>,
}

impl Ranking {
    pub fn entries(&self) -> &[RankedCategory] {
        &self.entries
    }

    pub fn primary(&self) -> RankedCategory {
        self.entries[0]
    }

    pub fn secondary(&self) -> RankedCategory {
        self.entries[1]
    }

    pub fn top(&self, count: usize) -> impl Iterator<Item = &RankedCategory> {
        self.entries.iter().take(count)
    }

    /// Margin between the two leaders relative to the leader: `(s1 - s2) / max(1, s1)`,
    /// or zero when nothing has scored yet. A lone point of evidence yields 1.0.
    pub fn confidence(&self) -> f64 {
        let top = self.primary().score;
        let runner_up = self.secondary().score;
        if top == 0 {
            return 0.0;
        }
        f64::from(top - runner_up) / f64::from(top.max(1))
    }
}

/// Confidence rendered as a whole percentage, rounded half away from zero.
pub fn confidence_pct(confidence: f64) -> u8 {
    (confidence * 100.0).round().clamp(0.0, 100.0) as u8
}
