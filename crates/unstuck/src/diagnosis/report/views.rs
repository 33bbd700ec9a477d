use super::prompt::render_prompt;
use crate::diagnosis::domain::{Category, TimeBucket, Trouble};
use crate::diagnosis::registry::Registry;
use crate::diagnosis::scoring::confidence_pct;
use crate::diagnosis::session::Session;
use serde::Serialize;

pub(crate) const NOT_SELECTED: &str = "not selected";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub name: &'static str,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub category: Category,
    pub name: &'static str,
    pub score: u32,
}

/// Time-scoped next steps for the primary category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionPlan {
    pub today: Vec<&'static str>,
    pub this_week: Vec<&'static str>,
    pub this_month: Vec<&'static str>,
}

impl ActionPlan {
    pub fn blocks(&self) -> [(&'static str, &[&'static str]); 3] {
        [
            ("Today", &self.today),
            ("This week", &self.this_week),
            ("This month", &self.this_month),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trouble: Option<Trouble>,
    pub trouble_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_bucket: Option<TimeBucket>,
    pub time_label: &'static str,
    pub primary: CategorySummary,
    pub secondary: CategorySummary,
    pub confidence: f64,
    pub confidence_pct: u8,
    pub catch: &'static str,
    pub explanation: &'static str,
    pub stop: Vec<&'static str>,
    pub plan: ActionPlan,
    pub ai_tips: Vec<&'static str>,
    pub ranking: Vec<RankingEntry>,
    pub prompt: String,
}

impl DiagnosisReport {
    pub(crate) fn build(session: &Session, registry: &Registry) -> Self {
        let ranking = session.ranking();
        let confidence = ranking.confidence();
        let confidence_pct = confidence_pct(confidence);

        let summary = |category: Category, score: u32| CategorySummary {
            category,
            name: registry.profile(category).name,
            score,
        };
        let primary = summary(ranking.primary().category, ranking.primary().score);
        let secondary = summary(ranking.secondary().category, ranking.secondary().score);
        let profile = registry.profile(primary.category);

        let trouble_label = session.trouble().map_or(NOT_SELECTED, Trouble::label);
        let time_label = session.time_bucket().map_or(NOT_SELECTED, TimeBucket::label);

        let prompt = render_prompt(
            trouble_label,
            time_label,
            primary.name,
            secondary.name,
            confidence_pct,
        );

        let ranking = ranking
            .entries()
            .iter()
            .enumerate()
            .map(|(position, entry)| RankingEntry {
                rank: position + 1,
                category: entry.category,
                name: registry.profile(entry.category).name,
                score: entry.score,
            })
            .collect();

        Self {
            trouble: session.trouble(),
            trouble_label,
            time_bucket: session.time_bucket(),
            time_label,
            primary,
            secondary,
            confidence,
            confidence_pct,
            catch: profile.catch,
            explanation: profile.why,
            stop: profile.stop.clone(),
            plan: ActionPlan {
                today: profile.today.clone(),
                this_week: profile.this_week.clone(),
                this_month: profile.this_month.clone(),
            },
            ai_tips: profile.ai_use.clone(),
            ranking,
            prompt,
        }
    }
}
