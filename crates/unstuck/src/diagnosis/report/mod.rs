mod export;
mod prompt;
pub mod views;

pub use export::{render_text, write_ranking_csv};
pub use prompt::render_prompt;
pub use views::{ActionPlan, CategorySummary, DiagnosisReport, RankingEntry};
