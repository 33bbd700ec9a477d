use serde::{Deserialize, Serialize};

/// Thresholds governing when the supplementary phase runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisPolicy {
    /// Supplementary questions run when confidence after the mandatory phase
    /// is strictly below this value.
    pub confidence_threshold: f64,
    /// Upper bound on supplementary questions, one per leading category.
    pub supplementary_limit: usize,
}

impl Default for DiagnosisPolicy {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.18,
            supplementary_limit: 3,
        }
    }
}

impl DiagnosisPolicy {
    pub fn needs_supplementary(&self, confidence: f64) -> bool {
        confidence < self.confidence_threshold
    }
}
