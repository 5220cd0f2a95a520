use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::stats::DistributionStats;

/// Outcome of comparing group A (disadvantaged) against group B (baseline).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub stats_a: DistributionStats,
    pub stats_b: DistributionStats,
    /// `stats_b.mean - stats_a.mean`; positive means B scores higher.
    pub mean_difference: f64,
    /// `mean_difference` as a fraction of A's mean, 0 when A's mean is 0.
    pub relative_difference: f64,
    /// Two-sample t statistic (B vs A); 0 when the test was not run.
    pub t_statistic: f64,
    pub p_value: f64,
    pub bias_detected: bool,
    pub statistically_significant: bool,
}

impl AnalysisResult {
    pub fn verdict(&self) -> BiasVerdict {
        BiasVerdict::from_result(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasVerdict {
    /// Significant disparity with group B scoring higher.
    FavorsB,
    /// Significant disparity with group A scoring higher (or equal means).
    FavorsA,
    NotSignificant,
    None,
}

impl BiasVerdict {
    pub fn from_result(result: &AnalysisResult) -> Self {
        match (result.bias_detected, result.statistically_significant) {
            (true, true) if result.mean_difference > 0.0 => BiasVerdict::FavorsB,
            (true, true) => BiasVerdict::FavorsA,
            (true, false) => BiasVerdict::NotSignificant,
            (false, _) => BiasVerdict::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BiasVerdict::FavorsB => "favors_b",
            BiasVerdict::FavorsA => "favors_a",
            BiasVerdict::NotSignificant => "not_significant",
            BiasVerdict::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectionResult {
    pub weight_a: f64,
    pub weight_b: f64,
    pub scores_original: BTreeMap<String, f64>,
    pub scores_adjusted: BTreeMap<String, f64>,
    pub pre: AnalysisResult,
    /// Present only when a correction was actually applied.
    pub post: Option<AnalysisResult>,
}

impl CorrectionResult {
    pub fn was_applied(&self) -> bool {
        self.post.is_some()
    }

    /// Relative-gap reduction in percent; `None` when no correction ran.
    pub fn bias_reduction_pct(&self) -> Option<f64> {
        let post = self.post.as_ref()?;
        let before = self.pre.relative_difference.abs();
        let after = post.relative_difference.abs();
        if before > 0.0 {
            Some((before - after) / before * 100.0)
        } else {
            Some(0.0)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/results.rs"]
mod tests;
