use std::collections::BTreeMap;

use tracing::debug;

use crate::analysis::analyzer::{
    DistributionAnalyzer, GroupedScores, group_samples, partition_by_group,
};
use crate::analysis::distribution::mean;
use crate::model::group::{GROUP_A, GROUP_B, GroupLabel};
use crate::model::results::CorrectionResult;
use crate::report::text::render_correction_report;

pub const SCORE_CEILING: f64 = 10.0;

/// Multiplicative reweighting of group A toward group B's mean.
///
/// Direction is fixed: A is always the rescaled cohort and B keeps a weight
/// of exactly 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCorrector {
    analyzer: DistributionAnalyzer,
    score_ceiling: f64,
}

impl Default for ScoreCorrector {
    fn default() -> Self {
        Self::new(DistributionAnalyzer::default())
    }
}

impl ScoreCorrector {
    pub fn new(analyzer: DistributionAnalyzer) -> Self {
        Self {
            analyzer,
            score_ceiling: SCORE_CEILING,
        }
    }

    pub fn with_score_ceiling(mut self, ceiling: f64) -> Self {
        self.score_ceiling = ceiling;
        self
    }

    pub fn analyzer(&self) -> &DistributionAnalyzer {
        &self.analyzer
    }

    pub fn compute_adjustment_weights(&self, samples_by_group: &GroupedScores) -> (f64, f64) {
        let a = group_samples(samples_by_group, GROUP_A);
        let b = group_samples(samples_by_group, GROUP_B);
        if a.is_empty() || b.is_empty() {
            return (1.0, 1.0);
        }
        let mean_a = mean(a);
        if mean_a == 0.0 {
            return (1.0, 1.0);
        }
        (mean(b) / mean_a, 1.0)
    }

    pub fn apply_reweighting(
        &self,
        scores: &BTreeMap<String, f64>,
        groups: &BTreeMap<String, GroupLabel>,
        apply_correction: bool,
    ) -> CorrectionResult {
        let partition = partition_by_group(scores, groups);
        let pre = self.analyzer.analyze_bias(&partition);
        let (weight_a, weight_b) = self.compute_adjustment_weights(&partition);

        if !apply_correction || !pre.bias_detected {
            debug!(
                apply_correction,
                bias_detected = pre.bias_detected,
                "reweighting skipped"
            );
            return CorrectionResult {
                weight_a,
                weight_b,
                scores_original: scores.clone(),
                scores_adjusted: scores.clone(),
                pre,
                post: None,
            };
        }

        let scores_adjusted = scores
            .iter()
            .map(|(id, &score)| {
                let adjusted = match groups.get(id).copied() {
                    Some(GROUP_A) => (score * weight_a).min(self.score_ceiling),
                    Some(GROUP_B) => score * weight_b,
                    _ => score,
                };
                (id.clone(), round2(adjusted))
            })
            .collect::<BTreeMap<_, _>>();

        let post = self
            .analyzer
            .analyze_bias(&partition_by_group(&scores_adjusted, groups));
        debug!(
            weight_a,
            pre_relative = pre.relative_difference,
            post_relative = post.relative_difference,
            "reweighting applied"
        );

        CorrectionResult {
            weight_a,
            weight_b,
            scores_original: scores.clone(),
            scores_adjusted,
            pre,
            post: Some(post),
        }
    }

    pub fn generate_correction_report(&self, result: &CorrectionResult) -> String {
        render_correction_report(result)
    }
}

/// Two-decimal rounding, half-cents to even.
fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/corrector.rs"]
mod tests;
