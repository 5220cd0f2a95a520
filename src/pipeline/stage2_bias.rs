use std::collections::BTreeMap;

use tracing::info;

use crate::analysis::analyzer::DistributionAnalyzer;
use crate::analysis::corrector::ScoreCorrector;
use crate::model::group::GroupLabel;
use crate::model::results::CorrectionResult;
use crate::model::thresholds::BiasThresholds;

#[derive(Debug, Clone)]
pub struct Stage2Inputs<'a> {
    pub scores: &'a BTreeMap<String, f64>,
    pub withheld: &'a BTreeMap<String, f64>,
    pub groups: &'a BTreeMap<String, GroupLabel>,
    pub thresholds: &'a BiasThresholds,
    pub apply_correction: bool,
}

#[derive(Debug, Clone)]
pub struct Stage2Output {
    pub correction: CorrectionResult,
    /// Adjusted scores plus any withheld outliers at their original value.
    pub final_scores: BTreeMap<String, f64>,
}

pub fn run_stage2(inputs: &Stage2Inputs<'_>) -> Stage2Output {
    let analyzer = DistributionAnalyzer::from_thresholds(inputs.thresholds);
    let corrector = ScoreCorrector::new(analyzer).with_score_ceiling(inputs.thresholds.score_ceiling);
    let correction = corrector.apply_reweighting(inputs.scores, inputs.groups, inputs.apply_correction);

    let pre = &correction.pre;
    info!(
        mean_a = pre.stats_a.mean,
        mean_b = pre.stats_b.mean,
        relative_difference = pre.relative_difference,
        p_value = pre.p_value,
        verdict = pre.verdict().as_str(),
        "pre-adjustment analysis"
    );
    match (&correction.post, correction.bias_reduction_pct()) {
        (Some(post), Some(reduction)) => info!(
            weight_a = correction.weight_a,
            relative_difference = post.relative_difference,
            reduction_pct = reduction,
            "reweighting applied"
        ),
        _ => info!(
            analysis_only = !inputs.apply_correction,
            "scores left unchanged"
        ),
    }

    let mut final_scores = correction.scores_adjusted.clone();
    for (id, score) in inputs.withheld {
        final_scores.entry(id.clone()).or_insert(*score);
    }

    Stage2Output {
        correction,
        final_scores,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_bias.rs"]
mod tests;
