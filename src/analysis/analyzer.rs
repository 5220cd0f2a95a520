use std::collections::BTreeMap;

use crate::analysis::distribution::compute_statistics;
use crate::analysis::ttest::two_sample_ttest;
use crate::model::group::{GROUP_A, GROUP_B, GroupLabel};
use crate::model::results::AnalysisResult;
use crate::model::stats::DistributionStats;
use crate::model::thresholds::{BiasThresholds, TTestKind};
use crate::report::text::render_analysis_report;

pub type GroupedScores = BTreeMap<GroupLabel, Vec<f64>>;

/// Compares the score distribution of group A against group B.
///
/// Holds only immutable configuration; every method is a pure function of
/// its arguments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionAnalyzer {
    pub threshold: f64,
    pub alpha: f64,
    pub test: TTestKind,
}

impl Default for DistributionAnalyzer {
    fn default() -> Self {
        Self::new(0.05, 0.05)
    }
}

impl DistributionAnalyzer {
    pub fn new(threshold: f64, alpha: f64) -> Self {
        Self {
            threshold,
            alpha,
            test: TTestKind::Student,
        }
    }

    pub fn from_thresholds(thresholds: &BiasThresholds) -> Self {
        Self {
            threshold: thresholds.threshold,
            alpha: thresholds.alpha,
            test: thresholds.test,
        }
    }

    pub fn with_test(mut self, test: TTestKind) -> Self {
        self.test = test;
        self
    }

    pub fn compute_statistics(&self, samples: &[f64]) -> DistributionStats {
        compute_statistics(samples)
    }

    pub fn analyze_bias(&self, samples_by_group: &GroupedScores) -> AnalysisResult {
        let a = group_samples(samples_by_group, GROUP_A);
        let b = group_samples(samples_by_group, GROUP_B);

        let stats_a = compute_statistics(a);
        let stats_b = compute_statistics(b);

        let mean_difference = stats_b.mean - stats_a.mean;
        let relative_difference = if stats_a.mean != 0.0 {
            mean_difference / stats_a.mean
        } else {
            0.0
        };

        let test = two_sample_ttest(b, a, self.test);

        AnalysisResult {
            stats_a,
            stats_b,
            mean_difference,
            relative_difference,
            t_statistic: test.statistic,
            p_value: test.p_value,
            bias_detected: relative_difference.abs() > self.threshold,
            statistically_significant: test.p_value < self.alpha,
        }
    }

    pub fn generate_report(&self, result: &AnalysisResult) -> String {
        render_analysis_report(result)
    }
}

pub(crate) fn group_samples(samples_by_group: &GroupedScores, group: GroupLabel) -> &[f64] {
    samples_by_group
        .get(&group)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Splits an id->score map into the two compared cohorts. Ids whose label is
/// missing or not compared are skipped.
pub fn partition_by_group(
    scores: &BTreeMap<String, f64>,
    groups: &BTreeMap<String, GroupLabel>,
) -> GroupedScores {
    let mut out: GroupedScores = BTreeMap::new();
    out.insert(GROUP_A, Vec::new());
    out.insert(GROUP_B, Vec::new());
    for (id, &score) in scores {
        match groups.get(id) {
            Some(&group) if group.is_compared() => {
                out.entry(group).or_default().push(score);
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/analyzer.rs"]
mod tests;
