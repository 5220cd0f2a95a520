use std::collections::BTreeMap;

use super::*;
use crate::analysis::analyzer::{DistributionAnalyzer, GroupedScores};
use crate::analysis::ranking::{Criterion, RankingCalculator};

fn analyze(a: &[f64], b: &[f64]) -> AnalysisResult {
    let mut samples = GroupedScores::new();
    samples.insert(GROUP_A, a.to_vec());
    samples.insert(GROUP_B, b.to_vec());
    DistributionAnalyzer::default().analyze_bias(&samples)
}

#[test]
fn test_analysis_report_strong_bias_names_direction() {
    let report = render_analysis_report(&analyze(
        &[5.0, 5.5, 6.0, 5.2, 5.8],
        &[7.0, 7.5, 8.0, 7.2, 7.8],
    ));
    assert!(report.contains("STATISTICS - FEMALE:"));
    assert!(report.contains("STATISTICS - MALE:"));
    assert!(report.contains("BIAS DETECTED with statistical significance"));
    assert!(report.contains("Male group receives higher evaluations than female group"));
}

#[test]
fn test_analysis_report_reverse_direction() {
    let report = render_analysis_report(&analyze(
        &[7.0, 7.5, 8.0, 7.2, 7.8],
        &[5.0, 5.5, 6.0, 5.2, 5.8],
    ));
    assert!(report.contains("Female group receives higher evaluations than male group"));
}

#[test]
fn test_analysis_report_weak_and_none() {
    let weak = render_analysis_report(&analyze(&[7.0, 7.0, 7.0], &[8.0, 8.0, 8.0]));
    assert!(weak.contains("BIAS DETECTED (without statistical significance)"));
    assert!(!weak.contains("->"));
    assert!(weak.contains("Relative difference: 14.29%"));

    let none = render_analysis_report(&analyze(&[7.0, 8.0], &[7.0, 8.0]));
    assert!(none.contains("No significant bias detected"));
}

#[test]
fn test_outlier_section_lists_removed() {
    let result = OutlierResult {
        indices: vec![3],
        z_scores: vec![0.1, 0.2, 0.1, 3.5],
        mean: 5.0,
        std_dev: 1.0,
        threshold: 3.0,
    };
    let text = render_outlier_section("performance", &result, &["P4".to_string()]);
    assert!(text.contains("OUTLIERS (performance, |z| > 3.00)"));
    assert!(text.contains("Outliers detected: 1"));
    assert!(text.contains("Removed: P4"));
}

#[test]
fn test_ranking_report_lists_top_and_distribution() {
    let mut evaluations = BTreeMap::new();
    evaluations.insert(
        "p1".to_string(),
        BTreeMap::from([("perf".to_string(), 9.0)]),
    );
    evaluations.insert(
        "p2".to_string(),
        BTreeMap::from([("perf".to_string(), 8.0)]),
    );
    let criteria = vec![Criterion::new("perf", 1.0, "").unwrap()];
    let ranking = RankingCalculator.rank(&evaluations, &criteria, None);
    let text = render_ranking_report(&ranking, 1);
    assert!(text.contains("TOP 1:"));
    assert!(text.contains("- perf (weight: 1.00)"));
    assert!(text.contains("p1"));
    assert!(!text.contains("p2 "));
    assert!(text.contains("Unspecified: 1 (100.00%)"));
}
