use super::*;

fn spiked_scores() -> BTreeMap<String, f64> {
    let mut scores = BTreeMap::new();
    for i in 0..19 {
        scores.insert(format!("p{i:02}"), 6.0 + (i % 3) as f64 * 0.1);
    }
    scores.insert("p99".to_string(), 0.5);
    scores
}

#[test]
fn test_report_only_keeps_all_scores() {
    let scores = spiked_scores();
    let out = run_stage1(&Stage1Inputs {
        criterion: "performance",
        scores: &scores,
        z_threshold: 3.0,
        drop_outliers: false,
    });
    assert_eq!(out.flagged, vec!["p99".to_string()]);
    assert_eq!(out.scores, scores);
    assert!(out.withheld.is_empty());
}

#[test]
fn test_drop_outliers_withholds_them() {
    let scores = spiked_scores();
    let out = run_stage1(&Stage1Inputs {
        criterion: "performance",
        scores: &scores,
        z_threshold: 3.0,
        drop_outliers: true,
    });
    assert_eq!(out.scores.len(), 19);
    assert!(!out.scores.contains_key("p99"));
    assert_eq!(out.withheld.get("p99"), Some(&0.5));
}

#[test]
fn test_empty_scores() {
    let scores = BTreeMap::new();
    let out = run_stage1(&Stage1Inputs {
        criterion: "performance",
        scores: &scores,
        z_threshold: 3.0,
        drop_outliers: true,
    });
    assert!(out.scores.is_empty());
    assert!(out.flagged.is_empty());
    assert!(out.result.z_scores.is_empty());
}
