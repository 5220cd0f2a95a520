use super::*;

fn spiked(n: usize, base: f64, spike: f64) -> Vec<f64> {
    let mut values = vec![base; n];
    values[n - 1] = spike;
    values
}

#[test]
fn test_detect_single_spike() {
    let values = spiked(20, 5.0, 50.0);
    let result = OutlierDetector::default().detect(&values);
    assert_eq!(result.indices, vec![19]);
    assert_eq!(result.z_scores.len(), 20);
    assert!((result.mean - 7.25).abs() < 1e-12);
    assert!(result.z_scores[19] > 4.0);
    assert_eq!(result.threshold, 3.0);
}

#[test]
fn test_empty_and_constant_inputs() {
    let detector = OutlierDetector::new(2.5);
    let empty = detector.detect(&[]);
    assert!(empty.indices.is_empty());
    assert!(empty.z_scores.is_empty());
    assert_eq!(empty.threshold, 2.5);

    let flat = detector.detect(&[4.0, 4.0, 4.0]);
    assert!(flat.indices.is_empty());
    assert_eq!(flat.z_scores, vec![0.0, 0.0, 0.0]);
    assert_eq!(flat.std_dev, 0.0);
    assert_eq!(flat.mean, 4.0);
}

#[test]
fn test_detect_and_remove() {
    let values = spiked(20, 5.0, 50.0);
    let (kept, result) = OutlierDetector::default().detect_and_remove(&values);
    assert_eq!(kept.len(), 19);
    assert!(kept.iter().all(|&v| v == 5.0));
    assert_eq!(result.indices, vec![19]);
}

#[test]
fn test_global_outliers_need_min_dimensions() {
    let mut rows = vec![vec![5.0, 6.0]; 12];
    rows[0] = vec![50.0, 60.0];
    let detector = OutlierDetector::default();

    let per_dim = detector.detect_per_dimension(&rows).unwrap();
    assert_eq!(per_dim.len(), 2);
    assert_eq!(per_dim[0].indices, vec![0]);
    assert_eq!(per_dim[1].indices, vec![0]);

    assert_eq!(detector.detect_global(&rows, 2).unwrap(), vec![0]);
    assert!(detector.detect_global(&rows, 3).unwrap().is_empty());
}

#[test]
fn test_ragged_rows_rejected() {
    let rows = vec![vec![1.0, 2.0], vec![3.0]];
    let err = OutlierDetector::default()
        .detect_per_dimension(&rows)
        .unwrap_err();
    assert_eq!(
        err,
        OutlierError::RaggedRows {
            row: 1,
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn test_filter_scores_reports_removed_ids() {
    let mut scores = BTreeMap::new();
    for i in 0..19 {
        scores.insert(format!("p{i:02}"), 5.0);
    }
    scores.insert("zz".to_string(), 50.0);
    let (kept, removed, result) = OutlierDetector::default().filter_scores(&scores);
    assert_eq!(removed, vec!["zz".to_string()]);
    assert_eq!(kept.len(), 19);
    assert!(!kept.contains_key("zz"));
    assert_eq!(result.indices, vec![19]);
}
