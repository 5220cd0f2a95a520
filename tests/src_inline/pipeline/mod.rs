use std::collections::BTreeMap;

use super::*;
use crate::input::build_bundle;
use crate::input::dataset::Dataset;
use crate::model::group::GroupLabel;
use crate::model::person::Person;

fn person(id: &str, gender: GroupLabel) -> Person {
    Person {
        id: id.to_string(),
        name: id.to_uppercase(),
        gender,
        role: String::new(),
        level: String::new(),
        department: String::new(),
    }
}

fn bundle() -> InputBundle {
    let dataset = Dataset {
        people: vec![
            person("f1", GroupLabel::Female),
            person("f2", GroupLabel::Female),
            person("m1", GroupLabel::Male),
            person("m2", GroupLabel::Male),
        ],
        criteria: Vec::new(),
        evaluations: BTreeMap::from([
            (
                "performance".to_string(),
                BTreeMap::from([
                    ("f1".to_string(), 6.0),
                    ("f2".to_string(), 7.0),
                    ("m1".to_string(), 7.0),
                    ("m2".to_string(), 8.0),
                ]),
            ),
            (
                "potential".to_string(),
                BTreeMap::from([("f1".to_string(), 7.0), ("m1".to_string(), 7.0)]),
            ),
        ]),
    };
    build_bundle(dataset, Path::new("mem")).unwrap()
}

fn config(criterion: Option<&str>) -> PipelineConfig {
    PipelineConfig {
        thresholds: BiasThresholds::default_v1(),
        criterion: criterion.map(str::to_string),
        analysis_only: false,
        drop_outliers: false,
    }
}

#[test]
fn test_pipeline_defaults_to_first_criterion() {
    let out = run_pipeline(&bundle(), &config(None)).unwrap();
    assert_eq!(out.criterion, "performance");
    assert!(out.bias.correction.was_applied());
    assert_eq!(out.ranking.scores.len(), 4);
    // f2: 7.0 * 7.5 / 6.5 rounded, plus potential missing
    assert_eq!(out.ranking.get("f2").unwrap().final_score, 8.08);
}

#[test]
fn test_pipeline_unknown_criterion() {
    let err = run_pipeline(&bundle(), &config(Some("okr"))).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownCriterion { .. }));
    assert!(err.to_string().contains("performance, potential"));
}

#[test]
fn test_pipeline_no_evaluations() {
    let empty = build_bundle(Dataset::default(), Path::new("mem")).unwrap();
    let err = run_pipeline(&empty, &config(None)).unwrap_err();
    assert!(matches!(err, PipelineError::NoEvaluations));
}

#[test]
fn test_pipeline_writes_reports() {
    let bundle = bundle();
    let cfg = config(Some("performance"));
    let out = run_pipeline(&bundle, &cfg).unwrap();
    let dir = std::env::temp_dir().join(format!("hr_biasqc_pipeline_test_{}", std::process::id()));
    write_pipeline_reports(&bundle, &cfg, &out, &dir).unwrap();
    assert!(dir.join("summary.json").exists());
    assert!(dir.join("report.txt").exists());
}
