use super::*;
use crate::model::group::GroupLabel;

#[test]
fn test_corrected_scores_replace_criterion() {
    let evaluations = BTreeMap::from([
        (
            "performance".to_string(),
            BTreeMap::from([("a".to_string(), 5.0), ("b".to_string(), 7.0)]),
        ),
        (
            "potential".to_string(),
            BTreeMap::from([("a".to_string(), 6.0), ("b".to_string(), 6.0)]),
        ),
    ]);
    let criteria = vec![
        Criterion::new("performance", 1.0, "").unwrap(),
        Criterion::new("potential", 0.5, "").unwrap(),
    ];
    let people = BTreeMap::from([(
        "a".to_string(),
        Person {
            id: "a".to_string(),
            name: "Ana".to_string(),
            gender: GroupLabel::Female,
            role: String::new(),
            level: String::new(),
            department: String::new(),
        },
    )]);
    let corrected = BTreeMap::from([("a".to_string(), 9.0), ("b".to_string(), 7.0)]);

    let ranking = run_stage3(&Stage3Inputs {
        evaluations: &evaluations,
        criteria: &criteria,
        people: &people,
        corrected_criterion: "performance",
        corrected_scores: &corrected,
    });

    assert_eq!(ranking.scores[0].id, "a");
    assert!((ranking.scores[0].final_score - 12.0).abs() < 1e-12);
    assert!((ranking.scores[1].final_score - 10.0).abs() < 1e-12);
    assert_eq!(ranking.scores[0].group, Some(GroupLabel::Female));
    assert_eq!(ranking.meta.total_criteria, 2);
}
