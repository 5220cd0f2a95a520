use super::*;

fn evals(rows: &[(&str, &[(&str, f64)])]) -> BTreeMap<String, BTreeMap<String, f64>> {
    rows.iter()
        .map(|(id, scores)| {
            (
                id.to_string(),
                scores
                    .iter()
                    .map(|(c, s)| (c.to_string(), *s))
                    .collect::<BTreeMap<_, _>>(),
            )
        })
        .collect()
}

fn person(id: &str, name: &str, gender: GroupLabel) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        gender,
        role: "Analyst".to_string(),
        level: "senior".to_string(),
        department: "Finance".to_string(),
    }
}

#[test]
fn test_criterion_weight_validation() {
    assert!(Criterion::new("okr", 1.0, "").is_ok());
    assert!(Criterion::new("okr", 0.0, "").is_ok());
    assert_eq!(
        Criterion::new("okr", 1.2, "").unwrap_err(),
        RankingError::InvalidWeight {
            name: "okr".to_string(),
            weight: 1.2
        }
    );
}

#[test]
fn test_final_score_is_weighted_sum() {
    let criteria = vec![Criterion::new("perf", 0.5, "").unwrap()];
    let scores = evals(&[("p1", &[("perf", 8.0), ("potential", 6.0)])]);
    let out = RankingCalculator.final_score("p1", &scores["p1"], &criteria);
    // unknown criterion weighs 1.0
    assert!((out.final_score - 10.0).abs() < 1e-12);
    assert_eq!(out.position, 0);
}

#[test]
fn test_rank_orders_descending_with_id_tiebreak() {
    let criteria = vec![Criterion::new("perf", 1.0, "").unwrap()];
    let evaluations = evals(&[
        ("b", &[("perf", 7.0)]),
        ("a", &[("perf", 7.0)]),
        ("c", &[("perf", 9.0)]),
    ]);
    let ranking = RankingCalculator.rank(&evaluations, &criteria, None);
    let order: Vec<&str> = ranking.scores.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);
    let positions: Vec<usize> = ranking.scores.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
    assert_eq!(ranking.meta.total_people, 3);
    assert_eq!(ranking.meta.total_criteria, 1);
    assert_eq!(ranking.meta.max_score, 9.0);
    assert_eq!(ranking.meta.min_score, 7.0);
    assert!((ranking.meta.mean_score - 23.0 / 3.0).abs() < 1e-12);
    assert_eq!(ranking.top_n(2).len(), 2);
    assert_eq!(ranking.top_n(10).len(), 3);
    assert_eq!(ranking.get("a").map(|s| s.position), Some(2));
    assert!(ranking.get("zzz").is_none());
}

#[test]
fn test_rank_enriches_people_and_counts_groups() {
    let evaluations = evals(&[("p1", &[("perf", 9.0)]), ("p2", &[("perf", 8.0)]), ("p3", &[("perf", 1.0)])]);
    let mut people = BTreeMap::new();
    people.insert("p1".to_string(), person("p1", "Ana", GroupLabel::Female));
    people.insert("p2".to_string(), person("p2", "Bruno", GroupLabel::Male));
    let ranking = RankingCalculator.rank(&evaluations, &[], Some(&people));

    assert_eq!(ranking.scores[0].name.as_deref(), Some("Ana"));
    assert_eq!(ranking.scores[0].group, Some(GroupLabel::Female));
    assert_eq!(ranking.scores[2].group, None);

    let dist = ranking.group_distribution(3);
    assert_eq!(dist[&GroupLabel::Female], 1);
    assert_eq!(dist[&GroupLabel::Male], 1);
    assert_eq!(dist[&GroupLabel::Unspecified], 1);
}

#[test]
fn test_rank_empty() {
    let ranking = RankingCalculator.rank(&BTreeMap::new(), &[], None);
    assert!(ranking.scores.is_empty());
    assert_eq!(ranking.meta, RankingMeta::default());
}

#[test]
fn test_combine_evaluations_pivots() {
    let mut by_criterion = BTreeMap::new();
    by_criterion.insert(
        "perf".to_string(),
        BTreeMap::from([("p1".to_string(), 7.0), ("p2".to_string(), 6.0)]),
    );
    by_criterion.insert(
        "potential".to_string(),
        BTreeMap::from([("p1".to_string(), 8.0)]),
    );
    let combined = combine_evaluations(&by_criterion);
    assert_eq!(combined.len(), 2);
    assert_eq!(combined["p1"].len(), 2);
    assert_eq!(combined["p2"]["perf"], 6.0);
}
