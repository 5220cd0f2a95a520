use std::collections::BTreeMap;

use crate::analysis::ranking::{Criterion, RankingCalculator, RankingResult, combine_evaluations};
use crate::model::person::Person;

#[derive(Debug, Clone)]
pub struct Stage3Inputs<'a> {
    pub evaluations: &'a BTreeMap<String, BTreeMap<String, f64>>,
    pub criteria: &'a [Criterion],
    pub people: &'a BTreeMap<String, Person>,
    /// Criterion whose scores are replaced by `corrected_scores`.
    pub corrected_criterion: &'a str,
    pub corrected_scores: &'a BTreeMap<String, f64>,
}

pub fn run_stage3(inputs: &Stage3Inputs<'_>) -> RankingResult {
    let mut by_criterion = inputs.evaluations.clone();
    by_criterion.insert(
        inputs.corrected_criterion.to_string(),
        inputs.corrected_scores.clone(),
    );
    let per_person = combine_evaluations(&by_criterion);
    RankingCalculator.rank(&per_person, inputs.criteria, Some(inputs.people))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_rank.rs"]
mod tests;
