use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::group::GroupLabel;
use crate::model::person::Person;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RankingError {
    #[error("criterion {name}: weight {weight} outside [0, 1]")]
    InvalidWeight { name: String, weight: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub description: String,
}

fn default_weight() -> f64 {
    1.0
}

impl Criterion {
    pub fn new(name: &str, weight: f64, description: &str) -> Result<Self, RankingError> {
        let criterion = Self {
            name: name.to_string(),
            weight,
            description: description.to_string(),
        };
        criterion.validate()?;
        Ok(criterion)
    }

    pub fn validate(&self) -> Result<(), RankingError> {
        if !(0.0..=1.0).contains(&self.weight) {
            return Err(RankingError::InvalidWeight {
                name: self.name.clone(),
                weight: self.weight,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonScore {
    pub id: String,
    pub scores_by_criterion: BTreeMap<String, f64>,
    pub final_score: f64,
    /// 1-based; 0 until ranked.
    pub position: usize,
    pub name: Option<String>,
    pub group: Option<GroupLabel>,
    pub role: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RankingMeta {
    pub total_people: usize,
    pub total_criteria: usize,
    pub max_score: f64,
    pub min_score: f64,
    pub mean_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingResult {
    pub scores: Vec<PersonScore>,
    pub criteria: Vec<Criterion>,
    pub meta: RankingMeta,
}

impl RankingResult {
    pub fn top_n(&self, n: usize) -> &[PersonScore] {
        &self.scores[..n.min(self.scores.len())]
    }

    pub fn get(&self, id: &str) -> Option<&PersonScore> {
        self.scores.iter().find(|s| s.id == id)
    }

    /// Group counts among the first `n` positions.
    pub fn group_distribution(&self, n: usize) -> BTreeMap<GroupLabel, usize> {
        let mut out = BTreeMap::new();
        for score in self.top_n(n) {
            let group = score.group.unwrap_or(GroupLabel::Unspecified);
            *out.entry(group).or_insert(0) += 1;
        }
        out
    }
}

/// Weighted-sum ranking: `S_i = sum_j(A_ij * W_j)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingCalculator;

impl RankingCalculator {
    pub fn final_score(
        &self,
        id: &str,
        scores_by_criterion: &BTreeMap<String, f64>,
        criteria: &[Criterion],
    ) -> PersonScore {
        let final_score = scores_by_criterion
            .iter()
            .map(|(name, score)| {
                let weight = criteria
                    .iter()
                    .find(|c| &c.name == name)
                    .map(|c| c.weight)
                    .unwrap_or(1.0);
                score * weight
            })
            .sum();

        PersonScore {
            id: id.to_string(),
            scores_by_criterion: scores_by_criterion.clone(),
            final_score,
            position: 0,
            name: None,
            group: None,
            role: None,
            level: None,
        }
    }

    pub fn rank(
        &self,
        evaluations: &BTreeMap<String, BTreeMap<String, f64>>,
        criteria: &[Criterion],
        people: Option<&BTreeMap<String, Person>>,
    ) -> RankingResult {
        let mut scores: Vec<PersonScore> = evaluations
            .iter()
            .map(|(id, by_criterion)| {
                let mut score = self.final_score(id, by_criterion, criteria);
                if let Some(person) = people.and_then(|p| p.get(id)) {
                    score.name = Some(person.name.clone());
                    score.group = Some(person.gender);
                    score.role = Some(person.role.clone());
                    score.level = Some(person.level.clone());
                }
                score
            })
            .collect();

        scores.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        for (i, score) in scores.iter_mut().enumerate() {
            score.position = i + 1;
        }

        let meta = if scores.is_empty() {
            RankingMeta {
                total_criteria: criteria.len(),
                ..RankingMeta::default()
            }
        } else {
            let total: f64 = scores.iter().map(|s| s.final_score).sum();
            RankingMeta {
                total_people: scores.len(),
                total_criteria: criteria.len(),
                max_score: scores[0].final_score,
                min_score: scores[scores.len() - 1].final_score,
                mean_score: total / scores.len() as f64,
            }
        };

        RankingResult {
            scores,
            criteria: criteria.to_vec(),
            meta,
        }
    }
}

/// Pivots `{criterion: {id: score}}` into `{id: {criterion: score}}`.
pub fn combine_evaluations(
    by_criterion: &BTreeMap<String, BTreeMap<String, f64>>,
) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut out: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for (criterion, scores) in by_criterion {
        for (id, &score) in scores {
            out.entry(id.clone())
                .or_default()
                .insert(criterion.clone(), score);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/ranking.rs"]
mod tests;
