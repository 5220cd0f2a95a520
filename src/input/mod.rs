use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::{info, warn};

pub mod dataset;

use crate::analysis::ranking::Criterion;
use crate::model::group::GroupLabel;
use crate::model::person::Person;
use dataset::Dataset;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Validated evaluation data ready for the pipeline.
#[derive(Debug, Clone)]
pub struct InputBundle {
    pub source_path: PathBuf,
    pub people: BTreeMap<String, Person>,
    pub groups: BTreeMap<String, GroupLabel>,
    /// One entry per evaluated criterion, in evaluation-key order.
    pub criteria: Vec<Criterion>,
    /// `{criterion: {person_id: score}}`
    pub evaluations: BTreeMap<String, BTreeMap<String, f64>>,
}

impl InputBundle {
    pub fn criterion_scores(&self, criterion: &str) -> Option<&BTreeMap<String, f64>> {
        self.evaluations.get(criterion)
    }

    pub fn default_criterion(&self) -> Option<&str> {
        self.evaluations.keys().next().map(String::as_str)
    }
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(path.display().to_string()));
    }
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn load_input(path: &Path) -> Result<InputBundle, InputError> {
    let reader = open_maybe_gz(path)?;
    let dataset: Dataset = serde_json::from_reader(reader)?;
    info!(
        path = %path.display(),
        people = dataset.people.len(),
        criteria = dataset.evaluations.len(),
        "loaded dataset"
    );
    build_bundle(dataset, path)
}

pub fn build_bundle(dataset: Dataset, source_path: &Path) -> Result<InputBundle, InputError> {
    let mut people = BTreeMap::new();
    for person in dataset.people {
        if person.id.trim().is_empty() {
            warn!("person with empty id; skipping");
            continue;
        }
        if people.contains_key(&person.id) {
            warn!(id = %person.id, "duplicate person id; keeping first");
            continue;
        }
        people.insert(person.id.clone(), person);
    }
    let groups = people
        .iter()
        .map(|(id, p)| (id.clone(), p.gender))
        .collect::<BTreeMap<_, _>>();

    for (criterion, scores) in &dataset.evaluations {
        for (id, &score) in scores {
            if !score.is_finite() {
                return Err(InputError::InvalidInput(format!(
                    "non-finite score for {id} in criterion {criterion}"
                )));
            }
            if !(0.0..=10.0).contains(&score) {
                warn!(%id, %criterion, score, "score outside the [0, 10] domain");
            }
        }
        let unknown = scores.keys().filter(|id| !people.contains_key(*id)).count();
        if unknown > 0 {
            warn!(
                %criterion,
                unknown,
                "scores for people missing from the roster; they are treated as unspecified"
            );
        }
    }

    let criteria = resolve_criteria(&dataset.criteria, &dataset.evaluations)?;

    Ok(InputBundle {
        source_path: source_path.to_path_buf(),
        people,
        groups,
        criteria,
        evaluations: dataset.evaluations,
    })
}

fn resolve_criteria(
    declared: &[Criterion],
    evaluations: &BTreeMap<String, BTreeMap<String, f64>>,
) -> Result<Vec<Criterion>, InputError> {
    for criterion in declared {
        criterion
            .validate()
            .map_err(|e| InputError::InvalidInput(e.to_string()))?;
        if !evaluations.contains_key(&criterion.name) {
            warn!(criterion = %criterion.name, "declared criterion has no evaluations");
        }
    }
    Ok(evaluations
        .keys()
        .map(|name| {
            declared
                .iter()
                .find(|c| &c.name == name)
                .cloned()
                .unwrap_or_else(|| Criterion {
                    name: name.clone(),
                    weight: 1.0,
                    description: String::new(),
                })
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
