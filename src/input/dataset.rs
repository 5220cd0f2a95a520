use std::collections::BTreeMap;

use serde::Deserialize;

use crate::analysis::ranking::Criterion;
use crate::model::person::Person;

/// On-disk dataset layout (JSON).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub evaluations: BTreeMap<String, BTreeMap<String, f64>>,
}
