use serde::{Deserialize, Serialize};

use crate::model::group::GroupLabel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "unspecified", deserialize_with = "de_group")]
    pub gender: GroupLabel,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub department: String,
}

fn unspecified() -> GroupLabel {
    GroupLabel::Unspecified
}

fn de_group<'de, D>(deserializer: D) -> Result<GroupLabel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(GroupLabel::parse_lenient)
        .unwrap_or(GroupLabel::Unspecified))
}
