use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cohort an evaluated person belongs to.
///
/// Only [`GROUP_A`] and [`GROUP_B`] take part in pairwise comparison; `Other`
/// and `Unspecified` are carried through untouched and never enter the
/// statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupLabel {
    Female,
    Male,
    Other,
    Unspecified,
}

/// Disadvantaged cohort; the only one whose scores are ever rescaled.
pub const GROUP_A: GroupLabel = GroupLabel::Female;
/// Baseline cohort; adjustment weight is always 1.0.
pub const GROUP_B: GroupLabel = GroupLabel::Male;

impl GroupLabel {
    pub fn is_compared(self) -> bool {
        matches!(self, GroupLabel::Female | GroupLabel::Male)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GroupLabel::Female => "female",
            GroupLabel::Male => "male",
            GroupLabel::Other => "other",
            GroupLabel::Unspecified => "unspecified",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            GroupLabel::Female => "Female",
            GroupLabel::Male => "Male",
            GroupLabel::Other => "Other",
            GroupLabel::Unspecified => "Unspecified",
        }
    }

    /// Lenient parse used for free-text dataset fields. Unknown labels fall
    /// back to `Unspecified` so they are excluded rather than rejected.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or(GroupLabel::Unspecified)
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown group label: {0}")]
pub struct ParseGroupError(pub String);

impl FromStr for GroupLabel {
    type Err = ParseGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "female" | "f" | "woman" | "feminino" => Ok(GroupLabel::Female),
            "male" | "m" | "man" | "masculino" => Ok(GroupLabel::Male),
            "other" | "o" | "outro" => Ok(GroupLabel::Other),
            "unspecified" | "" | "n/a" | "não informado" | "nao informado" => {
                Ok(GroupLabel::Unspecified)
            }
            _ => Err(ParseGroupError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/group.rs"]
mod tests;
