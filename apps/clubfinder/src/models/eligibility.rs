use std::fmt;

use serde::{Deserialize, Serialize};

/// Restriction marker on a club row, and the code derived from the user's gender answer.
///
/// Serialized as the catalog's marker strings: `*`, `**`, `***`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EligibilityCode {
    #[serde(rename = "*")]
    Other,
    #[serde(rename = "**")]
    GroupB,
    #[serde(rename = "***")]
    GroupA,
}

impl EligibilityCode {
    pub const ALL: [EligibilityCode; 3] = [
        EligibilityCode::Other,
        EligibilityCode::GroupB,
        EligibilityCode::GroupA,
    ];

    /// Total mapping from a raw gender answer. Anything unrecognized is `Other`.
    pub fn from_answer(answer: &str) -> Self {
        match answer {
            "Male" => EligibilityCode::GroupA,
            "Female" => EligibilityCode::GroupB,
            _ => EligibilityCode::Other,
        }
    }

    /// Parses a catalog marker. Only the three exact marker strings are codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "*" => Some(EligibilityCode::Other),
            "**" => Some(EligibilityCode::GroupB),
            "***" => Some(EligibilityCode::GroupA),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            EligibilityCode::Other => "*",
            EligibilityCode::GroupB => "**",
            EligibilityCode::GroupA => "***",
        }
    }
}

impl fmt::Display for EligibilityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}
