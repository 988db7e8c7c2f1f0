use serde::{Deserialize, Serialize};

/// Placeholder shown when a club row carries no usable description.
pub const NO_DESCRIPTION: &str = "(No description)";

/// One club in a search result. Unique by `(name, contact)` within a result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub name: String,
    pub contact: String,
    pub description: String,
    /// Empty when the row has no email.
    pub email: String,
}
