//! Parsing the collaborator's response.

use serde::{Deserialize, Serialize};

/// The title a degraded response falls back to.
pub const FALLBACK_TITLE: &str = "new plot";

/// A successful generation result.
///
/// The wire shape uses camelCase names; `timeHint` and `placeHint` are
/// optional in the contract and default to empty here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlot {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub time_hint: String,
    #[serde(default)]
    pub place_hint: String,
}

impl GeneratedPlot {
    /// Parse a raw response payload.
    ///
    /// A payload that does not match the contract is not an error: it
    /// degrades to a fallback plot titled [`FALLBACK_TITLE`] whose content
    /// is the raw text, so the writer never loses what came back.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(plot) => plot,
            Err(_) => Self {
                title: FALLBACK_TITLE.to_string(),
                content: raw.to_string(),
                time_hint: String::new(),
                place_hint: String::new(),
            },
        }
    }
}
