//! Request and response bodies for `POST /save_paper`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of a save request: `{"paper_id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Identifier of the paper to save, sent exactly as entered.
    pub paper_id: String,
}

impl SaveRequest {
    /// Create a save request.
    #[must_use]
    pub fn new(paper_id: impl Into<String>) -> Self {
        Self { paper_id: paper_id.into() }
    }
}

/// Answer to a save request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveResponse {
    /// Whether the paper was stored. A missing flag counts as failure.
    ///
    /// Any JSON value is accepted and read by truthiness, so `1` or `"yes"`
    /// count as success while `0`, `""` and `null` do not.
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,

    /// Human-readable failure reason.
    #[serde(default)]
    pub message: Option<String>,

    /// The stored record, echoed back on success.
    #[serde(default)]
    pub paper: Option<SavedPaper>,
}

impl SaveResponse {
    /// Server message, if present and non-empty.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Paper record as persisted by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPaper {
    /// Canonical paper id (an abstract-page URL).
    pub id: String,

    /// Paper title.
    #[serde(default)]
    pub title: String,

    /// Paper abstract.
    #[serde(default)]
    pub r#abstract: Option<String>,

    /// Last-updated timestamp (ISO 8601).
    #[serde(default)]
    pub updated: Option<String>,

    /// PDF URL.
    #[serde(default)]
    pub url: Option<String>,
}
