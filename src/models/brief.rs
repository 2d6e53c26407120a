//! Creative brief request and response.

use serde::{Deserialize, Serialize};

/// A prospective client's inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefRequest {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub description: String,
}

impl BriefRequest {
    /// Name of the first blank field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("clientName", &self.client_name),
            ("projectType", &self.project_type),
            ("description", &self.description),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Preliminary creative brief produced by the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeBrief {
    pub summary: String,
    pub mood_board_suggestions: Vec<String>,
    pub estimated_timeline: String,
    pub technical_requirements: Vec<String>,
}
