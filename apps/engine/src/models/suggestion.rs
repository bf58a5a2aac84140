use std::fmt;

use serde::{Deserialize, Serialize};

/// Edit kind carried by a suggestion. Wire key is `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Modify,
    Add,
    Remove,
}

impl fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SuggestionType::Modify => "modify",
            SuggestionType::Add => "add",
            SuggestionType::Remove => "remove",
        })
    }
}

/// Review disposition of a single suggestion. Fresh suggestions are pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CVSection {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl CVSection {
    /// Canonical display order used when grouping suggestions for review.
    pub const ALL: [CVSection; 7] = [
        CVSection::Contact,
        CVSection::Summary,
        CVSection::Experience,
        CVSection::Education,
        CVSection::Skills,
        CVSection::Projects,
        CVSection::Certifications,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CVSection::Contact => "Contact Information",
            CVSection::Summary => "Professional Summary",
            CVSection::Experience => "Work Experience",
            CVSection::Education => "Education",
            CVSection::Skills => "Skills",
            CVSection::Projects => "Projects",
            CVSection::Certifications => "Certifications",
        }
    }
}

/// One fine-grained edit proposed against a parsed CV.
///
/// `target` is a dot-separated path produced by the generation model. It is
/// untrusted input: resolution happens at apply time and may fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    pub section: CVSection,
    pub target: String,
    pub target_label: String,
    /// Text being replaced, if any. Never checked against the document.
    #[serde(default)]
    pub original: Option<String>,
    pub suggested: String,
    pub reasoning: String,
    pub confidence: f32,
    #[serde(default)]
    pub status: SuggestionStatus,
}
