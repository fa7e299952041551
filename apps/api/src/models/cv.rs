use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Structured CV record produced by the extraction pipeline.
///
/// Append-only while the builder assembles it; immutable once returned.
/// Education and experience keep first-occurrence order; skills and
/// languages are case-normalized sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvRecord {
    pub email: Option<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub skills: BTreeSet<String>,
    pub languages: BTreeSet<String>,
}

impl CvRecord {
    /// The text handed to the embedding service: skills, experience,
    /// education, and languages joined into one string.
    pub fn embedding_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        parts.extend(self.skills.iter().map(String::as_str));
        parts.extend(self.experience.iter().map(String::as_str));
        parts.extend(self.education.iter().map(String::as_str));
        parts.extend(self.languages.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// A CV record plus its embedding vector, as stored in the search index.
/// The vector is attached once at indexing time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvDocument {
    #[serde(flatten)]
    pub record: CvRecord,
    pub cv_vector: Vec<f32>,
}
