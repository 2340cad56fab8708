use serde::{Deserialize, Serialize};

/// A heading-delimited slice of the RFP. `title` is `None` for preamble text
/// that appears before the first heading, and for documents without headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfpSection {
    pub title: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfpDocument {
    pub file_name: String,
    pub full_text: String,
    pub sections: Vec<RfpSection>,
}

impl RfpDocument {
    pub fn char_count(&self) -> usize {
        self.full_text.chars().count()
    }
}

/// Structured review extracted from the RFP by the review agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RfpReview {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_requirements: Vec<String>,
    #[serde(default)]
    pub evaluation_criteria: Vec<String>,
}

impl RfpReview {
    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty() && self.key_requirements.is_empty()
    }
}

/// The four core technical sections produced by the writer agent in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalContent {
    pub understanding_requirements: String,
    pub solution_overview: String,
    pub architecture_description: String,
    pub architecture_mermaid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OemReview {
    #[serde(default)]
    pub oem_product_name: String,
    #[serde(default)]
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub rfp_reference: String,
    pub technology: String,
    pub review: RfpReview,
    pub content: TechnicalContent,
    pub oem_reviews: Vec<OemReview>,
}

impl Proposal {
    /// Main sections plus one per OEM review.
    pub fn section_count(&self) -> usize {
        3 + self.oem_reviews.len()
    }
}
