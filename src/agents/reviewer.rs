use crate::agents::truncate_to_chars;
use crate::config::prompts::{render_template, PromptSet};
use crate::domain::model::{RfpDocument, RfpReview};
use crate::llm::{strip_code_fence, ChatClient};
use crate::utils::error::{ProposalError, Result};

const AGENT_NAME: &str = "RFP reviewer";

// Context-size cap for the review prompt.
const MAX_REVIEW_CHARS: usize = 15_000;

/// Extracts a structured review (summary, key requirements, evaluation
/// criteria) from the RFP text.
pub struct RfpReviewer<'a> {
    client: &'a ChatClient,
    prompts: &'a PromptSet,
}

impl<'a> RfpReviewer<'a> {
    pub fn new(client: &'a ChatClient, prompts: &'a PromptSet) -> Self {
        Self { client, prompts }
    }

    pub async fn review(&self, document: &RfpDocument) -> Result<RfpReview> {
        if document.full_text.trim().is_empty() {
            return Err(ProposalError::ParseError {
                message: "RFP document text is empty, nothing to review".to_string(),
            });
        }

        let rfp_text = truncate_to_chars(&document.full_text, MAX_REVIEW_CHARS);
        let prompt = render_template(&self.prompts.rfp_review, &[("rfp_text", rfp_text)])?;

        let reply = self.client.complete(AGENT_NAME, &prompt).await?;
        let review: RfpReview =
            serde_json::from_str(strip_code_fence(&reply)).map_err(|e| ProposalError::LlmError {
                agent: AGENT_NAME.to_string(),
                message: format!("structured review could not be parsed: {}", e),
            })?;

        tracing::debug!(
            "🧠 {}: extracted {} requirements and {} evaluation criteria",
            AGENT_NAME,
            review.key_requirements.len(),
            review.evaluation_criteria.len()
        );

        Ok(review)
    }
}
