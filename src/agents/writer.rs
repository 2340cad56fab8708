use crate::agents::{bullet_list, truncate_to_chars};
use crate::config::prompts::{render_template, PromptSet};
use crate::domain::model::{OemReview, RfpDocument, RfpReview, TechnicalContent};
use crate::llm::{strip_code_fence, ChatClient};
use crate::utils::error::{ProposalError, Result};

const AGENT_NAME: &str = "technical writer";
const OEM_AGENT_NAME: &str = "OEM reviewer";

// The writer prompt carries review output alongside the raw text, so less
// raw text fits than in the review prompt.
const MAX_RFP_TEXT_CHARS: usize = 10_000;
const TRUNCATION_MARKER: &str = "\n... [RFP text truncated for brevity]";

/// Generates the core technical sections of the proposal, and an optional
/// product review when the chosen technology is an OEM platform.
pub struct TechnicalWriter<'a> {
    client: &'a ChatClient,
    prompts: &'a PromptSet,
}

impl<'a> TechnicalWriter<'a> {
    pub fn new(client: &'a ChatClient, prompts: &'a PromptSet) -> Self {
        Self { client, prompts }
    }

    pub async fn generate_content(
        &self,
        document: &RfpDocument,
        review: &RfpReview,
        technology: &str,
    ) -> Result<TechnicalContent> {
        if technology.trim().is_empty() {
            return Err(ProposalError::InvalidConfigValueError {
                field: "technology".to_string(),
                value: technology.to_string(),
                reason: "A chosen technology must be specified".to_string(),
            });
        }

        let mut rfp_text = truncate_to_chars(&document.full_text, MAX_RFP_TEXT_CHARS).to_string();
        if rfp_text.len() < document.full_text.len() {
            rfp_text.push_str(TRUNCATION_MARKER);
        }

        let summary = if review.summary.trim().is_empty() {
            "No summary provided."
        } else {
            review.summary.as_str()
        };
        let requirements = bullet_list(&review.key_requirements);
        let criteria = bullet_list(&review.evaluation_criteria);

        let prompt = render_template(
            &self.prompts.technical_content,
            &[
                ("technology", technology),
                ("rfp_text", &rfp_text),
                ("summary", summary),
                ("requirements", &requirements),
                ("criteria", &criteria),
            ],
        )?;

        let reply = self.client.complete(AGENT_NAME, &prompt).await?;
        let content: TechnicalContent =
            serde_json::from_str(strip_code_fence(&reply)).map_err(|e| ProposalError::LlmError {
                agent: AGENT_NAME.to_string(),
                message: format!("structured technical content could not be parsed: {}", e),
            })?;

        Ok(content)
    }

    pub async fn generate_oem_review(
        &self,
        oem_product: &str,
        review: &RfpReview,
    ) -> Result<OemReview> {
        if oem_product.trim().is_empty() {
            return Err(ProposalError::InvalidConfigValueError {
                field: "oem_product".to_string(),
                value: oem_product.to_string(),
                reason: "An OEM product name must be provided".to_string(),
            });
        }

        let summary = if review.summary.trim().is_empty() {
            "Not available."
        } else {
            review.summary.as_str()
        };
        let requirements = bullet_list(&review.key_requirements);

        let prompt = render_template(
            &self.prompts.oem_review,
            &[
                ("oem_product", oem_product),
                ("summary", summary),
                ("requirements", &requirements),
            ],
        )?;

        let reply = self.client.complete(OEM_AGENT_NAME, &prompt).await?;
        let mut oem_review: OemReview =
            serde_json::from_str(strip_code_fence(&reply)).map_err(|e| ProposalError::LlmError {
                agent: OEM_AGENT_NAME.to_string(),
                message: format!("structured OEM review could not be parsed: {}", e),
            })?;

        // The product name is an input, not something the model gets to change.
        oem_review.oem_product_name = oem_product.to_string();
        if oem_review.title.trim().is_empty() || oem_review.title == "OEM Product Overview" {
            oem_review.title = format!("Overview: {}", oem_product);
        }

        Ok(oem_review)
    }
}
