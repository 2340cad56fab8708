use crate::agents::{format_proposal, is_oem_technology, RfpReviewer, TechnicalWriter};
use crate::config::prompts::PromptSet;
use crate::core::{ConfigProvider, Pipeline, Proposal, RfpDocument, RfpReview, Storage};
use crate::llm::ChatClient;
use crate::parser::RfpParser;
use crate::utils::error::Result;

/// The single linear pipeline: parse the RFP, run the LLM agents, render and
/// deliver the Markdown proposal.
pub struct ProposalPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: ChatClient,
    prompts: PromptSet,
}

impl<S: Storage, C: ConfigProvider> ProposalPipeline<S, C> {
    pub fn new(storage: S, config: C, client: ChatClient, prompts: PromptSet) -> Self {
        Self {
            storage,
            config,
            client,
            prompts,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ProposalPipeline<S, C> {
    async fn extract(&self) -> Result<RfpDocument> {
        let parser = RfpParser::new(self.config.rfp_file())?;

        tracing::debug!("📥 Reading RFP file: {}", self.config.rfp_file());
        let data = self.storage.read_file(self.config.rfp_file()).await?;
        let document = parser.parse(&data)?;

        tracing::info!(
            "📥 Parsed '{}': {} characters, {} sections",
            document.file_name,
            document.char_count(),
            document.sections.len()
        );
        Ok(document)
    }

    async fn transform(&self, document: RfpDocument) -> Result<Proposal> {
        let technology = self.config.technology();

        // 審查失敗不中斷流程，沿用空審查繼續產生提案
        let reviewer = RfpReviewer::new(&self.client, &self.prompts);
        let review = match reviewer.review(&document).await {
            Ok(review) => review,
            Err(e) => {
                tracing::warn!("🔶 RFP review failed, continuing without it: {}", e);
                RfpReview::default()
            }
        };

        if review.is_empty() {
            tracing::warn!(
                "🔶 RFP review yielded no summary or key requirements, proposal quality may be affected"
            );
        } else {
            tracing::info!(
                "🧠 RFP review complete: {} requirements, {} evaluation criteria",
                review.key_requirements.len(),
                review.evaluation_criteria.len()
            );
        }

        let writer = TechnicalWriter::new(&self.client, &self.prompts);
        let content = writer
            .generate_content(&document, &review, technology)
            .await?;
        tracing::info!("✍️ Core technical content generated");

        let mut oem_reviews = Vec::new();
        if is_oem_technology(technology) {
            tracing::info!(
                "📡 '{}' looks like an OEM product, generating a product review",
                technology
            );
            match writer.generate_oem_review(technology, &review).await {
                Ok(oem_review) => oem_reviews.push(oem_review),
                Err(e) => {
                    tracing::warn!("🔶 OEM review failed, skipping the section: {}", e);
                }
            }
        }

        Ok(Proposal {
            rfp_reference: document.file_name,
            technology: technology.to_string(),
            review,
            content,
            oem_reviews,
        })
    }

    async fn load(&self, proposal: Proposal) -> Result<String> {
        let markdown = format_proposal(&proposal);

        match self.config.output_file() {
            Some(output_file) => {
                tracing::debug!(
                    "💾 Writing proposal ({} bytes) to: {}",
                    markdown.len(),
                    output_file
                );
                self.storage
                    .write_file(output_file, markdown.as_bytes())
                    .await?;
                tracing::info!("💾 Proposal saved to: {}", output_file);
                Ok(output_file.to_string())
            }
            None => {
                println!("\n--- GENERATED PROPOSAL ---");
                println!("{}", markdown);
                println!("--- END OF PROPOSAL ---");
                println!("Proposal generated. To save to a file, use the --output-file option.");
                Ok("stdout".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ProposalError;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ProposalError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        rfp_file: String,
        technology: String,
        output_file: Option<String>,
    }

    impl MockConfig {
        fn new(technology: &str) -> Self {
            Self {
                rfp_file: "rfp.md".to_string(),
                technology: technology.to_string(),
                output_file: Some("proposal.md".to_string()),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn rfp_file(&self) -> &str {
            &self.rfp_file
        }

        fn technology(&self) -> &str {
            &self.technology
        }

        fn output_file(&self) -> Option<&str> {
            self.output_file.as_deref()
        }
    }

    const SAMPLE_RFP: &str = "# Sample RFP\n\n## Requirements\n\n- Must be web-based.\n- Must support user accounts.\n\n## Evaluation\n\n- Ease of use\n- Scalability\n";

    fn chat_reply(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 10, "total_tokens": 20}
        })
    }

    fn review_reply() -> serde_json::Value {
        chat_reply(
            &serde_json::json!({
                "summary": "A web-based task management system.",
                "key_requirements": ["Web-based", "User accounts"],
                "evaluation_criteria": ["Ease of use", "Scalability"]
            })
            .to_string(),
        )
    }

    fn content_reply() -> serde_json::Value {
        chat_reply(
            &serde_json::json!({
                "understanding_requirements": "The client needs a web-based task system.",
                "solution_overview": "We propose a hosted web application.",
                "architecture_description": "A classic three-tier layout.",
                "architecture_mermaid": "graph TD;\n    A[Browser] --> B[API];\n    B --> C[Database];"
            })
            .to_string(),
        )
    }

    fn pipeline_with(
        server: &MockServer,
        storage: MockStorage,
        technology: &str,
    ) -> ProposalPipeline<MockStorage, MockConfig> {
        let config = MockConfig::new(technology);
        let client = ChatClient::new(&server.url(""), "test-key", "gpt-3.5-turbo", 30);
        ProposalPipeline::new(storage, config, client, PromptSet::default())
    }

    #[tokio::test]
    async fn test_extract_markdown_document() {
        let server = MockServer::start();
        let storage = MockStorage::new();
        storage.put_file("rfp.md", SAMPLE_RFP.as_bytes()).await;

        let pipeline = pipeline_with(&server, storage, "Rust");
        let document = pipeline.extract().await.unwrap();

        assert_eq!(document.file_name, "rfp.md");
        assert!(document.full_text.contains("web-based"));
        assert_eq!(document.sections.len(), 3);
    }

    #[tokio::test]
    async fn test_extract_missing_file_fails() {
        let server = MockServer::start();
        let pipeline = pipeline_with(&server, MockStorage::new(), "Rust");

        let result = pipeline.extract().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_transform_generic_technology_makes_two_calls() {
        let server = MockServer::start();
        let review_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("evaluation_criteria");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(review_reply());
        });
        let content_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("architecture_mermaid");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(content_reply());
        });

        let storage = MockStorage::new();
        storage.put_file("rfp.md", SAMPLE_RFP.as_bytes()).await;
        let pipeline = pipeline_with(&server, storage, "Rust with Axum");

        let document = pipeline.extract().await.unwrap();
        let proposal = pipeline.transform(document).await.unwrap();

        review_mock.assert();
        content_mock.assert();
        assert_eq!(proposal.technology, "Rust with Axum");
        assert_eq!(proposal.review.key_requirements.len(), 2);
        assert!(proposal.oem_reviews.is_empty());
        assert_eq!(proposal.section_count(), 3);
    }

    #[tokio::test]
    async fn test_transform_oem_technology_adds_product_review() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("evaluation_criteria");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(review_reply());
        });
        server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("architecture_mermaid");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(content_reply());
        });
        let oem_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("oem_product_name");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(chat_reply(
                    &serde_json::json!({
                        "oem_product_name": "OutSystems Platform",
                        "title": "Overview: OutSystems Platform",
                        "content": "OutSystems is a low-code platform."
                    })
                    .to_string(),
                ));
        });

        let storage = MockStorage::new();
        storage.put_file("rfp.md", SAMPLE_RFP.as_bytes()).await;
        let pipeline = pipeline_with(&server, storage, "OutSystems Platform");

        let document = pipeline.extract().await.unwrap();
        let proposal = pipeline.transform(document).await.unwrap();

        oem_mock.assert();
        assert_eq!(proposal.oem_reviews.len(), 1);
        assert_eq!(proposal.section_count(), 4);
    }

    #[tokio::test]
    async fn test_transform_continues_when_review_fails() {
        let server = MockServer::start();
        let review_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("evaluation_criteria");
            then.status(500).body("server error");
        });
        let content_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("architecture_mermaid");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(content_reply());
        });

        let storage = MockStorage::new();
        storage.put_file("rfp.md", SAMPLE_RFP.as_bytes()).await;
        let pipeline = pipeline_with(&server, storage, "Rust");

        let document = pipeline.extract().await.unwrap();
        let proposal = pipeline.transform(document).await.unwrap();

        review_mock.assert();
        content_mock.assert();
        assert!(proposal.review.summary.is_empty());
        assert!(proposal.review.key_requirements.is_empty());
    }

    #[tokio::test]
    async fn test_transform_fails_when_content_generation_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("evaluation_criteria");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(review_reply());
        });
        server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("architecture_mermaid");
            then.status(500).body("server error");
        });

        let storage = MockStorage::new();
        storage.put_file("rfp.md", SAMPLE_RFP.as_bytes()).await;
        let pipeline = pipeline_with(&server, storage, "Rust");

        let document = pipeline.extract().await.unwrap();
        let result = pipeline.transform(document).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_writes_markdown_to_storage() {
        let server = MockServer::start();
        let storage = MockStorage::new();
        let pipeline = pipeline_with(&server, storage.clone(), "Rust");

        let proposal = Proposal {
            rfp_reference: "rfp.md".to_string(),
            technology: "Rust".to_string(),
            review: RfpReview::default(),
            content: crate::domain::model::TechnicalContent {
                understanding_requirements: "Understanding.".to_string(),
                solution_overview: "Overview.".to_string(),
                architecture_description: "Architecture.".to_string(),
                architecture_mermaid: "graph TD;\n    A --> B;".to_string(),
            },
            oem_reviews: vec![],
        };

        let destination = pipeline.load(proposal).await.unwrap();
        assert_eq!(destination, "proposal.md");

        let written = storage.get_file("proposal.md").await.unwrap();
        let markdown = String::from_utf8(written).unwrap();
        assert!(markdown.contains("# Understanding of Requirements"));
        assert!(markdown.contains("```mermaid"));
    }
}
