pub mod cli;
pub mod prompts;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "rfp-proposal-gen"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Generates a technical proposal draft from an RFP document using an LLM")
)]
pub struct CliConfig {
    /// Path to the RFP file (PDF or Markdown)
    #[cfg_attr(feature = "cli", arg(short = 'f', long))]
    pub rfp_file: String,

    /// The core technology to be featured in the proposal (e.g. "Rust with Axum")
    #[cfg_attr(feature = "cli", arg(short = 't', long))]
    pub technology: String,

    /// Path to save the generated Markdown proposal; prints to stdout when omitted
    #[cfg_attr(feature = "cli", arg(short = 'o', long))]
    pub output_file: Option<String>,

    /// LLM API key; falls back to OPENAI_API_KEY from the environment or .env
    #[cfg_attr(feature = "cli", arg(short = 'k', long))]
    pub api_key: Option<String>,

    /// The chat model to use
    #[cfg_attr(feature = "cli", arg(short = 'm', long, default_value = "gpt-3.5-turbo"))]
    pub model: String,

    /// Base URL of the chat-completions API
    #[cfg_attr(feature = "cli", arg(long, default_value = "https://api.openai.com/v1"))]
    pub api_base: String,

    /// TOML file overriding the built-in prompt templates
    #[cfg_attr(feature = "cli", arg(long))]
    pub prompts_file: Option<String>,

    /// Per-request timeout in seconds
    #[cfg_attr(feature = "cli", arg(long, default_value = "60"))]
    pub request_timeout: u64,

    /// Enable verbose output
    #[cfg_attr(feature = "cli", arg(long))]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
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

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("rfp_file", &self.rfp_file)?;
        validation::validate_file_extensions(
            "rfp_file",
            std::slice::from_ref(&self.rfp_file),
            &["md", "markdown", "pdf"],
        )?;
        validation::validate_non_empty_string("technology", &self.technology)?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_url("api_base", &self.api_base)?;
        validation::validate_range("request_timeout", self.request_timeout, 1, 600)?;
        if let Some(output_file) = &self.output_file {
            validation::validate_path("output_file", output_file)?;
        }
        Ok(())
    }
}
