pub mod agents;
pub mod config;
pub mod core;
pub mod domain;
pub mod llm;
pub mod parser;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use config::prompts::PromptSet;
pub use core::{engine::ProposalEngine, pipeline::ProposalPipeline};
pub use llm::ChatClient;
pub use utils::error::{ProposalError, Result};
