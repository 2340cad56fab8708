use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProposalError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Document parsing error: {message}")]
    ParseError { message: String },

    #[error("LLM generation error in {agent}: {message}")]
    LlmError { agent: String, message: String },
}

pub type Result<T> = std::result::Result<T, ProposalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Document,
    Network,
    Llm,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ProposalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProposalError::ConfigError { .. }
            | ProposalError::MissingConfigError { .. }
            | ProposalError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ProposalError::ParseError { .. } | ProposalError::PdfError(_) => {
                ErrorCategory::Document
            }
            ProposalError::HttpError(_) => ErrorCategory::Network,
            ProposalError::LlmError { .. } | ProposalError::SerializationError(_) => {
                ErrorCategory::Llm
            }
            ProposalError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Document | ErrorCategory::Llm => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ProposalError::HttpError(e) => format!("Could not reach the LLM API: {}", e),
            ProposalError::IoError(e) => format!("File operation failed: {}", e),
            ProposalError::SerializationError(e) => {
                format!("The LLM response could not be decoded: {}", e)
            }
            ProposalError::PdfError(e) => format!("The PDF could not be read: {}", e),
            ProposalError::ConfigError { message } => format!("Configuration problem: {}", message),
            ProposalError::MissingConfigError { field } => {
                format!("Missing required configuration: {}", field)
            }
            ProposalError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            ProposalError::ParseError { message } => {
                format!("The RFP document could not be parsed: {}", message)
            }
            ProposalError::LlmError { agent, message } => {
                format!("The {} step failed: {}", agent, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command-line flags, your .env file, and the prompts file".to_string()
            }
            ErrorCategory::Document => {
                "Verify the RFP file is a readable PDF or Markdown document with text content"
                    .to_string()
            }
            ErrorCategory::Network => {
                "Check your network connection and the --api-base URL, then retry".to_string()
            }
            ErrorCategory::Llm => {
                "Retry the run; if the problem persists, try another --model".to_string()
            }
            ErrorCategory::Io => {
                "Check that the input file exists and the output path is writable".to_string()
            }
        }
    }
}
