pub mod markdown;
pub mod pdf;

use crate::domain::model::{RfpDocument, RfpSection};
use crate::utils::error::{ProposalError, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Markdown,
    Pdf,
}

impl DocumentKind {
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("md") | Some("markdown") => Ok(DocumentKind::Markdown),
            _ => Err(ProposalError::ParseError {
                message: format!(
                    "Unsupported file type for '{}'. Only PDF and Markdown files are supported.",
                    path
                ),
            }),
        }
    }
}

pub struct RfpParser {
    file_path: String,
    kind: DocumentKind,
}

impl RfpParser {
    pub fn new(file_path: &str) -> Result<Self> {
        let kind = DocumentKind::from_path(file_path)?;
        Ok(Self {
            file_path: file_path.to_string(),
            kind,
        })
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn file_name(&self) -> String {
        Path::new(&self.file_path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file_path.as_str())
            .to_string()
    }

    /// Turns raw file bytes into an [`RfpDocument`]. A document that yields no
    /// text at all is rejected here so later stages can assume content exists.
    pub fn parse(&self, data: &[u8]) -> Result<RfpDocument> {
        let (full_text, sections) = match self.kind {
            DocumentKind::Markdown => {
                let text =
                    String::from_utf8(data.to_vec()).map_err(|e| ProposalError::ParseError {
                        message: format!("Markdown file is not valid UTF-8: {}", e),
                    })?;
                let sections = markdown::split_sections(&text);
                (text, sections)
            }
            DocumentKind::Pdf => {
                let text = pdf::extract_text(data)?;
                let sections = vec![RfpSection {
                    title: None,
                    content: text.clone(),
                }];
                (text, sections)
            }
        };

        if full_text.trim().is_empty() {
            return Err(ProposalError::ParseError {
                message: format!("no text content extracted from '{}'", self.file_path),
            });
        }

        Ok(RfpDocument {
            file_name: self.file_name(),
            full_text,
            sections,
        })
    }
}
