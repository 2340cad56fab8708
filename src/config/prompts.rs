use crate::utils::error::{ProposalError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_RFP_REVIEW: &str = r#"Given the following Request for Proposal (RFP) text, analyze it and extract the requested information.
Focus on identifying the main goals, critical requirements, and how proposals will be evaluated.

RFP Text:
---
{rfp_text}
---

Respond with a single JSON object containing exactly these fields:
- "summary": a concise summary of the RFP's main goals and scope
- "key_requirements": a list of the most critical requirements mentioned in the RFP
- "evaluation_criteria": a list of criteria that will be used to evaluate the proposals, as stated in the RFP
"#;

const DEFAULT_TECHNICAL_CONTENT: &str = r#"You are a senior technical writer and solution architect. Based on the provided Request for Proposal (RFP) details and the chosen primary technology, generate the core technical sections of a proposal.

Chosen Primary Technology: {technology}

RFP Details:
- RFP Full Text (may be truncated): {rfp_text}
- RFP Summary: {summary}
- Key Client Requirements:
{requirements}
- Evaluation Criteria (if known):
{criteria}

Respond with a single JSON object containing exactly these fields:
- "understanding_requirements": a narrative demonstrating a clear understanding of the client's needs and objectives as expressed in the RFP, synthesized from the summary, the key requirements, and the overall text. This should not just be a list but a thoughtful interpretation.
- "solution_overview": a detailed overview of the proposed solution, explaining how it addresses the client's main problems and objectives using {technology}, and describing its core components, functionalities, and benefits.
- "architecture_description": a description of the proposed solution architecture, detailing the main components, layers, interactions, and data flows, and explaining how {technology} fits into it.
- "architecture_mermaid": a Mermaid diagram script representing the architecture described above, using a common diagram type such as graph TD or sequenceDiagram. Provide the bare script without surrounding code fences.

Use professional language and technical depth. If {technology} is a specific OEM product, tailor the descriptions and architecture to reflect its typical usage and strengths.
"#;

const DEFAULT_OEM_REVIEW: &str = r#"You are a technical writer. Generate an overview of the OEM product "{oem_product}" to be included in a larger project proposal.
Describe what the product is, its main features, and its general benefits.
If RFP context is provided below, briefly mention how the product is relevant to it.

RFP Summary: {summary}
Key RFP Requirements:
{requirements}

Respond with a single JSON object containing exactly these fields:
- "oem_product_name": the product name, "{oem_product}"
- "title": a section title such as "Overview: {oem_product}"
- "content": the detailed overview
"#;

/// The three prompt templates driving the LLM agents. Built-in defaults can
/// be overridden from a TOML file; `${VAR}` references inside the file are
/// expanded from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSet {
    pub rfp_review: String,
    pub technical_content: String,
    pub oem_review: String,
}

#[derive(Debug, Deserialize)]
struct PromptsFile {
    prompts: PromptSet,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            rfp_review: DEFAULT_RFP_REVIEW.to_string(),
            technical_content: DEFAULT_TECHNICAL_CONTENT.to_string(),
            oem_review: DEFAULT_OEM_REVIEW.to_string(),
        }
    }
}

impl PromptSet {
    /// 從 TOML 檔案載入提示模板
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProposalError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析提示模板
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        let file: PromptsFile =
            toml::from_str(&processed_content).map_err(|e| ProposalError::ConfigError {
                message: format!("prompts file parsing error: {}", e),
            })?;

        file.prompts.validate()?;
        Ok(file.prompts)
    }

    /// Ensures every template still carries the placeholders its agent
    /// substitutes at render time.
    pub fn validate(&self) -> Result<()> {
        require_placeholder("rfp_review", &self.rfp_review, "rfp_text")?;
        require_placeholder("technical_content", &self.technical_content, "rfp_text")?;
        require_placeholder("technical_content", &self.technical_content, "technology")?;
        require_placeholder("oem_review", &self.oem_review, "oem_product")?;
        Ok(())
    }
}

fn require_placeholder(prompt_key: &str, template: &str, placeholder: &str) -> Result<()> {
    if !template.contains(&format!("{{{}}}", placeholder)) {
        return Err(ProposalError::ConfigError {
            message: format!(
                "prompt '{}' is missing the required placeholder {{{}}}",
                prompt_key, placeholder
            ),
        });
    }
    Ok(())
}

/// 替換環境變數 (例如 ${PROMPT_SUFFIX})，未定義的變數保持原樣
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

/// Fills `{name}` placeholders in a template. Placeholders are scanned before
/// substitution, so braces inside the substituted values are left alone; a
/// placeholder with no matching variable is a configuration error.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> Result<String> {
    use regex::Regex;
    let re = Regex::new(r"\{([a-z_]+)\}").unwrap();

    for caps in re.captures_iter(template) {
        let name = &caps[1];
        if !vars.iter().any(|(key, _)| *key == name) {
            return Err(ProposalError::ConfigError {
                message: format!("unresolved placeholder {{{}}} in prompt template", name),
            });
        }
    }

    let mut rendered = template.to_string();
    for (key, value) in vars {
        rendered = rendered.replace(&format!("{{{}}}", key), value);
    }
    Ok(rendered)
}
