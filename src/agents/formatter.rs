use crate::domain::model::Proposal;

// Diagram headers the formatter recognizes when normalizing model output.
const MERMAID_DIAGRAM_TYPES: &[&str] = &[
    "graph",
    "flowchart",
    "sequenceDiagram",
    "classDiagram",
    "stateDiagram",
    "erDiagram",
    "mindmap",
    "journey",
];

/// Renders the proposal model to its final Markdown form. Purely
/// deterministic: no LLM round-trips happen here.
pub fn format_proposal(proposal: &Proposal) -> String {
    let mut output = String::new();

    output.push_str(&format!("**Based on RFP:** {}\n\n", proposal.rfp_reference));
    output.push_str(&format!(
        "**Proposed Technology Focus:** {}\n\n",
        proposal.technology
    ));
    output.push_str("---\n\n");

    push_section(
        &mut output,
        1,
        "Understanding of Requirements",
        &proposal.content.understanding_requirements,
    );
    push_section(
        &mut output,
        1,
        "Solution Overview",
        &proposal.content.solution_overview,
    );

    let mut architecture = proposal.content.architecture_description.trim().to_string();
    if let Some(diagram) = normalize_mermaid(&proposal.content.architecture_mermaid) {
        if !architecture.is_empty() {
            architecture.push_str("\n\n");
        }
        architecture.push_str(&diagram);
    }
    push_section(&mut output, 1, "Solution Architecture", &architecture);

    for oem_review in &proposal.oem_reviews {
        push_section(&mut output, 2, &oem_review.title, &oem_review.content);
    }

    let mut result = output.trim_end().to_string();
    result.push('\n');
    result
}

fn push_section(output: &mut String, level: usize, title: &str, content: &str) {
    let content = content.trim();
    if content.is_empty() {
        return;
    }
    output.push_str(&format!("{} {}\n\n{}\n\n", "#".repeat(level), title, content));
}

/// Re-fences a Mermaid script for embedding. Any fences the model emitted
/// despite instructions are stripped first; an empty script yields `None`.
pub fn normalize_mermaid(script: &str) -> Option<String> {
    let script: String = script
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n");
    let script = script.trim();

    if script.is_empty() {
        tracing::warn!("🔶 Empty Mermaid script, omitting the architecture diagram");
        return None;
    }

    let first_word = script.split_whitespace().next().unwrap_or_default();
    let recognized = MERMAID_DIAGRAM_TYPES
        .iter()
        .any(|diagram_type| first_word.starts_with(diagram_type));
    if !recognized {
        tracing::warn!(
            "🔶 Unrecognized Mermaid diagram type '{}', embedding as-is",
            first_word
        );
    }

    Some(format!("```mermaid\n{}\n```", script))
}
