use crate::domain::model::RfpSection;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Splits Markdown into heading-delimited sections. Text before the first
/// heading becomes an untitled section; a document without headings yields a
/// single untitled section holding the raw text.
pub fn split_sections(text: &str) -> Vec<RfpSection> {
    let mut sections = Vec::new();
    let mut current_title: Option<String> = None;
    let mut current_content = String::new();
    let mut heading_buffer = String::new();
    let mut in_heading = false;
    let mut saw_heading = false;

    let flush = |sections: &mut Vec<RfpSection>, title: &mut Option<String>, content: &mut String| {
        let trimmed = content.trim();
        if title.is_some() || !trimmed.is_empty() {
            sections.push(RfpSection {
                title: title.take(),
                content: trimmed.to_string(),
            });
        }
        content.clear();
    };

    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                flush(&mut sections, &mut current_title, &mut current_content);
                in_heading = true;
                saw_heading = true;
                heading_buffer.clear();
            }
            Event::End(TagEnd::Heading(_)) => {
                in_heading = false;
                current_title = Some(heading_buffer.trim().to_string());
            }
            Event::Text(t) | Event::Code(t) => {
                if in_heading {
                    heading_buffer.push_str(&t);
                } else {
                    current_content.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if !in_heading {
                    current_content.push('\n');
                }
            }
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Item) => {
                current_content.push('\n');
            }
            _ => {}
        }
    }
    flush(&mut sections, &mut current_title, &mut current_content);

    if !saw_heading {
        // Preserve the raw text when there is no structure to split on.
        return vec![RfpSection {
            title: None,
            content: text.to_string(),
        }];
    }

    sections
}
