pub mod formatter;
pub mod reviewer;
pub mod writer;

pub use formatter::format_proposal;
pub use reviewer::RfpReviewer;
pub use writer::TechnicalWriter;

/// Technology names containing one of these are treated as OEM products and
/// get a dedicated product-review section.
const OEM_KEYWORDS: &[&str] = &[
    "salesforce",
    "outsystems",
    "sap",
    "oracle",
    "microsoft dynamics",
    "servicenow",
    "workday",
];

pub fn is_oem_technology(technology: &str) -> bool {
    let technology = technology.to_lowercase();
    OEM_KEYWORDS
        .iter()
        .any(|keyword| technology.contains(keyword))
}

/// Char-based truncation that never splits a UTF-8 code point.
pub(crate) fn truncate_to_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

pub(crate) fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        "Not explicitly listed.".to_string()
    } else {
        format!("- {}", items.join("\n- "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_oem_technology() {
        assert!(is_oem_technology("Salesforce Sales Cloud"));
        assert!(is_oem_technology("OutSystems Platform"));
        assert!(is_oem_technology("Microsoft Dynamics 365"));
        assert!(!is_oem_technology("Rust with Axum"));
        assert!(!is_oem_technology("React Native"));
    }

    #[test]
    fn test_truncate_to_chars_plain_ascii() {
        assert_eq!(truncate_to_chars("hello world", 5), "hello");
        assert_eq!(truncate_to_chars("short", 100), "short");
    }

    #[test]
    fn test_truncate_to_chars_is_unicode_safe() {
        let text = "café 🎉 naïve";
        let truncated = truncate_to_chars(text, 6);
        assert_eq!(truncated, "café 🎉");
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(bullet_list(&[]), "Not explicitly listed.");
        assert_eq!(
            bullet_list(&["Cloud-based".to_string(), "Mobile access".to_string()]),
            "- Cloud-based\n- Mobile access"
        );
    }
}
