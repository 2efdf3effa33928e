//! # Project Tag Extraction
//!
//! Finds bracketed project tags (`[Backend] deployed v2`) anywhere in a message.
//! Extraction returns the raw bracket contents; canonical keys come from
//! [`normalize_project_name`], which callers apply before touching the store.

use regex::Regex;
use std::sync::OnceLock;

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    // Brackets may not nest inside a tag.
    TAG.get_or_init(|| Regex::new(r"\[([^\[\]]+)\]").expect("tag regex is valid"))
}

/// Returns every project tag in `text`, left to right, duplicates included.
///
/// The interior of each bracket pair is returned as written, so
/// `"[  Backend  ] hi"` yields `"  Backend  "`. Empty or whitespace-only
/// brackets are ignored.
pub fn extract_projects(text: &str) -> Vec<String> {
    tag_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|tag| !tag.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// True if `text` carries at least one project tag.
pub fn has_project_tag(text: &str) -> bool {
    !extract_projects(text).is_empty()
}

/// Trims the name and collapses internal whitespace runs (tabs and newlines too) to one space.
pub fn normalize_project_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_tag_at_start() {
        assert_eq!(
            extract_projects("[Frontend] Working on dashboard components"),
            vec!["Frontend"]
        );
    }

    #[test]
    fn test_extract_multiple_tags_anywhere() {
        assert_eq!(extract_projects("[A] hi [B] there"), vec!["A", "B"]);
        assert_eq!(
            extract_projects("Working on [Backend] features, see [Docs]"),
            vec!["Backend", "Docs"]
        );
        assert_eq!(extract_projects("Completed the task [Frontend]"), vec!["Frontend"]);
    }

    #[test]
    fn test_extract_keeps_duplicates_in_order() {
        assert_eq!(
            extract_projects("[Api] one [Web] two [Api] three"),
            vec!["Api", "Web", "Api"]
        );
    }

    #[test]
    fn test_extract_special_characters() {
        assert_eq!(extract_projects("[API-v2] auth endpoints"), vec!["API-v2"]);
        assert_eq!(extract_projects("[Mobile App] push"), vec!["Mobile App"]);
        assert_eq!(extract_projects("[Project-2024] Q1 goals"), vec!["Project-2024"]);
    }

    #[test]
    fn test_extract_without_tags() {
        assert!(extract_projects("no tags").is_empty());
        assert!(extract_projects("").is_empty());
        assert!(extract_projects("dangling [bracket").is_empty());
    }

    #[test]
    fn test_extract_ignores_empty_brackets() {
        assert!(extract_projects("[] empty").is_empty());
        assert!(extract_projects("[   ] blank").is_empty());
        assert!(extract_projects("[\t\n] blank").is_empty());
        assert_eq!(extract_projects("[] then [Real]"), vec!["Real"]);
    }

    #[test]
    fn test_extract_returns_raw_interior() {
        let text = "[  Backend API  ] Implementing authentication";
        let extracted = extract_projects(text);
        assert_eq!(extracted, vec!["  Backend API  "]);
        assert_eq!(normalize_project_name(&extracted[0]), "Backend API");
    }

    #[test]
    fn test_extract_nested_brackets_takes_innermost() {
        assert_eq!(extract_projects("[[Core]] refactor"), vec!["Core"]);
    }

    #[test]
    fn test_has_project_tag() {
        assert!(has_project_tag("[Frontend] hello"));
        assert!(has_project_tag("hello [Frontend]"));
        assert!(!has_project_tag("hello"));
        assert!(!has_project_tag("[] hello"));
    }

    #[test]
    fn test_normalize_project_name() {
        assert_eq!(normalize_project_name("  Frontend  "), "Frontend");
        assert_eq!(normalize_project_name("Mobile    App"), "Mobile App");
        assert_eq!(normalize_project_name("\tBackend\nAPI\t"), "Backend API");
        assert_eq!(normalize_project_name("Data Science"), "Data Science");
        assert_eq!(normalize_project_name(""), "");
        assert_eq!(normalize_project_name(" \t\n "), "");
    }
}
