//! Section registry parser for `_sections.md`.
//!
//! Each entry is a heading followed by two metadata lines:
//!
//! ```text
//! ## 3. Connection & Performance (conn)
//! **Impact:** HIGH
//! **Description:** Pooling, pipelining and client-side timeouts.
//! ```

use crate::markdown;
use crate::model::Section;
use std::collections::BTreeMap;

/// Parses the registry into a map keyed by section prefix.
///
/// Entries that do not match the grammar are skipped. A repeated prefix replaces the
/// earlier entry.
pub fn parse_sections(text: &str) -> BTreeMap<String, Section> {
    let lines: Vec<&str> = text.lines().collect();
    let mut sections = BTreeMap::new();

    let mut idx = 0;
    while idx < lines.len() {
        let Some((number, name, prefix)) = parse_heading(lines[idx]) else {
            idx += 1;
            continue;
        };

        let impact_idx = markdown::next_non_blank(&lines, idx + 1);
        let impact = impact_idx
            .and_then(|i| metadata_value(lines[i], "Impact"))
            .map(leading_word)
            .filter(|impact| !impact.is_empty());
        let description_idx = impact_idx.and_then(|i| markdown::next_non_blank(&lines, i + 1));
        let description = description_idx
            .and_then(|i| metadata_value(lines[i], "Description"))
            .filter(|description| !description.is_empty());

        match (impact, description, description_idx) {
            (Some(impact), Some(description), Some(last)) => {
                let section = Section::new(number, name, prefix, impact, description);
                if let Some(previous) = sections.insert(prefix.to_string(), section) {
                    log::warn!(
                        "Duplicate section prefix '{}': '{}' replaces '{}'",
                        prefix,
                        name,
                        previous.name
                    );
                }
                idx = last + 1;
            }
            _ => {
                log::debug!("Section heading without metadata: {}", lines[idx].trim());
                idx += 1;
            }
        }
    }

    sections
}

/// `## <n>. <name> (<prefix>)` → (n, name, prefix)
fn parse_heading(line: &str) -> Option<(u32, &str, &str)> {
    let rest = line.trim().strip_prefix('#')?.trim_start_matches('#').trim();
    let (number, rest) = rest.split_once('.')?;
    let number: u32 = number.trim().parse().ok()?;

    let rest = rest.trim().strip_suffix(')')?;
    let (name, prefix) = rest.split_once('(')?;
    let name = name.trim();
    let prefix = prefix.trim();

    let prefix_ok = !prefix.is_empty()
        && prefix
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    if name.is_empty() || !prefix_ok {
        return None;
    }
    Some((number, name, prefix))
}

/// `**Impact:** HIGH` (bold optional) → `HIGH`
fn metadata_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let line = line.trim().strip_prefix("**").unwrap_or(line.trim());
    let rest = line.strip_prefix(key)?.strip_prefix(':')?;
    let rest = rest.strip_prefix("**").unwrap_or(rest);
    Some(rest.trim())
}

fn leading_word(value: &str) -> &str {
    let end = value
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(value.len());
    &value[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REGISTRY: &str = "# Sections\n\n## 1. Data Structures & Keys (data)\n**Impact:** HIGH\n**Description:** Choosing the right structure.\n\n## 7. Semantic Caching (semantic-cache)\n\n**Impact:** MEDIUM\n\n**Description:** LangCache usage.\n\n## 3. Connection & Performance (conn)\nImpact: HIGH\nDescription: Pooling and pipelining.\n";

    #[test]
    fn parses_entries_with_and_without_bold_markers() {
        let sections = parse_sections(REGISTRY);
        assert_eq!(sections.len(), 3);

        let data = &sections["data"];
        assert_eq!(data.number, 1);
        assert_eq!(data.name, "Data Structures & Keys");
        assert_eq!(data.impact, "HIGH");
        assert_eq!(data.description, "Choosing the right structure.");
        assert!(data.rules.is_empty());

        let cache = &sections["semantic-cache"];
        assert_eq!(cache.number, 7);
        assert_eq!(cache.impact, "MEDIUM");

        let conn = &sections["conn"];
        assert_eq!(conn.description, "Pooling and pipelining.");
    }

    #[test]
    fn heading_without_metadata_is_skipped() {
        let text = "## 2. Memory (ram)\nSome prose.\n## 3. Streams (stream)\n**Impact:** LOW\n**Description:** Streams.\n";
        let sections = parse_sections(text);
        assert_eq!(sections.keys().collect::<Vec<_>>(), vec!["stream"]);
    }

    #[test]
    fn duplicate_prefix_keeps_last_entry() {
        let text = "## 1. First (dup)\n**Impact:** HIGH\n**Description:** a\n## 2. Second (dup)\n**Impact:** LOW\n**Description:** b\n";
        let sections = parse_sections(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections["dup"].name, "Second");
        assert_eq!(sections["dup"].number, 2);
    }

    #[test]
    fn empty_document_yields_no_sections() {
        assert!(parse_sections("").is_empty());
    }

    #[test]
    fn rejects_headings_outside_grammar() {
        assert_eq!(parse_heading("## Abstract"), None);
        assert_eq!(parse_heading("## 1. Missing prefix"), None);
        assert_eq!(parse_heading("## x. Name (p)"), None);
        assert_eq!(
            parse_heading("### 10. Observability (observe)"),
            Some((10, "Observability", "observe"))
        );
    }
}
