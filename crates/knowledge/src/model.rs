use serde::Serialize;

/// A named category grouping related rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Display ordinal; sorting by it yields the canonical order
    pub number: u32,
    pub name: String,
    /// Unique short identifier, e.g. `conn`
    pub prefix: String,
    pub impact: String,
    pub description: String,
    /// Prefixes of the rules assigned to this section, in load order
    pub rules: Vec<String>,
}

impl Section {
    pub fn new(
        number: u32,
        name: impl Into<String>,
        prefix: impl Into<String>,
        impact: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            prefix: prefix.into(),
            impact: impact.into(),
            description: description.into(),
            rules: Vec::new(),
        }
    }
}

/// One best-practice entry parsed from a single rule document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Document identifier (file stem), used as the lookup key
    pub prefix: String,
    pub title: String,
    pub impact: String,
    pub impact_description: String,
    pub tags: Vec<String>,
    /// Markdown body after the frontmatter, verbatim
    pub content: String,
    /// First descriptive line under a heading; empty when there is none
    pub summary: String,
    /// Ordinal of the owning section, if the rule was assigned to one
    pub section_number: Option<u32>,
}

impl Rule {
    pub fn to_markdown(&self) -> String {
        let mut lines = vec![format!("# {}\n", self.title)];
        lines.push(format!(
            "**Impact:** {} ({})\n",
            self.impact, self.impact_description
        ));
        lines.push(format!("**Tags:** {}\n", self.tags.join(", ")));
        lines.push("---\n".to_string());
        lines.push(self.content.clone());
        lines.join("\n")
    }

    /// Tags joined with spaces, lowercased, for substring filters.
    pub(crate) fn tag_text(&self) -> String {
        self.tags.join(" ").to_lowercase()
    }
}

/// Severity badge shown next to impact levels in topic listings.
pub fn impact_badge(impact: &str) -> &'static str {
    match impact {
        "CRITICAL" | "HIGH" => "🔴",
        "MEDIUM" => "🟡",
        _ => "🟢",
    }
}

/// A bad/good code pair extracted from a rule body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AntiPattern {
    pub title: String,
    pub reason: String,
    pub bad_code: String,
    pub good_code: String,
    pub language: String,
    pub category: String,
}

/// Anti-patterns sharing one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AntiPatternGroup {
    pub category: String,
    pub patterns: Vec<AntiPattern>,
}

/// A documentation link attached to a code example
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
}

/// A single code snippet resolved for a named pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeExample {
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
    pub notes: Vec<String>,
    pub references: Vec<Reference>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_markdown_has_header_and_body() {
        let rule = Rule {
            prefix: "conn-pooling".into(),
            title: "Use Connection Pooling".into(),
            impact: "HIGH".into(),
            impact_description: "fewer handshakes".into(),
            tags: vec!["connection".into(), "pool".into()],
            content: "## Why\n\nBody text.".into(),
            summary: "Body text.".into(),
            section_number: Some(3),
        };

        let md = rule.to_markdown();
        assert!(md.starts_with("# Use Connection Pooling\n"));
        assert!(md.contains("**Impact:** HIGH (fewer handshakes)"));
        assert!(md.contains("**Tags:** connection, pool"));
        assert!(md.ends_with("## Why\n\nBody text."));
    }

    #[test]
    fn badges_follow_impact_level() {
        assert_eq!(impact_badge("HIGH"), "🔴");
        assert_eq!(impact_badge("MEDIUM"), "🟡");
        assert_eq!(impact_badge("LOW"), "🟢");
    }
}
