//! Compiled guide synthesis: every section by ordinal, every rule by title.

use crate::index::KnowledgeBase;
use crate::model::{Rule, Section};

const HEADER: &[&str] = &[
    "# Redis Development Best Practices",
    "",
    concat!("**Version ", env!("CARGO_PKG_VERSION"), "**  "),
    "MCP Redis Best Practices  ",
    "",
    "> **Note:**  ",
    "> This document is optimized for AI agents and LLMs to follow when",
    "> generating or refactoring Redis applications. Humans may also find",
    "> it useful, but guidance here is optimized for automation and consistency.",
    "",
    "---",
    "",
    "## Abstract",
    "",
    "Best practices for Redis including data structures, memory management,",
    "connection handling, Redis Query Engine (RQE), vector search with RedisVL,",
    "semantic caching with LangCache, security, and performance optimization.",
    "",
    "---",
    "",
    "## Table of Contents",
    "",
];

const REFERENCES: &[&str] = &[
    "## References",
    "",
    "- [Redis Documentation](https://redis.io/docs/)",
    "- [Redis Best Practices](https://redis.io/docs/latest/develop/get-started/data-store/)",
    "- [Redis Query Engine](https://redis.io/docs/latest/develop/interact/search-and-query/)",
    "- [RedisVL Documentation](https://redis.io/docs/latest/integrate/redisvl/)",
    "- [Redis Security](https://redis.io/docs/latest/operate/oss_and_stack/management/security/)",
];

fn section_anchor(section: &Section) -> String {
    let slug = section
        .name
        .to_lowercase()
        .replace(' ', "-")
        .replace(['&', '/'], "");
    format!("{}-{}", section.number, slug)
}

fn rule_anchor(rule: &Rule) -> String {
    rule.title.to_lowercase().replace(' ', "-")
}

fn rules_by_title<'a>(kb: &'a KnowledgeBase, section: &Section) -> Vec<&'a Rule> {
    let mut rules = kb.section_rules(section);
    rules.sort_by(|a, b| a.title.cmp(&b.title));
    rules
}

pub(crate) fn synthesize(kb: &KnowledgeBase) -> String {
    let sections = kb.get_sections(None);
    let mut lines: Vec<String> = HEADER.iter().map(|line| line.to_string()).collect();

    for section in &sections {
        lines.push(format!(
            "{}. [{}](#{}) — **{}**",
            section.number,
            section.name,
            section_anchor(section),
            section.impact
        ));
        for rule in rules_by_title(kb, section) {
            lines.push(format!("   - [{}](#{})", rule.title, rule_anchor(rule)));
        }
    }
    lines.extend(["", "---", ""].map(String::from));

    for section in &sections {
        lines.push(format!("## {}. {}", section.number, section.name));
        lines.push(String::new());
        lines.push(format!("**Impact:** {}", section.impact));
        lines.push(String::new());
        lines.push(format!("*{}*", section.description));
        lines.push(String::new());

        for rule in rules_by_title(kb, section) {
            lines.push(format!("### {}", rule.title));
            lines.push(String::new());
            lines.push(format!(
                "**Impact: {}** ({})",
                rule.impact, rule.impact_description
            ));
            lines.push(String::new());
            lines.push(rule.content.trim().to_string());
            lines.push(String::new());
            lines.push("---".to_string());
            lines.push(String::new());
        }
    }

    lines.extend(REFERENCES.iter().map(|line| line.to_string()));
    lines.join("\n")
}
