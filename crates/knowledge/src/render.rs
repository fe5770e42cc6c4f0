//! Markdown responses for each tool operation.

use crate::aliases;
use crate::index::KnowledgeBase;
use crate::model::impact_badge;
use crate::views::normalize_pattern;

fn bullet_list<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(|item| format!("  - {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rule markdown for `topic`, falling back to the best search hit.
pub fn best_practice(kb: &KnowledgeBase, topic: &str) -> String {
    let normalized = normalize_pattern(topic);
    if !normalized.is_empty() {
        if let Some(rule) = kb.get_rule_by_topic(&normalized) {
            return rule.to_markdown();
        }
        if let Some(hit) = kb.search_rules(topic).first() {
            return hit.rule.to_markdown();
        }
    }

    format!(
        "Topic '{topic}' not found.\n\nAvailable topics:\n{}\n\nTip: Use 'search_best_practices' to search by keyword, or 'list_topics' to browse by category.",
        bullet_list(kb.list_all_topics())
    )
}

pub fn topics(kb: &KnowledgeBase, category: Option<&str>) -> String {
    let mut lines = vec!["# Redis Best Practices Topics\n".to_string()];

    for section in kb.get_sections(category) {
        lines.push(format!(
            "\n## {}. {} ({} {})",
            section.number,
            section.name,
            impact_badge(&section.impact),
            section.impact
        ));
        lines.push(format!("*{}*\n", section.description));
        for rule in kb.section_rules(section) {
            lines.push(format!("  - `{}` - {}", rule.prefix, rule.title));
        }
    }

    lines.join("\n")
}

pub fn search(kb: &KnowledgeBase, query: &str) -> String {
    if query.trim().is_empty() {
        return "Please provide a search query.".to_string();
    }

    let hits = kb.search_rules(query);
    if hits.is_empty() {
        return format!(
            "No results found for '{query}'.\n\nTry:\n- Different keywords (e.g., 'cache' instead of 'caching')\n- Broader terms (e.g., 'memory' instead of 'maxmemory')\n- Use 'list_topics' to browse available topics"
        );
    }

    let mut lines = vec![format!("# Search Results for '{query}'\n")];
    lines.push(format!("Found {} matching practice(s):\n", hits.len()));

    let limit = kb.config().search_result_limit;
    for (i, hit) in hits.iter().take(limit).enumerate() {
        let rule = hit.rule;
        lines.push(format!("## {}. {}", i + 1, rule.title));
        lines.push(format!(
            "**Impact:** {} - {}",
            rule.impact, rule.impact_description
        ));
        lines.push(format!("**Tags:** {}\n", rule.tags.join(", ")));
        lines.push(rule.summary.clone());
        lines.push(format!(
            "\n*Use `get_best_practice('{}')` for full details.*\n",
            rule.prefix
        ));
        lines.push("---\n".to_string());
    }

    lines.join("\n")
}

pub fn anti_patterns(kb: &KnowledgeBase, topic: Option<&str>) -> String {
    let mut lines = vec!["# Redis Anti-Patterns to Avoid\n".to_string()];
    if let Some(topic) = topic.filter(|t| !t.trim().is_empty()) {
        lines.push(format!("*Filtered by: {topic}*\n"));
    }

    let groups = kb.get_anti_patterns(topic);
    if groups.is_empty() {
        lines.push("No anti-patterns found.".to_string());
    }

    for group in groups {
        lines.push(format!("\n## {}\n", group.category));
        for pattern in group.patterns {
            lines.push(format!("### ❌ {}", pattern.title));
            lines.push(format!("**Why it's bad:** {}", pattern.reason));
            lines.push(format!("\n```{}", pattern.language));
            lines.push(pattern.bad_code);
            lines.push("```\n".to_string());
            lines.push("**Instead, do this:**\n".to_string());
            lines.push(format!("```{}", pattern.language));
            lines.push(pattern.good_code);
            lines.push("```\n".to_string());
        }
    }

    lines.join("\n")
}

pub fn code_example(kb: &KnowledgeBase, pattern: &str, language: Option<&str>) -> String {
    let language = language
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(kb.config().default_language.as_str());

    let Some(example) = kb.get_code_example(pattern, language) else {
        return format!(
            "No code example found for pattern '{pattern}' in {language}.\n\nAvailable patterns:\n{}\n\nAvailable languages: {}",
            bullet_list(kb.list_code_examples().iter().copied()),
            aliases::CODE_EXAMPLE_LANGUAGES.join(", ")
        );
    };

    let mut lines = vec![format!("# {}\n", example.title)];
    lines.push(format!("**Pattern:** {pattern}"));
    lines.push(format!("**Language:** {}\n", example.language));
    lines.push(example.description);
    lines.push(format!("\n```{}", example.language));
    lines.push(example.code);
    lines.push("```\n".to_string());

    if !example.notes.is_empty() {
        lines.push("## Notes\n".to_string());
        lines.extend(example.notes.iter().map(|note| format!("- {note}")));
    }
    if !example.references.is_empty() {
        lines.push("\n## References\n".to_string());
        lines.extend(
            example
                .references
                .iter()
                .map(|r| format!("- [{}]({})", r.title, r.url)),
        );
    }

    lines.join("\n")
}

pub fn full_guide(kb: &KnowledgeBase) -> String {
    kb.full_guide().to_string()
}
