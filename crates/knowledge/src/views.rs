//! Derived views over rule bodies: anti-pattern pairs and code examples.
//!
//! Nothing here is cached; every call rescans the relevant rule bodies.

use crate::aliases;
use crate::index::KnowledgeBase;
use crate::markdown::{self, CodeBlock};
use crate::model::{AntiPattern, AntiPatternGroup, CodeExample, Reference, Rule};
use std::collections::BTreeMap;

const INCORRECT: &str = "**Incorrect";
const CORRECT: &str = "**Correct";
const OTHER_CATEGORY: &str = "Other";

/// A bold-marked example: the text after the marker plus the fence that follows it.
struct MarkedBlock<'a> {
    label: String,
    block: CodeBlock<'a>,
}

/// Finds every line containing `marker` (list items and emoji prefixes included) that is followed, after blank lines, by a language-tagged fence.
fn marked_blocks<'a>(lines: &[&'a str], marker: &str) -> Vec<MarkedBlock<'a>> {
    let mut found = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx];
        let Some(rest) = line.find(marker).map(|pos| &line[pos + marker.len()..]) else {
            idx += 1;
            continue;
        };
        let label = match rest.find("**") {
            Some(close) => rest[close + 2..].trim_start_matches(':').trim(),
            None => {
                idx += 1;
                continue;
            }
        };

        let block = markdown::next_non_blank(lines, idx + 1)
            .and_then(|start| markdown::read_block(lines, start))
            .filter(|block| !block.language.is_empty());
        match block {
            Some(block) => {
                idx = block.end + 1;
                found.push(MarkedBlock {
                    label: label.to_string(),
                    block,
                });
            }
            None => idx += 1,
        }
    }
    found
}

/// Pairs the n-th Incorrect block with the n-th Correct block of `rule`.
pub fn extract_anti_patterns(rule: &Rule, category: &str) -> Vec<AntiPattern> {
    let lines: Vec<&str> = rule.content.lines().collect();
    let incorrect = marked_blocks(&lines, INCORRECT);
    let correct = marked_blocks(&lines, CORRECT);

    incorrect
        .into_iter()
        .zip(correct)
        .map(|(bad, good)| AntiPattern {
            title: if bad.label.is_empty() {
                rule.title.clone()
            } else {
                bad.label
            },
            reason: rule.impact_description.clone(),
            bad_code: bad.block.code.trim().to_string(),
            good_code: good.block.code.trim().to_string(),
            language: bad.block.language.to_string(),
            category: category.to_string(),
        })
        .collect()
}

/// Links on `Reference:` lines of `body`
pub fn extract_references(body: &str) -> Vec<Reference> {
    body.lines()
        .filter_map(|line| {
            let line = line.replace("**", "");
            let (_, rest) = line.split_once("Reference:")?;
            Some(
                markdown::links(rest)
                    .into_iter()
                    .map(|(title, url)| Reference { title, url })
                    .collect::<Vec<_>>(),
            )
        })
        .flatten()
        .collect()
}

/// Text of `Note:` lines outside code fences
pub fn extract_notes(body: &str) -> Vec<String> {
    let lines: Vec<&str> = body.lines().collect();
    let fenced = markdown::fenced_mask(&lines);
    lines
        .iter()
        .zip(fenced)
        .filter(|(_, inside)| !inside)
        .filter_map(|(line, _)| {
            let line = line.trim().replace("**", "");
            let note = line.strip_prefix("Note:")?.trim();
            (!note.is_empty()).then(|| note.to_string())
        })
        .collect()
}

/// Lowercases and unifies `_` and spaces to `-`.
pub fn normalize_pattern(pattern: &str) -> String {
    pattern.trim().to_lowercase().replace(['_', ' '], "-")
}

impl KnowledgeBase {
    /// Anti-patterns grouped by section name, in section order; unassigned rules go last
    /// under "Other". `topic` keeps only rules whose prefix or tags contain it.
    pub fn get_anti_patterns(&self, topic: Option<&str>) -> Vec<AntiPatternGroup> {
        let topic = topic
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());
        let mut grouped: BTreeMap<(u32, String), Vec<AntiPattern>> = BTreeMap::new();

        for rule in self.rules.values() {
            if let Some(topic) = &topic {
                if !rule.prefix.to_lowercase().contains(topic.as_str())
                    && !rule.tag_text().contains(topic.as_str())
                {
                    continue;
                }
            }

            let (order, category) = match self.section_for_rule(rule) {
                Some(section) => (section.number, section.name.clone()),
                None => (u32::MAX, OTHER_CATEGORY.to_string()),
            };
            let patterns = extract_anti_patterns(rule, &category);
            if !patterns.is_empty() {
                grouped.entry((order, category)).or_default().extend(patterns);
            }
        }

        grouped
            .into_iter()
            .map(|((_, category), patterns)| AntiPatternGroup { category, patterns })
            .collect()
    }

    /// First `language` block of the rule behind `pattern`, else its first block of any
    /// language.
    pub fn get_code_example(&self, pattern: &str, language: &str) -> Option<CodeExample> {
        let normalized = normalize_pattern(pattern);
        let topic = aliases::pattern_topic(&normalized);
        let rule = self.get_rule_by_topic(topic)?;

        let lines: Vec<&str> = rule.content.lines().collect();
        let blocks = markdown::code_blocks(&lines);
        let language = language.trim().to_lowercase();
        let block = blocks
            .iter()
            .find(|block| block.language.eq_ignore_ascii_case(&language))
            .or_else(|| blocks.first())?;

        let description = if rule.summary.is_empty() {
            rule.impact_description.clone()
        } else {
            rule.summary.clone()
        };
        let block_language = if block.language.is_empty() {
            language
        } else {
            block.language.to_string()
        };

        Some(CodeExample {
            title: rule.title.clone(),
            description,
            code: block.code.trim().to_string(),
            language: block_language,
            notes: extract_notes(&rule.content),
            references: extract_references(&rule.content),
        })
    }

    /// Pattern names with a dedicated code example alias
    pub fn list_code_examples(&self) -> &'static [&'static str] {
        aliases::CODE_EXAMPLE_PATTERNS
    }
}
