//! Query engine: topic lookup, lexical search and category listing.

use crate::aliases;
use crate::index::KnowledgeBase;
use crate::model::{Rule, Section};
use std::collections::HashSet;

const TITLE_SUBSTRING: u32 = 10;
const TITLE_WORD: u32 = 5;
const TAG_SUBSTRING: u32 = 3;
const TAG_WORD: u32 = 2;
const BODY_SUBSTRING: u32 = 1;
const IMPACT_SUBSTRING: u32 = 2;

/// A rule with its lexical relevance score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub rule: &'a Rule,
    pub score: u32,
}

/// Lexical relevance of `rule` for `query`; 0 means no match.
pub fn score_rule(rule: &Rule, query: &str) -> u32 {
    let query = query.to_lowercase();
    let query_words: HashSet<&str> = query.split_whitespace().collect();
    let mut score = 0;

    let title = rule.title.to_lowercase();
    if title.contains(&query) {
        score += TITLE_SUBSTRING;
    }
    let title_words: HashSet<&str> = title.split_whitespace().collect();
    score += TITLE_WORD * query_words.intersection(&title_words).count() as u32;

    for tag in &rule.tags {
        let tag = tag.to_lowercase();
        if tag.contains(&query) {
            score += TAG_SUBSTRING;
        }
        if query_words.contains(tag.as_str()) {
            score += TAG_WORD;
        }
    }

    if rule.content.to_lowercase().contains(&query) {
        score += BODY_SUBSTRING;
    }
    if rule.impact_description.to_lowercase().contains(&query) {
        score += IMPACT_SUBSTRING;
    }

    score
}

impl KnowledgeBase {
    /// Exact rule key, else the first `<category prefix><topic>` key that exists.
    pub fn get_rule_by_topic(&self, topic: &str) -> Option<&Rule> {
        if let Some(rule) = self.rules.get(topic) {
            return Some(rule);
        }
        aliases::TOPIC_PREFIXES
            .iter()
            .find_map(|prefix| self.rules.get(&format!("{prefix}{topic}")))
    }

    /// Rules with a non-zero score, best first.
    ///
    /// Equal scores keep rule-prefix order. A blank query matches nothing.
    pub fn search_rules(&self, query: &str) -> Vec<SearchHit<'_>> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<SearchHit<'_>> = self
            .rules
            .values()
            .filter_map(|rule| {
                let score = score_rule(rule, query);
                (score > 0).then_some(SearchHit { rule, score })
            })
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score));
        hits
    }

    /// All rule prefixes, sorted
    pub fn list_all_topics(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    /// Sections by ordinal, optionally narrowed to one category (aliases allowed).
    pub fn get_sections(&self, category: Option<&str>) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self.sections.values().collect();
        sections.sort_by_key(|section| section.number);

        match category.map(|c| c.trim().to_lowercase()) {
            Some(category) if !category.is_empty() => {
                let prefix = aliases::category_prefix(&category);
                sections.retain(|section| section.prefix == prefix);
                sections
            }
            _ => sections,
        }
    }

    /// Rules carrying `tag`, in load order
    pub fn rules_with_tag(&self, tag: &str) -> Vec<&Rule> {
        self.rules_by_tag
            .get(tag)
            .map(|prefixes| prefixes.iter().filter_map(|p| self.rules.get(p)).collect())
            .unwrap_or_default()
    }

    /// Rules assigned to `section`, in load order
    pub fn section_rules(&self, section: &Section) -> Vec<&Rule> {
        section
            .rules
            .iter()
            .filter_map(|prefix| self.rules.get(prefix))
            .collect()
    }

    pub fn section_for_rule(&self, rule: &Rule) -> Option<&Section> {
        self.section_prefix_for(&rule.prefix)
            .and_then(|prefix| self.sections.get(prefix))
    }
}
