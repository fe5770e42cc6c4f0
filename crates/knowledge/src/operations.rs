//! Tool-call dispatch: an operation name plus string arguments in, markdown text out.

use crate::error::{KnowledgeError, Result};
use crate::index::KnowledgeBase;
use crate::render;
use std::collections::BTreeMap;

/// One request against the knowledge base
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    GetBestPractice { topic: String },
    ListTopics { category: Option<String> },
    SearchBestPractices { query: String },
    GetAntiPatterns { topic: Option<String> },
    GetCodeExample { pattern: String, language: Option<String> },
    GetFullGuide,
}

impl Operation {
    /// Every operation name, in catalog order
    pub const NAMES: [&'static str; 6] = [
        "get_best_practice",
        "list_topics",
        "search_best_practices",
        "get_anti_patterns",
        "get_code_example",
        "get_full_guide",
    ];

    /// Builds an operation from a tool name and its arguments.
    pub fn parse(name: &str, args: &BTreeMap<String, String>) -> Result<Self> {
        let optional = |key: &str| args.get(key).cloned();
        let required = |key: &'static str| {
            args.get(key)
                .cloned()
                .ok_or(KnowledgeError::MissingArgument(key))
        };

        let op = match name {
            "get_best_practice" => Self::GetBestPractice {
                topic: required("topic")?,
            },
            "list_topics" => Self::ListTopics {
                category: optional("category"),
            },
            "search_best_practices" => Self::SearchBestPractices {
                query: required("query")?,
            },
            "get_anti_patterns" => Self::GetAntiPatterns {
                topic: optional("topic"),
            },
            "get_code_example" => Self::GetCodeExample {
                pattern: required("pattern")?,
                language: optional("language"),
            },
            "get_full_guide" => Self::GetFullGuide,
            other => return Err(KnowledgeError::UnknownOperation(other.to_string())),
        };
        Ok(op)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GetBestPractice { .. } => "get_best_practice",
            Self::ListTopics { .. } => "list_topics",
            Self::SearchBestPractices { .. } => "search_best_practices",
            Self::GetAntiPatterns { .. } => "get_anti_patterns",
            Self::GetCodeExample { .. } => "get_code_example",
            Self::GetFullGuide => "get_full_guide",
        }
    }

    /// Runs the operation. Lookup misses render as helpful text, never as errors.
    pub fn execute(&self, kb: &KnowledgeBase) -> String {
        log::debug!("Executing {}", self.name());
        match self {
            Self::GetBestPractice { topic } => render::best_practice(kb, topic),
            Self::ListTopics { category } => render::topics(kb, category.as_deref()),
            Self::SearchBestPractices { query } => render::search(kb, query),
            Self::GetAntiPatterns { topic } => render::anti_patterns(kb, topic.as_deref()),
            Self::GetCodeExample { pattern, language } => {
                render::code_example(kb, pattern, language.as_deref())
            }
            Self::GetFullGuide => render::full_guide(kb),
        }
    }
}

/// Parses and executes a tool call in one step.
pub fn call(kb: &KnowledgeBase, name: &str, args: &BTreeMap<String, String>) -> Result<String> {
    Operation::parse(name, args).map(|op| op.execute(kb))
}
