//! # Redis Practices Knowledge
//!
//! In-memory knowledge base for the Redis best-practices corpus.
//!
//! ## Architecture
//!
//! ```text
//! knowledge/rules/_sections.md ──> registry parser ──┐
//! knowledge/rules/*.md ──────────> rule parser ──────┼──> KnowledgeBase (read-only)
//! knowledge/AGENTS.md (optional) ────────────────────┘        │
//!                                                             ├─> query engine (topic, search, sections)
//!                                                             ├─> derived views (anti-patterns, code examples)
//!                                                             └─> full guide
//! ```
//!
//! The index is built once and never mutated afterwards, so a single instance can be
//! shared across request handlers (`Arc<KnowledgeBase>`) without locking. Both
//! `redis-practices-mcp` and the `redis-practices` CLI route tool calls through
//! [`Operation`].
//!
//! ## Example
//!
//! ```rust
//! use redis_practices_knowledge::{KnowledgeBase, KnowledgeConfig, MemorySource};
//!
//! let source = MemorySource::new()
//!     .with_registry("## 3. Connection & Performance (conn)\n**Impact:** HIGH\n**Description:** Pools.\n")
//!     .with_rule("conn-pooling", "---\ntitle: Use Connection Pooling\nimpact: HIGH\n---\n## Why\n\nReuse sockets.\n");
//! let kb = KnowledgeBase::from_source(KnowledgeConfig::default(), &source);
//!
//! let rule = kb.get_rule_by_topic("pooling").unwrap();
//! assert_eq!(rule.prefix, "conn-pooling");
//! assert_eq!(kb.get_sections(Some("connection"))[0].rules, vec!["conn-pooling"]);
//! ```

pub mod aliases;
mod config;
mod error;
mod guide;
mod index;
mod markdown;
mod model;
mod operations;
mod parser;
mod query;
mod registry;
pub mod render;
mod views;

#[cfg(test)]
mod test_support;

pub use config::{
    bundled_knowledge_dir, KnowledgeConfig, CONFIG_ENV, KNOWLEDGE_DIR_ENV, SEARCH_LIMIT_ENV,
};
pub use error::{KnowledgeError, ParseError, Result};
pub use index::{DirectorySource, DocumentSource, KnowledgeBase, MemorySource, RuleDocument};
pub use model::{
    impact_badge, AntiPattern, AntiPatternGroup, CodeExample, Reference, Rule, Section,
};
pub use operations::{call, Operation};
pub use parser::parse_rule;
pub use query::{score_rule, SearchHit};
pub use registry::parse_sections;
pub use views::{extract_anti_patterns, extract_references, normalize_pattern};
