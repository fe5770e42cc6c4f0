//! Knowledge index: loads the registry and rule documents once and owns every
//! section, rule and derived index for the lifetime of the process.

use crate::config::KnowledgeConfig;
use crate::error::{KnowledgeError, Result};
use crate::guide;
use crate::model::{Rule, Section};
use crate::parser::parse_rule;
use crate::registry::parse_sections;
use std::collections::BTreeMap;
use std::path::Path;

/// One raw rule document and its storage identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDocument {
    pub id: String,
    pub text: String,
}

impl RuleDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Supplies the raw documents the index is built from.
pub trait DocumentSource {
    /// The section registry document, if present
    fn registry(&self) -> Option<String>;

    /// Every rule document, in the order rules should be registered
    fn rule_documents(&self) -> Vec<RuleDocument>;

    /// A precompiled guide, if present
    fn compiled_guide(&self) -> Option<String>;
}

/// Reads documents from the directory layout described by a [`KnowledgeConfig`].
pub struct DirectorySource<'a> {
    config: &'a KnowledgeConfig,
}

impl<'a> DirectorySource<'a> {
    pub fn new(config: &'a KnowledgeConfig) -> Self {
        Self { config }
    }
}

fn read_optional(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}

impl DocumentSource for DirectorySource<'_> {
    fn registry(&self) -> Option<String> {
        read_optional(&self.config.registry_path())
    }

    fn rule_documents(&self) -> Vec<RuleDocument> {
        let rules_dir = self.config.rules_dir();
        let entries = match std::fs::read_dir(&rules_dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Rules directory {} unavailable: {}", rules_dir.display(), e);
                return Vec::new();
            }
        };

        let mut paths: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| !self.config.is_reserved(name))
            })
            .collect();
        paths.sort();

        paths
            .iter()
            .filter_map(|path| {
                let id = path.file_stem()?.to_str()?.to_string();
                let text = read_optional(path)?;
                Some(RuleDocument { id, text })
            })
            .collect()
    }

    fn compiled_guide(&self) -> Option<String> {
        read_optional(&self.config.guide_path())
    }
}

/// In-memory documents, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub registry: Option<String>,
    pub rules: Vec<RuleDocument>,
    pub guide: Option<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(mut self, text: impl Into<String>) -> Self {
        self.registry = Some(text.into());
        self
    }

    pub fn with_rule(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.rules.push(RuleDocument::new(id, text));
        self
    }

    pub fn with_guide(mut self, text: impl Into<String>) -> Self {
        self.guide = Some(text.into());
        self
    }
}

impl DocumentSource for MemorySource {
    fn registry(&self) -> Option<String> {
        self.registry.clone()
    }

    fn rule_documents(&self) -> Vec<RuleDocument> {
        self.rules.clone()
    }

    fn compiled_guide(&self) -> Option<String> {
        self.guide.clone()
    }
}

/// Read-only knowledge base shared by every request handler.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    config: KnowledgeConfig,
    pub(crate) sections: BTreeMap<String, Section>,
    pub(crate) rules: BTreeMap<String, Rule>,
    pub(crate) rules_by_tag: BTreeMap<String, Vec<String>>,
    full_guide: String,
}

impl KnowledgeBase {
    /// Best-effort load from disk: missing files degrade to empty collections.
    pub fn load(config: KnowledgeConfig) -> Self {
        let source = DirectorySource::new(&config);
        let registry = source.registry();
        let rules = source.rule_documents();
        let guide = source.compiled_guide();
        Self::build(config, registry, rules, guide)
    }

    /// Like [`Self::load`], but the section registry must exist.
    pub fn load_strict(config: KnowledgeConfig) -> Result<Self> {
        let registry_path = config.registry_path();
        if !registry_path.is_file() {
            return Err(KnowledgeError::MissingRegistry(registry_path));
        }
        Ok(Self::load(config))
    }

    pub fn from_source(config: KnowledgeConfig, source: &impl DocumentSource) -> Self {
        Self::build(
            config,
            source.registry(),
            source.rule_documents(),
            source.compiled_guide(),
        )
    }

    fn build(
        config: KnowledgeConfig,
        registry: Option<String>,
        documents: Vec<RuleDocument>,
        compiled_guide: Option<String>,
    ) -> Self {
        let sections = registry.as_deref().map(parse_sections).unwrap_or_default();
        let mut kb = Self {
            config,
            sections,
            rules: BTreeMap::new(),
            rules_by_tag: BTreeMap::new(),
            full_guide: String::new(),
        };

        for document in documents {
            match parse_rule(&document.id, &document.text) {
                Ok(rule) => kb.insert_rule(rule),
                Err(e) => log::warn!("Skipping rule document '{}': {}", document.id, e),
            }
        }

        kb.full_guide = match compiled_guide {
            Some(text) => text,
            None => guide::synthesize(&kb),
        };

        log::info!(
            "Loaded {} sections and {} rules",
            kb.sections.len(),
            kb.rules.len()
        );
        kb
    }

    fn insert_rule(&mut self, mut rule: Rule) {
        if self.rules.contains_key(&rule.prefix) {
            log::warn!("Duplicate rule '{}' ignored", rule.prefix);
            return;
        }

        for tag in &rule.tags {
            self.rules_by_tag
                .entry(tag.clone())
                .or_default()
                .push(rule.prefix.clone());
        }

        match section_prefix_for(&self.sections, &rule.prefix).map(str::to_string) {
            Some(section_prefix) => {
                if let Some(section) = self.sections.get_mut(&section_prefix) {
                    section.rules.push(rule.prefix.clone());
                    rule.section_number = Some(section.number);
                }
            }
            None => log::warn!(
                "Unknown section prefix '{}' for rule '{}'",
                leading_token(&rule.prefix),
                rule.prefix
            ),
        }

        self.rules.insert(rule.prefix.clone(), rule);
    }

    pub fn config(&self) -> &KnowledgeConfig {
        &self.config
    }

    /// All sections keyed by prefix
    pub fn sections(&self) -> &BTreeMap<String, Section> {
        &self.sections
    }

    /// All rules keyed by prefix
    pub fn rules(&self) -> &BTreeMap<String, Rule> {
        &self.rules
    }

    pub fn rule(&self, prefix: &str) -> Option<&Rule> {
        self.rules.get(prefix)
    }

    /// The precompiled guide, or the one synthesized at load time.
    pub fn full_guide(&self) -> &str {
        &self.full_guide
    }

    /// Builds the guide from the indexed sections and rules, ignoring any precompiled copy.
    pub fn synthesize_guide(&self) -> String {
        guide::synthesize(self)
    }

    /// Section prefix a rule prefix belongs to
    pub fn section_prefix_for(&self, rule_prefix: &str) -> Option<&str> {
        section_prefix_for(&self.sections, rule_prefix)
    }
}

fn leading_token(prefix: &str) -> &str {
    prefix.split('-').next().unwrap_or(prefix)
}

/// Leading `-` token of `rule_prefix`, preferring the two-token compound
/// (`semantic-cache`) when that names a section.
fn section_prefix_for<'a>(
    sections: &'a BTreeMap<String, Section>,
    rule_prefix: &str,
) -> Option<&'a str> {
    let mut tokens = rule_prefix.split('-');
    let first = tokens.next()?;
    if let Some(second) = tokens.next() {
        let compound = format!("{first}-{second}");
        if let Some((key, _)) = sections.get_key_value(&compound) {
            return Some(key.as_str());
        }
    }
    sections.get_key_value(first).map(|(key, _)| key.as_str())
}
