use crate::error::{KnowledgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a TOML config file
pub const CONFIG_ENV: &str = "REDIS_PRACTICES_CONFIG";
/// Environment variable overriding [`KnowledgeConfig::knowledge_dir`]
pub const KNOWLEDGE_DIR_ENV: &str = "REDIS_PRACTICES_KNOWLEDGE_DIR";
/// Environment variable overriding [`KnowledgeConfig::search_result_limit`]
pub const SEARCH_LIMIT_ENV: &str = "REDIS_PRACTICES_SEARCH_LIMIT";

/// Where the corpus lives and how query output is bounded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Directory holding the rules directory and the compiled guide
    pub knowledge_dir: PathBuf,

    /// Name of the rules directory inside `knowledge_dir`
    pub rules_dir_name: String,

    /// Section registry file inside the rules directory
    pub registry_file: String,

    /// Precompiled guide inside `knowledge_dir`
    pub guide_file: String,

    /// Rule files whose name starts with this marker are not rules
    pub reserved_marker: String,

    /// Maximum matches rendered by `search_best_practices`
    pub search_result_limit: usize,

    /// Language used by `get_code_example` when none is requested
    pub default_language: String,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            knowledge_dir: PathBuf::from("knowledge"),
            rules_dir_name: "rules".to_string(),
            registry_file: "_sections.md".to_string(),
            guide_file: "AGENTS.md".to_string(),
            reserved_marker: "_".to_string(),
            search_result_limit: 5,
            default_language: "python".to_string(),
        }
    }
}

impl KnowledgeConfig {
    /// Config rooted at `dir` with every other value defaulted
    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            knowledge_dir: dir.into(),
            ..Default::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| KnowledgeError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Defaults, then the config file (`explicit` or `$REDIS_PRACTICES_CONFIG`), then
    /// environment overrides.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Applies environment overrides read through `lookup`.
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dir) = lookup(KNOWLEDGE_DIR_ENV) {
            let dir = dir.trim();
            if !dir.is_empty() {
                self.knowledge_dir = PathBuf::from(dir);
            }
        }
        if let Some(limit) = lookup(SEARCH_LIMIT_ENV) {
            self.search_result_limit = limit.trim().parse().map_err(|_| {
                KnowledgeError::invalid_config(format!("{SEARCH_LIMIT_ENV} must be a number, got '{limit}'"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Falls back to the corpus bundled with the source tree when `knowledge_dir` is missing.
    pub fn with_bundled_fallback(mut self) -> Self {
        if self.knowledge_dir.is_dir() {
            return self;
        }
        let bundled = bundled_knowledge_dir();
        if bundled.is_dir() {
            log::info!(
                "Knowledge directory {} not found, using bundled corpus at {}",
                self.knowledge_dir.display(),
                bundled.display()
            );
            self.knowledge_dir = bundled;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.search_result_limit == 0 {
            return Err(KnowledgeError::invalid_config(
                "search_result_limit must be > 0",
            ));
        }
        for (field, value) in [
            ("rules_dir_name", &self.rules_dir_name),
            ("registry_file", &self.registry_file),
            ("guide_file", &self.guide_file),
            ("default_language", &self.default_language),
        ] {
            if value.trim().is_empty() {
                return Err(KnowledgeError::invalid_config(format!(
                    "{field} must not be empty"
                )));
            }
        }
        Ok(())
    }

    pub fn rules_dir(&self) -> PathBuf {
        self.knowledge_dir.join(&self.rules_dir_name)
    }

    pub fn registry_path(&self) -> PathBuf {
        self.rules_dir().join(&self.registry_file)
    }

    pub fn guide_path(&self) -> PathBuf {
        self.knowledge_dir.join(&self.guide_file)
    }

    /// Whether a rules-directory entry is reserved (registry, drafts) rather than a rule
    pub fn is_reserved(&self, file_name: &str) -> bool {
        !self.reserved_marker.is_empty() && file_name.starts_with(&self.reserved_marker)
    }
}

/// `knowledge/` at the workspace root
pub fn bundled_knowledge_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("knowledge")
}
