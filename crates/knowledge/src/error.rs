use std::path::PathBuf;
use thiserror::Error;

/// Result type for knowledge base operations
pub type Result<T> = std::result::Result<T, KnowledgeError>;

/// Reasons a single rule document yields no rule.
///
/// These are never fatal to loading: the loader logs them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The document does not open with a `---` marker line
    #[error("document does not start with a frontmatter block")]
    MissingFrontmatter,

    /// The opening marker has no matching closing marker
    #[error("frontmatter block is not terminated")]
    UnterminatedFrontmatter,

    /// A required frontmatter field is absent or empty
    #[error("missing required frontmatter field '{0}'")]
    MissingField(&'static str),
}

/// Errors surfaced by the knowledge crate
#[derive(Error, Debug)]
pub enum KnowledgeError {
    /// IO error while reading a document or config file
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Strict loading requires the section registry
    #[error("Section registry not found at {0}")]
    MissingRegistry(PathBuf),

    /// A tool call named an operation that does not exist
    #[error("Unknown tool: {0}")]
    UnknownOperation(String),

    /// A tool call omitted a required argument
    #[error("Missing required argument '{0}'")]
    MissingArgument(&'static str),

    /// Config file is not valid TOML for [`crate::KnowledgeConfig`]
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl KnowledgeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
