//! Redis Best Practices MCP Server
//!
//! Serves the Redis best-practices knowledge base to AI agents over MCP (stdio).
//!
//! ## Tools
//!
//! - `get_best_practice` - Full rule for a topic (falls back to search)
//! - `list_topics` - Browse sections and their rules, optionally by category
//! - `search_best_practices` - Keyword search ranked by relevance
//! - `get_anti_patterns` - Incorrect/correct code pairs grouped by section
//! - `get_code_example` - Focused example for a pattern in a language
//! - `get_full_guide` - The compiled guide
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "redis-best-practices": {
//!       "command": "redis-practices-mcp"
//!     }
//!   }
//! }
//! ```
//!
//! The knowledge directory comes from `REDIS_PRACTICES_KNOWLEDGE_DIR`, a TOML file named by
//! `REDIS_PRACTICES_CONFIG`, or the corpus bundled with the workspace.

use anyhow::Result;
use redis_practices_knowledge::{KnowledgeBase, KnowledgeConfig};
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use std::sync::Arc;

mod tools;

use tools::RedisPracticesService;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol; logs go to stderr only
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting Redis Best Practices MCP server");

    let config = KnowledgeConfig::resolve(None)?.with_bundled_fallback();
    let kb = KnowledgeBase::load(config);
    log::info!(
        "Loaded {} rules across {} sections",
        kb.rules().len(),
        kb.sections().len()
    );

    let service = RedisPracticesService::new(Arc::new(kb));
    let server = service.serve(stdio()).await?;

    server.waiting().await?;

    log::info!("Redis Best Practices MCP server stopped");
    Ok(())
}
