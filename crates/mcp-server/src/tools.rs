//! MCP tool surface for the Redis best-practices knowledge base.
//!
//! Each tool maps onto one [`Operation`]. Operations run on the blocking pool so a panic in
//! one call becomes an error result instead of taking the server down.

use redis_practices_knowledge::{KnowledgeBase, Operation};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use std::sync::Arc;

/// Redis Best Practices MCP Service
#[derive(Clone)]
pub struct RedisPracticesService {
    kb: Arc<KnowledgeBase>,
    tool_router: ToolRouter<Self>,
}

impl RedisPracticesService {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self {
            kb,
            tool_router: Self::tool_router(),
        }
    }

    async fn run(&self, op: Operation) -> Result<CallToolResult, McpError> {
        let kb = Arc::clone(&self.kb);
        let name = op.name();
        match tokio::task::spawn_blocking(move || op.execute(&kb)).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => {
                log::error!("Error executing tool {name}: {e}");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error: {e}"
                ))]))
            }
        }
    }
}

// ============================================================================
// Tool Input Schemas
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetBestPracticeRequest {
    /// Topic to look up
    #[schemars(
        description = "Rule id (e.g. 'conn-pooling'), a topic alias such as 'pipelining' or 'ttl', or free text"
    )]
    pub topic: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListTopicsRequest {
    /// Optional category filter
    #[schemars(
        description = "Section prefix or alias (e.g. 'conn', 'connection', 'vector', 'security'). Omit to list everything."
    )]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    #[schemars(description = "Keywords to search for in titles, tags, and content")]
    pub query: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AntiPatternsRequest {
    #[schemars(
        description = "Optional section prefix, alias, or rule id to narrow the anti-patterns returned"
    )]
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CodeExampleRequest {
    #[schemars(
        description = "Pattern name (e.g. 'connection-pool', 'pipeline', 'cache-aside', 'vector-search')"
    )]
    pub pattern: String,

    #[schemars(description = "Language of the example (default: python)")]
    pub language: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct FullGuideRequest {}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl RedisPracticesService {
    /// Full rule markdown for a topic
    #[tool(
        description = "Get the full best-practice rule for a Redis topic. Accepts rule ids, short aliases, or free text (falls back to the best search match)."
    )]
    pub async fn get_best_practice(
        &self,
        Parameters(request): Parameters<GetBestPracticeRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(Operation::GetBestPractice {
            topic: request.topic,
        })
        .await
    }

    #[tool(
        description = "List best-practice topics grouped by section, with impact levels. Optionally filter by category."
    )]
    pub async fn list_topics(
        &self,
        Parameters(request): Parameters<ListTopicsRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(Operation::ListTopics {
            category: request.category,
        })
        .await
    }

    #[tool(
        description = "Search Redis best practices by keyword. Results are ranked by relevance (title, tags, then content)."
    )]
    pub async fn search_best_practices(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(Operation::SearchBestPractices {
            query: request.query,
        })
        .await
    }

    #[tool(
        description = "Show common Redis anti-patterns with the incorrect code and the corrected version, grouped by section."
    )]
    pub async fn get_anti_patterns(
        &self,
        Parameters(request): Parameters<AntiPatternsRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(Operation::GetAntiPatterns {
            topic: request.topic,
        })
        .await
    }

    #[tool(
        description = "Get a focused code example for a Redis pattern in a given language (python by default)."
    )]
    pub async fn get_code_example(
        &self,
        Parameters(request): Parameters<CodeExampleRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(Operation::GetCodeExample {
            pattern: request.pattern,
            language: request.language,
        })
        .await
    }

    #[tool(description = "Get the complete compiled Redis best-practices guide.")]
    pub async fn get_full_guide(
        &self,
        Parameters(_request): Parameters<FullGuideRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.run(Operation::GetFullGuide).await
    }
}

#[tool_handler]
impl ServerHandler for RedisPracticesService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Redis Best Practices gives AI agents curated guidance for building Redis applications. Use 'list_topics' to browse, 'search_best_practices' for keywords, 'get_best_practice' for a full rule, 'get_anti_patterns' and 'get_code_example' for code, and 'get_full_guide' for everything.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}
