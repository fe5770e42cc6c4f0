use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use redis_practices_knowledge::{call, render, KnowledgeBase, KnowledgeConfig, Operation};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "redis-practices")]
#[command(about = "Redis best practices for AI agents and humans", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Knowledge directory (overrides config file and REDIS_PRACTICES_KNOWLEDGE_DIR)
    #[arg(long, global = true)]
    knowledge_dir: Option<PathBuf>,

    /// TOML config file (overrides REDIS_PRACTICES_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the rule files into a single guide (AGENTS.md)
    Build(BuildArgs),

    /// Show the full rule for a topic
    Get {
        /// Rule id, alias, or free text
        topic: String,
    },

    /// List topics grouped by section
    Topics(TopicsArgs),

    /// Search best practices by keyword
    Search {
        /// Search query
        query: String,
    },

    /// Show anti-patterns with corrected code
    #[command(name = "anti-patterns")]
    AntiPatterns {
        /// Section prefix, alias, or rule id
        #[arg(long)]
        topic: Option<String>,
    },

    /// Show a code example for a pattern
    Example {
        /// Pattern name (e.g. pipeline, cache-aside)
        pattern: String,

        /// Example language (defaults to the configured language)
        #[arg(long, short = 'l')]
        language: Option<String>,
    },

    /// Print the compiled guide
    Guide,

    /// Invoke a tool by name, exactly as the MCP server would
    Call(CallArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Rules directory (defaults to <knowledge-dir>/rules)
    #[arg(long)]
    rules_dir: Option<PathBuf>,

    /// Output file (defaults to <knowledge-dir>/AGENTS.md)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct TopicsArgs {
    /// Section prefix or alias
    #[arg(long)]
    category: Option<String>,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CallArgs {
    /// Tool name (e.g. get_best_practice)
    name: String,

    /// Tool argument as key=value (repeatable)
    #[arg(long = "arg", value_parser = parse_key_value)]
    args: Vec<(String, String)>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let json_output = matches!(&cli.command, Commands::Topics(args) if args.json);

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet || json_output {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Build(args) => run_build(config, args)?,
        Commands::Get { topic } => print(Operation::GetBestPractice { topic }, config),
        Commands::Topics(args) => run_topics(config, args)?,
        Commands::Search { query } => print(Operation::SearchBestPractices { query }, config),
        Commands::AntiPatterns { topic } => print(Operation::GetAntiPatterns { topic }, config),
        Commands::Example { pattern, language } => {
            print(Operation::GetCodeExample { pattern, language }, config)
        }
        Commands::Guide => print(Operation::GetFullGuide, config),
        Commands::Call(args) => run_call(config, args)?,
    }

    Ok(())
}

/// Config file and environment first, then `--knowledge-dir`.
fn resolve_config(cli: &Cli) -> Result<KnowledgeConfig> {
    let mut config =
        KnowledgeConfig::resolve(cli.config.as_deref()).context("Failed to load configuration")?;
    match &cli.knowledge_dir {
        Some(dir) => config.knowledge_dir = dir.clone(),
        None => config = config.with_bundled_fallback(),
    }
    log::debug!("Knowledge directory: {}", config.knowledge_dir.display());
    Ok(config)
}

fn print(op: Operation, config: KnowledgeConfig) {
    let kb = KnowledgeBase::load(config);
    println!("{}", op.execute(&kb));
}

fn run_build(mut config: KnowledgeConfig, args: BuildArgs) -> Result<()> {
    if let Some(rules_dir) = &args.rules_dir {
        point_at_rules_dir(&mut config, rules_dir)?;
    }
    let output = args.output.unwrap_or_else(|| config.guide_path());

    log::info!("Building {} from {}", output.display(), config.rules_dir().display());
    let kb = KnowledgeBase::load_strict(config)?;
    log::info!(
        "Loaded {} sections and {} rules",
        kb.sections().len(),
        kb.rules().len()
    );

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&output, kb.synthesize_guide())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Generated {}", output.display());
    println!("\nSummary:");
    for section in kb.get_sections(None) {
        println!(
            "  {}. {}: {} rules",
            section.number,
            section.name,
            kb.section_rules(section).len()
        );
    }
    Ok(())
}

/// `--rules-dir a/b/rules` means knowledge dir `a/b` with rules under `rules`.
fn point_at_rules_dir(config: &mut KnowledgeConfig, rules_dir: &Path) -> Result<()> {
    let name = rules_dir
        .file_name()
        .with_context(|| format!("Invalid rules directory: {}", rules_dir.display()))?;
    config.rules_dir_name = name.to_string_lossy().into_owned();
    config.knowledge_dir = rules_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(())
}

fn run_topics(config: KnowledgeConfig, args: TopicsArgs) -> Result<()> {
    let kb = KnowledgeBase::load(config);
    if args.json {
        let sections = kb.get_sections(args.category.as_deref());
        println!("{}", serde_json::to_string_pretty(&sections)?);
    } else {
        println!("{}", render::topics(&kb, args.category.as_deref()));
    }
    Ok(())
}

fn run_call(config: KnowledgeConfig, args: CallArgs) -> Result<()> {
    let kb = KnowledgeBase::load(config);
    let tool_args: BTreeMap<String, String> = args.args.into_iter().collect();
    let text = call(&kb, &args.name, &tool_args)?;
    println!("{text}");
    Ok(())
}
