use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn locate_redis_practices_mcp_bin() -> Result<PathBuf> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_redis-practices-mcp") {
        return Ok(PathBuf::from(path));
    }

    // `.../target/{debug|release}/deps/<test>` → `.../target/{debug|release}/redis-practices-mcp`
    if let Ok(exe) = std::env::current_exe() {
        if let Some(target_profile_dir) = exe.parent().and_then(|p| p.parent()) {
            let candidate = target_profile_dir.join("redis-practices-mcp");
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    let repo_root = repo_root()?;
    for rel in [
        "target/debug/redis-practices-mcp",
        "target/release/redis-practices-mcp",
    ] {
        let candidate = repo_root.join(rel);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!(
        "failed to locate redis-practices-mcp binary; build with: cargo build -p redis-practices-mcp"
    )
}

pub fn repo_root() -> Result<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .map(PathBuf::from)
        .context("failed to resolve repo root from CARGO_MANIFEST_DIR")
}

pub fn bundled_knowledge_dir() -> Result<PathBuf> {
    Ok(repo_root()?.join("knowledge"))
}
