//! Detection of the tools the bootstrap sequence shells out to

use std::process::Command;

/// Probe result for a single external tool
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(name: &'static str, binary: &str) -> ToolInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            ToolInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => ToolInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if git is available
pub fn check_git() -> ToolInfo {
    probe("git", "git")
}

/// Check if pnpm is available
pub fn check_pnpm() -> ToolInfo {
    probe("pnpm", "pnpm")
}

/// Check if Node.js is available
pub fn check_node() -> ToolInfo {
    probe("Node.js", "node")
}

/// Probe every tool the bootstrap sequence relies on.
///
/// Purely advisory: a missing tool shows up here as a warning and later
/// as a failed bootstrap step. The report never stops the scaffold.
pub fn check_bootstrap_tools() -> Vec<ToolInfo> {
    vec![check_git(), check_node(), check_pnpm()]
}
