//! Tool management for external CLI tools
//!
//! Reusable abstraction for checking and installing CLI tools like pnpm,
//! or any other tool distributed via a shell install script.

use super::bootstrap::stream_output;
use anyhow::Result;
use colored::Colorize;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for installation (30 seconds)
const INSTALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a CLI tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "pnpm")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// URL to the install script
    pub install_script_url: &'static str,
    /// URL to the documentation
    pub docs_url: &'static str,
}

/// Manager for checking and installing CLI tools
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Get the install command string
    pub fn install_command(&self) -> String {
        format!("curl -fsSL {} | sh -", self.config.install_script_url)
    }

    /// Get the installed tool version (if available)
    pub fn get_version(&self) -> Option<String> {
        std::process::Command::new(self.config.name)
            .arg("--version")
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.trim().to_string())
                } else {
                    None
                }
            })
    }

    /// Install the tool using its official install script.
    /// Shows the command being executed and streams output.
    pub async fn install(&self) -> Result<()> {
        let cmd = self.install_command();
        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();

        let mut child = TokioCommand::new("sh")
            .arg("-c")
            .arg(&cmd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Stream output until the pipes close, bounded by the timeout
        if timeout(INSTALL_TIMEOUT, stream_output(&mut child))
            .await
            .is_err()
        {
            let _ = child.kill().await;
            println!();
            anyhow::bail!(
                "Installation timed out after {} seconds.\n\
                 The server may be unreachable. Please try again later or install manually:\n\
                 {}",
                INSTALL_TIMEOUT.as_secs(),
                cmd
            );
        }

        // Pipes are closed, so the process should exit promptly
        match timeout(Duration::from_secs(5), child.wait()).await {
            Ok(Ok(status)) => {
                println!();
                if status.success() {
                    Ok(())
                } else {
                    anyhow::bail!(
                        "Installation failed with exit code: {}\n\
                         Please try installing manually: {}",
                        status.code().unwrap_or(-1),
                        cmd
                    );
                }
            }
            Ok(Err(e)) => {
                anyhow::bail!("Failed to wait for installer: {}", e);
            }
            Err(_) => {
                let _ = child.kill().await;
                anyhow::bail!(
                    "Installation process hung. Please try installing manually:\n{}",
                    cmd
                );
            }
        }
    }

    /// Open the tool's documentation in the default browser
    pub fn open_docs(&self) -> Result<()> {
        println!(
            "{}",
            format!(
                "Opening {} documentation in your browser...",
                self.config.display_name
            )
            .cyan()
        );
        open::that(self.config.docs_url)?;
        Ok(())
    }
}

/// Pre-configured tool manager for pnpm
pub fn pnpm_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "pnpm",
        display_name: "pnpm",
        install_script_url: "https://get.pnpm.io/install.sh",
        docs_url: "https://pnpm.io/installation",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pnpm_install_command() {
        let manager = pnpm_tool();
        assert_eq!(
            manager.install_command(),
            "curl -fsSL https://get.pnpm.io/install.sh | sh -"
        );
    }
}
