//! External tool detection, installation, and the bootstrap sequence
//!
//! This module provides:
//! - Detection of the tools bootstrap shells out to (git, Node.js, pnpm)
//! - Generic tool management for CLI tools like pnpm
//! - The post-copy bootstrap runner

pub mod bootstrap;
pub mod check;
pub mod tool;

pub use bootstrap::{
    run_steps, standard_steps, BootstrapStep, CapturedOutput, FailurePolicy, StepOutcome,
    StepStatus, COMMIT_MESSAGE,
};
pub use check::{check_bootstrap_tools, check_git, check_node, check_pnpm, ToolInfo};
pub use tool::{pnpm_tool, ToolManager};
