//! MF Scaffold Core - Shared library for microfrontend scaffolding CLIs
//!
//! This library turns local template trees into ready-to-hack microfrontend
//! projects. It is designed to be used by multiple CLI binaries (e.g., `mf`,
//! `mf-federation`) that share the same scaffolding logic but offer
//! different template sets.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Template resolution, placeholder
//!   rendering, layered copying, and the bootstrap step runner
//! - **Layer 2: Workflow Orchestration** - The `ProductConfig` trait that
//!   binds a binary's identity, defaults, and template variants together
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use mf_scaffold_core::{templates, ProductConfig, RenderVars};
//!
//! // Define your product config
//! #[derive(Clone)]
//! struct MyConfig;
//! impl ProductConfig for MyConfig {
//!     fn name(&self) -> &'static str { "myapp" }
//!     // ... implement other methods
//! }
//!
//! // Use the low-level APIs
//! let source = templates::TemplateSource::resolve(&MyConfig, &None)?;
//! let manifest = source.root_manifest()?;
//! ```

pub mod answers;
pub mod error;
pub mod product;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{Answers, SupportedTemplate, TemplateKind};
pub use error::{ScaffoldError, ScaffoldResult};
pub use product::ProductConfig;
pub use runtime::{
    run_steps, standard_steps, CapturedOutput, FailurePolicy, StepOutcome, StepStatus,
};
pub use templates::{
    copy_template, sanitize_app_name, RenderVars, RootManifest, TemplateManifest, TemplateSource,
};

#[cfg(feature = "tui")]
pub use tui::run;

/// CLI version - used for template compatibility checking.
/// Each binary should define its own version, but this provides a fallback.
pub const DEFAULT_CLI_VERSION: &str = "0.1.0";
