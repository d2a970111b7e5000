//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface that each product (mf, mf-federation)
//! must implement to configure the scaffolding behavior for their
//! specific needs.

use crate::answers::TemplateKind;
use std::path::Path;

/// Configuration trait for different CLI products
///
/// Each product (mf, mf-federation) implements this trait to define:
/// - Product identity (name, display name)
/// - Template directory location
/// - Offered template variants and prompt defaults
/// - Documentation links
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default directory holding this product's template trees,
    /// relative to the invocation directory
    fn default_template_dir(&self) -> &'static str;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Template variants the prompt offers. Empty means the product has a
    /// single template and asks no variant question.
    fn template_kinds(&self) -> &'static [TemplateKind];

    /// Default answer for the project-name prompt
    fn default_app_name(&self) -> &'static str {
        "mf-example"
    }

    /// Default answer for the port prompt
    fn default_port(&self) -> &'static str {
        "3001"
    }

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, port: &str) -> Vec<String>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;
}
