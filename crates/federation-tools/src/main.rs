//! MF Federation CLI - Scaffolding for Module Federation microfrontends

use anyhow::Result;
use clap::{Parser, Subcommand};
use mf_scaffold_core::tui::CreateArgs;
use mf_scaffold_core::{ProductConfig, TemplateKind};
use std::path::{Path, PathBuf};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MF Federation product configuration
#[derive(Clone)]
pub struct FederationConfig;

impl ProductConfig for FederationConfig {
    fn name(&self) -> &'static str {
        "mf-federation"
    }

    fn display_name(&self) -> &'static str {
        "MF Federation"
    }

    fn default_template_dir(&self) -> &'static str {
        "templates/federation"
    }

    fn template_dir_env(&self) -> &'static str {
        "MF_FEDERATION_TEMPLATE_DIR"
    }

    fn template_kinds(&self) -> &'static [TemplateKind] {
        &[TemplateKind::Provider, TemplateKind::Consumer]
    }

    fn docs_url(&self) -> &'static str {
        "https://module-federation.io/guide/start/"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding Module Federation microfrontends"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install federation-tools --force"
    }

    fn next_steps(&self, dir: &Path, port: &str) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_ref() != Some(&dir.to_path_buf()) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Start dev server
        steps.push("pnpm dev".to_string());
        steps.push(format!(
            "Open http://localhost:{} and check the exposed modules",
            port
        ));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "federation-tools")]
#[command(about = "CLI for scaffolding Module Federation microfrontends")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new federated microfrontend
    Create(CliCreateArgs),
    /// Dry-run every template into scratch space (for development use)
    Smoke(SmokeArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory to use for templates instead of the bundled set (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Base directory to create the project under
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Microfrontend name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Port the app runs on
    #[arg(short, long)]
    pub port: Option<String>,

    /// Template variant to scaffold
    #[arg(short = 't', long = "template-type", value_enum)]
    pub template_type: Option<TemplateKind>,

    /// Skip the tool availability check
    #[arg(long = "skip-tool-check")]
    pub skip_tool_check: bool,

    /// Stop the bootstrap sequence at the first failed step
    #[arg(long = "halt-on-failure")]
    pub halt_on_failure: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            directory: args.directory,
            name: args.name,
            port: args.port,
            template: args.template_type,
            skip_tool_check: args.skip_tool_check,
            halt_on_failure: args.halt_on_failure,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct SmokeArgs {
    /// Local directory containing the templates to check (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = FederationConfig;

    match args.command {
        Some(Command::Create(create_args)) => {
            let result = mf_scaffold_core::run(&config, create_args.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::Smoke(smoke_args)) => {
            mf_scaffold_core::templates::smoke_templates(&config, &smoke_args.template_dir).await
        }
        None => {
            // No subcommand provided, default to create behavior (interactive mode)
            let result =
                mf_scaffold_core::run(&config, CreateArgs::default(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
