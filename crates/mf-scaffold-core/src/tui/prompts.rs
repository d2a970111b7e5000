//! Charm-style CLI prompts using cliclack

use crate::answers::{Answers, SupportedTemplate, TemplateKind};
use crate::product::ProductConfig;
use crate::runtime::bootstrap::{self, FailurePolicy};
use crate::runtime::{check, tool};
use crate::templates::manifest::RootManifest;
use crate::templates::{copier, version, RenderVars, TemplateSource};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the product default
    pub template_dir: Option<PathBuf>,

    /// Base directory to create the project under
    pub directory: Option<PathBuf>,

    /// Microfrontend name (skips the name prompt)
    pub name: Option<String>,

    /// Port the app runs on (skips the port prompt)
    pub port: Option<String>,

    /// Template variant to scaffold (skips the variant prompt)
    pub template: Option<TemplateKind>,

    /// Skip the tool availability check
    pub skip_tool_check: bool,

    /// Stop the bootstrap sequence at the first failed step
    pub halt_on_failure: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

impl Default for CreateArgs {
    fn default() -> Self {
        Self {
            template_dir: None,
            directory: None,
            name: None,
            port: None,
            template: None,
            skip_tool_check: false,
            halt_on_failure: false,
            yes: false,
        }
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Check tool availability (advisory, skippable)
    if args.skip_tool_check {
        cliclack::log::info("Skipping tool check")?;
    } else {
        handle_tool_check(&args).await?;
    }

    // Step 2: Resolve where templates come from
    let source = setup_source(config, &args.template_dir)?;
    let root_manifest = source.root_manifest()?;

    // Step 3: Collect answers (flags and --yes bypass their prompts)
    let answers = collect_answers(config, &args)?;

    // Step 4: Resolve the template; unsupported variants are rejected
    // here, before anything is written
    let template_name = select_template_name(&source, &root_manifest, &answers)?;

    let manifest = source.template_manifest(&template_name)?;
    cliclack::log::info(format!(
        "Using template: {} - {}",
        manifest.name, manifest.description
    ))?;

    // Check version compatibility. The warning names the upgrade
    // command on its second line, so it is logged whole.
    if let Some(warning) =
        version::check_compatibility(cli_version, &manifest.version, config.upgrade_command())
    {
        cliclack::log::warning(warning)?;
    }

    // Step 5: Destination is the raw (unsanitized) name under the base
    // directory
    let project_dir = resolve_project_dir(&args, &answers)?;

    // Step 6: Copy template layers with placeholder rendering
    let layers = source.layer_dirs(&root_manifest, &template_name)?;
    let vars = RenderVars::new(&answers.app_name, &answers.port);

    let spinner = cliclack::spinner();
    spinner.start("Creating project...");
    let copied_files = copier::copy_template(&layers, &project_dir, &vars).await?;
    spinner.stop(format!(
        "Created {} files in {}",
        copied_files.len(),
        project_dir.display()
    ));

    // Step 7: Bootstrap (git init, pnpm install, initial commit)
    let policy = if args.halt_on_failure {
        FailurePolicy::Halt
    } else {
        FailurePolicy::Continue
    };
    bootstrap_project(&project_dir, policy).await?;

    // Step 8: Show next steps
    print_next_steps(config, &project_dir, &answers.port)?;

    Ok(())
}

async fn handle_tool_check(args: &CreateArgs) -> Result<()> {
    let mut pnpm_missing = false;
    for info in check::check_bootstrap_tools() {
        if info.available {
            cliclack::log::success(format!(
                "{} installed ({})",
                info.name,
                info.version.as_deref().unwrap_or("unknown")
            ))?;
        } else {
            cliclack::log::warning(format!("{} is not installed", info.name))?;
            if info.name == "pnpm" {
                pnpm_missing = true;
            }
        }
    }

    // pnpm gets an install assist since the bootstrap depends on it
    if !pnpm_missing {
        return Ok(());
    }

    let tool = tool::pnpm_tool();

    // In non-interactive mode, just continue
    if args.yes {
        cliclack::log::info(format!(
            "Continuing without {} (--yes mode)",
            tool.config().display_name
        ))?;
        return Ok(());
    }

    let action: &str = cliclack::select("What would you like to do?")
        .item(
            "install",
            format!("Install {} automatically", tool.config().display_name),
            "",
        )
        .item(
            "docs",
            format!("Open documentation ({})", tool.config().docs_url),
            "",
        )
        .item(
            "skip",
            format!("Skip and continue without {}", tool.config().display_name),
            "",
        )
        .interact()?;

    match action {
        "install" => {
            cliclack::log::info(format!("This will execute: {}", tool.install_command()))?;

            let confirm: bool = cliclack::confirm("Proceed with installation?")
                .initial_value(true)
                .interact()?;

            if confirm {
                match tool.install().await {
                    // The installer edits the shell profile, so the new
                    // binary may not be visible to this process yet
                    Ok(_) => match tool.get_version() {
                        Some(version) => {
                            cliclack::log::success(format!(
                                "{} installed successfully ({})",
                                tool.config().display_name,
                                version
                            ))?;
                        }
                        None => {
                            cliclack::log::success(format!(
                                "{} installed successfully. Open a new shell for it to land on PATH.",
                                tool.config().display_name
                            ))?;
                        }
                    },
                    Err(e) => {
                        cliclack::log::error(format!("{}", e))?;

                        let continue_anyway: bool = cliclack::confirm(format!(
                            "Continue without {}?",
                            tool.config().display_name
                        ))
                        .initial_value(false)
                        .interact()?;

                        if !continue_anyway {
                            anyhow::bail!("Setup cancelled.");
                        }
                    }
                }
            } else {
                cliclack::log::info(format!(
                    "Continuing without {}. Refer to the docs for installation instructions: ({})",
                    tool.config().display_name,
                    tool.config().docs_url
                ))?;
            }
        }
        "docs" => {
            tool.open_docs()?;
            cliclack::outro(format!(
                "After installing {}, run this command again.",
                tool.config().display_name
            ))?;
            std::process::exit(0);
        }
        "skip" => {
            cliclack::log::info(format!(
                "Continuing without {}. Refer to the docs for installation instructions: ({})",
                tool.config().display_name,
                tool.config().docs_url
            ))?;
        }
        _ => {}
    }

    Ok(())
}

fn setup_source<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<TemplateSource> {
    let source = TemplateSource::resolve(config, template_dir)?;
    cliclack::log::info(format!("Using templates from {}", source.root().display()))?;
    Ok(source)
}

fn collect_answers<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<Answers> {
    // Variant question first, for products that offer variants
    let kinds = config.template_kinds();
    let template = if kinds.is_empty() {
        None
    } else if let Some(kind) = args.template {
        cliclack::log::info(format!("Template type: {}", kind))?;
        Some(kind)
    } else if args.yes {
        Some(kinds[0])
    } else {
        let mut select = cliclack::select("Template type:");
        for kind in kinds {
            select = select.item(*kind, kind.display_name(), "");
        }
        Some(select.initial_value(kinds[0]).interact()?)
    };

    let app_name = match &args.name {
        Some(name) => {
            cliclack::log::info(format!("Microfrontend name: {}", name))?;
            name.clone()
        }
        None if args.yes => config.default_app_name().to_string(),
        None => cliclack::input("Microfrontend name:")
            .placeholder(config.default_app_name())
            .default_input(config.default_app_name())
            .interact()?,
    };

    let port = match &args.port {
        Some(port) => {
            cliclack::log::info(format!("Port to run the app: {}", port))?;
            port.clone()
        }
        None if args.yes => config.default_port().to_string(),
        None => cliclack::input("Port to run the app:")
            .placeholder(config.default_port())
            .default_input(config.default_port())
            .interact()?,
    };

    Ok(Answers {
        app_name,
        port,
        template,
    })
}

/// Map the collected answers onto a template directory name.
///
/// Products that offer variants go through [`SupportedTemplate`], which
/// refuses the variants the materializer cannot build yet. Products with
/// a single template take it straight from the root manifest.
fn select_template_name(
    source: &TemplateSource,
    root_manifest: &RootManifest,
    answers: &Answers,
) -> Result<String> {
    if let Some(kind) = answers.template {
        let supported = SupportedTemplate::try_from(kind)?;
        return Ok(supported.dir_name().to_string());
    }

    match root_manifest.templates.len() {
        0 => anyhow::bail!("No templates found."),
        1 => Ok(root_manifest.templates[0].clone()),
        _ => {
            // Build select prompt - use indices to avoid borrow issues
            let mut manifests = Vec::new();
            for name in &root_manifest.templates {
                manifests.push(source.template_manifest(name)?);
            }

            let mut select = cliclack::select("Select a template");
            for (idx, manifest) in manifests.iter().enumerate() {
                select = select.item(idx, &manifest.name, &manifest.description);
            }
            let selected_idx: usize = select.interact()?;

            Ok(root_manifest.templates[selected_idx].clone())
        }
    }
}

fn resolve_project_dir(args: &CreateArgs, answers: &Answers) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let base = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    let project_dir = base.join(&answers.app_name);
    cliclack::log::info(format!("Creating in {}", project_dir.display()))?;
    Ok(project_dir)
}

async fn bootstrap_project(project_dir: &Path, policy: FailurePolicy) -> Result<()> {
    cliclack::log::info("Bootstrapping project...")?;

    let steps = bootstrap::standard_steps();
    let outcomes = bootstrap::run_steps(project_dir, &steps, policy).await;
    println!();

    let failed: Vec<_> = outcomes.iter().filter(|o| !o.is_success()).collect();
    if failed.is_empty() {
        cliclack::log::success("Project bootstrapped")?;
        return Ok(());
    }

    for outcome in &failed {
        cliclack::log::warning(outcome.describe())?;
    }
    if outcomes.len() < steps.len() {
        cliclack::log::info(format!(
            "{} remaining step(s) skipped (--halt-on-failure)",
            steps.len() - outcomes.len()
        ))?;
    }
    cliclack::log::warning(format!(
        "{} of {} bootstrap steps did not finish; run them manually inside the project directory",
        failed.len(),
        outcomes.len()
    ))?;

    Ok(())
}

fn print_next_steps<C: ProductConfig>(config: &C, project_dir: &Path, port: &str) -> Result<()> {
    let steps = config.next_steps(project_dir, port);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
