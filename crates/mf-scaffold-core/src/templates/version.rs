//! Version compatibility between the CLI and a template

use semver::Version;

/// Warn when the running CLI predates the version a template targets.
///
/// Returns `None` when either version fails to parse; an unparseable
/// version string never blocks a scaffold.
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let (cli, template) = match (Version::parse(cli_version), Version::parse(template_version)) {
        (Ok(cli), Ok(template)) => (cli, template),
        _ => return None,
    };

    (cli < template).then(|| {
        format!(
            "This template targets CLI version {} or newer, but you are running {}.\n\
             Update with: {}",
            template_version, cli_version, upgrade_command
        )
    })
}
