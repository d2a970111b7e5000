//! Prompt answers and the template-variant boundary

use std::fmt;

use clap::ValueEnum;

use crate::error::ScaffoldError;

/// Everything one generator run collects from the user.
///
/// Lives only for the duration of a single invocation: filled by the
/// prompts (or CLI flags), read while writing the project, then dropped.
#[derive(Debug, Clone)]
pub struct Answers {
    /// Project name exactly as the user typed it. Also the destination
    /// directory name, unsanitized.
    pub app_name: String,
    /// Port as free text; never parsed or validated.
    pub port: String,
    /// Template variant; `None` for products with a single template.
    pub template: Option<TemplateKind>,
}

/// Template variants the federation prompt offers.
///
/// Closed set: both the select prompt and the `--template-type` flag can
/// only produce these values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum TemplateKind {
    #[default]
    Provider,
    Consumer,
}

impl TemplateKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateKind::Provider => "provider",
            TemplateKind::Consumer => "consumer",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Template variants the generator can actually materialize.
///
/// Converting a [`TemplateKind`] into this type is the rejection
/// boundary: the copier only accepts `SupportedTemplate`, so an
/// unsupported choice can never reach the write phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedTemplate {
    Provider,
}

impl SupportedTemplate {
    /// Directory name of this variant under the template root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            SupportedTemplate::Provider => "provider",
        }
    }
}

impl TryFrom<TemplateKind> for SupportedTemplate {
    type Error = ScaffoldError;

    fn try_from(kind: TemplateKind) -> Result<Self, Self::Error> {
        match kind {
            TemplateKind::Provider => Ok(SupportedTemplate::Provider),
            TemplateKind::Consumer => Err(ScaffoldError::UnsupportedTemplate(kind)),
        }
    }
}
