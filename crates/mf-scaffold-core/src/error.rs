//! Typed errors for the scaffolding boundaries

use std::path::PathBuf;
use thiserror::Error;

use crate::answers::TemplateKind;

/// Result alias for scaffolding operations with typed errors.
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Errors the generator flow matches on.
///
/// Everything else (filesystem, subprocess plumbing) travels as
/// `anyhow::Error` with context, the same way the rest of the crate
/// propagates failures.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// The user picked a template variant the generator cannot build yet.
    /// Raised before anything is written to disk.
    #[error("the \"{0}\" template is not supported yet")]
    UnsupportedTemplate(TemplateKind),

    #[error("template directory not found: {}", .0.display())]
    TemplateRootNotFound(PathBuf),

    #[error("template '{name}' not found. Available templates: {available}")]
    UnknownTemplate { name: String, available: String },

    #[error("template '{name}' is listed in {} but its directory is missing", .manifest.display())]
    TemplateDirMissing { name: String, manifest: PathBuf },

    #[error("failed to parse {}: {source}", path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
