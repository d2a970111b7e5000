//! Template manifest types and parsing

use serde::{Deserialize, Serialize};

/// Root template manifest (`<template root>/template.yaml`)
///
/// Lists the template directories a product can materialize and, for
/// layered products, the shared tree applied underneath every variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    /// List of template directory names
    pub templates: Vec<String>,

    /// Directory of files copied before any variant tree, letting the
    /// variant override shared defaults at the same relative path
    #[serde(default)]
    pub shared: Option<String>,
}

impl RootManifest {
    /// Check whether a template directory is listed in this manifest
    pub fn contains(&self, name: &str) -> bool {
        self.templates.iter().any(|t| t == name)
    }

    /// Comma-separated template names for error messages
    pub fn available(&self) -> String {
        self.templates.join(", ")
    }
}

/// Per-template manifest (`<template root>/<name>/template.yaml`)
///
/// Describes one template tree. The manifest itself is never copied into
/// a generated project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,
}
