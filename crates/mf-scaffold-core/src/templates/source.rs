//! Template source resolution and manifest access
//!
//! Templates live on disk: a root directory holds a `template.yaml`
//! listing the available templates, one subdirectory per template, and
//! optionally a shared layer directory that every template builds on.

use super::manifest::{RootManifest, TemplateManifest};
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A resolved local template root.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    root: PathBuf,
}

impl TemplateSource {
    /// Resolve the template root for a product.
    ///
    /// Precedence: CLI override, then the product's environment variable,
    /// then the product default.
    pub fn resolve<C: ProductConfig>(config: &C, override_dir: &Option<PathBuf>) -> Result<Self> {
        let root = match override_dir {
            Some(dir) => dir.clone(),
            None => std::env::var(config.template_dir_env())
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(config.default_template_dir())),
        };
        Ok(Self::at(root)?)
    }

    /// Open a template root directly.
    pub fn at(root: PathBuf) -> ScaffoldResult<Self> {
        if !root.is_dir() {
            return Err(ScaffoldError::TemplateRootNotFound(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parse the root `template.yaml` listing available templates.
    pub fn root_manifest(&self) -> Result<RootManifest> {
        let path = self.root.join("template.yaml");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|source| ScaffoldError::InvalidManifest { path, source }.into())
    }

    /// Parse one template's `template.yaml`.
    pub fn template_manifest(&self, name: &str) -> Result<TemplateManifest> {
        let path = self.root.join(name).join("template.yaml");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|source| ScaffoldError::InvalidManifest { path, source }.into())
    }

    /// Directories to copy for `name`, in override order.
    ///
    /// The shared layer (when the root manifest declares one) comes first,
    /// then the template's own directory, so template files win whenever
    /// both layers provide the same relative path.
    pub fn layer_dirs(&self, manifest: &RootManifest, name: &str) -> ScaffoldResult<Vec<PathBuf>> {
        if !manifest.contains(name) {
            return Err(ScaffoldError::UnknownTemplate {
                name: name.to_string(),
                available: manifest.available(),
            });
        }

        let mut layers = Vec::new();

        if let Some(shared) = &manifest.shared {
            let shared_dir = self.root.join(shared);
            if shared_dir.is_dir() {
                layers.push(shared_dir);
            } else {
                eprintln!(
                    "Warning: Shared layer '{}' not found in {}",
                    shared,
                    self.root.display()
                );
            }
        }

        let template_dir = self.root.join(name);
        if !template_dir.is_dir() {
            return Err(ScaffoldError::TemplateDirMissing {
                name: name.to_string(),
                manifest: self.root.join("template.yaml"),
            });
        }
        layers.push(template_dir);

        Ok(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::answers::TemplateKind;

    #[derive(Clone)]
    struct TestProduct {
        dir: &'static str,
        env: &'static str,
    }

    impl ProductConfig for TestProduct {
        fn name(&self) -> &'static str {
            "test"
        }
        fn display_name(&self) -> &'static str {
            "Test"
        }
        fn default_template_dir(&self) -> &'static str {
            self.dir
        }
        fn template_dir_env(&self) -> &'static str {
            self.env
        }
        fn template_kinds(&self) -> &'static [TemplateKind] {
            &[]
        }
        fn docs_url(&self) -> &'static str {
            "https://example.com"
        }
        fn next_steps(&self, _dir: &Path, _port: &str) -> Vec<String> {
            Vec::new()
        }
        fn cli_description(&self) -> &'static str {
            "test CLI"
        }
        fn upgrade_command(&self) -> &'static str {
            "cargo install test"
        }
    }

    fn leak_path(path: &Path) -> &'static str {
        Box::leak(path.to_string_lossy().into_owned().into_boxed_str())
    }

    fn template_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("template.yaml"),
            "templates:\n  - provider\nshared: shared\n",
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("shared")).unwrap();
        std::fs::create_dir(dir.path().join("provider")).unwrap();
        std::fs::write(
            dir.path().join("provider").join("template.yaml"),
            "name: Provider\ndescription: Test provider\nversion: 0.1.0\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_resolve_prefers_cli_override() {
        let root = template_root();
        let product = TestProduct {
            dir: "does/not/exist",
            env: "MF_TEST_SOURCE_UNSET",
        };

        let source =
            TemplateSource::resolve(&product, &Some(root.path().to_path_buf())).unwrap();
        assert_eq!(source.root(), root.path());
    }

    #[test]
    fn test_resolve_reads_environment() {
        let root = template_root();
        std::env::set_var("MF_TEST_SOURCE_ENV", root.path());
        let product = TestProduct {
            dir: "does/not/exist",
            env: "MF_TEST_SOURCE_ENV",
        };

        let source = TemplateSource::resolve(&product, &None).unwrap();
        assert_eq!(source.root(), root.path());
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let root = template_root();
        let product = TestProduct {
            dir: leak_path(root.path()),
            env: "MF_TEST_SOURCE_UNSET",
        };

        let source = TemplateSource::resolve(&product, &None).unwrap();
        assert_eq!(source.root(), root.path());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let err = TemplateSource::at(PathBuf::from("definitely/missing")).unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateRootNotFound(_)));
    }

    #[test]
    fn test_layer_dirs_flags_missing_template_directory() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join("template.yaml"),
            "templates:\n  - provider\n",
        )
        .unwrap();

        let source = TemplateSource::at(root.path().to_path_buf()).unwrap();
        let manifest = source.root_manifest().unwrap();

        let err = source.layer_dirs(&manifest, "provider").unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateDirMissing { .. }));
        assert!(err.to_string().contains("provider"));
    }

    #[test]
    fn test_layer_dirs_shared_first_then_template() {
        let root = template_root();
        let source = TemplateSource::at(root.path().to_path_buf()).unwrap();
        let manifest = source.root_manifest().unwrap();

        let layers = source.layer_dirs(&manifest, "provider").unwrap();
        assert_eq!(layers, vec![root.path().join("shared"), root.path().join("provider")]);
    }

    #[test]
    fn test_layer_dirs_rejects_unlisted_template() {
        let root = template_root();
        let source = TemplateSource::at(root.path().to_path_buf()).unwrap();
        let manifest = source.root_manifest().unwrap();

        let err = source.layer_dirs(&manifest, "consumer").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("consumer"), "unexpected error: {msg}");
        assert!(msg.contains("provider"), "unexpected error: {msg}");
    }

    #[test]
    fn test_template_manifest_parses() {
        let root = template_root();
        let source = TemplateSource::at(root.path().to_path_buf()).unwrap();

        let manifest = source.template_manifest("provider").unwrap();
        assert_eq!(manifest.name, "Provider");
        assert_eq!(manifest.version, "0.1.0");
    }
}
