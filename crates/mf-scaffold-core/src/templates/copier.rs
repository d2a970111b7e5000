//! Template file copying with placeholder rendering

use crate::templates::renderer::{RenderVars, TemplateRenderer};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Copy template layers into the target directory.
///
/// Layers apply in order: a file provided by a later layer replaces the
/// same relative path written by an earlier one. UTF-8 files have their
/// placeholders rendered; any other file is copied byte-for-byte. Hidden
/// files and directories are included. Files already present in the
/// target are overwritten.
///
/// Returns the relative paths written, each listed once.
pub async fn copy_template(
    layers: &[PathBuf],
    target_dir: &Path,
    vars: &RenderVars,
) -> Result<Vec<String>> {
    // Ensure target directory exists
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let renderer = TemplateRenderer::new();
    let mut copied_files: Vec<String> = Vec::new();

    for layer in layers {
        for entry in WalkDir::new(layer).min_depth(1).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("Failed to walk template layer {}", layer.display()))?;
            let relative = entry
                .path()
                .strip_prefix(layer)
                .with_context(|| format!("Failed to relativize {}", entry.path().display()))?;

            // The layer's own manifest is metadata, not template content
            if relative == Path::new("template.yaml") {
                continue;
            }

            let target_path = target_dir.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target_path).await.with_context(|| {
                    format!("Failed to create directory: {}", target_path.display())
                })?;
                continue;
            }

            // Ensure parent directories exist
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }

            let raw = fs::read(entry.path())
                .await
                .with_context(|| format!("Failed to read {}", entry.path().display()))?;

            // Render text files; pass anything else through untouched
            match String::from_utf8(raw) {
                Ok(text) => fs::write(&target_path, renderer.render(&text, vars)).await,
                Err(binary) => fs::write(&target_path, binary.as_bytes()).await,
            }
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

            let rel_name = relative.to_string_lossy().replace('\\', "/");
            if !copied_files.contains(&rel_name) {
                copied_files.push(rel_name);
            }
        }
    }

    Ok(copied_files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_copies_files_and_renders_placeholders() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        let layer = source.path().join("app");
        write(&layer, "template.yaml", "name: App\ndescription: x\nversion: 0.1.0\n");
        write(&layer, "package.json", "{\"name\": \"{{appName}}\"}\n");
        write(&layer, "src/index.ts", "const port = {{port}};\n");
        write(&layer, ".gitignore", "node_modules\n");
        std::fs::create_dir_all(layer.join("assets")).unwrap();

        let vars = RenderVars::new("my app!", "4000");
        let copied = copy_template(&[layer], target.path(), &vars).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(target.path().join("package.json")).unwrap(),
            "{\"name\": \"my_app_\"}\n"
        );
        assert_eq!(
            std::fs::read_to_string(target.path().join("src/index.ts")).unwrap(),
            "const port = 4000;\n"
        );
        assert!(target.path().join(".gitignore").exists());
        assert!(target.path().join("assets").is_dir());
        assert!(!target.path().join("template.yaml").exists());
        assert!(copied.contains(&".gitignore".to_string()));
        assert!(copied.contains(&"src/index.ts".to_string()));
        assert!(!copied.contains(&"template.yaml".to_string()));
    }

    #[tokio::test]
    async fn test_later_layer_overrides_and_list_dedupes() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        let shared = source.path().join("shared");
        let provider = source.path().join("provider");
        write(&shared, "README.md", "# shared {{appName}}\n");
        write(&shared, "common.txt", "common\n");
        write(&provider, "README.md", "# provider {{appName}}\n");

        let vars = RenderVars::new("demo", "3001");
        let copied = copy_template(&[shared, provider], target.path(), &vars)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(target.path().join("README.md")).unwrap(),
            "# provider demo\n"
        );
        assert_eq!(
            std::fs::read_to_string(target.path().join("common.txt")).unwrap(),
            "common\n"
        );
        let readme_count = copied.iter().filter(|f| f.as_str() == "README.md").count();
        assert_eq!(readme_count, 1);
    }

    #[tokio::test]
    async fn test_binary_files_copied_byte_for_byte() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        let layer = source.path().join("app");
        std::fs::create_dir_all(&layer).unwrap();

        // Invalid UTF-8 prefix followed by bytes that look like a token
        let mut bytes = vec![0xFF, 0xFE, 0x00];
        bytes.extend_from_slice(b"{{port}}");
        std::fs::write(layer.join("logo.png"), &bytes).unwrap();

        let vars = RenderVars::new("demo", "3001");
        copy_template(&[layer], target.path(), &vars).await.unwrap();

        assert_eq!(std::fs::read(target.path().join("logo.png")).unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_existing_destination_files_are_overwritten() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        let layer = source.path().join("app");
        write(&layer, "README.md", "new\n");
        write(target.path(), "README.md", "old\n");
        write(target.path(), "keep.txt", "keep\n");

        let vars = RenderVars::new("demo", "3001");
        copy_template(&[layer], target.path(), &vars).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(target.path().join("README.md")).unwrap(),
            "new\n"
        );
        assert_eq!(
            std::fs::read_to_string(target.path().join("keep.txt")).unwrap(),
            "keep\n"
        );
    }

    #[tokio::test]
    async fn test_source_tree_left_unchanged() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        let layer = source.path().join("app");
        write(&layer, "config.ts", "port: {{port}}\n");

        let vars = RenderVars::new("demo", "3001");
        copy_template(&[layer.clone()], target.path(), &vars).await.unwrap();

        // Rendering happens on the copy, never in place
        assert_eq!(
            std::fs::read_to_string(layer.join("config.ts")).unwrap(),
            "port: {{port}}\n"
        );
    }
}
