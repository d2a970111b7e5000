//! Placeholder substitution for template files

use regex::Regex;

/// Replace every character outside `[a-zA-Z0-9_]` with `_`.
///
/// Applied per Unicode scalar value. The result is used only as a
/// substitution value; the destination directory keeps the raw name.
pub fn sanitize_app_name(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// The substitution context exposed to template files.
///
/// Exactly two variables exist, shared by the single-source and layered
/// copy paths. Adding a variable here is the only way to grow the
/// template vocabulary.
#[derive(Debug, Clone)]
pub struct RenderVars {
    /// Sanitized application name (`appName` in templates)
    pub app_name: String,
    /// Raw port string (`port` in templates)
    pub port: String,
}

impl RenderVars {
    /// Build the context from the raw prompt answers.
    pub fn new(raw_app_name: &str, port: &str) -> Self {
        Self {
            app_name: sanitize_app_name(raw_app_name),
            port: port.to_string(),
        }
    }

    /// Look up a placeholder name.
    fn get(&self, key: &str) -> Option<&str> {
        match key {
            "appName" => Some(&self.app_name),
            "port" => Some(&self.port),
            _ => None,
        }
    }
}

/// Renders `{{placeholder}}` tokens in template content.
pub struct TemplateRenderer {
    placeholder: Regex,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self {
            // Match {{variable_name}} tokens
            placeholder: Regex::new(r"\{\{([a-zA-Z_][a-zA-Z0-9_]*)\}\}").unwrap(),
        }
    }

    /// Replace known placeholders, leaving every other byte untouched.
    ///
    /// Unknown placeholders stay literal so template content that happens
    /// to contain double braces survives rendering unchanged.
    pub fn render(&self, content: &str, vars: &RenderVars) -> String {
        self.placeholder
            .replace_all(content, |caps: &regex::Captures| {
                let name = &caps[1];
                match vars.get(name) {
                    Some(value) => value.to_string(),
                    None => format!("{{{{{}}}}}", name),
                }
            })
            .to_string()
    }
}
