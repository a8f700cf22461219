//! Template rendering
//!
//! Templates are handlebars documents rendered in strict mode, so a reference
//! to a field the data does not carry is an error rather than an empty string.
//! HTML escaping is off since the output is Go source.
//!
//! Rendering happens in memory before the target file is touched; a template
//! that fails to parse or render never leaves an empty file behind.

pub mod catalog;
pub mod loader;

use handlebars::{Handlebars, Template};
use serde::Serialize;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{GenerateError, Result};

pub use catalog::TemplateKey;
pub use loader::{ResolvedTemplate, TemplateLoader, TemplateOrigin, PROJECT_TEMPLATE_DIR};

/// Where template text comes from
#[derive(Debug, Clone)]
pub enum TemplateSource<'a> {
    /// Literal text; `name` only appears in diagnostics
    Inline {
        /// Name used in error messages
        name: &'a str,
        /// Template text
        text: &'a str,
    },
    /// Template file on disk
    File(&'a Path),
    /// Catalog entry, resolved through the renderer's loader
    Catalog(TemplateKey),
}

impl<'a> TemplateSource<'a> {
    /// Inline template text
    #[must_use]
    pub const fn inline(name: &'a str, text: &'a str) -> Self {
        Self::Inline { name, text }
    }
}

impl From<TemplateKey> for TemplateSource<'_> {
    fn from(key: TemplateKey) -> Self {
        Self::Catalog(key)
    }
}

/// Renders templates to strings and files
#[derive(Debug)]
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
    loader: TemplateLoader,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(TemplateLoader::default())
    }
}

impl TemplateRenderer {
    /// Create a renderer resolving catalog keys through `loader`
    #[must_use]
    pub fn new(loader: TemplateLoader) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        // Output is Go source, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        Self { handlebars, loader }
    }

    /// Loader used for catalog keys
    #[must_use]
    pub const fn loader(&self) -> &TemplateLoader {
        &self.loader
    }

    /// Render a template to a string
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A template file cannot be read
    /// - The template text does not parse
    /// - The template references a field `data` does not provide
    pub fn render_to_string<T: Serialize>(
        &self,
        source: &TemplateSource<'_>,
        data: &T,
    ) -> Result<String> {
        let (name, text) = self.load(source)?;

        Template::compile(&text).map_err(|err| GenerateError::TemplateParse {
            name: name.clone(),
            source: Box::new(err),
        })?;

        self.handlebars
            .render_template(&text, data)
            .map_err(|err| GenerateError::Render {
                name,
                source: Box::new(err),
            })
    }

    /// Render a template into `target`, creating parent directories
    ///
    /// An existing target is overwritten.
    ///
    /// # Errors
    ///
    /// Everything [`render_to_string`](Self::render_to_string) reports, plus
    /// failures to create the directory, create the file or write it.
    pub fn render<T: Serialize>(
        &self,
        target: &Path,
        source: &TemplateSource<'_>,
        data: &T,
    ) -> Result<()> {
        let rendered = self.render_to_string(source, data)?;
        write_output(target, &rendered)?;
        tracing::info!(path = %target.display(), "wrote file");
        Ok(())
    }

    fn load(&self, source: &TemplateSource<'_>) -> Result<(String, Cow<'static, str>)> {
        match source {
            TemplateSource::Inline { name, text } => {
                Ok(((*name).to_string(), Cow::Owned((*text).to_string())))
            }
            TemplateSource::File(path) => {
                let text = fs::read_to_string(path).map_err(|source| {
                    GenerateError::ReadTemplate {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                Ok((path.display().to_string(), Cow::Owned(text)))
            }
            TemplateSource::Catalog(key) => {
                let resolved = self.loader.resolve(*key)?;
                Ok((resolved.display_name(), resolved.text))
            }
        }
    }
}

/// Create the parent directories of `target` and write `content` to it
///
/// # Errors
///
/// Returns a distinct error for directory creation, file creation and write.
pub fn write_output(target: &Path, content: &str) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| GenerateError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut file = File::create(target).map_err(|source| GenerateError::CreateFile {
        path: PathBuf::from(target),
        source,
    })?;
    file.write_all(content.as_bytes())
        .map_err(|source| GenerateError::WriteFile {
            path: PathBuf::from(target),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;
    use tempfile::tempdir;

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::new(TemplateLoader::embedded_only())
    }

    #[test]
    fn test_inline_substitution() {
        let out = renderer()
            .render_to_string(
                &TemplateSource::inline("greeting", "module {{project_name}}\n"),
                &json!({ "project_name": "github.com/acme/shop" }),
            )
            .unwrap();
        assert_eq!(out, "module github.com/acme/shop\n");
    }

    #[test]
    fn test_no_html_escaping() {
        let out = renderer()
            .render_to_string(
                &TemplateSource::inline("tag", "{{tag}}"),
                &json!({ "tag": "`json:\"a\" gorm:\"b<c>\"`" }),
            )
            .unwrap();
        assert_eq!(out, "`json:\"a\" gorm:\"b<c>\"`");
    }

    #[test]
    fn test_missing_field_is_render_error() {
        let err = renderer()
            .render_to_string(
                &TemplateSource::inline("broken", "{{model_name}}"),
                &json!({ "table_name": "orders" }),
            )
            .unwrap_err();
        assert!(matches!(err, GenerateError::Render { .. }));
        assert_eq!(err.kind(), ErrorKind::Template);
    }

    #[test]
    fn test_parse_error_is_distinct() {
        let err = renderer()
            .render_to_string(&TemplateSource::inline("bad", "{{#each fields}}"), &json!({}))
            .unwrap_err();
        assert!(matches!(err, GenerateError::TemplateParse { .. }));
    }

    #[test]
    fn test_failed_render_creates_no_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out/model.go");
        let result = renderer().render(
            &target,
            &TemplateSource::inline("broken", "{{missing}}"),
            &json!({}),
        );
        assert!(result.is_err());
        assert!(!target.exists());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_render_file_source_creates_parents() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("hello.hbs");
        fs::write(&template, "package {{name}}\n").unwrap();
        let target = dir.path().join("a/b/c.go");

        renderer()
            .render(&target, &TemplateSource::File(&template), &json!({ "name": "api" }))
            .unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "package api\n");
    }

    #[test]
    fn test_missing_template_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.hbs");
        let err = renderer()
            .render_to_string(&TemplateSource::File(&missing), &json!({}))
            .unwrap_err();
        assert!(matches!(err, GenerateError::ReadTemplate { .. }));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let data = json!({
            "module_name": "order",
            "table_name": "orders",
            "model_name": "Order",
            "project_import": "github.com/acme/shop",
            "id_type": "uint",
            "fields": [],
        });
        let first = renderer()
            .render_to_string(&TemplateKey::Service.into(), &data)
            .unwrap();
        let second = renderer()
            .render_to_string(&TemplateKey::Service.into(), &data)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_each_over_fields() {
        let out = renderer()
            .render_to_string(
                &TemplateSource::inline("fields", "{{#each fields}}{{go_name}} {{type}};{{/each}}"),
                &json!({ "fields": [
                    { "go_name": "Amount", "type": "float64" },
                    { "go_name": "Note", "type": "string" },
                ]}),
            )
            .unwrap();
        assert_eq!(out, "Amount float64;Note string;");
    }
}
