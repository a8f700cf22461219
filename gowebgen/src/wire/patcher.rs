//! Line-based patching of the DI provider file
//!
//! The provider file is treated as plain lines; nothing is parsed. The
//! declaration is found by substring search for [`PROVIDER_SET_MARKER`] and
//! the first line containing `)` after it.
//!
//! Two strategies are tried in order:
//!
//! 1. **Wire provider insert**: the rendered provider block is inserted above
//!    the marker line and the comment lines directly above it.
//! 2. **Provider-set append**: `\t<Model>Set,` is added to the set. A
//!    comment-only placeholder just before the closing `)` is replaced,
//!    otherwise the entry goes right after the marker line.
//!
//! Files using CRLF line endings keep them. Patching is not idempotent.
//! Running it twice for the same model adds the block twice. The patched
//! text is built in memory and only written when a strategy succeeds, so a
//! failed patch leaves the file untouched.

use serde_json::json;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::ProviderEntry;
use crate::error::{GenerateError, Result};
use crate::template::{TemplateKey, TemplateRenderer, TemplateSource};

/// Provider file inside a generated project
pub const PROVIDER_FILE: &str = "pkg/wire/provider.go";

/// Line fragment opening the provider set declaration
pub const PROVIDER_SET_MARKER: &str = "var ProviderSet = wire.NewSet(";

/// Fragment closing the provider set declaration
pub const CLOSING_DELIMITER: &str = ")";

/// Which strategy produced a patch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStrategy {
    /// Provider block inserted before the marker line
    WireProviderInsert,
    /// Set entry added inside the declaration
    ProviderSetAppend,
}

impl fmt::Display for PatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WireProviderInsert => f.write_str("wire provider insert"),
            Self::ProviderSetAppend => f.write_str("provider-set append"),
        }
    }
}

/// A computed, not yet written, change to the provider file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPatch {
    /// File the patch applies to
    pub path: PathBuf,
    /// Strategy that produced it
    pub strategy: PatchStrategy,
    /// File content before patching
    pub before: String,
    /// File content after patching
    pub after: String,
}

/// Line ending used by `content`, CRLF if any line ends with it
fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Insert `block` before the first line containing the marker
///
/// Comment lines directly above the marker stay attached to it, so the block
/// goes above them. Returns `None` when the marker is absent.
///
/// # Examples
///
/// ```
/// # use gowebgen::wire::patcher::insert_before_marker;
/// let src = "package wire\n\n// all providers\nvar ProviderSet = wire.NewSet(\n)\n";
/// let out = insert_before_marker(src, "func ProvideX() {}\n").unwrap();
/// let expected = "package wire\n\nfunc ProvideX() {}\n\n\
///     // all providers\nvar ProviderSet = wire.NewSet(\n)\n";
/// assert_eq!(out, expected);
/// ```
#[must_use]
pub fn insert_before_marker(content: &str, block: &str) -> Option<String> {
    let eol = line_ending(content);
    let lines: Vec<&str> = content.split(eol).collect();
    let marker = lines
        .iter()
        .position(|line| line.contains(PROVIDER_SET_MARKER))?;

    let mut at = marker;
    while at > 0 && lines[at - 1].trim_start().starts_with("//") {
        at -= 1;
    }

    let block = block.trim_end_matches(['\r', '\n']);
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + block.lines().count() + 1);
    out.extend_from_slice(&lines[..at]);
    out.extend(block.lines());
    out.push("");
    out.extend_from_slice(&lines[at..]);

    Some(out.join(eol))
}

/// Add `\t<entry>,` to the provider set declaration
///
/// Returns `None` when no marker line is followed by a closing delimiter.
///
/// # Examples
///
/// ```
/// # use gowebgen::wire::patcher::append_to_provider_set;
/// let src = "var ProviderSet = wire.NewSet(\n\t// add providers here\n)\n";
/// let out = append_to_provider_set(src, "OrderSet").unwrap();
/// assert_eq!(out, "var ProviderSet = wire.NewSet(\n\tOrderSet,\n)\n");
/// ```
#[must_use]
pub fn append_to_provider_set(content: &str, entry: &str) -> Option<String> {
    let eol = line_ending(content);
    let mut lines: Vec<String> = content.split(eol).map(String::from).collect();
    let new_line = format!("\t{entry},");

    let markers: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.contains(PROVIDER_SET_MARKER))
        .map(|(idx, _)| idx)
        .collect();

    for marker in markers {
        let Some(closing) = lines
            .iter()
            .skip(marker + 1)
            .position(|line| line.contains(CLOSING_DELIMITER))
            .map(|offset| marker + 1 + offset)
        else {
            tracing::debug!(
                line = marker + 1,
                "provider set marker without closing delimiter"
            );
            continue;
        };

        let placeholder = closing - 1;
        if placeholder > marker && lines[placeholder].trim_start().starts_with("//") {
            lines[placeholder] = new_line;
        } else {
            lines.insert(marker + 1, new_line);
        }
        return Some(lines.join(eol));
    }

    None
}

/// Applies provider registrations to a provider file
#[derive(Debug, Clone, Copy)]
pub struct ProviderPatcher<'a> {
    renderer: &'a TemplateRenderer,
}

impl<'a> ProviderPatcher<'a> {
    /// Create a patcher rendering provider blocks with `renderer`
    #[must_use]
    pub const fn new(renderer: &'a TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Compute the patch for `path` without writing it
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read and a not-found error
    /// if neither strategy finds a usable marker.
    pub fn plan(&self, path: &Path, entry: &ProviderEntry) -> Result<ProviderPatch> {
        let before = fs::read_to_string(path).map_err(|source| GenerateError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let (strategy, after) = self.patch_content(&before, entry).ok_or_else(|| {
            GenerateError::MarkerNotFound {
                path: path.to_path_buf(),
                marker: PROVIDER_SET_MARKER.to_string(),
            }
        })?;

        Ok(ProviderPatch {
            path: path.to_path_buf(),
            strategy,
            before,
            after,
        })
    }

    /// Patch `path` in place and report the strategy used
    ///
    /// # Errors
    ///
    /// See [`plan`](Self::plan); additionally fails if the file cannot be
    /// written. On error the file is unchanged.
    pub fn register_provider(&self, path: &Path, entry: &ProviderEntry) -> Result<PatchStrategy> {
        let patch = self.plan(path, entry)?;
        fs::write(path, &patch.after).map_err(|source| GenerateError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            model = %entry.model_name,
            strategy = %patch.strategy,
            "registered provider"
        );
        Ok(patch.strategy)
    }

    fn patch_content(
        &self,
        content: &str,
        entry: &ProviderEntry,
    ) -> Option<(PatchStrategy, String)> {
        match self.insert_provider_block(content, entry) {
            Ok(patched) => return Some((PatchStrategy::WireProviderInsert, patched)),
            Err(err) => {
                tracing::warn!(error = %err, "provider insert failed, appending to provider set");
            }
        }

        append_to_provider_set(content, &entry.set_name())
            .map(|patched| (PatchStrategy::ProviderSetAppend, patched))
    }

    fn insert_provider_block(&self, content: &str, entry: &ProviderEntry) -> Result<String> {
        if !content.contains(PROVIDER_SET_MARKER) {
            return Err(GenerateError::InvalidInput(format!(
                "no `{PROVIDER_SET_MARKER}` line"
            )));
        }

        let block = self.render_block(entry)?;
        insert_before_marker(content, &block).ok_or_else(|| {
            GenerateError::InvalidInput(format!("no `{PROVIDER_SET_MARKER}` line"))
        })
    }

    /// Render the provider block for one slice
    ///
    /// # Errors
    ///
    /// Returns a template error if the provider template fails to render.
    pub fn render_block(&self, entry: &ProviderEntry) -> Result<String> {
        let data = json!({
            "model_name": entry.model_name,
            "table_name": entry.table_name,
            "module_name": entry.module_name,
        });
        self.renderer
            .render_to_string(&TemplateSource::Catalog(TemplateKey::WireProvider), &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateLoader;
    use tempfile::tempdir;

    const PROVIDER: &str = "package wire\n\
\n\
// ProviderSet lists every provider of the application\n\
var ProviderSet = wire.NewSet(\n\
\tProvideDB,\n\
\tProvideRouter,\n\
)\n";

    fn order() -> ProviderEntry {
        ProviderEntry {
            model_name: "Order".to_string(),
            table_name: "orders".to_string(),
            module_name: "order".to_string(),
        }
    }

    #[test]
    fn test_insert_before_marker_keeps_rest() {
        let out = insert_before_marker(PROVIDER, "// block").unwrap();
        let marker_pos = out.find(PROVIDER_SET_MARKER).unwrap();
        assert!(out.find("// block").unwrap() < marker_pos);
        assert!(out.ends_with("\tProvideRouter,\n)\n"));
    }

    #[test]
    fn test_insert_keeps_comment_above_marker() {
        let out = insert_before_marker(PROVIDER, "// block").unwrap();
        assert!(out.contains(
            "// block\n\n// ProviderSet lists every provider of the application\n\
             var ProviderSet = wire.NewSet(\n"
        ));
    }

    #[test]
    fn test_insert_preserves_crlf() {
        let src = PROVIDER.replace('\n', "\r\n");
        let out = insert_before_marker(&src, "func ProvideX() {\n}\n").unwrap();
        assert!(out.contains("func ProvideX() {\r\n}\r\n\r\n// ProviderSet"));
        assert!(!out.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_insert_at_first_line() {
        let out = insert_before_marker("var ProviderSet = wire.NewSet(\n)", "X").unwrap();
        assert_eq!(out, "X\n\nvar ProviderSet = wire.NewSet(\n)");
    }

    #[test]
    fn test_insert_missing_marker() {
        assert!(insert_before_marker("package wire\n", "X").is_none());
    }

    #[test]
    fn test_append_after_marker() {
        let out = append_to_provider_set(PROVIDER, "OrderSet").unwrap();
        assert!(out.contains("var ProviderSet = wire.NewSet(\n\tOrderSet,\n\tProvideDB,\n"));
        assert!(out.contains("\tProvideRouter,\n)"));
    }

    #[test]
    fn test_append_replaces_placeholder_only() {
        let src = "var ProviderSet = wire.NewSet(\n\tProvideDB,\n\t// more providers\n)\n";
        let out = append_to_provider_set(src, "OrderSet").unwrap();
        assert_eq!(out, "var ProviderSet = wire.NewSet(\n\tProvideDB,\n\tOrderSet,\n)\n");
    }

    #[test]
    fn test_append_with_empty_set() {
        let out = append_to_provider_set("var ProviderSet = wire.NewSet(\n)", "OrderSet").unwrap();
        assert_eq!(out, "var ProviderSet = wire.NewSet(\n\tOrderSet,\n)");
    }

    #[test]
    fn test_append_preserves_crlf() {
        let src = "var ProviderSet = wire.NewSet(\r\n\tProvideDB,\r\n)\r\n";
        let out = append_to_provider_set(src, "OrderSet").unwrap();
        assert_eq!(
            out,
            "var ProviderSet = wire.NewSet(\r\n\tOrderSet,\r\n\tProvideDB,\r\n)\r\n"
        );
    }

    #[test]
    fn test_append_without_closing_delimiter() {
        let unclosed = "var ProviderSet = wire.NewSet(\n\tProvideDB,\n";
        assert!(append_to_provider_set(unclosed, "X").is_none());
        assert!(append_to_provider_set("package wire\n", "X").is_none());
    }

    #[test]
    fn test_register_uses_primary_strategy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("provider.go");
        fs::write(&path, PROVIDER).unwrap();

        let renderer = TemplateRenderer::new(TemplateLoader::embedded_only());
        let strategy = ProviderPatcher::new(&renderer)
            .register_provider(&path, &order())
            .unwrap();
        assert_eq!(strategy, PatchStrategy::WireProviderInsert);

        let patched = fs::read_to_string(&path).unwrap();
        let block = patched.find("func ProvideOrderHandler").unwrap();
        assert!(block < patched.find(PROVIDER_SET_MARKER).unwrap());
        assert!(patched.contains("application\nvar ProviderSet = wire.NewSet(\n"));
        assert!(patched.ends_with(")\n"));
    }

    #[test]
    fn test_register_is_not_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("provider.go");
        fs::write(&path, PROVIDER).unwrap();

        let renderer = TemplateRenderer::new(TemplateLoader::embedded_only());
        let patcher = ProviderPatcher::new(&renderer);
        patcher.register_provider(&path, &order()).unwrap();
        patcher.register_provider(&path, &order()).unwrap();

        let patched = fs::read_to_string(&path).unwrap();
        assert_eq!(patched.matches("func ProvideOrderHandler").count(), 2);
    }

    #[test]
    fn test_fallback_when_block_fails_to_render() {
        let dir = tempdir().unwrap();
        let overrides = dir.path().join("tpl");
        fs::create_dir_all(&overrides).unwrap();
        fs::write(overrides.join("wire_provider.go.hbs"), "{{does_not_exist}}").unwrap();

        let path = dir.path().join("provider.go");
        fs::write(&path, PROVIDER).unwrap();

        let renderer = TemplateRenderer::new(TemplateLoader::new(vec![overrides]));
        let strategy = ProviderPatcher::new(&renderer)
            .register_provider(&path, &order())
            .unwrap();
        assert_eq!(strategy, PatchStrategy::ProviderSetAppend);
        assert!(fs::read_to_string(&path).unwrap().contains("\tOrderSet,\n"));
    }

    #[test]
    fn test_missing_marker_leaves_file_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("provider.go");
        let original = "package wire\n\nfunc ProvideDB() {}\n";
        fs::write(&path, original).unwrap();

        let renderer = TemplateRenderer::new(TemplateLoader::embedded_only());
        let err = ProviderPatcher::new(&renderer)
            .register_provider(&path, &order())
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let renderer = TemplateRenderer::new(TemplateLoader::embedded_only());
        let err = ProviderPatcher::new(&renderer)
            .plan(&dir.path().join("nope.go"), &order())
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }
}
