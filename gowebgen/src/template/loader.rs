//! Template override resolution
//!
//! Embedded templates can be replaced per project or per user by dropping a
//! file of the same name into one of the probed directories. Probe order:
//!
//! 1. Directories from the `[templates]` settings section
//! 2. `<project>/scripts/generator/templates`
//! 3. `<cwd>/scripts/generator/templates`
//! 4. `<exe dir>/scripts/generator/templates`
//! 5. `<exe dir>/../scripts/generator/templates`
//! 6. `./templates`
//!
//! The first readable file wins. When none is found the embedded copy from
//! the [`catalog`](super::catalog) is used.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use super::catalog::TemplateKey;
use crate::error::{GenerateError, Result};

/// Template directory inside a generated project
pub const PROJECT_TEMPLATE_DIR: &str = "scripts/generator/templates";

/// Where a resolved template came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// Read from an override directory
    Override(PathBuf),
    /// Compiled into the binary
    Embedded,
}

/// Template text ready for rendering
#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    /// Catalog entry this text stands for
    pub key: TemplateKey,
    /// Template text
    pub text: Cow<'static, str>,
    /// Source of the text
    pub origin: TemplateOrigin,
}

impl ResolvedTemplate {
    /// Name used in diagnostics: the override path or the embedded file name
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.origin {
            TemplateOrigin::Override(path) => path.display().to_string(),
            TemplateOrigin::Embedded => self.key.file_name().to_string(),
        }
    }
}

/// Resolves catalog keys to template text
#[derive(Debug, Clone, Default)]
pub struct TemplateLoader {
    search_dirs: Vec<PathBuf>,
}

impl TemplateLoader {
    /// Loader probing exactly `search_dirs`, in order
    #[must_use]
    pub const fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Loader that always returns the embedded templates
    #[must_use]
    pub const fn embedded_only() -> Self {
        Self::new(Vec::new())
    }

    /// Loader probing `configured` followed by the standard locations
    ///
    /// `project_root` adds the project's own template directory; locations
    /// that cannot be determined (no working directory, no executable path)
    /// are left out.
    #[must_use]
    pub fn with_standard_dirs(configured: &[PathBuf], project_root: Option<&Path>) -> Self {
        let mut dirs = configured.to_vec();

        if let Some(root) = project_root {
            dirs.push(root.join(PROJECT_TEMPLATE_DIR));
        }
        if let Ok(cwd) = std::env::current_dir() {
            dirs.push(cwd.join(PROJECT_TEMPLATE_DIR));
        }
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            dirs.push(exe_dir.join(PROJECT_TEMPLATE_DIR));
            dirs.push(exe_dir.join("..").join(PROJECT_TEMPLATE_DIR));
        }
        dirs.push(PathBuf::from("templates"));

        Self::new(dirs)
    }

    /// Directories probed, in order
    #[must_use]
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Resolve a template, preferring the first readable override
    ///
    /// # Errors
    ///
    /// Currently infallible: unreadable overrides are logged and skipped.
    pub fn resolve(&self, key: TemplateKey) -> Result<ResolvedTemplate> {
        for dir in &self.search_dirs {
            let path = dir.join(key.file_name());
            if !path.is_file() {
                continue;
            }
            match fs::read_to_string(&path) {
                Ok(text) => {
                    tracing::debug!(
                        template = %key,
                        path = %path.display(),
                        "using template override"
                    );
                    return Ok(ResolvedTemplate {
                        key,
                        text: Cow::Owned(text),
                        origin: TemplateOrigin::Override(path),
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "unreadable template override"
                    );
                }
            }
        }

        tracing::debug!(template = %key, "using embedded template");
        Ok(ResolvedTemplate {
            key,
            text: Cow::Borrowed(key.source()),
            origin: TemplateOrigin::Embedded,
        })
    }

    /// Write the embedded table templates into `dir`
    ///
    /// Files that already exist are left alone so customised templates
    /// survive. Returns the paths that were written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or a file cannot be created.
    pub fn materialize(dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(|source| GenerateError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::new();
        for key in TemplateKey::TABLE {
            let path = dir.join(key.file_name());
            if path.exists() {
                tracing::debug!(path = %path.display(), "keeping existing template");
                continue;
            }
            fs::write(&path, key.source()).map_err(|source| GenerateError::WriteFile {
                path: path.clone(),
                source,
            })?;
            written.push(path);
        }

        Ok(written)
    }
}
