//! Code generation for Go web projects
//!
//! - [`project`] writes a complete project skeleton
//! - [`table`] adds a model/DAO/service/handler slice to an existing project
//! - [`field`] parses the column definitions typed in table mode
//! - [`helpers`] holds naming conventions shared by both generators

pub mod field;
pub mod helpers;
pub mod project;
pub mod table;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::template::write_output;

pub use field::Field;
pub use helpers::TemplateHelpers;
pub use project::{ProjectGenerator, ProjectReport};
pub use table::{Registration, TableGenerator, TableReport};

/// A rendered file that has not been written yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path from project root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}

impl GeneratedFile {
    /// Write the file below `root`, overwriting an existing file
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created or written.
    pub fn write(&self, root: &Path) -> Result<PathBuf> {
        let full_path = root.join(&self.path);
        if full_path.exists() {
            tracing::warn!(path = %full_path.display(), "overwriting existing file");
        }
        write_output(&full_path, &self.content)?;
        tracing::info!(path = %full_path.display(), "wrote {}", self.description);
        Ok(full_path)
    }
}
