//! Generator settings
//!
//! Settings pre-fill the wizard's answers. They are loaded with clear
//! precedence:
//!
//! 1. File passed with `--config` (highest priority)
//! 2. `./gowebgen.toml`
//! 3. Hardcoded defaults (fallback)
//!
//! No environment variables are consulted.
//!
//! # Example Settings
//!
//! ```toml
//! [project]
//! db_type = "postgres"
//! db_port = "5432"
//! server_port = "9000"
//!
//! [table]
//! project_import = "github.com/acme/shop"
//! project_root = "./shop"
//!
//! [templates]
//! search_dirs = ["./my-templates"]
//! ```

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{ProjectConfig, DEFAULT_PROJECT_IMPORT};
use crate::error::{GenerateError, Result};

/// Settings file picked up from the working directory
pub const LOCAL_SETTINGS_FILE: &str = "gowebgen.toml";

/// Defaults for the table wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Go module path of the target project
    pub project_import: String,
    /// Database type of the target project
    pub db_type: String,
    /// Root directory of the target project
    pub project_root: PathBuf,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            project_import: DEFAULT_PROJECT_IMPORT.to_string(),
            db_type: "mysql".to_string(),
            project_root: PathBuf::from("."),
        }
    }
}

/// Template lookup configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Extra override directories, probed before the built-in locations
    pub search_dirs: Vec<PathBuf>,
}

/// Complete generator settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Defaults for the new-project wizard
    pub project: ProjectConfig,
    /// Defaults for the table wizard
    pub table: TableSettings,
    /// Template lookup
    pub templates: TemplateSettings,
}

impl GeneratorSettings {
    /// Load settings from `./gowebgen.toml` and an optional explicit file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The explicit settings file does not exist
    /// - A settings file contains invalid TOML or mistyped values
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(Path::new(LOCAL_SETTINGS_FILE), explicit)
    }

    /// Load settings using `local` as the working-directory settings file
    ///
    /// # Errors
    ///
    /// See [`GeneratorSettings::load`].
    pub fn load_from(local: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if local.exists() {
            tracing::debug!(path = %local.display(), "merging local settings");
            figment = figment.merge(Toml::file(local));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(GenerateError::InvalidInput(format!(
                    "settings file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "merging settings file");
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.extract()?)
    }
}
