//! Configuration records for project and table generation
//!
//! [`ProjectConfig`] drives full-project generation and [`ModelConfig`] drives
//! table mode. Both are built once per invocation, handed to a generator by
//! reference and dropped at exit.
//!
//! Defaults for every prompt can be supplied through a settings file, see
//! [`settings::GeneratorSettings`].

pub mod settings;

use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};
use crate::scaffold::field::Field;
use crate::scaffold::helpers::TemplateHelpers;

pub use settings::{GeneratorSettings, TableSettings, TemplateSettings};

/// Default Go module path used when none is given
pub const DEFAULT_PROJECT_IMPORT: &str = "github.com/yourusername/myproject";

/// Host prefix added to project names that are not full module paths
pub const DEFAULT_MODULE_HOST: &str = "github.com/";

/// Database types offered at the prompt
pub const SUPPORTED_DB_TYPES: &[&str] = &["mysql", "postgres", "sqlite", "sqlserver", "oracle"];

/// Project-wide configuration collected by the new-project wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Go module path, e.g. `github.com/acme/shop`
    pub project_name: String,
    /// Directory the project is generated into
    pub project_path: String,
    /// Database type (`mysql`, `postgres`, `sqlite`, `sqlserver`, `oracle`)
    pub db_type: String,
    /// Database host
    pub db_host: String,
    /// Database port
    pub db_port: String,
    /// Database user
    pub db_user: String,
    /// Database password
    pub db_password: String,
    /// Database name
    pub db_name: String,
    /// Redis host
    pub redis_host: String,
    /// Redis port
    pub redis_port: String,
    /// Redis password
    pub redis_password: String,
    /// Redis logical database
    pub redis_db: String,
    /// HTTP port of the generated server
    pub server_port: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_IMPORT.to_string(),
            project_path: ".".to_string(),
            db_type: "mysql".to_string(),
            db_host: "localhost".to_string(),
            db_port: TemplateHelpers::default_db_port("mysql").to_string(),
            db_user: "root".to_string(),
            db_password: String::new(),
            db_name: "mydb".to_string(),
            redis_host: "localhost".to_string(),
            redis_port: "6379".to_string(),
            redis_password: String::new(),
            redis_db: "0".to_string(),
            server_port: "8080".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Prefix a bare project name with [`DEFAULT_MODULE_HOST`]
    ///
    /// Anything containing a `/` is taken to be a module path already.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gowebgen::config::ProjectConfig;
    /// assert_eq!(ProjectConfig::normalize_project_name("shop"), "github.com/shop");
    /// assert_eq!(ProjectConfig::normalize_project_name("gitlab.com/a/b"), "gitlab.com/a/b");
    /// ```
    #[must_use]
    pub fn normalize_project_name(name: &str) -> String {
        if name.contains('/') {
            name.to_string()
        } else {
            format!("{DEFAULT_MODULE_HOST}{name}")
        }
    }
}

/// Configuration of one table's vertical slice
///
/// This doubles as the table configuration of the table wizard. The ID type
/// is not stored; it is derived from `db_type` on every access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Go identifier prefix used for variables and file names (`order`)
    pub module_name: String,
    /// Database table name (`orders`)
    pub table_name: String,
    /// Go type name (`Order`)
    pub model_name: String,
    /// Column definitions in input order
    pub fields: Vec<Field>,
    /// Go module path of the target project
    pub project_import: String,
    /// Database type of the target project
    pub db_type: String,
}

impl ModelConfig {
    /// Create a model config for `table_name`
    ///
    /// `model_name` defaults to the table name with its first letter
    /// upper-cased and one trailing `s` removed, `module_name` to the model
    /// name with its first letter lower-cased.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the table name is blank or the resulting
    /// model or module name is empty.
    pub fn new(
        table_name: &str,
        model_name: Option<&str>,
        module_name: Option<&str>,
    ) -> Result<Self> {
        let table_name = table_name.trim();
        if table_name.is_empty() {
            return Err(GenerateError::InvalidInput(
                "table name cannot be empty".to_string(),
            ));
        }

        let model_name = model_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(|| TemplateHelpers::default_model_name(table_name), String::from);
        if model_name.is_empty() {
            return Err(GenerateError::InvalidInput(format!(
                "cannot derive a model name from table '{table_name}'"
            )));
        }

        let module_name = module_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(|| TemplateHelpers::default_module_name(&model_name), String::from);

        Ok(Self {
            module_name,
            table_name: table_name.to_string(),
            model_name,
            fields: Vec::new(),
            project_import: DEFAULT_PROJECT_IMPORT.to_string(),
            db_type: "mysql".to_string(),
        })
    }

    /// Set the column definitions
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    /// Set the Go module path of the target project
    #[must_use]
    pub fn with_project_import(mut self, project_import: impl Into<String>) -> Self {
        self.project_import = project_import.into();
        self
    }

    /// Set the database type
    #[must_use]
    pub fn with_db_type(mut self, db_type: impl Into<String>) -> Self {
        self.db_type = db_type.into();
        self
    }

    /// Go type of the primary key, derived from the database type
    #[must_use]
    pub fn id_type(&self) -> &'static str {
        TemplateHelpers::id_type(&self.db_type)
    }

    /// Lower-cased module name used as the generated file stem
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.module_name.to_lowercase()
    }
}
