//! Table mode: one CRUD slice for an existing project
//!
//! Generates, for a table such as `orders`:
//! - `internal/model/order.go`
//! - `internal/dao/order_dao.go`
//! - `internal/service/order_service.go`
//! - `internal/api/order_handler.go`
//!
//! and registers the new handler provider, either by patching
//! `pkg/wire/provider.go` or through the provider manifest.

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

use super::GeneratedFile;
use crate::config::ModelConfig;
use crate::error::{GenerateError, Result};
use crate::template::{TemplateKey, TemplateRenderer, TemplateSource};
use crate::wire::{
    ManifestOutcome, PatchStrategy, ProviderEntry, ProviderManifest, ProviderPatcher,
    RegistryStrategy, MANIFEST_FILE, PROVIDER_FILE, REGISTRY_FILE,
};

/// How the slice was registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// Provider file patched in place
    Patched {
        /// Patched file
        path: PathBuf,
        /// Strategy that succeeded
        strategy: PatchStrategy,
    },
    /// Manifest updated and registry regenerated
    Manifest(ManifestOutcome),
}

/// A file change computed without touching the disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChange {
    /// Absolute or project-relative path
    pub path: PathBuf,
    /// Current content, empty for new files
    pub before: String,
    /// Content after the change
    pub after: String,
}

/// What a table generation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    /// Files written
    pub files: Vec<PathBuf>,
    /// Provider registration
    pub registration: Registration,
}

/// Generates a model/DAO/service/handler slice for one table
#[derive(Debug)]
pub struct TableGenerator<'a> {
    config: &'a ModelConfig,
    renderer: &'a TemplateRenderer,
    project_root: PathBuf,
}

impl<'a> TableGenerator<'a> {
    /// Create a generator writing below `project_root`
    pub fn new(
        config: &'a ModelConfig,
        renderer: &'a TemplateRenderer,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            renderer,
            project_root: project_root.into(),
        }
    }

    /// Root of the target project
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Template variables for this table
    #[must_use]
    pub fn model_metadata(&self) -> serde_json::Value {
        let fields: Vec<_> = self
            .config
            .fields
            .iter()
            .map(|field| {
                json!({
                    "name": field.name,
                    "go_name": field.go_name(),
                    "type": field.field_type,
                    "tag": field.effective_tag(),
                    "comment": field.comment,
                })
            })
            .collect();

        json!({
            "module_name": self.config.module_name,
            "table_name": self.config.table_name,
            "model_name": self.config.model_name,
            "fields": fields,
            "project_import": self.config.project_import,
            "id_type": self.config.id_type(),
            "db_type": self.config.db_type,
            "file_stem": self.config.file_stem(),
        })
    }

    /// Render the four slice files in memory
    ///
    /// # Errors
    ///
    /// Returns the first template failure.
    pub fn render_files(&self) -> Result<Vec<GeneratedFile>> {
        let metadata = self.model_metadata();
        let stem = self.config.file_stem();
        let model = &self.config.model_name;

        let outputs = [
            (TemplateKey::Model, format!("internal/model/{stem}.go"), format!("{model} model")),
            (TemplateKey::Dao, format!("internal/dao/{stem}_dao.go"), format!("{model} DAO")),
            (
                TemplateKey::Service,
                format!("internal/service/{stem}_service.go"),
                format!("{model} service"),
            ),
            (
                TemplateKey::Handler,
                format!("internal/api/{stem}_handler.go"),
                format!("{model} handler"),
            ),
        ];

        outputs
            .into_iter()
            .map(|(key, path, description)| {
                let content = self
                    .renderer
                    .render_to_string(&TemplateSource::Catalog(key), &metadata)?;
                Ok(GeneratedFile {
                    path: PathBuf::from(path),
                    content,
                    description,
                })
            })
            .collect()
    }

    /// Write the four slice files
    ///
    /// Existing files are overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn generate(&self) -> Result<Vec<PathBuf>> {
        tracing::info!(
            table = %self.config.table_name,
            model = %self.config.model_name,
            root = %self.project_root.display(),
            "generating table slice"
        );
        self.render_files()?
            .iter()
            .map(|file| file.write(&self.project_root))
            .collect()
    }

    /// Register the slice's provider
    ///
    /// # Errors
    ///
    /// With [`RegistryStrategy::Patch`], a missing provider file is an I/O
    /// error and a provider file without a usable marker is a not-found
    /// error; the file is left unchanged in both cases.
    pub fn register(&self, strategy: RegistryStrategy) -> Result<Registration> {
        let entry = ProviderEntry::from(self.config);
        tracing::debug!(model = %entry.model_name, %strategy, "registering provider");
        match strategy {
            RegistryStrategy::Patch => {
                let path = self.project_root.join(PROVIDER_FILE);
                let strategy =
                    ProviderPatcher::new(self.renderer).register_provider(&path, &entry)?;
                Ok(Registration::Patched { path, strategy })
            }
            RegistryStrategy::Manifest => ProviderManifest::register_in_project(
                self.renderer,
                &self.project_root,
                entry,
                &self.config.project_import,
            )
            .map(Registration::Manifest),
        }
    }

    /// Write the slice and register it
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate) and [`register`](Self::register).
    /// Files written before a registration failure stay on disk.
    pub fn run(&self, strategy: RegistryStrategy) -> Result<TableReport> {
        let files = self.generate()?;
        let registration = self.register(strategy)?;
        Ok(TableReport { files, registration })
    }

    /// Compute every change [`run`](Self::run) would make, without writing
    ///
    /// # Errors
    ///
    /// Returns the same rendering, reading and not-found errors `run` would.
    pub fn plan(&self, strategy: RegistryStrategy) -> Result<Vec<PlannedChange>> {
        let mut changes = Vec::new();

        for file in self.render_files()? {
            let path = self.project_root.join(&file.path);
            changes.push(PlannedChange {
                before: read_if_exists(&path)?,
                path,
                after: file.content,
            });
        }

        let entry = ProviderEntry::from(self.config);
        match strategy {
            RegistryStrategy::Patch => {
                let patch = ProviderPatcher::new(self.renderer)
                    .plan(&self.project_root.join(PROVIDER_FILE), &entry)?;
                changes.push(PlannedChange {
                    path: patch.path,
                    before: patch.before,
                    after: patch.after,
                });
            }
            RegistryStrategy::Manifest => {
                let manifest_path = self.project_root.join(MANIFEST_FILE);
                let registry_path = self.project_root.join(REGISTRY_FILE);
                let mut manifest = ProviderManifest::load(&manifest_path)?;
                let manifest_before = read_if_exists(&manifest_path)?;

                if manifest.register(entry) {
                    changes.push(PlannedChange {
                        path: manifest_path,
                        before: manifest_before,
                        after: toml::to_string_pretty(&manifest)?,
                    });
                }
                changes.push(PlannedChange {
                    before: read_if_exists(&registry_path)?,
                    after: manifest.render_registry(self.renderer, &self.config.project_import)?,
                    path: registry_path,
                });
            }
        }

        Ok(changes)
    }
}

fn read_if_exists(path: &Path) -> Result<String> {
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path).map_err(|source| GenerateError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}
