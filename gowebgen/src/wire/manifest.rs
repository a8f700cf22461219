//! Provider manifest and generated registry
//!
//! Instead of searching the hand-editable provider file for an insertion
//! point, slices can be recorded in a tool-owned manifest:
//!
//! ```toml
//! [[provider]]
//! model_name = "Order"
//! table_name = "orders"
//! module_name = "order"
//! ```
//!
//! Every change regenerates `pkg/wire/registry_gen.go` wholesale, one provider
//! block per entry followed by a `RegistrySet` aggregating them. Project mode
//! writes the empty registry so `InitApp` can list `RegistrySet` from the
//! start.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use super::patcher::ProviderPatcher;
use super::ProviderEntry;
use crate::error::{GenerateError, Result};
use crate::template::{write_output, TemplateRenderer};

/// Manifest path inside a generated project
pub const MANIFEST_FILE: &str = "pkg/wire/providers.toml";

/// Generated registry path inside a generated project
pub const REGISTRY_FILE: &str = "pkg/wire/registry_gen.go";

/// Registered slices, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderManifest {
    /// One entry per model
    #[serde(default, rename = "provider")]
    pub providers: Vec<ProviderEntry>,
}

/// Result of a manifest registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestOutcome {
    /// Whether the entry was new
    pub added: bool,
    /// Manifest file
    pub manifest_path: PathBuf,
    /// Regenerated registry file
    pub registry_path: PathBuf,
}

impl ProviderManifest {
    /// Load a manifest, or an empty one if `path` does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| GenerateError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| GenerateError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the manifest to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = toml::to_string_pretty(self)?;
        write_output(path, &text)
    }

    /// Whether a model is already registered
    #[must_use]
    pub fn contains(&self, model_name: &str) -> bool {
        self.providers.iter().any(|p| p.model_name == model_name)
    }

    /// Add an entry unless its model is already present
    ///
    /// Returns `true` if the entry was added.
    pub fn register(&mut self, entry: ProviderEntry) -> bool {
        if self.contains(&entry.model_name) {
            return false;
        }
        self.providers.push(entry);
        true
    }

    /// Render the registry source for all entries
    ///
    /// An empty manifest renders an empty `RegistrySet` importing only wire.
    ///
    /// # Errors
    ///
    /// Returns a template error if a provider block fails to render.
    pub fn render_registry(
        &self,
        renderer: &TemplateRenderer,
        project_import: &str,
    ) -> Result<String> {
        let mut out =
            String::from("// Code generated by gowebgen. DO NOT EDIT.\n\npackage wire\n\n");

        if self.providers.is_empty() {
            out.push_str("import \"github.com/google/wire\"\n\n");
            out.push_str("// RegistrySet groups every generated table provider\n");
            out.push_str("var RegistrySet = wire.NewSet()\n");
            return Ok(out);
        }

        let patcher = ProviderPatcher::new(renderer);
        out.push_str("import (\n\t\"github.com/google/wire\"\n\t\"gorm.io/gorm\"\n\n");
        let _ = writeln!(out, "\t\"{project_import}/internal/api\"\n)");

        for entry in &self.providers {
            out.push('\n');
            out.push_str(patcher.render_block(entry)?.trim_end_matches('\n'));
            out.push('\n');
        }

        out.push_str("\n// RegistrySet groups every generated table provider\n");
        out.push_str("var RegistrySet = wire.NewSet(\n");
        for entry in &self.providers {
            let _ = writeln!(out, "\t{},", entry.set_name());
        }
        out.push_str(")\n");

        Ok(out)
    }

    /// Register `entry` in the project at `project_root`
    ///
    /// The registry is regenerated when the entry is new or the registry file
    /// is missing. Registering a known model twice changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be loaded or saved, or the
    /// registry cannot be rendered or written.
    pub fn register_in_project(
        renderer: &TemplateRenderer,
        project_root: &Path,
        entry: ProviderEntry,
        project_import: &str,
    ) -> Result<ManifestOutcome> {
        let manifest_path = project_root.join(MANIFEST_FILE);
        let registry_path = project_root.join(REGISTRY_FILE);

        let mut manifest = Self::load(&manifest_path)?;
        let model = entry.model_name.clone();
        let added = manifest.register(entry);

        if added {
            manifest.save(&manifest_path)?;
        } else {
            tracing::info!(model = %model, "provider already in manifest");
        }

        if added || !registry_path.exists() {
            let registry = manifest.render_registry(renderer, project_import)?;
            write_output(&registry_path, &registry)?;
            tracing::info!(
                path = %registry_path.display(),
                entries = manifest.providers.len(),
                "regenerated registry"
            );
        }

        Ok(ManifestOutcome {
            added,
            manifest_path,
            registry_path,
        })
    }
}
