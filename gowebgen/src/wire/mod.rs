//! Registration of generated slices with the DI provider set
//!
//! Two strategies are available:
//!
//! - [`patcher`] edits `pkg/wire/provider.go` in place by searching for the
//!   `var ProviderSet = wire.NewSet(` marker
//! - [`manifest`] records slices in `pkg/wire/providers.toml` and regenerates
//!   `pkg/wire/registry_gen.go` from it

pub mod manifest;
pub mod patcher;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ModelConfig;

pub use manifest::{ManifestOutcome, ProviderManifest, MANIFEST_FILE, REGISTRY_FILE};
pub use patcher::{
    PatchStrategy, ProviderPatch, ProviderPatcher, PROVIDER_FILE, PROVIDER_SET_MARKER,
};

/// One table slice as seen by the DI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// Go type name (`Order`)
    pub model_name: String,
    /// Database table name (`orders`)
    pub table_name: String,
    /// Go identifier prefix (`order`)
    pub module_name: String,
}

impl ProviderEntry {
    /// Name of the provider set declared for this slice
    ///
    /// # Examples
    ///
    /// ```
    /// # use gowebgen::wire::ProviderEntry;
    /// let entry = ProviderEntry {
    ///     model_name: "Order".into(),
    ///     table_name: "orders".into(),
    ///     module_name: "order".into(),
    /// };
    /// assert_eq!(entry.set_name(), "OrderSet");
    /// ```
    #[must_use]
    pub fn set_name(&self) -> String {
        format!("{}Set", self.model_name)
    }
}

impl From<&ModelConfig> for ProviderEntry {
    fn from(config: &ModelConfig) -> Self {
        Self {
            model_name: config.model_name.clone(),
            table_name: config.table_name.clone(),
            module_name: config.module_name.clone(),
        }
    }
}

/// How table mode registers a new slice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistryStrategy {
    /// Patch `pkg/wire/provider.go` in place
    #[default]
    Patch,
    /// Append to the manifest and regenerate the registry file
    Manifest,
}

impl fmt::Display for RegistryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patch => f.write_str("patch"),
            Self::Manifest => f.write_str("manifest"),
        }
    }
}
