//! gowebgen: scaffolding for Go web services
//!
//! Generates a Go project skeleton built on Gin, GORM, Redis, Viper, Zap and
//! Wire, and adds CRUD slices for new tables to an existing project.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gowebgen::prelude::*;
//!
//! # fn main() -> gowebgen::error::Result<()> {
//! let renderer = TemplateRenderer::new(TemplateLoader::embedded_only());
//!
//! // Full project
//! let config = ProjectConfig {
//!     project_name: "github.com/acme/shop".to_string(),
//!     project_path: "./shop".to_string(),
//!     ..ProjectConfig::default()
//! };
//! ProjectGenerator::new(&config, &renderer).generate()?;
//!
//! // One table slice
//! let model = ModelConfig::new("orders", None, None)?
//!     .with_fields(parse_fields(&["amount float64"])?)
//!     .with_project_import("github.com/acme/shop");
//! TableGenerator::new(&model, &renderer, "./shop").run(RegistryStrategy::Patch)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`]: project and table configuration, settings file
//! - [`template`]: embedded templates, override lookup, rendering
//! - [`scaffold`]: project and table generators, field parser
//! - [`wire`]: provider registration (in-place patch or manifest)
//! - [`error`]: error taxonomy

pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;
pub mod template;
pub mod wire;

pub mod prelude {
    //! Convenience re-exports for common types

    pub use crate::config::{GeneratorSettings, ModelConfig, ProjectConfig};
    pub use crate::error::{ErrorKind, GenerateError};
    pub use crate::scaffold::field::{parse_fields, read_fields, Field};
    pub use crate::scaffold::{
        GeneratedFile, ProjectGenerator, Registration, TableGenerator, TemplateHelpers,
    };
    pub use crate::template::{TemplateKey, TemplateLoader, TemplateRenderer, TemplateSource};
    pub use crate::wire::{ProviderEntry, ProviderManifest, ProviderPatcher, RegistryStrategy};
}
