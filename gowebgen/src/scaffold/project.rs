//! Full project generation
//!
//! Writes the directory layout, every project template, `go.mod` and an
//! empty table registry, then seeds `scripts/generator/templates/` with the
//! table templates so table mode can be customised per project.

use std::fs;
use std::iter;
use std::path::{Path, PathBuf};

use super::GeneratedFile;
use crate::config::ProjectConfig;
use crate::error::{GenerateError, Result};
use crate::template::{
    TemplateKey, TemplateLoader, TemplateRenderer, TemplateSource, PROJECT_TEMPLATE_DIR,
};
use crate::wire::{ProviderManifest, REGISTRY_FILE};

/// Directories created in every project, relative to its root
pub const PROJECT_DIRS: &[&str] = &[
    "cmd",
    "config",
    "internal/api",
    "internal/dao",
    "internal/middleware",
    "internal/model",
    "internal/service",
    "pkg/cache",
    "pkg/config",
    "pkg/database",
    "pkg/logger",
    "pkg/utils",
    "pkg/wire",
    "scripts/generator",
    PROJECT_TEMPLATE_DIR,
    "test",
];

/// Mapping from catalog entry to output path
struct FileMapping {
    key: TemplateKey,
    output: &'static str,
    description: &'static str,
}

const PROJECT_FILES: &[FileMapping] = &[
    FileMapping {
        key: TemplateKey::ConfigYaml,
        output: "config/config.yaml",
        description: "application config",
    },
    FileMapping {
        key: TemplateKey::Main,
        output: "cmd/main.go",
        description: "program entry point",
    },
    FileMapping {
        key: TemplateKey::BaseService,
        output: "internal/service/base_service.go",
        description: "base service",
    },
    FileMapping {
        key: TemplateKey::BaseDao,
        output: "internal/dao/base_dao.go",
        description: "base DAO",
    },
    FileMapping {
        key: TemplateKey::ConfigLoader,
        output: "pkg/config/config.go",
        description: "config loader",
    },
    FileMapping {
        key: TemplateKey::Database,
        output: "pkg/database/database.go",
        description: "database init",
    },
    FileMapping {
        key: TemplateKey::Redis,
        output: "pkg/cache/redis.go",
        description: "redis init",
    },
    FileMapping {
        key: TemplateKey::Logger,
        output: "pkg/logger/logger.go",
        description: "logger init",
    },
    FileMapping {
        key: TemplateKey::Router,
        output: "internal/api/router.go",
        description: "HTTP router",
    },
    FileMapping {
        key: TemplateKey::UserModel,
        output: "internal/model/user.go",
        description: "user model",
    },
    FileMapping {
        key: TemplateKey::UserDao,
        output: "internal/dao/user_dao.go",
        description: "user DAO",
    },
    FileMapping {
        key: TemplateKey::UserService,
        output: "internal/service/user_service.go",
        description: "user service",
    },
    FileMapping {
        key: TemplateKey::UserHandler,
        output: "internal/api/user_handler.go",
        description: "user handler",
    },
    FileMapping {
        key: TemplateKey::Wire,
        output: "pkg/wire/wire.go",
        description: "DI aggregate",
    },
    FileMapping {
        key: TemplateKey::Provider,
        output: "pkg/wire/provider.go",
        description: "DI providers",
    },
    FileMapping {
        key: TemplateKey::GoMod,
        output: "go.mod",
        description: "module descriptor",
    },
];

/// What a project generation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReport {
    /// Project root
    pub root: PathBuf,
    /// Files written, in generation order
    pub files: Vec<PathBuf>,
    /// Table templates seeded into the project
    pub templates: Vec<PathBuf>,
}

/// Generates a complete project skeleton
#[derive(Debug)]
pub struct ProjectGenerator<'a> {
    config: &'a ProjectConfig,
    renderer: &'a TemplateRenderer,
}

impl<'a> ProjectGenerator<'a> {
    /// Create a generator for `config`
    #[must_use]
    pub const fn new(config: &'a ProjectConfig, renderer: &'a TemplateRenderer) -> Self {
        Self { config, renderer }
    }

    /// Project root directory
    #[must_use]
    pub fn root(&self) -> PathBuf {
        PathBuf::from(&self.config.project_path)
    }

    /// Relative paths of every file this generator writes
    pub fn outputs() -> impl Iterator<Item = &'static str> {
        PROJECT_FILES
            .iter()
            .map(|mapping| mapping.output)
            .chain(iter::once(REGISTRY_FILE))
    }

    /// Render every project file in memory
    ///
    /// # Errors
    ///
    /// Returns the first template failure.
    pub fn render_files(&self) -> Result<Vec<GeneratedFile>> {
        let mut files = PROJECT_FILES
            .iter()
            .map(|mapping| {
                let content = self
                    .renderer
                    .render_to_string(&TemplateSource::Catalog(mapping.key), self.config)?;
                Ok(GeneratedFile {
                    path: PathBuf::from(mapping.output),
                    content,
                    description: mapping.description.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        files.push(GeneratedFile {
            path: PathBuf::from(REGISTRY_FILE),
            content: ProviderManifest::default()
                .render_registry(self.renderer, &self.config.project_name)?,
            description: "table registry".to_string(),
        });
        Ok(files)
    }

    /// Create the project directory layout
    ///
    /// # Errors
    ///
    /// Returns an error naming the first directory that cannot be created.
    pub fn create_structure(&self) -> Result<()> {
        let root = self.root();
        for dir in PROJECT_DIRS {
            let path = root.join(dir);
            fs::create_dir_all(&path)
                .map_err(|source| GenerateError::CreateDir { path, source })?;
        }
        tracing::debug!(
            root = %root.display(),
            dirs = PROJECT_DIRS.len(),
            "created project structure"
        );
        Ok(())
    }

    /// Generate the whole project
    ///
    /// All files are rendered before anything is written, so a template
    /// failure leaves the disk untouched. An I/O failure stops at the first
    /// file; files written before it stay on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory, template or file operation fails.
    pub fn generate(&self) -> Result<ProjectReport> {
        let root = self.root();
        tracing::info!(
            project = %self.config.project_name,
            root = %root.display(),
            db = %self.config.db_type,
            "generating project"
        );

        let rendered = self.render_files()?;
        self.create_structure()?;

        let files = rendered
            .iter()
            .map(|file| file.write(&root))
            .collect::<Result<Vec<_>>>()?;

        let templates = TemplateLoader::materialize(&template_dir(&root))?;

        Ok(ProjectReport { root, files, templates })
    }
}

/// Table template directory of the project at `root`
#[must_use]
pub fn template_dir(root: &Path) -> PathBuf {
    root.join(PROJECT_TEMPLATE_DIR)
}
