//! Embedded template catalog
//!
//! Every template the generator can emit is compiled into the binary and
//! addressed by a [`TemplateKey`]. The file name of a key is also the name
//! looked up in override directories, see [`super::loader::TemplateLoader`].

use std::fmt;

/// Stable identifier of an embedded template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateKey {
    /// `config/config.yaml`
    ConfigYaml,
    /// `cmd/main.go`
    Main,
    /// `internal/api/router.go`
    Router,
    /// `internal/dao/base_dao.go`
    BaseDao,
    /// `internal/service/base_service.go`
    BaseService,
    /// `pkg/config/config.go`
    ConfigLoader,
    /// `pkg/database/database.go`
    Database,
    /// `pkg/cache/redis.go`
    Redis,
    /// `pkg/logger/logger.go`
    Logger,
    /// `internal/model/user.go`
    UserModel,
    /// `internal/dao/user_dao.go`
    UserDao,
    /// `internal/service/user_service.go`
    UserService,
    /// `internal/api/user_handler.go`
    UserHandler,
    /// `pkg/wire/wire.go`
    Wire,
    /// `pkg/wire/provider.go`
    Provider,
    /// `go.mod`
    GoMod,
    /// Table mode model
    Model,
    /// Table mode DAO
    Dao,
    /// Table mode service
    Service,
    /// Table mode HTTP handler
    Handler,
    /// Provider block inserted into the DI provider file
    WireProvider,
}

impl TemplateKey {
    /// Every key, project templates first
    pub const ALL: &'static [Self] = &[
        Self::ConfigYaml,
        Self::Main,
        Self::Router,
        Self::BaseDao,
        Self::BaseService,
        Self::ConfigLoader,
        Self::Database,
        Self::Redis,
        Self::Logger,
        Self::UserModel,
        Self::UserDao,
        Self::UserService,
        Self::UserHandler,
        Self::Wire,
        Self::Provider,
        Self::GoMod,
        Self::Model,
        Self::Dao,
        Self::Service,
        Self::Handler,
        Self::WireProvider,
    ];

    /// Templates used by table mode, seeded into generated projects
    pub const TABLE: &'static [Self] = &[
        Self::Model,
        Self::Dao,
        Self::Service,
        Self::Handler,
        Self::WireProvider,
    ];

    /// File name of this template, both embedded and in override directories
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::ConfigYaml => "config.yaml.hbs",
            Self::Main => "main.go.hbs",
            Self::Router => "router.go.hbs",
            Self::BaseDao => "base_dao.go.hbs",
            Self::BaseService => "base_service.go.hbs",
            Self::ConfigLoader => "config_loader.go.hbs",
            Self::Database => "database.go.hbs",
            Self::Redis => "redis.go.hbs",
            Self::Logger => "logger.go.hbs",
            Self::UserModel => "user_model.go.hbs",
            Self::UserDao => "user_dao.go.hbs",
            Self::UserService => "user_service.go.hbs",
            Self::UserHandler => "user_handler.go.hbs",
            Self::Wire => "wire.go.hbs",
            Self::Provider => "provider.go.hbs",
            Self::GoMod => "go.mod.hbs",
            Self::Model => "model.go.hbs",
            Self::Dao => "dao.go.hbs",
            Self::Service => "service.go.hbs",
            Self::Handler => "handler.go.hbs",
            Self::WireProvider => "wire_provider.go.hbs",
        }
    }

    /// Embedded template text
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::ConfigYaml => include_str!("defaults/config.yaml.hbs"),
            Self::Main => include_str!("defaults/main.go.hbs"),
            Self::Router => include_str!("defaults/router.go.hbs"),
            Self::BaseDao => include_str!("defaults/base_dao.go.hbs"),
            Self::BaseService => include_str!("defaults/base_service.go.hbs"),
            Self::ConfigLoader => include_str!("defaults/config_loader.go.hbs"),
            Self::Database => include_str!("defaults/database.go.hbs"),
            Self::Redis => include_str!("defaults/redis.go.hbs"),
            Self::Logger => include_str!("defaults/logger.go.hbs"),
            Self::UserModel => include_str!("defaults/user_model.go.hbs"),
            Self::UserDao => include_str!("defaults/user_dao.go.hbs"),
            Self::UserService => include_str!("defaults/user_service.go.hbs"),
            Self::UserHandler => include_str!("defaults/user_handler.go.hbs"),
            Self::Wire => include_str!("defaults/wire.go.hbs"),
            Self::Provider => include_str!("defaults/provider.go.hbs"),
            Self::GoMod => include_str!("defaults/go.mod.hbs"),
            Self::Model => include_str!("defaults/model.go.hbs"),
            Self::Dao => include_str!("defaults/dao.go.hbs"),
            Self::Service => include_str!("defaults/service.go.hbs"),
            Self::Handler => include_str!("defaults/handler.go.hbs"),
            Self::WireProvider => include_str!("defaults/wire_provider.go.hbs"),
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_file_names_are_unique() {
        let names: HashSet<_> = TemplateKey::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(names.len(), TemplateKey::ALL.len());
    }

    #[test]
    fn test_every_template_is_embedded() {
        for key in TemplateKey::ALL {
            assert!(!key.source().trim().is_empty(), "empty template: {key}");
        }
    }

    #[test]
    fn test_table_templates() {
        assert_eq!(TemplateKey::TABLE.len(), 5);
        assert!(TemplateKey::TABLE.iter().all(|key| TemplateKey::ALL.contains(key)));
        assert!(!TemplateKey::TABLE.contains(&TemplateKey::UserHandler));
    }

    #[test]
    fn test_provider_template_carries_marker() {
        assert!(TemplateKey::Provider
            .source()
            .contains("var ProviderSet = wire.NewSet("));
    }
}
