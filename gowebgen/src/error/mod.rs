//! Error types and error handling

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the generator
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

/// Coarse classification of a [`GenerateError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Directory or file create, read or write failed
    Io,
    /// Template could not be parsed or executed
    Template,
    /// An expected marker or delimiter is absent from a patched file
    NotFound,
    /// Malformed user input
    Validation,
    /// Settings file or manifest could not be parsed or serialized
    Config,
}

/// Generator error type
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Parent directory of a target could not be created
    #[error("failed to create directory {}", path.display())]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Template file could not be read
    #[error("failed to read template {}", path.display())]
    ReadTemplate {
        /// Template file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Template text is malformed
    #[error("failed to parse template {name}")]
    TemplateParse {
        /// Template name or path used for diagnostics
        name: String,
        /// Underlying handlebars error
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// Template references a field the data does not provide, or a helper failed
    #[error("failed to render template {name}")]
    Render {
        /// Template name or path used for diagnostics
        name: String,
        /// Underlying handlebars error
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// Target file could not be created
    #[error("failed to create file {}", path.display())]
    CreateFile {
        /// Target file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// File could not be read
    #[error("failed to read file {}", path.display())]
    ReadFile {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// File could not be written
    #[error("failed to write file {}", path.display())]
    WriteFile {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Insertion marker absent from the file being patched
    #[error("`{marker}` not found in {}", path.display())]
    MarkerNotFound {
        /// Patched file
        path: PathBuf,
        /// Marker that was searched for
        marker: String,
    },

    /// A field specification line could not be parsed
    #[error("invalid field definition '{line}': {reason}")]
    InvalidField {
        /// Offending input line
        line: String,
        /// Why it was rejected
        reason: String,
    },

    /// Other malformed input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Provider manifest could not be parsed
    #[error("failed to parse provider manifest {}", path.display())]
    ManifestParse {
        /// Manifest path
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// Provider manifest could not be serialized
    #[error("failed to serialize provider manifest")]
    ManifestSerialize(#[from] toml::ser::Error),

    /// Settings could not be loaded
    #[error("failed to load settings")]
    Settings(#[from] Box<figment::Error>),
}

impl GenerateError {
    /// Classify this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CreateDir { .. }
            | Self::ReadTemplate { .. }
            | Self::CreateFile { .. }
            | Self::ReadFile { .. }
            | Self::WriteFile { .. } => ErrorKind::Io,
            Self::TemplateParse { .. } | Self::Render { .. } => ErrorKind::Template,
            Self::MarkerNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidField { .. } | Self::InvalidInput(_) => ErrorKind::Validation,
            Self::ManifestParse { .. } | Self::ManifestSerialize(_) | Self::Settings(_) => {
                ErrorKind::Config
            }
        }
    }

    /// Whether this is a missing-marker failure
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound)
    }
}

impl From<figment::Error> for GenerateError {
    fn from(err: figment::Error) -> Self {
        Self::Settings(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = GenerateError::MarkerNotFound {
            path: PathBuf::from("pkg/wire/provider.go"),
            marker: "var ProviderSet".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.is_not_found());

        let err = GenerateError::InvalidField {
            line: "amount".to_string(),
            reason: "missing type".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = GenerateError::CreateDir {
            path: PathBuf::from("/nope"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.kind(), ErrorKind::Io);

        let parse = handlebars::Template::compile("{{#each fields}}").unwrap_err();
        let err = GenerateError::TemplateParse {
            name: "model.go.hbs".to_string(),
            source: Box::new(parse),
        };
        assert_eq!(err.kind(), ErrorKind::Template);
    }

    #[test]
    fn test_display_names_path() {
        let err = GenerateError::WriteFile {
            path: PathBuf::from("internal/model/order.go"),
            source: io::Error::from(io::ErrorKind::Other),
        };
        assert_eq!(err.to_string(), "failed to write file internal/model/order.go");
    }
}
