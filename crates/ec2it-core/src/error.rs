//! Error types for ec2it-core

use thiserror::Error;

use crate::types::ResourceKind;

/// Result type alias using ec2it-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for ec2it
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Neither an id nor a name was supplied to resolve a resource
    #[error("Either an id or a name is required to select an {kind}")]
    MissingSelector { kind: ResourceKind },

    /// No resource matched the given id or name
    #[error("No {kind} found matching '{selector}'")]
    NotFound {
        kind: ResourceKind,
        selector: String,
    },

    /// More than one resource carries the given Name tag
    #[error("{count} {kind}s share the Name tag '{name}'; use an id instead")]
    AmbiguousName {
        kind: ResourceKind,
        name: String,
        count: usize,
    },

    /// A value was neither given on the command line nor configured
    #[error("No {field} given and no configured default")]
    MissingDefault { field: String },

    /// An instance has no Name tag where one is required
    #[error("Instance {id} has no Name tag")]
    UnnamedInstance { id: String },

    /// No EBS snapshot is associated with the image yet
    #[error("No snapshot found for image {image_id}")]
    SnapshotMissing { image_id: String },

    /// An EC2 API call failed
    #[error("EC2 API error: {message}")]
    Api { message: String },
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create a missing selector error
    pub fn missing_selector(kind: ResourceKind) -> Self {
        Self::MissingSelector { kind }
    }

    /// Create a not found error
    pub fn not_found(kind: ResourceKind, selector: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            selector: selector.into(),
        }
    }

    /// Create an ambiguous name error
    pub fn ambiguous_name(kind: ResourceKind, name: impl Into<String>, count: usize) -> Self {
        Self::AmbiguousName {
            kind,
            name: name.into(),
            count,
        }
    }

    /// Create a missing default error
    pub fn missing_default(field: impl Into<String>) -> Self {
        Self::MissingDefault {
            field: field.into(),
        }
    }

    /// Create a snapshot missing error
    pub fn snapshot_missing(image_id: impl Into<String>) -> Self {
        Self::SnapshotMissing {
            image_id: image_id.into(),
        }
    }

    /// Create an API error from any displayable SDK error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }
}
