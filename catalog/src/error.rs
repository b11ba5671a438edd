//! Error types for catalog files.
//!
//! Covers every failure between a path on disk and a usable
//! [`Options`](cmdline_options_core::Options): I/O, serialization, unknown
//! file formats and definitions rejected by validation.

use std::path::PathBuf;

use cmdline_options_core::DefinitionError;
use thiserror::Error;

/// Errors that can occur while loading, saving or building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is not `.json`, `.yaml` or `.yml`.
    #[error("unsupported catalog format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The catalog parsed but its definitions are unusable.
    #[error("invalid catalog definition: {}", join(.0))]
    InvalidDefinition(Vec<DefinitionError>),
}

fn join(errors: &[DefinitionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for results with [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
