//! Error types for preset capture and restore

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::Violation;

/// Errors surfaced by the preset library.
///
/// Connection failures are fatal to the whole command; access failures are
/// scoped to a single list or scale call and are recovered by the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A cluster handle could not be constructed. Nothing proceeds after this.
    #[error("could not connect to cluster: {0}")]
    ClusterConnection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A single list or scale request failed at the transport/API level.
    #[error("cluster request failed: {0}")]
    ClusterAccess(#[from] kube::Error),

    /// The save target already exists. No overwrite, no merge.
    #[error("preset file {} already exists", .0.display())]
    FileExists(PathBuf),

    #[error("could not read preset file {}: {source}", .path.display())]
    ReadPreset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write preset file {}: {source}", .path.display())]
    WritePreset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preset file could not be serialized or parsed.
    #[error("invalid preset file: {0}")]
    ParsePreset(#[from] serde_yaml::Error),

    /// Structural defects in a loaded preset. Fatal to restore.
    #[error("preset failed validation with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),
}

impl Error {
    /// Wrap a client construction failure.
    pub fn connection<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::ClusterConnection(Box::new(source))
    }
}
