//! Preset-based replica scaling for Kubernetes namespaces
//!
//! This crate provides the core functionality for:
//! - The preset data model (a snapshot of replica counts per namespace)
//! - Capturing a snapshot from live cluster state
//! - Restoring live cluster state from a snapshot
//! - Preset file persistence and validation
//! - Cluster access with explicit, mutually exclusive auth modes

pub mod cluster;
pub mod error;
pub mod preset;
pub mod progress;
pub mod store;
pub mod validate;

pub use cluster::{ClusterAuth, ClusterClient, ScaleOutcome, WorkloadScale, WorkloadScaler};
pub use error::Error;
pub use preset::{
    ApplyOptions, ApplySummary, PopulateSummary, Preset, ScalableResource, WorkloadKind,
};
pub use progress::{NullSink, ProgressSink, ScaleEvent};
pub use validate::{validate, Violation};
