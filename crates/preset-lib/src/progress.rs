//! Progress reporting for capture and restore runs
//!
//! Populate and Apply emit one event per workload plus a per-kind summary.
//! The sink is injected by the caller, so the scaling logic stays free of
//! console concerns and tests can record the exact event stream.

use crate::preset::WorkloadKind;

/// A single status update emitted while populating or applying a preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleEvent {
    /// A workload was read from the cluster and added to the preset.
    Captured {
        kind: WorkloadKind,
        name: String,
        replicas: i32,
    },
    /// Listing one workload kind failed; the other kinds still proceed.
    ListFailed { kind: WorkloadKind, error: String },
    /// All workloads of one kind were captured.
    KindCaptured { kind: WorkloadKind, count: usize },
    /// A workload was scaled to the recorded count.
    Scaled {
        kind: WorkloadKind,
        name: String,
        replicas: i32,
    },
    /// Dry-run preview of the change a real apply would make.
    WouldScale {
        kind: WorkloadKind,
        name: String,
        current: i32,
        target: i32,
    },
    /// The recorded workload no longer exists in the namespace.
    Missing { kind: WorkloadKind, name: String },
    /// Scaling one workload failed; remaining entries still proceed.
    ScaleFailed {
        kind: WorkloadKind,
        name: String,
        error: String,
    },
    /// All entries of one kind were processed.
    KindApplied { kind: WorkloadKind, count: usize },
}

/// Receiver for [`ScaleEvent`]s.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ScaleEvent);
}

/// Sink that discards every event.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: ScaleEvent) {}
}
