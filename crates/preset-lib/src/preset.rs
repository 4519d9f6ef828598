//! Preset data model and the capture/restore engine
//!
//! A preset is a named, namespace-scoped snapshot of replica counts.
//! [`Preset::populate`] fills it from live cluster state and
//! [`Preset::apply`] pushes the stored counts back, one workload at a time.
//! Failures are isolated: a failed listing only loses its kind, a failed
//! scale call only loses its entry.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cluster::{ScaleOutcome, WorkloadScaler};
use crate::progress::{ProgressSink, ScaleEvent};

/// The two workload categories a preset manages, in their fixed processing
/// order: deployments first, then stateful sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
}

impl WorkloadKind {
    const ORDER: [WorkloadKind; 2] = [WorkloadKind::Deployment, WorkloadKind::StatefulSet];
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadKind::Deployment => write!(f, "deployment"),
            WorkloadKind::StatefulSet => write!(f, "statefulset"),
        }
    }
}

/// A single named workload's replica count within a preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalableResource {
    pub name: String,
    pub replicas: i32,
}

/// A named, namespace-scoped snapshot of replica counts.
///
/// Collection order follows the order the cluster returned the workloads.
/// Names are unique per collection upstream; the model never deduplicates
/// and never merges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub deployments: Vec<ScalableResource>,
    #[serde(default, rename = "stateFulSets")]
    pub stateful_sets: Vec<ScalableResource>,
}

/// Options for [`Preset::apply`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Preview the changes without writing to the cluster.
    pub dry_run: bool,
}

/// What a populate run captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateSummary {
    /// Workloads recorded across both kinds.
    pub captured: usize,
    /// Kinds whose listing failed and were left empty.
    pub failed_kinds: Vec<WorkloadKind>,
}

/// Per-entry outcomes of an apply run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    /// Entries scaled (or previewed, under dry-run).
    pub scaled: usize,
    /// Entries skipped because the workload no longer exists.
    pub missing: usize,
    /// Entries whose scale call failed.
    pub failed: usize,
}

impl Preset {
    /// Create an empty preset for the given namespace.
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            ..Self::default()
        }
    }

    fn collection(&self, kind: WorkloadKind) -> &[ScalableResource] {
        match kind {
            WorkloadKind::Deployment => &self.deployments,
            WorkloadKind::StatefulSet => &self.stateful_sets,
        }
    }

    fn collection_mut(&mut self, kind: WorkloadKind) -> &mut Vec<ScalableResource> {
        match kind {
            WorkloadKind::Deployment => &mut self.deployments,
            WorkloadKind::StatefulSet => &mut self.stateful_sets,
        }
    }

    /// Fill the preset's collections from the current state of its namespace.
    ///
    /// Kinds are processed in fixed order and independently: a failed listing
    /// leaves that kind's collection empty and is reported through the sink
    /// and the summary, while the remaining kinds still proceed. No retries;
    /// the resulting preset may be partial.
    pub async fn populate(
        &mut self,
        scaler: &dyn WorkloadScaler,
        sink: &dyn ProgressSink,
    ) -> PopulateSummary {
        debug!(preset = %self.name, namespace = %self.namespace, "populating preset");
        let mut summary = PopulateSummary::default();

        for kind in WorkloadKind::ORDER {
            match scaler.list(kind, &self.namespace).await {
                Ok(workloads) => {
                    let count = workloads.len();
                    for workload in workloads {
                        sink.emit(ScaleEvent::Captured {
                            kind,
                            name: workload.name.clone(),
                            replicas: workload.replicas,
                        });
                        self.collection_mut(kind).push(ScalableResource {
                            name: workload.name,
                            replicas: workload.replicas,
                        });
                    }
                    summary.captured += count;
                    sink.emit(ScaleEvent::KindCaptured { kind, count });
                }
                Err(err) => {
                    warn!(%kind, namespace = %self.namespace, error = %err, "listing failed");
                    summary.failed_kinds.push(kind);
                    sink.emit(ScaleEvent::ListFailed {
                        kind,
                        error: err.to_string(),
                    });
                }
            }
        }

        summary
    }

    /// Drive the namespace's replica counts toward the stored values.
    ///
    /// Entries are processed in stored order, each independently: a failed
    /// scale call or a missing workload is reported and the loop continues.
    /// The preset itself is never mutated; rerunning apply is the retry
    /// mechanism and converged entries are cluster-side no-ops.
    pub async fn apply(
        &self,
        scaler: &dyn WorkloadScaler,
        options: &ApplyOptions,
        sink: &dyn ProgressSink,
    ) -> ApplySummary {
        debug!(
            preset = %self.name,
            namespace = %self.namespace,
            dry_run = options.dry_run,
            "applying preset"
        );
        let mut summary = ApplySummary::default();

        for kind in WorkloadKind::ORDER {
            let resources = self.collection(kind);
            if resources.is_empty() {
                continue;
            }

            for resource in resources {
                if options.dry_run {
                    self.preview_entry(scaler, kind, resource, sink, &mut summary)
                        .await;
                } else {
                    self.apply_entry(scaler, kind, resource, sink, &mut summary)
                        .await;
                }
            }
            sink.emit(ScaleEvent::KindApplied {
                kind,
                count: resources.len(),
            });
        }

        summary
    }

    async fn apply_entry(
        &self,
        scaler: &dyn WorkloadScaler,
        kind: WorkloadKind,
        resource: &ScalableResource,
        sink: &dyn ProgressSink,
        summary: &mut ApplySummary,
    ) {
        match scaler
            .set_scale(kind, &self.namespace, &resource.name, resource.replicas)
            .await
        {
            Ok(ScaleOutcome::Applied { replicas }) => {
                summary.scaled += 1;
                sink.emit(ScaleEvent::Scaled {
                    kind,
                    name: resource.name.clone(),
                    replicas,
                });
            }
            Ok(ScaleOutcome::NotFound) => {
                summary.missing += 1;
                sink.emit(ScaleEvent::Missing {
                    kind,
                    name: resource.name.clone(),
                });
            }
            Err(err) => {
                warn!(%kind, name = %resource.name, error = %err, "scale failed");
                summary.failed += 1;
                sink.emit(ScaleEvent::ScaleFailed {
                    kind,
                    name: resource.name.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    /// Dry-run path: read the current scale and report the change a real
    /// apply would make, without writing anything.
    async fn preview_entry(
        &self,
        scaler: &dyn WorkloadScaler,
        kind: WorkloadKind,
        resource: &ScalableResource,
        sink: &dyn ProgressSink,
        summary: &mut ApplySummary,
    ) {
        match scaler
            .current_scale(kind, &self.namespace, &resource.name)
            .await
        {
            Ok(Some(current)) => {
                summary.scaled += 1;
                sink.emit(ScaleEvent::WouldScale {
                    kind,
                    name: resource.name.clone(),
                    current,
                    target: resource.replicas,
                });
            }
            Ok(None) => {
                summary.missing += 1;
                sink.emit(ScaleEvent::Missing {
                    kind,
                    name: resource.name.clone(),
                });
            }
            Err(err) => {
                warn!(%kind, name = %resource.name, error = %err, "scale probe failed");
                summary.failed += 1;
                sink.emit(ScaleEvent::ScaleFailed {
                    kind,
                    name: resource.name.clone(),
                    error: err.to_string(),
                });
            }
        }
    }
}
