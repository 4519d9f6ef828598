//! Cluster access layer
//!
//! Wraps the Kubernetes API behind the small [`WorkloadScaler`] contract the
//! preset engine consumes: list the workloads of a kind in a namespace, read
//! a single workload's desired scale, and set it. A missing workload is a
//! signal, not an error; only transport/API failures surface as errors.

use std::fmt::Debug;
use std::path::PathBuf;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::autoscaling::v1::Scale;
use kube::api::{ListParams, Patch, PatchParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Error;
use crate::preset::WorkloadKind;

/// How to authenticate against the cluster.
///
/// Selected once at startup and immutable for the lifetime of the handle.
/// The two modes are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterAuth {
    /// Local credential file.
    Kubeconfig(PathBuf),
    /// Ambient in-cluster identity from the mounted service account.
    ServiceAccount,
}

/// A workload name paired with its configured desired replica count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadScale {
    pub name: String,
    pub replicas: i32,
}

/// Result of a scale request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleOutcome {
    /// The workload existed; `replicas` is the count the API server reports
    /// after the update.
    Applied { replicas: i32 },
    /// The workload does not exist in the namespace.
    NotFound,
}

/// The cluster operations the preset engine depends on.
#[async_trait]
pub trait WorkloadScaler: Send + Sync {
    /// List workloads of `kind` in `namespace` with their desired replica
    /// counts, in the order the API server returns them.
    async fn list(&self, kind: WorkloadKind, namespace: &str) -> Result<Vec<WorkloadScale>, Error>;

    /// Read the desired replica count of a single workload, or `None` if it
    /// does not exist.
    async fn current_scale(
        &self,
        kind: WorkloadKind,
        namespace: &str,
        name: &str,
    ) -> Result<Option<i32>, Error>;

    /// Set the desired replica count of a single workload.
    async fn set_scale(
        &self,
        kind: WorkloadKind,
        namespace: &str,
        name: &str,
        replicas: i32,
    ) -> Result<ScaleOutcome, Error>;
}

/// Kubernetes-backed implementation of [`WorkloadScaler`].
pub struct ClusterClient {
    client: Client,
}

impl ClusterClient {
    /// Connect to the cluster using the given authentication mode.
    pub async fn connect(auth: &ClusterAuth) -> Result<Self, Error> {
        let config = match auth {
            ClusterAuth::Kubeconfig(path) => {
                debug!(path = %path.display(), "connecting via kubeconfig");
                let kubeconfig = Kubeconfig::read_from(path).map_err(Error::connection)?;
                Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                    .await
                    .map_err(Error::connection)?
            }
            ClusterAuth::ServiceAccount => {
                debug!("connecting via in-cluster service account");
                Config::incluster().map_err(Error::connection)?
            }
        };

        let client = Client::try_from(config).map_err(Error::connection)?;
        Ok(Self { client })
    }

    fn deployments(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn stateful_sets(&self, namespace: &str) -> Api<StatefulSet> {
        Api::namespaced(self.client.clone(), namespace)
    }

    async fn list_deployments(&self, namespace: &str) -> Result<Vec<WorkloadScale>, Error> {
        let list = self
            .deployments(namespace)
            .list(&ListParams::default())
            .await?;
        Ok(list
            .items
            .into_iter()
            .map(|item| WorkloadScale {
                name: item.metadata.name.unwrap_or_default(),
                // the API server defaults spec.replicas to 1
                replicas: item.spec.and_then(|spec| spec.replicas).unwrap_or(1),
            })
            .collect())
    }

    async fn list_stateful_sets(&self, namespace: &str) -> Result<Vec<WorkloadScale>, Error> {
        let list = self
            .stateful_sets(namespace)
            .list(&ListParams::default())
            .await?;
        Ok(list
            .items
            .into_iter()
            .map(|item| WorkloadScale {
                name: item.metadata.name.unwrap_or_default(),
                replicas: item.spec.and_then(|spec| spec.replicas).unwrap_or(1),
            })
            .collect())
    }
}

#[async_trait]
impl WorkloadScaler for ClusterClient {
    async fn list(&self, kind: WorkloadKind, namespace: &str) -> Result<Vec<WorkloadScale>, Error> {
        match kind {
            WorkloadKind::Deployment => self.list_deployments(namespace).await,
            WorkloadKind::StatefulSet => self.list_stateful_sets(namespace).await,
        }
    }

    async fn current_scale(
        &self,
        kind: WorkloadKind,
        namespace: &str,
        name: &str,
    ) -> Result<Option<i32>, Error> {
        match kind {
            WorkloadKind::Deployment => scale_of(&self.deployments(namespace), name).await,
            WorkloadKind::StatefulSet => scale_of(&self.stateful_sets(namespace), name).await,
        }
    }

    async fn set_scale(
        &self,
        kind: WorkloadKind,
        namespace: &str,
        name: &str,
        replicas: i32,
    ) -> Result<ScaleOutcome, Error> {
        match kind {
            WorkloadKind::Deployment => {
                set_scale_of(&self.deployments(namespace), name, replicas).await
            }
            WorkloadKind::StatefulSet => {
                set_scale_of(&self.stateful_sets(namespace), name, replicas).await
            }
        }
    }
}

/// Read the desired replica count via the scale subresource. A 404 means the
/// workload does not exist and is not an error.
async fn scale_of<K>(api: &Api<K>, name: &str) -> Result<Option<i32>, Error>
where
    K: Clone + DeserializeOwned + Debug,
{
    match api.get_scale(name).await {
        Ok(scale) => Ok(Some(desired_replicas(&scale))),
        Err(err) if is_not_found(&err) => Ok(None),
        Err(err) => Err(Error::ClusterAccess(err)),
    }
}

/// Read-then-write on the scale subresource, reporting whether the workload
/// existed and the replica count the API server applied.
async fn set_scale_of<K>(api: &Api<K>, name: &str, replicas: i32) -> Result<ScaleOutcome, Error>
where
    K: Clone + DeserializeOwned + Debug,
{
    match api.get_scale(name).await {
        Ok(_) => {}
        Err(err) if is_not_found(&err) => return Ok(ScaleOutcome::NotFound),
        Err(err) => return Err(Error::ClusterAccess(err)),
    }

    let patch: Patch<serde_json::Value> =
        Patch::Merge(serde_json::json!({ "spec": { "replicas": replicas } }));
    let scale = api
        .patch_scale(name, &PatchParams::default(), &patch)
        .await?;
    Ok(ScaleOutcome::Applied {
        replicas: desired_replicas(&scale),
    })
}

fn desired_replicas(scale: &Scale) -> i32 {
    scale
        .spec
        .as_ref()
        .and_then(|spec| spec.replicas)
        .unwrap_or(0)
}

fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(response) if response.code == 404)
}
