// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster role binding removal and idempotent role binding grants

use crate::constants::RBAC_API_GROUP;
use crate::kubernetes::retry::{is_conflict, is_not_found, retry, Outcome};
use k8s_openapi::api::rbac::v1::{ClusterRoleBinding, RoleBinding, RoleRef, Subject};
use kube::{
    api::{DeleteParams, ObjectMeta, Patch, PatchParams, PostParams},
    Api, Client, ResourceExt,
};
use serde_json::json;
use tracing::{debug, info, instrument};

const SERVICE_ACCOUNT_KIND: &str = "ServiceAccount";

/// A namespaced grant of a role to a service account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleBindingGrant {
    pub name: String,
    pub namespace: String,
    pub role: String,
    pub role_kind: String,
    pub service_account: String,
    pub service_account_namespace: String,
}

impl RoleBindingGrant {
    fn subject(&self) -> Subject {
        Subject {
            kind: SERVICE_ACCOUNT_KIND.to_string(),
            name: self.service_account.clone(),
            namespace: Some(self.service_account_namespace.clone()),
            api_group: None,
        }
    }

    /// Whether the binding already lists this grant's service account
    pub fn is_granted_by(&self, binding: &RoleBinding) -> bool {
        binding.subjects.iter().flatten().any(|s| {
            s.kind == SERVICE_ACCOUNT_KIND
                && s.name == self.service_account
                && s.namespace.as_deref() == Some(self.service_account_namespace.as_str())
        })
    }

    fn to_role_binding(&self) -> RoleBinding {
        RoleBinding {
            metadata: ObjectMeta {
                name: Some(self.name.clone()),
                namespace: Some(self.namespace.clone()),
                ..Default::default()
            },
            role_ref: RoleRef {
                api_group: RBAC_API_GROUP.to_string(),
                kind: self.role_kind.clone(),
                name: self.role.clone(),
            },
            subjects: Some(vec![self.subject()]),
        }
    }
}

/// Delete a cluster role binding, retrying transient failures.
/// A binding that does not exist counts as deleted.
#[instrument(skip(client))]
pub async fn delete_cluster_role_binding(
    client: &Client,
    name: &str,
    max_attempts: u32,
) -> Result<(), kube::Error> {
    let bindings: Api<ClusterRoleBinding> = Api::all(client.clone());
    let dp = DeleteParams::default();

    match retry(max_attempts, is_not_found, || bindings.delete(name, &dp)).await {
        Outcome::Succeeded(_) => {
            info!("Deleted cluster role binding {}", name);
            Ok(())
        }
        Outcome::Benign(_) => {
            debug!("Cluster role binding {} does not exist", name);
            Ok(())
        }
        Outcome::Exhausted { error, .. } => Err(error),
    }
}

/// Ensure a role binding grants the role to the service account.
///
/// Creates the binding if it is missing and adds the subject if the binding
/// exists without it. A binding that already grants the subject is left
/// untouched. Conflicts from concurrent writers are retried from a fresh read,
/// up to `max_attempts`.
#[instrument(skip(client, grant), fields(role_binding = %grant.name, service_account = %grant.service_account))]
pub async fn ensure_role_binding(
    client: &Client,
    grant: &RoleBindingGrant,
    max_attempts: u32,
) -> Result<(), kube::Error> {
    let bindings: Api<RoleBinding> = Api::namespaced(client.clone(), &grant.namespace);

    // Conflicts are the only retried failure here, everything else is returned as is
    match retry(
        max_attempts,
        |e| !is_conflict(e),
        || try_ensure_role_binding(&bindings, grant),
    )
    .await
    {
        Outcome::Succeeded(()) => Ok(()),
        Outcome::Benign(error) | Outcome::Exhausted { error, .. } => Err(error),
    }
}

async fn try_ensure_role_binding(
    bindings: &Api<RoleBinding>,
    grant: &RoleBindingGrant,
) -> Result<(), kube::Error> {
    match bindings.get(&grant.name).await {
        Ok(existing) if grant.is_granted_by(&existing) => {
            debug!(
                "Role binding {}/{} already grants {} to {}/{}",
                grant.namespace,
                grant.name,
                grant.role,
                grant.service_account_namespace,
                grant.service_account
            );
            Ok(())
        }
        Ok(existing) => {
            info!(
                "Adding service account {}/{} to role binding {}/{}",
                grant.service_account_namespace, grant.service_account, grant.namespace, grant.name
            );
            let mut subjects = existing.subjects.clone().unwrap_or_default();
            subjects.push(grant.subject());

            // Guarded by resourceVersion so a concurrent update surfaces as a 409
            let patch = json!({
                "metadata": { "resourceVersion": existing.resource_version() },
                "subjects": subjects,
            });
            bindings
                .patch(&grant.name, &PatchParams::default(), &Patch::Merge(&patch))
                .await?;
            Ok(())
        }
        Err(e) if is_not_found(&e) => {
            info!(
                "Creating role binding {}/{} for service account {}/{}",
                grant.namespace, grant.name, grant.service_account_namespace, grant.service_account
            );
            bindings
                .create(&PostParams::default(), &grant.to_role_binding())
                .await?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}
