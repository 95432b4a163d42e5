// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The pre-upgrade task client and its five checks.

use crate::config::Config;
use crate::constants::{
    cluster_role_bindings, roles, service_accounts, DEFAULT_NAMESPACE, FUNCTION_CRD, MAX_RETRIES,
};
use crate::error::{PreUpgradeError, Result};
use crate::kubernetes::retry::never;
use crate::kubernetes::{
    delete_cluster_role_binding, ensure_role_binding, is_crd_registered, retry, Outcome,
    RoleBindingGrant,
};
use crate::types::{Function, Package};
use crate::upgrade::references::find_reference_violations;
use kube::{api::ListParams, Api, Client};
use tracing::{error, info, instrument, warn};

/// Runs the pre-upgrade checks against a cluster.
///
/// `fn_pod_namespace` is where function pods and the fetcher service account
/// live; `envbuilder_namespace` is where builders and the builder service
/// account live.
pub struct PreUpgradeTaskClient {
    client: Client,
    fn_pod_namespace: String,
    envbuilder_namespace: String,
}

impl PreUpgradeTaskClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            fn_pod_namespace: config.fn_pod_namespace.clone(),
            envbuilder_namespace: config.envbuilder_namespace.clone(),
        }
    }

    /// Check whether Fission was installed on this cluster before, by looking
    /// for the Function CRD.
    ///
    /// Errors never propagate: if the CRD cannot be found or the API keeps
    /// failing, this is treated as a fresh install.
    #[instrument(skip(self))]
    pub async fn is_fission_reinstall(&self) -> bool {
        is_crd_registered(&self.client, FUNCTION_CRD, MAX_RETRIES).await
    }

    /// Verify that every Function only references secrets, configmaps and
    /// packages in its own namespace.
    ///
    /// Every violation in the cluster is reported, not only the first one.
    #[instrument(skip(self))]
    pub async fn verify_function_spec_references(&self) -> Result<()> {
        info!("Verifying function spec references for all functions in the cluster");

        let functions: Api<Function> = Api::all(self.client.clone());
        let lp = ListParams::default();

        let (attempts, source) = match retry(MAX_RETRIES, never, || functions.list(&lp)).await {
            Outcome::Succeeded(function_list) => {
                return verify_references(&function_list.items);
            }
            Outcome::Exhausted { attempts, error } => (attempts, error),
            Outcome::Benign(_) => unreachable!("no list error is benign"),
        };

        error!("Error listing functions after {} attempts: {}", attempts, source);
        Err(PreUpgradeError::ListFunctions { attempts, source })
    }

    /// Delete the cluster role bindings older releases created for the
    /// fission-builder and fission-fetcher service accounts.
    ///
    /// Bindings that are already gone are skipped, so this is safe to re-run.
    #[instrument(skip(self))]
    pub async fn remove_cluster_admin_roles_for_fission_sas(&self) -> Result<()> {
        for name in cluster_role_bindings::ALL {
            if let Err(source) = delete_cluster_role_binding(&self.client, name, MAX_RETRIES).await
            {
                error!("Error deleting cluster role binding {}: {}", name, source);
                return Err(PreUpgradeError::DeleteClusterRoleBinding {
                    name: name.to_string(),
                    source,
                });
            }
        }

        info!("Removed cluster admin privileges for fission-builder and fission-fetcher service accounts");
        Ok(())
    }

    /// Check whether the default namespace holds any packages or functions,
    /// in which case the fetcher and builder still need namespaced grants there.
    ///
    /// List errors count as "nothing found". This is a single attempt per
    /// list, on purpose: it only avoids creating grants nobody needs.
    #[instrument(skip(self))]
    pub async fn need_role_bindings(&self) -> bool {
        let lp = ListParams::default().limit(1);

        let packages: Api<Package> = Api::namespaced(self.client.clone(), DEFAULT_NAMESPACE);
        match packages.list(&lp).await {
            Ok(list) if !list.items.is_empty() => return true,
            Ok(_) => {}
            Err(e) => warn!("Error listing packages in {}: {}", DEFAULT_NAMESPACE, e),
        }

        let functions: Api<Function> = Api::namespaced(self.client.clone(), DEFAULT_NAMESPACE);
        match functions.list(&lp).await {
            Ok(list) if !list.items.is_empty() => return true,
            Ok(_) => {}
            Err(e) => warn!("Error listing functions in {}: {}", DEFAULT_NAMESPACE, e),
        }

        false
    }

    /// The namespaced grants that replace the removed cluster role bindings
    pub fn role_binding_grants(&self) -> [RoleBindingGrant; 3] {
        let grant = |name: &str, role: &str, service_account: &str, sa_namespace: &str| {
            RoleBindingGrant {
                name: name.to_string(),
                namespace: DEFAULT_NAMESPACE.to_string(),
                role: role.to_string(),
                role_kind: roles::CLUSTER_ROLE_KIND.to_string(),
                service_account: service_account.to_string(),
                service_account_namespace: sa_namespace.to_string(),
            }
        };

        [
            grant(
                roles::PACKAGE_GETTER_BINDING,
                roles::PACKAGE_GETTER,
                service_accounts::FETCHER,
                &self.fn_pod_namespace,
            ),
            grant(
                roles::PACKAGE_GETTER_BINDING,
                roles::PACKAGE_GETTER,
                service_accounts::BUILDER,
                &self.envbuilder_namespace,
            ),
            grant(
                roles::SECRET_CONFIGMAP_GETTER_BINDING,
                roles::SECRET_CONFIGMAP_GETTER,
                service_accounts::FETCHER,
                &self.fn_pod_namespace,
            ),
        ]
    }

    /// Grant the fetcher and builder service accounts the namespaced roles
    /// they need for objects left in the default namespace.
    ///
    /// Returns whether any grants were needed. Already present grants are left
    /// as they are.
    #[instrument(skip(self))]
    pub async fn setup_role_bindings(&self) -> Result<bool> {
        if !self.need_role_bindings().await {
            info!("No fission objects found, so no role bindings to create");
            return Ok(false);
        }

        // Objects from a previous installation are still around, and the
        // cluster role bindings that served them are gone by now.
        for grant in self.role_binding_grants() {
            if let Err(source) = ensure_role_binding(&self.client, &grant, MAX_RETRIES).await {
                error!(
                    "Error setting up role binding {} for service account {}/{}: {}",
                    grant.name, grant.service_account_namespace, grant.service_account, source
                );
                return Err(PreUpgradeError::RoleBindingSetup {
                    role_binding: grant.name,
                    service_account: grant.service_account,
                    service_account_namespace: grant.service_account_namespace,
                    source,
                });
            }
        }

        info!(
            "Created role bindings {} and {} in {} namespace",
            roles::PACKAGE_GETTER_BINDING,
            roles::SECRET_CONFIGMAP_GETTER_BINDING,
            DEFAULT_NAMESPACE
        );
        Ok(true)
    }
}

fn verify_references(functions: &[Function]) -> Result<()> {
    let violations = find_reference_violations(functions);
    if !violations.is_empty() {
        for violation in &violations {
            error!("{}", violation);
        }
        return Err(PreUpgradeError::ReferenceViolations(violations));
    }

    info!("Function spec references verified for {} functions", functions.len());
    Ok(())
}
