// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::upgrade::references::{summarize, ReferenceViolation};
use thiserror::Error;

/// Unrecoverable pre-upgrade failures. Any of these means the cluster must not
/// be upgraded until an operator has fixed the cause and re-run the checks.
#[derive(Error, Debug)]
pub enum PreUpgradeError {
    #[error("Failed to list functions after {attempts} attempts: {source}")]
    ListFunctions {
        attempts: u32,
        #[source]
        source: kube::Error,
    },

    #[error(
        "A function cannot reference secrets, configmaps and packages outside its own namespace ({} violations): {}",
        .0.len(),
        summarize(.0)
    )]
    ReferenceViolations(Vec<ReferenceViolation>),

    #[error("Failed to delete cluster role binding {name}: {source}")]
    DeleteClusterRoleBinding {
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error(
        "Failed to set up role binding {role_binding} for service account {service_account_namespace}/{service_account}: {source}"
    )]
    RoleBindingSetup {
        role_binding: String,
        service_account: String,
        service_account_namespace: String,
        #[source]
        source: kube::Error,
    },
}

pub type Result<T> = std::result::Result<T, PreUpgradeError>;
