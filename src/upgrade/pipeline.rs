// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Runs the pre-upgrade checks in their required order.

use crate::error::Result;
use crate::upgrade::client::PreUpgradeTaskClient;
use tracing::info;

/// What the pre-upgrade run did to the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreUpgradeOutcome {
    /// No earlier installation was found, nothing was touched
    FreshInstall,
    /// An earlier installation was found and migrated
    Upgraded { role_bindings_created: bool },
}

/// Run the checks: validate references, revoke the cluster role bindings and
/// grant the namespaced roles. Stops at the first unrecoverable error; every
/// step is idempotent, so a failed run can be repeated once the cause is fixed.
pub async fn run_pre_upgrade_checks(client: &PreUpgradeTaskClient) -> Result<PreUpgradeOutcome> {
    if !client.is_fission_reinstall().await {
        info!("No previous Fission installation found, skipping pre-upgrade checks");
        return Ok(PreUpgradeOutcome::FreshInstall);
    }

    client.verify_function_spec_references().await?;
    client.remove_cluster_admin_roles_for_fission_sas().await?;
    let role_bindings_created = client.setup_role_bindings().await?;

    Ok(PreUpgradeOutcome::Upgraded {
        role_bindings_created,
    })
}
