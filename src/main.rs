// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fission_preupgrade::config::Config;
use fission_preupgrade::upgrade::{run_pre_upgrade_checks, PreUpgradeOutcome, PreUpgradeTaskClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Fission pre-upgrade checks");

    let config = Config::from_args()?;
    info!(
        "Configuration loaded: fn_pod_namespace={}, envbuilder_namespace={}",
        config.fn_pod_namespace, config.envbuilder_namespace
    );

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let task_client = PreUpgradeTaskClient::new(client, &config);

    match run_pre_upgrade_checks(&task_client).await {
        Ok(PreUpgradeOutcome::FreshInstall) => {
            info!("Fresh installation, nothing to migrate");
        }
        Ok(PreUpgradeOutcome::Upgraded {
            role_bindings_created,
        }) => {
            info!(
                "Pre-upgrade checks completed (role bindings created: {})",
                role_bindings_created
            );
        }
        Err(e) => {
            // The cluster is left as is; every step is safe to repeat after a fix
            error!("Pre-upgrade checks failed: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
