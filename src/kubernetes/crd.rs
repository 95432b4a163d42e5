// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD registration checks

use crate::kubernetes::retry::{is_not_found, retry, Outcome};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{Api, Client};
use tracing::{debug, instrument, warn};

/// Check whether a CRD is registered in the cluster.
///
/// A 404 is conclusive and answers `false` at once. Any other error is
/// retried up to `max_attempts`; if no attempt gives a definitive answer the
/// CRD is reported as absent, so an unreachable API reads as a fresh install.
#[instrument(skip(client))]
pub async fn is_crd_registered(client: &Client, name: &str, max_attempts: u32) -> bool {
    let crds: Api<CustomResourceDefinition> = Api::all(client.clone());

    match retry(max_attempts, is_not_found, || crds.get(name)).await {
        Outcome::Succeeded(_) => {
            debug!("CRD {} is registered", name);
            true
        }
        Outcome::Benign(_) => {
            debug!("CRD {} is not registered", name);
            false
        }
        Outcome::Exhausted { attempts, error } => {
            warn!(
                "Could not determine whether CRD {} is registered after {} attempts, assuming it is not: {}",
                name, attempts, error
            );
            false
        }
    }
}
