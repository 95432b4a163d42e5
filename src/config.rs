// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{ensure, Result};
use clap::Parser;

/// Pre-upgrade configuration, from command line flags or environment variables
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "fission-preupgrade", version, about = "Prepare a Fission installation for upgrade")]
pub struct Config {
    /// Namespace where function pods (and the fetcher service account) run
    #[arg(long = "fn_pod_namespace", env = "FN_POD_NAMESPACE")]
    pub fn_pod_namespace: String,

    /// Namespace where environment builders (and the builder service account) run
    #[arg(long = "envbuilder_namespace", env = "ENVBUILDER_NAMESPACE")]
    pub envbuilder_namespace: String,
}

impl Config {
    /// Parse flags, falling back to environment variables
    pub fn from_args() -> Result<Self> {
        Config::parse().validated()
    }

    fn validated(self) -> Result<Self> {
        ensure!(
            !self.fn_pod_namespace.trim().is_empty(),
            "function pod namespace must not be empty"
        );
        ensure!(
            !self.envbuilder_namespace.trim().is_empty(),
            "environment builder namespace must not be empty"
        );
        Ok(self)
    }
}
