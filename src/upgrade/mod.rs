// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pre-upgrade checks and migrations for an existing Fission installation.

pub mod client;
pub mod pipeline;
pub mod references;

pub use client::PreUpgradeTaskClient;
pub use pipeline::{run_pre_upgrade_checks, PreUpgradeOutcome};
pub use references::{ReferenceKind, ReferenceViolation};
