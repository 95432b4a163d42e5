// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for bounded retries, CRD checks, and RBAC grants.

pub mod crd;
pub mod rbac;
pub mod retry;

pub use crd::is_crd_registered;
pub use rbac::{delete_cluster_role_binding, ensure_role_binding, RoleBindingGrant};
pub use retry::{is_not_found, retry, Outcome};
