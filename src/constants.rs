// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Number of immediate attempts made against the API server before giving up
pub const MAX_RETRIES: u32 = 5;

/// Name of the Function CRD, used as the installation-history signal
pub const FUNCTION_CRD: &str = "functions.fission.io";

/// Namespace where pre-existing Fission objects may need namespaced grants
pub const DEFAULT_NAMESPACE: &str = "default";

/// Service accounts used by Fission workloads
pub mod service_accounts {
    pub const FETCHER: &str = "fission-fetcher";
    pub const BUILDER: &str = "fission-builder";
}

/// Cluster role bindings granted by older releases, revoked during upgrade
pub mod cluster_role_bindings {
    pub const BUILDER_CRD: &str = "fission-builder-crd";
    pub const FETCHER_CRD: &str = "fission-fetcher-crd";

    pub const ALL: [&str; 2] = [BUILDER_CRD, FETCHER_CRD];
}

/// Namespaced grants that replace the cluster-wide ones
pub mod roles {
    pub const CLUSTER_ROLE_KIND: &str = "ClusterRole";

    pub const PACKAGE_GETTER: &str = "package-getter";
    pub const PACKAGE_GETTER_BINDING: &str = "package-getter-binding";

    pub const SECRET_CONFIGMAP_GETTER: &str = "secret-configmap-getter";
    pub const SECRET_CONFIGMAP_GETTER_BINDING: &str = "secret-configmap-getter-binding";
}

/// RBAC API group used in role references
pub const RBAC_API_GROUP: &str = "rbac.authorization.k8s.io";
