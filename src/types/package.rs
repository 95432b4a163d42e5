// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::function::ObjectReference;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Packages are only listed for existence, so source and deployment archives
/// are kept as untyped JSON.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "fission.io", version = "v1", kind = "Package")]
#[kube(namespaced)]
pub struct PackageSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<ObjectReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment: Option<serde_json::Value>,
    #[serde(default, rename = "buildcmd", skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
}
