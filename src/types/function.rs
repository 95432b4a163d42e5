// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "fission.io", version = "v1", kind = "Function")]
#[kube(namespaced)]
pub struct FunctionSpec {
    #[serde(default)]
    pub environment: ObjectReference,
    #[serde(default)]
    pub package: FunctionPackageRef,
    // Stored as `null` when a function was created without any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets: Option<Vec<ObjectReference>>,
    #[serde(default, rename = "configmaps", skip_serializing_if = "Option::is_none")]
    pub config_maps: Option<Vec<ObjectReference>>,
}

/// A reference to a named object that carries its own namespace
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, schemars::JsonSchema)]
pub struct ObjectReference {
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
pub struct FunctionPackageRef {
    #[serde(default, rename = "packageref")]
    pub package_ref: PackageRef,
    #[serde(default, rename = "functionName", skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, schemars::JsonSchema)]
pub struct PackageRef {
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "resourceversion", skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
}

impl Function {
    pub fn secrets(&self) -> &[ObjectReference] {
        self.spec.secrets.as_deref().unwrap_or_default()
    }

    pub fn config_maps(&self) -> &[ObjectReference] {
        self.spec.config_maps.as_deref().unwrap_or_default()
    }

    /// The package this function is built from
    pub fn package_ref(&self) -> &PackageRef {
        &self.spec.package.package_ref
    }
}
