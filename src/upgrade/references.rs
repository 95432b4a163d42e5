// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace-locality checks for the objects a Function references.

use crate::types::Function;
use kube::ResourceExt;
use std::fmt;

/// Kind of object referenced from a Function spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Secret,
    ConfigMap,
    Package,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ReferenceKind::Secret => "secret",
            ReferenceKind::ConfigMap => "configmap",
            ReferenceKind::Package => "package",
        };
        f.write_str(kind)
    }
}

/// A Function referencing an object outside its own namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceViolation {
    pub kind: ReferenceKind,
    pub function_name: String,
    pub function_namespace: String,
    pub referenced_name: String,
    pub referenced_namespace: String,
}

impl fmt::Display for ReferenceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "function {}.{} cannot reference a {} {} in namespace {}",
            self.function_name,
            self.function_namespace,
            self.kind,
            self.referenced_name,
            self.referenced_namespace
        )
    }
}

/// Join violations into a single line for error reports
pub fn summarize(violations: &[ReferenceViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collect every reference that leaves its Function's namespace.
///
/// All functions are scanned; nothing short-circuits on the first violation.
pub fn find_reference_violations(functions: &[Function]) -> Vec<ReferenceViolation> {
    functions.iter().flat_map(function_violations).collect()
}

fn function_violations(function: &Function) -> Vec<ReferenceViolation> {
    let name = function.name_any();
    let namespace = function.namespace().unwrap_or_default();
    let package = function.package_ref();

    let secrets = function
        .secrets()
        .iter()
        .map(|r| (ReferenceKind::Secret, &r.name, &r.namespace));
    let config_maps = function
        .config_maps()
        .iter()
        .map(|r| (ReferenceKind::ConfigMap, &r.name, &r.namespace));
    let packages = std::iter::once((ReferenceKind::Package, &package.name, &package.namespace));

    secrets
        .chain(config_maps)
        .chain(packages)
        .filter(|(_, _, ref_namespace)| **ref_namespace != namespace)
        .map(|(kind, ref_name, ref_namespace)| ReferenceViolation {
            kind,
            function_name: name.clone(),
            function_namespace: namespace.clone(),
            referenced_name: ref_name.clone(),
            referenced_namespace: ref_namespace.clone(),
        })
        .collect()
}
