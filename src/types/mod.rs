// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fission custom resource types read by the pre-upgrade checks.

pub mod function;
pub mod package;

pub use function::{Function, FunctionSpec, ObjectReference, PackageRef};
pub use package::{Package, PackageSpec};
