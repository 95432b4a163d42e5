// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use http_body_util::BodyExt;
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

type Route = (String, String);

/// A request received by the mock API server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

/// A mock HTTP service that returns predefined responses based on request paths.
///
/// Each route holds a queue of responses; the last one is repeated once the
/// queue is drained. Unmatched requests get a 404. Every request is recorded.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<Route, VecDeque<(u16, String)>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on_sequence(self, method: &str, path: &str, responses: &[(u16, String)]) -> Self {
        self.responses.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            responses.iter().cloned().collect(),
        );
        self
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on_sequence("GET", path, &[(status, body.to_string())])
    }

    /// Add successive responses for GET requests matching the exact path
    pub fn on_get_sequence(self, path: &str, responses: &[(u16, String)]) -> Self {
        self.on_sequence("GET", path, responses)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on_sequence("POST", path, &[(status, body.to_string())])
    }

    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on_sequence("PATCH", path, &[(status, body.to_string())])
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on_sequence("DELETE", path, &[(status, body.to_string())])
    }

    pub fn on_delete_sequence(self, path: &str, responses: &[(u16, String)]) -> Self {
        self.on_sequence("DELETE", path, responses)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_with(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Number of requests received for a method and exact path
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests_with(method, path).len()
    }

    /// Requests that would change cluster state
    pub fn mutating_requests(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != "GET")
            .collect()
    }

    fn next_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&(method.to_string(), path.to_string()))?;

        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let response = self.next_response(&method, &path);
        let requests = self.requests.clone();

        Box::pin(async move {
            let body = req.into_body().collect().await?.to_bytes().to_vec();
            requests.lock().unwrap().push(RecordedRequest {
                method,
                path,
                body,
            });

            let (status, body) = response.unwrap_or_else(|| {
                (404, status_json(404, "NotFound", "the server could not find the requested resource"))
            });
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))?)
        })
    }
}

/// Create a Status response body, as returned by the API server on errors
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// Create a mock CustomResourceDefinition JSON response
pub fn crd_json(name: &str) -> String {
    let (plural, group) = name.split_once('.').unwrap_or((name, "example.com"));
    serde_json::json!({
        "apiVersion": "apiextensions.k8s.io/v1",
        "kind": "CustomResourceDefinition",
        "metadata": { "name": name, "uid": "test-uid" },
        "spec": {
            "group": group,
            "names": { "kind": "Function", "plural": plural },
            "scope": "Namespaced",
            "versions": [{ "name": "v1", "served": true, "storage": true }]
        }
    })
    .to_string()
}

/// Create a Fission Function with the given secret and configmap references,
/// each given as (name, namespace). Empty reference lists are written as
/// `null`, the way Fission stores functions created without them.
pub fn function_value(
    name: &str,
    namespace: &str,
    secrets: &[(&str, &str)],
    configmaps: &[(&str, &str)],
    package: (&str, &str),
) -> serde_json::Value {
    let refs = |items: &[(&str, &str)]| -> serde_json::Value {
        if items.is_empty() {
            return serde_json::Value::Null;
        }
        items
            .iter()
            .map(|(n, ns)| serde_json::json!({ "name": n, "namespace": ns }))
            .collect()
    };

    serde_json::json!({
        "apiVersion": "fission.io/v1",
        "kind": "Function",
        "metadata": { "name": name, "namespace": namespace, "uid": format!("{}-uid", name) },
        "spec": {
            "environment": { "name": "nodejs", "namespace": namespace },
            "package": {
                "packageref": { "name": package.0, "namespace": package.1 },
                "functionName": name
            },
            "secrets": refs(secrets),
            "configmaps": refs(configmaps)
        }
    })
}

pub fn package_value(name: &str, namespace: &str) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "fission.io/v1",
        "kind": "Package",
        "metadata": { "name": name, "namespace": namespace, "uid": format!("{}-uid", name) },
        "spec": { "environment": { "name": "nodejs", "namespace": namespace } }
    })
}

/// Wrap items in a list response of the given kind
pub fn list_json(kind: &str, items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "apiVersion": "fission.io/v1",
        "kind": kind,
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

pub fn cluster_role_binding_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "rbac.authorization.k8s.io/v1",
        "kind": "ClusterRoleBinding",
        "metadata": { "name": name },
        "roleRef": {
            "apiGroup": "rbac.authorization.k8s.io",
            "kind": "ClusterRole",
            "name": "cluster-admin"
        },
        "subjects": []
    })
    .to_string()
}

/// Create a role binding in the default namespace granting a ClusterRole to
/// service accounts given as (name, namespace)
pub fn role_binding_json(name: &str, role: &str, service_accounts: &[(&str, &str)]) -> String {
    let subjects: Vec<_> = service_accounts
        .iter()
        .map(|(n, ns)| serde_json::json!({ "kind": "ServiceAccount", "name": n, "namespace": ns }))
        .collect();

    serde_json::json!({
        "apiVersion": "rbac.authorization.k8s.io/v1",
        "kind": "RoleBinding",
        "metadata": { "name": name, "namespace": "default", "resourceVersion": "1" },
        "roleRef": {
            "apiGroup": "rbac.authorization.k8s.io",
            "kind": "ClusterRole",
            "name": role
        },
        "subjects": subjects
    })
    .to_string()
}
