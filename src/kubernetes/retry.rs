// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bounded, immediate retries against the API server.
//!
//! The API server is eventually consistent, so a single failed call is not
//! conclusive. Operations are attempted up to a fixed ceiling with no delay
//! between attempts; the caller decides what an exhausted retry means.

use std::future::Future;
use tracing::debug;

/// Terminal result of a bounded retry
#[derive(Debug)]
pub enum Outcome<T, E> {
    /// An attempt returned `Ok`
    Succeeded(T),
    /// An attempt failed with an error the caller considers benign (e.g. not found)
    Benign(E),
    /// Every attempt failed; `error` is the last one observed
    Exhausted { attempts: u32, error: E },
}

/// Run `op` up to `max_attempts` times.
///
/// Stops at the first `Ok`, or at the first error for which `is_benign`
/// returns true. A ceiling of zero is treated as one attempt.
pub async fn retry<T, E, F, Fut, P>(max_attempts: u32, is_benign: P, mut op: F) -> Outcome<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Outcome::Succeeded(value),
            Err(e) if is_benign(&e) => return Outcome::Benign(e),
            Err(e) if attempt >= max_attempts => {
                return Outcome::Exhausted {
                    attempts: attempt,
                    error: e,
                }
            }
            Err(e) => {
                debug!("Attempt {}/{} failed: {}", attempt, max_attempts, e);
                attempt += 1;
            }
        }
    }
}

/// Check whether an API error is a 404 Not Found
pub fn is_not_found(error: &kube::Error) -> bool {
    matches!(error, kube::Error::Api(err) if err.code == 404)
}

/// Check whether an API error is a 409 Conflict (already exists or stale resourceVersion)
pub fn is_conflict(error: &kube::Error) -> bool {
    matches!(error, kube::Error::Api(err) if err.code == 409)
}

/// Never treat an error as benign
pub fn never<E>(_: &E) -> bool {
    false
}
