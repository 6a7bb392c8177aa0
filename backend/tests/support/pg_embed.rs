//! Embedded PostgreSQL bootstrap for the Diesel adapter suites.
//!
//! One cluster is shared per test binary; each test gets its own temporary
//! database, migrated from `backend/migrations`.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip these suites where the cluster cannot be
//! started. Without it, a failed bootstrap fails the test so CI breakage is
//! not masked.

use std::time::Duration;

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};

/// Attempts made before giving up on the shared cluster.
const MAX_ATTEMPTS: u32 = 4;

/// Base delay between attempts (doubles each time).
const RETRY_DELAY_MS: u64 = 500;

/// True when the error message looks like a flaky binary download.
fn is_transient_error(err: &str) -> bool {
    let transient_patterns = [
        "error decoding response body",
        "connection reset",
        "connection refused",
        "timed out",
        "temporarily unavailable",
        "dns error",
    ];

    let err_lower = err.to_lowercase();
    transient_patterns
        .iter()
        .any(|pattern| err_lower.contains(pattern))
}

/// Start (or reuse) the process-wide embedded cluster.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut last_error = String::new();
    for attempt in 0..MAX_ATTEMPTS {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt + 1 == MAX_ATTEMPTS || !is_transient_error(&last_error) {
                    break;
                }
                let delay = Duration::from_millis(RETRY_DELAY_MS * (1 << attempt));
                eprintln!("pg-embed: transient error, retrying in {delay:?}: {last_error}");
                std::thread::sleep(delay);
            }
        }
    }
    Err(last_error)
}

/// Create an empty temporary database on `cluster`.
///
/// The database is dropped when the returned guard is.
pub fn temporary_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    cluster
        .temporary_database(format!("bookshelf_{}", uuid::Uuid::new_v4().simple()))
        .map_err(|err| format!("create temporary database: {err:?}"))
}

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip (returning `None`) when `SKIP_TEST_CLUSTER` is truthy, else panic.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
