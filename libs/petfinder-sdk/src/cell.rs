use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::client::PetfinderClient;
use crate::config::ClientConfig;
use crate::error::InitError;

/// Holds the outcome of a single client construction.
///
/// The first caller of [`get_or_init`](Self::get_or_init) runs the
/// initializer; concurrent callers wait for it. The outcome is kept for the
/// lifetime of the cell, failures included: a failed construction is not
/// attempted again.
#[derive(Debug, Default)]
pub struct ClientCell {
    outcome: OnceCell<Result<Arc<PetfinderClient>, InitError>>,
}

impl ClientCell {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outcome: OnceCell::const_new(),
        }
    }

    /// Return the stored outcome, running `init` if this is the first call.
    ///
    /// # Errors
    ///
    /// The [`InitError`] of the (single) failed construction.
    pub async fn get_or_init<F, Fut>(&self, init: F) -> Result<Arc<PetfinderClient>, InitError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<PetfinderClient, InitError>>,
    {
        self.outcome
            .get_or_init(|| async {
                let outcome = init().await.map(Arc::new);
                match &outcome {
                    Ok(client) => {
                        tracing::info!(base_url = client.base_url(), "Petfinder client initialized");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Petfinder client initialization failed");
                    }
                }
                outcome
            })
            .await
            .clone()
    }

    /// The stored outcome, if initialization already ran.
    #[must_use]
    pub fn get(&self) -> Option<Result<Arc<PetfinderClient>, InitError>> {
        self.outcome.get().cloned()
    }
}

static GLOBAL_CLIENT: ClientCell = ClientCell::new();

/// Process-wide client built from `PF_CLIENT_ID`, `PF_CLIENT_SECRET` and
/// `PF_BASE_URL` on first use.
///
/// # Errors
///
/// [`InitError::MissingCredential`] when a credential is not set, or another
/// [`InitError`] if construction failed. The same error is returned for the
/// rest of the process lifetime.
pub async fn get_client() -> Result<Arc<PetfinderClient>, InitError> {
    GLOBAL_CLIENT
        .get_or_init(|| async { init_from_env() })
        .await
}

fn init_from_env() -> Result<PetfinderClient, InitError> {
    let config = ClientConfig::from_env()?;
    PetfinderClient::new(config).map_err(InitError::from)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn test_client() -> PetfinderClient {
        PetfinderClient::new(
            ClientConfig::new("client-abc", "secret-xyz").with_base_url("http://127.0.0.1:1/v2"),
        )
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_callers_share_one_success() {
        let cell = Arc::new(ClientCell::new());
        let attempts = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let attempts = Arc::clone(&attempts);
                tokio::spawn(async move {
                    cell.get_or_init(|| async move {
                        attempts.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(test_client())
                    })
                    .await
                })
            })
            .collect();

        let mut clients = Vec::new();
        for handle in handles {
            clients.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(clients.iter().all(|c| Arc::ptr_eq(c, &clients[0])));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_callers_share_one_failure() {
        let cell = Arc::new(ClientCell::new());
        let attempts = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let attempts = Arc::clone(&attempts);
                tokio::spawn(async move {
                    cell.get_or_init(|| async move {
                        attempts.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Err(InitError::MissingCredential("PF_CLIENT_ID"))
                    })
                    .await
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(
                handle.await.unwrap().unwrap_err(),
                InitError::MissingCredential("PF_CLIENT_ID")
            );
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_is_sticky() {
        let cell = ClientCell::new();
        assert!(cell.get().is_none());

        let first = cell
            .get_or_init(|| async { Err(InitError::Config("bad".into())) })
            .await;
        assert_eq!(first.unwrap_err(), InitError::Config("bad".into()));

        let second = cell.get_or_init(|| async { Ok(test_client()) }).await;
        assert_eq!(second.unwrap_err(), InitError::Config("bad".into()));
        assert!(matches!(cell.get(), Some(Err(InitError::Config(_)))));
    }

    #[test]
    fn init_from_env_reports_missing_credentials() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PF_CLIENT_SECRET", "secret-xyz");
            assert_eq!(
                init_from_env().unwrap_err(),
                InitError::MissingCredential("PF_CLIENT_ID")
            );
            Ok(())
        });
    }
}
