use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use arc_swap::ArcSwapOption;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::config::OAuthClientConfig;
use super::error::TokenError;
use super::source::{AcquiredToken, OAuthTokenSource, TokenSource};
use crate::SecretString;

/// Cached access token and the instant it stops being handed out.
struct CachedToken {
    value: SecretString,
    stale_at: Instant,
    generation: TokenGeneration,
}

/// Identifies one acquired token of a [`Token`] handle.
///
/// [`BearerAuthService`](super::BearerAuthService) stores the generation it
/// sent in the response extensions, so a rejected token can be invalidated
/// without dropping a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenGeneration(u64);

/// Handle for obtaining `OAuth2` bearer tokens.
///
/// The token is acquired on first use and re-acquired on the first call
/// after it goes stale. Reads are lock-free (`ArcSwapOption`); acquisitions
/// are serialized by an async mutex, so callers that find the token stale at
/// the same time share a single request to the token endpoint.
///
/// `Token` is [`Clone`] + [`Send`] + [`Sync`]; clones share one cache.
#[derive(Clone)]
pub struct Token {
    cache: Arc<ArcSwapOption<CachedToken>>,
    refresh_gate: Arc<Mutex<()>>,
    generations: Arc<AtomicU64>,
    source: Arc<dyn TokenSource>,
    refresh_offset: Duration,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("refresh_offset", &self.refresh_offset)
            .finish_non_exhaustive()
    }
}

impl Token {
    /// Validate the configuration and prepare the token source.
    ///
    /// No token is fetched here; the first [`get`](Self::get) does that.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ConfigError`] if the config is invalid, or
    /// [`TokenError::Http`] if the HTTP client cannot be built.
    pub fn new(config: OAuthClientConfig) -> Result<Self, TokenError> {
        config.validate()?;
        let source = OAuthTokenSource::new(&config)?;
        Ok(Self::from_source(Arc::new(source), config.refresh_offset))
    }

    /// Build a handle over any [`TokenSource`].
    #[must_use]
    pub fn from_source(source: Arc<dyn TokenSource>, refresh_offset: Duration) -> Self {
        Self {
            cache: Arc::new(ArcSwapOption::empty()),
            refresh_gate: Arc::new(Mutex::new(())),
            generations: Arc::new(AtomicU64::new(0)),
            source,
            refresh_offset,
        }
    }

    /// Return a token that is not stale, acquiring one if needed.
    ///
    /// # Errors
    ///
    /// Returns the [`TokenError`] of a failed acquisition. Nothing is cached
    /// on failure, so the next call tries again.
    pub async fn get(&self) -> Result<SecretString, TokenError> {
        self.lease().await.map(|(value, _)| value)
    }

    /// Like [`get`](Self::get), also returning the generation of the token.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn lease(&self) -> Result<(SecretString, TokenGeneration), TokenError> {
        if let Some(leased) = self.fresh() {
            return Ok(leased);
        }

        let _gate = self.refresh_gate.lock().await;
        // another caller may have refreshed while we waited
        if let Some(leased) = self.fresh() {
            return Ok(leased);
        }

        let AcquiredToken {
            access_token,
            lifetime,
        } = self.source.request_token().await?;

        let stale_at = Instant::now() + stale_after(lifetime, self.refresh_offset);
        let generation = TokenGeneration(self.generations.fetch_add(1, Ordering::Relaxed) + 1);
        self.cache.store(Some(Arc::new(CachedToken {
            value: access_token.clone(),
            stale_at,
            generation,
        })));
        tracing::debug!(
            lifetime_secs = lifetime.as_secs(),
            "cached new OAuth2 access token"
        );

        Ok((access_token, generation))
    }

    /// Drop the cached token; the next [`get`](Self::get) acquires a new one.
    ///
    /// Call this after a 401 from the resource server.
    pub fn invalidate(&self) {
        self.cache.store(None);
        tracing::debug!("OAuth2 access token invalidated");
    }

    /// Drop the cached token only if it is still `generation`.
    ///
    /// Returns `false` when the cache already holds a different token (or
    /// none), which is left untouched.
    #[must_use]
    pub fn invalidate_generation(&self, generation: TokenGeneration) -> bool {
        let current = self.cache.load();
        let Some(cached) = current.as_ref() else {
            return false;
        };
        if cached.generation != generation {
            tracing::debug!("rejected OAuth2 token already replaced; keeping the newer one");
            return false;
        }

        let previous = self.cache.compare_and_swap(&current, None::<Arc<CachedToken>>);
        let swapped = previous
            .as_ref()
            .is_some_and(|prev| Arc::ptr_eq(prev, cached));
        if swapped {
            tracing::debug!("OAuth2 access token invalidated");
        }
        swapped
    }

    fn fresh(&self) -> Option<(SecretString, TokenGeneration)> {
        let guard = self.cache.load();
        guard
            .as_ref()
            .filter(|cached| Instant::now() < cached.stale_at)
            .map(|cached| (cached.value.clone(), cached.generation))
    }
}

/// Longest a token is cached, whatever `expires_in` the server reports.
pub const MAX_CACHE_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Time after acquisition at which a token goes stale.
///
/// - lifetime is first capped at [`MAX_CACHE_LIFETIME`]
/// - `offset < lifetime`: `offset` before expiry
/// - otherwise: half of the lifetime
/// - zero lifetime: immediately
fn stale_after(lifetime: Duration, refresh_offset: Duration) -> Duration {
    let lifetime = lifetime.min(MAX_CACHE_LIFETIME);
    if refresh_offset < lifetime {
        lifetime - refresh_offset
    } else {
        lifetime / 2
    }
}
