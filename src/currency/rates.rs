//! Exchange rates: HTTP source plus a time-boxed in-memory cache.
//!
//! Rates are quoted against USD (`1 USD = x CUR`).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Deserialize;

use super::CurrencyError;

const BASE_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// How long fetched rates are served before refetching.
pub const RATES_TTL: Duration = Duration::from_secs(60 * 60);

pub type Rates = HashMap<String, f64>;

/// `GET /v4/latest/USD` response
#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    rates: Rates,
}

/// exchangerate-api.com client
pub struct RatesClient {
    http_client: reqwest::Client,
    url: String,
}

impl RatesClient {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            url: BASE_URL.to_string(),
        }
    }

    /// Create a client for testing with custom endpoint URL
    #[cfg(test)]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub async fn fetch(&self) -> Result<Rates, CurrencyError> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CurrencyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CurrencyError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body: RatesResponse = response
            .json()
            .await
            .map_err(|e| CurrencyError::Parse(e.to_string()))?;

        if body.rates.is_empty() {
            return Err(CurrencyError::Parse("response has no rates".to_string()));
        }
        Ok(body.rates)
    }
}

struct Cached {
    fetched_at: Instant,
    rates: Arc<Rates>,
}

/// Rates fetched at most once per TTL.
///
/// When a refresh fails the previous rates, however old, keep being served.
pub struct RatesCache {
    client: RatesClient,
    ttl: Duration,
    cached: RwLock<Option<Cached>>,
}

impl RatesCache {
    pub fn new(client: RatesClient) -> Self {
        Self::with_ttl(client, RATES_TTL)
    }

    pub fn with_ttl(client: RatesClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            cached: RwLock::new(None),
        }
    }

    pub async fn rates(&self) -> Result<Arc<Rates>, CurrencyError> {
        if let Some(fresh) = self.fresh() {
            return Ok(fresh);
        }

        match self.client.fetch().await {
            Ok(rates) => {
                let rates = Arc::new(rates);
                tracing::debug!(count = rates.len(), "Fetched exchange rates");
                *self.cached.write() = Some(Cached {
                    fetched_at: Instant::now(),
                    rates: Arc::clone(&rates),
                });
                Ok(rates)
            }
            Err(e) => match self.cached.read().as_ref() {
                Some(stale) => {
                    tracing::warn!("Failed to refresh exchange rates, using previous: {e}");
                    Ok(Arc::clone(&stale.rates))
                }
                None => Err(e),
            },
        }
    }

    fn fresh(&self) -> Option<Arc<Rates>> {
        let guard = self.cached.read();
        let cached = guard.as_ref()?;
        (cached.fetched_at.elapsed() < self.ttl).then(|| Arc::clone(&cached.rates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BODY: &str = r#"{"provider": "https://www.exchangerate-api.com", "base": "USD",
        "date": "2025-02-03", "time_last_updated": 1738540801,
        "rates": {"USD": 1, "EUR": 0.92, "JPY": 155.2}}"#;

    async fn server_with(status: u16, body: &str, expected_calls: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(expected_calls)
            .mount(&server)
            .await;
        server
    }

    fn url(server: &MockServer) -> String {
        format!("{}/v4/latest/USD", server.uri())
    }

    #[tokio::test]
    async fn test_fetch_parses_rates() {
        let server = server_with(200, BODY, 1).await;

        let rates = RatesClient::with_url(url(&server)).fetch().await.unwrap();

        assert_eq!(rates["USD"], 1.0);
        assert_eq!(rates["JPY"], 155.2);
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let server = server_with(500, "", 1).await;

        let result = RatesClient::with_url(url(&server)).fetch().await;

        assert!(matches!(result, Err(CurrencyError::Network(_))));
    }

    #[tokio::test]
    async fn test_cache_fetches_once_within_ttl() {
        let server = server_with(200, BODY, 1).await;
        let cache = RatesCache::new(RatesClient::with_url(url(&server)));

        let first = cache.rates().await.unwrap();
        let second = cache.rates().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_cache_refetches_after_ttl() {
        let server = server_with(200, BODY, 2).await;
        let cache = RatesCache::with_ttl(RatesClient::with_url(url(&server)), Duration::ZERO);

        cache.rates().await.unwrap();
        cache.rates().await.unwrap();
    }

    #[tokio::test]
    async fn test_cache_serves_stale_on_refresh_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let cache = RatesCache::with_ttl(RatesClient::with_url(url(&server)), Duration::ZERO);

        cache.rates().await.unwrap();
        let stale = cache.rates().await.unwrap();

        assert_eq!(stale["EUR"], 0.92);
    }

    #[tokio::test]
    async fn test_cache_errors_without_previous_rates() {
        let server = server_with(503, "", 1).await;
        let cache = RatesCache::new(RatesClient::with_url(url(&server)));

        assert!(cache.rates().await.is_err());
    }
}
