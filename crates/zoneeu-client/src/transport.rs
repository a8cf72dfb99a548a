//! HTTP transport for the Zone.EU API
//!
//! One [`Client`] owns the connection pool, the credentials and the shared
//! rate limit state. Every API call funnels through [`Client::request`],
//! which serializes rate limiting and 429 retry so callers never see a
//! transient rate limit error.

use std::sync::Mutex;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, warn};

use zoneeu_core::config::Credentials;
use zoneeu_core::error::{Error, Result};

/// Production API endpoint
pub const BASE_URL: &str = "https://api.zone.eu/v2";

/// Requests per window assumed until the API reports otherwise
const DEFAULT_RATE_LIMIT: u32 = 60;

/// Backoff applied to a 429 without a Retry-After header
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Attempts per logical call when the API keeps answering 429
const MAX_RETRIES: u32 = 3;

/// Per-request timeout
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Client-side view of the API rate limit window
#[derive(Debug)]
struct RateLimit {
    limit: u32,
    remaining: u32,
    reset_at: Option<tokio::time::Instant>,
}

impl RateLimit {
    fn new() -> Self {
        Self {
            limit: DEFAULT_RATE_LIMIT,
            remaining: DEFAULT_RATE_LIMIT,
            reset_at: None,
        }
    }
}

/// Authenticated Zone.EU API client
///
/// Cheap to share behind an `Arc`; all interior state is the rate limit
/// window, which is mutex-guarded and never held across an await.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    rate: Mutex<RateLimit>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client against the production endpoint
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(credentials, BASE_URL)
    }

    /// Create a client against a custom endpoint (used by tests)
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Result<Self> {
        credentials.validate()?;
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("error building HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            credentials,
            rate: Mutex::new(RateLimit::new()),
        })
    }

    /// HTTP Basic authorization header value
    fn auth_header(&self) -> String {
        let token = BASE64.encode(format!(
            "{}:{}",
            self.credentials.username, self.credentials.api_key
        ));
        format!("Basic {token}")
    }

    /// Sleep until the rate limit window resets, if it is exhausted
    async fn wait_for_rate_limit(&self) {
        let wait = {
            let rate = self.rate.lock().unwrap();
            if rate.remaining > 0 {
                None
            } else {
                rate.reset_at
                    .filter(|at| *at > tokio::time::Instant::now())
            }
        };
        if let Some(at) = wait {
            debug!(until = ?at, "rate limit exhausted, waiting for reset");
            tokio::time::sleep_until(at).await;
        }
    }

    /// Record the window state the API reported on this response
    fn update_rate_limit(&self, response: &reqwest::Response) {
        let parse = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u32>().ok())
        };
        let limit = parse("X-Ratelimit-Limit");
        let remaining = parse("X-Ratelimit-Remaining");

        let mut rate = self.rate.lock().unwrap();
        if let Some(limit) = limit {
            rate.limit = limit;
        }
        if let Some(remaining) = remaining {
            rate.remaining = remaining;
        }
        debug!(limit = rate.limit, remaining = rate.remaining, "rate limit window");
    }

    /// Perform one authenticated API call, retrying rate limit rejections
    ///
    /// Returns the raw response body; callers own deserialization. Any
    /// non-2xx response other than 429 maps to [`Error::Api`] and is not
    /// retried. After `MAX_RETRIES` consecutive 429s the last rate limit
    /// error is surfaced wrapped in [`Error::MaxRetries`].
    pub(crate) async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>> {
        let mut last_err = None;

        for attempt in 0..MAX_RETRIES {
            self.wait_for_rate_limit().await;

            match self.request_once(method.clone(), path, body).await {
                Ok(bytes) => return Ok(bytes),
                Err(Error::RateLimited {
                    retry_after,
                    message,
                }) => {
                    warn!(
                        %method,
                        path,
                        attempt = attempt + 1,
                        ?retry_after,
                        "rate limited by API, backing off"
                    );
                    {
                        let mut rate = self.rate.lock().unwrap();
                        rate.remaining = 0;
                        rate.reset_at = Some(tokio::time::Instant::now() + retry_after);
                    }
                    last_err = Some(Error::RateLimited {
                        retry_after,
                        message,
                    });
                    tokio::time::sleep(retry_after).await;
                }
                Err(err) => return Err(err),
            }
        }

        // last_err is always set when the loop runs out of attempts
        Err(Error::MaxRetries(Box::new(last_err.unwrap_or(
            Error::Other("rate limit retries exhausted".into()),
        ))))
    }

    async fn request_once<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "API request");

        let mut builder = self
            .http
            .request(method, &url)
            .header("Authorization", self.auth_header())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::http(format!("error performing request: {e}")))?;

        self.update_rate_limit(&response);

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_RETRY_AFTER);
            let message = header_string(&response, "X-Status-Message");
            return Err(Error::RateLimited {
                retry_after,
                message,
            });
        }

        let status_message = header_string(&response, "X-Status-Message");
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::http(format!("error reading response body: {e}")))?;

        if !status.is_success() {
            let mut message = String::from_utf8_lossy(&bytes).into_owned();
            if !status_message.is_empty() {
                message = format!("{message} (X-Status-Message: {status_message})");
            }
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(bytes.to_vec())
    }
}

fn header_string(response: &reqwest::Response, name: &str) -> String {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Parse an array-wrapped response and take its first element
///
/// The API returns JSON arrays even for single-object endpoints; a
/// zero-length array on such an endpoint is a protocol violation.
pub(crate) fn first_of<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut items: Vec<T> = serde_json::from_slice(bytes)?;
    if items.is_empty() {
        return Err(Error::EmptyResponse);
    }
    Ok(items.swap_remove(0))
}
