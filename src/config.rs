//! Client configuration for the Europe PMC API

use std::time::Duration;

use crate::rate_limit::RateLimiter;
use crate::retry::RetryConfig;

/// Production Europe PMC REST endpoint
pub const EUROPEPMC_BASE_URL: &str = "https://www.ebi.ac.uk/europepmc/webservices/rest";

/// Sandbox endpoint for integration testing against the live service
pub const EUROPEPMC_TEST_URL: &str = "https://www.ebi.ac.uk/europepmc/webservices/test/rest";

const DEFAULT_RATE_LIMIT: f64 = 10.0;
const DEFAULT_BURST: u32 = 20;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_THRESHOLD: u8 = 80;

/// Configuration for Europe PMC clients
///
/// # Example
///
/// ```
/// use europepmc_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_rate_limit(5.0)
///     .with_burst(10)
///     .with_max_retries(5)
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL override (defaults to the production endpoint)
    pub base_url: Option<String>,
    /// Route requests to the sandbox endpoint instead of production
    pub use_test_api: bool,
    /// Sustained request rate in requests per second
    pub rate_limit: Option<f64>,
    /// Token bucket burst capacity
    pub burst: Option<u32>,
    /// Retry policy for transient upstream failures
    pub retry_config: RetryConfig,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Default author disambiguation threshold, in [50, 100]
    pub default_threshold: u8,
    /// User-Agent override
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a configuration with documented defaults: 10 req/s sustained,
    /// burst 20, 3 attempts with 1s base / 30s max backoff, 30s timeout,
    /// disambiguation threshold 80.
    pub fn new() -> Self {
        Self {
            base_url: None,
            use_test_api: false,
            rate_limit: None,
            burst: None,
            retry_config: RetryConfig::default(),
            timeout: DEFAULT_TIMEOUT,
            default_threshold: DEFAULT_THRESHOLD,
            user_agent: None,
        }
    }

    /// Set a custom base URL (used by tests to point at a mock server)
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Route requests to the Europe PMC sandbox endpoint. An explicit
    /// `with_base_url` override takes precedence.
    pub fn with_test_api(mut self, enabled: bool) -> Self {
        self.use_test_api = enabled;
        self
    }

    /// Set the sustained request rate (requests per second, must be positive)
    pub fn with_rate_limit(mut self, rate: f64) -> Self {
        self.rate_limit = Some(rate.max(0.1));
        self
    }

    /// Set the token bucket burst capacity (minimum 1)
    pub fn with_burst(mut self, burst: u32) -> Self {
        self.burst = Some(burst.max(1));
        self
    }

    /// Set the maximum retry attempt count, including the first attempt
    pub fn with_max_retries(mut self, max_attempts: u32) -> Self {
        self.retry_config.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the base backoff delay (doubles per retry)
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.retry_config.base_delay = delay;
        self
    }

    /// Set the backoff delay cap
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.retry_config.max_delay = delay;
        self
    }

    /// Set the HTTP request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the default disambiguation threshold (clamped to [50, 100])
    pub fn with_default_threshold(mut self, threshold: u8) -> Self {
        self.default_threshold = threshold.clamp(50, 100);
        self
    }

    /// Set a custom User-Agent
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Effective base URL
    pub fn effective_base_url(&self) -> &str {
        match (&self.base_url, self.use_test_api) {
            (Some(url), _) => url,
            (None, true) => EUROPEPMC_TEST_URL,
            (None, false) => EUROPEPMC_BASE_URL,
        }
    }

    /// Effective sustained rate limit
    pub fn effective_rate_limit(&self) -> f64 {
        self.rate_limit.unwrap_or(DEFAULT_RATE_LIMIT)
    }

    /// Effective burst capacity
    pub fn effective_burst(&self) -> u32 {
        self.burst.unwrap_or(DEFAULT_BURST)
    }

    /// Effective User-Agent
    pub fn effective_user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!("europepmc-client-rs/{}", env!("CARGO_PKG_VERSION"))
        })
    }

    /// Create a rate limiter from this configuration
    pub fn create_rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.effective_rate_limit(), self.effective_burst())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
