//! Rate limiting for Europe PMC API compliance
//!
//! Europe PMC tolerates reasonable request rates; the defaults here
//! (10 requests/second sustained, burst of 20) are deliberately conservative.
//! A single `RateLimiter` instance is shared by every request a client makes,
//! including retries: each network attempt consumes one token.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, instrument};

/// Token bucket rate limiter shared across concurrent search calls
///
/// Cloning is cheap and clones share the same bucket.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    bucket: Arc<Mutex<TokenBucket>>,
}

#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    capacity: f64,
    refill_rate: f64, // tokens per second
    last_refill: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    ///
    /// * `rate` - Sustained requests per second (refill rate)
    /// * `burst` - Bucket capacity (requests allowed back to back)
    ///
    /// # Examples
    ///
    /// ```
    /// use europepmc_client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(10.0, 20);
    /// ```
    pub fn new(rate: f64, burst: u32) -> Self {
        let capacity = f64::from(burst.max(1));
        Self {
            bucket: Arc::new(Mutex::new(TokenBucket {
                tokens: capacity,
                capacity,
                refill_rate: rate.max(0.1),
                last_refill: Instant::now(),
            })),
        }
    }

    /// Create a rate limiter with the Europe PMC defaults (10 req/s, burst 20)
    pub fn europepmc_default() -> Self {
        Self::new(10.0, 20)
    }

    /// Acquire a token, waiting if necessary to respect the rate limit.
    ///
    /// A request that would exceed the bucket blocks until a token has been
    /// refilled; requests are never dropped. Safe to call from any number of
    /// concurrent tasks sharing this limiter.
    #[instrument(skip(self))]
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock().unwrap();
                Self::refill(&mut bucket);

                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    debug!(remaining_tokens = %bucket.tokens, "Token acquired");
                    return;
                }

                // Time until one full token has accumulated
                let deficit = 1.0 - bucket.tokens;
                Duration::from_secs_f64(deficit / bucket.refill_rate)
            };

            debug!(wait_ms = wait.as_millis() as u64, "Waiting for rate limit");
            tokio::time::sleep(wait).await;
        }
    }

    /// Check whether a token is available without consuming one
    pub fn check_available(&self) -> bool {
        let mut bucket = self.bucket.lock().unwrap();
        Self::refill(&mut bucket);
        bucket.tokens >= 1.0
    }

    /// Current token count (for tests and monitoring)
    pub fn token_count(&self) -> f64 {
        let mut bucket = self.bucket.lock().unwrap();
        Self::refill(&mut bucket);
        bucket.tokens
    }

    /// Configured sustained rate in requests per second
    pub fn rate(&self) -> f64 {
        self.bucket.lock().unwrap().refill_rate
    }

    fn refill(bucket: &mut TokenBucket) {
        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * bucket.refill_rate).min(bucket.capacity);
        bucket.last_refill = now;
    }
}
