//! Per-key token bucket rate limiting
//!
//! One bucket per key (a phone number), created on first use. Buckets
//! refill at `rate` tokens per second up to `burst`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: f64,
    refilled_at: Instant,
}

#[derive(Clone)]
pub struct RateLimiterRegistry {
    buckets: Arc<Mutex<HashMap<String, Bucket>>>,
    rate: f64,
    burst: f64,
}

impl RateLimiterRegistry {
    pub fn new(rate_per_sec: f64, burst: u32) -> Self {
        Self {
            buckets: Arc::new(Mutex::new(HashMap::new())),
            rate: rate_per_sec.max(0.0),
            burst: f64::from(burst.max(1)),
        }
    }

    /// Take one token for `key`; `false` when the bucket is empty
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut buckets = self.buckets.lock();
        let bucket = buckets.entry(key.to_owned()).or_insert(Bucket {
            tokens: self.burst,
            refilled_at: now,
        });

        let elapsed = now.saturating_duration_since(bucket.refilled_at).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.rate).min(self.burst);
        bucket.refilled_at = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Drop buckets untouched for longer than `idle`
    pub fn cleanup(&self, idle: Duration) {
        let now = Instant::now();
        self.buckets
            .lock()
            .retain(|_, bucket| now.saturating_duration_since(bucket.refilled_at) < idle);
    }

    pub fn len(&self) -> usize {
        self.buckets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
