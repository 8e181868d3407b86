//! Cancellable debounce for live form validation.
//!
//! Username/email availability checks fire on every keystroke; only the last
//! one may surface. Each `run` takes a generation ticket, sleeps the debounce
//! delay, and bails out with `None` if a newer run started in the meantime.
//! The generation is checked again after the network call, so an in-flight
//! check that got superseded mid-request is dropped instead of displaying an
//! out-of-date result.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(450);

#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Run `op` after the debounce delay unless a newer `run` supersedes it.
    /// Returns `None` for superseded runs.
    pub async fn run<F, Fut, T>(&self, op: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        sleep(self.delay).await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            return None;
        }

        let output = op().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            return None;
        }
        Some(output)
    }
}
