//! Centralized configuration for the allow list.
//!
//! Goals:
//! - Single place for tunables instead of scattering env lookups.
//! - AllowConfig::from_env() reads ARB_* env vars; builder methods override.
//!
//! Tunables:
//! - queue_cap: save-queue capacity. 0 (default) is an unbuffered handoff:
//!   set() blocks until the background writer accepts the item; this is the
//!   only backpressure mechanism.
//! - observer: optional sink for background save outcomes. Without one,
//!   rejections go to log::warn!.

use std::fmt;
use std::sync::Arc;

use crate::store::SaveOutcome;

pub type SaveObserver = Arc<dyn Fn(&SaveOutcome) + Send + Sync + 'static>;

#[derive(Clone, Default)]
pub struct AllowConfig {
    /// Save-queue capacity. 0 = rendezvous handoff.
    /// Env: ARB_QUEUE_CAP (default 0)
    pub queue_cap: usize,

    /// Sink for background save outcomes (set() never reports them).
    pub observer: Option<SaveObserver>,
}

impl fmt::Debug for AllowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllowConfig")
            .field("queue_cap", &self.queue_cap)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl AllowConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("ARB_QUEUE_CAP") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.queue_cap = n;
            }
        }
        cfg
    }

    pub fn queue_cap(mut self, n: usize) -> Self {
        self.queue_cap = n;
        self
    }

    pub fn observer<F>(mut self, f: F) -> Self
    where
        F: Fn(&SaveOutcome) + Send + Sync + 'static,
    {
        self.observer = Some(Arc::new(f));
        self
    }
}
