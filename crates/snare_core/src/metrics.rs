//! Trap metrics and logging setup.
//!
//! Counters are plain atomics so a runner can read them from another thread
//! while the tick loop is the only writer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Counters for everything the trap system did.
pub struct TrapMetrics {
    ticks: AtomicU64,
    sources_tagged: AtomicU64,
    triggers: AtomicU64,
    batch_spawned: AtomicU64,
    failed_steps: AtomicU64,
}

impl Default for TrapMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TrapMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
            sources_tagged: AtomicU64::new(0),
            triggers: AtomicU64::new(0),
            batch_spawned: AtomicU64::new(0),
            failed_steps: AtomicU64::new(0),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, duration: Duration, population: usize) {
        self.ticks.fetch_add(1, Ordering::Relaxed);

        let tick = self.ticks.load(Ordering::Relaxed);
        if tick % 1000 == 0 {
            tracing::info!(
                tick = tick,
                population = population,
                sources_tagged = self.sources_tagged(),
                triggers = self.triggers(),
                batch_spawned = self.batch_spawned(),
                duration_ms = duration.as_millis() as u64,
                "Trap tick"
            );
        }
    }

    pub fn record_tagged(&self) {
        self.sources_tagged.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one trigger and what its payload produced.
    pub fn record_trigger(&self, batch_spawned: usize, failed_steps: usize) {
        self.triggers.fetch_add(1, Ordering::Relaxed);
        self.batch_spawned
            .fetch_add(batch_spawned as u64, Ordering::Relaxed);
        self.failed_steps
            .fetch_add(failed_steps as u64, Ordering::Relaxed);
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn sources_tagged(&self) -> u64 {
        self.sources_tagged.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn triggers(&self) -> u64 {
        self.triggers.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn batch_spawned(&self) -> u64 {
        self.batch_spawned.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failed_steps(&self) -> u64 {
        self.failed_steps.load(Ordering::Relaxed)
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the default
/// `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
