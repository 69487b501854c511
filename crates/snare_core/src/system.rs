use crate::catalog::TrapCatalog;
use crate::goal::{tick_goals, TickContext};
use crate::metrics::TrapMetrics;
use crate::tagging::{on_entity_introduced, TagOutcome};
use crate::world::World;
use std::sync::Arc;
use std::time::Instant;

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub introduced: usize,
    pub tagged: usize,
    pub goals_started: usize,
    pub discarded: usize,
    pub expired: usize,
}

/// Drives traps tick by tick: routes introductions to the tagger and polls
/// trigger goals.
pub struct TrapSystem {
    catalog: Arc<TrapCatalog>,
    metrics: TrapMetrics,
}

impl TrapSystem {
    pub fn new(catalog: Arc<TrapCatalog>) -> Self {
        Self {
            catalog,
            metrics: TrapMetrics::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<TrapCatalog> {
        &self.catalog
    }

    /// Swaps in a freshly loaded catalog. Takes effect from the next tick.
    pub fn replace_catalog(&mut self, catalog: Arc<TrapCatalog>) {
        if catalog.fingerprint() == self.catalog.fingerprint() {
            tracing::debug!("Trap catalog reloaded without changes");
        } else {
            tracing::info!(
                old = %self.catalog.fingerprint(),
                new = %catalog.fingerprint(),
                traps = catalog.traps().len(),
                "Trap catalog replaced"
            );
        }
        self.catalog = catalog;
    }

    pub fn metrics(&self) -> &TrapMetrics {
        &self.metrics
    }

    /// Runs the tagger over every queued introduction. Returns
    /// `(introduced, tagged)`.
    pub fn process_introductions(&self, world: &mut World) -> (usize, usize) {
        let introductions = world.drain_introductions();
        let mut tagged = 0;
        for intro in &introductions {
            if on_entity_introduced(world, &self.catalog, intro.entity, intro.existing)
                == TagOutcome::Tagged
            {
                tagged += 1;
                self.metrics.record_tagged();
            }
        }
        (introductions.len(), tagged)
    }

    pub fn tick(&self, world: &mut World) -> TickSummary {
        let started_at = Instant::now();
        let mut summary = TickSummary {
            expired: world.expire_cosmetics(),
            ..Default::default()
        };

        let (introduced, tagged) = self.process_introductions(world);
        summary.introduced += introduced;
        summary.tagged += tagged;

        let ctx = TickContext {
            catalog: &self.catalog,
            metrics: &self.metrics,
        };
        summary.goals_started = tick_goals(world, &ctx);

        // Creatures spawned by triggers this tick.
        let (introduced, tagged) = self.process_introductions(world);
        summary.introduced += introduced;
        summary.tagged += tagged;

        summary.discarded = world.discard_pending();
        world.tick += 1;
        self.metrics
            .record_tick(started_at.elapsed(), world.population());
        summary
    }
}
