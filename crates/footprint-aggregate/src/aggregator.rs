//! Streaming tick-to-cluster aggregation.

use std::sync::Arc;

use footprint_types::{ClusterConfig, ClusterConfigUpdate, ConfigError, Tick};
use tracing::{debug, info, trace};

use crate::Cluster;

/// Streaming cluster aggregator.
///
/// Owns the closed-cluster history and at most one open cluster. Every
/// mutating call takes `&mut self`, so a host that shares an aggregator
/// across threads has to serialize access itself (e.g. behind a mutex or a
/// single-consumer channel).
#[derive(Debug)]
pub struct ClusterAggregator {
    config: ClusterConfig,
    closed: Vec<Arc<Cluster>>,
    current: Option<Cluster>,
    next_id: u64,
}

impl ClusterAggregator {
    /// Creates a new aggregator.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`ClusterConfig::validate`].
    pub fn new(config: ClusterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            closed: Vec::new(),
            current: None,
            next_id: 1,
        })
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Merges `update` into the configuration.
    ///
    /// The new settings apply from the next tick on. Ticks already folded
    /// into the open cluster keep their original bucketing and body/wick
    /// classification.
    ///
    /// # Errors
    ///
    /// Returns an error if the merged configuration is invalid; the current
    /// configuration is left untouched in that case.
    pub fn update_config(&mut self, update: &ClusterConfigUpdate) -> Result<(), ConfigError> {
        self.reconfigure(self.config.merged(update))
    }

    /// Replaces the configuration wholesale.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid; the current configuration is
    /// left untouched in that case.
    pub fn reconfigure(&mut self, config: ClusterConfig) -> Result<(), ConfigError> {
        config.validate()?;
        debug!(
            price_level_size = config.price_level_size,
            delta_threshold = config.delta_threshold,
            tick_threshold = ?config.tick_threshold,
            "cluster config updated"
        );
        self.config = config;
        Ok(())
    }

    /// Processes a tick, potentially closing the open cluster.
    ///
    /// Returns `Some(cluster)` when this tick closed a cluster, `None`
    /// otherwise. A cluster can close on the tick that opened it.
    pub fn process_tick(&mut self, tick: &Tick) -> Option<Arc<Cluster>> {
        let volume = tick.effective_volume();
        let level_price = self.config.level_price(tick.price);

        match self.current.as_mut() {
            Some(cluster) => cluster.apply(tick, volume, level_price),
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.current = Some(Cluster::open(id, tick, volume, level_price));
            }
        }

        let should_close = self.current.as_ref().is_some_and(|cluster| {
            trace!(
                id = cluster.id,
                price = tick.price,
                volume,
                delta = cluster.delta,
                "tick applied"
            );
            self.config.should_close(cluster.delta, cluster.tick_count)
        });

        if should_close { self.flush() } else { None }
    }

    /// Replays a finite batch of ticks in order.
    ///
    /// Equivalent to calling [`process_tick`](Self::process_tick) for each
    /// tick and then [`flush`](Self::flush), so a partially formed last
    /// cluster is closed rather than dropped. Returns the number of clusters
    /// closed by the replay. An empty batch is a no-op.
    pub fn load_from_history<'a, I>(&mut self, ticks: I) -> usize
    where
        I: IntoIterator<Item = &'a Tick>,
    {
        let mut tick_count = 0usize;
        let mut closed = 0usize;

        for tick in ticks {
            tick_count += 1;
            if self.process_tick(tick).is_some() {
                closed += 1;
            }
        }

        if tick_count == 0 {
            return 0;
        }

        if self.flush().is_some() {
            closed += 1;
        }

        info!(ticks = tick_count, clusters = closed, "history loaded");
        closed
    }

    /// Closes the open cluster, if any, and appends it to the history.
    pub fn flush(&mut self) -> Option<Arc<Cluster>> {
        let mut cluster = self.current.take()?;
        cluster.close();

        debug!(
            id = cluster.id,
            ticks = cluster.tick_count,
            delta = cluster.delta,
            volume = cluster.volume_total,
            poc = cluster.poc,
            "cluster closed"
        );

        let cluster = Arc::new(cluster);
        self.closed.push(Arc::clone(&cluster));
        Some(cluster)
    }

    /// Returns the closed clusters, oldest first.
    #[must_use]
    pub fn closed_clusters(&self) -> &[Arc<Cluster>] {
        &self.closed
    }

    /// Returns the open cluster, if any.
    #[must_use]
    pub const fn current_cluster(&self) -> Option<&Cluster> {
        self.current.as_ref()
    }

    /// Returns every cluster for display, oldest first.
    ///
    /// Closed clusters are shared, not copied. The open cluster, if any, is
    /// appended as an independent snapshot.
    #[must_use]
    pub fn all_clusters(&self) -> Vec<Arc<Cluster>> {
        let mut clusters = Vec::with_capacity(self.len());
        clusters.extend(self.closed.iter().cloned());
        if let Some(current) = &self.current {
            clusters.push(Arc::new(current.clone()));
        }
        clusters
    }

    /// Returns the id the next opened cluster will receive.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Returns the number of clusters, open one included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.closed.len() + usize::from(self.current.is_some())
    }

    /// Returns true if no tick has been processed since the last reset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closed.is_empty() && self.current.is_none()
    }

    /// Drops all clusters and restarts ids at 1. The configuration is kept.
    pub fn reset(&mut self) {
        info!(clusters = self.len(), "aggregator reset");
        self.closed.clear();
        self.current = None;
        self.next_id = 1;
    }

    /// Finishes aggregation, returning every cluster with the open one closed.
    #[must_use]
    pub fn finish(mut self) -> Vec<Arc<Cluster>> {
        self.flush();
        self.closed
    }
}
