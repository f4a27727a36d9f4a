//! The live-update distribution loop.
//!
//! A single recurring timer drives fetch → evaluate → broadcast cycles.
//! Ticks are strictly serialized: a tick body runs to completion (success or
//! failure) before the next one is scheduled, so a slow fetch delays the next
//! tick rather than overlapping it. A failed fetch skips the broadcast for
//! that cycle and leaves every subscriber on its last-known snapshot; the
//! timer itself never stops.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::datasource::{AccountDataSource, DataSourceError};
use crate::domain::Snapshot;
use crate::engine::evaluate;

/// Fans freshly evaluated snapshots out to the current subscriber set.
///
/// Subscribers join and leave concurrently with in-flight ticks; the registry
/// is the only shared mutable state. Snapshots cross the channel as
/// `Arc<Snapshot>`, fully constructed before any subscriber can observe them.
pub struct Distributor {
    source: Arc<dyn AccountDataSource>,
    config: Config,
    subscribers: Mutex<HashMap<Uuid, mpsc::UnboundedSender<Arc<Snapshot>>>>,
}

impl Distributor {
    pub fn new(source: Arc<dyn AccountDataSource>, config: Config) -> Self {
        Self {
            source,
            config,
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register a new subscriber and send it one immediate snapshot,
    /// independent of the shared timer.
    ///
    /// The immediate fetch is fire-and-forget: on failure the subscriber
    /// simply waits for the next scheduled broadcast.
    pub async fn subscribe(&self) -> (Uuid, mpsc::UnboundedReceiver<Arc<Snapshot>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.subscribers.lock().unwrap().insert(id, tx.clone());
        debug!(subscriber = %id, "subscriber registered");

        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                let _ = tx.send(Arc::new(snapshot));
            }
            Err(e) => {
                warn!(subscriber = %id, "initial snapshot fetch failed: {}", e);
            }
        }

        (id, rx)
    }

    /// Remove a subscriber. No other effect.
    pub fn unsubscribe(&self, id: Uuid) {
        self.subscribers.lock().unwrap().remove(&id);
        debug!(subscriber = %id, "subscriber removed");
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    /// One fetch-evaluate-broadcast cycle.
    pub async fn tick(&self) {
        match self.fetch_snapshot().await {
            Ok(snapshot) => self.broadcast(Arc::new(snapshot)),
            Err(e) => {
                // Transient and self-healing: skip this cycle, keep the timer.
                warn!("account fetch failed, skipping broadcast: {}", e);
            }
        }
    }

    /// Drive ticks at the configured cadence until the process exits.
    pub async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.config.refresh_interval());
        // Serialize, never overlap: a late tick fires after the previous
        // body finishes and the schedule shifts forward.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            contract = %self.config.contract_address,
            interval_secs = self.config.refresh_interval_secs,
            "distributor started"
        );

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    async fn fetch_snapshot(&self) -> Result<Snapshot, DataSourceError> {
        let raw = self.source.fetch_account_state().await?;
        Ok(evaluate(&raw, &self.config, Utc::now()))
    }

    fn broadcast(&self, snapshot: Arc<Snapshot>) {
        let mut subscribers = self.subscribers.lock().unwrap();
        // Sends are non-blocking; a closed channel means the subscriber is
        // gone and gets pruned here.
        subscribers.retain(|id, tx| {
            let delivered = tx.send(snapshot.clone()).is_ok();
            if !delivered {
                debug!(subscriber = %id, "dropping closed subscriber");
            }
            delivered
        });
        debug!(
            subscribers = subscribers.len(),
            health_factor = %snapshot.health_factor.current,
            "snapshot broadcast"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::MockAccountSource;
    use crate::domain::{RebalanceAction, RiskLevel};
    use std::collections::HashMap as StdHashMap;

    fn test_distributor(source: Arc<MockAccountSource>) -> Distributor {
        let config = Config::from_env_map(StdHashMap::new()).unwrap();
        Distributor::new(source, config)
    }

    #[tokio::test]
    async fn test_subscribe_receives_immediate_snapshot() {
        let distributor = test_distributor(Arc::new(MockAccountSource::default()));

        let (_id, mut rx) = distributor.subscribe().await;
        let snapshot = rx.try_recv().expect("expected an immediate snapshot");

        assert_eq!(snapshot.status.action, RebalanceAction::InRange);
        assert_eq!(snapshot.status.risk_level, RiskLevel::Medium);
        assert_eq!(distributor.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_initial_fetch_still_registers() {
        let distributor = test_distributor(Arc::new(MockAccountSource::failing("rpc down")));

        let (_id, mut rx) = distributor.subscribe().await;

        assert!(rx.try_recv().is_err());
        assert_eq!(distributor.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_tick_broadcasts_to_all_subscribers() {
        let distributor = test_distributor(Arc::new(MockAccountSource::default()));

        let (_a, mut rx_a) = distributor.subscribe().await;
        let (_b, mut rx_b) = distributor.subscribe().await;
        // Drain the immediate snapshots.
        rx_a.try_recv().unwrap();
        rx_b.try_recv().unwrap();

        distributor.tick().await;

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_failed_tick_skips_broadcast_and_keeps_subscribers() {
        let source = Arc::new(MockAccountSource::default());
        let distributor = test_distributor(source.clone());

        let (_id, mut rx) = distributor.subscribe().await;
        rx.try_recv().unwrap();

        source.set_failing("rpc down");
        distributor.tick().await;

        assert!(rx.try_recv().is_err());
        assert_eq!(distributor.subscriber_count(), 1);

        // Self-healing: the next successful tick reaches the subscriber.
        source.set_state(MockAccountSource::sample_state());
        distributor.tick().await;
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let distributor = test_distributor(Arc::new(MockAccountSource::default()));

        let (id, mut rx) = distributor.subscribe().await;
        rx.try_recv().unwrap();

        distributor.unsubscribe(id);
        assert_eq!(distributor.subscriber_count(), 0);

        distributor.tick().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_pruned_on_broadcast() {
        let distributor = test_distributor(Arc::new(MockAccountSource::default()));

        let (_id, rx) = distributor.subscribe().await;
        drop(rx);
        assert_eq!(distributor.subscriber_count(), 1);

        distributor.tick().await;
        assert_eq!(distributor.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_snapshots_are_fresh_each_tick() {
        let distributor = test_distributor(Arc::new(MockAccountSource::default()));

        let (_id, mut rx) = distributor.subscribe().await;
        let first = rx.try_recv().unwrap();

        distributor.tick().await;
        let second = rx.try_recv().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.position, second.position);
    }
}
