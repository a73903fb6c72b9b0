use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use super::views::{can_view_shipment, Viewer, ACCESS_DENIED};
use crate::store::{MockStore, Shipment};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// One result of a shipment refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PollEvent {
    Loaded { shipment: Shipment },
    Failed { message: String },
}

/// Keeps a shipment detail view fresh by refetching it on a fixed interval.
#[derive(Clone)]
pub struct ShipmentPoller {
    store: Arc<MockStore>,
    interval: Duration,
}

impl ShipmentPoller {
    pub fn new(store: Arc<MockStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Loads the shipment right away and then once per interval. The first
    /// failure (missing shipment or access denied) is reported and ends the
    /// poll. Polling stops as soon as the returned handle is stopped or
    /// dropped.
    pub fn watch(&self, viewer: Option<Viewer>, shipment_id: String) -> PollHandle {
        let (events_tx, events) = mpsc::channel(4);
        let (cancel, cancel_rx) = watch::channel(false);
        let task = tokio::spawn(poll_loop(
            self.store.clone(),
            viewer,
            shipment_id,
            self.interval,
            events_tx,
            cancel_rx,
        ));
        PollHandle {
            events,
            cancel,
            task,
        }
    }
}

/// Owns a running poll. Dropping it cancels the timer and any fetch in
/// flight.
pub struct PollHandle {
    events: mpsc::Receiver<PollEvent>,
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Next refresh result, or `None` once the poll has ended or been
    /// stopped. Nothing fetched after [`stop`](Self::stop) is ever returned.
    pub async fn next(&mut self) -> Option<PollEvent> {
        if self.is_stopped() {
            return None;
        }
        let event = self.events.recv().await;
        if self.is_stopped() {
            return None;
        }
        event
    }

    pub fn stop(&mut self) {
        self.cancel.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.cancel.borrow()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.send_replace(true);
        self.task.abort();
    }
}

async fn load(store: &MockStore, viewer: Option<&Viewer>, shipment_id: &str) -> PollEvent {
    match store.get_shipment_by_id(shipment_id).await {
        Ok(shipment) if can_view_shipment(viewer, &shipment) => PollEvent::Loaded { shipment },
        Ok(_) => PollEvent::Failed {
            message: ACCESS_DENIED.to_string(),
        },
        Err(e) => PollEvent::Failed {
            message: e.to_string(),
        },
    }
}

async fn poll_loop(
    store: Arc<MockStore>,
    viewer: Option<Viewer>,
    shipment_id: String,
    interval: Duration,
    events: mpsc::Sender<PollEvent>,
    mut cancel: watch::Receiver<bool>,
) {
    // first tick fires immediately and serves as the initial load
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    debug!(%shipment_id, interval_secs = interval.as_secs(), "shipment poll started");

    loop {
        tokio::select! {
            biased;
            _ = cancel.changed() => break,
            _ = ticker.tick() => {}
        }
        let event = tokio::select! {
            biased;
            _ = cancel.changed() => break,
            event = load(&store, viewer.as_ref(), &shipment_id) => event,
        };
        if *cancel.borrow() {
            break;
        }
        let finished = matches!(event, PollEvent::Failed { .. });
        trace!(%shipment_id, finished, "shipment refreshed");
        if events.send(event).await.is_err() || finished {
            break;
        }
    }
    debug!(%shipment_id, "shipment poll ended");
}
