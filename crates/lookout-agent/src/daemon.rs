// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The trigger loop.
//!
//! Wakes on the poll timer and on triggers from the connectivity monitor,
//! then runs each wake in its own tracked task. On cancellation the loop
//! stops accepting triggers and drains what is in flight.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

use crate::connectivity::ConnectivityMonitor;
use crate::dispatch::{Dispatcher, Trigger};
use crate::shutdown::drain_tasks;

const TRIGGER_CAPACITY: usize = 64;

pub struct Daemon {
    dispatcher: Dispatcher,
    monitor: ConnectivityMonitor,
    poll_interval: Duration,
    drain_timeout: Duration,
    tx: mpsc::Sender<Trigger>,
    rx: mpsc::Receiver<Trigger>,
}

impl Daemon {
    pub fn new(
        dispatcher: Dispatcher,
        monitor: ConnectivityMonitor,
        poll_interval: Duration,
        drain_timeout: Duration,
    ) -> Self {
        let (tx, rx) = mpsc::channel(TRIGGER_CAPACITY);
        Self {
            dispatcher,
            monitor,
            poll_interval,
            drain_timeout,
            tx,
            rx,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// A handle for injecting triggers into the running loop.
    pub fn sender(&self) -> mpsc::Sender<Trigger> {
        self.tx.clone()
    }

    /// Run until `cancel` fires. The first poll runs immediately.
    pub async fn run(self, cancel: CancellationToken) {
        let Self {
            dispatcher,
            monitor,
            poll_interval,
            drain_timeout,
            tx,
            mut rx,
        } = self;

        if dispatcher.resume_pending().await {
            info!("queued writes found at startup, sync registered");
        }

        let tracker = TaskTracker::new();
        tracker.spawn(monitor.run(tx, cancel.clone()));

        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(poll_interval_secs = poll_interval.as_secs(), "daemon running");
        loop {
            let trigger = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping trigger loop");
                    break;
                }
                _ = ticker.tick() => Trigger::Poll,
                Some(trigger) = rx.recv() => trigger,
            };

            let dispatcher = dispatcher.clone();
            tracker.spawn(async move {
                let kind = trigger.kind();
                let outcome = dispatcher.dispatch(trigger).await;
                debug!(trigger = kind, ?outcome, "wake handled");
            });
        }

        drain_tasks(&tracker, drain_timeout).await;
        info!("daemon stopped");
    }
}
