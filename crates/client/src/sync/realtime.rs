// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Realtime channel and connectivity seams.
//!
//! Handlers are registered by key and released through a scoped
//! [`Subscription`] that unregisters on drop. [`LocalChannel`] is an
//! in-process hub implementing both traits; socket transports bridge into it
//! by calling [`LocalChannel::publish`] and [`LocalChannel::notify_connected`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use lq_core::RealtimeBatch;

use super::lock;

/// Receives realtime batches for one subscription key.
pub type BatchHandler = Arc<dyn Fn(&RealtimeBatch) + Send + Sync>;

/// Receives the reconnect attempt counter; `0` is the first connection.
pub type ConnectedHandler = Arc<dyn Fn(u32) + Send + Sync>;

/// Identifies a registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Batch event channel keyed by subscription key.
pub trait RealtimeChannel: Send + Sync {
    fn on(&self, key: &str, handler: BatchHandler) -> SubscriptionId;
    fn off(&self, key: &str, id: SubscriptionId);
}

/// Source of "connected" notifications.
pub trait ConnectivitySignal: Send + Sync {
    fn on_connected(&self, handler: ConnectedHandler) -> SubscriptionId;
    fn off_connected(&self, id: SubscriptionId);
}

/// A registered handler, unregistered when dropped.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Registers `handler` for batches on `key`.
    pub fn realtime(channel: Arc<dyn RealtimeChannel>, key: &str, handler: BatchHandler) -> Self {
        let id = channel.on(key, handler);
        let key = key.to_string();
        Subscription {
            release: Some(Box::new(move || channel.off(&key, id))),
        }
    }

    /// Registers `handler` for connectivity notifications.
    pub fn connectivity(signal: Arc<dyn ConnectivitySignal>, handler: ConnectedHandler) -> Self {
        let id = signal.on_connected(handler);
        Subscription {
            release: Some(Box::new(move || signal.off_connected(id))),
        }
    }

    /// Unregisters now instead of at drop.
    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// In-process realtime hub.
#[derive(Default)]
pub struct LocalChannel {
    inner: Mutex<LocalChannelInner>,
}

#[derive(Default)]
struct LocalChannelInner {
    next_id: u64,
    topics: HashMap<String, Vec<(SubscriptionId, BatchHandler)>>,
    connected: Vec<(SubscriptionId, ConnectedHandler)>,
}

impl LocalChannelInner {
    fn next_id(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }
}

impl LocalChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `batch` to every handler on `key`.
    ///
    /// Returns the number of handlers invoked.
    pub fn publish(&self, key: &str, batch: &RealtimeBatch) -> usize {
        // Handlers run outside the lock so they may (un)subscribe
        let handlers: Vec<BatchHandler> = lock(&self.inner)
            .topics
            .get(key)
            .map(|hs| hs.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default();

        for handler in &handlers {
            handler(batch);
        }
        handlers.len()
    }

    /// Signals a (re)connection with the given attempt counter.
    pub fn notify_connected(&self, attempt: u32) -> usize {
        let handlers: Vec<ConnectedHandler> = lock(&self.inner)
            .connected
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();

        for handler in &handlers {
            handler(attempt);
        }
        handlers.len()
    }

    /// Number of batch handlers registered on `key`.
    pub fn handler_count(&self, key: &str) -> usize {
        lock(&self.inner).topics.get(key).map_or(0, Vec::len)
    }

    /// Number of connectivity handlers registered.
    pub fn connected_handler_count(&self) -> usize {
        lock(&self.inner).connected.len()
    }
}

impl RealtimeChannel for LocalChannel {
    fn on(&self, key: &str, handler: BatchHandler) -> SubscriptionId {
        let mut inner = lock(&self.inner);
        let id = inner.next_id();
        inner
            .topics
            .entry(key.to_string())
            .or_default()
            .push((id, handler));
        id
    }

    fn off(&self, key: &str, id: SubscriptionId) {
        let mut inner = lock(&self.inner);
        if let Some(handlers) = inner.topics.get_mut(key) {
            handlers.retain(|(hid, _)| *hid != id);
            if handlers.is_empty() {
                inner.topics.remove(key);
            }
        }
    }
}

impl ConnectivitySignal for LocalChannel {
    fn on_connected(&self, handler: ConnectedHandler) -> SubscriptionId {
        let mut inner = lock(&self.inner);
        let id = inner.next_id();
        inner.connected.push((id, handler));
        id
    }

    fn off_connected(&self, id: SubscriptionId) {
        lock(&self.inner).connected.retain(|(hid, _)| *hid != id);
    }
}
