// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Activation and teardown of a live query.
//!
//! Activating a [`LiveQuery`] paints the cached snapshot, subscribes to
//! realtime batches for the reference's subscription key, listens for
//! reconnects and runs the initial fetch. The subscription is registered
//! before the initial fetch is awaited so no batch published meanwhile is
//! missed. Dropping the query releases both handlers.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;

use lq_core::{Entity, FilterExpressionList, RealtimeBatch, Reference, SyncState};

use super::context::SyncContext;
use super::realtime::Subscription;
use super::session::{Fetch, Session, WeakSession};
use crate::config::QueryOptions;
use crate::error::Result;

/// A query kept in sync with its reference.
pub struct LiveQuery {
    session: Session,
    realtime: Option<Subscription>,
    connectivity: Option<Subscription>,
}

impl LiveQuery {
    /// Activates a query on `reference`. An empty reference yields an inactive
    /// query that never fetches or subscribes.
    ///
    /// A failing initial fetch is logged and recorded in [`SyncState::error`].
    pub async fn activate(ctx: SyncContext, reference: &str, options: QueryOptions) -> Self {
        let session = Session::new(ctx, Reference::parse(reference), options);
        let mut query = LiveQuery {
            session,
            realtime: None,
            connectivity: None,
        };
        query.start().await;
        query
    }

    async fn start(&mut self) {
        let Some(reference) = self.session.reference() else {
            tracing::debug!("no reference, query stays inactive");
            return;
        };
        tracing::info!(reference = %reference, "activating live query");

        self.session.paint_from_cache();
        self.subscribe_realtime(&reference);
        self.listen_for_reconnects();

        if self.session.options().auto_fetch {
            if let Err(e) = self.session.fetch_initial().await {
                tracing::warn!(reference = %reference, "initial fetch failed: {}", e);
            }
        }
    }

    fn subscribe_realtime(&mut self, reference: &Reference) {
        if !self.session.options().realtime {
            return;
        }
        let Some(channel) = self.session.context().realtime.clone() else {
            return;
        };
        let weak = self.session.downgrade();
        let handler = Arc::new(move |batch: &RealtimeBatch| {
            if let Some(session) = weak.upgrade() {
                session.apply_realtime(batch);
            }
        });
        let key = reference.subscription_key();
        tracing::debug!(key = %key, "subscribing to realtime");
        self.realtime = Some(Subscription::realtime(channel, key, handler));
    }

    fn listen_for_reconnects(&mut self) {
        let Some(signal) = self.session.context().connectivity.clone() else {
            return;
        };
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!("no async runtime, reconnect reloads disabled");
            return;
        };
        let weak = self.session.downgrade();
        let handler = Arc::new(move |attempt: u32| on_connected(&weak, &runtime, attempt));
        self.connectivity = Some(Subscription::connectivity(signal, handler));
    }

    fn stop(&mut self) {
        if let Some(sub) = self.realtime.take() {
            sub.release();
        }
        if let Some(sub) = self.connectivity.take() {
            sub.release();
        }
    }

    /// Moves the query to another reference. Handlers for the old reference
    /// are released before the new ones are registered. A fetch still in
    /// flight for the old reference is discarded, and the initial fetch for
    /// the new one waits for it to leave the gate. An unchanged reference is
    /// a no-op.
    pub async fn set_reference(&mut self, reference: &str) {
        let next = Reference::parse(reference);
        if next == self.session.reference() {
            return;
        }
        self.stop();
        self.session.set_reference(next);
        self.start().await;
    }

    /// Releases the realtime and reconnect handlers.
    pub fn deactivate(mut self) {
        if let Some(reference) = self.session.reference() {
            tracing::info!(reference = %reference, "deactivating live query");
        }
        self.stop();
    }

    pub fn reference(&self) -> Option<Reference> {
        self.session.reference()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SyncState {
        self.session.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.session.subscribe()
    }

    pub fn items(&self) -> Vec<Entity> {
        self.session.items()
    }

    pub fn is_empty(&self) -> bool {
        self.session.is_empty()
    }

    pub fn is_subscribed(&self) -> bool {
        self.realtime.is_some()
    }

    pub async fn fetch_more(&self) -> Result<Fetch> {
        self.session.fetch_more().await
    }

    pub async fn reload(&self) -> Result<Fetch> {
        self.session.reload().await
    }

    pub async fn reset(&self) -> Result<Fetch> {
        self.session.reset().await
    }

    pub async fn set_filter(&self, filters: FilterExpressionList) -> Result<Fetch> {
        self.session.set_filter(filters).await
    }
}

/// Reloads after a reconnect, but never on the first connection and never
/// while the last fetch ended in an error.
fn on_connected(weak: &WeakSession, runtime: &Handle, attempt: u32) {
    if attempt == 0 {
        return;
    }
    let Some(session) = weak.upgrade() else {
        return;
    };
    if session.reference().is_none() || session.state().error.is_some() {
        tracing::debug!(attempt, "reconnected, skipping reload");
        return;
    }
    tracing::debug!(attempt, "reconnected, reloading");
    runtime.spawn(async move {
        if let Err(e) = session.reload().await {
            tracing::warn!("reload after reconnect failed: {}", e);
        }
    });
}
