// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fetch/merge coordinator.
//!
//! A [`Session`] owns one [`SyncState`] cell and one [`FetchGate`]. A fetch:
//! 1. Enters the gate, or returns [`Fetch::Dropped`] without touching state
//! 2. Records the new filters (and wipes the items on reset)
//! 3. Resolves request defaults and awaits the transport
//! 4. Merges the response into the state current at that moment, so realtime
//!    batches folded during the await are kept
//! 5. Leaves the gate on every path
//!
//! Every fetch is tagged with the reference generation it started under. A
//! response, failure or cancellation that lands after the reference changed
//! is discarded. A reset fetch that fails or is cancelled puts back the view
//! it wiped, replaying the realtime batches folded in the meantime.

use std::sync::{Arc, Mutex, RwLock, Weak};

use serde_json::Value;
use tokio::sync::{watch, Notify};

use lq_core::{
    normalize, Entity, FetchGate, FilterExpressionList, Page, RealtimeBatch, RealtimeUpdateItem,
    Reference, SyncState, TransportError, TransportResult, WireFilters,
};

use super::cache::SnapshotCache;
use super::context::SyncContext;
use super::transport::{build_request, CacheMode};
use super::{lock, read, write};
use crate::config::QueryOptions;
use crate::error::Result;

/// Outcome of a fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    /// The response was merged into state.
    Applied,
    /// Another fetch was in flight; nothing happened.
    Dropped,
    /// No reference is set; nothing happened.
    Inactive,
    /// The reference changed while the request was out; its outcome was
    /// discarded.
    Superseded,
}

/// One synchronized query: state cell, fetch gate and collaborators.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

/// Non-owning handle used by realtime and connectivity handlers.
#[derive(Clone)]
pub(crate) struct WeakSession(Weak<SessionInner>);

impl WeakSession {
    pub(crate) fn upgrade(&self) -> Option<Session> {
        self.0.upgrade().map(|inner| Session { inner })
    }
}

struct SessionInner {
    ctx: SyncContext,
    options: QueryOptions,
    target: RwLock<Target>,
    state: watch::Sender<SyncState>,
    gate: Mutex<FetchGate>,
    /// Signalled each time the gate is left.
    released: Notify,
    /// Batches folded while a reset fetch is in flight.
    replay: Mutex<Option<Vec<RealtimeUpdateItem>>>,
    /// Snapshot shown while the first page loads.
    painted: Mutex<Option<Vec<Entity>>>,
}

/// The reference and the generation it was set in.
struct Target {
    generation: u64,
    reference: Option<Reference>,
}

enum Response {
    Page(Page),
    Item(Option<Entity>),
}

/// One fetch holding the gate.
///
/// Dropping it leaves the gate. A fetch dropped before it settled (a
/// cancelled future) unwinds its `begin_fetch` transition first.
struct Flight<'a> {
    session: &'a Session,
    generation: u64,
    /// State before a reset wiped it.
    prior: Option<SyncState>,
    settled: bool,
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!("fetch cancelled before its response arrived");
            let prior = self.prior.take();
            let session = self.session;
            session.transition_if(self.generation, |s| session.unwind(s, prior.as_ref()));
        }
        lock(&self.session.inner.replay).take();
        lock(&self.session.inner.gate).exit();
        self.session.inner.released.notify_waiters();
    }
}

impl Session {
    pub fn new(ctx: SyncContext, reference: Option<Reference>, options: QueryOptions) -> Self {
        let initial = SyncState::initial(
            options.filters.clone(),
            options.auto_fetch && reference.is_some(),
        );
        let (state, _) = watch::channel(initial);
        Session {
            inner: Arc::new(SessionInner {
                ctx,
                options,
                target: RwLock::new(Target {
                    generation: 0,
                    reference,
                }),
                state,
                gate: Mutex::new(FetchGate::new()),
                released: Notify::new(),
                replay: Mutex::new(None),
                painted: Mutex::new(None),
            }),
        }
    }

    pub(crate) fn downgrade(&self) -> WeakSession {
        WeakSession(Arc::downgrade(&self.inner))
    }

    pub(crate) fn context(&self) -> &SyncContext {
        &self.inner.ctx
    }

    pub fn options(&self) -> &QueryOptions {
        &self.inner.options
    }

    pub fn reference(&self) -> Option<Reference> {
        read(&self.inner.target).reference.clone()
    }

    fn generation(&self) -> u64 {
        read(&self.inner.target).generation
    }

    /// Points the session at another reference and starts from a clean state.
    ///
    /// A fetch still in flight for the previous reference is discarded when
    /// it lands.
    pub(crate) fn set_reference(&self, reference: Option<Reference>) {
        let loading = self.inner.options.auto_fetch && reference.is_some();
        {
            let mut target = write(&self.inner.target);
            target.generation += 1;
            target.reference = reference;
        }
        lock(&self.inner.painted).take();
        self.inner
            .state
            .send_replace(SyncState::initial(self.inner.options.filters.clone(), loading));
    }

    /// The current snapshot.
    pub fn state(&self) -> SyncState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.inner.state.subscribe()
    }

    /// Items to display: the cached snapshot while the first page is still
    /// loading, the live items otherwise.
    pub fn items(&self) -> Vec<Entity> {
        let state = self.inner.state.borrow();
        if state.loading && state.items.is_empty() {
            if let Some(painted) = lock(&self.inner.painted).as_ref() {
                return painted.clone();
            }
        }
        state.items.clone()
    }

    /// No items, not loading and no error.
    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().is_empty()
    }

    /// True while a fetch holds the gate.
    pub fn is_fetching(&self) -> bool {
        lock(&self.inner.gate).is_held()
    }

    /// Applies `f` unless the reference changed since `generation`.
    fn transition_if(&self, generation: u64, f: impl FnOnce(&SyncState) -> SyncState) -> bool {
        self.inner.state.send_if_modified(|current| {
            if self.generation() != generation {
                return false;
            }
            let next = f(current);
            *current = next;
            true
        })
    }

    /// Ends the loading phase of a fetch that produced no page. Runs under
    /// the state lock so no realtime batch slips between replay and restore.
    fn unwind(&self, current: &SyncState, prior: Option<&SyncState>) -> SyncState {
        let replay = lock(&self.inner.replay).take().unwrap_or_default();
        match prior {
            Some(prior) => current.restore(prior, &replay),
            None => current.settle(),
        }
    }

    fn enter_gate(&self, generation: u64) -> Option<Flight<'_>> {
        let entered = lock(&self.inner.gate).try_enter();
        entered.then_some(Flight {
            session: self,
            generation,
            prior: None,
            settled: false,
        })
    }

    /// Fetches one page with `filters`.
    ///
    /// # Errors
    ///
    /// Returns the transport failure after recording it in state.
    pub async fn fetch_page(
        &self,
        filters: FilterExpressionList,
        cache: CacheMode,
        reset: bool,
    ) -> Result<Fetch> {
        let (generation, reference) = {
            let target = read(&self.inner.target);
            (target.generation, target.reference.clone())
        };
        let Some(reference) = reference else {
            return Ok(Fetch::Inactive);
        };
        let Some(mut flight) = self.enter_gate(generation) else {
            tracing::debug!(reference = %reference, "fetch already in flight, dropping request");
            return Ok(Fetch::Dropped);
        };

        let wire = normalize(&filters);
        let mut prior = None;
        let began = self.transition_if(generation, |s| {
            if reset {
                prior = Some(s.clone());
                *lock(&self.inner.replay) = Some(Vec::new());
            }
            s.begin_fetch(filters, reset)
        });
        if !began {
            flight.settled = true;
            return Ok(Fetch::Superseded);
        }
        flight.prior = prior;

        let outcome = self
            .request(&reference, wire, cache)
            .await
            .and_then(|body| decode(&reference, body));
        flight.settled = true;

        match outcome {
            Ok(response) => {
                let applied = self.transition_if(generation, |s| {
                    lock(&self.inner.replay).take();
                    match response {
                        Response::Page(page) => {
                            tracing::debug!(
                                reference = %reference,
                                items = page.items.len(),
                                has_more = page.has_more,
                                "page fetched"
                            );
                            s.complete_page(page)
                        }
                        Response::Item(item) => s.complete_item(item),
                    }
                });
                if !applied {
                    tracing::debug!(
                        reference = %reference,
                        "reference changed, discarding response"
                    );
                    return Ok(Fetch::Superseded);
                }
                lock(&self.inner.painted).take();
                if reset {
                    self.store_snapshot(&reference);
                }
                Ok(Fetch::Applied)
            }
            Err(e) => {
                let prior = flight.prior.take();
                let recorded = self.transition_if(generation, |s| {
                    self.unwind(s, prior.as_ref()).fail(e.clone())
                });
                if !recorded {
                    tracing::debug!(
                        reference = %reference,
                        "reference changed, discarding failure: {}",
                        e
                    );
                    return Ok(Fetch::Superseded);
                }
                tracing::warn!(reference = %reference, "fetch failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Runs a reset fetch with the configured filters, waiting out a fetch
    /// still in flight for a previous reference.
    pub(crate) async fn fetch_initial(&self) -> Result<Fetch> {
        loop {
            let released = self.inner.released.notified();
            let mut released = std::pin::pin!(released);
            released.as_mut().enable();

            let filters = self.inner.options.filters.clone();
            match self.fetch_page(filters, self.inner.options.cache, true).await? {
                Fetch::Dropped => released.await,
                outcome => return Ok(outcome),
            }
        }
    }

    async fn request(
        &self,
        reference: &Reference,
        wire: WireFilters,
        cache: CacheMode,
    ) -> TransportResult<Value> {
        let defaults = self.inner.ctx.config.request_defaults().await?;
        let options = &self.inner.options;
        let request = build_request(
            reference,
            defaults,
            wire,
            options.limit,
            options.fields.as_deref(),
            cache,
        );
        self.inner.ctx.transport.request(request).await
    }

    /// Fetches the next page with the current filters and cursor.
    pub async fn fetch_more(&self) -> Result<Fetch> {
        let (filters, cursor) = {
            let state = self.inner.state.borrow();
            (state.filters.clone(), state.cursor.clone())
        };
        self.fetch_page(filters.with_cursor(cursor), self.inner.options.cache, false)
            .await
    }

    /// Refetches the first page with the current filters, bypassing caches.
    pub async fn reload(&self) -> Result<Fetch> {
        let filters = self.inner.state.borrow().filters.clone();
        self.fetch_page(filters, CacheMode::BYPASS, true).await
    }

    /// Drops all filters and refetches the first page.
    pub async fn reset(&self) -> Result<Fetch> {
        self.fetch_page(FilterExpressionList::new(), self.inner.options.cache, true)
            .await
    }

    /// Replaces the filters and refetches the first page.
    pub async fn set_filter(&self, filters: FilterExpressionList) -> Result<Fetch> {
        self.fetch_page(filters, CacheMode::BYPASS, true).await
    }

    /// Folds a realtime batch into the items.
    pub fn apply_realtime(&self, batch: &RealtimeBatch) {
        if batch.is_empty() {
            return;
        }
        tracing::debug!(updates = batch.items.len(), "folding realtime batch");
        self.inner.state.send_modify(|current| {
            if let Some(replay) = lock(&self.inner.replay).as_mut() {
                replay.extend(batch.items.iter().cloned());
            }
            let next = current.apply_batch(&batch.items);
            *current = next;
        });
    }

    fn snapshot_key(&self, reference: &Reference) -> Option<(SnapshotCache, String)> {
        let cache = self.inner.ctx.snapshots.clone()?;
        match SnapshotCache::key(reference, &self.inner.options) {
            Ok(key) => Some((cache, key)),
            Err(e) => {
                tracing::warn!("snapshot key unavailable: {}", e);
                None
            }
        }
    }

    /// Loads the cached snapshot, if any, for display during the first fetch.
    pub(crate) fn paint_from_cache(&self) {
        let Some(reference) = self.reference() else {
            return;
        };
        let Some((cache, key)) = self.snapshot_key(&reference) else {
            return;
        };
        match cache.load(&key) {
            Ok(items) => *lock(&self.inner.painted) = items,
            Err(e) => tracing::warn!(reference = %reference, "snapshot unreadable: {}", e),
        }
    }

    fn store_snapshot(&self, reference: &Reference) {
        let Some((cache, key)) = self.snapshot_key(reference) else {
            return;
        };
        let items = self.inner.state.borrow().items.clone();
        if let Err(e) = cache.store(&key, &items) {
            tracing::warn!(reference = %reference, "snapshot not saved: {}", e);
        }
    }
}

fn decode(reference: &Reference, body: Value) -> TransportResult<Response> {
    if reference.is_collection() {
        decode_page(body).map(Response::Page)
    } else {
        decode_item(body).map(Response::Item)
    }
}

fn decode_page(body: Value) -> TransportResult<Page> {
    match body {
        Value::Null => Ok(Page::default()),
        body => serde_json::from_value(body).map_err(|e| TransportError::Decode(e.to_string())),
    }
}

fn decode_item(body: Value) -> TransportResult<Option<Entity>> {
    match body {
        Value::Null => Ok(None),
        Value::Object(fields) => Ok(Some(Entity::new(fields))),
        other => Err(TransportError::Decode(format!(
            "expected an object or null, got {other}"
        ))),
    }
}
