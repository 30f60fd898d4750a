// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborators shared by every query of a client.

use std::sync::Arc;

use super::cache::SnapshotCache;
use super::realtime::{ConnectivitySignal, LocalChannel, RealtimeChannel};
use super::transport::{ConfigProvider, StaticDefaults, Transport};

/// Transport, realtime channel, connectivity signal, request defaults and
/// snapshot cache, bundled for handing to sessions.
#[derive(Clone)]
pub struct SyncContext {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) config: Arc<dyn ConfigProvider>,
    pub(crate) realtime: Option<Arc<dyn RealtimeChannel>>,
    pub(crate) connectivity: Option<Arc<dyn ConnectivitySignal>>,
    pub(crate) snapshots: Option<SnapshotCache>,
}

impl SyncContext {
    /// A context with empty request defaults and no realtime.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        SyncContext {
            transport,
            config: Arc::new(StaticDefaults::default()),
            realtime: None,
            connectivity: None,
            snapshots: None,
        }
    }

    pub fn with_config_provider(mut self, config: Arc<dyn ConfigProvider>) -> Self {
        self.config = config;
        self
    }

    pub fn with_realtime(mut self, channel: Arc<dyn RealtimeChannel>) -> Self {
        self.realtime = Some(channel);
        self
    }

    pub fn with_connectivity(mut self, signal: Arc<dyn ConnectivitySignal>) -> Self {
        self.connectivity = Some(signal);
        self
    }

    /// Uses one in-process hub for both realtime batches and connectivity.
    pub fn with_local_channel(self, channel: Arc<LocalChannel>) -> Self {
        self.with_realtime(channel.clone()).with_connectivity(channel)
    }

    pub fn with_snapshot_cache(mut self, cache: Option<SnapshotCache>) -> Self {
        self.snapshots = cache;
        self
    }
}
