// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for fetching pages.
//!
//! Provides the trait seams the coordinator talks through:
//! - [`Transport`]: performs one request and returns the raw JSON body
//! - [`ConfigProvider`]: resolves default request options before each fetch
//! - [`RequestHook`]: opaque interceptors forwarded to the transport

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use lq_core::filter::{CURSOR_KEY, FIELDS_KEY, LIMIT_KEY};
use lq_core::{Reference, TransportResult, WireFilters};

/// Flat query parameters.
pub type Query = BTreeMap<String, Value>;

/// Boxed future returned by the collaborator traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// How the transport may use its response cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheMode {
    /// Answer from cache when possible.
    pub use_cache: bool,
    /// Store the response in cache.
    pub update_cache: bool,
}

impl CacheMode {
    /// Always hit the network, leave the cache alone.
    pub const BYPASS: CacheMode = CacheMode {
        use_cache: false,
        update_cache: false,
    };

    /// Read through and refresh the cache.
    pub const FULL: CacheMode = CacheMode {
        use_cache: true,
        update_cache: true,
    };
}

/// Interceptor run by the transport around a request.
///
/// The coordinator only forwards hooks; running them is up to the transport.
pub trait RequestHook: Send + Sync + fmt::Debug {
    /// Called before the request is sent.
    fn before_request(&self, _options: &mut RequestOptions) {}

    /// Called with the decoded response body.
    fn after_response(&self, _body: &mut Value) {}
}

/// A fully built request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub uri: String,
    pub cache: CacheMode,
    pub query: Query,
    pub headers: BTreeMap<String, String>,
    pub hooks: Vec<Arc<dyn RequestHook>>,
}

/// Defaults supplied by a [`ConfigProvider`] (auth headers, base query).
#[derive(Debug, Clone, Default)]
pub struct RequestDefaults {
    pub headers: BTreeMap<String, String>,
    pub query: Query,
    pub hooks: Vec<Arc<dyn RequestHook>>,
}

impl RequestDefaults {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_hook(mut self, hook: Arc<dyn RequestHook>) -> Self {
        self.hooks.push(hook);
        self
    }
}

/// Transport trait for request/response fetching.
///
/// Implementations own timeouts, retries and HTTP caching. A collection
/// request answers with `{items, cursor, has_more}`; an item request answers
/// with the entity object or `null`.
pub trait Transport: Send + Sync {
    fn request(&self, options: RequestOptions) -> BoxFuture<'_, TransportResult<Value>>;
}

/// Resolves default request options before each fetch.
pub trait ConfigProvider: Send + Sync {
    fn request_defaults(&self) -> BoxFuture<'_, TransportResult<RequestDefaults>>;
}

/// A provider that always returns the same defaults.
#[derive(Debug, Clone, Default)]
pub struct StaticDefaults(pub RequestDefaults);

impl ConfigProvider for StaticDefaults {
    fn request_defaults(&self) -> BoxFuture<'_, TransportResult<RequestDefaults>> {
        let defaults = self.0.clone();
        Box::pin(async move { Ok(defaults) })
    }
}

/// Builds the outbound request for one fetch.
///
/// Precedence: the defaults' query is the base, normalized filters override
/// same-named keys, and `_limit`/`_fields`/`_cursor` only ever come from this
/// call.
pub fn build_request(
    reference: &Reference,
    defaults: RequestDefaults,
    filters: WireFilters,
    limit: Option<u32>,
    fields: Option<&str>,
    cache: CacheMode,
) -> RequestOptions {
    let RequestDefaults {
        headers,
        mut query,
        hooks,
    } = defaults;

    for key in [LIMIT_KEY, FIELDS_KEY, CURSOR_KEY] {
        query.remove(key);
    }
    query.extend(filters.into_inner());
    if let Some(limit) = limit {
        query.insert(LIMIT_KEY.to_string(), Value::from(limit));
    }
    if let Some(fields) = fields {
        query.insert(FIELDS_KEY.to_string(), Value::from(fields));
    }

    RequestOptions {
        uri: reference.as_str().to_string(),
        cache,
        query,
        headers,
        hooks,
    }
}
