// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use lq_core::FilterExpression;
use tempfile::TempDir;

#[test]
fn test_defaults_from_empty_file() {
    let config = ClientConfig::parse("").unwrap();
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.limit, Some(10));
    assert!(config.realtime);
    assert!(config.auto_fetch);
    assert!(!config.cache.snapshot);
    assert_eq!(config.cache.max_age_secs, 86_400);
}

#[test]
fn test_parse_full_config() {
    let config = ClientConfig::parse(
        r#"
        limit = 25
        fields = "id,title"
        realtime = false
        auto_fetch = false

        [cache]
        use_cache = true
        update_cache = true
        snapshot = true
        dir = "/tmp/lq"
        max_age_secs = 60
        "#,
    )
    .unwrap();

    assert_eq!(config.limit, Some(25));
    assert_eq!(config.fields.as_deref(), Some("id,title"));
    assert!(!config.realtime);
    assert!(!config.auto_fetch);
    assert!(config.cache.use_cache && config.cache.update_cache);
    assert_eq!(config.cache.dir, Some(PathBuf::from("/tmp/lq")));
    assert_eq!(config.cache.max_age_secs, 60);
}

#[test]
fn test_parse_rejects_bad_types() {
    let err = ClientConfig::parse("limit = \"ten\"").unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_save_and_load_config() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("livequery.toml");
    let mut config = ClientConfig::default();
    config.fields = Some("id".into());
    config.cache.snapshot = true;

    config.save(&path).unwrap();
    let loaded = ClientConfig::load(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_load_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = ClientConfig::load(&temp.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}

#[test]
fn test_query_options_follow_config() {
    let mut config = ClientConfig::default();
    config.limit = Some(50);
    config.realtime = false;
    config.cache.use_cache = true;

    let options = config.query_options();

    assert_eq!(options.limit, Some(50));
    assert!(!options.realtime);
    assert!(options.auto_fetch);
    assert_eq!(
        options.cache,
        CacheMode {
            use_cache: true,
            update_cache: false
        }
    );
}

#[test]
fn test_query_options_builders() {
    let filters = FilterExpressionList::new()
        .with("team", FilterExpression::eq("core"))
        .unwrap();

    let options = QueryOptions::default()
        .with_limit(None)
        .with_fields("id")
        .with_filters(filters.clone())
        .with_cache(CacheMode::FULL)
        .without_realtime()
        .without_auto_fetch();

    assert_eq!(options.limit, None);
    assert_eq!(options.fields.as_deref(), Some("id"));
    assert_eq!(options.filters, filters);
    assert_eq!(options.cache, CacheMode::FULL);
    assert!(!options.realtime);
    assert!(!options.auto_fetch);
}

#[test]
fn test_snapshot_cache_disabled_by_default() {
    assert!(ClientConfig::default()
        .open_snapshot_cache()
        .unwrap()
        .is_none());
}

#[test]
fn test_snapshot_cache_opens_configured_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("snapshots");
    let mut config = ClientConfig::default();
    config.cache.snapshot = true;
    config.cache.dir = Some(dir.clone());

    // The env override wins when set; only assert when it is absent
    if crate::env::cache_dir().is_none() {
        assert_eq!(config.snapshot_dir(), Some(dir.clone()));
        assert!(config.open_snapshot_cache().unwrap().is_some());
        assert!(dir.is_dir());
    }
}
