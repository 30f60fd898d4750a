// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    transport = { Error::Transport(TransportError::ConnectionFailed("refused".into())), "refused" },
    config = { Error::Config("bad limit".into()), "bad limit" },
    cache = { Error::Cache("unreadable".into()), "unreadable" },
    core = { Error::Core(lq_core::Error::InvalidOperator("like".into())), "like" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn error_from_transport() {
    let err: Error = TransportError::Decode("not a page".into()).into();
    assert!(matches!(err, Error::Transport(TransportError::Decode(_))));
}

#[test]
fn error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}
