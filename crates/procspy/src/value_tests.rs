// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use yare::parameterized;

#[parameterized(
    no_encoding = { None, b"Hi!".to_vec() },
    utf8 = { Some("utf8"), b"Hi!".to_vec() },
    utf_dash_8 = { Some("utf-8"), b"Hi!".to_vec() },
    upper_case = { Some("UTF-8"), b"Hi!".to_vec() },
    latin1 = { Some("latin1"), b"Hi!".to_vec() },
)]
fn text_encodes(encoding: Option<&str>, expected: Vec<u8>) {
    let data = WriteData::from("Hi!");
    assert_eq!(&*data.encode(encoding).unwrap(), expected.as_slice());
}

#[test]
fn hex_text_decodes_to_bytes() {
    let data = WriteData::from("48656c6c6f");
    assert_eq!(&*data.encode(Some("hex")).unwrap(), b"Hello");
}

#[parameterized(
    bad_hex = { "zz", Some("hex") },
    odd_hex = { "abc", Some("hex") },
    unknown = { "text", Some("ebcdic") },
)]
fn invalid_encoding_is_rejected(text: &str, encoding: Option<&str>) {
    let err = WriteData::from(text).encode(encoding).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}

#[test]
fn bytes_ignore_encoding() {
    let data = WriteData::from(b"Hello, world".as_slice());
    assert_eq!(&*data.encode(Some("ebcdic")).unwrap(), b"Hello, world");
}

#[test]
fn accessors_follow_variant() {
    let text = WriteData::from("abc");
    assert_eq!(text.as_text(), Some("abc"));
    assert_eq!(text.as_bytes(), None);

    let bytes = WriteData::from(vec![1u8, 2, 3]);
    assert_eq!(bytes.as_bytes(), Some([1u8, 2, 3].as_slice()));
    assert_eq!(bytes.as_text(), None);

    assert!(WriteData::from("").is_empty());
    assert!(WriteData::from(Vec::new()).is_empty());
}

#[test]
fn callbacks_compare_by_identity() {
    let cb = WriteCallback::new(|_| {});
    let same = cb.clone();
    let other = WriteCallback::new(|_| {});

    assert_eq!(cb, same);
    assert_ne!(cb, other);
}

#[test]
fn callback_receives_outcome() {
    let seen = std::sync::Arc::new(AtomicUsize::new(0));
    let counter = std::sync::Arc::clone(&seen);
    let cb = WriteCallback::new(move |err| {
        if err.is_none() {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    cb.call(None);
    cb.call(Some(&std::io::Error::other("boom")));
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn log_values_keep_structure() {
    #[derive(serde::Serialize)]
    struct Payload {
        array: Vec<u8>,
        null: Option<u8>,
    }

    let value = to_log_value(&Payload {
        array: vec![],
        null: None,
    });
    assert_eq!(value, json!({ "array": [], "null": null }));
    assert_eq!(to_log_value("Hello"), json!("Hello"));
    assert_eq!(to_log_value(&-2), json!(-2));
}

#[test]
fn unserializable_log_value_becomes_placeholder() {
    let mut map = std::collections::HashMap::new();
    map.insert(vec![1u8], 1u8);

    let value = to_log_value(&map);
    let text = value.as_str().unwrap();
    assert!(text.starts_with("<unserializable"), "got {}", text);
}
