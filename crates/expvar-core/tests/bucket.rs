//! Root registry: publish, typed constructors, fatal paths, rendering.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use expvar_core::{render, Bucket, ExpvarError, Func, Int, Map, Str, Var};

#[test]
fn publish_then_get() {
    let b = Bucket::new();
    let i = Arc::new(Int::new());
    i.set(42);
    b.publish("answer", i);
    let v = b.get("answer").unwrap();
    assert_eq!(v.to_json().unwrap(), "42");
    assert!(b.get("Answer").is_none());
}

#[test]
fn try_publish_reports_duplicate() {
    let b = Bucket::new();
    b.try_publish("x", Arc::new(Int::new())).unwrap();
    let err = b.try_publish("x", Arc::new(Str::new())).unwrap_err();
    assert!(matches!(err, ExpvarError::DuplicateName(ref n) if n == "x"));
    assert_eq!(err.kind().as_str(), "DUPLICATE_NAME");
    // The first registration survives.
    assert!(b.get("x").unwrap().is::<Int>());
}

#[test]
#[should_panic(expected = "reuse of exported var name: x")]
fn publish_duplicate_is_fatal() {
    let b = Bucket::new();
    b.publish("x", Arc::new(Int::new()));
    b.publish("x", Arc::new(Int::new()));
}

#[test]
fn new_int_is_idempotent() {
    let b = Bucket::new();
    let first = b.new_int("n");
    let second = b.new_int("n");
    assert!(Arc::ptr_eq(&first, &second));
    first.add(3);
    assert_eq!(second.value(), 3);
    assert_eq!(b.len(), 1);
}

#[test]
fn typed_constructors_per_kind() {
    let b = Bucket::new();
    b.new_float("f").set(1.25);
    b.new_string("s").set("hi");
    b.new_map("m").add("k", 1);
    assert!(Arc::ptr_eq(&b.new_map("m"), &b.new_map("m")));
    assert_eq!(b.new_float("f").value(), 1.25);
    assert_eq!(b.new_string("s").value().as_str(), "hi");
}

#[test]
fn kind_mismatch_is_reported() {
    let b = Bucket::new();
    b.new_string("s");
    let err = b.try_get_or_new::<Int>("s").unwrap_err();
    assert!(matches!(err, ExpvarError::KindMismatch { expected: "int", .. }));
}

#[test]
#[should_panic(expected = "exported var s is not int")]
fn kind_mismatch_is_fatal() {
    let b = Bucket::new();
    b.new_string("s");
    b.new_int("s");
}

#[test]
fn racing_new_int_returns_one_instance() {
    let b = Bucket::new();
    let handles: Vec<Arc<Int>> = thread::scope(|s| {
        let joins: Vec<_> = (0..8).map(|_| s.spawn(|| b.new_int("race"))).collect();
        joins.into_iter().map(|j| j.join().unwrap()).collect()
    });
    assert!(handles.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[test]
fn do_each_is_sorted() {
    let b = Bucket::new();
    for name in ["b", "c", "a"] {
        b.new_int(name);
    }
    let mut seen = Vec::new();
    b.do_each(|kv| seen.push(kv.key));
    assert_eq!(seen, ["a", "b", "c"]);
}

#[test]
fn render_document_shape() {
    let b = Bucket::new();
    b.new_int("b").set(2);
    b.new_string("a").set("x");
    let m = b.new_map("c");
    m.add("z", 1);
    m.add("y", 2);
    assert_eq!(
        render(&b),
        "{\n\"a\": \"x\",\n\"b\": 2,\n\"c\": {\"y\": 2, \"z\": 1}\n}\n"
    );
}

#[test]
fn render_empty_bucket_is_valid_json() {
    let b = Bucket::new();
    let v: serde_json::Value = serde_json::from_str(&render(&b)).unwrap();
    assert_eq!(v, serde_json::json!({}));
}

#[test]
fn render_skips_broken_vars_and_stays_valid() {
    let b = Bucket::new();
    b.new_float("nan").set(f64::NAN);
    b.new_int("ok").set(1);
    b.publish("args", Arc::new(Func::new(|| vec!["bin", "--flag"])));
    let text = render(&b);
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v, serde_json::json!({ "args": ["bin", "--flag"], "ok": 1 }));
}

#[test]
fn render_mixed_kinds_parses() {
    let b = Bucket::new();
    b.new_int("i").set(-1);
    b.new_float("f").set(0.5);
    b.new_string("s").set("quote\"d");
    let outer = b.new_map("m");
    let inner = Arc::new(Map::new());
    inner.add_float("g", 1.5);
    outer.set("inner", inner);
    let v: serde_json::Value = serde_json::from_str(&render(&b)).unwrap();
    assert_eq!(v["m"]["inner"]["g"], 1.5);
    assert_eq!(v["s"], "quote\"d");
}

#[test]
fn default_bucket_is_a_singleton() {
    let a = expvar_core::default_bucket();
    let b = expvar_core::default_bucket();
    assert!(Arc::ptr_eq(a, b));
    let hits = expvar_core::new_int("bucket_test_hits");
    hits.increment();
    let got = expvar_core::get("bucket_test_hits").unwrap();
    assert_eq!(got.to_json().unwrap(), "1");
    assert!(expvar_core::render_default().contains("\"bucket_test_hits\": 1"));
}
