//! Sorted concurrent map semantics.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use expvar_core::{Float, Int, Map, Str, Var};

fn keys(m: &Map) -> Vec<String> {
    let mut out = Vec::new();
    m.do_each(|kv| out.push(kv.key));
    out
}

fn int(v: i64) -> Arc<Int> {
    let i = Arc::new(Int::new());
    i.set(v);
    i
}

#[test]
fn set_then_get_returns_latest() {
    let m = Map::new();
    m.set("k", int(1));
    m.set("k", int(2));
    let v = m.get("k").unwrap();
    assert_eq!(v.downcast_ref::<Int>().unwrap().value(), 2);
    assert_eq!(m.len(), 1);
    assert!(m.get("missing").is_none());
}

#[test]
fn do_each_visits_in_ascending_order() {
    let m = Map::new();
    for k in ["delta", "alpha", "charlie", "bravo", "Zulu"] {
        m.add(k, 1);
    }
    assert_eq!(keys(&m), ["Zulu", "alpha", "bravo", "charlie", "delta"]);
}

#[test]
fn add_creates_then_accumulates() {
    let m = Map::new();
    m.add("hits", 1);
    m.add("hits", 2);
    m.add_float("load", 0.25);
    m.add_float("load", 0.5);
    assert_eq!(m.to_json().unwrap(), r#"{"hits": 3, "load": 0.75}"#);
}

#[test]
fn add_on_other_kind_is_ignored() {
    let m = Map::new();
    let s = Arc::new(Str::new());
    s.set("keep");
    m.set("name", s);
    m.add("name", 5);
    m.add_float("name", 1.0);
    m.add("f", 0);
    m.add_float("f", 2.0);
    assert_eq!(m.to_json().unwrap(), r#"{"f": 0, "name": "keep"}"#);
}

#[test]
fn delete_of_absent_key_changes_nothing() {
    let m = Map::new();
    m.add("a", 1);
    let before = m.to_json().unwrap();
    m.delete("nope");
    assert_eq!(m.to_json().unwrap(), before);
    m.delete("a");
    assert_eq!(m.to_json().unwrap(), "{}");
    assert!(m.is_empty());
}

#[test]
fn init_clears_but_keeps_identity() {
    let m = Arc::new(Map::new());
    m.add("a", 1);
    m.add("b", 1);
    let same = Arc::clone(&m);
    m.init().add("c", 4);
    assert_eq!(same.to_json().unwrap(), r#"{"c": 4}"#);
}

#[test]
fn nested_map_renders_as_object() {
    let outer = Map::new();
    let inner = Arc::new(Map::new());
    inner.add("x", 1);
    outer.set("inner", inner);
    outer.set("n", int(2));
    let text = outer.to_json().unwrap();
    assert_eq!(text, r#"{"inner": {"x": 1}, "n": 2}"#);
    let _: serde_json::Value = serde_json::from_str(&text).unwrap();
}

#[test]
fn keys_are_json_quoted() {
    let m = Map::new();
    m.add("a\"b", 1);
    let v: serde_json::Value = serde_json::from_str(&m.to_json().unwrap()).unwrap();
    assert_eq!(v["a\"b"], 1);
}

#[test]
fn concurrent_add_on_absent_key_loses_nothing() {
    let m = Map::new();
    thread::scope(|s| {
        for _ in 0..16 {
            s.spawn(|| m.add("shared", 1));
        }
    });
    assert_eq!(m.len(), 1);
    let v = m.get("shared").unwrap();
    assert_eq!(v.downcast_ref::<Int>().unwrap().value(), 16);
}

#[test]
fn concurrent_add_float_on_absent_key() {
    let m = Map::new();
    thread::scope(|s| {
        for _ in 0..16 {
            s.spawn(|| m.add_float("f", 0.25));
        }
    });
    let v = m.get("f").unwrap();
    assert_eq!(v.downcast_ref::<Float>().unwrap().value(), 4.0);
}

#[test]
fn concurrent_set_on_distinct_keys() {
    let m = Map::new();
    thread::scope(|s| {
        for t in 0..8i64 {
            let m = &m;
            s.spawn(move || {
                for n in 0..50i64 {
                    m.set(&format!("k{t:02}-{n:03}"), int(t * 1000 + n));
                }
            });
        }
    });
    assert_eq!(m.len(), 400);
    let ks = keys(&m);
    assert!(ks.windows(2).all(|w| w[0] < w[1]));
    let v = m.get("k03-017").unwrap();
    assert_eq!(v.downcast_ref::<Int>().unwrap().value(), 3017);
}

#[test]
fn racing_set_on_same_new_key_indexes_once() {
    let m = Map::new();
    thread::scope(|s| {
        for t in 0..16 {
            let m = &m;
            s.spawn(move || m.set("same", int(t)));
        }
    });
    assert_eq!(keys(&m), ["same"]);
}

#[test]
fn value_updates_visible_during_walk() {
    let m = Map::new();
    m.add("a", 1);
    m.add("b", 1);
    let mut seen = Vec::new();
    m.do_each(|kv| {
        // Mutating existing values inside the walk must not block.
        m.add("b", 10);
        seen.push(kv.value.to_json().unwrap());
    });
    assert_eq!(seen, ["1", "21"]);
}
