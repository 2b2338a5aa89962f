//! JSON fixture loader shared by the status tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::fs;

use serde_json::Value;

pub fn load(name: &str) -> Value {
    let s = fs::read_to_string(format!("tests/vectors/{name}"))
        .unwrap_or_else(|e| panic!("missing fixture {name}: {e}"));
    serde_json::from_str(&s).expect("fixture is not valid JSON")
}

pub fn as_map(pairs: Vec<(&'static str, f64)>) -> HashMap<&'static str, f64> {
    pairs.into_iter().collect()
}
