// Host-side tests for the bounded asset retry loop.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod retry {
    include!("../src/retry.rs");
}

use hero_core::constants::FETCH_ATTEMPTS;
use retry::load_with_retry;
use std::cell::Cell;

#[test]
fn first_success_stops_the_loop() {
    let calls = Cell::new(0);
    let got = pollster::block_on(load_with_retry("sprite", FETCH_ATTEMPTS, |_| {
        calls.set(calls.get() + 1);
        async { Ok::<_, String>(7u32) }
    }));
    assert_eq!(got, Some(7));
    assert_eq!(calls.get(), 1);
}

#[test]
fn one_failure_is_retried() {
    let got = pollster::block_on(load_with_retry("background", FETCH_ATTEMPTS, |attempt| async move {
        if attempt == 1 {
            Err("HTTP 503".to_string())
        } else {
            Ok(attempt)
        }
    }));
    assert_eq!(got, Some(2));
}

#[test]
fn gives_up_after_two_attempts() {
    assert_eq!(FETCH_ATTEMPTS, 2);
    let calls = Cell::new(0);
    let got: Option<u32> = pollster::block_on(load_with_retry("background", FETCH_ATTEMPTS, |_| {
        calls.set(calls.get() + 1);
        async { Err("offline") }
    }));
    assert_eq!(got, None);
    assert_eq!(calls.get(), 2);
}

#[test]
fn zero_attempts_still_tries_once() {
    let calls = Cell::new(0);
    let got: Option<u32> = pollster::block_on(load_with_retry("sprite", 0, |_| {
        calls.set(calls.get() + 1);
        async { Err("offline") }
    }));
    assert_eq!(got, None);
    assert_eq!(calls.get(), 1);
}
