#![cfg(test)]

//! Log capture for unit tests; same filter rules as the integration tests
//! (`TEST_LOG`, then `RUST_LOG`, default `warn`).

pub fn init() {
    backend_test_support::logging::init();
}
