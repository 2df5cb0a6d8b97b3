//! Integration test crate for the grange ledger.
//!
//! This crate has no library code — it only contains integration tests
//! that exercise end-to-end ledger flows across multiple workspace crates.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p grange-integration-tests
//! ```
