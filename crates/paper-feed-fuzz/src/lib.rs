//! Fuzzing library for paper-feed.
//!
//! This crate provides fuzzing targets for the feed's response decoding and
//! for rendering whatever decodes.
//!
//! # Usage
//!
//! ```bash
//! cd crates/paper-feed-fuzz
//! cargo +nightly fuzz run fuzz_paper_list -- -max_total_time=60
//! ```

pub use paper_feed::models;
pub use paper_feed::render;
