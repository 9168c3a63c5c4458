// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for [results-summary](https://crates.io/crates/results-summary).
//!
//! The flow of operations is:
//!
//! 1. Load result files into [`TestRunSummary`](summary_metadata::TestRunSummary) values.
//! 2. Build a [`Summary`](summary::Summary) out of them. This ingests each run, aggregates its
//!    tests into groups, and classifies tests across runs.
//! 3. Print the summary with one of the printers in [`output`].

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod errors;
pub mod ingest;
pub mod output;
pub mod path;
pub mod render;
pub mod summary;
#[cfg(test)]
mod test_helpers;
pub mod write_str;
