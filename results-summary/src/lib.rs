// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Summarize and compare conformance test results across runs.
//!
//! This crate is the command-line frontend. The summary logic lives in
//! [summary-engine](https://crates.io/crates/summary-engine).

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{LOG_ENV, OutputContext, OutputWriter, StderrStyles};
