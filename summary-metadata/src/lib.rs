// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to conformance test result files.
//!
//! A result file is the JSON output of a single conformance test execution: a
//! run name, some environment metadata, and a map of test names to
//! [`TestResultSummary`] values. The [`TestStatus`] scale defined here is
//! shared by everything that consumes these files.

mod errors;
mod exit_codes;
mod run;
mod status;

pub use errors::*;
pub use exit_codes::*;
pub use run::*;
pub use status::*;
