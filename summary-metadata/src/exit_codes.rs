// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `results-summary` failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum SummaryExitCode {}

impl SummaryExitCode {
    /// No errors occurred and the summary was produced.
    pub const OK: i32 = 0;

    /// The configuration or command line could not be set up.
    pub const SETUP_ERROR: i32 = 96;

    /// A result file could not be read or parsed.
    pub const LOAD_FAILED: i32 = 97;

    /// A result file was structurally malformed, for example a test with an empty name.
    pub const MALFORMED_RESULTS: i32 = 98;

    /// Writing data to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
