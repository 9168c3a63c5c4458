// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Printers for summaries.
//!
//! * [`TextPrinter`] lists tests and prints a per-run count table.
//! * [`TreePrinter`] prints one page of the grouped results as an indented table.
//! * [`SummaryReport`] is a machine-readable report, serialized as JSON.

mod json;
mod text;
mod tree;

pub use json::*;
pub use text::*;
pub use tree::*;

use owo_colors::Style;
use summary_metadata::TestStatus;

/// Styles shared by the text and tree printers.
#[derive(Clone, Debug, Default)]
pub struct Styles {
    /// Style for run names in headers.
    pub run_name: Style,
    /// Style for group names.
    pub group: Style,
    /// Style for table labels.
    pub label: Style,
    /// Style for passing statuses.
    pub pass: Style,
    /// Style for warnings.
    pub warn: Style,
    /// Style for failures.
    pub fail: Style,
    /// Style for crashes, timeouts and incomplete tests.
    pub crash: Style,
    /// Style for skipped and not-run tests.
    pub skip: Style,
}

impl Styles {
    /// Colorizes the styles for terminal output.
    pub fn colorize(&mut self) {
        self.run_name = Style::new().bold();
        self.group = Style::new().bold();
        self.label = Style::new().bold();
        self.pass = Style::new().green();
        self.warn = Style::new().yellow();
        self.fail = Style::new().red().bold();
        self.crash = Style::new().magenta().bold();
        self.skip = Style::new().bright_black();
    }

    /// Returns the style for a status.
    pub fn for_status(&self, status: TestStatus) -> Style {
        match status {
            TestStatus::NotRun | TestStatus::Skip => self.skip,
            TestStatus::Pass => self.pass,
            TestStatus::Warn | TestStatus::DmesgWarn => self.warn,
            TestStatus::Fail | TestStatus::DmesgFail => self.fail,
            TestStatus::Timeout | TestStatus::Crash | TestStatus::Incomplete => self.crash,
        }
    }
}

/// Returns the width of a run column: the run name's length, clamped between `min` and `max`.
pub(crate) fn column_width(name: &str, min: usize, max: usize) -> usize {
    name.chars().count().clamp(min, max)
}
