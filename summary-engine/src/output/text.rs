// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Styles, column_width};
use crate::{
    classify::{ClassificationKind, DiffKind},
    errors::WriteSummaryError,
    summary::Summary,
    write_str::WriteStr,
};
use itertools::Itertools;
use owo_colors::OwoColorize;
use summary_metadata::TestStatus;

/// What [`TextPrinter`] prints.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum TextMode {
    /// The count table only.
    #[default]
    Summary,

    /// Changed tests, then the count table.
    Diff,

    /// Incomplete tests only.
    Incomplete,

    /// Every test, then the count table.
    All,
}

// Rows of the count table, in order.
const STATUS_ROWS: [TestStatus; 9] = [
    TestStatus::Pass,
    TestStatus::Fail,
    TestStatus::Crash,
    TestStatus::Skip,
    TestStatus::Timeout,
    TestStatus::Warn,
    TestStatus::Incomplete,
    TestStatus::DmesgWarn,
    TestStatus::DmesgFail,
];

const DIFF_ROWS: [(&str, DiffKind); 3] = [
    ("changes", DiffKind::Changes),
    ("fixes", DiffKind::Fixes),
    ("regressions", DiffKind::Regressions),
];

const LABEL_WIDTH: usize = 11;

/// Prints a summary as plain text.
#[derive(Debug)]
pub struct TextPrinter<'a> {
    summary: &'a Summary,
    styles: Styles,
}

impl<'a> TextPrinter<'a> {
    /// Creates a new printer for this summary, without colors.
    pub fn new(summary: &'a Summary) -> Self {
        Self {
            summary,
            styles: Styles::default(),
        }
    }

    /// Colorizes output.
    pub fn colorize(&mut self) {
        self.styles.colorize();
    }

    /// Writes the summary in the given mode.
    pub fn write(&self, mode: TextMode, writer: &mut dyn WriteStr) -> Result<(), WriteSummaryError> {
        match mode {
            TextMode::Summary => self.write_table(writer)?,
            TextMode::Diff => {
                self.write_tests(ClassificationKind::Changes, writer)?;
                self.write_table(writer)?;
            }
            TextMode::Incomplete => self.write_tests(ClassificationKind::Incomplete, writer)?,
            TextMode::All => {
                self.write_tests(ClassificationKind::All, writer)?;
                self.write_table(writer)?;
            }
        }

        writer.write_str_flush()?;
        Ok(())
    }

    fn write_tests(
        &self,
        kind: ClassificationKind,
        writer: &mut dyn WriteStr,
    ) -> Result<(), WriteSummaryError> {
        for test in self.summary.tests(kind) {
            let statuses = self
                .summary
                .status_sequence(test)
                .into_iter()
                .map(|status| status.style(self.styles.for_status(status)).to_string())
                .join(" ");
            writeln!(writer, "{}: {statuses}", test.display('/'))?;
        }
        Ok(())
    }

    fn write_table(&self, writer: &mut dyn WriteStr) -> Result<(), WriteSummaryError> {
        let config = self.summary.config();
        let runs = self.summary.runs();
        let widths: Vec<_> = runs
            .iter()
            .map(|run| column_width(run.name(), config.min_name_width(), config.max_name_width()))
            .collect();
        let row = |cells: &mut dyn Iterator<Item = String>| {
            cells
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:>width$.width$}"))
                .join(" ")
        };

        writeln!(writer, "{}", "summary:".style(self.styles.label))?;

        let names = row(&mut runs.iter().map(|run| run.name().to_owned()));
        writeln!(
            writer,
            "{:>LABEL_WIDTH$}: {}",
            "name".style(self.styles.label),
            names.style(self.styles.run_name),
        )?;
        let divider = row(&mut widths.iter().map(|width| "-".repeat(*width)));
        writeln!(writer, "{:>LABEL_WIDTH$}  {divider}", "----")?;

        let counts: Vec<_> = runs.iter().map(|run| run.status_counts()).collect();
        for status in STATUS_ROWS {
            let cells = row(&mut counts
                .iter()
                .map(|counts| counts.get(&status).copied().unwrap_or(0).to_string()));
            writeln!(
                writer,
                "{:>LABEL_WIDTH$}: {cells}",
                status.as_str().style(self.styles.for_status(status)),
            )?;
        }

        for (label, kind) in DIFF_ROWS {
            // The first run has nothing to be compared against.
            let counts = self.summary.diff_counts(kind);
            let cells = row(&mut std::iter::once(String::new())
                .chain(counts.iter().map(ToString::to_string)));
            writeln!(
                writer,
                "{:>LABEL_WIDTH$}: {cells}",
                label.style(self.styles.label),
            )?;
        }

        let totals = row(&mut runs.iter().map(|run| run.tests().len().to_string()));
        writeln!(
            writer,
            "{:>LABEL_WIDTH$}: {totals}",
            "total".style(self.styles.label),
        )?;

        Ok(())
    }
}
