// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Styles, column_width};
use crate::{
    classify::ClassificationKind,
    errors::WriteSummaryError,
    render::{GroupCell, RenderEvent, TestCell},
    summary::Summary,
    write_str::WriteStr,
};
use owo_colors::{OwoColorize, Style};

const INDENT: usize = 2;
const NOT_RUN: &str = "Not Run";

/// Prints one page of a summary as an indented table of groups and tests.
///
/// A page is the set of tests in a [`ClassificationKind`].
#[derive(Debug)]
pub struct TreePrinter<'a> {
    summary: &'a Summary,
    styles: Styles,
}

impl<'a> TreePrinter<'a> {
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

    /// Writes the page for `page`.
    pub fn write(
        &self,
        page: ClassificationKind,
        writer: &mut dyn WriteStr,
    ) -> Result<(), WriteSummaryError> {
        if self.summary.tests(page).is_empty() {
            writeln!(writer, "no tests in {page}")?;
            writer.write_str_flush()?;
            return Ok(());
        }

        let rows = self.rows(&self.summary.render(page));
        let config = self.summary.config();

        let name_width = rows
            .iter()
            .map(|row| row.indent + row.name.chars().count())
            .max()
            .unwrap_or(0);
        let widths: Vec<_> = self
            .summary
            .runs()
            .iter()
            .enumerate()
            .map(|(index, run)| {
                let cell_width = rows
                    .iter()
                    .filter_map(|row| row.cells.get(index))
                    .map(|(text, _)| text.len())
                    .max()
                    .unwrap_or(0);
                column_width(run.name(), config.min_name_width(), config.max_name_width())
                    .max(cell_width)
            })
            .collect();

        write!(writer, "{:name_width$}", "")?;
        for (run, &width) in self.summary.runs().iter().zip(&widths) {
            write!(
                writer,
                "  {:>width$.width$}",
                run.name().style(self.styles.run_name)
            )?;
        }
        writeln!(writer)?;

        for row in &rows {
            // Pad by hand so that styling doesn't count towards the width.
            let padding = name_width - row.indent - row.name.chars().count();
            write!(
                writer,
                "{:indent$}{}{:padding$}",
                "",
                row.name.style(row.name_style),
                "",
                indent = row.indent,
            )?;
            for ((text, style), &width) in row.cells.iter().zip(&widths) {
                write!(writer, "  {:>width$}", text.style(*style))?;
            }
            writeln!(writer)?;
        }

        writer.write_str_flush()?;
        Ok(())
    }

    fn rows(&self, events: &[RenderEvent]) -> Vec<Row> {
        let root_name = self.summary.config().root_name();
        events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Root { cells } => Some(Row {
                    indent: 0,
                    name: root_name.to_owned(),
                    name_style: self.styles.group,
                    cells: self.group_cells(cells),
                }),
                RenderEvent::OpenGroup {
                    depth, name, cells, ..
                } => Some(Row {
                    indent: depth * INDENT,
                    name: name.to_string(),
                    name_style: self.styles.group,
                    cells: self.group_cells(cells),
                }),
                RenderEvent::CloseGroup { .. } => None,
                RenderEvent::Test {
                    depth, name, cells, ..
                } => Some(Row {
                    indent: depth * INDENT,
                    name: name.to_string(),
                    name_style: Style::new(),
                    cells: cells
                        .iter()
                        .map(|cell| match cell {
                            TestCell::Status(status) => {
                                (status.to_string(), self.styles.for_status(*status))
                            }
                            TestCell::NotRun => (NOT_RUN.to_owned(), self.styles.skip),
                        })
                        .collect(),
                }),
            })
            .collect()
    }

    fn group_cells(&self, cells: &[GroupCell]) -> Vec<(String, Style)> {
        cells
            .iter()
            .map(|cell| {
                (
                    cell.fraction.to_string(),
                    self.styles.for_status(cell.status),
                )
            })
            .collect()
    }
}

struct Row {
    indent: usize,
    name: String,
    name_style: Style,
    cells: Vec<(String, Style)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SummaryConfig, test_helpers::simple_run};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use summary_metadata::TestStatus;

    fn summary() -> Summary {
        Summary::new(
            [
                simple_run(
                    "old",
                    &[
                        ("spec/a/one", TestStatus::Pass),
                        ("spec/a/two", TestStatus::Fail),
                        ("spec/b", TestStatus::Skip),
                        ("top", TestStatus::Pass),
                    ],
                ),
                simple_run(
                    "new",
                    &[
                        ("spec/a/one", TestStatus::Pass),
                        ("spec/a/two", TestStatus::Pass),
                        ("top", TestStatus::Crash),
                    ],
                ),
            ],
            &SummaryConfig::default(),
        )
        .unwrap()
    }

    fn print(summary: &Summary, page: ClassificationKind) -> String {
        let mut out = String::new();
        TreePrinter::new(summary).write(page, &mut out).unwrap();
        out
    }

    #[test]
    fn all_page() {
        let expected = indoc! {"
                          old      new
            all           2/3      2/3
              spec        1/2      2/2
                a         1/2      2/2
                  one    pass     pass
                  two    fail     pass
                b        skip  Not Run
              top        pass    crash
        "};
        assert_eq!(print(&summary(), ClassificationKind::All), expected);
    }

    #[test]
    fn empty_page() {
        assert_eq!(
            print(&summary(), ClassificationKind::Incomplete),
            "no tests in incomplete\n"
        );
    }
}
