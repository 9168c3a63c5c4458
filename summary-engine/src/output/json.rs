// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    classify::{ClassificationKind, DiffKind},
    errors::WriteSummaryError,
    summary::Summary,
};
use indexmap::IndexMap;
use serde::Serialize;
use std::{collections::BTreeMap, io};
use summary_metadata::TestStatus;

/// A machine-readable report for a summary.
///
/// Test paths are written with the configured separator, so they match the keys in the result
/// files they came from.
#[derive(Clone, Debug, Serialize)]
pub struct SummaryReport<'a> {
    /// Per-run information, in run order.
    pub runs: Vec<RunReport<'a>>,

    /// The tests in each classification set, sorted by path.
    pub tests: IndexMap<ClassificationKind, Vec<String>>,

    /// Per-pair counts, one entry per pair of adjacent runs.
    pub pairs: Vec<PairReport>,
}

/// Information about a single run in a [`SummaryReport`].
#[derive(Clone, Debug, Serialize)]
pub struct RunReport<'a> {
    /// The name of the run.
    pub name: &'a str,

    /// The time the run took in seconds, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_elapsed: Option<f64>,

    /// The number of passed tests.
    pub passed: u64,

    /// The number of tests that count towards the total.
    pub total: u64,

    /// The most severe status in the run.
    pub status: TestStatus,

    /// The number of leaf tests with each status.
    pub counts: BTreeMap<TestStatus, usize>,
}

/// Counts for a pair of adjacent runs in a [`SummaryReport`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PairReport {
    /// The index of the earlier run.
    pub previous: usize,

    /// The index of the later run.
    pub current: usize,

    /// The number of tests present in both runs whose status changed.
    pub changes: usize,

    /// The number of tests present in both runs whose status got less severe.
    pub fixes: usize,

    /// The number of tests present in both runs whose status got more severe.
    pub regressions: usize,
}

impl<'a> SummaryReport<'a> {
    /// Builds a report for a summary.
    pub fn new(summary: &'a Summary) -> Self {
        let separator = summary.config().separator();

        let runs = summary
            .runs()
            .iter()
            .zip(summary.aggregates())
            .map(|(run, aggregate)| {
                let fraction = aggregate.root_fraction();
                RunReport {
                    name: run.name(),
                    time_elapsed: run.time_elapsed(),
                    passed: fraction.passed,
                    total: fraction.total,
                    status: aggregate.root_status(),
                    counts: run.status_counts(),
                }
            })
            .collect();

        let tests = summary
            .classification()
            .iter()
            .map(|(kind, tests)| {
                let paths = tests
                    .iter()
                    .map(|test| test.display(separator).to_string())
                    .collect();
                (kind, paths)
            })
            .collect();

        let changes = summary.diff_counts(DiffKind::Changes);
        let fixes = summary.diff_counts(DiffKind::Fixes);
        let regressions = summary.diff_counts(DiffKind::Regressions);
        let pairs = (0..changes.len())
            .map(|previous| PairReport {
                previous,
                current: previous + 1,
                changes: changes[previous],
                fixes: fixes[previous],
                regressions: regressions[previous],
            })
            .collect();

        Self { runs, tests, pairs }
    }

    /// Writes this report as pretty-printed JSON, followed by a newline.
    pub fn write_json(&self, mut writer: impl io::Write) -> Result<(), WriteSummaryError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SummaryConfig, test_helpers::simple_run};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn report_contents() {
        let mut old = simple_run("old", &[("a/x", TestStatus::Pass), ("a/y", TestStatus::Skip)]);
        old.time_elapsed = Some(1.5);
        let new = simple_run("new", &[("a/x", TestStatus::Fail), ("a/y", TestStatus::Pass)]);
        let summary = Summary::new([old, new], &SummaryConfig::default()).unwrap();

        let report = SummaryReport::new(&summary);
        assert_eq!(
            report.pairs,
            vec![PairReport {
                previous: 0,
                current: 1,
                changes: 2,
                fixes: 0,
                regressions: 2,
            }]
        );
        let kinds: Vec<_> = report.tests.keys().copied().collect();
        assert_eq!(kinds, ClassificationKind::ALL.to_vec());

        let mut out = Vec::new();
        report.write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(
            value["runs"],
            json!([
                {
                    "name": "old",
                    "time_elapsed": 1.5,
                    "passed": 1,
                    "total": 1,
                    "status": "pass",
                    "counts": { "skip": 1, "pass": 1 },
                },
                {
                    "name": "new",
                    "passed": 1,
                    "total": 2,
                    "status": "fail",
                    "counts": { "pass": 1, "fail": 1 },
                },
            ])
        );
        assert_eq!(value["tests"]["all"], json!(["a/x", "a/y"]));
        assert_eq!(value["tests"]["regressions"], json!(["a/x"]));
        assert_eq!(value["tests"]["enabled"], json!(["a/y"]));
        assert_eq!(value["tests"]["fixes"], json!([]));
        assert_eq!(value["pairs"][0]["regressions"], json!(2));
    }

    #[test]
    fn single_run_has_no_pairs() {
        let summary = Summary::new(
            [simple_run("only", &[("t", TestStatus::Crash)])],
            &SummaryConfig::default(),
        )
        .unwrap();

        let report = SummaryReport::new(&summary);
        assert!(report.pairs.is_empty());
        assert_eq!(report.runs[0].status, TestStatus::Crash);
        assert_eq!(
            report.tests[&ClassificationKind::Problems],
            vec!["t".to_owned()]
        );
    }
}
