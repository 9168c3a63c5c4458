// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ingestion of result files into the engine's model.
//!
//! Ingestion parses raw test names into [`GroupPath`]s and expands tests with subtests: every
//! subtest becomes a leaf test one level below its parent, and the parent itself becomes a pure
//! group.

use crate::{config::SummaryConfig, errors::IngestError, path::GroupPath};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use summary_metadata::{TestRunSummary, TestStatus};
use tracing::{debug, warn};

/// A single run, with test names parsed and subtests expanded into leaf tests.
#[derive(Clone, Debug)]
pub struct IngestedRun {
    name: String,
    time_elapsed: Option<f64>,
    options: IndexMap<String, serde_json::Value>,
    environment: IndexMap<String, String>,
    tests: BTreeMap<GroupPath, TestStatus>,
    subtest_parents: BTreeSet<GroupPath>,
}

impl IngestedRun {
    /// Ingests a run.
    ///
    /// `index` is the position of this run in the run sequence, and is only used to name runs that
    /// don't have a name.
    pub fn new(
        summary: TestRunSummary,
        index: usize,
        config: &SummaryConfig,
    ) -> Result<Self, IngestError> {
        let TestRunSummary {
            name,
            time_elapsed,
            options,
            environment,
            tests: raw_tests,
        } = summary;
        let name = name.unwrap_or_else(|| format!("run-{index}"));
        let separator = config.separator();

        let mut tests = BTreeMap::new();
        let mut subtest_parents = BTreeSet::new();
        // Subtest leaves are staged here and merged in once every test has been seen.
        let mut staged = Vec::new();

        for (key, result) in &raw_tests {
            let path = GroupPath::parse(key, separator).map_err(|err| {
                IngestError::InvalidTestPath {
                    run_name: name.clone(),
                    key: key.clone(),
                    err,
                }
            })?;

            if result.has_subtests() {
                for (subtest, status) in &result.subtests {
                    let subtest_path = GroupPath::parse(subtest, separator).map_err(|err| {
                        IngestError::InvalidSubtestName {
                            run_name: name.clone(),
                            key: key.clone(),
                            subtest: subtest.clone(),
                            err,
                        }
                    })?;
                    staged.push((path.join_path(&subtest_path), *status));
                }
                subtest_parents.insert(path);
            } else {
                tests.insert(path, result.result);
            }
        }

        for (path, status) in staged {
            if let Some(previous) = tests.insert(path.clone(), status) {
                warn!(
                    "in run `{name}`, subtest `{}` replaces a test with the same name \
                     (status {previous} -> {status})",
                    path.display(separator),
                );
            }
        }

        debug!(
            "ingested run `{name}`: {} tests ({} with subtests)",
            tests.len(),
            subtest_parents.len(),
        );

        Ok(Self {
            name,
            time_elapsed,
            options,
            environment,
            tests,
            subtest_parents,
        })
    }

    /// Returns the display name of this run.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the time this run took, in seconds, if known.
    pub fn time_elapsed(&self) -> Option<f64> {
        self.time_elapsed
    }

    /// Returns the options this run was invoked with.
    pub fn options(&self) -> &IndexMap<String, serde_json::Value> {
        &self.options
    }

    /// Returns information about the environment this run happened in.
    pub fn environment(&self) -> &IndexMap<String, String> {
        &self.environment
    }

    /// Returns the leaf tests of this run and their statuses, sorted by path.
    ///
    /// Tests with subtests are not included: their subtests are.
    pub fn tests(&self) -> &BTreeMap<GroupPath, TestStatus> {
        &self.tests
    }

    /// Returns the status of a leaf test, or `None` if this run doesn't contain it.
    pub fn test_status(&self, path: &GroupPath) -> Option<TestStatus> {
        self.tests.get(path).copied()
    }

    /// Returns true if `path` was a test with subtests in this run.
    pub fn has_subtests(&self, path: &GroupPath) -> bool {
        self.subtest_parents.contains(path)
    }

    /// Returns the number of leaf tests with each status. Statuses with no tests are omitted.
    pub fn status_counts(&self) -> BTreeMap<TestStatus, usize> {
        let mut counts = BTreeMap::new();
        for status in self.tests.values() {
            *counts.entry(*status).or_default() += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::PathParseError,
        test_helpers::{path, run_with},
    };
    use pretty_assertions::assert_eq;
    use summary_metadata::TestResultSummary;

    #[test]
    fn subtests_become_leaves() {
        let summary = run_with([
            ("a/b", TestResultSummary::new(TestStatus::Pass)),
            (
                "g",
                TestResultSummary::new(TestStatus::Fail)
                    .with_subtest("s1", TestStatus::Pass)
                    .with_subtest("s2", TestStatus::Fail),
            ),
        ]);

        let run = IngestedRun::new(summary, 0, &SummaryConfig::default()).unwrap();
        let tests: Vec<_> = run.tests().iter().map(|(p, s)| (p.clone(), *s)).collect();
        assert_eq!(
            tests,
            vec![
                (path("a/b"), TestStatus::Pass),
                (path("g/s1"), TestStatus::Pass),
                (path("g/s2"), TestStatus::Fail),
            ]
        );
        assert_eq!(run.test_status(&path("g")), None, "g is a pure group");
        assert!(run.has_subtests(&path("g")));
        assert!(!run.has_subtests(&path("a/b")));
    }

    #[test]
    fn subtest_replaces_existing_leaf() {
        let summary = run_with([
            ("g/s1", TestResultSummary::new(TestStatus::Crash)),
            (
                "g",
                TestResultSummary::new(TestStatus::Pass).with_subtest("s1", TestStatus::Pass),
            ),
        ]);

        let run = IngestedRun::new(summary, 0, &SummaryConfig::default()).unwrap();
        assert_eq!(run.tests().len(), 1);
        assert_eq!(run.test_status(&path("g/s1")), Some(TestStatus::Pass));
    }

    #[test]
    fn empty_test_name_is_rejected() {
        let summary = run_with([
            ("a", TestResultSummary::new(TestStatus::Pass)),
            ("", TestResultSummary::new(TestStatus::Pass)),
        ]);

        let err = IngestedRun::new(summary, 0, &SummaryConfig::default()).unwrap_err();
        assert_eq!(
            err,
            IngestError::InvalidTestPath {
                run_name: "run".to_owned(),
                key: String::new(),
                err: PathParseError::Empty,
            }
        );
        assert_eq!(err.run_name(), "run");
    }

    #[test]
    fn empty_subtest_name_is_rejected() {
        let summary = run_with([(
            "g",
            TestResultSummary::new(TestStatus::Pass).with_subtest("", TestStatus::Pass),
        )]);

        let err = IngestedRun::new(summary, 0, &SummaryConfig::default()).unwrap_err();
        assert!(
            matches!(
                &err,
                IngestError::InvalidSubtestName { key, subtest, .. } if key == "g" && subtest.is_empty()
            ),
            "{err:?}"
        );
    }

    #[test]
    fn unnamed_run_gets_index_name() {
        let summary = TestRunSummary::default();
        let run = IngestedRun::new(summary, 3, &SummaryConfig::default()).unwrap();
        assert_eq!(run.name(), "run-3");
        assert!(run.tests().is_empty());
    }

    #[test]
    fn status_counts() {
        let summary = run_with([
            ("a", TestResultSummary::new(TestStatus::Pass)),
            ("b", TestResultSummary::new(TestStatus::Pass)),
            ("c", TestResultSummary::new(TestStatus::Skip)),
        ]);

        let run = IngestedRun::new(summary, 0, &SummaryConfig::default()).unwrap();
        let counts = run.status_counts();
        assert_eq!(counts.get(&TestStatus::Pass), Some(&2));
        assert_eq!(counts.get(&TestStatus::Skip), Some(&1));
        assert_eq!(counts.get(&TestStatus::Fail), None);
    }
}
