// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers shared by unit tests.

use crate::{config::SummaryConfig, ingest::IngestedRun, path::GroupPath};
use summary_metadata::{TestResultSummary, TestRunSummary, TestStatus};

/// Parses a `/`-separated path.
pub(crate) fn path(s: &str) -> GroupPath {
    GroupPath::parse(s, '/').expect("test paths are valid")
}

/// Builds a run called `run` out of raw test names and results.
pub(crate) fn run_with(
    tests: impl IntoIterator<Item = (&'static str, TestResultSummary)>,
) -> TestRunSummary {
    TestRunSummary {
        name: Some("run".to_owned()),
        tests: tests
            .into_iter()
            .map(|(key, result)| (key.to_owned(), result))
            .collect(),
        ..Default::default()
    }
}

/// Builds a named run whose tests have no subtests.
pub(crate) fn simple_run(name: &str, tests: &[(&str, TestStatus)]) -> TestRunSummary {
    TestRunSummary {
        name: Some(name.to_owned()),
        tests: tests
            .iter()
            .map(|(key, status)| ((*key).to_owned(), TestResultSummary::new(*status)))
            .collect(),
        ..Default::default()
    }
}

/// Ingests a named run whose tests have no subtests, with the default config.
pub(crate) fn ingested(name: &str, tests: &[(&str, TestStatus)]) -> IngestedRun {
    IngestedRun::new(simple_run(name, tests), 0, &SummaryConfig::default())
        .expect("test runs are valid")
}

/// Ingests a run built from already-parsed paths.
pub(crate) fn ingested_from_map(
    name: &str,
    tests: &std::collections::BTreeMap<GroupPath, TestStatus>,
) -> IngestedRun {
    let summary = TestRunSummary {
        name: Some(name.to_owned()),
        tests: tests
            .iter()
            .map(|(path, status)| (path.display('/').to_string(), TestResultSummary::new(*status)))
            .collect(),
        ..Default::default()
    };
    IngestedRun::new(summary, 0, &SummaryConfig::default()).expect("test runs are valid")
}

/// Strategies for property-based tests.
pub(crate) mod strategies {
    use crate::path::GroupPath;
    use proptest::{collection, prelude::*, sample};
    use std::collections::BTreeMap;
    use summary_metadata::TestStatus;

    pub(crate) fn status() -> impl Strategy<Value = TestStatus> {
        sample::select(TestStatus::ALL.to_vec())
    }

    // A small alphabet so that generated paths share groups often.
    pub(crate) fn group_path() -> impl Strategy<Value = GroupPath> {
        collection::vec(sample::select(vec!["a", "b", "c"]), 1..4)
            .prop_map(|segments| GroupPath::from_segments(segments).expect("segments are valid"))
    }

    pub(crate) fn tests() -> impl Strategy<Value = BTreeMap<GroupPath, TestStatus>> {
        collection::btree_map(group_path(), status(), 0..24)
    }

    pub(crate) fn run_sequence() -> impl Strategy<Value = Vec<BTreeMap<GroupPath, TestStatus>>> {
        collection::vec(tests(), 1..5)
    }
}
