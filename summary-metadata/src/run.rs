// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{LoadRunError, TestStatus};
use camino::Utf8Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The contents of a single result file: one execution of a test suite.
///
/// Tests are keyed by their raw names, which are hierarchical paths joined by a separator (`/` by
/// default). Splitting them into groups is left to consumers, since the separator is
/// configurable.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TestRunSummary {
    /// The display name of this run.
    ///
    /// If absent from the file, [`from_path`](Self::from_path) fills it in with the file stem.
    #[serde(default)]
    pub name: Option<String>,

    /// The overall time taken by this run, in seconds.
    #[serde(default)]
    pub time_elapsed: Option<f64>,

    /// The options the run was invoked with. Passed through without interpretation.
    #[serde(default)]
    pub options: IndexMap<String, serde_json::Value>,

    /// Information about the environment the run happened in, e.g. `uname` output. Passed through
    /// without interpretation.
    #[serde(default)]
    pub environment: IndexMap<String, String>,

    /// The results of individual tests, in file order.
    #[serde(default)]
    pub tests: IndexMap<String, TestResultSummary>,
}

impl TestRunSummary {
    /// Parses a result file from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a result file from disk.
    ///
    /// If the file does not specify a name, the file stem is used instead.
    pub fn from_path(path: impl AsRef<Utf8Path>) -> Result<Self, LoadRunError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| LoadRunError::Read {
            path: path.to_owned(),
            err,
        })?;
        let mut summary = Self::parse_json(&contents).map_err(|err| LoadRunError::Json {
            path: path.to_owned(),
            err,
        })?;
        if summary.name.is_none() {
            summary.name = Some(path.file_stem().unwrap_or(path.as_str()).to_owned());
        }
        Ok(summary)
    }
}

/// The result of a single test within a run.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct TestResultSummary {
    /// The status of the test.
    pub result: TestStatus,

    /// The time taken by this test, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<OrderedSeconds>,

    /// Subtests of this test, keyed by subtest name.
    ///
    /// A test with subtests is treated as a group: each subtest becomes its own test.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub subtests: IndexMap<String, TestStatus>,
}

impl TestResultSummary {
    /// Creates a new result with the given status, no time and no subtests.
    pub fn new(result: TestStatus) -> Self {
        Self {
            result,
            time: None,
            subtests: IndexMap::new(),
        }
    }

    /// Adds a subtest to this result.
    pub fn with_subtest(mut self, name: impl Into<String>, status: TestStatus) -> Self {
        self.subtests.insert(name.into(), status);
        self
    }

    /// Returns true if this test has subtests.
    pub fn has_subtests(&self) -> bool {
        !self.subtests.is_empty()
    }
}

/// A duration in seconds, as stored in result files.
///
/// Wraps an `f64` so that results can be compared for equality. NaN values compare equal to
/// themselves.
#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct OrderedSeconds(pub f64);

impl PartialEq for OrderedSeconds {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for OrderedSeconds {}
