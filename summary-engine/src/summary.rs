// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    aggregate::RunAggregate,
    classify::{self, Classification, ClassificationKind, DiffKind},
    config::SummaryConfig,
    errors::IngestError,
    ingest::IngestedRun,
    path::GroupPath,
    render::{self, RenderEvent},
};
use std::collections::BTreeSet;
use summary_metadata::{TestRunSummary, TestStatus};
use tracing::debug;

/// A summary of a sequence of test runs.
///
/// This is the main entry point into the engine. Construction ingests, aggregates and classifies
/// every run up front, and the result is immutable afterwards.
#[derive(Clone, Debug)]
pub struct Summary {
    config: SummaryConfig,
    runs: Vec<IngestedRun>,
    aggregates: Vec<RunAggregate>,
    classification: Classification,
}

impl Summary {
    /// Builds a summary out of runs, which must be in run order (typically oldest first).
    ///
    /// Returns an error for the first run that fails to ingest.
    pub fn new(
        runs: impl IntoIterator<Item = TestRunSummary>,
        config: &SummaryConfig,
    ) -> Result<Self, IngestError> {
        let runs = runs
            .into_iter()
            .enumerate()
            .map(|(index, run)| IngestedRun::new(run, index, config))
            .collect::<Result<Vec<_>, _>>()?;
        let aggregates = runs.iter().map(RunAggregate::new).collect();
        let classification = Classification::new(&runs);

        debug!(
            "summarized {} tests across {} runs ({} changes, {} problems)",
            classification.get(ClassificationKind::All).len(),
            runs.len(),
            classification.get(ClassificationKind::Changes).len(),
            classification.get(ClassificationKind::Problems).len(),
        );

        Ok(Self {
            config: config.clone(),
            runs,
            aggregates,
            classification,
        })
    }

    /// Returns the config this summary was built with.
    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Returns the ingested runs, in run order.
    pub fn runs(&self) -> &[IngestedRun] {
        &self.runs
    }

    /// Returns the per-run aggregates, parallel to [`runs`](Self::runs).
    pub fn aggregates(&self) -> &[RunAggregate] {
        &self.aggregates
    }

    /// Returns the cross-run classification.
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Returns the set of tests of the given kind.
    pub fn tests(&self, kind: ClassificationKind) -> &BTreeSet<GroupPath> {
        self.classification.get(kind)
    }

    /// Returns, for every pair of adjacent runs, the tests present in both for which `comparator`
    /// returns true.
    pub fn find_diffs<F>(&self, comparator: F) -> Vec<BTreeSet<GroupPath>>
    where
        F: Fn(TestStatus, TestStatus) -> bool,
    {
        classify::find_diffs(
            &self.runs,
            self.classification.get(ClassificationKind::All),
            comparator,
        )
    }

    /// Returns the number of tests matching `kind` for every pair of adjacent runs.
    pub fn diff_counts(&self, kind: DiffKind) -> Vec<usize> {
        self.find_diffs(|prev, cur| kind.matches(prev, cur))
            .iter()
            .map(BTreeSet::len)
            .collect()
    }

    /// Returns the render stream for the tests of the given kind.
    pub fn render(&self, kind: ClassificationKind) -> Vec<RenderEvent> {
        render::render_tree(
            self.classification.get(kind),
            &self.runs,
            &self.aggregates,
        )
    }

    /// Returns the status of a test in each run, in run order.
    pub fn status_sequence(&self, test: &GroupPath) -> Vec<TestStatus> {
        classify::status_sequence(&self.runs, test)
    }
}
