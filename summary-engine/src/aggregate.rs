// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-run rollups of test results into groups.
//!
//! Every test contributes its status and pass/total fraction to itself, to each group containing
//! it, and to the root group.

use crate::{ingest::IngestedRun, path::GroupPath};
use std::collections::BTreeMap;
use summary_metadata::{Fraction, TestStatus};

/// Aggregated fractions and statuses for every test and group in a single run.
///
/// Lookups for paths that aren't part of the run return a fraction of `0/0` and a status of
/// [`TestStatus::NotRun`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunAggregate {
    fractions: BTreeMap<GroupPath, Fraction>,
    statuses: BTreeMap<GroupPath, TestStatus>,
}

impl RunAggregate {
    /// Aggregates the leaf tests of an ingested run.
    pub fn new(run: &IngestedRun) -> Self {
        Self::from_tests(run.tests().iter().map(|(path, status)| (path, *status)))
    }

    /// Aggregates an arbitrary set of leaf tests.
    pub fn from_tests<'a>(tests: impl IntoIterator<Item = (&'a GroupPath, TestStatus)>) -> Self {
        let mut aggregate = Self::default();
        for (path, status) in tests {
            aggregate.add_test(path, status);
        }
        aggregate
    }

    fn add_test(&mut self, path: &GroupPath, status: TestStatus) {
        let fraction = status.fraction();
        for ancestor in path.ancestors() {
            *self.fractions.entry(ancestor.clone()).or_default() += fraction;

            let current = self.statuses.entry(ancestor).or_insert(TestStatus::NotRun);
            // A skip must be recorded over a not-run even before anything more severe is seen.
            if status > *current || (status == TestStatus::Skip && *current == TestStatus::NotRun)
            {
                *current = status;
            }
        }
    }

    /// Returns the aggregated fraction for a path, or `0/0` if the run has nothing at that path.
    pub fn fraction(&self, path: &GroupPath) -> Fraction {
        self.fractions.get(path).copied().unwrap_or_default()
    }

    /// Returns the aggregated status for a path, or [`TestStatus::NotRun`] if the run has nothing
    /// at that path.
    pub fn status(&self, path: &GroupPath) -> TestStatus {
        self.statuses
            .get(path)
            .copied()
            .unwrap_or(TestStatus::NotRun)
    }

    /// Returns the aggregated fraction and status for a path, or `None` if the run has nothing at
    /// that path.
    pub fn get(&self, path: &GroupPath) -> Option<(Fraction, TestStatus)> {
        let status = self.statuses.get(path)?;
        Some((self.fraction(path), *status))
    }

    /// Returns true if the run has a test or group at this path.
    pub fn contains(&self, path: &GroupPath) -> bool {
        self.statuses.contains_key(path)
    }

    /// Returns the fraction for the root group, covering every test in the run.
    pub fn root_fraction(&self) -> Fraction {
        self.fraction(&GroupPath::root())
    }

    /// Returns the status for the root group.
    pub fn root_status(&self) -> TestStatus {
        self.status(&GroupPath::root())
    }

    /// Returns all aggregated fractions, keyed by path.
    pub fn fractions(&self) -> &BTreeMap<GroupPath, Fraction> {
        &self.fractions
    }

    /// Returns all aggregated statuses, keyed by path.
    pub fn statuses(&self) -> &BTreeMap<GroupPath, TestStatus> {
        &self.statuses
    }
}
