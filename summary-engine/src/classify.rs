// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cross-run classification of tests.
//!
//! Each test gets a status sequence with one entry per run, in run order (tests missing from a
//! run are [`TestStatus::NotRun`] there). Classification looks at the sequence as a whole
//! (problems, skips, incomplete tests) and at each pair of adjacent runs (fixes, regressions,
//! tests that were enabled or disabled).

use crate::{ingest::IngestedRun, path::GroupPath};
use serde::Serialize;
use std::{collections::BTreeSet, fmt};
use summary_metadata::TestStatus;

/// The name of a set of tests computed by [`Classification`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationKind {
    /// Every leaf test seen in any run.
    All,

    /// Tests whose most severe status in any run is worse than a pass.
    Problems,

    /// Tests that were skipped in at least one run.
    Skipped,

    /// Tests that were incomplete in at least one run.
    Incomplete,

    /// Tests that were enabled, disabled, fixed or regressed between any two adjacent runs.
    Changes,

    /// Tests whose status got more severe between two adjacent runs.
    Regressions,

    /// Tests whose status got less severe between two adjacent runs.
    Fixes,

    /// Tests that went from not run or skipped to run between two adjacent runs.
    Enabled,

    /// Tests that went from run to not run or skipped between two adjacent runs.
    Disabled,
}

impl ClassificationKind {
    /// All classification kinds.
    pub const ALL: [ClassificationKind; 9] = [
        ClassificationKind::All,
        ClassificationKind::Problems,
        ClassificationKind::Skipped,
        ClassificationKind::Incomplete,
        ClassificationKind::Changes,
        ClassificationKind::Regressions,
        ClassificationKind::Fixes,
        ClassificationKind::Enabled,
        ClassificationKind::Disabled,
    ];

    /// Returns the name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ClassificationKind::All => "all",
            ClassificationKind::Problems => "problems",
            ClassificationKind::Skipped => "skipped",
            ClassificationKind::Incomplete => "incomplete",
            ClassificationKind::Changes => "changes",
            ClassificationKind::Regressions => "regressions",
            ClassificationKind::Fixes => "fixes",
            ClassificationKind::Enabled => "enabled",
            ClassificationKind::Disabled => "disabled",
        }
    }
}

impl fmt::Display for ClassificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a test's status changed between two adjacent runs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Transition {
    /// The test was not run or skipped, and then was run.
    Enabled,

    /// The test was run, and then was not run or skipped.
    Disabled,

    /// The status got more severe.
    Regression,

    /// The status got less severe.
    Fix,
}

impl Transition {
    /// Classifies the change from `prev` to `cur`, or returns `None` if the status didn't change.
    ///
    /// Rules are checked in order, so a change from skip to fail is [`Enabled`](Self::Enabled)
    /// rather than a regression. A change between not run and skipped falls through to the
    /// severity comparison.
    pub fn classify(prev: TestStatus, cur: TestStatus) -> Option<Self> {
        match (prev.is_not_evaluated(), cur.is_not_evaluated()) {
            (true, false) => Some(Transition::Enabled),
            (false, true) => Some(Transition::Disabled),
            _ if prev < cur => Some(Transition::Regression),
            _ if prev > cur => Some(Transition::Fix),
            _ => None,
        }
    }

    /// Returns the classification set this transition adds a test to, in addition to
    /// [`ClassificationKind::Changes`].
    pub fn kind(self) -> ClassificationKind {
        match self {
            Transition::Enabled => ClassificationKind::Enabled,
            Transition::Disabled => ClassificationKind::Disabled,
            Transition::Regression => ClassificationKind::Regressions,
            Transition::Fix => ClassificationKind::Fixes,
        }
    }
}

/// Sets of tests classified by how their status varies across a sequence of runs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Classification {
    all: BTreeSet<GroupPath>,
    problems: BTreeSet<GroupPath>,
    skipped: BTreeSet<GroupPath>,
    incomplete: BTreeSet<GroupPath>,
    changes: BTreeSet<GroupPath>,
    regressions: BTreeSet<GroupPath>,
    fixes: BTreeSet<GroupPath>,
    enabled: BTreeSet<GroupPath>,
    disabled: BTreeSet<GroupPath>,
}

impl Classification {
    /// Classifies every leaf test across `runs`, which must be in run order.
    pub fn new(runs: &[IngestedRun]) -> Self {
        let mut this = Self {
            all: runs
                .iter()
                .flat_map(|run| run.tests().keys().cloned())
                .collect(),
            ..Self::default()
        };

        // Iterate over a separate copy so that `this` can be updated.
        let all = this.all.clone();
        for test in all {
            let sequence = status_sequence(runs, &test);

            if sequence.iter().any(|status| status.is_problem()) {
                this.problems.insert(test.clone());
            }
            if sequence.contains(&TestStatus::Skip) {
                this.skipped.insert(test.clone());
            }
            if sequence.contains(&TestStatus::Incomplete) {
                this.incomplete.insert(test.clone());
            }

            for pair in sequence.windows(2) {
                if let Some(transition) = Transition::classify(pair[0], pair[1]) {
                    this.changes.insert(test.clone());
                    this.get_mut(transition.kind()).insert(test.clone());
                }
            }
        }

        this
    }

    /// Returns the set of tests of the given kind.
    pub fn get(&self, kind: ClassificationKind) -> &BTreeSet<GroupPath> {
        match kind {
            ClassificationKind::All => &self.all,
            ClassificationKind::Problems => &self.problems,
            ClassificationKind::Skipped => &self.skipped,
            ClassificationKind::Incomplete => &self.incomplete,
            ClassificationKind::Changes => &self.changes,
            ClassificationKind::Regressions => &self.regressions,
            ClassificationKind::Fixes => &self.fixes,
            ClassificationKind::Enabled => &self.enabled,
            ClassificationKind::Disabled => &self.disabled,
        }
    }

    fn get_mut(&mut self, kind: ClassificationKind) -> &mut BTreeSet<GroupPath> {
        match kind {
            ClassificationKind::All => &mut self.all,
            ClassificationKind::Problems => &mut self.problems,
            ClassificationKind::Skipped => &mut self.skipped,
            ClassificationKind::Incomplete => &mut self.incomplete,
            ClassificationKind::Changes => &mut self.changes,
            ClassificationKind::Regressions => &mut self.regressions,
            ClassificationKind::Fixes => &mut self.fixes,
            ClassificationKind::Enabled => &mut self.enabled,
            ClassificationKind::Disabled => &mut self.disabled,
        }
    }

    /// Iterates over every classification set, in [`ClassificationKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ClassificationKind, &BTreeSet<GroupPath>)> + '_ {
        ClassificationKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }
}

/// Returns the status of `test` in each run, in run order, with [`TestStatus::NotRun`] for runs
/// that don't contain it.
pub fn status_sequence(runs: &[IngestedRun], test: &GroupPath) -> Vec<TestStatus> {
    runs.iter()
        .map(|run| run.test_status(test).unwrap_or(TestStatus::NotRun))
        .collect()
}

/// A comparison between the statuses of a test in two adjacent runs, used for per-pair counts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DiffKind {
    /// The status differs.
    Changes,

    /// The status got less severe.
    Fixes,

    /// The status got more severe.
    Regressions,
}

impl DiffKind {
    /// Returns true if the change from `prev` to `cur` matches this kind.
    pub fn matches(self, prev: TestStatus, cur: TestStatus) -> bool {
        match self {
            DiffKind::Changes => prev != cur,
            DiffKind::Fixes => prev > cur,
            DiffKind::Regressions => prev < cur,
        }
    }
}

/// For every pair of adjacent runs, returns the set of tests for which `comparator` returns true.
///
/// The result has one entry per pair: the first entry compares runs 0 and 1, the second runs 1
/// and 2, and so on. A test is only compared for a pair if both runs contain it.
pub fn find_diffs<'a, F>(
    runs: &[IngestedRun],
    tests: impl IntoIterator<Item = &'a GroupPath> + Clone,
    comparator: F,
) -> Vec<BTreeSet<GroupPath>>
where
    F: Fn(TestStatus, TestStatus) -> bool,
{
    runs.windows(2)
        .map(|pair| {
            let (prev, cur) = (&pair[0], &pair[1]);
            tests
                .clone()
                .into_iter()
                .filter(|test| match (prev.test_status(test), cur.test_status(test)) {
                    (Some(p), Some(c)) => comparator(p, c),
                    _ => false,
                })
                .cloned()
                .collect()
        })
        .collect()
}
