// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::StatusParseError;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, ops, str::FromStr};

/// The status of a single test in a single run.
///
/// Statuses are totally ordered by severity, from [`NotRun`](Self::NotRun) (least severe) to
/// [`Incomplete`](Self::Incomplete) (most severe). The ordering is defined by
/// [`severity`](Self::severity) and not by declaration order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestStatus {
    /// The test was not run at all.
    #[serde(rename = "notrun")]
    NotRun,

    /// The test was run, but reported that it was skipped.
    Skip,

    /// The test passed.
    Pass,

    /// The test passed with warnings.
    Warn,

    /// The test passed, but the kernel log had warnings.
    DmesgWarn,

    /// The test failed.
    Fail,

    /// The test failed and the kernel log had warnings.
    DmesgFail,

    /// The test timed out.
    Timeout,

    /// The test crashed.
    Crash,

    /// The test never finished. This is the most severe status.
    Incomplete,
}

impl TestStatus {
    /// All statuses, in increasing order of severity.
    pub const ALL: [TestStatus; 10] = [
        TestStatus::NotRun,
        TestStatus::Skip,
        TestStatus::Pass,
        TestStatus::Warn,
        TestStatus::DmesgWarn,
        TestStatus::Fail,
        TestStatus::DmesgFail,
        TestStatus::Timeout,
        TestStatus::Crash,
        TestStatus::Incomplete,
    ];

    /// Returns the rank of this status on the severity scale.
    ///
    /// `Pass` is strictly below every failure status, and `Incomplete` is the maximum.
    pub fn severity(self) -> u8 {
        match self {
            TestStatus::NotRun => 0,
            TestStatus::Skip => 1,
            TestStatus::Pass => 2,
            TestStatus::Warn => 3,
            TestStatus::DmesgWarn => 4,
            TestStatus::Fail => 5,
            TestStatus::DmesgFail => 6,
            TestStatus::Timeout => 7,
            TestStatus::Crash => 8,
            TestStatus::Incomplete => 9,
        }
    }

    /// Returns the pass/total contribution of a single test with this status.
    pub fn fraction(self) -> Fraction {
        match self {
            TestStatus::NotRun | TestStatus::Skip => Fraction::new(0, 0),
            TestStatus::Pass => Fraction::new(1, 1),
            TestStatus::Warn
            | TestStatus::DmesgWarn
            | TestStatus::Fail
            | TestStatus::DmesgFail
            | TestStatus::Timeout
            | TestStatus::Crash
            | TestStatus::Incomplete => Fraction::new(0, 1),
        }
    }

    /// Returns true if this status means the test was not evaluated: either not run or skipped.
    pub fn is_not_evaluated(self) -> bool {
        matches!(self, TestStatus::NotRun | TestStatus::Skip)
    }

    /// Returns true if this status is more severe than [`Pass`](Self::Pass).
    pub fn is_problem(self) -> bool {
        self > TestStatus::Pass
    }

    /// Returns the string used for this status in result files.
    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::NotRun => "notrun",
            TestStatus::Skip => "skip",
            TestStatus::Pass => "pass",
            TestStatus::Warn => "warn",
            TestStatus::DmesgWarn => "dmesg-warn",
            TestStatus::Fail => "fail",
            TestStatus::DmesgFail => "dmesg-fail",
            TestStatus::Timeout => "timeout",
            TestStatus::Crash => "crash",
            TestStatus::Incomplete => "incomplete",
        }
    }

    /// Returns the string forms of all statuses.
    pub fn variants() -> [&'static str; 10] {
        Self::ALL.map(Self::as_str)
    }
}

impl PartialOrd for TestStatus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TestStatus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestStatus {
    type Err = StatusParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == input)
            .ok_or_else(|| StatusParseError::new(input))
    }
}

/// A count of passed tests out of a total.
///
/// Fractions add up component-wise when rolled up into a group.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Fraction {
    /// The number of tests that passed.
    pub passed: u64,

    /// The number of tests that count towards the total.
    pub total: u64,
}

impl Fraction {
    /// Creates a new fraction.
    pub const fn new(passed: u64, total: u64) -> Self {
        Self { passed, total }
    }
}

impl ops::Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Self) -> Self::Output {
        Fraction::new(self.passed + rhs.passed, self.total + rhs.total)
    }
}

impl ops::AddAssign for Fraction {
    fn add_assign(&mut self, rhs: Self) {
        self.passed += rhs.passed;
        self.total += rhs.total;
    }
}

impl std::iter::Sum for Fraction {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Fraction::default(), |acc, f| acc + f)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.passed, self.total)
    }
}
