// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds a flat stream of render events out of a sorted set of test paths.
//!
//! Renderers walk the stream and never look at the path hierarchy themselves: every group is
//! opened before the first test inside it and closed after the last one, and the stream always
//! ends with every group closed.

use crate::{aggregate::RunAggregate, ingest::IngestedRun, path::GroupPath};
use smol_str::SmolStr;
use summary_metadata::{Fraction, TestStatus};

/// The per-run contents of a group row.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GroupCell {
    /// The number of passed tests out of the total in this group.
    pub fraction: Fraction,

    /// The most severe status in this group.
    pub status: TestStatus,
}

/// The per-run contents of a test row.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TestCell {
    /// The run has a result for this test.
    Status(TestStatus),

    /// The run doesn't contain this test.
    NotRun,
}

impl TestCell {
    /// Returns the status in this cell, treating a missing test as [`TestStatus::NotRun`].
    pub fn status(self) -> TestStatus {
        match self {
            TestCell::Status(status) => status,
            TestCell::NotRun => TestStatus::NotRun,
        }
    }
}

/// An event in a render stream.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RenderEvent {
    /// The root group row. Always the first event.
    Root {
        /// One cell per run.
        cells: Vec<GroupCell>,
    },

    /// A group row, opening the group.
    OpenGroup {
        /// The depth of the group, starting at 1 for top-level groups.
        depth: usize,

        /// The last segment of the group's path.
        name: SmolStr,

        /// The full path of the group.
        path: GroupPath,

        /// One cell per run.
        cells: Vec<GroupCell>,
    },

    /// Closes the most recently opened group.
    CloseGroup {
        /// The depth of the group being closed.
        depth: usize,

        /// The last segment of the group's path.
        name: SmolStr,
    },

    /// A test row.
    Test {
        /// The depth of the test: one more than the depth of the group it's in.
        depth: usize,

        /// The last segment of the test's path.
        name: SmolStr,

        /// The full path of the test.
        path: GroupPath,

        /// The path that details for this test are filed under. This is the parent path for
        /// subtests, and the test's own path otherwise.
        link: GroupPath,

        /// One cell per run.
        cells: Vec<TestCell>,
    },
}

impl RenderEvent {
    /// Returns the depth of this event. The root is at depth 0.
    pub fn depth(&self) -> usize {
        match self {
            RenderEvent::Root { .. } => 0,
            RenderEvent::OpenGroup { depth, .. }
            | RenderEvent::CloseGroup { depth, .. }
            | RenderEvent::Test { depth, .. } => *depth,
        }
    }
}

/// Builds the render stream for `tests`, which must be sorted by path.
///
/// `runs` and `aggregates` must be parallel slices, in run order.
pub fn render_tree<'a>(
    tests: impl IntoIterator<Item = &'a GroupPath>,
    runs: &[IngestedRun],
    aggregates: &[RunAggregate],
) -> Vec<RenderEvent> {
    let mut builder = RenderTreeBuilder {
        runs,
        aggregates,
        open: Vec::new(),
        events: Vec::new(),
    };
    builder.events.push(RenderEvent::Root {
        cells: builder.group_cells(&GroupPath::root()),
    });

    for test in tests {
        builder.add_test(test);
    }
    builder.close_to(0);

    builder.events
}

struct RenderTreeBuilder<'r> {
    runs: &'r [IngestedRun],
    aggregates: &'r [RunAggregate],
    // The paths of the currently open groups, outermost first. The group at index i has depth
    // i + 1 and a path with i + 1 segments.
    open: Vec<GroupPath>,
    events: Vec<RenderEvent>,
}

impl RenderTreeBuilder<'_> {
    fn add_test(&mut self, test: &GroupPath) {
        let Some((parent, name)) = test.split_leaf() else {
            // The root is never a test.
            return;
        };

        let open_len = self.open.len();
        let is_open_stack = self.open.last().map_or(parent.is_root(), |last| *last == parent);
        if !is_open_stack {
            let common = self
                .open
                .last()
                .map_or(0, |last| last.common_prefix_len(&parent));
            self.close_to(common.min(open_len));
            for len in common + 1..=parent.len() {
                self.open_group(parent.prefix(len));
            }
        }

        let link = if self.runs.iter().any(|run| run.has_subtests(&parent)) {
            parent.clone()
        } else {
            test.clone()
        };
        let cells = self
            .aggregates
            .iter()
            .map(|aggregate| match aggregate.get(test) {
                Some((_, status)) => TestCell::Status(status),
                None => TestCell::NotRun,
            })
            .collect();

        self.events.push(RenderEvent::Test {
            depth: parent.len() + 1,
            name: name.into(),
            path: test.clone(),
            link,
            cells,
        });
    }

    fn open_group(&mut self, path: GroupPath) {
        let name = path.leaf_name().unwrap_or_default().into();
        let cells = self.group_cells(&path);
        self.open.push(path.clone());
        self.events.push(RenderEvent::OpenGroup {
            depth: self.open.len(),
            name,
            path,
            cells,
        });
    }

    // Closes groups, deepest first, until `len` groups are left open.
    fn close_to(&mut self, len: usize) {
        while self.open.len() > len {
            let depth = self.open.len();
            if let Some(path) = self.open.pop() {
                self.events.push(RenderEvent::CloseGroup {
                    depth,
                    name: path.leaf_name().unwrap_or_default().into(),
                });
            }
        }
    }

    fn group_cells(&self, path: &GroupPath) -> Vec<GroupCell> {
        self.aggregates
            .iter()
            .map(|aggregate| GroupCell {
                fraction: aggregate.fraction(path),
                status: aggregate.status(path),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SummaryConfig,
        test_helpers::{ingested, ingested_from_map, path, run_with, strategies},
    };
    use pretty_assertions::assert_eq;
    use std::collections::{BTreeMap, BTreeSet};
    use summary_metadata::TestResultSummary;
    use test_strategy::proptest;

    // A compact form of the event stream that's easy to compare against.
    fn outline(events: &[RenderEvent]) -> Vec<String> {
        events
            .iter()
            .map(|event| match event {
                RenderEvent::Root { .. } => "root".to_owned(),
                RenderEvent::OpenGroup { depth, name, .. } => format!("{depth} open {name}"),
                RenderEvent::CloseGroup { depth, name } => format!("{depth} close {name}"),
                RenderEvent::Test { depth, name, .. } => format!("{depth} test {name}"),
            })
            .collect()
    }

    fn render(runs: &[IngestedRun]) -> Vec<RenderEvent> {
        let aggregates: Vec<_> = runs.iter().map(RunAggregate::new).collect();
        let tests: BTreeSet<_> = runs
            .iter()
            .flat_map(|run| run.tests().keys().cloned())
            .collect();
        render_tree(&tests, runs, &aggregates)
    }

    #[test]
    fn opens_and_closes_groups() {
        let runs = [ingested(
            "run",
            &[
                ("a/b/c", TestStatus::Pass),
                ("a/b/d", TestStatus::Pass),
                ("a/e", TestStatus::Fail),
                ("f/g", TestStatus::Skip),
                ("h", TestStatus::Pass),
            ],
        )];

        assert_eq!(
            outline(&render(&runs)),
            vec![
                "root",
                "1 open a",
                "2 open b",
                "3 test c",
                "3 test d",
                "2 close b",
                "2 test e",
                "1 close a",
                "1 open f",
                "2 test g",
                "1 close f",
                "1 test h",
            ]
        );
    }

    #[test]
    fn sibling_groups_share_prefix() {
        let runs = [ingested(
            "run",
            &[("a/b/c", TestStatus::Pass), ("a/d/e", TestStatus::Pass)],
        )];

        assert_eq!(
            outline(&render(&runs)),
            vec![
                "root",
                "1 open a",
                "2 open b",
                "3 test c",
                "2 close b",
                "2 open d",
                "3 test e",
                "2 close d",
                "1 close a",
            ]
        );
    }

    #[test]
    fn test_that_is_also_a_group() {
        let runs = [ingested(
            "run",
            &[("a", TestStatus::Pass), ("a/b", TestStatus::Fail)],
        )];

        assert_eq!(
            outline(&render(&runs)),
            vec!["root", "1 test a", "1 open a", "2 test b", "1 close a"]
        );
    }

    #[test]
    fn cells_across_runs() {
        let runs = [
            ingested("one", &[("g/x", TestStatus::Pass), ("g/y", TestStatus::Fail)]),
            ingested("two", &[("g/x", TestStatus::Pass)]),
        ];
        let events = render(&runs);

        assert_eq!(
            events[0],
            RenderEvent::Root {
                cells: vec![
                    GroupCell {
                        fraction: Fraction::new(1, 2),
                        status: TestStatus::Fail,
                    },
                    GroupCell {
                        fraction: Fraction::new(1, 1),
                        status: TestStatus::Pass,
                    },
                ],
            }
        );

        let RenderEvent::Test { path: test, cells, .. } = &events[3] else {
            panic!("expected a test event, found {:?}", events[3]);
        };
        assert_eq!(*test, path("g/y"));
        assert_eq!(cells, &vec![TestCell::Status(TestStatus::Fail), TestCell::NotRun]);
        assert_eq!(cells[1].status(), TestStatus::NotRun);
    }

    #[test]
    fn subtests_link_to_parent() {
        let summary = run_with([
            (
                "g/t",
                TestResultSummary::new(TestStatus::Pass).with_subtest("s1", TestStatus::Pass),
            ),
            ("g/u", TestResultSummary::new(TestStatus::Pass)),
        ]);
        let runs = [IngestedRun::new(summary, 0, &SummaryConfig::default()).unwrap()];
        let events = render(&runs);

        let links: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Test { path, link, .. } => Some((path.clone(), link.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(
            links,
            vec![
                (path("g/t/s1"), path("g/t")),
                (path("g/u"), path("g/u")),
            ]
        );
    }

    #[test]
    fn empty_page_has_only_root() {
        let runs = [ingested("run", &[("a", TestStatus::Pass)])];
        let aggregates: Vec<_> = runs.iter().map(RunAggregate::new).collect();
        let events = render_tree(&BTreeSet::<GroupPath>::new(), &runs, &aggregates);
        assert_eq!(outline(&events), vec!["root"]);
    }

    #[proptest]
    fn stream_is_balanced(
        #[strategy(strategies::run_sequence())] runs: Vec<BTreeMap<GroupPath, TestStatus>>,
    ) {
        let runs: Vec<_> = runs
            .iter()
            .enumerate()
            .map(|(i, tests)| ingested_from_map(&format!("run-{i}"), tests))
            .collect();
        let tests: BTreeSet<_> = runs
            .iter()
            .flat_map(|run| run.tests().keys().cloned())
            .collect();
        let events = render(&runs);

        assert!(matches!(events.first(), Some(RenderEvent::Root { .. })));

        let mut stack: Vec<GroupPath> = Vec::new();
        let mut seen_tests = Vec::new();
        for event in &events[1..] {
            match event {
                RenderEvent::Root { .. } => panic!("root appears twice"),
                RenderEvent::OpenGroup { depth, path, .. } => {
                    assert_eq!(*depth, stack.len() + 1);
                    assert_eq!(path.len(), *depth);
                    if let Some(outer) = stack.last() {
                        assert_eq!(path.parent().as_ref(), Some(outer));
                    }
                    stack.push(path.clone());
                }
                RenderEvent::CloseGroup { depth, name } => {
                    let closed = stack.pop().expect("close without a matching open");
                    assert_eq!(*depth, closed.len());
                    assert_eq!(Some(name.as_str()), closed.leaf_name());
                }
                RenderEvent::Test { depth, path, .. } => {
                    assert_eq!(*depth, stack.len() + 1);
                    assert_eq!(
                        path.parent().unwrap_or_default(),
                        stack.last().cloned().unwrap_or_default()
                    );
                    seen_tests.push(path.clone());
                }
            }
        }

        assert!(stack.is_empty(), "groups left open: {stack:?}");
        assert_eq!(seen_tests, tests.into_iter().collect::<Vec<_>>());
    }
}
