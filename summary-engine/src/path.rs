// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hierarchical test paths.
//!
//! Test names in result files are paths like `spec/gl-3.1/draw-buffers-errors`: every prefix of
//! a path names a group, and the empty path is the root group that contains every test.

use crate::errors::PathParseError;
use smol_str::SmolStr;
use std::fmt;

/// A hierarchical path to a test or group.
///
/// A path is a sequence of non-empty segments. Paths compare and sort segment by segment, so all
/// the paths within a group sort next to each other.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GroupPath {
    segments: Vec<SmolStr>,
}

impl GroupPath {
    /// Returns the root path, which has no segments.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a raw test name into a path, splitting on `separator`.
    ///
    /// Returns an error if the name is empty or contains an empty segment.
    pub fn parse(input: &str, separator: char) -> Result<Self, PathParseError> {
        if input.is_empty() {
            return Err(PathParseError::Empty);
        }

        let segments = input
            .split(separator)
            .enumerate()
            .map(|(index, segment)| {
                if segment.is_empty() {
                    Err(PathParseError::EmptySegment { index })
                } else {
                    Ok(SmolStr::new(segment))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Builds a path out of segments.
    ///
    /// Returns an error if any segment is empty.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let segments = segments
            .into_iter()
            .enumerate()
            .map(|(index, segment)| {
                let segment = segment.into();
                if segment.is_empty() {
                    Err(PathParseError::EmptySegment { index })
                } else {
                    Ok(segment)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    /// Returns true if this is the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments. Equivalent to [`is_root`](Self::is_root).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segments of this path.
    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// Returns the last segment, or `None` for the root.
    pub fn leaf_name(&self) -> Option<&str> {
        self.segments.last().map(SmolStr::as_str)
    }

    /// Returns a new path with all of `other`'s segments appended.
    pub fn join_path(&self, other: &GroupPath) -> Self {
        let mut segments = Vec::with_capacity(self.len() + other.len());
        segments.extend(self.segments.iter().cloned());
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Returns the first `len` segments of this path as a new path.
    ///
    /// # Panics
    ///
    /// Panics if `len` is greater than the length of this path.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len].to_vec(),
        }
    }

    /// Returns the parent group of this path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        (!self.is_root()).then(|| self.prefix(self.len() - 1))
    }

    /// Splits this path into its parent group and its last segment.
    ///
    /// Returns `None` for the root.
    pub fn split_leaf(&self) -> Option<(Self, &str)> {
        let (leaf, parent) = self.segments.split_last()?;
        Some((
            Self {
                segments: parent.to_vec(),
            },
            leaf.as_str(),
        ))
    }

    /// Returns the length of the longest common prefix of `self` and `other`.
    pub fn common_prefix_len(&self, other: &GroupPath) -> usize {
        self.segments
            .iter()
            .zip(&other.segments)
            .take_while(|(a, b)| a == b)
            .count()
    }

    /// Returns true if `prefix` is a prefix of this path. Every path starts with the root.
    pub fn starts_with(&self, prefix: &GroupPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Iterates over this path and every group containing it, ending with the root.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            path: self,
            next_len: Some(self.len()),
        }
    }

    /// Returns a value that displays this path with segments joined by `separator`.
    ///
    /// The root displays as the empty string.
    pub fn display(&self, separator: char) -> DisplayGroupPath<'_> {
        DisplayGroupPath {
            path: self,
            separator,
        }
    }
}

/// Iterator returned by [`GroupPath::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    path: &'a GroupPath,
    next_len: Option<usize>,
}

impl Iterator for Ancestors<'_> {
    type Item = GroupPath;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.next_len?;
        self.next_len = len.checked_sub(1);
        Some(self.path.prefix(len))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.next_len.map_or(0, |len| len + 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Ancestors<'_> {}

/// Displays a [`GroupPath`] with a given separator. Returned by [`GroupPath::display`].
#[derive(Clone, Copy, Debug)]
pub struct DisplayGroupPath<'a> {
    path: &'a GroupPath,
    separator: char,
}

impl fmt::Display for DisplayGroupPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.path.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.separator)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn path(s: &str) -> GroupPath {
        GroupPath::parse(s, '/').unwrap()
    }

    #[test_case("a", &["a"]; "single")]
    #[test_case("spec/gl-3.1/draw", &["spec", "gl-3.1", "draw"]; "nested")]
    fn parse_valid(input: &str, expected: &[&str]) {
        let parsed = path(input);
        let segments: Vec<_> = parsed.segments().iter().map(SmolStr::as_str).collect();
        assert_eq!(segments, expected);
        assert_eq!(parsed.display('/').to_string(), input);
    }

    #[test_case("", PathParseError::Empty; "empty")]
    #[test_case("/a", PathParseError::EmptySegment { index: 0 }; "leading separator")]
    #[test_case("a//b", PathParseError::EmptySegment { index: 1 }; "double separator")]
    #[test_case("a/", PathParseError::EmptySegment { index: 1 }; "trailing separator")]
    fn parse_invalid(input: &str, expected: PathParseError) {
        assert_eq!(GroupPath::parse(input, '/').unwrap_err(), expected);
    }

    #[test]
    fn custom_separator() {
        let parsed = GroupPath::parse("spec@arb_fp64@vs-ubo", '@').unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed.display('/').to_string(), "spec/arb_fp64/vs-ubo");
    }

    #[test]
    fn split_and_parent() {
        let p = path("a/b/c");
        let (parent, leaf) = p.split_leaf().unwrap();
        assert_eq!(parent, path("a/b"));
        assert_eq!(leaf, "c");
        assert_eq!(p.parent(), Some(path("a/b")));
        assert_eq!(path("a").parent(), Some(GroupPath::root()));
        assert_eq!(GroupPath::root().parent(), None);
        assert_eq!(GroupPath::root().split_leaf(), None);
    }

    #[test]
    fn ancestors_end_with_root() {
        let ancestors: Vec<_> = path("a/b/c").ancestors().collect();
        assert_eq!(
            ancestors,
            vec![path("a/b/c"), path("a/b"), path("a"), GroupPath::root()]
        );
        assert_eq!(path("a/b/c").ancestors().len(), 4);
        assert_eq!(
            GroupPath::root().ancestors().collect::<Vec<_>>(),
            vec![GroupPath::root()]
        );
    }

    #[test_case("a/b/c", "a/b/d", 2; "siblings")]
    #[test_case("a/b", "a/b/c", 2; "ancestor")]
    #[test_case("a/b", "c/d", 0; "disjoint")]
    #[test_case("a/b", "a/b", 2; "equal")]
    fn common_prefix(a: &str, b: &str, expected: usize) {
        assert_eq!(path(a).common_prefix_len(&path(b)), expected);
        assert_eq!(path(b).common_prefix_len(&path(a)), expected);
    }

    #[test]
    fn sorting_is_segment_wise() {
        // As strings, "a.b" sorts before "a/b" since '.' < '/'. Segment-wise, the group "a"
        // comes first, which keeps every group contiguous.
        let mut paths = vec![path("a.b"), path("a/b"), path("a/c"), path("a")];
        paths.sort();
        assert_eq!(paths, vec![path("a"), path("a/b"), path("a/c"), path("a.b")]);
    }

    #[test]
    fn join_and_starts_with() {
        let joined = path("a/b").join_path(&path("c"));
        assert_eq!(joined, path("a/b/c"));
        assert!(joined.starts_with(&path("a")));
        assert!(joined.starts_with(&GroupPath::root()));
        assert!(!joined.starts_with(&path("b")));
        assert_eq!(
            GroupPath::from_segments(["a", "b", "c"]).unwrap(),
            joined
        );
        assert_eq!(
            GroupPath::from_segments(["a", ""]).unwrap_err(),
            PathParseError::EmptySegment { index: 1 }
        );
    }
}
