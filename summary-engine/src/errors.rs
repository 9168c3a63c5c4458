// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by the summary engine.

use camino::{Utf8Path, Utf8PathBuf};
use config::ConfigError;
use std::fmt;
use thiserror::Error;

/// An error that occurred while parsing a [`GroupPath`](crate::path::GroupPath).
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum PathParseError {
    /// The path had no segments.
    #[error("path has no segments")]
    Empty,

    /// One of the segments was empty, e.g. because of a doubled separator.
    #[error("segment {index} of the path is empty")]
    EmptySegment {
        /// The zero-based index of the empty segment.
        index: usize,
    },
}

/// An error that occurred while ingesting a run into the engine.
///
/// Ingestion stops at the first malformed entry: ancestor rollups would be inconsistent if an
/// entry were dropped.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum IngestError {
    /// A test name could not be parsed into a path.
    #[error("in run `{run_name}`, test name `{key}` is malformed")]
    InvalidTestPath {
        /// The name of the run containing the test.
        run_name: String,

        /// The raw test name.
        key: String,

        /// The underlying error.
        #[source]
        err: PathParseError,
    },

    /// A subtest name could not be parsed into path segments.
    #[error("in run `{run_name}`, test `{key}` has a malformed subtest name `{subtest}`")]
    InvalidSubtestName {
        /// The name of the run containing the test.
        run_name: String,

        /// The raw name of the test containing the subtest.
        key: String,

        /// The raw subtest name.
        subtest: String,

        /// The underlying error.
        #[source]
        err: PathParseError,
    },
}

impl IngestError {
    /// Returns the name of the run that failed to ingest.
    pub fn run_name(&self) -> &str {
        match self {
            Self::InvalidTestPath { run_name, .. } | Self::InvalidSubtestName { run_name, .. } => {
                run_name
            }
        }
    }
}

/// An error that occurred while parsing the summary config.
#[derive(Debug, Error)]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Option<Utf8PathBuf>,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: Option<&Utf8Path>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.map(ToOwned::to_owned),
            kind,
        }
    }

    /// Returns the config file that failed to parse, or `None` for the default config.
    pub fn config_file(&self) -> Option<&Utf8Path> {
        self.config_file.as_deref()
    }

    /// Returns the kind of error this is.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

impl fmt::Display for ConfigParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.config_file {
            Some(config_file) => write!(f, "failed to parse summary config at `{config_file}`"),
            None => write!(f, "failed to parse default summary config"),
        }
    }
}

/// The kind of error that occurred while parsing the summary config.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the layered config.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),

    /// The path separator was not exactly one character.
    #[error("paths.separator must be a single character, found `{value}`")]
    InvalidSeparator {
        /// The value that was provided.
        value: String,
    },

    /// The root group name was empty.
    #[error("paths.root-name must not be empty")]
    EmptyRootName,

    /// The root group name contained the path separator, so it could collide with a real group.
    #[error("paths.root-name `{root_name}` must not contain the separator `{separator}`")]
    RootNameContainsSeparator {
        /// The configured root name.
        root_name: String,

        /// The configured separator.
        separator: char,
    },

    /// The minimum column width was greater than the maximum.
    #[error("text.min-name-width ({min}) must not be greater than text.max-name-width ({max})")]
    InvalidNameWidths {
        /// The configured minimum.
        min: usize,

        /// The configured maximum.
        max: usize,
    },
}

/// An error that occurred while writing a summary.
#[derive(Debug, Error)]
pub enum WriteSummaryError {
    /// An I/O error occurred while writing.
    #[error("error writing summary")]
    Io(#[from] std::io::Error),

    /// An error occurred while serializing the JSON report.
    #[error("error serializing summary to JSON")]
    Json(#[from] serde_json::Error),
}
