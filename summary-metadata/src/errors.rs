// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::TestStatus;
use camino::Utf8PathBuf;
use std::{error, fmt};

/// An error that occurs while parsing a [`TestStatus`] from a string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusParseError {
    input: String,
}

impl StatusParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the input that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for StatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "unrecognized test status: {}\n(known values: {})",
            self.input,
            TestStatus::variants().join(", "),
        )
    }
}

impl error::Error for StatusParseError {}

/// An error that occurs while loading a result file.
#[derive(Debug)]
pub enum LoadRunError {
    /// Reading the file failed.
    Read {
        /// The file that was being read.
        path: Utf8PathBuf,

        /// The underlying error.
        err: std::io::Error,
    },

    /// The file was not valid JSON, or did not match the result file schema.
    ///
    /// Unknown status values are reported through this variant.
    Json {
        /// The file that was being parsed.
        path: Utf8PathBuf,

        /// The underlying error.
        err: serde_json::Error,
    },
}

impl LoadRunError {
    /// Returns the path of the file that failed to load.
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::Read { path, .. } | Self::Json { path, .. } => path,
        }
    }
}

impl fmt::Display for LoadRunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Read { path, .. } => {
                write!(f, "failed to read result file `{path}`")
            }
            Self::Json { path, .. } => {
                write!(f, "failed to parse result file `{path}`")
            }
        }
    }
}

impl error::Error for LoadRunError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Read { err, .. } => Some(err),
            Self::Json { err, .. } => Some(err),
        }
    }
}
