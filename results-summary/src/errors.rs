// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use owo_colors::OwoColorize;
use std::error::Error;
use summary_engine::errors::{ConfigParseError, IngestError, WriteSummaryError};
use summary_metadata::{LoadRunError, SummaryExitCode};
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// The #[error()] strings are placeholders: errors are meant to be printed with
// `display_to_stderr`, which also prints the chain of causes.

/// An error that is expected to happen in normal use, with a documented exit code.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("failed to load result file")]
    LoadRunError {
        #[from]
        err: LoadRunError,
    },
    #[error("malformed results")]
    IngestError {
        #[from]
        err: IngestError,
    },
    #[error("error writing summary")]
    WriteSummaryError {
        #[from]
        err: WriteSummaryError,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::ConfigParseError { .. } => SummaryExitCode::SETUP_ERROR,
            Self::LoadRunError { .. } => SummaryExitCode::LOAD_FAILED,
            Self::IngestError { .. } => SummaryExitCode::MALFORMED_RESULTS,
            Self::WriteSummaryError { .. } => SummaryExitCode::WRITE_OUTPUT_ERROR,
        }
    }

    /// Displays this error to stderr, along with its causes.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::ConfigParseError { err } => {
                match err.config_file() {
                    Some(config_file) => error!(
                        "failed to parse config file `{}`",
                        config_file.style(styles.bold)
                    ),
                    None => error!("failed to parse default config"),
                }
                Some(err.kind() as &dyn Error)
            }
            Self::LoadRunError { err } => {
                error!(
                    "failed to load result file `{}`",
                    err.path().style(styles.bold)
                );
                err.source()
            }
            Self::IngestError { err } => {
                error!("{err}");
                err.source()
            }
            Self::WriteSummaryError { err } => {
                error!("{err}");
                err.source()
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
