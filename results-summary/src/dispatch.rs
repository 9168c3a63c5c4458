// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, Result,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use summary_engine::{
    classify::ClassificationKind,
    config::SummaryConfig,
    output::{SummaryReport, TextMode, TextPrinter, TreePrinter},
    summary::Summary,
};
use summary_metadata::{SummaryExitCode, TestRunSummary};
use tracing::debug;

/// Summarize and compare conformance test results across runs.
///
/// Result files are compared in the order they're given, so pass the oldest run first.
#[derive(Debug, Parser)]
#[command(
    version,
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct ResultsSummaryApp {
    #[clap(flatten)]
    output: OutputOpts,

    #[clap(flatten)]
    config_opts: ConfigOpts,

    #[clap(subcommand)]
    command: Command,
}

impl ResultsSummaryApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app.
    ///
    /// Returns the exit code.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let config = self.config_opts.make_config()?;

        match self.command {
            Command::Console { mode, files } => {
                let summary = files.load(&config)?;
                let mut printer = TextPrinter::new(&summary);
                if output.colorize_stdout() {
                    printer.colorize();
                }
                printer.write(mode.into(), &mut output_writer.stdout_writer())?;
            }
            Command::Tree { page, files } => {
                let summary = files.load(&config)?;
                let mut printer = TreePrinter::new(&summary);
                if output.colorize_stdout() {
                    printer.colorize();
                }
                printer.write(page.into(), &mut output_writer.stdout_writer())?;
            }
            Command::Json { files } => {
                let summary = files.load(&config)?;
                SummaryReport::new(&summary).write_json(output_writer.stdout_writer())?;
            }
        }

        Ok(SummaryExitCode::OK)
    }
}

#[derive(Debug, Args)]
struct ConfigOpts {
    /// Config file [default: built-in defaults]
    #[arg(long, global = true, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,
}

impl ConfigOpts {
    fn make_config(&self) -> Result<SummaryConfig> {
        SummaryConfig::from_sources(self.config_file.as_deref()).map_err(ExpectedError::from)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a text summary
    ///
    /// By default this prints a table with the number of tests with each status in each run, and
    /// the number of changes, fixes and regressions between adjacent runs.
    Console {
        /// What to print
        #[arg(long, short, value_enum, default_value_t)]
        mode: TextModeOpt,

        #[clap(flatten)]
        files: ResultFiles,
    },

    /// Print the results as an indented tree of groups
    Tree {
        /// Which set of tests to print
        #[arg(long, short, value_enum, default_value_t)]
        page: PageOpt,

        #[clap(flatten)]
        files: ResultFiles,
    },

    /// Print a machine-readable JSON report
    Json {
        #[clap(flatten)]
        files: ResultFiles,
    },
}

#[derive(Debug, Args)]
struct ResultFiles {
    /// Result files, oldest first
    #[arg(required = true, value_name = "FILES")]
    files: Vec<Utf8PathBuf>,
}

impl ResultFiles {
    fn load(&self, config: &SummaryConfig) -> Result<Summary> {
        let runs = self
            .files
            .iter()
            .map(TestRunSummary::from_path)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("loaded {} result files", runs.len());

        Ok(Summary::new(runs, config)?)
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum TextModeOpt {
    /// Only the count table
    #[default]
    Summary,
    /// Tests that changed, then the count table
    Diff,
    /// Tests that were incomplete in any run
    Incomplete,
    /// Every test, then the count table
    All,
}

impl From<TextModeOpt> for TextMode {
    fn from(opt: TextModeOpt) -> Self {
        match opt {
            TextModeOpt::Summary => TextMode::Summary,
            TextModeOpt::Diff => TextMode::Diff,
            TextModeOpt::Incomplete => TextMode::Incomplete,
            TextModeOpt::All => TextMode::All,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum PageOpt {
    /// Every test
    #[default]
    All,
    /// Tests whose status changed between any two adjacent runs
    Changes,
    /// Tests that were worse than a pass in any run
    Problems,
    /// Tests that were skipped in any run
    Skipped,
    /// Tests that got better between any two adjacent runs
    Fixes,
    /// Tests that got worse between any two adjacent runs
    Regressions,
    /// Tests that started running
    Enabled,
    /// Tests that stopped running
    Disabled,
    /// Tests that were incomplete in any run
    Incomplete,
}

impl From<PageOpt> for ClassificationKind {
    fn from(opt: PageOpt) -> Self {
        match opt {
            PageOpt::All => ClassificationKind::All,
            PageOpt::Changes => ClassificationKind::Changes,
            PageOpt::Problems => ClassificationKind::Problems,
            PageOpt::Skipped => ClassificationKind::Skipped,
            PageOpt::Fixes => ClassificationKind::Fixes,
            PageOpt::Regressions => ClassificationKind::Regressions,
            PageOpt::Enabled => ClassificationKind::Enabled,
            PageOpt::Disabled => ClassificationKind::Disabled,
            PageOpt::Incomplete => ClassificationKind::Incomplete,
        }
    }
}
