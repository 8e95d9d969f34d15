//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tablescope_ingest::SampleMode;
use tablescope_plot::PlotKind;

use crate::source::SourceRequest;

#[derive(Parser)]
#[command(
    name = "tablescope",
    version,
    about = "Explore tabular data: previews, correlations, distributions, plots and predictions",
    long_about = "Load a CSV, TSV or JSON table, or generate a synthetic one, and run\n\
                  analyses over it. HTML reports are written below the output directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machines).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: settings.toml in the user config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory for saved reports (overrides the settings file).
    #[arg(long = "output-dir", value_name = "DIR", global = true)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a synthetic table and print its overview.
    Generate {
        #[command(flatten)]
        source: SourceArgs,
        /// Also write the table as CSV.
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show a few rows of the table.
    Preview {
        #[command(flatten)]
        source: SourceArgs,
        /// Number of rows (default from settings).
        #[arg(long, short = 'n', allow_negative_numbers = true)]
        n: Option<i64>,
        /// Which rows to show.
        #[arg(long, value_enum, default_value = "head")]
        mode: SampleModeArg,
    },

    /// Pearson correlation matrix and conclusions.
    Correlate {
        #[command(flatten)]
        source: SourceArgs,
        /// Save the HTML report.
        #[arg(long)]
        save: bool,
    },

    /// Distribution statistics per numeric column.
    Describe {
        #[command(flatten)]
        source: SourceArgs,
        /// Save the HTML report.
        #[arg(long)]
        save: bool,
    },

    /// Render plots and write them as HTML pages.
    Plot {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long, value_enum, default_value = "hist")]
        kind: PlotKindArg,
    },

    /// Fit a linear model and predict the target column.
    Predict {
        #[command(flatten)]
        source: SourceArgs,
        /// Target column number, starting at 1.
        #[arg(long)]
        target: usize,
        /// Whitespace-separated feature values, one per remaining column.
        #[arg(long, allow_hyphen_values = true)]
        features: String,
        /// Save the table and the prediction text.
        #[arg(long)]
        save: bool,
    },

    /// Interactive session keeping the current table between commands.
    Shell,
}

/// Where the table comes from: a file, or the generator.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Load a .csv, .tsv or .json file instead of generating data.
    #[arg(long, short = 'i', value_name = "PATH", conflicts_with_all = ["rows", "cols", "pattern", "noise"])]
    pub input: Option<PathBuf>,

    /// Generated row count, clamped to 1..=1000.
    #[arg(long, allow_negative_numbers = true)]
    pub rows: Option<i64>,

    /// Generated column count, clamped to 1..=10.
    #[arg(long, allow_negative_numbers = true)]
    pub cols: Option<i64>,

    /// Generator pattern: linear, sine or gaussian.
    #[arg(long)]
    pub pattern: Option<String>,

    /// Seed for reproducible generation and random previews.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Add Gaussian noise to generated values.
    #[arg(long)]
    pub noise: bool,
}

impl SourceArgs {
    pub fn to_request(&self) -> SourceRequest {
        SourceRequest {
            input: self.input.clone(),
            rows: self.rows,
            cols: self.cols,
            pattern: self.pattern.clone(),
            seed: self.seed,
            noise: self.noise,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SampleModeArg {
    Head,
    Tail,
    Random,
}

impl From<SampleModeArg> for SampleMode {
    fn from(arg: SampleModeArg) -> Self {
        match arg {
            SampleModeArg::Head => Self::Head,
            SampleModeArg::Tail => Self::Tail,
            SampleModeArg::Random => Self::Random,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PlotKindArg {
    Hist,
    Box,
    Scatter,
}

impl From<PlotKindArg> for PlotKind {
    fn from(arg: PlotKindArg) -> Self {
        match arg {
            PlotKindArg::Hist => Self::Hist,
            PlotKindArg::Box => Self::Box,
            PlotKindArg::Scatter => Self::Scatter,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
