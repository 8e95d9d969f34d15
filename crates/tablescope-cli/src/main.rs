//! tablescope CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tablescope_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use tablescope_cli::commands::{run_correlate, run_describe, run_generate, run_plot, run_predict, run_preview};
use tablescope_cli::logging::{LogConfig, LogFormat, init_logging};
use tablescope_cli::settings::load_settings;
use tablescope_cli::shell::Shell;
use tablescope_cli::source::load_table;
use tablescope_cli::summary::{
    correlation_summary, distribution_summary, plot_summary, predict_summary, preview_summary,
    table_overview,
};
use tablescope_report::ReportWriter;
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| settings.export.output_dir.clone());
    let writer = ReportWriter::new(output_dir);
    let defaults = &settings.generator;

    match cli.command {
        Command::Generate { source, output } => {
            let df = load_table(&source.to_request(), defaults)?;
            print!("{}", table_overview(&df));
            println!();
            if let Some(path) = run_generate(&df, output.as_deref())? {
                println!("Saved: {}", path.display());
            }
        }
        Command::Preview { source, n, mode } => {
            let request = source.to_request();
            let df = load_table(&request, defaults)?;
            let n = n.unwrap_or(settings.display.preview_rows);
            let outcome = run_preview(&df, n, mode.into(), request.seed(defaults))?;
            println!("{}", preview_summary(&outcome));
        }
        Command::Correlate { source, save } => {
            let df = load_table(&source.to_request(), defaults)?;
            let outcome = run_correlate(&df, save.then_some(&writer))?;
            print!("{}", correlation_summary(&outcome));
        }
        Command::Describe { source, save } => {
            let df = load_table(&source.to_request(), defaults)?;
            let outcome = run_describe(&df, save.then_some(&writer))?;
            print!("{}", distribution_summary(&outcome));
        }
        Command::Plot { source, kind } => {
            let df = load_table(&source.to_request(), defaults)?;
            let outcome = run_plot(&df, kind.into(), &writer)?;
            print!("{}", plot_summary(&outcome));
        }
        Command::Predict {
            source,
            target,
            features,
            save,
        } => {
            let df = load_table(&source.to_request(), defaults)?;
            let outcome = run_predict(&df, target, &features, save.then_some(&writer))?;
            print!("{}", predict_summary(&outcome));
        }
        Command::Shell => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            Shell::new(settings.clone(), writer).run(stdin.lock(), io::stdout(), prompt)?;
        }
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
