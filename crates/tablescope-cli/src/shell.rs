//! Interactive session over a [`SessionStore`].
//!
//! Each line is one command. The current table lives in the store under
//! the shell's session id and is replaced by `generate` and `load`.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use tablescope_ingest::SampleMode;
use tablescope_plot::PlotKind;
use tablescope_report::{ReportWriter, SessionId, SessionStore};
use tracing::debug;

use crate::commands::{run_correlate, run_describe, run_plot, run_predict, run_preview};
use crate::settings::Settings;
use crate::source::{SourceRequest, load_table};
use crate::summary::{
    correlation_summary, distribution_summary, plot_summary, predict_summary, preview_summary,
    table_overview,
};

const HELP: &str = "\
commands:
  generate [rows=N] [cols=N] [pattern=linear|sine|gaussian] [seed=N] [noise=true]
  load PATH
  info
  preview [N] [head|tail|random]
  correlate [--save]
  describe [--save]
  plot hist|box|scatter
  predict TARGET VALUE... [--save]
  help
  quit
";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Generate(SourceRequest),
    Load(PathBuf),
    Info,
    Preview { n: Option<i64>, mode: SampleMode },
    Correlate { save: bool },
    Describe { save: bool },
    Plot(PlotKind),
    Predict { target: usize, features: String, save: bool },
    Help,
    Quit,
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("invalid value '{value}' for {key}"))
}

fn parse_generate<'a>(args: impl Iterator<Item = &'a str>) -> Result<SourceRequest> {
    let mut request = SourceRequest::default();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got '{arg}'"))?;
        match key {
            "rows" => request.rows = Some(parse_value(key, value)?),
            "cols" => request.cols = Some(parse_value(key, value)?),
            "pattern" => request.pattern = Some(value.to_string()),
            "seed" => request.seed = Some(parse_value(key, value)?),
            "noise" => request.noise = parse_value(key, value)?,
            _ => bail!("unknown generate option '{key}'"),
        }
    }
    Ok(request)
}

/// Parses one line; `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let mut args: Vec<&str> = words.collect();
    let save = args.iter().any(|arg| *arg == "--save");
    args.retain(|arg| *arg != "--save");

    let command = match name {
        "generate" | "gen" => ShellCommand::Generate(parse_generate(args.into_iter())?),
        "load" => match args.as_slice() {
            [path] => ShellCommand::Load(PathBuf::from(path)),
            _ => bail!("usage: load PATH"),
        },
        "info" => ShellCommand::Info,
        "preview" => {
            let mut n = None;
            let mut mode = SampleMode::Head;
            for arg in args {
                match arg.parse::<i64>() {
                    Ok(value) => n = Some(value),
                    Err(_) => mode = arg.parse()?,
                }
            }
            ShellCommand::Preview { n, mode }
        }
        "correlate" => ShellCommand::Correlate { save },
        "describe" => ShellCommand::Describe { save },
        "plot" => match args.as_slice() {
            [kind] => ShellCommand::Plot(kind.parse()?),
            _ => bail!("usage: plot hist|box|scatter"),
        },
        "predict" => {
            let Some((target, features)) = args.split_first() else {
                bail!("usage: predict TARGET VALUE... [--save]");
            };
            ShellCommand::Predict {
                target: parse_value("target", target)?,
                features: features.join(" "),
                save,
            }
        }
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Some(command))
}

/// Shell state: settings, the report writer and the session's table.
pub struct Shell {
    settings: Settings,
    writer: ReportWriter,
    store: SessionStore,
    session: SessionId,
}

impl Shell {
    pub fn new(settings: Settings, writer: ReportWriter) -> Self {
        Self {
            settings,
            writer,
            store: SessionStore::new(),
            session: SessionId::new(),
        }
    }

    /// Runs one command and returns the text to print.
    pub fn execute(&self, command: &ShellCommand) -> Result<String> {
        let defaults = &self.settings.generator;
        match command {
            ShellCommand::Generate(request) => {
                let df = load_table(request, defaults)?;
                let df = self.store.replace(self.session, df);
                Ok(table_overview(&df))
            }
            ShellCommand::Load(path) => {
                let request = SourceRequest {
                    input: Some(path.clone()),
                    ..SourceRequest::default()
                };
                let df = self.store.replace(self.session, load_table(&request, defaults)?);
                Ok(table_overview(&df))
            }
            ShellCommand::Info => {
                let df = self.store.require(self.session)?;
                Ok(table_overview(&df))
            }
            ShellCommand::Preview { n, mode } => {
                let df = self.store.require(self.session)?;
                let n = n.unwrap_or(self.settings.display.preview_rows);
                Ok(preview_summary(&run_preview(&df, n, *mode, defaults.seed)?))
            }
            ShellCommand::Correlate { save } => {
                let df = self.store.require(self.session)?;
                let writer = save.then_some(&self.writer);
                Ok(correlation_summary(&run_correlate(&df, writer)?))
            }
            ShellCommand::Describe { save } => {
                let df = self.store.require(self.session)?;
                let writer = save.then_some(&self.writer);
                Ok(distribution_summary(&run_describe(&df, writer)?))
            }
            ShellCommand::Plot(kind) => {
                let df = self.store.require(self.session)?;
                Ok(plot_summary(&run_plot(&df, *kind, &self.writer)?))
            }
            ShellCommand::Predict {
                target,
                features,
                save,
            } => {
                let df = self.store.require(self.session)?;
                let writer = save.then_some(&self.writer);
                Ok(predict_summary(&run_predict(&df, *target, features, writer)?))
            }
            ShellCommand::Help => Ok(HELP.to_string()),
            ShellCommand::Quit => Ok(String::new()),
        }
    }

    /// Reads commands until `quit` or end of input. Command failures are
    /// printed and the session continues.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W, prompt: bool) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(output, "tablescope> ")?;
                output.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("read command")?;
            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(error) => {
                    writeln!(output, "error: {error:#}")?;
                    continue;
                }
            };
            if command == ShellCommand::Quit {
                break;
            }
            debug!(?command, "shell command");
            match self.execute(&command) {
                Ok(text) => write!(output, "{text}")?,
                Err(error) => writeln!(output, "error: {error:#}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("  ").unwrap(), None);
        assert_eq!(parse_line("# note").unwrap(), None);
        assert_eq!(
            parse_line("preview 5 tail").unwrap(),
            Some(ShellCommand::Preview {
                n: Some(5),
                mode: SampleMode::Tail
            })
        );
        assert_eq!(
            parse_line("predict 3 5 -6.5 --save").unwrap(),
            Some(ShellCommand::Predict {
                target: 3,
                features: "5 -6.5".to_string(),
                save: true
            })
        );
        assert_eq!(
            parse_line("plot box").unwrap(),
            Some(ShellCommand::Plot(PlotKind::Box))
        );
        assert_eq!(
            parse_line("correlate --save").unwrap(),
            Some(ShellCommand::Correlate { save: true })
        );
    }

    #[test]
    fn parses_generate_options() {
        let Some(ShellCommand::Generate(request)) =
            parse_line("generate rows=-5 cols=4 pattern=sin seed=2 noise=true").unwrap()
        else {
            panic!("expected generate");
        };
        assert_eq!(request.rows, Some(-5));
        assert_eq!(request.cols, Some(4));
        assert_eq!(request.pattern.as_deref(), Some("sin"));
        assert_eq!(request.seed, Some(2));
        assert!(request.noise);
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(parse_line("frobnicate").is_err());
        assert!(parse_line("generate rows").is_err());
        assert!(parse_line("plot pie").is_err());
        assert!(parse_line("preview 3 sideways").is_err());
        assert!(parse_line("predict").is_err());
    }
}
