// sps - edit a delimited text table with a script of selections and commands

mod exit_codes;
mod settings;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use serde::Serialize;

use sps_core::Delimiters;
use sps_engine::{Editor, ScriptError};
use sps_io::{delimited, serialize::serialize, IoError};

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, KIND_ARGUMENT, KIND_IO};
use settings::Settings;

/// Environment variable holding the log filter (`error`, `warn`, `info`, `debug`, ...).
const LOG_ENV: &str = "SPS_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser, Debug)]
#[command(name = "sps")]
#[command(about = "Edit a delimited text table with a script of selections and commands")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Selections:
  [R,C] [R1,C1,R2,C2]   cell or range (1-based, `_` = last row/column)
  [max] [min]           numeric extreme inside the current selection
  [find TEXT]           first cell whose text is exactly TEXT
  [set] [_]             save / restore the current selection

Commands:
  irow arow drow icol acol dcol clear
  set TEXT
  swap|sum|avg|count|len [R,C]
  def|use|inc N         temporary variables 0-9

Examples:
  sps '[1,1] set 9' table.txt
  sps -d , '[1,1,3,1] sum [4,1]' data.csv
  sps -d , -o - '[2,_] drow' data.csv")]
struct Cli {
    /// Delimiter characters; the first one is used when writing
    #[arg(short = 'd', long = "delimiters", env = "SPS_DELIMITERS", value_name = "DELIMS")]
    delimiters: Option<String>,

    /// Write the result here instead of FILE (`-` for stdout)
    #[arg(short = 'o', long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Report failures as a JSON object on stderr
    #[arg(long)]
    json: bool,

    /// `;`-separated selections and commands
    #[arg(value_name = "COMMANDS")]
    commands: String,

    /// Table file to edit
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn main() -> ExitCode {
    // Known before clap runs so usage errors can be reported as JSON too.
    let json = std::env::args_os().any(|a| a == "--json");

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                let _ = e.print();
                return ExitCode::from(EXIT_SUCCESS);
            }
            if json {
                let rendered = e.to_string();
                let first = rendered.lines().next().unwrap_or_default();
                report(CliError::args(first.trim_start_matches("error: ")), true);
            } else {
                let _ = e.print();
            }
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (settings, settings_warning) = Settings::load();
    init_logging(settings.log.as_deref().unwrap_or(DEFAULT_LOG_FILTER));
    if let Some(warning) = settings_warning {
        log::warn!("{}", warning);
    }

    let json = cli.json;
    match run(cli, &settings) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            let code = err.code;
            report(err, json);
            ExitCode::from(code)
        }
    }
}

fn init_logging(default_filter: &str) {
    let env = env_logger::Env::new().filter_or(LOG_ENV, default_filter);
    // try_init only fails when a logger is already installed.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn run(cli: Cli, settings: &Settings) -> Result<(), CliError> {
    let delimiters = resolve_delimiters(cli.delimiters.as_deref(), settings)?;
    log::debug!("delimiters: {:?}", delimiters.to_string());

    let table = delimited::import(&cli.file, &delimiters)?;
    let mut editor = Editor::new(table, delimiters.clone());
    editor.run(&cli.commands)?;
    let table = editor.into_table();

    match cli.output.as_deref() {
        Some(path) if path == Path::new("-") => {
            let text = serialize(&table, &delimiters);
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(text.as_bytes())
                .and_then(|_| handle.flush())
                .map_err(|e| CliError::io(format!("stdout: {}", e)))?;
        }
        Some(path) => delimited::export(&table, path, &delimiters)?,
        None => delimited::export(&table, &cli.file, &delimiters)?,
    }
    Ok(())
}

/// Pick the delimiter set: `-d` / `SPS_DELIMITERS`, then the settings file, then a space.
fn resolve_delimiters(arg: Option<&str>, settings: &Settings) -> Result<Delimiters, CliError> {
    if let Some(arg) = arg {
        return Delimiters::new(arg).ok_or_else(|| {
            CliError::args("delimiter set must not be empty")
                .with_hint("pass at least one character, e.g. -d ,")
        });
    }
    match settings.delimiters.as_deref() {
        Some(configured) => match Delimiters::new(configured) {
            Some(delimiters) => Ok(delimiters),
            None => {
                log::warn!("settings: empty delimiters ignored");
                Ok(Delimiters::default())
            }
        },
        None => Ok(Delimiters::default()),
    }
}

fn report(err: CliError, json: bool) {
    if json {
        let body = JsonError {
            error: err.kind,
            message: &err.message,
            segment: err.segment,
            exit_code: err.code,
        };
        match serde_json::to_string(&body) {
            Ok(line) => {
                eprintln!("{}", line);
                return;
            }
            Err(e) => log::warn!("could not encode error as JSON: {}", e),
        }
    }
    if !err.message.is_empty() {
        eprintln!("error: {}", err.message);
    }
    if let Some(hint) = err.hint {
        eprintln!("hint:  {}", hint);
    }
}

#[derive(Serialize)]
struct JsonError<'a> {
    error: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    segment: Option<usize>,
    exit_code: u8,
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    /// Machine-readable kind for `--json`.
    pub kind: &'static str,
    pub message: String,
    pub hint: Option<String>,
    /// 1-based index of the failing script segment.
    pub segment: Option<usize>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, kind: KIND_ARGUMENT, message: msg.into(), hint: None, segment: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, kind: KIND_IO, message: msg.into(), hint: None, segment: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<IoError> for CliError {
    fn from(err: IoError) -> Self {
        CliError::io(err.to_string())
    }
}

impl From<ScriptError> for CliError {
    fn from(err: ScriptError) -> Self {
        use sps_engine::EditError;

        let hint = match &err.error {
            EditError::SelectionSyntax(_) => {
                Some("selections are [R,C], [R1,C1,R2,C2], [max], [min], [find TEXT], [set] or [_]")
            }
            EditError::CommandSyntax(_) => Some("run `sps --help` for the list of commands"),
            EditError::Reference { .. } => Some("swap targets must already exist in the table"),
            EditError::Conversion(_) => None,
        };
        Self {
            code: EXIT_ERROR,
            kind: err.error.kind(),
            message: err.to_string(),
            hint: hint.map(String::from),
            segment: Some(err.index + 1),
        }
    }
}
