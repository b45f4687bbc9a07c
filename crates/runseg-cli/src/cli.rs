use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use runseg_text::{IcuCharacterProperties, SegmenterOptions, TextOrientation};
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};
use crate::report::Report;

/// Environment variable holding the log filter used with `--verbose`.
pub const LOG_ENV: &str = "RUNSEG_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "runseg",
    about = "Split text into script, vertical-orientation, and font-fallback runs",
    version
)]
pub struct Cli {
    /// Text to segment. Read from --file or stdin when omitted.
    pub text: Option<String>,

    /// Read the text from a file.
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Writing mode: horizontal, vertical-upright, or vertical-mixed.
    #[arg(long, short, default_value_t = TextOrientation::Horizontal)]
    pub orientation: TextOrientation,

    /// Report math symbols as their own fallback priority.
    #[arg(long)]
    pub split_math: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Log segmentation diagnostics to stderr (filter via RUNSEG_LOG).
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    #[must_use]
    pub fn options(&self) -> SegmenterOptions {
        SegmenterOptions::for_orientation(self.orientation).with_split_math(self.split_math)
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        init_logging();
    }
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let text = read_input(&cli)?;
    let options = cli.options();
    tracing::debug!(bytes = text.len(), %options, "segmenting input");

    let props = IcuCharacterProperties::new();
    let report = Report::build(&text, &props, options);
    match cli.format {
        OutputFormat::Table => report.write_table(out)?,
        OutputFormat::Json => report.write_json(out)?,
    }
    out.flush()?;
    Ok(())
}

/// The text to segment. A single trailing newline from a file or stdin is
/// dropped.
fn read_input(cli: &Cli) -> Result<String> {
    let raw = match (&cli.text, &cli.file) {
        (Some(_), Some(_)) => {
            return Err(CliError::invalid("pass either TEXT or --file, not both"));
        }
        (Some(text), None) => return Ok(text.clone()),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|source| {
            CliError::ReadInput {
                path: path.clone(),
                source,
            }
        })?,
        (None, None) => std::io::read_to_string(std::io::stdin())?,
    };
    let trimmed = raw
        .strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(&raw);
    Ok(trimmed.to_string())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("debug"));
    // A subscriber may already be installed by an embedding process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use clap::Parser;

    use super::{Cli, OutputFormat, run};
    use crate::error::CliError;
    use runseg_text::TextOrientation;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("runseg").chain(args.iter().copied())).unwrap()
    }

    fn run_to_string(cli: Cli) -> Result<String, CliError> {
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn defaults() {
        let cli = cli(&["abc"]);
        assert_eq!(cli.text.as_deref(), Some("abc"));
        assert_eq!(cli.orientation, TextOrientation::Horizontal);
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(!cli.split_math);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_orientation_and_flags() {
        let cli = cli(&["-o", "mixed", "--split-math", "--format", "json", "x"]);
        assert_eq!(cli.orientation, TextOrientation::VerticalMixed);
        assert!(cli.options().split_math);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn rejects_unknown_orientation() {
        let err = Cli::try_parse_from(["runseg", "--orientation", "diagonal", "x"]).unwrap_err();
        assert!(err.to_string().contains("diagonal"));
    }

    #[test]
    fn text_and_file_conflict() {
        let error = run_to_string(cli(&["abc", "--file", "input.txt"])).unwrap_err();
        assert!(matches!(error, CliError::InvalidArgument { .. }));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let error = run_to_string(cli(&["--file", path.to_str().unwrap()])).unwrap_err();
        assert!(matches!(error, CliError::ReadInput { .. }));
        assert!(error.to_string().contains("absent.txt"));
    }

    #[test]
    fn reads_file_and_drops_trailing_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ab").unwrap();
        let output =
            run_to_string(cli(&["--format", "json", "--file", file.path().to_str().unwrap()]))
                .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["length"], 2);
        assert_eq!(value["ranges"][0]["text"], "ab");
    }

    #[test]
    fn table_output_for_vertical_mixed() {
        let output = run_to_string(cli(&["-o", "vertical-mixed", "\u{3042}\u{3044}abc"])).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Hiragana") && lines[1].contains("keep"));
        assert!(lines[2].contains("Latin") && lines[2].contains("rotate-sideways"));
    }
}
