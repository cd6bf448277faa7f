use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{ENV_CONFIG, ENV_FORMAT, ENV_MODE, STDIO_PATH};
use crate::domain::metrics::EncodingMode;
use crate::utils::decode::InputFormat;

#[derive(Parser)]
#[command(name = "flatmetrics")]
#[command(
    version,
    about = "Flatten OTLP metrics into path/value/timestamp JSON records",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Record layout (flat or host-qualified)
    #[arg(long, short = 'm', global = true, env = ENV_MODE, value_parser = parse_encoding_mode)]
    pub mode: Option<EncodingMode>,

    /// Input file with an OTLP metrics export request ("-" reads stdin)
    #[arg(long, short = 'i', global = true, default_value = STDIO_PATH)]
    pub input: PathBuf,

    /// Output file for encoded records ("-" writes stdout)
    #[arg(long, short = 'o', global = true, default_value = STDIO_PATH)]
    pub output: PathBuf,

    /// Input format (auto, json, jsonl or protobuf)
    #[arg(long, short = 'f', global = true, env = ENV_FORMAT, value_parser = parse_input_format)]
    pub format: Option<InputFormatArg>,
}

/// Input format as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormatArg {
    /// Derive from the input file extension
    Auto,
    Explicit(InputFormat),
}

/// Parse encoding mode from CLI/env string
fn parse_encoding_mode(s: &str) -> Result<EncodingMode, String> {
    match s.to_lowercase().as_str() {
        "flat" => Ok(EncodingMode::Flat),
        "host-qualified" | "host" => Ok(EncodingMode::HostQualified),
        _ => Err(format!(
            "Invalid encoding mode '{}'. Valid options: flat, host-qualified",
            s
        )),
    }
}

/// Parse input format from CLI/env string
fn parse_input_format(s: &str) -> Result<InputFormatArg, String> {
    match s.to_lowercase().as_str() {
        "auto" => Ok(InputFormatArg::Auto),
        "json" => Ok(InputFormatArg::Explicit(InputFormat::Json)),
        "jsonl" | "ndjson" => Ok(InputFormatArg::Explicit(InputFormat::Jsonl)),
        "protobuf" | "proto" | "pb" => Ok(InputFormatArg::Explicit(InputFormat::Protobuf)),
        _ => Err(format!(
            "Invalid input format '{}'. Valid options: auto, json, jsonl, protobuf",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Encode a metrics batch (default command)
    Encode,
    /// Print the effective configuration as JSON
    Config,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub mode: Option<EncodingMode>,
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: InputFormatArg,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config: None,
            mode: None,
            input: PathBuf::from(STDIO_PATH),
            output: PathBuf::from(STDIO_PATH),
            format: InputFormatArg::Auto,
        }
    }
}

impl CliConfig {
    /// Resolve the input format, looking at the input extension when not explicit.
    /// Stdin defaults to JSON.
    pub fn input_format(&self) -> InputFormat {
        match self.format {
            InputFormatArg::Explicit(format) => format,
            InputFormatArg::Auto if is_stdio(&self.input) => InputFormat::Json,
            InputFormatArg::Auto => InputFormat::from_path(&self.input),
        }
    }
}

/// Whether a path designates stdin/stdout
pub fn is_stdio(path: &std::path::Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            config: cli.config,
            mode: cli.mode,
            input: cli.input,
            output: cli.output,
            format: cli.format.unwrap_or(InputFormatArg::Auto),
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let mut cli = Cli::parse();
    let command = cli.command.take();
    (cli.into(), command)
}
