//! Core application

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::cli::{self, CliConfig, Commands, is_stdio};
use crate::core::config::EncoderConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::extension::MetricsEncodingExtension;
use crate::domain::metrics::MetricsMarshaler;
use crate::utils::decode::{InputFormat, decode_lines, decode_request};

pub struct CoreApp {
    pub config: EncoderConfig,
    pub extension: MetricsEncodingExtension,
    cli: CliConfig,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::init(cli_config)?;

        match command {
            Some(Commands::Config) => app.print_config(),
            Some(Commands::Encode) | None => app.encode(),
        }
    }

    /// Resolve configuration and build the extension
    pub fn init(cli: CliConfig) -> Result<Self> {
        let config = EncoderConfig::load(&cli)?;
        let extension = MetricsEncodingExtension::new(&config)?;
        Ok(Self {
            config,
            extension,
            cli,
        })
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        // stdout carries the encoded records, logs go to stderr
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(false)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    fn print_config(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.config)?;
        println!("{}", json);
        Ok(())
    }

    /// Read the input, encode it and write the records, between the
    /// extension's start and shutdown hooks. Shutdown runs even when
    /// encoding fails; the encoding error takes precedence.
    pub fn encode(&self) -> Result<()> {
        self.extension.start()?;
        let result = self.encode_io();
        let shutdown = self.extension.shutdown();
        result.and(shutdown)
    }

    fn encode_io(&self) -> Result<()> {
        let format = self.cli.input_format();
        tracing::debug!(
            input = %self.cli.input.display(),
            content_type = format.as_content_type(),
            "Reading metrics input"
        );

        let input = read_input(&self.cli.input)?;
        let output = self.encode_input(&input, format)?;
        write_output(&self.cli.output, &output)
    }

    /// Encode raw input bytes. Each decoded batch becomes one JSON array
    /// terminated by a newline.
    pub fn encode_input(&self, input: &[u8], format: InputFormat) -> Result<Vec<u8>> {
        let requests = match format {
            InputFormat::Jsonl => decode_lines(input)?,
            InputFormat::Json | InputFormat::Protobuf => vec![decode_request(input, format)?],
        };

        let mut output = Vec::new();
        for request in &requests {
            let bytes = self
                .extension
                .marshal_metrics(request)
                .context("Failed to encode metrics batch")?;
            output.extend_from_slice(&bytes);
            output.push(b'\n');
        }

        tracing::debug!(
            batches = requests.len(),
            bytes = output.len(),
            format = %format,
            "Encoded metrics input"
        );
        Ok(output)
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if is_stdio(path) {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("Failed to read metrics from stdin")?;
        return Ok(buf);
    }
    fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if is_stdio(path) {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(bytes)
            .and_then(|_| stdout.flush())
            .context("Failed to write records to stdout")?;
        return Ok(());
    }
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cli::InputFormatArg;
    use crate::domain::metrics::EncodingMode;
    use crate::utils::otlp::make_str_attr;
    use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
    use opentelemetry_proto::tonic::metrics::v1::{
        Gauge, Metric, NumberDataPoint, ResourceMetrics, ScopeMetrics, metric::Data,
        number_data_point,
    };
    use opentelemetry_proto::tonic::resource::v1::Resource;
    use prost::Message;
    use std::path::PathBuf;

    fn gauge_request(value: i64) -> ExportMetricsServiceRequest {
        ExportMetricsServiceRequest {
            resource_metrics: vec![ResourceMetrics {
                resource: Some(Resource {
                    attributes: vec![make_str_attr("host.name", "edge-1")],
                    ..Default::default()
                }),
                scope_metrics: vec![ScopeMetrics {
                    metrics: vec![Metric {
                        name: "queue.depth".to_string(),
                        data: Some(Data::Gauge(Gauge {
                            data_points: vec![NumberDataPoint {
                                attributes: vec![make_str_attr("queue", "ingest")],
                                start_time_unix_nano: 10,
                                time_unix_nano: 20,
                                value: Some(number_data_point::Value::AsInt(value)),
                                ..Default::default()
                            }],
                        })),
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        }
    }

    fn app_with(cli: CliConfig) -> CoreApp {
        CoreApp::init(cli).unwrap()
    }

    fn explicit_config_cli(dir: &tempfile::TempDir, mode: &str) -> CliConfig {
        let config_path = dir.path().join("flatmetrics.json");
        fs::write(&config_path, format!(r#"{{"mode": "{mode}"}}"#)).unwrap();
        CliConfig {
            config: Some(config_path),
            ..Default::default()
        }
    }

    #[test]
    fn test_encode_input_protobuf() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(explicit_config_cli(&dir, "flat"));

        let input = gauge_request(7).encode_to_vec();
        let output = app.encode_input(&input, InputFormat::Protobuf).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "[{\"path\":\"/queue.depth/ingest\",\"value\":7,\"ts\":\"20\"}]\n"
        );
    }

    #[test]
    fn test_encode_input_jsonl_one_array_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(explicit_config_cli(&dir, "host-qualified"));
        assert_eq!(app.config.mode, EncodingMode::HostQualified);

        let input = format!(
            "{}\n{}\n",
            serde_json::to_string(&gauge_request(1)).unwrap(),
            serde_json::to_string(&gauge_request(2)).unwrap()
        );
        let output = app.encode_input(input.as_bytes(), InputFormat::Jsonl).unwrap();
        let lines: Vec<&str> = std::str::from_utf8(&output).unwrap().lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"[{"path":"/queue.depth/edge-1/ingest","value":1,"ts":"10 20"}]"#,
                r#"[{"path":"/queue.depth/edge-1/ingest","value":2,"ts":"10 20"}]"#,
            ]
        );
    }

    #[test]
    fn test_encode_input_otlp_json_string_integers() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(explicit_config_cli(&dir, "flat"));

        let input = r#"{"resourceMetrics":[{
            "resource":{"attributes":[{"key":"host.name","value":{"stringValue":"hostname2"}}]},
            "scopeMetrics":[{"metrics":[{
                "name":"go.memory.used",
                "sum":{"aggregationTemporality":2,"dataPoints":[
                    {"attributes":[{"key":"go.memory.type","value":{"stringValue":"stack"}}],
                     "startTimeUnixNano":"1756975291124471296",
                     "timeUnixNano":"1756975296124471296","asInt":"589824"},
                    {"attributes":[{"key":"go.memory.type","value":{"stringValue":"other"}}],
                     "startTimeUnixNano":"1756975291124471296",
                     "timeUnixNano":"1756975296124471296","asInt":"10378256"}
                ]}
            }]}]
        }]}"#;

        let output = app.encode_input(input.as_bytes(), InputFormat::Json).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            concat!(
                r#"[{"path":"/go.memory.used/stack","value":589824,"ts":"1756975296124471296"},"#,
                r#"{"path":"/go.memory.used/other","value":10378256,"ts":"1756975296124471296"}]"#,
                "\n"
            )
        );
    }

    #[test]
    fn test_encode_input_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(explicit_config_cli(&dir, "flat"));
        assert!(app.encode_input(b"not json", InputFormat::Json).is_err());
    }

    #[test]
    fn test_encode_file_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("batch.pb");
        let output_path = dir.path().join("records.json");
        fs::write(&input_path, gauge_request(42).encode_to_vec()).unwrap();

        let cli = CliConfig {
            input: input_path,
            output: output_path.clone(),
            format: InputFormatArg::Auto,
            ..explicit_config_cli(&dir, "flat")
        };
        app_with(cli).encode().unwrap();

        let written = fs::read_to_string(&output_path).unwrap();
        assert_eq!(
            written,
            "[{\"path\":\"/queue.depth/ingest\",\"value\":42,\"ts\":\"20\"}]\n"
        );
    }

    #[test]
    fn test_encode_missing_input_reports_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("records.json");
        let cli = CliConfig {
            input: dir.path().join("missing.pb"),
            output: output_path.clone(),
            ..explicit_config_cli(&dir, "flat")
        };

        let err = app_with(cli).encode().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read input file"));
        assert!(!output_path.exists());
    }

    #[test]
    fn test_init_missing_config_file_fails() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/nonexistent/flatmetrics.json")),
            ..Default::default()
        };
        assert!(CoreApp::init(cli).is_err());
    }
}
