//! plz4: ordered parallel block compression over files or stdin/stdout.
//!
//! ```bash
//! plz4 -c < data.bin > data.plz4
//! plz4 -d -i data.plz4 -o data.bin --workers 4
//! plz4 -c --codec zstd --level 9 --stats < data.bin > data.plz4
//! ```
//!
//! Producer and consumer must agree on `--chunk-size` and `--codec`; neither
//! is recorded in the compressed stream.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use plz4_core::compression::resolve;
use plz4_core::constants::DEFAULT_CHUNK_SIZE;
use plz4_core::prelude::*;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Parallel, order-preserving block compressor
#[derive(Parser, Debug)]
#[command(name = "plz4", version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["compress", "decompress"])))]
struct Cli {
    /// Compress raw input into frames
    #[arg(short = 'c', long)]
    compress: bool,

    /// Decompress frames back into raw bytes
    #[arg(short = 'd', long)]
    decompress: bool,

    /// Block size in bytes; must match between compress and decompress
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, env = "PLZ4_CHUNK_SIZE")]
    chunk_size: usize,

    /// Worker threads (defaults to the number of logical CPUs)
    #[arg(short = 'w', long, env = "PLZ4_WORKERS")]
    workers: Option<usize>,

    /// Block codec (lz4, zstd)
    #[arg(long, default_value = "lz4", env = "PLZ4_CODEC")]
    codec: CompressionCodec,

    /// Codec level, for codecs that support one
    #[arg(long, allow_negative_numbers = true)]
    level: Option<i32>,

    /// Input file (stdin when omitted)
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Print run telemetry as JSON on stderr
    #[arg(long)]
    stats: bool,

    /// Log level or filter directive (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,
}

impl Cli {
    fn mode(&self) -> PipelineMode {
        if self.compress {
            PipelineMode::Compress
        } else {
            PipelineMode::Decompress
        }
    }

    fn pipeline_config(&self) -> PipelineConfig {
        let base = PipelineConfig::with_available_parallelism();
        let workers = self.workers.unwrap_or(base.workers);
        base.with_chunk_size(self.chunk_size)
            .with_workers(workers)
            .with_codec(CodecOptions::new(self.codec, self.level))
    }

    /// Opened here so a missing input never touches the output path.
    fn input_source(&self) -> anyhow::Result<InputSource> {
        match &self.input {
            Some(path) => {
                let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
                Ok(InputSource::Reader(Box::new(BufReader::new(file))))
            }
            None => Ok(InputSource::Reader(Box::new(io::stdin()))),
        }
    }

    fn output_sink(&self) -> OutputSink {
        match &self.output {
            Some(path) => OutputSink::File(path.clone()),
            None => OutputSink::Writer(Box::new(BufWriter::new(io::stdout()))),
        }
    }
}

fn main() -> ExitCode {
    // Usage errors exit with status 2 from inside clap.
    let cli = Cli::parse();
    setup_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mode = cli.mode();
    let config = cli.pipeline_config();
    config.validate().context("invalid configuration")?;

    let codec = resolve(cli.codec as u16)?;
    if cli.level.is_some() && !codec.supports_level {
        warn!(codec = codec.name, "codec has no levels, --level ignored");
    }
    debug!(%mode, ?config, "starting");

    let input = cli.input_source()?;
    let result = match mode {
        PipelineMode::Compress => compress_stream(input, cli.output_sink(), config),
        PipelineMode::Decompress => decompress_stream(input, cli.output_sink(), config),
    };
    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(e) => {
            discard_output(cli);
            return Err(e).with_context(|| format!("{mode} failed"));
        }
    };

    info!(
        blocks = snapshot.blocks,
        ratio = snapshot.compression_ratio,
        elapsed_ms = snapshot.elapsed.as_millis() as u64,
        "done"
    );

    if cli.stats {
        let json = serde_json::to_string_pretty(&snapshot).context("serializing telemetry")?;
        eprintln!("{json}");
    }
    Ok(())
}

/// Output of a failed run is untrustworthy; remove it when we own the file.
fn discard_output(cli: &Cli) {
    if let Some(path) = &cli.output {
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != io::ErrorKind::NotFound {
                error!(path = %path.display(), "could not remove partial output: {e}");
            }
        }
    }
}

/// Logs go to stderr; stdout may carry the data stream.
fn setup_logging(cli: &Cli) {
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(false),
        )
        .with(filter)
        .init();
}
