//! CLI definition, tracing setup, and the generate command.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use timelinegen_core::pipeline::{GenerateConfig, ProgressReporter, RunSummary};
use timelinegen_shared::{AppConfig, load_config, load_config_from};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// timelinegen — turn a CSV of dated events into an embedded HTML timeline.
#[derive(Parser)]
#[command(
    name = "timelinegen",
    version,
    about = "Render a CSV of dated events into the timeline region of an HTML document.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Input table with Date, Headline, Content and optional Tag columns.
    pub input: Option<PathBuf>,

    /// HTML document containing the BEGIN/END TIMELINE CONTENT comments.
    pub output: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file to use instead of ~/.timelinegen/timelinegen.toml.
    #[arg(long, env = "TIMELINEGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip the tag switch legend and per-tag CSS classes.
    #[arg(long)]
    pub no_tag_legend: bool,

    /// Fail if the document has no timeline region instead of warning.
    #[arg(long)]
    pub strict: bool,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout carries progress.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "timelinegen=warn",
        1 => "timelinegen=info",
        2 => "timelinegen=debug",
        _ => "timelinegen=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Run the CLI.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let (input, output) = match (&cli.input, &cli.output) {
        (None, _) => {
            println!("No input file specified");
            return Ok(());
        }
        (Some(_), None) => {
            println!("No output file specified");
            return Ok(());
        }
        (Some(input), Some(output)) => (input, output),
    };

    let config = resolve_config(cli.config.as_deref())?;

    let mut generate_config = GenerateConfig::new(input, output, &config);
    if cli.no_tag_legend {
        generate_config.render.emit_tag_legend = false;
    }
    if cli.strict {
        generate_config.strict = true;
    }

    info!(
        input = %input.display(),
        output = %output.display(),
        tag_legend = generate_config.render.emit_tag_legend,
        strict = generate_config.strict,
        "generating timeline"
    );

    timelinegen_core::pipeline::generate(&generate_config, &ConsoleProgress)?;
    Ok(())
}

/// Explicit `--config` path, else the user config file, else defaults.
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    debug!(?config, "configuration resolved");
    Ok(config)
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Prints phase messages to stdout.
struct ConsoleProgress;

impl ProgressReporter for ConsoleProgress {
    fn phase(&self, message: &str) {
        println!("{message}");
    }

    fn done(&self, summary: &RunSummary) {
        info!(
            records = summary.record_count,
            dates = summary.group_count,
            tags = summary.tag_count,
            replaced = summary.replaced,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "timeline written"
        );
    }
}
