use clap::{Parser, Subcommand};
use openapi_to_ts::output::write_types;
use openapi_to_ts::source::DEFAULT_TIMEOUT;
use openapi_to_ts::{Source, SourceOptions, convert_document};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "openapi-to-ts")]
#[command(version, about = "Convert OpenAPI component schemas to TypeScript declarations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate `types.ts` from an OpenAPI JSON document
    Generate {
        /// Local path or http(s):// URL of the OpenAPI JSON document
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Directory the generated `types.ts` is written to
        #[arg(value_name = "OUT_DIR", default_value = "typings")]
        out_dir: PathBuf,

        /// Directory relative paths are resolved against (defaults to the working directory)
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,

        /// HTTP timeout in seconds for URL sources
        #[arg(
            long,
            value_name = "SECS",
            default_value_t = DEFAULT_TIMEOUT.as_secs(),
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        timeout: u64,
    },
}

/// Everything one generation run needs, resolved from the command line.
struct GenerateConfig {
    source: Source,
    out_dir: PathBuf,
    options: SourceOptions,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "openapi_to_ts=debug"
    } else {
        "openapi_to_ts=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: GenerateConfig) -> Result<(), Box<dyn std::error::Error>> {
    let content = config.source.read(&config.options)?;
    let generated = convert_document(&content)?;

    for diagnostic in &generated.diagnostics {
        warn!(location = diagnostic.location(), "{diagnostic}");
    }

    let out_dir = config.options.base_dir.join(&config.out_dir);
    let path = write_types(&out_dir, &generated.text)?;
    println!("TypeScript file has been generated at {}", path.display());

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Command::Generate {
        source,
        out_dir,
        base_dir,
        timeout,
    } = cli.command;

    let base_dir = match base_dir.map_or_else(std::env::current_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: cannot determine working directory: {e}");
            std::process::exit(1);
        }
    };

    let config = GenerateConfig {
        source: Source::parse(&source),
        out_dir,
        options: SourceOptions {
            base_dir,
            timeout: Duration::from_secs(timeout),
        },
    };

    if let Err(e) = run(config) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
