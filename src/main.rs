//! CLI entry point for `emlinks`.

use std::io::Write;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use emlinks::links::safelinks;
use emlinks::scan::{self, ScanOptions};

#[derive(Parser)]
#[command(
    name = "emlinks",
    version,
    about = "List the links found in .eml files, unwrapping Outlook Safe Links"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the message files (defaults to the current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Print one JSON document instead of the text report
    #[arg(long)]
    json: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve URLs given on the command line
    Unwrap {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Print the effective configuration as TOML
    Config,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let (config, config_source) = emlinks::config::load_config();

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);
    config_source.log();

    match cli.command {
        Some(Commands::Unwrap { urls }) => cmd_unwrap(&urls),
        Some(Commands::Config) => cmd_config(&config),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
        None => {
            let options = ScanOptions {
                extension: config.scan.extension.clone(),
                json: cli.json || config.output.is_json(),
            };
            let dir = cli.dir.unwrap_or_else(|| PathBuf::from("."));
            cmd_scan(dir, &options)
        }
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &emlinks::config::Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_dir = emlinks::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "emlinks.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Scan a directory and print the report to stdout.
fn cmd_scan(dir: PathBuf, options: &ScanOptions) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    scan::run(&dir, options, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Print the resolved form of each URL, skipping wrappers with no destination.
fn cmd_unwrap(urls: &[String]) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for url in urls {
        if let Some(resolved) = safelinks::resolve(url) {
            writeln!(out, "{resolved}")?;
        }
    }
    Ok(())
}

/// Print the effective configuration, defaults included.
fn cmd_config(config: &emlinks::config::Config) -> anyhow::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "emlinks", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::stdout().write_all(&buf)?;
    Ok(())
}
