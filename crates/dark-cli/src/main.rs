//! Dark Converter CLI - Grafana dashboards to Dark YAML

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;
mod util;

use display::Verbosity;
use error::CliError;

#[derive(Parser)]
#[command(name = "dark-converter")]
#[command(version)]
#[command(about = "Convert Grafana dashboards into Dark YAML", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Show every conversion note, including defaulted values
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a dashboard export into a Dark YAML dashboard
    ConvertYaml {
        /// Grafana dashboard JSON file (`-` for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout if not set)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a dashboard export into a GrafanaDashboard manifest
    #[command(name = "convert-k8s-manifest")]
    ConvertK8sManifest {
        /// Name of the GrafanaDashboard resource
        name: String,

        /// Grafana dashboard JSON file (`-` for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout if not set)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Grafana folder the dashboard is stored in
        #[arg(long, env = "DARK_FOLDER", default_value = "Dark")]
        folder: String,

        /// Kubernetes namespace of the resource
        #[arg(short, long, env = "DARK_NAMESPACE")]
        namespace: Option<String>,
    },
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            };
            // Printing only fails when the terminal is gone
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_logging(cli.debug);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Logs go to stderr; conversion notes are already printed by the report
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let verbosity = cli.verbosity();

    match cli.command {
        Commands::ConvertYaml { input, output } => {
            commands::convert::yaml(&input, output.as_deref(), verbosity)
        }

        Commands::ConvertK8sManifest {
            name,
            input,
            output,
            folder,
            namespace,
        } => commands::convert::manifest(
            &name,
            &folder,
            namespace.as_deref(),
            &input,
            output.as_deref(),
            verbosity,
        ),
    }
}
