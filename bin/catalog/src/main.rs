//! Challenge Catalog CLI
//!
//! Serves a directory of coding challenges over HTTP and inspects it from the
//! command line.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use catalog::{Overrides, cmd, load_config};
use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for the challenge catalog.
#[derive(Parser)]
#[command(name = "catalog", version, about = "Serve a catalog of coding challenges")]
struct Cli {
    /// Path to configuration file (optional)
    #[arg(short, long, default_value = "catalog.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Directory holding one subdirectory per challenge
        #[arg(short, long)]
        data_root: Option<PathBuf>,
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the catalog
    List {
        /// Directory holding one subdirectory per challenge
        #[arg(short, long)]
        data_root: Option<PathBuf>,
    },
    /// Print one challenge as JSON
    Show {
        /// Challenge id
        id: String,
        /// Directory holding one subdirectory per challenge
        #[arg(short, long)]
        data_root: Option<PathBuf>,
    },
    /// Validate every challenge directory
    Check {
        /// Directory holding one subdirectory per challenge
        #[arg(short, long)]
        data_root: Option<PathBuf>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    catalog::init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve {
            data_root,
            host,
            port,
        } => {
            let overrides = Overrides {
                data_root,
                host,
                port,
            };
            let config = load_config(&cli.config, &overrides)?;
            cmd::serve::run(&config).await?;
        }
        Commands::List { data_root } => {
            let config = load_config(&cli.config, &data_root_override(data_root))?;
            cmd::list::run(&config).await?;
        }
        Commands::Show { id, data_root } => {
            let config = load_config(&cli.config, &data_root_override(data_root))?;
            cmd::show::run(&config, &id).await?;
        }
        Commands::Check { data_root, strict } => {
            let config = load_config(&cli.config, &data_root_override(data_root))?;
            cmd::check::run(&config, strict).await?;
        }
    }

    Ok(())
}

fn data_root_override(data_root: Option<PathBuf>) -> Overrides {
    Overrides {
        data_root,
        ..Overrides::default()
    }
}
