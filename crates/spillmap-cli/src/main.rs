mod coords;
mod headless;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::coords::CoordinateFormatArg;

#[derive(Debug, Parser)]
#[command(name = "spillmap")]
#[command(about = "Drive the spill report map controllers against a report server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the coordinate notations with their input pattern and placeholder
    Formats,
    /// Check a coordinate string against a notation's input pattern, offline
    Validate {
        /// Notation: "Decimal Degrees", "Degrees Decimal Minutes",
        /// "Degrees Minutes Seconds" (or dd, ddm, dms)
        #[arg(long, short)]
        format: CoordinateFormatArg,
        coordinates: String,
    },
    /// Convert a marker position into every notation via the server
    Convert {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Notation written back into the coordinate field
        #[arg(long, short, default_value = "dd")]
        format: CoordinateFormatArg,
    },
    /// Resolve a typed coordinate string to lat/lon via the server
    Check {
        #[arg(long, short)]
        format: CoordinateFormatArg,
        #[arg(allow_hyphen_values = true)]
        coordinates: String,
    },
    /// Search reports in a bounding box and list their rendered samples
    Search(search::SearchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Formats => {
            init_tracing("info")?;
            coords::print_formats();
        }
        Commands::Validate {
            format,
            coordinates,
        } => {
            init_tracing("info")?;
            coords::validate(format.0, &coordinates)?;
        }
        Commands::Convert { lat, lng, format } => {
            let config = spillmap_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            coords::convert(&config, lat, lng, format.0).await?;
        }
        Commands::Check {
            format,
            coordinates,
        } => {
            let config = spillmap_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            coords::check(&config, format.0, &coordinates).await?;
        }
        Commands::Search(args) => {
            let config = spillmap_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            search::run(&config, &args).await?;
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
