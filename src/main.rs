//! flight-report - delay reports over a flight-records database.

use flight_report::cli::{Cli, Command};
use flight_report::commands;
use flight_report::config::Config;
use flight_report::data::FlightData;
use flight_report::diagnostics::TracingSink;
use flight_report::error::Result;
use flight_report::logging;
use tracing::{debug, error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // .env must be loaded before clap reads FLIGHTS_DATABASE_URL
    let _ = dotenvy::dotenv();
    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.command == Command::Queries {
        print_lines(&commands::catalog_lines());
        return Ok(());
    }

    let config_path = cli.config_path();
    debug!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;
    let database = config.database_with_override(cli.database.as_deref());

    let data = FlightData::open(&database).await?;

    // Close the store before surfacing any output error.
    let output = commands::execute(&data, &cli.command, cli.format, &TracingSink).await;
    data.close().await?;
    info!("Closed {}", database.display_string());

    print_lines(&output?);
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
