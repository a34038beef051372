//! Command-line argument parsing for flight-report.
//!
//! Uses clap. Input validation that belongs to the caller (calendar dates,
//! airport code shape) happens here, before anything reaches the store.

use clap::{Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;

/// Length of an IATA airport code.
pub const IATA_LENGTH: usize = 3;

/// Output format for report commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Records, series or matrix as JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// A calendar date given as DD/MM/YYYY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl fmt::Display for FlightDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

impl std::str::FromStr for FlightDate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(format!("Invalid date: '{s}'. Expected DD/MM/YYYY"));
        };

        let day: u32 = day
            .parse()
            .map_err(|_| format!("Invalid day: '{day}'"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month: '{month}'"))?;
        if year.len() != 4 {
            return Err(format!("Invalid year: '{year}'. Expected four digits"));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year: '{year}'"))?;

        if !(1..=12).contains(&month) {
            return Err(format!("Invalid month: {month}"));
        }
        if day == 0 || day > days_in_month(month, year) {
            return Err(format!("Invalid day: {day} for month {month}/{year}"));
        }

        Ok(Self { day, month, year })
    }
}

fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Accepts exactly three ASCII letters and upper-cases them.
pub fn parse_iata(s: &str) -> std::result::Result<String, String> {
    let code = s.trim();
    if code.len() == IATA_LENGTH && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(format!(
            "Invalid IATA code: '{s}'. Expected {IATA_LENGTH} letters"
        ))
    }
}

/// Delay reports over a flight-records database.
#[derive(Parser, Debug)]
#[command(name = "flight-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database URL or path (e.g., sqlite:///data/flights.sqlite3)
    #[arg(
        short = 'd',
        long,
        value_name = "URL",
        env = "FLIGHTS_DATABASE_URL",
        global = true
    )]
    pub database: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Report to run.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show flight by ID
    Flight {
        /// Flight ID
        id: i64,
    },

    /// Show flights by date
    Date {
        /// Date as DD/MM/YYYY
        date: FlightDate,
    },

    /// Delayed flights by airline
    Airline {
        /// Airline name or part of it (case-insensitive)
        name: String,
    },

    /// Delayed flights by origin airport
    Airport {
        /// Origin airport IATA code
        #[arg(value_parser = parse_iata)]
        iata: String,
    },

    /// Percentage of delayed flights by airline
    AirlineDelays,

    /// Percentage of delayed flights by hour of day
    HourlyDelays,

    /// Percentage of delayed flights by origin/destination pair
    RouteDelays,

    /// List the report queries
    Queries,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}
