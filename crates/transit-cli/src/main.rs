//! `transit` CLI: resolve next departures for recurring warehouse transports.
//!
//! ## Usage
//!
//! ```sh
//! # Schedule one shipment per transport record (stdin → stdout)
//! echo '1,2,2025-11-02 09:00,120,180,WEEKLY,2' | transit next --at "2025-11-01 10:00"
//!
//! # Same, reading a catalog file and printing JSON
//! transit next --at "2025-11-01 10:00" -i transports.csv --json
//!
//! # The next five departures of a single transport
//! transit upcoming --transport '3,4,2025-01-01 08:00,0,120,MONTHLY,15' --at "2025-04-20 00:00"
//!
//! # The RFC 5545 rule equivalent to a transport
//! transit rule --transport '1,2,2025-11-02 09:00,120,180,WEEKLY,2'
//!
//! # Log resolution decisions to stderr
//! transit -v next --at "2025-11-01 10:00" -i transports.csv
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use transit_engine::transport::ANCHOR_FORMAT;
use transit_engine::{Shipment, ShipmentIds, Transport};

#[derive(Parser)]
#[command(
    name = "transit",
    version,
    about = "Next-departure resolution for recurring warehouse transports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule a shipment on every transport in a record file
    Next {
        /// Request instant, "YYYY-MM-DD HH:MM"
        #[arg(long, value_parser = parse_instant)]
        at: NaiveDateTime,
        /// Transport records, one per line (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print the shipments as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// List the next departures of one transport
    Upcoming {
        /// Transport record, e.g. "1,2,2025-11-02 09:00,120,180,WEEKLY,2"
        #[arg(short, long)]
        transport: String,
        /// Request instant, "YYYY-MM-DD HH:MM"
        #[arg(long, value_parser = parse_instant)]
        at: NaiveDateTime,
        /// Number of departures to list (at most 65535)
        #[arg(short = 'n', long, default_value_t = 5)]
        count: u16,
        /// Print the slots as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Print the RRULE equivalent to a transport
    Rule {
        /// Transport record
        #[arg(short, long)]
        transport: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Next { at, input, json } => {
            let records = read_input(input.as_deref())?;
            let mut ids = ShipmentIds::new();
            let mut shipments = Vec::new();

            for (idx, line) in records.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let transport = Transport::parse(line)
                    .with_context(|| format!("Invalid transport record on line {}", idx + 1))?;
                let shipment = Shipment::new(&mut ids, at, transport.origin, transport.destination)?
                    .schedule(transport)
                    .with_context(|| format!("Failed to schedule transport on line {}", idx + 1))?;
                shipments.push(shipment);
            }
            info!(count = shipments.len(), "shipments scheduled");

            if json {
                println!("{}", serde_json::to_string_pretty(&shipments)?);
            } else {
                for shipment in &shipments {
                    println!("{}", shipment);
                }
            }
        }
        Commands::Upcoming {
            transport,
            at,
            count,
            json,
        } => {
            let transport = parse_transport(&transport)?;
            let slots = transit_engine::upcoming(&transport, at, usize::from(count))
                .context("Failed to resolve upcoming departures")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                for slot in &slots {
                    println!("{} -> {}", slot.departure, slot.arrival);
                }
            }
        }
        Commands::Rule { transport } => {
            let transport = parse_transport(&transport)?;
            println!("{}", transport.recurrence_rule()?);
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .init();
    debug!(level = default_level, "logging initialized");
}

/// Accepts the record layout ("2025-11-01 10:00") or one with seconds.
fn parse_instant(s: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, ANCHOR_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| format!("expected \"YYYY-MM-DD HH:MM\": {}", e))
}

fn parse_transport(record: &str) -> Result<Transport> {
    Transport::parse(record).with_context(|| format!("Invalid transport record: {}", record))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
