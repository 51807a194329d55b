//! ovpn-status binary
//!
//! Parses an OpenVPN status file and prints what is in it.
//!
//! Usage: `ovpn-status [--config <file>] [--toml] [status-file]`

use log::{debug, info, warn};
use ovpn_status::{Config, Result, Status, StatusError, StatusParser};
use std::env;
use std::path::{Path, PathBuf};
use std::process;

const DEFAULT_CONFIG_PATH: &str = "ovpn-status.toml";

#[derive(Debug, Default)]
struct Args {
    config_path: Option<PathBuf>,
    status_path: Option<PathBuf>,
    toml: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or_else(|| {
                    StatusError::Config("--config requires a file argument".to_string())
                })?;
                args.config_path = Some(PathBuf::from(path));
            }
            "--toml" => args.toml = true,
            other if other.starts_with("--") => {
                return Err(StatusError::Config(format!("Unknown option: {other}")));
            }
            other => args.status_path = Some(PathBuf::from(other)),
        }
    }

    Ok(args)
}

/// Load configuration from file or fall back to defaults
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = match config_path {
        Some(path) => Config::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::from_file(DEFAULT_CONFIG_PATH)?,
        None => Config::default(),
    };
    config.validate()?;
    Ok(config)
}

fn print_summary(status: &Status) {
    match status.updated_at {
        Some(ts) => println!("Updated: {ts}"),
        None => println!("Updated: unknown"),
    }

    println!("Clients ({}):", status.client_count());
    for client in &status.client_list {
        let since = client
            .connected_since
            .map(|ts| ts.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<24} {:<24} rx {:>12} tx {:>12} since {}",
            client.common_name, client.real_address, client.bytes_received, client.bytes_sent, since
        );
    }

    println!("Routing table ({}):", status.route_count());
    for route in &status.routing_table {
        let last_ref = route
            .last_ref
            .map(|ts| ts.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<18} {:<24} {:<24} last ref {}",
            route.virtual_address, route.common_name, route.real_address, last_ref
        );
    }

    println!(
        "Max bcast/mcast queue length: {}",
        status.global_stats.max_bcast_mcast_queue_len
    );
}

fn run() -> Result<()> {
    let args = parse_args()?;
    let config = load_config(args.config_path.as_deref())?;

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();
    debug!("Configuration: {config:?}");

    let status_path = args
        .status_path
        .or_else(|| config.source.path.clone())
        .ok_or_else(|| {
            StatusError::Config(
                "No status file given on the command line or in [source] path".to_string(),
            )
        })?;

    let parser = StatusParser::new(config.parser.clone());
    let status = parser.parse_file(&status_path)?;
    info!(
        "Parsed {}: {} clients, {} routes",
        status_path.display(),
        status.client_count(),
        status.route_count()
    );
    if status.updated_at.is_none() {
        warn!("Status file has no usable Updated timestamp");
    }

    if args.toml {
        print!("{}", toml::to_string_pretty(&status)?);
    } else {
        print_summary(&status);
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        // logging may not be set up yet
        eprintln!("ovpn-status: {e}");
        process::exit(1);
    }
}
