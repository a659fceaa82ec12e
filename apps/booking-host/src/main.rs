//! # Sana Booking Host Entry Point
//!
//! ## Usage
//! ```bash
//! # Serve the booking UI over stdin/stdout
//! sana-booking
//!
//! # Use a specific config file
//! sana-booking --config ./booking.toml
//!
//! # Write the default config so it can be edited
//! sana-booking --init-config ./booking.toml
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use sana_booking_lib::config::HostConfig;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut init_config = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--init-config" => {
                init_config = true;
                if i + 1 < args.len() && !args[i + 1].starts_with('-') {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Sana Booking Host");
                println!();
                println!("Usage: sana-booking [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>         Config file (default: platform config dir/booking.toml)");
                println!("      --init-config [PATH]    Write the default config and exit");
                println!("  -h, --help                  Show this help message");
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                return ExitCode::from(2);
            }
        }
        i += 1;
    }

    let result = if init_config {
        HostConfig::default().save(config_path).map(|path| {
            eprintln!("Wrote default config to {}", path.display());
        })
    } else {
        sana_booking_lib::run(config_path)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sana-booking: {}", e);
            ExitCode::FAILURE
        }
    }
}
