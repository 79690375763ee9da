//! # Recibo CLI
//!
//! Command-line interface for Bluetooth receipt printing.
//!
//! ## Usage
//!
//! ```bash
//! # Print the built-in self-test page on the first paired printer
//! recibo print
//!
//! # Print text
//! recibo print "Hello from recibo"
//!
//! # Normal-size text, no cut
//! recibo print --size normal --no-cut "draft"
//!
//! # List paired Bluetooth devices, marking printer candidates
//! recibo devices
//! ```

use clap::{Parser, Subcommand};
use serde_json::json;

use recibo::api::{self, Outcome};
use recibo::{PrintError, device};

/// Recibo - Bluetooth thermal receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "recibo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print text on the first paired printer (self-test page if omitted)
    Print {
        /// Text to print
        text: Option<String>,

        /// Character size: normal, double, wide, or tall
        #[arg(long, default_value = "double")]
        size: String,

        /// Skip the trailing paper-cut sequence
        #[arg(long)]
        no_cut: bool,
    },

    /// List paired Bluetooth devices and mark printer candidates
    Devices,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PrintError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Print { text, size, no_cut } => {
            let args = json!({
                "text": text,
                "size": size,
                "cut": !no_cut,
            });

            // Same entry point an embedding application would call
            match api::dispatch("bluetoothPrint", &args) {
                Outcome::Success { message } => {
                    println!("{}", message);
                    Ok(())
                }
                Outcome::Error { code, detail } => {
                    eprintln!("Error [{}]: {}", code, detail);
                    std::process::exit(1);
                }
                Outcome::NotImplemented { method } => Err(PrintError::Unexpected(format!(
                    "Method '{}' not registered",
                    method
                ))),
            }
        }

        Commands::Devices => {
            device::adapter_status()?;
            let paired = device::paired_devices()?;

            if paired.is_empty() {
                println!("No paired devices.");
                return Ok(());
            }

            println!("Paired devices:");
            for peripheral in &paired {
                let marker = if peripheral.looks_like_printer() {
                    " [printer]"
                } else {
                    ""
                };
                println!(
                    "  {}  {}{}",
                    peripheral.address,
                    peripheral.name.as_deref().unwrap_or("<unnamed>"),
                    marker
                );
            }
            Ok(())
        }
    }
}
