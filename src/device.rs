//! # Device Discovery and Selection
//!
//! This module picks a thermal printer out of the host's paired Bluetooth
//! peripherals.
//!
//! ## Selection Policy
//!
//! A peripheral is considered a printer candidate when its display name
//! contains (case-insensitively) any keyword from [`PRINTER_KEYWORDS`],
//! vendor and product names of common thermal-printer families. The first
//! candidate in enumeration order wins; nothing is sorted or scored.
//!
//! The heuristic is deliberately simple: it will misclassify a paired
//! phone named "MyPrinterCase" just as readily as it finds a real
//! "XPrinter T80". Pair only the printer you mean to use.
//!
//! ## Enumeration (Linux)
//!
//! Paired devices and adapter state come from BlueZ via `bluetoothctl`,
//! the same tooling used to pair the printer in the first place:
//!
//! ```bash
//! $ bluetoothctl
//! [bluetooth]# scan on
//! # Look for your printer, e.g. "XPrinter T80"
//! [bluetooth]# pair 00:11:62:XX:XX:XX
//! ```
//!
//! The parsing of `bluetoothctl` output lives in pure helper functions so
//! the policy is testable without hardware.

use std::process::Command;

use crate::error::PrintError;

/// Name keywords identifying common thermal-printer families.
///
/// A paired device whose lowercase name contains any of these substrings
/// is treated as a printer candidate.
pub const PRINTER_KEYWORDS: &[&str] = &[
    "printer", "thermal", "pos", "receipt", "v510", "hosoton", "ktp", "rpp", "mpt", "goojprt",
    "zjiang", "xprinter",
];

/// A paired Bluetooth peripheral as reported by the platform.
///
/// Read-only input data: this crate never creates, mutates, or unpairs
/// peripherals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peripheral {
    /// Bluetooth MAC address (XX:XX:XX:XX:XX:XX)
    pub address: String,

    /// Display name, if the platform knows one
    pub name: Option<String>,
}

impl Peripheral {
    /// Whether this peripheral's name matches the printer keyword heuristic.
    ///
    /// A peripheral without a name never matches.
    pub fn looks_like_printer(&self) -> bool {
        match &self.name {
            Some(name) => {
                let lower = name.to_lowercase();
                PRINTER_KEYWORDS.iter().any(|kw| lower.contains(kw))
            }
            None => false,
        }
    }
}

/// Select a printer from the paired-device set.
///
/// Pure function of its input: returns the **first** peripheral (in input
/// order) whose name matches [`PRINTER_KEYWORDS`], or
/// [`PrintError::NoPrinterFound`] if the set is empty or nothing matches.
pub fn select_printer(paired: &[Peripheral]) -> Result<&Peripheral, PrintError> {
    paired
        .iter()
        .find(|device| device.looks_like_printer())
        .ok_or_else(|| {
            PrintError::NoPrinterFound(
                "No printer devices found. Please pair your printer first.".to_string(),
            )
        })
}

// ============================================================================
// ADAPTER STATE
// ============================================================================

/// Check that a Bluetooth adapter exists and is powered on.
///
/// Runs `bluetoothctl show` and inspects the controller block:
/// - No controller reported: [`PrintError::BluetoothUnavailable`]
/// - `Powered: no`: [`PrintError::BluetoothDisabled`]
pub fn adapter_status() -> Result<(), PrintError> {
    let output = Command::new("bluetoothctl")
        .arg("show")
        .output()
        .map_err(|e| {
            PrintError::BluetoothUnavailable(format!("Failed to run bluetoothctl: {}", e))
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_adapter_status(&stdout)
}

/// Parse `bluetoothctl show` output into an adapter-state result.
fn parse_adapter_status(show_output: &str) -> Result<(), PrintError> {
    if !show_output
        .lines()
        .any(|line| line.trim_start().starts_with("Controller "))
    {
        return Err(PrintError::BluetoothUnavailable(
            "No Bluetooth controller available".to_string(),
        ));
    }

    let powered = show_output
        .lines()
        .map(str::trim)
        .any(|line| line.starts_with("Powered:") && line.ends_with("yes"));

    if !powered {
        return Err(PrintError::BluetoothDisabled(
            "Bluetooth controller is powered off".to_string(),
        ));
    }

    Ok(())
}

// ============================================================================
// PAIRED DEVICE ENUMERATION
// ============================================================================

/// Enumerate the currently paired (bonded) peripherals.
///
/// Runs `bluetoothctl devices Paired`, falling back to the older
/// `paired-devices` verb for pre-5.65 BlueZ. Enumeration order is
/// whatever `bluetoothctl` reports; [`select_printer`] depends on it
/// only for the first-match tie-break.
pub fn paired_devices() -> Result<Vec<Peripheral>, PrintError> {
    let output = Command::new("bluetoothctl")
        .args(["devices", "Paired"])
        .output()
        .map_err(|e| {
            PrintError::BluetoothUnavailable(format!("Failed to run bluetoothctl: {}", e))
        })?;

    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        return Ok(parse_device_list(&stdout));
    }

    // Older bluetoothctl rejects the "Paired" filter argument
    let output = Command::new("bluetoothctl")
        .arg("paired-devices")
        .output()
        .map_err(|e| {
            PrintError::BluetoothUnavailable(format!("Failed to run bluetoothctl: {}", e))
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_device_list(&stdout))
}

/// Parse `bluetoothctl devices` output into peripherals.
///
/// Lines have the form `Device XX:XX:XX:XX:XX:XX Some Name`. A device
/// whose name equals its address (BlueZ's placeholder for nameless
/// devices) is treated as unnamed.
fn parse_device_list(listing: &str) -> Vec<Peripheral> {
    let mut devices = Vec::new();

    for line in listing.lines() {
        let Some(rest) = line.trim().strip_prefix("Device ") else {
            continue;
        };

        let (address, name) = match rest.split_once(' ') {
            Some((addr, name)) => (addr, Some(name.trim())),
            None => (rest, None),
        };

        if !is_valid_mac(address) {
            continue;
        }

        let name = name
            .filter(|n| !n.is_empty() && !is_placeholder_name(n, address))
            .map(str::to_string);

        devices.push(Peripheral {
            address: address.to_string(),
            name,
        });
    }

    devices
}

/// Whether a reported name is BlueZ's placeholder for a nameless device
/// (the address with dashes instead of colons).
fn is_placeholder_name(name: &str, address: &str) -> bool {
    name.replace('-', ":").eq_ignore_ascii_case(address)
}

/// Validate a Bluetooth MAC address format (XX:XX:XX:XX:XX:XX).
pub fn is_valid_mac(mac: &str) -> bool {
    let parts: Vec<&str> = mac.split(':').collect();
    if parts.len() != 6 {
        return false;
    }
    parts
        .iter()
        .all(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_hexdigit()))
}

// ============================================================================
// TESTS
// ============================================================================
