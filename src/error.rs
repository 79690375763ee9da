//! # Error Types
//!
//! This module defines the error taxonomy for recibo operations.
//!
//! Every failure is converted into one of these kinds at its point of
//! origin; no raw I/O errors cross the crate boundary. Each variant
//! carries a human-readable detail string, and [`PrintError::code`]
//! exposes the short machine-readable kind that external callers (the
//! dispatch API, the CLI) use to distinguish failures programmatically.

use thiserror::Error;

/// Main error type for recibo operations
#[derive(Debug, Error)]
pub enum PrintError {
    /// No Bluetooth adapter present on this host
    #[error("Bluetooth unavailable: {0}")]
    BluetoothUnavailable(String),

    /// Adapter present but the radio is powered off
    #[error("Bluetooth disabled: {0}")]
    BluetoothDisabled(String),

    /// Paired-device set empty or no name matched the printer keywords
    #[error("No printer found: {0}")]
    NoPrinterFound(String),

    /// Transport-level connection failure (unreachable, rejected, out of range)
    #[error("Connect failed: {0}")]
    Connect(String),

    /// Connection established but data transfer failed
    #[error("Write failed: {0}")]
    Write(String),

    /// Any other failure caught at the outer boundary
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PrintError {
    /// Short machine-readable kind code for this error.
    ///
    /// These are the codes the `bluetoothPrint` operation reports to
    /// its caller alongside the detail message.
    pub fn code(&self) -> &'static str {
        match self {
            PrintError::BluetoothUnavailable(_) => "BLUETOOTH_NOT_AVAILABLE",
            PrintError::BluetoothDisabled(_) => "BLUETOOTH_NOT_ENABLED",
            PrintError::NoPrinterFound(_) => "NO_PRINTER_FOUND",
            PrintError::Connect(_) => "CONNECT_ERROR",
            PrintError::Write(_) => "WRITE_ERROR",
            PrintError::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }

    /// The human-readable detail string, without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            PrintError::BluetoothUnavailable(d)
            | PrintError::BluetoothDisabled(d)
            | PrintError::NoPrinterFound(d)
            | PrintError::Connect(d)
            | PrintError::Write(d)
            | PrintError::Unexpected(d) => d,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            PrintError::BluetoothUnavailable(String::new()).code(),
            "BLUETOOTH_NOT_AVAILABLE"
        );
        assert_eq!(
            PrintError::BluetoothDisabled(String::new()).code(),
            "BLUETOOTH_NOT_ENABLED"
        );
        assert_eq!(
            PrintError::NoPrinterFound(String::new()).code(),
            "NO_PRINTER_FOUND"
        );
        assert_eq!(PrintError::Connect(String::new()).code(), "CONNECT_ERROR");
        assert_eq!(PrintError::Write(String::new()).code(), "WRITE_ERROR");
        assert_eq!(
            PrintError::Unexpected(String::new()).code(),
            "UNEXPECTED_ERROR"
        );
    }

    #[test]
    fn test_detail_strips_prefix() {
        let e = PrintError::Connect("device out of range".to_string());
        assert_eq!(e.detail(), "device out of range");
        assert_eq!(e.to_string(), "Connect failed: device out of range");
    }
}
