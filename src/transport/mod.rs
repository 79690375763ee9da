//! # Printer Transport Layer
//!
//! This module provides the transport seam for delivering command streams
//! to a printer, and the Linux RFCOMM backend that implements it.
//!
//! ## Available Transports
//!
//! - [`rfcomm`]: Bluetooth RFCOMM (Serial Port Profile) for wireless
//!   printing (Linux)
//!
//! Sessions talk to the [`Transport`] and [`Connection`] traits rather
//! than a backend struct, so the session lifecycle is testable with an
//! in-memory mock.

use std::io;

/// An open point-to-point connection to a printer.
///
/// Exclusively owned by one print session for its entire lifetime; never
/// shared or reused across invocations.
pub trait Connection: std::fmt::Debug {
    /// Write the full byte stream and flush it to force delivery.
    fn send(&mut self, data: &[u8]) -> io::Result<()>;

    /// Close the connection.
    ///
    /// Callers treat close as best-effort; failures are reported but the
    /// connection is considered gone either way.
    fn close(&mut self) -> io::Result<()>;
}

/// A factory for printer connections.
pub trait Transport {
    /// Open a connection to the peripheral with the given address.
    ///
    /// Blocking, single attempt, transport-default timeout.
    fn connect(&self, address: &str) -> io::Result<Box<dyn Connection>>;
}

pub mod rfcomm;

pub use rfcomm::RfcommTransport;
