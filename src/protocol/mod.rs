//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS protocol
//! spoken by generic thermal receipt printers (XPrinter, Goojprt, Zjiang and
//! countless unbranded clones).
//!
//! ## Module Structure
//!
//! - [`commands`]: Printer commands (init, code page, character size, feed, cut)
//!
//! ## Usage Example
//!
//! ```
//! use recibo::protocol::commands;
//!
//! // Build a simple print sequence
//! let mut data = Vec::new();
//!
//! // Initialize printer and select the default code page
//! data.extend(commands::init());
//! data.extend(commands::codepage(0));
//!
//! // Double width and height text
//! data.extend(commands::size_double());
//! data.extend(b"RECEIPT\n");
//!
//! // Feed past the print head and cut
//! data.extend(commands::feed(3));
//! data.extend(commands::cut_partial());
//!
//! // Send `data` to printer via transport...
//! ```
//!
//! ## Protocol Reference
//!
//! Based on the Epson "ESC/POS Application Programming Guide"; the subset
//! implemented here is the common denominator honored by clone firmware.

pub mod commands;
