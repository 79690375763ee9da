//! # Recibo - Bluetooth ESC/POS Receipt Printing
//!
//! Recibo is a Rust library for printing text receipts on generic ESC/POS
//! thermal printers over Bluetooth. It provides:
//!
//! - **Device selection**: keyword heuristic over the paired-device set
//! - **Protocol implementation**: ESC/POS command builders
//! - **Print sessions**: single connect-send-disconnect lifecycle
//! - **Transport**: Bluetooth RFCOMM (Serial Port Profile) on Linux
//!
//! ## Quick Start
//!
//! ```no_run
//! use recibo::{
//!     device,
//!     receipt::PrintRequest,
//!     session::PrintSession,
//!     transport::RfcommTransport,
//! };
//!
//! // Pick a printer among the paired peripherals
//! device::adapter_status()?;
//! let paired = device::paired_devices()?;
//! let printer = device::select_printer(&paired)?;
//!
//! // One session: connect, encode, send, close
//! let transport = RfcommTransport::new();
//! let mut session = PrintSession::new(&transport);
//! session.print(printer, &PrintRequest::with_text("Hello\n"))?;
//!
//! # Ok::<(), recibo::PrintError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`device`] | Paired-device enumeration and printer selection |
//! | [`protocol`] | ESC/POS command builders |
//! | [`receipt`] | Print requests and command-stream encoding |
//! | [`session`] | Connect-send-disconnect state machine |
//! | [`transport`] | Communication backends |
//! | [`api`] | Operation-name dispatch for embedding applications |
//! | [`error`] | Error taxonomy |
//!
//! ## Supported Printers
//!
//! Any thermal printer speaking the common ESC/POS subset over Bluetooth
//! SPP: XPrinter, Goojprt, Zjiang, Hosoton and similar families. Cutterless
//! models ignore the trailing cut sequence harmlessly.

pub mod api;
pub mod device;
pub mod error;
pub mod protocol;
pub mod receipt;
pub mod session;
pub mod transport;

// Re-exports for convenience
pub use device::{Peripheral, select_printer};
pub use error::PrintError;
pub use receipt::PrintRequest;
pub use session::PrintSession;
pub use transport::RfcommTransport;
