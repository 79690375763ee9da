//! # Operation Dispatch
//!
//! This module exposes the crate's operations behind a plain dispatch
//! table keyed by operation name, with JSON arguments and a structured
//! outcome. It is the boundary an embedding application (or the CLI)
//! calls; no error kind other than the [`crate::error::PrintError`]
//! taxonomy crosses it.
//!
//! ## Example
//!
//! ```no_run
//! use recibo::api;
//! use serde_json::json;
//!
//! let outcome = api::dispatch("bluetoothPrint", &json!({ "text": "Hello" }));
//! println!("{}", serde_json::to_string(&outcome).unwrap());
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::device;
use crate::error::PrintError;
use crate::receipt::{CharSize, PrintRequest};
use crate::session::PrintSession;
use crate::transport::RfcommTransport;

/// Result of dispatching one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The operation completed; `message` is a human-readable summary.
    Success { message: String },
    /// The operation failed with a machine-readable kind and free-text
    /// detail.
    Error { code: String, detail: String },
    /// No operation is registered under the requested name.
    NotImplemented { method: String },
}

type Handler = fn(&Value) -> Result<String, PrintError>;

/// Registered operations, keyed by name.
const METHODS: &[(&str, Handler)] = &[("bluetoothPrint", bluetooth_print)];

/// Dispatch an operation by name.
///
/// Unknown names yield [`Outcome::NotImplemented`]; handler failures are
/// reported with their short kind code and detail message.
pub fn dispatch(method: &str, args: &Value) -> Outcome {
    match METHODS.iter().find(|(name, _)| *name == method) {
        Some((_, handler)) => match handler(args) {
            Ok(message) => Outcome::Success { message },
            Err(e) => Outcome::Error {
                code: e.code().to_string(),
                detail: e.detail().to_string(),
            },
        },
        None => Outcome::NotImplemented {
            method: method.to_string(),
        },
    }
}

/// The `bluetoothPrint` operation.
///
/// Arguments (all optional):
/// - `text` (string): payload; omitted means the self-test message
/// - `cut` (bool): emit the cut sequence, default true
/// - `size` (string): `normal` | `double` | `wide` | `tall`, default `double`
///
/// Pipeline: adapter check, paired-device enumeration, keyword selection,
/// then a single print session over RFCOMM.
fn bluetooth_print(args: &Value) -> Result<String, PrintError> {
    let request = request_from_args(args)?;

    device::adapter_status()?;
    let paired = device::paired_devices()?;
    let printer = device::select_printer(&paired)?;

    eprintln!(
        "Connecting to printer: {} ({})",
        printer.name.as_deref().unwrap_or("<unnamed>"),
        printer.address
    );

    let transport = RfcommTransport::new();
    let mut session = PrintSession::new(&transport);
    session.print(printer, &request)?;

    Ok("Print successful via Bluetooth".to_string())
}

/// Build a [`PrintRequest`] from JSON arguments.
fn request_from_args(args: &Value) -> Result<PrintRequest, PrintError> {
    let text = args
        .get("text")
        .and_then(Value::as_str)
        .map(str::to_string);

    let cut = args.get("cut").and_then(Value::as_bool).unwrap_or(true);

    let size = match args.get("size").and_then(Value::as_str) {
        None => CharSize::default(),
        Some("normal") => CharSize::Normal,
        Some("double") => CharSize::Double,
        Some("wide") => CharSize::DoubleWidth,
        Some("tall") => CharSize::DoubleHeight,
        Some(other) => {
            return Err(PrintError::Unexpected(format!(
                "Unknown size '{}' (expected normal, double, wide, or tall)",
                other
            )));
        }
    };

    Ok(PrintRequest { text, size, cut })
}

// ============================================================================
// TESTS
// ============================================================================
