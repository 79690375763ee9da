//! # Print Requests and Command-Stream Encoding
//!
//! This module turns a caller's text payload into the full ESC/POS byte
//! sequence for one print job.
//!
//! The encoding is total and deterministic: every [`PrintRequest`] maps to
//! exactly one command stream, materialized in full before any transport
//! write happens. There is no partial or streaming encode.
//!
//! ## Stream Layout
//!
//! ```text
//! ESC @            reset                    2 bytes
//! ESC t 0          code page select         3 bytes
//! GS ! n           character size           3 bytes
//! <text>           UTF-8 payload, verbatim
//! LF LF LF         trailing feeds           3 bytes
//! GS V A 16        partial cut (optional)   4 bytes
//! ```
//!
//! Caller text is appended verbatim; control bytes embedded in it are not
//! escaped and will be interpreted by the printer. That is the caller's
//! responsibility.

use crate::protocol::commands;

/// Self-test message printed when a request carries no text.
///
/// Fixed default, not user-visible configuration; a quick way to verify
/// the Bluetooth path end to end.
pub const DEFAULT_TEST_TEXT: &str = "Test Print\nBluetooth printing is working!\n";

/// Number of trailing line feeds after the payload, clearing the print
/// head past the last line.
pub const TRAILING_FEEDS: usize = 3;

/// Fixed control-byte overhead of an encoded stream including the cut
/// sequence (reset 2 + code page 3 + size 3 + feeds 3 + cut 4).
pub const CONTROL_OVERHEAD: usize = 15;

/// Control-byte overhead without the cut sequence.
pub const CONTROL_OVERHEAD_NO_CUT: usize = CONTROL_OVERHEAD - 4;

/// Character size selection for the whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSize {
    /// Normal 1x1 characters
    Normal,
    /// Double width and height (the default emphasis)
    #[default]
    Double,
    /// Double width only
    DoubleWidth,
    /// Double height only
    DoubleHeight,
}

impl CharSize {
    /// The GS ! parameter byte for this size.
    pub fn mode_byte(self) -> u8 {
        match self {
            CharSize::Normal => 0x00,
            CharSize::Double => 0x11,
            CharSize::DoubleWidth => 0x10,
            CharSize::DoubleHeight => 0x01,
        }
    }
}

/// One print job's payload and formatting intent.
///
/// Immutable and caller-owned; scoped to a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintRequest {
    /// Text to print. `None` substitutes [`DEFAULT_TEST_TEXT`].
    pub text: Option<String>,

    /// Character size for the whole payload.
    pub size: CharSize,

    /// Emit the partial-cut sequence at the end of the job.
    ///
    /// Enabled by default regardless of whether the printer has a cutter:
    /// cutterless firmware ignores the sequence harmlessly, and cutter
    /// support is not detectable from the paired-device data we have.
    pub cut: bool,
}

impl Default for PrintRequest {
    fn default() -> Self {
        Self {
            text: None,
            size: CharSize::default(),
            cut: true,
        }
    }
}

impl PrintRequest {
    /// A request printing the given text with default formatting.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// The text this request will print, after defaulting.
    pub fn effective_text(&self) -> &str {
        self.text.as_deref().unwrap_or(DEFAULT_TEST_TEXT)
    }
}

/// Encode a print request into its ESC/POS command stream.
///
/// Pure function of the request; invoking it twice with the same request
/// yields byte-identical streams. The result length is always the fixed
/// control overhead plus the UTF-8 length of the (defaulted) text.
pub fn encode(request: &PrintRequest) -> Vec<u8> {
    let text = request.effective_text();

    let mut stream = Vec::with_capacity(CONTROL_OVERHEAD + text.len());
    stream.extend(commands::init());
    stream.extend(commands::codepage(0));
    stream.extend(commands::size(request.size.mode_byte()));
    stream.extend_from_slice(text.as_bytes());
    stream.extend(commands::feed(TRAILING_FEEDS));
    if request.cut {
        stream.extend(commands::cut_partial());
    }

    stream
}

// ============================================================================
// TESTS
// ============================================================================
