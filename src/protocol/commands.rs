//! # ESC/POS Protocol Commands
//!
//! This module implements the ESC/POS command subset used by generic
//! thermal receipt printers.
//!
//! ## Protocol Overview
//!
//! ESC/POS is a byte-oriented protocol where commands are short binary
//! escape sequences interleaved with printable text. The subset here
//! covers:
//!
//! - **Initialization**: reset to power-on defaults
//! - **Character set**: code page selection
//! - **Text size**: width/height multipliers
//! - **Paper control**: line feeds, partial cut
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC t n`, `GS ! n`, `GS V A n`
//!
//! ## Compatibility Note
//!
//! Clone firmware silently ignores unsupported control sequences, so a
//! fixed command stream prints acceptably across printer families; only
//! the cut may be skipped on cutterless hardware.

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B). This byte signals the start
/// of a control sequence rather than printable text.
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Prefix for character-size and cutter commands:
/// - Hex: 0x1D, Decimal: 29
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
///
/// Prints any data in the line buffer and advances paper by the current
/// line spacing amount.
pub const LF: u8 = 0x0A;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state. Sent at the start of
/// each print job to clear any mode left over from a previous caller.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## What Gets Reset
///
/// - Print buffer is cleared
/// - Text formatting (bold, underline, invert) disabled
/// - Character size reset to 1x1
/// - Line spacing reset to default
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// let init = commands::init();
/// assert_eq!(init, vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CHARACTER SET COMMANDS
// ============================================================================

/// # Select Character Code Table (ESC t n)
///
/// Selects the code page used to render bytes above 0x7F.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC t n  |
/// | Hex     | 1B 74 n  |
/// | Decimal | 27 116 n |
///
/// ## Parameters
///
/// - `n`: code page number. Page 0 (PC437) is the power-on default and the
///   page selected for every print job here; ASCII text and UTF-8 payloads
///   pass through it unchanged for the 7-bit range.
#[inline]
pub fn codepage(n: u8) -> Vec<u8> {
    vec![ESC, b't', n]
}

// ============================================================================
// CHARACTER SIZE COMMANDS
// ============================================================================

/// # Select Character Size (GS ! n)
///
/// Sets width and height multipliers for all following text.
///
/// ## Protocol Details
///
/// | Format  | Bytes   |
/// |---------|---------|
/// | ASCII   | GS ! n  |
/// | Hex     | 1D 21 n |
/// | Decimal | 29 33 n |
///
/// ## Parameters
///
/// `n` packs both multipliers into one byte:
/// - High nibble: width multiplier minus one (0-7)
/// - Low nibble: height multiplier minus one (0-7)
///
/// | n    | Effect                  |
/// |------|-------------------------|
/// | 0x00 | Normal (1x1)            |
/// | 0x01 | Double height           |
/// | 0x10 | Double width            |
/// | 0x11 | Double width and height |
#[inline]
pub fn size(n: u8) -> Vec<u8> {
    vec![GS, b'!', n]
}

/// Normal character size (GS ! 0x00)
#[inline]
pub fn size_normal() -> Vec<u8> {
    size(0x00)
}

/// Double width and height (GS ! 0x11)
///
/// The default emphasis for print jobs that specify no explicit size;
/// receipt text on 58mm paper is hard to read at 1x1.
#[inline]
pub fn size_double() -> Vec<u8> {
    size(0x11)
}

/// Double width only (GS ! 0x10)
#[inline]
pub fn size_double_width() -> Vec<u8> {
    size(0x10)
}

/// Double height only (GS ! 0x01)
#[inline]
pub fn size_double_height() -> Vec<u8> {
    size(0x01)
}

// ============================================================================
// PAPER FEED COMMANDS
// ============================================================================

/// # Feed n Lines (LF repeated)
///
/// Emits `n` line-feed bytes. Three trailing feeds clear the print head
/// past the last printed line before cutting.
///
/// ## Protocol Details
///
/// | Format  | Bytes  |
/// |---------|--------|
/// | ASCII   | LF ... |
/// | Hex     | 0A ... |
///
/// ## Example
///
/// ```
/// use recibo::protocol::commands;
///
/// assert_eq!(commands::feed(3), vec![0x0A, 0x0A, 0x0A]);
/// ```
#[inline]
pub fn feed(n: usize) -> Vec<u8> {
    vec![LF; n]
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Feed and Partial Cut (GS V A n)
///
/// Feeds paper forward by `n` motion units, then performs a partial cut
/// (leaves a small uncut hinge so the receipt doesn't fall).
///
/// ## Protocol Details
///
/// | Format  | Bytes       |
/// |---------|-------------|
/// | ASCII   | GS V A 16   |
/// | Hex     | 1D 56 41 10 |
/// | Decimal | 29 86 65 16 |
///
/// ## Behavior
///
/// - Prints any pending data in the line buffer
/// - Feeds 16 motion units so the last line is past the cutter
/// - Performs partial cut
/// - Cutterless printers ignore the sequence without error
#[inline]
pub fn cut_partial() -> Vec<u8> {
    vec![GS, b'V', b'A', 0x10]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_codepage() {
        assert_eq!(codepage(0), vec![0x1B, 0x74, 0x00]);
        assert_eq!(codepage(16), vec![0x1B, 0x74, 0x10]);
    }

    #[test]
    fn test_size_presets() {
        assert_eq!(size_normal(), vec![0x1D, 0x21, 0x00]);
        assert_eq!(size_double(), vec![0x1D, 0x21, 0x11]);
        assert_eq!(size_double_width(), vec![0x1D, 0x21, 0x10]);
        assert_eq!(size_double_height(), vec![0x1D, 0x21, 0x01]);
    }

    #[test]
    fn test_feed() {
        assert_eq!(feed(0), Vec::<u8>::new());
        assert_eq!(feed(3), vec![0x0A, 0x0A, 0x0A]);
    }

    #[test]
    fn test_cut_partial() {
        assert_eq!(cut_partial(), vec![0x1D, 0x56, 0x41, 0x10]);
    }
}
