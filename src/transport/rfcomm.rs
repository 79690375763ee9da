//! # Bluetooth RFCOMM Transport
//!
//! This module delivers command streams to a paired printer over the
//! Bluetooth Serial Port Profile (SPP) via RFCOMM.
//!
//! ## Service Identifier
//!
//! SPP is advertised under the universally reserved UUID
//! [`SPP_UUID`]. On BlueZ the profile is reached by binding an RFCOMM
//! device node to the printer's address on channel 1, the standard SPP
//! channel; connecting to a device therefore means ensuring such a
//! binding exists and opening the `/dev/rfcommN` node.
//!
//! ## Bluetooth Setup (Linux)
//!
//! The printer must be paired before this transport can reach it:
//!
//! ```bash
//! $ bluetoothctl
//! [bluetooth]# scan on
//! # Look for the printer, e.g. "XPrinter T80"
//! # Note the address, e.g. 00:11:62:XX:XX:XX
//! [bluetooth]# pair 00:11:62:XX:XX:XX
//! ```
//!
//! Binding the RFCOMM node (`rfcomm bind`) requires root; the transport
//! reuses an existing binding when one is already present.
//!
//! ## TTY Configuration
//!
//! The RFCOMM device is opened in raw mode so binary command data passes
//! through unmodified:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, etc. disabled
//! - **No output processing**: OPOST disabled (no CR/LF translation)
//! - **8-bit characters**: CS8, no parity
//! - **No echo, non-canonical**: ECHO, ECHONL, ICANON disabled
//!
//! ## Chunked Writes
//!
//! Large streams are written in chunks with a small delay so the printer's
//! Bluetooth buffer is not overrun. The default chunk size is 4096 bytes.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::process::Command;
use std::thread;
use std::time::Duration;

use crate::transport::{Connection, Transport};

/// Serial Port Profile service UUID.
///
/// The fixed, universally reserved identifier for serial port emulation
/// over Bluetooth. Not device-specific and not configurable; on BlueZ it
/// corresponds to RFCOMM channel 1.
pub const SPP_UUID: &str = "00001101-0000-1000-8000-00805F9B34FB";

/// RFCOMM channel implementing SPP on virtually all thermal printers.
pub const SPP_CHANNEL: u8 = 1;

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # RFCOMM Transport
///
/// Connects to paired printers by address over Bluetooth SPP.
///
/// ## Example
///
/// ```no_run
/// use recibo::transport::{Connection, RfcommTransport, Transport};
///
/// let transport = RfcommTransport::new();
/// let mut conn = transport.connect("00:11:62:AA:BB:CC")?;
/// conn.send(&[0x1B, 0x40])?;
/// conn.close()?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct RfcommTransport {
    chunk_size: Option<usize>,
}

impl RfcommTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the chunk size for large writes.
    ///
    /// Larger chunks are faster but may overflow the printer's Bluetooth
    /// buffer. Default is 4096 bytes.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size: Some(chunk_size),
        }
    }
}

impl Transport for RfcommTransport {
    fn connect(&self, address: &str) -> io::Result<Box<dyn Connection>> {
        if !is_valid_mac(address) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid Bluetooth address: {}", address),
            ));
        }

        // Reuse an existing binding when present; rfcomm bind needs root.
        let device_path = match find_rfcomm_for_mac(address)? {
            Some(path) => path,
            None => setup_rfcomm(address, 0)?,
        };

        let file = OpenOptions::new()
            .write(true)
            .open(&device_path)
            .map_err(|e| {
                io::Error::new(e.kind(), format!("Failed to open {}: {}", device_path, e))
            })?;

        configure_tty_raw(file.as_raw_fd())?;

        Ok(Box::new(RfcommConnection {
            file: Some(file),
            chunk_size: self.chunk_size.unwrap_or(CHUNK_SIZE),
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        }))
    }
}

/// An open RFCOMM connection to a printer.
#[derive(Debug)]
pub struct RfcommConnection {
    file: Option<File>,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl Connection for RfcommConnection {
    fn send(&mut self, data: &[u8]) -> io::Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Connection closed"))?;

        if data.len() <= self.chunk_size {
            file.write_all(data)
                .map_err(|e| io::Error::new(e.kind(), format!("Write failed: {}", e)))?;
        } else {
            for chunk in data.chunks(self.chunk_size) {
                file.write_all(chunk)
                    .map_err(|e| io::Error::new(e.kind(), format!("Write failed: {}", e)))?;

                if !self.chunk_delay.is_zero() {
                    thread::sleep(self.chunk_delay);
                }
            }
        }

        file.flush()
            .map_err(|e| io::Error::new(e.kind(), format!("Flush failed: {}", e)))
    }

    fn close(&mut self) -> io::Result<()> {
        // Dropping the File closes the fd; surface flush errors first.
        match self.file.take() {
            Some(mut file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Configure a file descriptor for raw TTY mode.
///
/// Disables all input/output processing so binary data passes through
/// unmodified. IXON/IXOFF/IXANY matter most here: 0x11 (XON) and 0x13
/// (XOFF) are valid GS ! size parameters and must not be eaten by
/// software flow control.
#[cfg(unix)]
fn configure_tty_raw(fd: i32) -> io::Result<()> {
    use std::mem::MaybeUninit;

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(io::Error::other(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    // Input flags: disable all processing including XON/XOFF flow control
    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    // Output flags: disable post-processing
    termios.c_oflag &= !libc::OPOST;

    // Local flags: disable echo, canonical mode, signals
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    // Control flags: 8-bit characters, no parity
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(io::Error::other(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_fd: i32) -> io::Result<()> {
    Ok(())
}

// ============================================================================
// RFCOMM SETUP HELPERS
// ============================================================================

/// Validate a Bluetooth MAC address format (XX:XX:XX:XX:XX:XX).
fn is_valid_mac(mac: &str) -> bool {
    crate::device::is_valid_mac(mac)
}

/// Find an existing RFCOMM device bound to the given MAC address.
///
/// Checks `/proc/net/rfcomm` and falls back to the `rfcomm -a` command.
/// Returns the device path (e.g., "/dev/rfcomm0") if found.
#[cfg(unix)]
fn find_rfcomm_for_mac(mac: &str) -> io::Result<Option<String>> {
    let mac_upper = mac.to_uppercase();

    // Try /proc/net/rfcomm first (format: "rfcomm0: XX:XX:XX:XX:XX:XX channel N ...")
    if let Ok(contents) = fs::read_to_string("/proc/net/rfcomm") {
        if let Some(path) = scan_rfcomm_listing(&contents, &mac_upper) {
            return Ok(Some(path));
        }
    }

    // Fallback: rfcomm -a command
    let output = Command::new("rfcomm").arg("-a").output().map_err(|e| {
        io::Error::new(e.kind(), format!("Failed to run 'rfcomm -a': {}", e))
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(scan_rfcomm_listing(&stdout, &mac_upper))
}

#[cfg(not(unix))]
fn find_rfcomm_for_mac(_mac: &str) -> io::Result<Option<String>> {
    Ok(None)
}

/// Scan an rfcomm listing for a device bound to `mac_upper`.
fn scan_rfcomm_listing(listing: &str, mac_upper: &str) -> Option<String> {
    for line in listing.lines() {
        if line.to_uppercase().contains(mac_upper) {
            if let Some(dev_name) = line.split(':').next() {
                let device_path = format!("/dev/{}", dev_name.trim());
                if Path::new(&device_path).exists() {
                    return Some(device_path);
                }
            }
        }
    }
    None
}

/// Set up an RFCOMM device for a Bluetooth MAC address.
///
/// Runs:
/// 1. `bluetoothctl connect <MAC>` - connect to the device
/// 2. `rfcomm bind <N> <MAC> 1` - create /dev/rfcommN on the SPP channel
///
/// Returns the device path on success (e.g., "/dev/rfcomm0").
///
/// **Requires root privileges** for `rfcomm bind`.
#[cfg(unix)]
fn setup_rfcomm(mac: &str, rfcomm_index: u8) -> io::Result<String> {
    let mac_upper = mac.to_uppercase();
    let device_path = format!("/dev/rfcomm{}", rfcomm_index);

    // Step 1: Connect via bluetoothctl (may fail if already connected, that's ok)
    eprintln!("Connecting to {}...", mac_upper);
    let output = Command::new("bluetoothctl")
        .arg("connect")
        .arg(&mac_upper)
        .output()
        .map_err(|e| io::Error::new(e.kind(), format!("Failed to run bluetoothctl: {}", e)))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.contains("Connection successful") || stdout.contains("already connected") {
        eprintln!("Connected.");
    } else {
        eprintln!("bluetoothctl returned: {}", stdout.trim());
        // Continue anyway - rfcomm bind will surface a real failure
    }

    // Small delay for the link to stabilize
    thread::sleep(Duration::from_millis(500));

    // Step 2: Bind RFCOMM on the SPP channel
    eprintln!("Binding rfcomm{}...", rfcomm_index);
    let output = Command::new("rfcomm")
        .arg("bind")
        .arg(rfcomm_index.to_string())
        .arg(&mac_upper)
        .arg(SPP_CHANNEL.to_string())
        .output()
        .map_err(|e| io::Error::new(e.kind(), format!("Failed to run rfcomm bind: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            format!("rfcomm bind failed: {}", stderr.trim()),
        ));
    }

    // Wait for the device node to appear
    thread::sleep(Duration::from_millis(500));

    if !Path::new(&device_path).exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Device {} was not created", device_path),
        ));
    }

    eprintln!("Created {}", device_path);
    Ok(device_path)
}

#[cfg(not(unix))]
fn setup_rfcomm(_mac: &str, _rfcomm_index: u8) -> io::Result<String> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "RFCOMM setup not supported on this platform",
    ))
}

// ============================================================================
// TESTS
// ============================================================================
