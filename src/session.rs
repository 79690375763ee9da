//! # Print Session
//!
//! One connect-send-disconnect cycle against a selected printer.
//!
//! A session is a strictly sequential state machine over a single
//! transport connection:
//!
//! ```text
//! Idle -> Connecting -> Encoding -> Sending -> Closing -> Done
//!              |                       |
//!              v                       v
//!           Failed                  Failed
//! ```
//!
//! Single attempt, no retries, no re-entry: each invocation constructs a
//! fresh session, runs synchronously to a terminal state, and discards
//! the connection. Concurrent invocations are not coordinated here; each
//! opens its own connection and the radio stack arbitrates.
//!
//! Cleanup is best-effort on every path: a failed close never masks the
//! original write error, and a failed close after a successful send does
//! not demote the result: the job is committed once the bytes are
//! flushed.

use crate::device::Peripheral;
use crate::error::PrintError;
use crate::receipt::{self, PrintRequest};
use crate::transport::Transport;

/// Session lifecycle state.
///
/// Observable for diagnostics; [`PrintSession::print`] drives the machine
/// to [`SessionState::Done`] or [`SessionState::Failed`] and never
/// re-enters a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connecting,
    Encoding,
    Sending,
    Closing,
    Done,
    Failed,
}

/// A single print invocation against one transport.
pub struct PrintSession<'t> {
    transport: &'t dyn Transport,
    state: SessionState,
}

impl<'t> PrintSession<'t> {
    /// Create a fresh session in the idle state.
    pub fn new(transport: &'t dyn Transport) -> Self {
        Self {
            transport,
            state: SessionState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run the full connect-encode-send-close cycle for one request.
    ///
    /// Blocking; returns once a terminal state is reached. Failure kinds:
    ///
    /// - [`PrintError::Connect`]: the transport could not reach the
    ///   device; no write was attempted.
    /// - [`PrintError::Write`]: the transfer failed after connecting;
    ///   the connection is force-closed as cleanup.
    pub fn print(
        &mut self,
        device: &Peripheral,
        request: &PrintRequest,
    ) -> Result<(), PrintError> {
        self.state = SessionState::Connecting;
        let mut conn = self
            .transport
            .connect(&device.address)
            .map_err(|e| self.fail(PrintError::Connect(e.to_string())))?;

        // Pure in-memory transformation; cannot fail.
        self.state = SessionState::Encoding;
        let stream = receipt::encode(request);

        self.state = SessionState::Sending;
        if let Err(e) = conn.send(&stream) {
            // Best-effort cleanup; never overrides the write failure.
            if let Err(close_err) = conn.close() {
                eprintln!("Ignoring close failure after write error: {}", close_err);
            }
            return Err(self.fail(PrintError::Write(e.to_string())));
        }

        // Bytes are flushed; the job is committed. A failing close is
        // reported but does not demote the result.
        self.state = SessionState::Closing;
        if let Err(close_err) = conn.close() {
            eprintln!("Ignoring close failure after successful send: {}", close_err);
        }

        self.state = SessionState::Done;
        Ok(())
    }

    fn fail(&mut self, err: PrintError) -> PrintError {
        self.state = SessionState::Failed;
        err
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Connection;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    /// Shared recording of everything a mock transport observed.
    #[derive(Debug, Default)]
    struct Log {
        connects: Vec<String>,
        sent: Vec<Vec<u8>>,
        closes: usize,
    }

    struct MockTransport {
        log: Rc<RefCell<Log>>,
        refuse_connect: bool,
        fail_send: bool,
        fail_close: bool,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                log: Rc::new(RefCell::new(Log::default())),
                refuse_connect: false,
                fail_send: false,
                fail_close: false,
            }
        }
    }

    #[derive(Debug)]
    struct MockConnection {
        log: Rc<RefCell<Log>>,
        fail_send: bool,
        fail_close: bool,
    }

    impl Transport for MockTransport {
        fn connect(&self, address: &str) -> io::Result<Box<dyn Connection>> {
            if self.refuse_connect {
                return Err(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "device out of range",
                ));
            }
            self.log.borrow_mut().connects.push(address.to_string());
            Ok(Box::new(MockConnection {
                log: Rc::clone(&self.log),
                fail_send: self.fail_send,
                fail_close: self.fail_close,
            }))
        }
    }

    impl Connection for MockConnection {
        fn send(&mut self, data: &[u8]) -> io::Result<()> {
            if self.fail_send {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "link dropped"));
            }
            self.log.borrow_mut().sent.push(data.to_vec());
            Ok(())
        }

        fn close(&mut self) -> io::Result<()> {
            self.log.borrow_mut().closes += 1;
            if self.fail_close {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "close failed"));
            }
            Ok(())
        }
    }

    fn printer() -> Peripheral {
        Peripheral {
            address: "BB:BB:BB:BB:BB:BB".to_string(),
            name: Some("XPrinter T80".to_string()),
        }
    }

    #[test]
    fn test_successful_print_reaches_done() {
        let transport = MockTransport::new();
        let mut session = PrintSession::new(&transport);

        session
            .print(&printer(), &PrintRequest::with_text("Hello"))
            .unwrap();

        assert_eq!(session.state(), SessionState::Done);
        let log = transport.log.borrow();
        assert_eq!(log.connects, vec!["BB:BB:BB:BB:BB:BB".to_string()]);
        assert_eq!(log.sent.len(), 1);
        assert_eq!(log.closes, 1);
    }

    #[test]
    fn test_full_stream_sent_in_one_write() {
        let transport = MockTransport::new();
        let request = PrintRequest::with_text("Hello");
        let mut session = PrintSession::new(&transport);
        session.print(&printer(), &request).unwrap();

        let log = transport.log.borrow();
        assert_eq!(log.sent[0], receipt::encode(&request));
    }

    #[test]
    fn test_connect_failure_attempts_no_write() {
        let transport = MockTransport {
            refuse_connect: true,
            ..MockTransport::new()
        };
        let mut session = PrintSession::new(&transport);

        let err = session
            .print(&printer(), &PrintRequest::default())
            .unwrap_err();

        assert_eq!(err.code(), "CONNECT_ERROR");
        assert_eq!(session.state(), SessionState::Failed);
        let log = transport.log.borrow();
        assert!(log.sent.is_empty());
        assert_eq!(log.closes, 0);
    }

    #[test]
    fn test_write_failure_closes_exactly_once() {
        let transport = MockTransport {
            fail_send: true,
            ..MockTransport::new()
        };
        let mut session = PrintSession::new(&transport);

        let err = session
            .print(&printer(), &PrintRequest::default())
            .unwrap_err();

        assert_eq!(err.code(), "WRITE_ERROR");
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(transport.log.borrow().closes, 1);
    }

    #[test]
    fn test_close_failure_never_masks_write_error() {
        let transport = MockTransport {
            fail_send: true,
            fail_close: true,
            ..MockTransport::new()
        };
        let mut session = PrintSession::new(&transport);

        let err = session
            .print(&printer(), &PrintRequest::default())
            .unwrap_err();

        assert_eq!(err.code(), "WRITE_ERROR");
    }

    #[test]
    fn test_close_failure_does_not_demote_success() {
        let transport = MockTransport {
            fail_close: true,
            ..MockTransport::new()
        };
        let mut session = PrintSession::new(&transport);

        session
            .print(&printer(), &PrintRequest::default())
            .unwrap();

        assert_eq!(session.state(), SessionState::Done);
    }
}
