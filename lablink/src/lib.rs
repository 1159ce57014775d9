//! Lablink: talk to your laboratory equipment from Rust.
//!
//! This crate provides the common ground for the instrument drivers in this workspace: an
//! [`InstrumentInterface`] trait that abstracts over the physical link, an [`InstrumentError`]
//! type that all drivers return, and concrete interfaces for the links we actually use.
//!
//! # Currently implemented interfaces
//! - Serial (blocking) using the [`serialport`] crate, behind the `serial` feature.
//! - TCP/IP (blocking) using [`std::net::TcpStream`], e.g. for instruments behind a
//!   GPIB-to-Ethernet bridge.
//! - Loopback interfaces for testing drivers without hardware, both for string based protocols
//!   ([`LoopbackInterfaceString`]) and for binary protocols ([`LoopbackInterfaceBytes`]).
//!
//! A driver only has to deal with its own command set: it takes any type implementing
//! [`InstrumentInterface`] and uses the provided `sendcmd`/`query` methods for line oriented
//! protocols, or `write_raw`/`read_exact` for binary framing.

#![warn(missing_docs)]

mod instrument;
mod loopback;
#[cfg(feature = "serial")]
mod serial;
mod tcp_ip;

pub use instrument::Instrument;
pub use loopback::{LoopbackInterfaceBytes, LoopbackInterfaceString};
#[cfg(feature = "serial")]
pub use serial::SerialInterface;
pub use tcp_ip::TcpIpInterface;

use std::time::{Duration, Instant};

use thiserror::Error;

/// The error enum for all instruments.
///
/// For any command sending or querying, your instrument driver should return either an empty
/// result or a result with the query where this error is the alternative. [`InstrumentError`]
/// makes it easy to propagate sending and querying errors forward with the `?` operator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InstrumentError {
    /// A frame checksum did not match the expected value. The error contains the checksum that
    /// was calculated locally and the one that was received from the instrument.
    #[error("Checksum mismatch: calculated {expected:#06x}, received {received:#06x}")]
    ChecksumMismatch {
        /// The checksum calculated from the received payload.
        expected: u16,
        /// The checksum that the instrument sent.
        received: u16,
    },
    /// A given float value is out of the specified range. The error contains the value that was
    /// sent, the minimum value that is allowed, and the maximum value that is allowed.
    #[error("Float value {value} is out of range. Allowed range is [{min}, {max}]")]
    FloatValueOutOfRange {
        /// The value that is out of range.
        value: f64,
        /// The minimum value that is allowed.
        min: f64,
        /// The maximum value that is allowed.
        max: f64,
    },
    /// Instrument status is not okay, e.g., the instrument answered a request with an error
    /// condition. The contained string is displayed to the user as is, so it must be descriptive
    /// enough on its own.
    #[error("{0}")]
    InstrumentStatus(String),
    /// A given integer value is out of the specified range. The error contains the value that was
    /// sent, the minimum value that is allowed, and the maximum value that is allowed.
    #[error("Integer value {value} is out of range. Allowed range is [{min}, {max}]")]
    IntValueOutOfRange {
        /// The value that is out of range.
        value: i64,
        /// The minimum value that is allowed.
        min: i64,
        /// The maximum value that is allowed.
        max: i64,
    },
    /// Error when reading from/writing to an interface. See [`std::io::Error`] for more details.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Instrument response could not be parsed because it was unexpected by the driver. This
    /// error contains the response that was received from the instrument.
    #[error("Response from instrument could not be parsed. Response was: {0}")]
    ResponseParseError(String),
    #[cfg(feature = "serial")]
    /// Serial port errors can occur when opening a serial interface. See the [`serialport::Error`]
    /// documentation for more information.
    #[error(transparent)]
    Serialport(#[from] serialport::Error),
    /// Timeout occurred while waiting for a response from the instrument. The error contains the
    /// timeout that was exceeded.
    #[error(
        "Timeout occured while waiting for a response from the instrument. Timeout was set to {0:?}."
    )]
    Timeout(Duration),
    /// Timeout occurred while waiting for a response to a query. The error contains the query
    /// that was sent and the timeout that was exceeded.
    #[error(
        "Timeout occured while waiting for a response to query: {query}. Timeout was set to {timeout:?}."
    )]
    TimeoutQuery {
        /// The query that timed out.
        query: String,
        /// The timeout that was set.
        timeout: Duration,
    },
}

/// The `InstrumentInterface` trait defines the interface for controlling instruments.
///
/// Implementors only provide the raw byte transfer via [`InstrumentInterface::read_exact`] and
/// [`InstrumentInterface::write_raw`]. Everything a line oriented driver needs on top of that,
/// i.e., sending terminated commands and reading terminated responses, is provided by default
/// methods. Drivers for binary protocols use the raw methods directly.
pub trait InstrumentInterface {
    /// Read exactly `buf.len()` bytes from the instrument into the given buffer.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError>;

    /// Write raw bytes to the instrument and flush the interface.
    fn write_raw(&mut self, data: &[u8]) -> Result<(), InstrumentError>;

    /// Get the current terminator of the interface.
    fn get_terminator(&self) -> &str {
        "\n"
    }

    /// Set the terminator of an interface from a `&str`.
    ///
    /// # Arguments:
    /// - `_terminator` - A string slice that will be used as the terminator for commands.
    fn set_terminator(&mut self, _terminator: &str) {}

    /// Get the timeout for a full response from the instrument.
    fn get_timeout(&self) -> Duration {
        Duration::from_secs(3)
    }

    /// Send a command to the instrument.
    ///
    /// This function takes the command, appends the terminator, and writes it to the instrument.
    /// The interface is flushed to ensure that the command is sent immediately.
    ///
    /// # Arguments:
    /// - `cmd` - A string slice that will be sent to the instrument.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        let cmd = format!("{cmd}{}", self.get_terminator());
        self.write_raw(cmd.as_bytes())
    }

    /// Write a string to the instrument as is, without appending the terminator.
    fn write(&mut self, data: &str) -> Result<(), InstrumentError> {
        self.write_raw(data.as_bytes())
    }

    /// Read from the instrument until the terminator is found and return the trimmed response.
    ///
    /// The response is read character by character until it ends with the terminator. If no
    /// terminator is encountered within the timeout, a [`InstrumentError::Timeout`] is returned.
    /// If a non-UTF-8 byte is received, an error is printed to stderr and the byte is skipped.
    fn read_until_terminator(&mut self) -> Result<String, InstrumentError> {
        let mut response = String::new();
        let mut single_buf = [0u8];

        let tic = Instant::now();
        while tic.elapsed() < self.get_timeout() {
            self.read_exact(&mut single_buf)?;
            if let Ok(val) = str::from_utf8(&single_buf) {
                response.push_str(val);
            } else {
                eprintln!("Received invalid UTF-8 data: {single_buf:?}");
            }
            if response.ends_with(self.get_terminator()) {
                return Ok(response.trim().to_string());
            }
        }

        Err(InstrumentError::Timeout(self.get_timeout()))
    }

    /// Query the instrument with a command and return the response as a String.
    ///
    /// This function uses `sendcmd` to send the command and then reads the response with
    /// `read_until_terminator`. A timeout while waiting for the response is reported as
    /// [`InstrumentError::TimeoutQuery`], so the user can see which query went unanswered.
    ///
    /// # Arguments
    /// - `cmd` - The command to send to the instrument for which we expect a response.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        self.sendcmd(cmd)?;
        self.read_until_terminator().map_err(|err| match err {
            InstrumentError::Timeout(timeout) => InstrumentError::TimeoutQuery {
                query: cmd.to_string(),
                timeout,
            },
            other => other,
        })
    }
}
