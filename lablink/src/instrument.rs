//! This module provides the main implementation of the [`InstrumentInterface`] trait.
//!
//! It can be wrapped around any type that implements [`std::io::Read`] and [`std::io::Write`],
//! such as [`std::net::TcpStream`] or [`serialport::SerialPort`].

use std::time::Duration;

use crate::{InstrumentError, InstrumentInterface};

/// A general instrument interface that can be built from any port that implements
/// [`std::io::Read`] and [`std::io::Write`].
///
/// Handy shortcuts for creating the interfaces used in this workspace are provided by
/// [`crate::SerialInterface`] and [`crate::TcpIpInterface`]. This general implementation can also
/// be used with any other type that speaks `Read` and `Write`.
///
/// # Example
///
/// ```no_run
/// use std::{net::TcpStream, time::Duration};
///
/// use lablink::Instrument;
///
/// let my_port = TcpStream::connect("192.168.10.1:8000").unwrap();
/// let interface = Instrument::new(my_port, Duration::from_secs(3));
/// ```
pub struct Instrument<P: std::io::Read + std::io::Write> {
    port: P,
    terminator: String,
    timeout: Duration,
}

impl<P: std::io::Read + std::io::Write> Instrument<P> {
    /// Create a new instance of [`Instrument`] with a given port.
    ///
    /// The terminator defaults to `"\n"` and can be changed with `set_terminator`.
    pub fn new(port: P, timeout: Duration) -> Self {
        Self {
            port,
            terminator: "\n".to_string(),
            timeout,
        }
    }

    /// Set the timeout for a full response from the instrument.
    ///
    /// Note that this only adjusts the deadline used by `read_until_terminator`; a timeout of
    /// the underlying port itself, e.g., of a serial port, is configured when the port is opened.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }
}

impl<P: std::io::Read + std::io::Write> InstrumentInterface for Instrument<P> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError> {
        self.port.read_exact(buf)?;
        Ok(())
    }

    fn get_terminator(&self) -> &str {
        self.terminator.as_str()
    }

    fn set_terminator(&mut self, terminator: &str) {
        self.terminator = terminator.to_string();
    }

    fn get_timeout(&self) -> Duration {
        self.timeout
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<(), InstrumentError> {
        self.port.write_all(data)?;
        self.port.flush()?;
        Ok(())
    }
}
