//! This module provides the implementation for an instrument controlled via TCP/IP.
//!
//! It includes a blocking implementation using the [`std::net::TcpStream`] struct. This is the
//! interface to use for instruments that sit behind an Ethernet-to-GPIB or Ethernet-to-serial
//! bridge.

use std::{
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};

use crate::{Instrument, InstrumentError};

/// A blocking TCP/IP interface constructor using the [`std::net::TcpStream`] struct.
#[derive(Debug)]
pub struct TcpIpInterface {}

impl TcpIpInterface {
    /// Try to create a new [`Instrument`] interface over a TCP stream.
    ///
    /// A read and write timeout of three seconds is set on the stream, as infinite blocking is
    /// not wanted for instrument communications. The timeout can be adjusted afterwards with the
    /// `set_timeout` function of the returned [`Instrument`].
    ///
    /// # Arguments
    /// - `sock_addr` - Socket address of the instrument or bridge, e.g., `"192.168.1.101:1234"`.
    pub fn try_new<A: ToSocketAddrs>(
        sock_addr: A,
    ) -> Result<Instrument<TcpStream>, InstrumentError> {
        let stream = TcpStream::connect(sock_addr)?;
        let timeout = Duration::from_secs(3);
        stream.set_write_timeout(Some(timeout))?;
        stream.set_read_timeout(Some(timeout))?;
        Ok(Instrument::new(stream, timeout))
    }
}
