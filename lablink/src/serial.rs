//! This module provides the implementation for an instrument controlled via a serial port.
//!
//! It provides blocking serial interfaces built on top of the [`serialport`] crate.

use std::time::Duration;

use serialport::{SerialPort, SerialPortBuilder};

use crate::{Instrument, InstrumentError};

/// Constructors for blocking serial interfaces using the [`serialport`] crate.
#[derive(Debug)]
pub struct SerialInterface {}

impl SerialInterface {
    /// Try to create an [`Instrument`] interface with a simple serial port configuration.
    ///
    /// This opens the port with eight data bits, no parity, one stop bit, and a timeout of three
    /// seconds. If your instrument needs different link parameters, build them with
    /// [`serialport::new`] and pass the builder to [`SerialInterface::full`].
    ///
    /// # Arguments
    /// - `port` - The name of the serial port, e.g., `"/dev/ttyUSB0"` or `"COM3"`.
    /// - `baud_rate` - The baud rate for the communication.
    pub fn simple(
        port: &str,
        baud_rate: u32,
    ) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let spb = serialport::new(port, baud_rate)
            .timeout(Duration::from_secs(3))
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One);
        SerialInterface::full(spb)
    }

    /// Try to create an [`Instrument`] interface from a full serial port configuration.
    ///
    /// The timeout configured on the builder is also used as the response timeout of the
    /// instrument interface.
    ///
    /// # Arguments
    /// - `spb` - A [`serialport::SerialPortBuilder`] to configure the serial port.
    pub fn full(spb: SerialPortBuilder) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let port = spb.open()?;
        let timeout = port.timeout();
        Ok(Instrument::new(port, timeout))
    }
}
