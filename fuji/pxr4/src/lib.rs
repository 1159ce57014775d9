//! A rust driver for the Fuji PXR4 temperature controller.
//!
//! The PXR4 talks Modbus RTU over its serial port. This driver implements the read-registers
//! subset the controller needs for monitoring: it builds request frames with CRC-16/MODBUS,
//! validates the responses, and scales register values by the decimal factor the instrument
//! documentation specifies per register.
//!
//! # Example
//!
//! This example shows the usage via the serial interface.
//! ```no_run
//! use fuji_pxr4::{Pxr4, SerialInterfacePxr4};
//!
//! // The port where the PXR4 is connected to
//! let port = "/dev/ttyUSB0";
//!
//! // Get the serial interface for the PXR4 and open it. This interface already sets the correct
//! // baud rate, parity, stop bits, and timeout for communication with the PXR4.
//! let serial_inst = SerialInterfacePxr4::simple(port).expect("Failed to open serial port");
//! let mut inst = Pxr4::try_new(serial_inst, 1).unwrap();
//!
//! // Print the current process value
//! println!("Temperature: {:?}", inst.read_temperature());
//! ```

#![deny(warnings, missing_docs)]

mod frame;
mod response;

pub use frame::FunctionCode;

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use lablink::{Instrument, InstrumentError, InstrumentInterface, SerialInterface};

use measurements::Temperature;

use serialport::SerialPort;

use crate::{frame::RequestFrame, response::ResponseFrame};

/// Register address of the process value (the measured temperature).
const PROCESS_VALUE_REGISTER: u16 = 0;

/// Decimal scaling of the process value register: one decimal, i.e., tenths of a degree.
const PROCESS_VALUE_DECIMALS: u8 = 1;

/// A SerialInterface for the Fuji PXR4.
///
/// Builds a lablink SerialInterface with the correct link parameters for communication with the
/// PXR4.
#[derive(Debug)]
pub struct SerialInterfacePxr4 {}

impl SerialInterfacePxr4 {
    /// Try to create an Instrument interface with a simple serial port configuration.
    ///
    /// This is analog to the `simple` method of the `SerialInterface` struct in `lablink`,
    /// however, it sets the link parameters the PXR4 ships with: 9600 baud, eight data bits, no
    /// parity, one stop bit. The timeout is set to 1 second.
    ///
    /// Arguments:
    /// * `port` - The name of the serial port, e.g., `"/dev/ttyUSB0"` or `"COM3"`.
    pub fn simple(port: &str) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let timeout = Duration::from_secs(1);
        let port = serialport::new(port, 9600)
            .timeout(timeout)
            .parity(serialport::Parity::None)
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One);
        SerialInterface::full(port)
    }
}

/// A rust driver for the Fuji PXR4.
///
/// See the top-level documentation for an example on how to use this driver.
pub struct Pxr4<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
    slave_address: u8,
}

impl<T: InstrumentInterface> Pxr4<T> {
    /// Create a new PXR4 instance with the given instrument interface.
    ///
    /// # Arguments
    /// * `interface` - An instrument interface that implements the [`InstrumentInterface`] trait.
    /// * `slave_address` - The Modbus station number configured on the instrument, 1 to 247.
    pub fn try_new(interface: T, slave_address: u8) -> Result<Self, InstrumentError> {
        if !(1..=247).contains(&slave_address) {
            return Err(InstrumentError::IntValueOutOfRange {
                value: i64::from(slave_address),
                min: 1,
                max: 247,
            });
        }
        let interface = Arc::new(Mutex::new(interface));

        Ok(Pxr4 {
            interface,
            slave_address,
        })
    }

    /// Get the current temperature reading (the process value) of the instrument.
    pub fn read_temperature(&mut self) -> Result<Temperature, InstrumentError> {
        let value = self.read_register(
            PROCESS_VALUE_REGISTER,
            PROCESS_VALUE_DECIMALS,
            FunctionCode::ReadInputRegisters,
        )?;
        Ok(Temperature::from_celsius(value))
    }

    /// Read a single register and scale it by the given number of decimals.
    ///
    /// The register content is transferred as an unsigned 16-bit integer and divided by
    /// `10^decimals`, which is how the PXR4 stores fractional values.
    ///
    /// # Arguments
    /// * `register_address` - Address of the register to read.
    /// * `decimals` - Number of decimals the register value is stored with.
    /// * `function` - Which register bank to read from, see [`FunctionCode`].
    pub fn read_register(
        &mut self,
        register_address: u16,
        decimals: u8,
        function: FunctionCode,
    ) -> Result<f64, InstrumentError> {
        let request = RequestFrame::read_registers(self.slave_address, function, register_address, 1);

        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.write_raw(&request.to_bytes())?;
        let response = ResponseFrame::read(&mut *intf, self.slave_address, function.as_u8())?;

        let raw = response.register(0)?;
        Ok(f64::from(raw) / 10f64.powi(i32::from(decimals)))
    }
}

impl<T: InstrumentInterface> Clone for Pxr4<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
            slave_address: self.slave_address,
        }
    }
}
