//! A rust driver for the Keithley 2182 nanovoltmeter.
//!
//! The 2182 is set up for continuous acquisition when the driver is created: the device is reset,
//! the status registers are cleared, continuous initiation is switched on, and the integration
//! time is set to one power-line cycle. After that, [`Keithley2182::read_fresh`] fetches the
//! latest available reading. Note that the instrument may repeatedly return the same reading
//! until a new conversion has finished; how fast new readings arrive depends on the NPLC setting.
//!
//! # Example
//!
//! This example talks to a 2182 behind a GPIB-to-Ethernet bridge.
//! ```no_run
//! use lablink::TcpIpInterface;
//! use keithley_2182::Keithley2182;
//!
//! let interface = TcpIpInterface::try_new("192.168.1.101:1234").unwrap();
//! let mut inst = Keithley2182::try_new(interface).unwrap();
//!
//! println!("Voltage: {} V", inst.read_fresh().unwrap().as_volts());
//! ```

#![deny(warnings, missing_docs)]

use std::sync::{Arc, Mutex};

use lablink::{InstrumentError, InstrumentInterface};

use measurements::Voltage;

/// Smallest integration time the instrument accepts, in power-line cycles.
const NPLC_MIN: f64 = 0.01;
/// Largest integration time the instrument accepts, in power-line cycles (60 Hz mains).
const NPLC_MAX: f64 = 60.0;

/// A rust driver for the Keithley 2182.
///
/// See the top-level documentation for an example on how to use this driver.
pub struct Keithley2182<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> Keithley2182<T> {
    /// Create a new Keithley 2182 instance with the given instrument interface.
    ///
    /// This runs the initialization sequence on the device: reset, status preset, clear event
    /// and error registers, enable continuous initiation, set the integration time to one
    /// power-line cycle, and wait for all commands to complete.
    ///
    /// # Arguments
    /// * `interface` - An instrument interface that implements the [`InstrumentInterface`] trait.
    pub fn try_new(interface: T) -> Result<Self, InstrumentError> {
        let interface = Arc::new(Mutex::new(interface));
        let mut instrument = Keithley2182 { interface };

        instrument.sendcmd("*rst; status:preset; *cls")?;
        instrument.sendcmd(":INIT:CONT ON")?;
        instrument.set_nplc(1.0)?;
        instrument.sendcmd("*WAI")?;

        Ok(instrument)
    }

    /// Query the name of the instrument
    ///
    /// Returns a comma-separated string of manufacturer, model, serial number, and firmware
    /// revision.
    pub fn get_name(&mut self) -> Result<String, InstrumentError> {
        self.query("*IDN?")
    }

    /// Fetch the latest available voltage reading from the instrument.
    ///
    /// This requests the latest "fresh" reading, i.e., the instrument answers as soon as a
    /// reading is available that has not been fetched before, without triggering a new
    /// measurement cycle.
    pub fn read_fresh(&mut self) -> Result<Voltage, InstrumentError> {
        let resp = self.query(":DATA:FRESh?")?;
        let val = resp
            .trim()
            .parse::<f64>()
            .map_err(|_| InstrumentError::ResponseParseError(resp))?;
        Ok(Voltage::from_volts(val))
    }

    /// Set the integration time of the voltage measurement in power-line cycles.
    ///
    /// Larger values trade sample rate for noise rejection. The instrument accepts values
    /// between 0.01 and 50 (50 Hz mains) or 60 (60 Hz mains) cycles; we allow the full 60 cycle
    /// range here.
    ///
    /// # Arguments
    /// * `nplc` - Integration time in power-line cycles.
    pub fn set_nplc(&mut self, nplc: f64) -> Result<(), InstrumentError> {
        if !(NPLC_MIN..=NPLC_MAX).contains(&nplc) {
            return Err(InstrumentError::FloatValueOutOfRange {
                value: nplc,
                min: NPLC_MIN,
                max: NPLC_MAX,
            });
        }
        self.sendcmd(&format!(":SENS:VOLT:NPLC {nplc}"))
    }

    /// Send a command to the instrument.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.sendcmd(cmd)
    }

    /// Query the instrument with a command and return the response as a String.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.query(cmd)
    }
}

impl<T: InstrumentInterface> Clone for Keithley2182<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
        }
    }
}
