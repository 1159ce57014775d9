//! A rust driver for the Keithley 224 programmable current source.
//!
//! The 224 predates SCPI: it is programmed with single-letter device-dependent commands
//! terminated by an execute character (`X`), and it answers a read request with a machine status
//! string of comma-separated tag-value fields, e.g.
//! `NDCI+1.0000E-04,V+10.00,W+2.0E-02` for the current, the compliance voltage, and the dwell
//! time.
//!
//! **Note**: live readback from this instrument is considered experimental. The hardware this
//! driver was written against showed output voltages under remote operation that differed from
//! manual operation, so the resistance logger in this workspace defaults to a statically
//! configured current instead of live readback. The driver is kept complete so the integration
//! can be switched on once the behavior is verified.
//!
//! # Example
//!
//! ```no_run
//! use lablink::TcpIpInterface;
//! use keithley_224::Keithley224;
//! use measurements::Current;
//!
//! let interface = TcpIpInterface::try_new("192.168.1.102:1234").unwrap();
//! let mut inst = Keithley224::new(interface);
//!
//! inst.set_current(Current::from_amperes(100e-6)).unwrap();
//! inst.set_output(true).unwrap();
//! ```

#![deny(warnings, missing_docs)]

use std::sync::{Arc, Mutex};

use lablink::{InstrumentError, InstrumentInterface};

use measurements::Current;

/// Largest magnitude the instrument can source, in amperes (101.1 mA).
const CURRENT_MAX_A: f64 = 0.1011;

/// A rust driver for the Keithley 224.
///
/// See the top-level documentation for an example on how to use this driver.
pub struct Keithley224<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> Keithley224<T> {
    /// Create a new Keithley 224 instance with the given instrument interface.
    ///
    /// No commands are sent on creation; the instrument keeps its front-panel settings until
    /// they are overwritten.
    ///
    /// # Arguments
    /// * `interface` - An instrument interface that implements the [`InstrumentInterface`] trait.
    pub fn new(interface: T) -> Self {
        let interface = Arc::new(Mutex::new(interface));
        Keithley224 { interface }
    }

    /// Turn the output on or off.
    pub fn set_output(&mut self, enabled: bool) -> Result<(), InstrumentError> {
        let cmd = if enabled { "F1X" } else { "F0X" };
        self.sendcmd(cmd)
    }

    /// Program the source current.
    ///
    /// # Arguments
    /// * `current` - The current to source; magnitude up to 101.1 mA.
    pub fn set_current(&mut self, current: Current) -> Result<(), InstrumentError> {
        let amperes = current.as_amperes();
        if !(-CURRENT_MAX_A..=CURRENT_MAX_A).contains(&amperes) {
            return Err(InstrumentError::FloatValueOutOfRange {
                value: amperes,
                min: -CURRENT_MAX_A,
                max: CURRENT_MAX_A,
            });
        }
        self.sendcmd(&format!("I{amperes}X"))
    }

    /// Read the programmed current back from the machine status output.
    ///
    /// The status string carries comma-separated fields; the field tagged `DCI` holds the
    /// current, prefixed by a four character tag (e.g. `NDCI` for a normal reading). A status
    /// string without a parseable `DCI` field is a parse error.
    pub fn read_current(&mut self) -> Result<Current, InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        let status = intf.read_until_terminator()?;

        let field = status
            .split(',')
            .find(|part| part.contains("DCI"))
            .ok_or_else(|| InstrumentError::ResponseParseError(status.clone()))?;
        let amperes = field
            .get(4..)
            .and_then(|val| val.parse::<f64>().ok())
            .ok_or_else(|| InstrumentError::ResponseParseError(status.clone()))?;
        Ok(Current::from_amperes(amperes))
    }

    /// Send a command to the instrument.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.sendcmd(cmd)
    }
}

impl<T: InstrumentInterface> Clone for Keithley224<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
        }
    }
}
