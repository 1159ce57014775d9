//! Instrument adapters for the acquisition loop.
//!
//! The loop itself only deals in plain SI floats; these traits put a thin seam between it and the
//! drivers so the loop can be exercised in tests with scripted fakes and so the current source
//! can be swapped between a live instrument and a static fallback value.

use fuji_pxr4::Pxr4;
use keithley_224::Keithley224;
use keithley_2182::Keithley2182;
use lablink::{InstrumentError, InstrumentInterface};

/// Source of the sample temperature, in degrees Celsius.
pub trait TemperatureSource {
    /// Read the current temperature.
    fn read_temperature(&mut self) -> Result<f64, InstrumentError>;
}

/// Source of the voltage across the sample, in volts.
pub trait VoltageSource {
    /// Read a fresh voltage.
    fn read_voltage(&mut self) -> Result<f64, InstrumentError>;
}

/// Source of the excitation current, in amperes.
pub trait CurrentSource {
    /// Read the current for this iteration.
    fn read_current(&mut self) -> Result<f64, InstrumentError>;

    /// Enable or disable the output; a no-op for sources without one.
    fn set_output(&mut self, _enabled: bool) -> Result<(), InstrumentError> {
        Ok(())
    }

    /// Best-effort cleanup when the acquisition ends.
    fn shutdown(&mut self) {}
}

impl<T: InstrumentInterface> TemperatureSource for Pxr4<T> {
    fn read_temperature(&mut self) -> Result<f64, InstrumentError> {
        Ok(Pxr4::read_temperature(self)?.as_celsius())
    }
}

impl<T: InstrumentInterface> VoltageSource for Keithley2182<T> {
    fn read_voltage(&mut self) -> Result<f64, InstrumentError> {
        Ok(self.read_fresh()?.as_volts())
    }
}

impl<T: InstrumentInterface> CurrentSource for Keithley224<T> {
    fn read_current(&mut self) -> Result<f64, InstrumentError> {
        Ok(Keithley224::read_current(self)?.as_amperes())
    }

    fn set_output(&mut self, enabled: bool) -> Result<(), InstrumentError> {
        Keithley224::set_output(self, enabled)
    }

    fn shutdown(&mut self) {
        if let Err(err) = Keithley224::set_output(self, false) {
            log::warn!("Could not turn off the current source output: {err}");
        }
    }
}

/// A statically configured excitation current.
///
/// Used when no programmable current source is attached; every read returns the configured value.
pub struct FixedCurrent {
    amperes: f64,
}

impl FixedCurrent {
    /// Create a fixed current source with the given value in amperes.
    pub fn new(amperes: f64) -> Self {
        FixedCurrent { amperes }
    }
}

impl CurrentSource for FixedCurrent {
    fn read_current(&mut self) -> Result<f64, InstrumentError> {
        Ok(self.amperes)
    }
}

impl CurrentSource for Box<dyn CurrentSource> {
    fn read_current(&mut self) -> Result<f64, InstrumentError> {
        (**self).read_current()
    }

    fn set_output(&mut self, enabled: bool) -> Result<(), InstrumentError> {
        (**self).set_output(enabled)
    }

    fn shutdown(&mut self) {
        (**self).shutdown()
    }
}
