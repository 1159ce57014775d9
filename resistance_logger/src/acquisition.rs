//! The acquisition loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::recorder::{Recorder, RecorderError};
use crate::sample::Sample;
use crate::sources::{CurrentSource, TemperatureSource, VoltageSource};

/// Repeatedly samples all instruments and records the result until told to stop.
///
/// Each tick reads current, temperature, and voltage in that order, strictly one after the other.
/// A failed instrument read drops the tick with an error log and the loop carries on; a failed
/// recorder write is fatal and ends the run with an error.
pub struct AcquisitionLoop<C, T, V> {
    current: C,
    temperature: T,
    voltage: V,
    recorder: Recorder,
    stop: Arc<AtomicBool>,
}

impl<C, T, V> AcquisitionLoop<C, T, V>
where
    C: CurrentSource,
    T: TemperatureSource,
    V: VoltageSource,
{
    /// Create a new acquisition loop.
    ///
    /// # Arguments
    /// * `current` - The excitation current source.
    /// * `temperature` - The temperature source.
    /// * `voltage` - The voltage source.
    /// * `recorder` - The recorder rows are appended to.
    /// * `stop` - Flag that ends the loop at the next tick boundary when set.
    pub fn new(current: C, temperature: T, voltage: V, recorder: Recorder, stop: Arc<AtomicBool>) -> Self {
        AcquisitionLoop {
            current,
            temperature,
            voltage,
            recorder,
            stop,
        }
    }

    /// Run until the stop flag is set or the recorder fails.
    ///
    /// Returns `Ok(())` when stopped via the flag; the current source output is turned off on
    /// both exit paths, best effort.
    pub fn run(&mut self) -> Result<(), RecorderError> {
        let start = Instant::now();
        while !self.stop.load(Ordering::SeqCst) {
            if let Err(err) = self.tick(start) {
                self.current.shutdown();
                return Err(err);
            }
        }
        log::info!("Acquisition interrupted, shutting down");
        self.current.shutdown();
        Ok(())
    }

    /// One loop iteration: read all instruments, print and record the sample.
    ///
    /// A failed instrument read skips the tick without producing a sample.
    fn tick(&mut self, start: Instant) -> Result<(), RecorderError> {
        let current_a = match self.current.read_current() {
            Ok(val) => val,
            Err(err) => {
                log::error!("Current read failed, skipping tick: {err}");
                return Ok(());
            }
        };
        let temperature_c = match self.temperature.read_temperature() {
            Ok(val) => val,
            Err(err) => {
                log::error!("Temperature read failed, skipping tick: {err}");
                return Ok(());
            }
        };
        let voltage_v = match self.voltage.read_voltage() {
            Ok(val) => val,
            Err(err) => {
                log::error!("Voltage read failed, skipping tick: {err}");
                return Ok(());
            }
        };

        let sample = Sample::new(start.elapsed(), current_a, temperature_c, voltage_v);
        println!("{sample}");
        self.recorder.append(&sample)
    }
}
