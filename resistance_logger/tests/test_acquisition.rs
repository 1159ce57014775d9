//! Tests for the acquisition loop, driven by scripted instrument fakes.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rstest::*;
use tempfile::TempDir;

use lablink::InstrumentError;

use resistance_logger::acquisition::AcquisitionLoop;
use resistance_logger::recorder::Recorder;
use resistance_logger::sources::{CurrentSource, TemperatureSource, VoltageSource};

/// A scripted reading source: hands out the queued results in order and raises the stop flag once
/// its queue runs dry, so the loop ends after the scripted ticks.
struct Scripted {
    readings: VecDeque<Result<f64, InstrumentError>>,
    stop: Arc<AtomicBool>,
}

impl Scripted {
    fn new(readings: Vec<Result<f64, InstrumentError>>, stop: &Arc<AtomicBool>) -> Self {
        Scripted {
            readings: readings.into(),
            stop: stop.clone(),
        }
    }

    fn next(&mut self) -> Result<f64, InstrumentError> {
        let reading = self.readings.pop_front().expect("Reading script exhausted");
        if self.readings.is_empty() {
            self.stop.store(true, Ordering::SeqCst);
        }
        reading
    }
}

struct ScriptedCurrent {
    script: Scripted,
    shutdown_called: Arc<AtomicBool>,
}

impl CurrentSource for ScriptedCurrent {
    fn read_current(&mut self) -> Result<f64, InstrumentError> {
        self.script.next()
    }

    fn shutdown(&mut self) {
        self.shutdown_called.store(true, Ordering::SeqCst);
    }
}

struct ScriptedTemperature(Scripted);

impl TemperatureSource for ScriptedTemperature {
    fn read_temperature(&mut self) -> Result<f64, InstrumentError> {
        self.0.next()
    }
}

struct ScriptedVoltage(Scripted);

impl VoltageSource for ScriptedVoltage {
    fn read_voltage(&mut self) -> Result<f64, InstrumentError> {
        self.0.next()
    }
}

fn timeout_err() -> Result<f64, InstrumentError> {
    Err(InstrumentError::Timeout(Duration::from_secs(1)))
}

/// Data rows of the log file, header stripped.
fn data_rows(path: &Path) -> Vec<Vec<String>> {
    let content = fs::read_to_string(path).unwrap();
    content
        .lines()
        .skip(1)
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}

/// Three clean ticks record three rows with the expected resistance and non-decreasing elapsed
/// time, and the current source is shut down on exit.
#[rstest]
fn test_records_one_row_per_tick() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.csv");
    let stop = Arc::new(AtomicBool::new(false));
    let shutdown_called = Arc::new(AtomicBool::new(false));

    let current = ScriptedCurrent {
        script: Scripted::new(vec![Ok(100e-6), Ok(100e-6), Ok(100e-6)], &stop),
        shutdown_called: shutdown_called.clone(),
    };
    let temperature = ScriptedTemperature(Scripted::new(vec![Ok(25.3), Ok(25.3), Ok(25.3)], &stop));
    let voltage = ScriptedVoltage(Scripted::new(vec![Ok(0.05), Ok(0.05), Ok(0.05)], &stop));
    let recorder = Recorder::create(&path).unwrap();

    AcquisitionLoop::new(current, temperature, voltage, recorder, stop)
        .run()
        .unwrap();

    let rows = data_rows(&path);
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row[1], "0.0001");
        assert_eq!(row[2], "25.3");
        assert_eq!(row[3], "0.05");
        assert_eq!(row[4], "500");
    }
    let elapsed: Vec<f64> = rows.iter().map(|row| row[0].parse().unwrap()).collect();
    assert!(elapsed.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(shutdown_called.load(Ordering::SeqCst));
}

/// A failed temperature read drops that tick without a fabricated row; the loop carries on.
#[rstest]
fn test_failed_read_skips_tick() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.csv");
    let stop = Arc::new(AtomicBool::new(false));

    let current = ScriptedCurrent {
        script: Scripted::new(vec![Ok(100e-6), Ok(100e-6), Ok(100e-6)], &stop),
        shutdown_called: Arc::new(AtomicBool::new(false)),
    };
    let temperature =
        ScriptedTemperature(Scripted::new(vec![Ok(25.3), timeout_err(), Ok(26.0)], &stop));
    let voltage = ScriptedVoltage(Scripted::new(vec![Ok(0.05), Ok(0.06)], &stop));
    let recorder = Recorder::create(&path).unwrap();

    AcquisitionLoop::new(current, temperature, voltage, recorder, stop)
        .run()
        .unwrap();

    let rows = data_rows(&path);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][2], "25.3");
    assert_eq!(rows[1][2], "26");
}

/// A recorder failure is fatal: the run ends with an error and the current source is still shut
/// down.
#[rstest]
fn test_recorder_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.csv");
    let stop = Arc::new(AtomicBool::new(false));
    let shutdown_called = Arc::new(AtomicBool::new(false));

    let current = ScriptedCurrent {
        script: Scripted::new(vec![Ok(100e-6), Ok(100e-6)], &stop),
        shutdown_called: shutdown_called.clone(),
    };
    let temperature = ScriptedTemperature(Scripted::new(vec![Ok(25.3), Ok(25.3)], &stop));
    let voltage = ScriptedVoltage(Scripted::new(vec![Ok(0.05), Ok(0.05)], &stop));
    let recorder = Recorder::create(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let result = AcquisitionLoop::new(current, temperature, voltage, recorder, stop).run();

    assert!(result.is_err());
    assert!(shutdown_called.load(Ordering::SeqCst));
}

/// A stop flag raised before the first tick ends the run cleanly with no rows recorded.
#[rstest]
fn test_interrupt_before_first_tick() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.csv");
    let stop = Arc::new(AtomicBool::new(true));
    let shutdown_called = Arc::new(AtomicBool::new(false));

    let current = ScriptedCurrent {
        script: Scripted::new(vec![], &stop),
        shutdown_called: shutdown_called.clone(),
    };
    let temperature = ScriptedTemperature(Scripted::new(vec![], &stop));
    let voltage = ScriptedVoltage(Scripted::new(vec![], &stop));
    let recorder = Recorder::create(&path).unwrap();

    AcquisitionLoop::new(current, temperature, voltage, recorder, stop)
        .run()
        .unwrap();

    assert!(data_rows(&path).is_empty());
    assert!(shutdown_called.load(Ordering::SeqCst));
}
