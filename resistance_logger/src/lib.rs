//! Continuous resistance logging for four-point measurements.
//!
//! This crate wires three instruments into one acquisition loop: a Fuji PXR4 temperature
//! controller delivers the sample temperature, a Keithley 2182 nanovoltmeter the voltage across
//! the sample, and a Keithley 224 current source the excitation current. Each loop iteration
//! reads all three, computes `resistance = voltage / current`, prints the sample, and appends it
//! as one row to a comma-delimited log file.
//!
//! The loop reads strictly sequentially, one instrument after the other; the only shared state
//! across iterations is the start time the elapsed time is measured against. A failed instrument
//! read aborts the iteration and is reported; the loop then tries again on the next iteration. A
//! failure to write the log file stops the loop.

#![warn(missing_docs)]

pub mod acquisition;
pub mod config;
pub mod recorder;
pub mod sample;
pub mod sources;
