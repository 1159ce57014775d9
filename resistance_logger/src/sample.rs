//! A single acquisition sample.

use std::fmt;
use std::time::Duration;

/// One acquired data point.
///
/// All values are plain SI floats; the resistance is derived from voltage and current on
/// construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Seconds since the start of the acquisition.
    pub elapsed_s: f64,
    /// Excitation current in amperes.
    pub current_a: f64,
    /// Sample temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Voltage across the sample in volts.
    pub voltage_v: f64,
    /// Resistance in ohms, `voltage_v / current_a`.
    pub resistance_ohm: f64,
}

impl Sample {
    /// Create a new sample, deriving the resistance from voltage and current.
    pub fn new(elapsed: Duration, current_a: f64, temperature_c: f64, voltage_v: f64) -> Self {
        Sample {
            elapsed_s: elapsed.as_secs_f64(),
            current_a,
            temperature_c,
            voltage_v,
            resistance_ohm: resistance(voltage_v, current_a),
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.elapsed_s, self.current_a, self.temperature_c, self.voltage_v, self.resistance_ohm
        )
    }
}

/// Resistance in ohms from voltage and current.
///
/// A current of exactly zero would divide to infinity; it yields a resistance of zero instead so
/// a misconfigured current source produces an obviously flat trace rather than `inf` rows in the
/// log file.
pub fn resistance(voltage_v: f64, current_a: f64) -> f64 {
    if current_a == 0.0 {
        return 0.0;
    }
    voltage_v / current_a
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use measurements::test_utils::assert_almost_eq;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case(0.05, 100e-6, 500.0)]
    #[case(1.23, 0.0, 0.0)]
    #[case(0.0, 100e-6, 0.0)]
    #[case(-0.05, 100e-6, -500.0)]
    fn test_resistance(#[case] voltage_v: f64, #[case] current_a: f64, #[case] exp_ohm: f64) {
        assert_almost_eq(resistance(voltage_v, current_a), exp_ohm);
    }

    #[rstest]
    fn test_new_derives_resistance() {
        let sample = Sample::new(Duration::from_secs(2), 100e-6, 25.3, 0.05);
        assert_almost_eq(sample.elapsed_s, 2.0);
        assert_almost_eq(sample.resistance_ohm, 500.0);
    }

    /// Display writes the five values space separated, in column order.
    #[rstest]
    fn test_display() {
        let sample = Sample::new(Duration::from_secs(1), 100e-6, 25.3, 0.05);
        assert_eq!(format!("{sample}"), "1 0.0001 25.3 0.05 500");
    }
}
