//! Tests for the Keithley 224 driver.

use measurements::{Current, test_utils::assert_almost_eq};
use rstest::*;

use lablink::{InstrumentError, LoopbackInterfaceString};

use keithley_224::Keithley224;

type K224Lbk = Keithley224<LoopbackInterfaceString>;

/// Function that takes input, output `Vec<&str>` and prepares the 224 instrument with this
/// loopback interface.
fn crt_inst(host2inst: Vec<&str>, inst2host: Vec<&str>) -> K224Lbk {
    let interface = LoopbackInterfaceString::new(host2inst, inst2host, "\n");
    Keithley224::new(interface)
}

/// A fixture to create an empty 224 loopback instrument.
#[fixture]
fn emp_k224() -> K224Lbk {
    crt_inst(vec![], vec![])
}

/// Ensure creation of the instrument sends no traffic.
#[rstest]
fn test_initialization(_emp_k224: K224Lbk) {}

#[rstest]
fn test_set_output() {
    let mut inst = crt_inst(vec!["F1X", "F0X"], vec![]);
    inst.set_output(true).unwrap();
    inst.set_output(false).unwrap();
}

#[rstest]
fn test_set_current() {
    let mut inst = crt_inst(vec!["I0.0001X"], vec![]);
    inst.set_current(Current::from_amperes(100e-6)).unwrap();
}

/// Currents beyond the 101.1 mA range are rejected without any traffic.
#[rstest]
#[case(0.2)]
#[case(-0.2)]
fn test_set_current_out_of_range(mut emp_k224: K224Lbk, #[case] amperes: f64) {
    match emp_k224.set_current(Current::from_amperes(amperes)) {
        Err(InstrumentError::FloatValueOutOfRange { value, min, max }) => {
            assert_almost_eq(value, amperes);
            assert_almost_eq(min, -0.1011);
            assert_almost_eq(max, 0.1011);
        }
        _ => panic!("Expected FloatValueOutOfRange error"),
    }
}

/// The `DCI` field of the machine status output gives the current.
#[rstest]
fn test_read_current() {
    let mut inst = crt_inst(vec![], vec!["NDCI+1.0000E-04,V+10.00,W+2.0E-02"]);
    let current = inst.read_current().unwrap();
    assert_almost_eq(current.as_amperes(), 100e-6);
}

/// A status string without a `DCI` field is a parse error carrying the whole reply.
#[rstest]
fn test_read_current_missing_field() {
    let mut inst = crt_inst(vec![], vec!["V+10.00,W+2.0E-02"]);
    match inst.read_current() {
        Err(InstrumentError::ResponseParseError(resp)) => {
            assert_eq!(resp, "V+10.00,W+2.0E-02");
        }
        _ => panic!("Expected ResponseParseError"),
    }
}

/// A truncated `DCI` field is a parse error as well.
#[rstest]
fn test_read_current_malformed_field() {
    let mut inst = crt_inst(vec![], vec!["NDCI,V+10.00"]);
    assert!(matches!(
        inst.read_current(),
        Err(InstrumentError::ResponseParseError(_))
    ));
}
