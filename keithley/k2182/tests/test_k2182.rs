//! Tests for the Keithley 2182 driver.

use measurements::test_utils::assert_almost_eq;
use rstest::*;

use lablink::{InstrumentError, LoopbackInterfaceString};

use keithley_2182::Keithley2182;

type K2182Lbk = Keithley2182<LoopbackInterfaceString>;

/// Function that takes input, output `Vec<&str>` and prepares the 2182 instrument with this
/// loopback interface.
///
/// Note that it will automatically fill the input vector with the initialization sequence that is
/// sent when creating a new instrument instance.
fn crt_inst(host2inst: Vec<&str>, inst2host: Vec<&str>) -> K2182Lbk {
    let mut inp = vec![
        "*rst; status:preset; *cls".to_string(),
        ":INIT:CONT ON".to_string(),
        ":SENS:VOLT:NPLC 1".to_string(),
        "*WAI".to_string(),
    ];
    inp.extend(host2inst.iter().map(|s| s.to_string()));
    let out = inst2host.iter().map(|s| s.to_string()).collect();

    let interface = LoopbackInterfaceString::new(inp, out, "\n");
    Keithley2182::try_new(interface).unwrap()
}

/// A fixture to create a 2182 loopback instrument that only saw the initialization sequence.
#[fixture]
fn emp_k2182() -> K2182Lbk {
    crt_inst(vec![], vec![])
}

/// Ensure the initialization sequence is sent verbatim, once, in order.
#[rstest]
fn test_initialization(_emp_k2182: K2182Lbk) {}

#[rstest]
fn test_get_name() {
    let mut inst = crt_inst(
        vec!["*IDN?"],
        vec!["KEITHLEY INSTRUMENTS INC.,MODEL 2182,1234567,C02"],
    );
    assert_eq!(
        inst.get_name().unwrap(),
        "KEITHLEY INSTRUMENTS INC.,MODEL 2182,1234567,C02"
    );
}

/// A fresh reading comes back as a voltage.
#[rstest]
fn test_read_fresh() {
    let mut inst = crt_inst(vec![":DATA:FRESh?"], vec!["+5.000000E-02"]);
    let voltage = inst.read_fresh().unwrap();
    assert_almost_eq(voltage.as_volts(), 0.05);
}

/// A non-numeric reply is a parse error carrying the reply.
#[rstest]
fn test_read_fresh_parse_error() {
    let mut inst = crt_inst(vec![":DATA:FRESh?"], vec!["garbage"]);
    match inst.read_fresh() {
        Err(InstrumentError::ResponseParseError(resp)) => assert_eq!(resp, "garbage"),
        _ => panic!("Expected ResponseParseError"),
    }
}

#[rstest]
fn test_set_nplc() {
    let mut inst = crt_inst(vec![":SENS:VOLT:NPLC 0.1"], vec![]);
    inst.set_nplc(0.1).unwrap();
}

/// Integration times outside the instrument range are rejected without any traffic.
#[rstest]
#[case(0.001)]
#[case(100.0)]
fn test_set_nplc_out_of_range(mut emp_k2182: K2182Lbk, #[case] nplc: f64) {
    match emp_k2182.set_nplc(nplc) {
        Err(InstrumentError::FloatValueOutOfRange { value, min, max }) => {
            assert_almost_eq(value, nplc);
            assert_almost_eq(min, 0.01);
            assert_almost_eq(max, 60.0);
        }
        _ => panic!("Expected FloatValueOutOfRange error"),
    }
}
