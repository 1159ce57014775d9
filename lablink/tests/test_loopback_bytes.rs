//! Test cases for the LoopbackInterfaceBytes.

use rstest::*;

use lablink::{InstrumentInterface, LoopbackInterfaceBytes};

/// A function that creates a new `LoopbackInterfaceBytes` with the given input and output vectors.
fn crt_lbk(input: Vec<Vec<u8>>, output: Vec<Vec<u8>>) -> LoopbackInterfaceBytes {
    LoopbackInterfaceBytes::new(input, output)
}

/// Create a loopback interface that contains no frames.
#[fixture]
fn emp_lbk() -> LoopbackInterfaceBytes {
    crt_lbk(vec![], vec![])
}

/// Ensure `finalize` method passes if an empty loopback interface is used.
#[rstest]
fn finalize_test(mut emp_lbk: LoopbackInterfaceBytes) {
    emp_lbk.finalize();
}

/// Ensure `finalize` panics if frames are left in the loopback interface.
///
/// Note that the finalize method is called in the `Drop` trait, so it is not necessary to call it
/// directly.
#[rstest]
#[case(vec![vec![0x01]], vec![])]
#[case(vec![], vec![vec![0x02]])]
#[case(vec![vec![0x01]], vec![vec![0x02]])]
#[should_panic]
fn finalize_test_panic(#[case] from_host: Vec<Vec<u8>>, #[case] from_inst: Vec<Vec<u8>>) {
    let _ = crt_lbk(from_host, from_inst);
}

#[rstest]
fn write_raw() {
    let mut lbk = crt_lbk(vec![vec![0x01], vec![0x02]], vec![]);
    lbk.write_raw(&[0x01]).unwrap();
    lbk.write_raw(&[0x02]).unwrap();
}

#[rstest]
#[should_panic]
fn write_raw_mismatch() {
    let mut lbk = crt_lbk(vec![vec![0x01]], vec![]);
    assert!(lbk.write_raw(&[0x03]).is_err());
}

/// Frames can be read back in pieces, e.g., header first and payload afterwards.
#[rstest]
fn read_frame_in_pieces() {
    let mut lbk = crt_lbk(vec![vec![0x01]], vec![vec![0x11, 0x22, 0x33]]);
    lbk.write_raw(&[0x01]).unwrap();

    let mut header = [0u8; 1];
    lbk.read_exact(&mut header).unwrap();
    assert_eq!(header, [0x11]);

    let mut payload = [0u8; 2];
    lbk.read_exact(&mut payload).unwrap();
    assert_eq!(payload, [0x22, 0x33]);
}

#[rstest]
fn write_read_roundtrip() {
    let mut lbk = crt_lbk(vec![vec![0x01], vec![0x02]], vec![vec![0x11], vec![0x22]]);
    lbk.write_raw(&[0x01]).unwrap();
    let mut resp1 = [0u8; 1];
    lbk.read_exact(&mut resp1).unwrap();
    assert_eq!(resp1, [0x11]);

    lbk.write_raw(&[0x02]).unwrap();
    let mut resp2 = [0u8; 1];
    lbk.read_exact(&mut resp2).unwrap();
    assert_eq!(resp2, [0x22]);
}
