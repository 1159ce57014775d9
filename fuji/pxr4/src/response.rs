//! Module to read and validate Modbus RTU response frames.
//!
//! The response length is not known upfront: a regular response carries a byte count in its third
//! byte, an exception response is always five bytes. We therefore read the first three bytes,
//! decide which case we are in, and then read the remainder.

use lablink::{InstrumentError, InstrumentInterface};

use crate::frame::crc16;

/// Meaning of the Modbus exception codes, for display to the user.
fn exception_message(code: u8) -> String {
    match code {
        0x01 => "Instrument rejected the request: illegal function".to_string(),
        0x02 => "Instrument rejected the request: illegal data address".to_string(),
        0x03 => "Instrument rejected the request: illegal data value".to_string(),
        0x04 => "Instrument reported a device failure".to_string(),
        code => format!("Instrument returned Modbus exception code {code}"),
    }
}

/// A validated response frame holding the register payload.
pub(crate) struct ResponseFrame {
    data: Vec<u8>,
}

impl ResponseFrame {
    /// Read a response frame from the interface and validate it.
    ///
    /// The following possible errors are checked:
    /// * The slave address echo does not match the request.
    /// * The instrument answered with an exception response.
    /// * The function code echo does not match the request.
    /// * The CRC is invalid.
    pub(crate) fn read<T: InstrumentInterface>(
        interface: &mut T,
        slave_address: u8,
        function: u8,
    ) -> Result<Self, InstrumentError> {
        let mut header = [0u8; 3];
        interface.read_exact(&mut header)?;

        if header[0] != slave_address {
            return Err(InstrumentError::ResponseParseError(format!(
                "Expected response from slave {slave_address}, got one from slave {}",
                header[0]
            )));
        }

        // Exception responses set the high bit of the function code.
        if header[1] == function | 0x80 {
            let mut crc_buf = [0u8; 2];
            interface.read_exact(&mut crc_buf)?;
            validate_crc(&header, u16::from_le_bytes(crc_buf))?;
            return Err(InstrumentError::InstrumentStatus(exception_message(
                header[2],
            )));
        }

        if header[1] != function {
            return Err(InstrumentError::ResponseParseError(format!(
                "Expected function code {function:#04x} in response, got {:#04x}",
                header[1]
            )));
        }

        let byte_count = usize::from(header[2]);
        let mut rest = vec![0u8; byte_count + 2];
        interface.read_exact(&mut rest)?;

        let crc_received = u16::from_le_bytes([rest[byte_count], rest[byte_count + 1]]);
        let mut checked = Vec::with_capacity(3 + byte_count);
        checked.extend_from_slice(&header);
        checked.extend_from_slice(&rest[..byte_count]);
        validate_crc(&checked, crc_received)?;

        rest.truncate(byte_count);
        Ok(ResponseFrame { data: rest })
    }

    /// Get the register with the given index from the payload as an unsigned 16-bit value.
    ///
    /// Registers are transferred big endian, two bytes each.
    pub(crate) fn register(&self, idx: usize) -> Result<u16, InstrumentError> {
        let offset = idx * 2;
        if offset + 2 > self.data.len() {
            return Err(InstrumentError::ResponseParseError(format!(
                "Register index {idx} not contained in payload of {} bytes",
                self.data.len()
            )));
        }
        Ok(u16::from_be_bytes([self.data[offset], self.data[offset + 1]]))
    }
}

/// Compare the received CRC against the one calculated over the frame.
fn validate_crc(frame: &[u8], received: u16) -> Result<(), InstrumentError> {
    let expected = crc16(frame);
    if expected != received {
        return Err(InstrumentError::ChecksumMismatch { expected, received });
    }
    Ok(())
}
