//! Handles constructing Modbus RTU request frames for the instrument.

/// The Modbus function codes the PXR4 driver supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionCode {
    /// Function code 3: read holding registers (parameter values).
    ReadHoldingRegisters,
    /// Function code 4: read input registers (measurement values, e.g., the process value).
    ReadInputRegisters,
}

impl FunctionCode {
    /// Get the wire representation of the function code.
    pub(crate) fn as_u8(&self) -> u8 {
        match self {
            FunctionCode::ReadHoldingRegisters => 0x03,
            FunctionCode::ReadInputRegisters => 0x04,
        }
    }
}

/// Calculate the CRC-16/MODBUS checksum of a frame.
///
/// Initial value 0xFFFF, reflected polynomial 0xA001. The checksum is appended to the frame in
/// little-endian byte order.
pub(crate) fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for byte in data {
        crc ^= u16::from(*byte);
        for _ in 0..8 {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ 0xA001;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// A read-registers request frame.
pub(crate) struct RequestFrame {
    slave_address: u8,
    function: FunctionCode,
    register_address: u16,
    count: u16,
}

impl RequestFrame {
    /// Create a request to read `count` consecutive registers starting at `register_address`.
    pub(crate) fn read_registers(
        slave_address: u8,
        function: FunctionCode,
        register_address: u16,
        count: u16,
    ) -> Self {
        RequestFrame {
            slave_address,
            function,
            register_address,
            count,
        }
    }

    /// Serialize the request into the bytes that go on the wire, CRC included.
    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(8);
        frame.push(self.slave_address);
        frame.push(self.function.as_u8());
        frame.extend_from_slice(&self.register_address.to_be_bytes());
        frame.extend_from_slice(&self.count.to_be_bytes());
        let crc = crc16(&frame);
        frame.extend_from_slice(&crc.to_le_bytes());
        frame
    }
}
