//! Loopback interface for instrument drivers that send data frames in bytes back and forth.
//!
//! Generally, your instrument driver in this case implements the reading of the bytes itself and
//! there is no dedicated "end-of-command" terminator.

use std::collections::VecDeque;

use crate::{InstrumentError, InstrumentInterface, loopback::IncrIndex};

/// A loopback interface for drivers that exchange raw byte frames.
///
/// Works like [`crate::LoopbackInterfaceString`], but with byte vectors instead of terminated
/// strings: expected host-to-instrument frames are asserted in order, instrument-to-host frames
/// are replayed byte by byte, and leftover frames panic when the interface is dropped.
pub struct LoopbackInterfaceBytes {
    from_host: Vec<Vec<u8>>,
    from_inst: Vec<Vec<u8>>,
    from_host_index: IncrIndex,
    from_inst_index: IncrIndex,
    curr_bytes: VecDeque<u8>,
}

impl LoopbackInterfaceBytes {
    /// Create a new loopback instrument with given frames to and from instrument.
    ///
    /// # Arguments:
    /// * `from_host` - Frames from host to instrument, in order.
    /// * `from_inst` - Frames from instrument to host, in order.
    pub fn new(from_host: Vec<Vec<u8>>, from_inst: Vec<Vec<u8>>) -> Self {
        LoopbackInterfaceBytes {
            from_host,
            from_inst,
            from_host_index: IncrIndex::default(),
            from_inst_index: IncrIndex::default(),
            curr_bytes: VecDeque::new(),
        }
    }

    /// This command panics if not all frames in the [`LoopbackInterfaceBytes`] have been used.
    ///
    /// It is automatically called when the [`LoopbackInterfaceBytes`] is dropped, but you can
    /// also call it manually to ensure that all frames have been used.
    pub fn finalize(&mut self) {
        let from_host_leftover = self.from_host.get(self.from_host_index.next());
        let from_inst_leftover = self.from_inst.get(self.from_inst_index.next());
        if let Some(fil) = from_host_leftover {
            panic!("Leftover expected frames found from host to instrument: {fil:?}");
        }
        if let Some(fil) = from_inst_leftover {
            panic!("Leftover expected frames found from instrument to host: {fil:?}");
        }
    }

    /// Get the next frame from host to instrument, or panic.
    fn get_next_from_host(&mut self) -> &Vec<u8> {
        self.from_host
            .get(self.from_host_index.next())
            .expect("No more frames were expected from host to instrument.")
    }

    /// Get the next frame from instrument to host, or panic.
    fn get_next_from_inst(&mut self) -> &Vec<u8> {
        self.from_inst
            .get(self.from_inst_index.next())
            .expect("No more frames were expected from instrument to host.")
    }

    /// Function to read exactly one byte from the next frame from the instrument.
    ///
    /// This just panics if there are no more frames. If there are no more frames but one is
    /// required, the panic is justified as this is a test interface.
    fn read_one_byte(&mut self) -> u8 {
        match self.curr_bytes.pop_front() {
            Some(byte) => byte,
            None => {
                let next_cmd = self.get_next_from_inst();
                self.curr_bytes = next_cmd.clone().into();
                self.read_one_byte()
            }
        }
    }
}

impl InstrumentInterface for LoopbackInterfaceBytes {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError> {
        for byte in buf.iter_mut() {
            *byte = self.read_one_byte();
        }
        Ok(())
    }

    fn write_raw(&mut self, cmd: &[u8]) -> Result<(), InstrumentError> {
        let exp = self.get_next_from_host().clone();
        assert_eq!(
            exp.as_slice(),
            cmd,
            "Expected frame '{exp:?}', got '{cmd:?}'"
        );
        Ok(())
    }
}

impl Drop for LoopbackInterfaceBytes {
    fn drop(&mut self) {
        self.finalize();
    }
}
