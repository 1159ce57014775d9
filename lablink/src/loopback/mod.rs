//! The loopback module provides instrument simulators for testing purposes.
//!
//! The [`LoopbackInterfaceString`] allows you to test drivers that communicate using strings with
//! a fixed terminator declaring the end of a line. The [`LoopbackInterfaceBytes`] does the same
//! for drivers that exchange binary frames without a terminator.
//!
//! Check out the interface documentation for details and examples. The instrument drivers in this
//! workspace all carry tests built on these interfaces.

mod bytes;
mod string;

pub use bytes::*;
pub use string::*;

/// A self-incrementing index structure that by default starts at 0 and increments whenever `next`
/// is called.
#[derive(Debug, Default)]
struct IncrIndex {
    index: usize,
}

impl IncrIndex {
    fn next(&mut self) -> usize {
        let current = self.index;
        self.index += 1;
        current
    }
}
