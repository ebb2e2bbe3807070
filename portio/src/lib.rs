//! Byte-wide access to a device's I/O port registers.
//!
//! Everything that touches a register goes through the [`IoSpace`] trait, so
//! that register-level logic can run against [`SimulatedIoSpace`] in tests and
//! against [`PortIoSpace`] on a real board.

pub mod bus;
pub mod sim;
#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
pub mod x86;

pub use bus::{
    IoSpace, PrivilegeError, Read, ReadError, ReadResult, Register, Write, WriteError,
    WriteResult,
};
pub use sim::SimulatedIoSpace;
#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
pub use x86::PortIoSpace;
