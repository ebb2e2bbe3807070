//! x86 port I/O for Linux user space.
//!
//! The permission to execute `in`/`out` instructions is granted per port range
//! by `ioperm(2)`. Without it, the first register access kills the process
//! with `SIGSEGV`, which is why [`PortIoSpace`] refuses to touch any register
//! before [`IoSpace::request_privilege`] succeeds.

use crate::bus::{
    IoSpace, PrivilegeError, Read, ReadError, ReadResult, Register, Write, WriteError,
    WriteResult,
};
use std::ffi::{c_int, c_ulong};
use std::io;
use x86_64::instructions::port::Port;

extern "C" {
    fn ioperm(from: c_ulong, num: c_ulong, turn_on: c_int) -> c_int;
}

/// A window of the processor's I/O port space.
///
/// The kernel keeps the I/O permission bitmap per thread. Threads spawned after
/// a successful [`IoSpace::request_privilege`] inherit it; threads that
/// already existed don't.
#[derive(Debug)]
pub struct PortIoSpace {
    first: u16,
    len: u16,
    privileged: bool,
}

impl PortIoSpace {
    /// Describes a window of `len` ports starting at `first`. Nothing is
    /// requested from the kernel until [`IoSpace::request_privilege`].
    pub fn new(first: u16, len: u16) -> Self {
        Self {
            first,
            len,
            privileged: false,
        }
    }

    fn contains(&self, address: u16) -> bool {
        address
            .checked_sub(self.first)
            .map_or(false, |offset| offset < self.len)
    }
}

impl Read for PortIoSpace {
    fn read(&self, register: Register) -> ReadResult {
        let address = register.address();
        if !self.privileged || !self.contains(address) {
            return Err(ReadError { address });
        }
        // SAFETY: the kernel granted access to the whole window in
        // `request_privilege`, and the address lies within it.
        let value = unsafe { Port::<u8>::new(address).read() };
        log::trace!("in  ${:04X} -> ${:02X}", address, value);
        Ok(value)
    }
}

impl Write for PortIoSpace {
    fn write(&mut self, register: Register, value: u8) -> WriteResult {
        let address = register.address();
        if !self.privileged || !self.contains(address) {
            return Err(WriteError { address, value });
        }
        log::trace!("out ${:04X} <- ${:02X}", address, value);
        // SAFETY: see `read`.
        unsafe { Port::<u8>::new(address).write(value) };
        Ok(())
    }
}

impl IoSpace for PortIoSpace {
    fn request_privilege(&mut self) -> Result<(), PrivilegeError> {
        // SAFETY: ioperm only changes the calling thread's I/O bitmap.
        let status = unsafe { ioperm(self.first as c_ulong, self.len as c_ulong, 1) };
        if status != 0 {
            return Err(PrivilegeError::Denied {
                first: self.first,
                last: self.first.saturating_add(self.len.saturating_sub(1)),
                source: io::Error::last_os_error(),
            });
        }
        self.privileged = true;
        Ok(())
    }

    fn map_register(&mut self, address: u16) -> Register {
        Register::new(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_access_before_privilege() {
        let mut space = PortIoSpace::new(0x280, 12);
        let register = space.map_register(0x288);
        assert_eq!(space.read(register), Err(ReadError { address: 0x288 }));
        assert_eq!(
            space.write(register, 0xFF),
            Err(WriteError {
                address: 0x288,
                value: 0xFF
            })
        );
    }

    #[test]
    fn window_bounds() {
        let space = PortIoSpace::new(0x280, 12);
        assert!(space.contains(0x280));
        assert!(space.contains(0x28B));
        assert!(!space.contains(0x27F));
        assert!(!space.contains(0x28C));
    }
}
