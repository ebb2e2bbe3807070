use crate::bus::{
    IoSpace, PrivilegeError, Read, ReadError, ReadResult, Register, Write, WriteError,
    WriteResult,
};
use std::fmt;
use std::io;

/// An in-memory stand-in for a window of I/O port registers. Every register
/// is a plain byte: a read returns whatever was written (or poked) last.
///
/// Just like on real hardware, registers can only be accessed after the
/// privilege has been granted. Accessing them earlier, or accessing anything
/// outside of the window, results in an error.
pub struct SimulatedIoSpace {
    bytes: Vec<u8>,
    first: u16,
    grants_privilege: bool,
    privileged: bool,
    mapped: Vec<u16>,
}

impl SimulatedIoSpace {
    /// Creates a window of `len` zeroed registers starting at `first`. The
    /// simulated host will grant the I/O privilege when asked.
    pub fn new(first: u16, len: u16) -> Self {
        Self {
            bytes: vec![0; len as usize],
            first,
            grants_privilege: true,
            privileged: false,
            mapped: Vec::new(),
        }
    }

    /// Makes the simulated host refuse the I/O privilege, as it would for a
    /// process without sufficient rights.
    pub fn denying_privilege(mut self) -> Self {
        self.grants_privilege = false;
        self
    }

    /// Fills every register with a given value.
    pub fn filled_with(mut self, value: u8) -> Self {
        self.bytes.fill(value);
        self
    }

    pub fn privileged(&self) -> bool {
        self.privileged
    }

    /// Addresses of all the registers mapped so far, in the order of mapping.
    pub fn mapped(&self) -> &[u16] {
        &self.mapped
    }

    /// Inspects a register without going through the privilege check. Returns
    /// `None` for addresses outside of the window.
    pub fn peek(&self, address: u16) -> Option<u8> {
        self.index(address).map(|i| self.bytes[i])
    }

    /// Sets a register from the outside, as if the pins were driven by an
    /// external circuit. Returns `false` for addresses outside of the window.
    pub fn poke(&mut self, address: u16, value: u8) -> bool {
        match self.index(address) {
            Some(i) => {
                self.bytes[i] = value;
                true
            }
            None => false,
        }
    }

    fn index(&self, address: u16) -> Option<usize> {
        let offset = address.checked_sub(self.first)? as usize;
        (offset < self.bytes.len()).then(|| offset)
    }

    fn last(&self) -> u16 {
        self.first
            .saturating_add(self.bytes.len().saturating_sub(1) as u16)
    }
}

impl Read for SimulatedIoSpace {
    fn read(&self, register: Register) -> ReadResult {
        let address = register.address();
        match self.index(address) {
            Some(i) if self.privileged => Ok(self.bytes[i]),
            _ => Err(ReadError { address }),
        }
    }
}

impl Write for SimulatedIoSpace {
    fn write(&mut self, register: Register, value: u8) -> WriteResult {
        let address = register.address();
        match self.index(address) {
            Some(i) if self.privileged => {
                self.bytes[i] = value;
                Ok(())
            }
            _ => Err(WriteError { address, value }),
        }
    }
}

impl IoSpace for SimulatedIoSpace {
    fn request_privilege(&mut self) -> Result<(), PrivilegeError> {
        log::debug!(
            "Simulated host {} I/O privilege",
            if self.grants_privilege { "grants" } else { "denies" }
        );
        if !self.grants_privilege {
            return Err(PrivilegeError::Denied {
                first: self.first,
                last: self.last(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        self.privileged = true;
        Ok(())
    }

    fn map_register(&mut self, address: u16) -> Register {
        self.mapped.push(address);
        Register::new(address)
    }
}

impl fmt::Debug for SimulatedIoSpace {
    /// Prints the registers as a single row of hex bytes, prefixed with the
    /// first address.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SimulatedIoSpace ${:04X}:", self.first)?;
        for byte in &self.bytes {
            write!(f, " {:02X}", byte)?;
        }
        if !self.privileged {
            write!(f, " (unprivileged)")?;
        }
        Ok(())
    }
}
