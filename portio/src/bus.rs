use std::error;
use std::fmt;
use std::io;
use std::result::Result;

/// An opaque handle to a single byte-wide register, obtained from
/// [`IoSpace::map_register`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    address: u16,
}

impl Register {
    pub fn new(address: u16) -> Self {
        Self { address }
    }

    /// The I/O port address this handle refers to.
    pub fn address(&self) -> u16 {
        self.address
    }
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Register(${:04X})", self.address)
    }
}

pub trait Read {
    /// Reads a byte from a given register. Returns the byte or error if the
    /// register is outside of the accessible window. Real hardware never
    /// reports an error here.
    fn read(&self, register: Register) -> ReadResult;
}

pub trait Write {
    /// Writes a byte to a given register. Returns error if the register is
    /// outside of the accessible window. Real hardware never reports an error
    /// here.
    fn write(&mut self, register: Register, value: u8) -> WriteResult;
}

/// An I/O port address space that a process needs an explicit permission to
/// use. The permission is requested once, after which registers can be mapped
/// and accessed.
pub trait IoSpace: Read + Write {
    /// Asks the host for a permission to execute privileged I/O. This is a
    /// single blocking call, with no retries.
    fn request_privilege(&mut self) -> Result<(), PrivilegeError>;

    /// Turns a physical port address into a register handle.
    fn map_register(&mut self, address: u16) -> Register;
}

#[derive(thiserror::Error, Debug)]
pub enum PrivilegeError {
    #[error("I/O privilege denied for ports ${first:04X}-${last:04X}: {source}")]
    Denied {
        first: u16,
        last: u16,
        #[source]
        source: io::Error,
    },
}

pub type ReadResult = Result<u8, ReadError>;

#[derive(Clone, PartialEq)]
pub struct ReadError {
    pub address: u16,
}

impl error::Error for ReadError {}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unable to read from port ${:04X}", self.address)
    }
}

impl fmt::Debug for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ReadError")
            .field("address", &format_args!("{:#06X}", self.address))
            .finish()
    }
}

pub type WriteResult = Result<(), WriteError>;

#[derive(Clone, PartialEq)]
pub struct WriteError {
    pub address: u16,
    pub value: u8,
}

impl error::Error for WriteError {}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Unable to write ${:02X} to port ${:04X}",
            self.value, self.address
        )
    }
}

impl fmt::Debug for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("WriteError")
            .field("address", &format_args!("{:#06X}", self.address))
            .field("value", &format_args!("{:#04X}", self.value))
            .finish()
    }
}
