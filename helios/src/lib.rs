//! Digital I/O ports A, B and C of the Helios PC/104 board.
//!
//! On a real board, use `portio::PortIoSpace` instead of the simulator.
//!
//! ```
//! use helios::registers::{self, pins};
//! use helios::{DataPort, Direction, PortController, SubPort};
//! use portio::SimulatedIoSpace;
//!
//! # fn main() -> Result<(), helios::Error> {
//! let space = SimulatedIoSpace::new(registers::WINDOW_START, registers::WINDOW_LEN);
//! let mut gpio = PortController::initialized(space)?;
//! gpio.set_direction(SubPort::CLow, Direction::Output)?;
//! gpio.pin_on(DataPort::C, pins::PIN0)?;
//! assert!(gpio.read_pin(DataPort::C, pins::PIN0)?);
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod port;
pub mod registers;
pub mod shared;

mod test_utils;

pub use controller::PortController;
pub use port::{DataPort, Direction, Port, SubPort};
pub use shared::SharedPortController;

use portio::{PrivilegeError, ReadError, WriteError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to get access to Helios I/O ports")]
    PermissionDenied(#[from] PrivilegeError),

    #[error("Port controller used before initialization")]
    NotInitialized,

    #[error("Register read failed: {0}")]
    Read(#[from] ReadError),

    #[error("Register write failed: {0}")]
    Write(#[from] WriteError),
}
