#![cfg(test)]

use crate::controller::PortController;
use crate::registers;
use mockall::mock;
use portio::{
    IoSpace, PrivilegeError, Read, ReadResult, Register, SimulatedIoSpace, Write, WriteResult,
};

mock! {
    pub Space {}

    impl Read for Space {
        fn read(&self, register: Register) -> ReadResult;
    }

    impl Write for Space {
        fn write(&mut self, register: Register, value: u8) -> WriteResult;
    }

    impl IoSpace for Space {
        fn request_privilege(&mut self) -> Result<(), PrivilegeError>;
        fn map_register(&mut self, address: u16) -> Register;
    }
}

/// A simulated I/O space that covers all the registers of the board.
pub fn board_space() -> SimulatedIoSpace {
    SimulatedIoSpace::new(registers::WINDOW_START, registers::WINDOW_LEN)
}

/// Creates a controller over a simulated I/O space and initializes it.
pub fn initialized_controller() -> PortController<SimulatedIoSpace> {
    env_logger::builder().is_test(true).try_init().ok();
    PortController::initialized(board_space()).unwrap()
}

/// Reads a register of the simulated board, bypassing the controller.
pub fn peek(controller: &PortController<SimulatedIoSpace>, address: u16) -> u8 {
    controller.space().peek(address).unwrap()
}
