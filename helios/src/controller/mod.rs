use crate::port::{DataPort, Direction, SubPort};
use crate::registers;
use crate::Error;
use enum_map::{enum_map, EnumMap};
use portio::{IoSpace, Register};


/// Handles to all the registers of the I/O block. They only exist once the
/// process has been granted access to the I/O ports.
#[derive(Debug, Clone)]
struct RegisterSet {
    base: Register,
    control: Register,
    data: EnumMap<DataPort, Register>,
}

/// Controls the digital I/O ports of the Helios board through a given I/O
/// space.
///
/// A freshly created controller is uninitialized: every operation except
/// [`PortController::initialize`] fails with [`Error::NotInitialized`] without
/// touching the hardware. Once initialized, it stays so for the rest of its
/// life.
///
/// Operations that change only some of the bits (direction configuration,
/// setting, clearing and toggling pins) read the register, modify it, and
/// write it back. Exclusive borrowing makes this safe for a single owner;
/// use [`crate::SharedPortController`] to share the board between threads.
#[derive(Debug)]
pub struct PortController<S: IoSpace> {
    space: S,
    registers: Option<RegisterSet>,
}

impl<S: IoSpace> PortController<S> {
    pub fn new(space: S) -> Self {
        Self {
            space,
            registers: None,
        }
    }

    /// Creates a controller and initializes it right away.
    pub fn initialized(space: S) -> Result<Self, Error> {
        let mut controller = Self::new(space);
        controller.initialize()?;
        Ok(controller)
    }

    /// Requests access to the I/O ports, maps the registers and configures the
    /// board: selects the I/O mode and turns every port into an output.
    ///
    /// If access is denied, nothing gets mapped or written, and the controller
    /// stays in its previous state. Initializing an already initialized
    /// controller maps the registers again and resets all port directions.
    pub fn initialize(&mut self) -> Result<(), Error> {
        if let Err(e) = self.space.request_privilege() {
            log::error!("Failed to get access to Helios I/O ports: {}", e);
            return Err(e.into());
        }

        let base = self.space.map_register(registers::BASE);
        let control = self.space.map_register(registers::CONTROL);
        let port_a = self.space.map_register(DataPort::A.register_address());
        let port_b = self.space.map_register(DataPort::B.register_address());
        let port_c = self.space.map_register(DataPort::C.register_address());
        let register_set = RegisterSet {
            base,
            control,
            data: enum_map! {
                DataPort::A => port_a,
                DataPort::B => port_b,
                DataPort::C => port_c,
            },
        };

        self.space.write(register_set.base, registers::MODE)?;
        self.space
            .write(register_set.control, registers::ALL_OUTPUTS)?;
        self.registers = Some(register_set);
        log::info!("Helios I/O ports initialized, all ports set to output");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.registers.is_some()
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn mut_space(&mut self) -> &mut S {
        &mut self.space
    }

    pub fn into_space(self) -> S {
        self.space
    }

    /// Configures all pins of a given sub-port as inputs or outputs. Other
    /// sub-ports are left intact.
    pub fn set_direction(&mut self, sub_port: SubPort, direction: Direction) -> Result<(), Error> {
        let control = self.registers()?.control;
        let bit = sub_port.control_bit();
        self.modify(control, |value| match direction {
            Direction::Input => value | bit,
            Direction::Output => value & !bit,
        })?;
        log::debug!("Port {} direction set to {}", sub_port, direction);
        Ok(())
    }

    /// Reads back the current direction of a given sub-port.
    pub fn direction(&self, sub_port: SubPort) -> Result<Direction, Error> {
        let control = self.registers()?.control;
        let value = self.space.read(control)?;
        Ok(if value & sub_port.control_bit() != 0 {
            Direction::Input
        } else {
            Direction::Output
        })
    }

    /// Turns on all the pins selected by `mask`, leaving the others intact.
    pub fn pin_on(&mut self, port: DataPort, mask: u8) -> Result<(), Error> {
        let register = self.data_register(port)?;
        self.modify(register, |value| value | mask)?;
        Ok(())
    }

    /// Turns off all the pins selected by `mask`, leaving the others intact.
    pub fn pin_off(&mut self, port: DataPort, mask: u8) -> Result<(), Error> {
        let register = self.data_register(port)?;
        self.modify(register, |value| value & !mask)?;
        Ok(())
    }

    /// Flips all the pins selected by `mask`, leaving the others intact.
    pub fn toggle_pins(&mut self, port: DataPort, mask: u8) -> Result<(), Error> {
        let register = self.data_register(port)?;
        self.modify(register, |value| value ^ mask)?;
        Ok(())
    }

    /// Sets all eight pins of a port at once.
    pub fn write_pins(&mut self, port: DataPort, pins: u8) -> Result<(), Error> {
        let register = self.data_register(port)?;
        self.space.write(register, pins)?;
        Ok(())
    }

    /// Returns `true` if *all* the pins selected by `mask` are on. Note that
    /// for a mask that selects multiple pins, a single pin being off is enough
    /// to return `false`.
    pub fn read_pin(&self, port: DataPort, mask: u8) -> Result<bool, Error> {
        Ok((self.read_port(port)? & mask) == mask)
    }

    /// Reads all eight pins of a port.
    pub fn read_port(&self, port: DataPort) -> Result<u8, Error> {
        let register = self.data_register(port)?;
        Ok(self.space.read(register)?)
    }

    fn registers(&self) -> Result<&RegisterSet, Error> {
        self.registers.as_ref().ok_or(Error::NotInitialized)
    }

    fn data_register(&self, port: DataPort) -> Result<Register, Error> {
        Ok(self.registers()?.data[port])
    }

    /// Performs a read-modify-write cycle on a register. Returns the written
    /// value.
    fn modify(&mut self, register: Register, f: impl FnOnce(u8) -> u8) -> Result<u8, Error> {
        let old_value = self.space.read(register)?;
        let new_value = f(old_value);
        self.space.write(register, new_value)?;
        log::trace!(
            "{:?}: ${:02X} -> ${:02X}",
            register,
            old_value,
            new_value
        );
        Ok(new_value)
    }
}
