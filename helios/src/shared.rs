use crate::controller::PortController;
use crate::port::{DataPort, Direction, SubPort};
use crate::Error;
use parking_lot::{Mutex, MutexGuard};
use portio::IoSpace;
use std::sync::Arc;

/// A [`PortController`] that can be shared between threads. Every operation
/// holds a lock for its whole duration, so read-modify-write cycles issued
/// from different threads never overwrite each other's changes.
///
/// Cloning produces another handle to the same controller.
pub struct SharedPortController<S: IoSpace> {
    inner: Arc<Mutex<PortController<S>>>,
}

impl<S: IoSpace> Clone for SharedPortController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: IoSpace> From<PortController<S>> for SharedPortController<S> {
    fn from(controller: PortController<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }
}

impl<S: IoSpace> SharedPortController<S> {
    pub fn new(space: S) -> Self {
        PortController::new(space).into()
    }

    /// Locks the controller for a sequence of operations that need to be
    /// performed without interference, e.g. writing to two ports in a row.
    pub fn lock(&self) -> MutexGuard<'_, PortController<S>> {
        self.inner.lock()
    }

    pub fn initialize(&self) -> Result<(), Error> {
        self.lock().initialize()
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().is_initialized()
    }

    pub fn set_direction(&self, sub_port: SubPort, direction: Direction) -> Result<(), Error> {
        self.lock().set_direction(sub_port, direction)
    }

    pub fn direction(&self, sub_port: SubPort) -> Result<Direction, Error> {
        self.lock().direction(sub_port)
    }

    pub fn pin_on(&self, port: DataPort, mask: u8) -> Result<(), Error> {
        self.lock().pin_on(port, mask)
    }

    pub fn pin_off(&self, port: DataPort, mask: u8) -> Result<(), Error> {
        self.lock().pin_off(port, mask)
    }

    pub fn toggle_pins(&self, port: DataPort, mask: u8) -> Result<(), Error> {
        self.lock().toggle_pins(port, mask)
    }

    pub fn write_pins(&self, port: DataPort, pins: u8) -> Result<(), Error> {
        self.lock().write_pins(port, pins)
    }

    pub fn read_pin(&self, port: DataPort, mask: u8) -> Result<bool, Error> {
        self.lock().read_pin(port, mask)
    }

    pub fn read_port(&self, port: DataPort) -> Result<u8, Error> {
        self.lock().read_port(port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{self, pins};
    use crate::test_utils::board_space;
    use std::thread;

    #[test]
    fn concurrent_pin_updates_are_not_lost() {
        let gpio = SharedPortController::new(board_space());
        gpio.initialize().unwrap();

        thread::scope(|s| {
            for pin in 0..8 {
                let gpio = gpio.clone();
                s.spawn(move || {
                    for _ in 0..1000 {
                        gpio.pin_off(DataPort::A, 1 << pin).unwrap();
                        gpio.pin_on(DataPort::A, 1 << pin).unwrap();
                    }
                });
            }
        });

        assert_eq!(gpio.read_port(DataPort::A).unwrap(), pins::ALL);
    }

    #[test]
    fn concurrent_direction_updates_are_not_lost() {
        let gpio = SharedPortController::new(board_space());
        gpio.initialize().unwrap();

        thread::scope(|s| {
            for sub_port in SubPort::ALL {
                let gpio = gpio.clone();
                s.spawn(move || {
                    for _ in 0..1000 {
                        gpio.set_direction(sub_port, Direction::Output).unwrap();
                        gpio.set_direction(sub_port, Direction::Input).unwrap();
                    }
                });
            }
        });

        for sub_port in SubPort::ALL {
            assert_eq!(gpio.direction(sub_port).unwrap(), Direction::Input);
        }
        assert_eq!(
            gpio.lock().space().peek(registers::CONTROL),
            Some(0b0001_1011)
        );
    }

    #[test]
    fn locking_for_multiple_operations() {
        let gpio = SharedPortController::new(board_space());
        assert!(!gpio.is_initialized());
        assert!(matches!(
            gpio.toggle_pins(DataPort::C, pins::PIN0),
            Err(Error::NotInitialized)
        ));
        gpio.initialize().unwrap();
        {
            let mut controller = gpio.lock();
            controller.write_pins(DataPort::B, 0x0F).unwrap();
            controller.write_pins(DataPort::C, 0xF0).unwrap();
        }
        assert!(gpio.read_pin(DataPort::B, 0x0F).unwrap());
        assert!(gpio.read_pin(DataPort::C, 0xF0).unwrap());
        gpio.toggle_pins(DataPort::C, pins::ALL).unwrap();
        gpio.pin_off(DataPort::B, pins::PIN0).unwrap();
        gpio.pin_on(DataPort::A, pins::PIN7).unwrap();
        assert_eq!(gpio.read_port(DataPort::A).unwrap(), 0x80);
        assert_eq!(gpio.read_port(DataPort::B).unwrap(), 0x0E);
        assert_eq!(gpio.read_port(DataPort::C).unwrap(), 0x0F);
    }
}
