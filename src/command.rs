use helios::port::{ParseDirectionError, ParsePortError};
use helios::{DataPort, Direction, Error, Port, PortController, SubPort};
use portio::IoSpace;
use std::num::ParseIntError;
use std::str::FromStr;

/// A single operation on the board, as given on the command line:
/// `<verb>:<port>[:<value>]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetDirection(SubPort, Direction),
    PinOn(DataPort, u8),
    PinOff(DataPort, u8),
    Toggle(DataPort, u8),
    Write(DataPort, u8),
    ReadPin(DataPort, u8),
    Read(DataPort),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ParseCommandError {
    #[error("Unknown operation '{0}'")]
    UnknownVerb(String),

    #[error("Operation '{0}' needs {1} argument(s)")]
    WrongArgumentCount(String, usize),

    #[error(transparent)]
    Port(#[from] ParsePortError),

    #[error(transparent)]
    Direction(#[from] ParseDirectionError),

    #[error("Port {0} has no data register, use a, b or c")]
    NotADataPort(Port),

    #[error("Port {0} has no direction of its own, use a, b, ch or cl")]
    NotASubPort(Port),

    #[error("Invalid byte value '{0}': {1}")]
    Number(String, #[source] ParseIntError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let (verb, args) = (parts[0], &parts[1..]);
        let expected_args = match verb {
            "read" => 1,
            "dir" | "on" | "off" | "toggle" | "write" | "read-pin" => 2,
            _ => return Err(ParseCommandError::UnknownVerb(verb.to_string())),
        };
        if args.len() != expected_args {
            return Err(ParseCommandError::WrongArgumentCount(
                verb.to_string(),
                expected_args,
            ));
        }

        let port: Port = args[0].parse()?;
        if verb == "dir" {
            let sub_port = port
                .sub_port()
                .ok_or(ParseCommandError::NotASubPort(port))?;
            return Ok(Command::SetDirection(sub_port, args[1].parse()?));
        }

        let port = port
            .data_port()
            .ok_or(ParseCommandError::NotADataPort(port))?;
        if verb == "read" {
            return Ok(Command::Read(port));
        }
        let value = parse_byte(args[1])?;
        Ok(match verb {
            "on" => Command::PinOn(port, value),
            "off" => Command::PinOff(port, value),
            "toggle" => Command::Toggle(port, value),
            "write" => Command::Write(port, value),
            _ => Command::ReadPin(port, value),
        })
    }
}

/// Parses a byte given in decimal, hexadecimal (`0x`) or binary (`0b`)
/// notation. Underscores may be used as digit separators.
pub fn parse_byte(s: &str) -> Result<u8, ParseCommandError> {
    let digits = s.replace('_', "");
    let result = if let Some(hex) = digits.strip_prefix("0x") {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        u8::from_str_radix(bin, 2)
    } else {
        digits.parse()
    };
    result.map_err(|e| ParseCommandError::Number(s.to_string(), e))
}

impl Command {
    /// Executes the command. Returns a line of output for the commands that
    /// read something.
    pub fn execute<S: IoSpace>(
        &self,
        gpio: &mut PortController<S>,
    ) -> Result<Option<String>, Error> {
        match *self {
            Command::SetDirection(sub_port, direction) => {
                gpio.set_direction(sub_port, direction)?
            }
            Command::PinOn(port, mask) => gpio.pin_on(port, mask)?,
            Command::PinOff(port, mask) => gpio.pin_off(port, mask)?,
            Command::Toggle(port, mask) => gpio.toggle_pins(port, mask)?,
            Command::Write(port, pins) => gpio.write_pins(port, pins)?,
            Command::ReadPin(port, mask) => {
                let level = if gpio.read_pin(port, mask)? {
                    "high"
                } else {
                    "low"
                };
                return Ok(Some(format!("{} {:#04X}: {}", port, mask, level)));
            }
            Command::Read(port) => {
                let pins = gpio.read_port(port)?;
                return Ok(Some(format!("{}: {:#04X} {:08b}", port, pins, pins)));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helios::registers;
    use portio::SimulatedIoSpace;

    #[test]
    fn parsing_commands() {
        assert_eq!(
            "dir:cl:out".parse::<Command>(),
            Ok(Command::SetDirection(SubPort::CLow, Direction::Output))
        );
        assert_eq!(
            "dir:A:in".parse::<Command>(),
            Ok(Command::SetDirection(SubPort::A, Direction::Input))
        );
        assert_eq!("on:c:0x01".parse::<Command>(), Ok(Command::PinOn(DataPort::C, 0x01)));
        assert_eq!(
            "off:b:0b1000_0001".parse::<Command>(),
            Ok(Command::PinOff(DataPort::B, 0x81))
        );
        assert_eq!("toggle:a:255".parse::<Command>(), Ok(Command::Toggle(DataPort::A, 0xFF)));
        assert_eq!("write:b:0xA5".parse::<Command>(), Ok(Command::Write(DataPort::B, 0xA5)));
        assert_eq!(
            "read-pin:c:0x81".parse::<Command>(),
            Ok(Command::ReadPin(DataPort::C, 0x81))
        );
        assert_eq!("read:a".parse::<Command>(), Ok(Command::Read(DataPort::A)));
    }

    #[test]
    fn parsing_errors() {
        assert_eq!(
            "blink:a".parse::<Command>(),
            Err(ParseCommandError::UnknownVerb("blink".to_string()))
        );
        assert_eq!(
            "on:a".parse::<Command>(),
            Err(ParseCommandError::WrongArgumentCount("on".to_string(), 2))
        );
        assert_eq!(
            "read:a:1".parse::<Command>(),
            Err(ParseCommandError::WrongArgumentCount("read".to_string(), 1))
        );
        assert_eq!(
            "dir:c:in".parse::<Command>(),
            Err(ParseCommandError::NotASubPort(Port::C))
        );
        assert_eq!(
            "on:ch:1".parse::<Command>(),
            Err(ParseCommandError::NotADataPort(Port::CHigh))
        );
        assert_eq!(
            "read:cl".parse::<Command>(),
            Err(ParseCommandError::NotADataPort(Port::CLow))
        );
        assert!(matches!(
            "on:x:1".parse::<Command>(),
            Err(ParseCommandError::Port(_))
        ));
        assert!(matches!(
            "dir:a:up".parse::<Command>(),
            Err(ParseCommandError::Direction(_))
        ));
        assert!(matches!(
            "write:a:256".parse::<Command>(),
            Err(ParseCommandError::Number(..))
        ));
    }

    #[test]
    fn parsing_bytes() {
        assert_eq!(parse_byte("0"), Ok(0));
        assert_eq!(parse_byte("200"), Ok(200));
        assert_eq!(parse_byte("0xff"), Ok(0xFF));
        assert_eq!(parse_byte("0b0000_0100"), Ok(4));
        assert!(parse_byte("0x100").is_err());
        assert!(parse_byte("-1").is_err());
    }

    #[test]
    fn executing_commands() {
        let space = SimulatedIoSpace::new(registers::WINDOW_START, registers::WINDOW_LEN);
        let mut gpio = PortController::initialized(space).unwrap();
        let script = [
            "dir:cl:out",
            "on:c:0x01",
            "read-pin:c:0x01",
            "off:c:0x01",
            "read-pin:c:0x01",
            "write:a:0xA5",
            "toggle:a:0x0F",
            "read:a",
        ];
        let output: Vec<String> = script
            .iter()
            .map(|s| s.parse::<Command>().unwrap())
            .filter_map(|command| command.execute(&mut gpio).unwrap())
            .collect();
        itertools::assert_equal(
            output.iter().map(String::as_str),
            ["C 0x01: high", "C 0x01: low", "A: 0xAA 10101010"],
        );
    }
}
