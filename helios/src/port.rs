use crate::registers;
use enum_map::Enum;
use std::fmt;
use std::str::FromStr;

/// A port name, as printed on the board. Ports A, B and C each have an 8-bit
/// data register. The direction of port C can additionally be configured
/// separately for its high and low nibble, hence `CHigh` and `CLow`; these two
/// don't have data registers of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    A,
    B,
    C,
    CHigh,
    CLow,
}

impl Port {
    /// The data register this port name refers to, if any.
    pub fn data_port(self) -> Option<DataPort> {
        match self {
            Port::A => Some(DataPort::A),
            Port::B => Some(DataPort::B),
            Port::C => Some(DataPort::C),
            Port::CHigh => None,
            Port::CLow => None,
        }
    }

    /// The direction-configurable sub-port this port name refers to, if any.
    /// Port C as a whole isn't one: its halves are configured separately.
    pub fn sub_port(self) -> Option<SubPort> {
        match self {
            Port::A => Some(SubPort::A),
            Port::B => Some(SubPort::B),
            Port::C => None,
            Port::CHigh => Some(SubPort::CHigh),
            Port::CLow => Some(SubPort::CLow),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Port::A => "A",
            Port::B => "B",
            Port::C => "C",
            Port::CHigh => "C-high",
            Port::CLow => "C-low",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Unknown port '{0}', expected one of: a, b, c, ch, cl")]
pub struct ParsePortError(String);

impl FromStr for Port {
    type Err = ParsePortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" => Ok(Port::A),
            "b" => Ok(Port::B),
            "c" => Ok(Port::C),
            "ch" | "c-high" => Ok(Port::CHigh),
            "cl" | "c-low" => Ok(Port::CLow),
            _ => Err(ParsePortError(s.to_string())),
        }
    }
}

/// A port with an 8-bit data register. Data operations always span the whole
/// byte.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataPort {
    A,
    B,
    C,
}

impl DataPort {
    pub const ALL: [DataPort; 3] = [DataPort::A, DataPort::B, DataPort::C];

    /// Address of the data register.
    pub fn register_address(self) -> u16 {
        match self {
            DataPort::A => registers::PORT_A,
            DataPort::B => registers::PORT_B,
            DataPort::C => registers::PORT_C,
        }
    }
}

impl From<DataPort> for Port {
    fn from(port: DataPort) -> Self {
        match port {
            DataPort::A => Port::A,
            DataPort::B => Port::B,
            DataPort::C => Port::C,
        }
    }
}

impl fmt::Display for DataPort {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&Port::from(*self), f)
    }
}

/// A group of pins that share a single bit in the control register, and thus
/// a single direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubPort {
    A,
    B,
    CHigh,
    CLow,
}

impl SubPort {
    pub const ALL: [SubPort; 4] = [SubPort::A, SubPort::B, SubPort::CHigh, SubPort::CLow];

    /// The control register bit responsible for this sub-port.
    pub fn control_bit(self) -> u8 {
        match self {
            SubPort::A => registers::control::PORT_A,
            SubPort::B => registers::control::PORT_B,
            SubPort::CHigh => registers::control::PORT_C_HIGH,
            SubPort::CLow => registers::control::PORT_C_LOW,
        }
    }
}

impl From<SubPort> for Port {
    fn from(sub_port: SubPort) -> Self {
        match sub_port {
            SubPort::A => Port::A,
            SubPort::B => Port::B,
            SubPort::CHigh => Port::CHigh,
            SubPort::CLow => Port::CLow,
        }
    }
}

impl fmt::Display for SubPort {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&Port::from(*self), f)
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Output = 0,
    Input = 1,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Direction::Output => "out",
            Direction::Input => "in",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Unknown direction '{0}', expected 'in' or 'out'")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "in" | "input" => Ok(Direction::Input),
            "out" | "output" => Ok(Direction::Output),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_ports() {
        assert_eq!("a".parse::<Port>(), Ok(Port::A));
        assert_eq!("B".parse::<Port>(), Ok(Port::B));
        assert_eq!("c".parse::<Port>(), Ok(Port::C));
        assert_eq!("CH".parse::<Port>(), Ok(Port::CHigh));
        assert_eq!("c-low".parse::<Port>(), Ok(Port::CLow));
        assert_eq!(
            "d".parse::<Port>(),
            Err(ParsePortError("d".to_string()))
        );
    }

    #[test]
    fn parsing_directions() {
        assert_eq!("in".parse::<Direction>(), Ok(Direction::Input));
        assert_eq!("OUTPUT".parse::<Direction>(), Ok(Direction::Output));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn data_ports_and_sub_ports() {
        assert_eq!(Port::A.data_port(), Some(DataPort::A));
        assert_eq!(Port::C.data_port(), Some(DataPort::C));
        assert_eq!(Port::CHigh.data_port(), None);
        assert_eq!(Port::CLow.data_port(), None);

        assert_eq!(Port::B.sub_port(), Some(SubPort::B));
        assert_eq!(Port::C.sub_port(), None);
        assert_eq!(Port::CHigh.sub_port(), Some(SubPort::CHigh));
        assert_eq!(Port::CLow.sub_port(), Some(SubPort::CLow));

        for port in DataPort::ALL {
            assert_eq!(Port::from(port).data_port(), Some(port));
        }
        for sub_port in SubPort::ALL {
            assert_eq!(Port::from(sub_port).sub_port(), Some(sub_port));
        }
    }

    #[test]
    fn control_bits() {
        itertools::assert_equal(
            SubPort::ALL.iter().map(|s| s.control_bit()),
            [0b0001_0000u8, 0b0000_0010, 0b0000_1000, 0b0000_0001],
        );
    }

    #[test]
    fn register_addresses() {
        itertools::assert_equal(
            DataPort::ALL.iter().map(|p| p.register_address()),
            [0x288u16, 0x289, 0x28A],
        );
    }

    #[test]
    fn display() {
        assert_eq!(DataPort::C.to_string(), "C");
        assert_eq!(SubPort::CHigh.to_string(), "C-high");
        assert_eq!(Direction::Input.to_string(), "in");
    }
}
