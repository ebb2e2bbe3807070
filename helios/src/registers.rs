//! The fixed register map of the Helios digital I/O block.

/// Selects the operating mode of the I/O block.
pub const BASE: u16 = 0x280;
pub const PORT_A: u16 = 0x288;
pub const PORT_B: u16 = 0x289;
pub const PORT_C: u16 = 0x28A;
/// Direction control for ports A, B and both halves of port C.
pub const CONTROL: u16 = 0x28B;

/// First port of the window that has to be made accessible.
pub const WINDOW_START: u16 = BASE;
pub const WINDOW_LEN: u16 = CONTROL - BASE + 1;

/// Written to the base register during initialization.
pub const MODE: u8 = 0x44;
/// Written to the control register during initialization: every sub-port
/// becomes an output.
pub const ALL_OUTPUTS: u8 = 0x00;

/// Bits of the control register. A bit set to 1 makes the corresponding
/// sub-port an input.
pub mod control {
    pub const PORT_A: u8 = 1 << 4;
    pub const PORT_B: u8 = 1 << 1;
    pub const PORT_C_HIGH: u8 = 1 << 3;
    pub const PORT_C_LOW: u8 = 1 << 0;
}

/// Pin masks, valid for every data port.
pub mod pins {
    pub const PIN0: u8 = 1 << 0;
    pub const PIN1: u8 = 1 << 1;
    pub const PIN2: u8 = 1 << 2;
    pub const PIN3: u8 = 1 << 3;
    pub const PIN4: u8 = 1 << 4;
    pub const PIN5: u8 = 1 << 5;
    pub const PIN6: u8 = 1 << 6;
    pub const PIN7: u8 = 1 << 7;

    pub const ALL: u8 = 0xFF;
}
