//! Board wiring and timing for the counter panel.
//!
//! Pin numbers are Raspberry Pi Pico GPIO numbers. The firmware binary takes
//! its pins from `rp_pico::Pins` in the same order as [`BOARD_PINS`].

use core::fmt;

/// Dwell (multiplexer passes per counter value) at power-on.
pub const INITIAL_DWELL: u32 = 100;
/// Amount added to the dwell on each button interrupt.
pub const DWELL_STEP: u32 = 100;
/// Upper bound on the dwell. `None` keeps growth unbounded.
pub const DWELL_CEILING: Option<u32> = None;
/// How long the segment register's outputs stay enabled per digit.
pub const SEGMENT_PULSE_MS: u32 = 1;
/// Clock pulses per shift-out: 8 data bits plus one trailing clock.
pub const SHIFT_CLOCKS: u8 = 9;

/// The four control lines of one 74HC595.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterPins {
    pub data: u8,
    pub output_enable: u8,
    pub clock: u8,
    pub clear: u8,
}

/// Every GPIO role on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardPins {
    pub binary: RegisterPins,
    pub segment: RegisterPins,
    pub ones: u8,
    pub tens: u8,
    pub hundreds1: u8,
    pub hundreds2: u8,
    pub button: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    BinaryData,
    BinaryOutputEnable,
    BinaryClock,
    BinaryClear,
    SegmentData,
    SegmentOutputEnable,
    SegmentClock,
    SegmentClear,
    OnesAnode,
    TensAnode,
    Hundreds1,
    Hundreds2,
    Button,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The same GPIO is claimed by two roles.
    PinConflict {
        pin: u8,
        first: PinRole,
        second: PinRole,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PinConflict { pin, first, second } => {
                write!(f, "GPIO{} assigned to both {:?} and {:?}", pin, first, second)
            }
        }
    }
}

pub const BOARD_PINS: BoardPins = BoardPins {
    binary: RegisterPins {
        data: 2,
        output_enable: 3,
        clock: 4,
        clear: 5,
    },
    segment: RegisterPins {
        data: 6,
        output_enable: 7,
        clock: 8,
        clear: 9,
    },
    ones: 10,
    tens: 11,
    hundreds1: 12,
    hundreds2: 13,
    button: 15,
};

// Checked at compile time as well as at bring-up.
const _: () = assert!(BOARD_PINS.validate().is_ok());

impl BoardPins {
    const ROLE_COUNT: usize = 13;

    /// Every (pin, role) pair in wiring order.
    pub const fn assignments(&self) -> [(u8, PinRole); Self::ROLE_COUNT] {
        [
            (self.binary.data, PinRole::BinaryData),
            (self.binary.output_enable, PinRole::BinaryOutputEnable),
            (self.binary.clock, PinRole::BinaryClock),
            (self.binary.clear, PinRole::BinaryClear),
            (self.segment.data, PinRole::SegmentData),
            (self.segment.output_enable, PinRole::SegmentOutputEnable),
            (self.segment.clock, PinRole::SegmentClock),
            (self.segment.clear, PinRole::SegmentClear),
            (self.ones, PinRole::OnesAnode),
            (self.tens, PinRole::TensAnode),
            (self.hundreds1, PinRole::Hundreds1),
            (self.hundreds2, PinRole::Hundreds2),
            (self.button, PinRole::Button),
        ]
    }

    /// Rejects any GPIO used for more than one role.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        let roles = self.assignments();
        let mut i = 0;
        while i < roles.len() {
            let mut j = i + 1;
            while j < roles.len() {
                if roles[i].0 == roles[j].0 {
                    return Err(ConfigError::PinConflict {
                        pin: roles[i].0,
                        first: roles[i].1,
                        second: roles[j].1,
                    });
                }
                j += 1;
            }
            i += 1;
        }
        Ok(())
    }
}
