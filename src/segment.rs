//! Digit-to-segment encoding for the dual 7-segment display.
//!
//! Values of 100 and above are shown with two "hundreds" LEDs next to the
//! digits: one for 100..=199, both for 200..=255.

use embedded_hal::digital::v2::OutputPin;

use crate::shift_register::ShiftRegister;

/// Segment bits for 0-9 in the order the display is wired, 1 = lit.
pub const SEGMENT_TABLE: [u8; 10] = [0x77, 0x11, 0x6B, 0x3B, 0x1D, 0x3E, 0x7E, 0x13, 0x7F, 0x3F];

/// Written to the segment register when there is nothing valid to show.
pub const BLANK: u8 = 0xFF;

/// Digit position on the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Digit {
    Ones,
    Tens,
}

impl Digit {
    pub fn next(self) -> Self {
        match self {
            Digit::Ones => Digit::Tens,
            Digit::Tens => Digit::Ones,
        }
    }
}

/// Active-high segment bits for `digit`, or `None` outside 0-9.
pub fn pattern(digit: u8) -> Option<u8> {
    SEGMENT_TABLE.get(usize::from(digit)).copied()
}

/// What the register receives for `digit`: the table entry inverted, since
/// the segments sink current. Out-of-range digits blank the display.
pub fn encode(digit: u8) -> u8 {
    pattern(digit).map_or(BLANK, |bits| !bits)
}

/// `number` split into hundreds indicators and a two-digit remainder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposed {
    pub hundreds1: bool,
    pub hundreds2: bool,
    pub remainder: u8,
}

impl Decomposed {
    pub fn new(number: u8) -> Self {
        let mut remainder = number;
        let hundreds1 = remainder >= 200;
        if hundreds1 {
            remainder -= 100;
        }
        let hundreds2 = remainder >= 100;
        if hundreds2 {
            remainder -= 100;
        }
        Self {
            hundreds1,
            hundreds2,
            remainder,
        }
    }

    pub fn digit(&self, place: Digit) -> u8 {
        match place {
            Digit::Ones => self.remainder % 10,
            Digit::Tens => self.remainder / 10,
        }
    }
}

/// Owns the two hundreds indicator lines and loads digits into the segment
/// register. Output enable is left to the caller.
pub struct SegmentEncoder<P> {
    hundreds1: P,
    hundreds2: P,
}

impl<P: OutputPin> SegmentEncoder<P> {
    pub fn new(mut hundreds1: P, mut hundreds2: P) -> Self {
        hundreds1.set_low().ok();
        hundreds2.set_low().ok();
        Self {
            hundreds1,
            hundreds2,
        }
    }

    /// Sets the hundreds indicators for `number` and shifts the segment
    /// pattern for its `place` digit into `register`.
    pub fn display_int(&mut self, register: &mut ShiftRegister<P>, number: u8, place: Digit) {
        self.hundreds1.set_low().ok();
        self.hundreds2.set_low().ok();

        let parts = Decomposed::new(number);
        if parts.hundreds1 {
            self.hundreds1.set_high().ok();
        }
        if parts.hundreds2 {
            self.hundreds2.set_high().ok();
        }

        register.shift_out(encode(parts.digit(place)));
    }
}
