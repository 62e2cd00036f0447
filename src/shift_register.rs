//! 74HC595 driver for the two daisy-chained registers on the panel.
//!
//! Each register owns four lines: serial data (SER), shift clock (SRCLK),
//! clear (SRCLR, active low) and output enable (OE, active low). Shifting
//! never touches OE, so callers can load a register while its outputs are
//! dark and flash it afterwards.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::config::SHIFT_CLOCKS;

/// Which physical register a driver is wired to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterId {
    /// Drives the 10-LED binary strip.
    Binary,
    /// Drives the segments of both 7-segment digits.
    Segment,
}

pub struct ShiftRegister<P> {
    id: RegisterId,
    data: P,
    output_enable: P,
    clock: P,
    clear: P,
}

impl<P: OutputPin> ShiftRegister<P> {
    /// Takes ownership of the register's lines and drives them to their idle
    /// levels: data and clock low, clear high, outputs disabled.
    pub fn new(id: RegisterId, data: P, output_enable: P, clock: P, clear: P) -> Self {
        let mut reg = Self {
            id,
            data,
            output_enable,
            clock,
            clear,
        };
        reg.data.set_low().ok();
        reg.clock.set_low().ok();
        reg.output_enable.set_high().ok();
        reg.clear.set_high().ok();
        reg
    }

    pub fn id(&self) -> RegisterId {
        self.id
    }

    /// Power-on clear: one clock pulse while SRCLR is held low.
    pub fn reset(&mut self) {
        self.clear.set_low().ok();
        self.clock.set_low().ok();
        self.clock.set_high().ok();
        self.clear.set_high().ok();
    }

    /// Clears the register, then clocks `value` in least-significant bit
    /// first.
    ///
    /// The loop runs [`SHIFT_CLOCKS`] times, one more than the register
    /// width: the ninth clock shifts a zero into Q0 and pushes bit 0 out
    /// past Q7.
    pub fn shift_out(&mut self, value: u8) {
        self.clear.set_low().ok();
        self.clear.set_high().ok();

        let value = u16::from(value);
        for bit in 0..SHIFT_CLOCKS {
            if (value >> bit) & 1 != 0 {
                self.data.set_high().ok();
            } else {
                self.data.set_low().ok();
            }

            self.clock.set_high().ok();
            self.clock.set_low().ok();
        }
    }

    pub fn enable_outputs(&mut self) {
        self.output_enable.set_low().ok();
    }

    pub fn disable_outputs(&mut self) {
        self.output_enable.set_high().ok();
    }

    /// Enables the outputs for `ms` milliseconds, then turns them off again.
    pub fn flash<D: DelayMs<u32>>(&mut self, delay: &mut D, ms: u32) {
        self.enable_outputs();
        delay.delay_ms(ms);
        self.disable_outputs();
    }
}

/// Both registers, addressable by [`RegisterId`].
pub struct RegisterBank<P> {
    pub binary: ShiftRegister<P>,
    pub segment: ShiftRegister<P>,
}

impl<P: OutputPin> RegisterBank<P> {
    pub fn new(binary: ShiftRegister<P>, segment: ShiftRegister<P>) -> Self {
        debug_assert_eq!(binary.id(), RegisterId::Binary);
        debug_assert_eq!(segment.id(), RegisterId::Segment);
        Self { binary, segment }
    }

    pub fn register(&mut self, id: RegisterId) -> &mut ShiftRegister<P> {
        match id {
            RegisterId::Binary => &mut self.binary,
            RegisterId::Segment => &mut self.segment,
        }
    }

    pub fn shift_out(&mut self, id: RegisterId, value: u8) {
        self.register(id).shift_out(value);
    }

    pub fn reset(&mut self) {
        self.binary.reset();
        self.segment.reset();
    }
}
