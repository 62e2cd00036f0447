//! Time-sliced refresh of the two 7-segment digits.
//!
//! Both digits share one segment register. Each pass lights the ones digit
//! for one pulse, then the tens digit for one pulse, with the anode of the
//! idle digit released before the other is driven.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::config::SEGMENT_PULSE_MS;
use crate::segment::{Digit, SegmentEncoder};
use crate::shift_register::ShiftRegister;

pub struct Multiplexer<P> {
    ones: P,
    tens: P,
    encoder: SegmentEncoder<P>,
    active: Option<Digit>,
}

impl<P: OutputPin> Multiplexer<P> {
    pub fn new(mut ones: P, mut tens: P, encoder: SegmentEncoder<P>) -> Self {
        ones.set_low().ok();
        tens.set_low().ok();
        Self {
            ones,
            tens,
            encoder,
            active: None,
        }
    }

    /// Digit whose anode is currently driven, if any.
    pub fn active(&self) -> Option<Digit> {
        self.active
    }

    fn select(&mut self, digit: Digit) {
        let (on, off) = match digit {
            Digit::Ones => (&mut self.ones, &mut self.tens),
            Digit::Tens => (&mut self.tens, &mut self.ones),
        };
        off.set_low().ok();
        on.set_high().ok();
        self.active = Some(digit);
    }

    fn show<D: DelayMs<u32>>(
        &mut self,
        segment: &mut ShiftRegister<P>,
        number: u8,
        digit: Digit,
        delay: &mut D,
    ) {
        self.select(digit);
        self.encoder.display_int(segment, number, digit);
        segment.flash(delay, SEGMENT_PULSE_MS);
    }

    /// One ones-then-tens pass.
    pub fn pass<D: DelayMs<u32>>(&mut self, segment: &mut ShiftRegister<P>, number: u8, delay: &mut D) {
        let mut digit = Digit::Ones;
        for _ in 0..2 {
            self.show(segment, number, digit, delay);
            digit = digit.next();
        }
    }

    /// Runs `passes` full passes for `number`. Zero passes leaves the
    /// display untouched.
    pub fn refresh<D: DelayMs<u32>>(
        &mut self,
        segment: &mut ShiftRegister<P>,
        number: u8,
        passes: u32,
        delay: &mut D,
    ) {
        for _ in 0..passes {
            self.pass(segment, number, delay);
        }
    }
}
