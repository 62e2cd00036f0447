//! Counter state, the button-driven dwell, and the outer display cycle.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use portable_atomic::{AtomicU32, Ordering};

use crate::display::Multiplexer;
use crate::shift_register::{RegisterBank, RegisterId};
use crate::status::{format_status, StatusSink, STATUS_LINE_LEN};

/// Free-running 8-bit counter. Wraps from 255 to 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counter {
    value: u8,
}

impl Counter {
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn advance(&mut self) {
        self.value = self.value.wrapping_add(1);
    }
}

/// Multiplexer passes per counter value, shared between the button
/// interrupt (writer) and the idle loop (reader).
///
/// There is no debounce: a bouncing contact can fire the interrupt, and so
/// add a step, several times per press.
pub struct DwellDuration {
    passes: AtomicU32,
    step: u32,
    ceiling: Option<u32>,
}

impl DwellDuration {
    pub const fn new(initial: u32, step: u32, ceiling: Option<u32>) -> Self {
        Self {
            passes: AtomicU32::new(initial),
            step,
            ceiling,
        }
    }

    pub fn read(&self) -> u32 {
        self.passes.load(Ordering::Acquire)
    }

    /// Adds one step and returns the new dwell. Saturates at the ceiling
    /// when one is set, and at `u32::MAX` otherwise.
    pub fn add(&self) -> u32 {
        let previous = self
            .passes
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |d| Some(self.next(d)))
            .unwrap_or_else(|d| d);
        self.next(previous)
    }

    fn next(&self, passes: u32) -> u32 {
        let grown = passes.saturating_add(self.step);
        match self.ceiling {
            Some(max) => grown.min(max.max(passes)),
            None => grown,
        }
    }
}

/// Everything the idle loop drives: both registers, the digit multiplexer
/// and the counter.
pub struct CounterPanel<P> {
    registers: RegisterBank<P>,
    mux: Multiplexer<P>,
    counter: Counter,
}

impl<P: OutputPin> CounterPanel<P> {
    /// Clears both registers and starts counting from zero.
    pub fn new(mut registers: RegisterBank<P>, mux: Multiplexer<P>) -> Self {
        registers.reset();
        Self {
            registers,
            mux,
            counter: Counter::default(),
        }
    }

    pub fn counter(&self) -> Counter {
        self.counter
    }

    /// Shows the current value for one dwell period, reports it, and moves
    /// to the next value.
    ///
    /// The dwell is sampled once on entry; a button press mid-cycle takes
    /// effect on the next value.
    pub fn run_cycle<D, S>(&mut self, dwell: &DwellDuration, delay: &mut D, sink: &mut S)
    where
        D: DelayMs<u32>,
        S: StatusSink,
    {
        let value = self.counter.value();

        self.registers.shift_out(RegisterId::Binary, value);
        self.registers.binary.enable_outputs();

        let passes = dwell.read();
        self.mux
            .refresh(&mut self.registers.segment, value, passes, delay);

        self.registers.binary.disable_outputs();

        let mut line = [0; STATUS_LINE_LEN];
        sink.emit(format_status(value, &mut line));

        self.counter.advance();
    }
}
