//! Recording pins and delays for host tests, plus a behavioural 74HC595.

use core::convert::Infallible;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Line {
    BinData,
    BinOe,
    BinClk,
    BinClr,
    SegData,
    SegOe,
    SegClk,
    SegClr,
    Ones,
    Tens,
    Hundreds1,
    Hundreds2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Pin(Line, bool),
    Delay(u32),
}

#[derive(Default)]
pub struct Probe {
    pub events: Vec<Event>,
    levels: HashMap<Line, bool>,
}

impl Probe {
    pub fn level(&self, line: Line) -> bool {
        self.levels.get(&line).copied().unwrap_or(false)
    }
}

/// Shared event log every mock pin and delay writes into.
#[derive(Clone, Default)]
pub struct Bus(Rc<RefCell<Probe>>);

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, line: Line) -> MockPin {
        MockPin {
            line,
            bus: self.clone(),
        }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay { bus: self.clone() }
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.0.borrow_mut().events.clear();
    }

    pub fn level(&self, line: Line) -> bool {
        self.0.borrow().level(line)
    }

    /// Levels of `lines` right before each delay in the log.
    pub fn levels_at_delays(&self, lines: &[Line]) -> Vec<Vec<bool>> {
        let mut levels: HashMap<Line, bool> = HashMap::new();
        let mut out = Vec::new();
        for event in self.events() {
            match event {
                Event::Pin(line, high) => {
                    levels.insert(line, high);
                }
                Event::Delay(_) => out.push(
                    lines
                        .iter()
                        .map(|l| levels.get(l).copied().unwrap_or(false))
                        .collect(),
                ),
            }
        }
        out
    }

    /// Every write made to `line`, in order.
    pub fn writes(&self, line: Line) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Pin(l, high) if l == line => Some(high),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: Event) {
        let mut probe = self.0.borrow_mut();
        if let Event::Pin(line, high) = event {
            probe.levels.insert(line, high);
        }
        probe.events.push(event);
    }
}

pub struct MockPin {
    line: Line,
    bus: Bus,
}

impl OutputPin for MockPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.bus.record(Event::Pin(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.bus.record(Event::Pin(self.line, true));
        Ok(())
    }
}

pub struct MockDelay {
    bus: Bus,
}

impl DelayMs<u32> for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.bus.record(Event::Delay(ms));
    }
}

/// Replays the log through an 8-bit serial-in/parallel-out register.
///
/// Clear low empties the register; a rising clock shifts the current data
/// level into Q0 and moves every other bit up by one.
pub struct Hc595 {
    pub contents: u8,
    data: Line,
    clock: Line,
    clear: Line,
}

impl Hc595 {
    pub fn new(data: Line, clock: Line, clear: Line, contents: u8) -> Self {
        Self {
            contents,
            data,
            clock,
            clear,
        }
    }

    pub fn binary(contents: u8) -> Self {
        Self::new(Line::BinData, Line::BinClk, Line::BinClr, contents)
    }

    pub fn segment(contents: u8) -> Self {
        Self::new(Line::SegData, Line::SegClk, Line::SegClr, contents)
    }

    pub fn replay(&mut self, events: &[Event]) -> u8 {
        let mut data = false;
        let mut clock = false;
        for event in events {
            match *event {
                Event::Pin(line, high) if line == self.data => data = high,
                Event::Pin(line, high) if line == self.clock => {
                    if high && !clock {
                        self.contents = (self.contents << 1) | u8::from(data);
                    }
                    clock = high;
                }
                Event::Pin(line, false) if line == self.clear => self.contents = 0,
                _ => {}
            }
        }
        self.contents
    }
}
