//! In-test stand-ins for the hardware the core drives.
#![allow(dead_code, reason = "Each test binary uses a different subset")]

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};
use timer_calc::{DisplayAdapter, Glyph, KeypadMatrix, ModeSignals, Relay, Result};

/// A GPIO line whose level can be observed and set from the test through a cloned handle.
#[derive(Debug, Clone, Default)]
pub struct MockPin(Rc<Cell<bool>>);

impl MockPin {
    pub fn is_high_level(&self) -> bool {
        self.0.get()
    }

    pub fn set_level(&self, high: bool) {
        self.0.set(high);
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

impl StatefulOutputPin for MockPin {
    fn is_set_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_set_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

/// Returns `N` pins and a second set of handles to the same lines.
pub fn pins<const N: usize>() -> ([MockPin; N], [MockPin; N]) {
    let pins: [MockPin; N] = core::array::from_fn(|_| MockPin::default());
    let handles = pins.clone();
    (pins, handles)
}

pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// One call into a [`RecordingDisplay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCall {
    Blank,
    Light(u8, Glyph, bool),
}

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub calls: Vec<DisplayCall>,
}

impl RecordingDisplay {
    /// Everything lit since the last blank.
    pub fn lit(&self) -> Vec<(u8, Glyph, bool)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                DisplayCall::Light(position, glyph, decimal_point) => {
                    Some((position, glyph, decimal_point))
                }
                DisplayCall::Blank => None,
            })
            .collect()
    }
}

impl DisplayAdapter for RecordingDisplay {
    fn blank(&mut self) -> Result<()> {
        self.calls.push(DisplayCall::Blank);
        Ok(())
    }

    fn light(&mut self, position: u8, glyph: Glyph, decimal_point: bool) -> Result<()> {
        self.calls.push(DisplayCall::Light(position, glyph, decimal_point));
        Ok(())
    }
}

/// A keypad where the test decides which key is held.
#[derive(Debug, Default)]
pub struct FakeMatrix {
    held: Option<(usize, usize)>,
    selected: Option<usize>,
    pub selections: usize,
}

impl FakeMatrix {
    pub fn press(&mut self, row: usize, column: usize) {
        self.held = Some((row, column));
    }

    pub fn lift(&mut self) {
        self.held = None;
    }
}

impl KeypadMatrix for FakeMatrix {
    fn select_row(&mut self, row: usize) -> Result<()> {
        self.selected = Some(row);
        self.selections += 1;
        Ok(())
    }

    fn pressed_columns(&mut self) -> Result<u8> {
        Ok(match (self.selected, self.held) {
            (Some(selected), Some((row, column))) if selected == row => 1 << column,
            _ => 0,
        })
    }

    fn release(&mut self) -> Result<()> {
        self.selected = None;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FakeModes {
    pub calculator: bool,
    pub timer: bool,
}

impl ModeSignals for FakeModes {
    fn calculator_requested(&mut self) -> Result<bool> {
        Ok(self.calculator)
    }

    fn timer_requested(&mut self) -> Result<bool> {
        Ok(self.timer)
    }
}

#[derive(Debug, Default)]
pub struct FakeRelay {
    pub energised: bool,
    pub toggles: usize,
    pub releases: usize,
}

impl Relay for FakeRelay {
    fn toggle(&mut self) -> Result<()> {
        self.energised = !self.energised;
        self.toggles += 1;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.energised = false;
        self.releases += 1;
        Ok(())
    }
}
