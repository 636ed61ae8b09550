// This library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this library.  If not, see <http://www.gnu.org/licenses/>.
//! Push-button debouncing and press classification.
//!
//! The timer interrupt owns an [`InputDebouncer`] and samples the button once
//! per tick. Classified presses cross to the main loop through
//! [`ButtonEvents`], a pair of sticky flags with exactly one producer handle
//! and one consumer handle. The producer can only raise a flag and the
//! consumer can only take (read and clear) it, so no lock is needed.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;
use portable_atomic::{AtomicBool, Ordering};

use crate::infallible;

/// The hold counter saturates here instead of wrapping.
pub const HOLD_LIMIT: u8 = 100;

// Hold lengths in timer ticks (16.384 ms each on a 16 MHz part).
const SHORT_MIN_TICKS: u8 = 2;
const SHORT_MAX_TICKS: u8 = 19;
const LONG_MIN_TICKS: u8 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Short,
    Long,
}

impl Press {
    /// Classify a completed hold of `ticks` samples.
    ///
    /// Holds between a short and a long press are dropped.
    #[must_use]
    pub const fn classify(ticks: u8) -> Option<Self> {
        match ticks {
            SHORT_MIN_TICKS..=SHORT_MAX_TICKS => Some(Self::Short),
            LONG_MIN_TICKS..=u8::MAX => Some(Self::Long),
            _ => None,
        }
    }
}

/// Short and long press flags shared between the timer interrupt and the
/// main loop.
pub struct ButtonEvents {
    short: AtomicBool,
    long: AtomicBool,
    split: AtomicBool,
}

impl ButtonEvents {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            short: AtomicBool::new(false),
            long: AtomicBool::new(false),
            split: AtomicBool::new(false),
        }
    }

    /// Hand out the producer and consumer halves. Returns `None` on every
    /// call after the first.
    pub fn split(&self) -> Option<(PressProducer<'_>, PressConsumer<'_>)> {
        if self.split.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some((PressProducer { events: self }, PressConsumer { events: self }))
    }

    fn flag(&self, press: Press) -> &AtomicBool {
        match press {
            Press::Short => &self.short,
            Press::Long => &self.long,
        }
    }
}

impl Default for ButtonEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupt side of [`ButtonEvents`].
pub struct PressProducer<'a> {
    events: &'a ButtonEvents,
}

impl PressProducer<'_> {
    /// Raise the flag for `press`. A flag that is already raised stays raised.
    pub fn post(&self, press: Press) {
        self.events.flag(press).store(true, Ordering::Release);
    }
}

/// Main loop side of [`ButtonEvents`].
pub struct PressConsumer<'a> {
    events: &'a ButtonEvents,
}

impl PressConsumer<'_> {
    /// Read and clear the flag for `press` in one step.
    pub fn take(&mut self, press: Press) -> bool {
        self.events.flag(press).swap(false, Ordering::AcqRel)
    }

    #[must_use]
    pub fn pending(&self, press: Press) -> bool {
        self.events.flag(press).load(Ordering::Acquire)
    }
}

/// Hold counter state machine for one active-low button.
pub struct InputDebouncer<'a, P> {
    button: P,
    hold: u8,
    events: PressProducer<'a>,
}

impl<'a, P> InputDebouncer<'a, P> {
    pub fn new(button: P, events: PressProducer<'a>) -> Self {
        Self {
            button,
            hold: 0,
            events,
        }
    }

    /// Feed one sample. Returns the press posted on this sample, if any.
    pub fn sample(&mut self, pressed: bool) -> Option<Press> {
        if pressed {
            if self.hold < HOLD_LIMIT {
                self.hold += 1;
            }
            return None;
        }
        if self.hold == 0 {
            return None;
        }
        let press = Press::classify(self.hold);
        self.hold = 0;
        if let Some(press) = press {
            self.events.post(press);
        }
        press
    }

    #[must_use]
    pub fn hold(&self) -> u8 {
        self.hold
    }
}

impl<P: InputPin<Error = Infallible>> InputDebouncer<'_, P> {
    /// Sample the button line. Call once per timer tick.
    pub fn tick(&mut self) -> Option<Press> {
        let pressed = infallible(self.button.is_low());
        self.sample(pressed)
    }
}
