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
//! Clock and time-setting modes.
//!
//! [`ModeController::step`] is one pass of the main loop. In clock mode it
//! shows the RTC time, a short press toggles the backlight and a long press
//! starts setting the time. In settings mode short presses bump the hours,
//! then (after a long press) the minutes, and a final long press writes the
//! new time back to the RTC if anything changed.

use core::convert::Infallible;

use embedded_hal::digital::StatefulOutputPin;
use ufmt::{uWrite, uwriteln};

use crate::bcd::nibbles;
use crate::button::{Press, PressConsumer};
use crate::display::{DisplayDriver, BLANK};
use crate::ds3231::RtcDevice;
use crate::log::TwoDigits;

const HOURS_MAX: u8 = 23;
const MINUTES_MAX: u8 = 59;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Hours,
    Minutes,
}

/// Working copy of the time while it is being set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub field: Field,
    pub hours: u8,
    pub minutes: u8,
    /// Set by the first increment; gates the write back to the RTC.
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Clock,
    Settings(Settings),
}

/// Increment with wrap to zero past `max`.
const fn bump(value: u8, max: u8) -> u8 {
    let next = value.wrapping_add(1);
    if next > max {
        0
    } else {
        next
    }
}

pub struct ModeController<'a, R, P, W> {
    rtc: R,
    display: DisplayDriver<P>,
    buttons: PressConsumer<'a>,
    log: W,
    mode: Mode,
}

impl<'a, R, P, W> ModeController<'a, R, P, W>
where
    R: RtcDevice,
    P: StatefulOutputPin<Error = Infallible>,
    W: uWrite,
{
    pub fn new(rtc: R, display: DisplayDriver<P>, buttons: PressConsumer<'a>, log: W) -> Self {
        Self {
            rtc,
            display,
            buttons,
            log,
            mode: Mode::Clock,
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn display(&self) -> &DisplayDriver<P> {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplayDriver<P> {
        &mut self.display
    }

    pub fn rtc(&self) -> &R {
        &self.rtc
    }

    pub fn rtc_mut(&mut self) -> &mut R {
        &mut self.rtc
    }

    pub fn log(&self) -> &W {
        &self.log
    }

    /// Run the clock forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// One pass of the main loop.
    pub fn step(&mut self) {
        self.mode = match self.mode {
            Mode::Clock => self.clock_step(),
            Mode::Settings(settings) => self.settings_step(settings),
        };
    }

    fn clock_step(&mut self) -> Mode {
        let time = self.rtc.read_time();

        // Valid BCD time nibbles are already decimal digits.
        let (hours_tens, hours_units) = nibbles(time.hours);
        let (minutes_tens, minutes_units) = nibbles(time.minutes);
        self.display.set_digit(0, hours_tens);
        self.display.set_digit(1, hours_units);
        self.display.set_digit(2, minutes_tens);
        self.display.set_digit(3, minutes_units);
        self.display.refresh();

        if self.buttons.take(Press::Short) {
            self.display.backlight_toggle();
            let state = if self.display.backlight_is_on() { "on" } else { "off" };
            uwriteln!(&mut self.log, "backlight {}", state).ok();
        }

        if self.buttons.take(Press::Long) {
            uwriteln!(&mut self.log, "mode: set hours").ok();
            return Mode::Settings(Settings {
                field: Field::Hours,
                hours: time.hours_dec(),
                minutes: time.minutes_dec(),
                changed: false,
            });
        }

        Mode::Clock
    }

    fn settings_step(&mut self, mut settings: Settings) -> Mode {
        match settings.field {
            Field::Hours => {
                self.display.set_digit(2, BLANK);
                self.display.set_digit(3, BLANK);
                self.display.display_left(settings.hours);

                if self.buttons.take(Press::Short) {
                    settings.hours = bump(settings.hours, HOURS_MAX);
                    settings.changed = true;
                }

                if self.buttons.take(Press::Long) {
                    uwriteln!(&mut self.log, "mode: set minutes").ok();
                    settings.field = Field::Minutes;
                }
            }
            Field::Minutes => {
                self.display.set_digit(0, BLANK);
                self.display.set_digit(1, BLANK);
                self.display.display_right(settings.minutes);

                if self.buttons.take(Press::Short) {
                    settings.minutes = bump(settings.minutes, MINUTES_MAX);
                    settings.changed = true;
                }

                if self.buttons.take(Press::Long) {
                    self.commit(settings);
                    uwriteln!(&mut self.log, "mode: clock").ok();
                    return Mode::Clock;
                }
            }
        }

        Mode::Settings(settings)
    }

    /// Write the edited time with seconds zeroed, unless nothing was edited.
    fn commit(&mut self, settings: Settings) {
        if !settings.changed {
            return;
        }
        self.rtc.write_time(settings.hours, settings.minutes, 0);
        uwriteln!(
            &mut self.log,
            "rtc <- {}:{}:00",
            TwoDigits(settings.hours),
            TwoDigits(settings.minutes)
        )
        .ok();
    }
}
