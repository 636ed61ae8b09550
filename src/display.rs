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
//! Nixie tube display.
//!
//! Each tube sits behind a BCD decoder with four inputs A..D (bit 0..3 of the
//! digit). The board wires those inputs to port lines in a different order
//! for every tube, see [`TUBE_WIRING`]. Values 10..=15 light no cathode on
//! the decoder, so [`BLANK`] turns a tube off.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use crate::infallible;

pub const TUBES: usize = 4;

/// Digit value that leaves a tube dark.
pub const BLANK: u8 = 0x0a;

const SELF_TEST_STEP_MS: u32 = 300;

/// Port lines feeding the tube decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Line {
    PB0,
    PB1,
    PB2,
    PB3,
    PB4,
    PC0,
    PC1,
    PC2,
    PC3,
    PD0,
    PD1,
    PD2,
    PD4,
    PD5,
    PD6,
    PD7,
}

pub const LINES: usize = 16;

impl Line {
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Decoder input lines per tube, in A, B, C, D order.
pub const TUBE_WIRING: [[Line; 4]; TUBES] = [
    [Line::PC0, Line::PC2, Line::PC3, Line::PC1],
    [Line::PD4, Line::PD1, Line::PD0, Line::PD2],
    [Line::PB0, Line::PD6, Line::PD5, Line::PD7],
    [Line::PB1, Line::PB3, Line::PB4, Line::PB2],
];

/// Lines to drive high for every (tube, 4-bit value).
const LINE_MASKS: [[u16; 16]; TUBES] = line_masks();

const fn line_masks() -> [[u16; 16]; TUBES] {
    let mut masks = [[0; 16]; TUBES];
    let mut tube = 0;
    while tube < TUBES {
        let mut value = 0;
        while value < 16 {
            let mut bit = 0;
            while bit < 4 {
                if value & (1 << bit) != 0 {
                    masks[tube][value] |= TUBE_WIRING[tube][bit].bit();
                }
                bit += 1;
            }
            value += 1;
        }
        tube += 1;
    }
    masks
}

/// Digit state for the four tubes plus the backlight line.
pub struct DisplayDriver<P> {
    lines: [P; LINES],
    backlight: P,
    digits: [u8; TUBES],
}

impl<P> DisplayDriver<P> {
    /// `lines` is indexed by [`Line::index`]. All tubes start at 0.
    pub fn new(lines: [P; LINES], backlight: P) -> Self {
        Self {
            lines,
            backlight,
            digits: [0; TUBES],
        }
    }

    /// Store `value` for `tube`. Takes effect on the next [`refresh`](Self::refresh).
    /// Tubes past the last one are ignored.
    pub fn set_digit(&mut self, tube: usize, value: u8) {
        if let Some(slot) = self.digits.get_mut(tube) {
            *slot = value;
        }
    }

    #[must_use]
    pub fn digits(&self) -> [u8; TUBES] {
        self.digits
    }
}

impl<P: OutputPin<Error = Infallible>> DisplayDriver<P> {
    /// Push every stored digit out to its tube.
    pub fn refresh(&mut self) {
        for tube in 0..TUBES {
            self.drive(tube, self.digits[tube]);
        }
    }

    /// Show `n` (0..=99) on the two left tubes.
    pub fn display_left(&mut self, n: u8) {
        self.digits[0] = (n / 10) % 10;
        self.digits[1] = n % 10;
        self.refresh();
    }

    /// Show `n` (0..=99) on the two right tubes.
    pub fn display_right(&mut self, n: u8) {
        self.digits[2] = (n / 10) % 10;
        self.digits[3] = n % 10;
        self.refresh();
    }

    pub fn backlight_on(&mut self) {
        infallible(self.backlight.set_high());
    }

    pub fn backlight_off(&mut self) {
        infallible(self.backlight.set_low());
    }

    /// Sweep every tube through 0..=9 to exercise all cathodes.
    ///
    /// Stored digits are left alone; the next refresh restores them.
    pub fn self_test<D: DelayNs>(&mut self, delay: &mut D) {
        for value in 0..=9 {
            for tube in 0..TUBES {
                self.drive(tube, value);
            }
            delay.delay_ms(SELF_TEST_STEP_MS);
        }
    }

    fn drive(&mut self, tube: usize, value: u8) {
        let mask = LINE_MASKS[tube][usize::from(value & 0x0f)];
        for line in TUBE_WIRING[tube] {
            let pin = &mut self.lines[line.index()];
            if mask & line.bit() != 0 {
                infallible(pin.set_high());
            } else {
                infallible(pin.set_low());
            }
        }
    }
}

impl<P: StatefulOutputPin<Error = Infallible>> DisplayDriver<P> {
    /// Flip the backlight based on the line's current output level.
    pub fn backlight_toggle(&mut self) {
        if infallible(self.backlight.is_set_high()) {
            self.backlight_off();
        } else {
            self.backlight_on();
        }
    }

    pub fn backlight_is_on(&mut self) -> bool {
        infallible(self.backlight.is_set_high())
    }
}
