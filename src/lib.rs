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
//! Nixie clock firmware logic.
//!
//! Four nixie tubes show the time kept by a DS3231 RTC on the two-wire bus.
//! A single button toggles the backlight (short press) and walks through
//! setting the hours and minutes (long press).
//!
//! Everything here is hardware independent: the bus is reached through
//! [`bus::TimeBus`], tube and backlight lines through `embedded-hal` pins.
//! The AVR bindings live in the firmware binary.

#![cfg_attr(not(test), no_std)]

pub mod bcd;
pub mod bus;
pub mod button;
pub mod controller;
pub mod display;
pub mod ds3231;
pub mod log;

#[cfg(test)]
mod sim;

use core::convert::Infallible;

/// Unwrap the result of an operation that cannot fail, such as driving an
/// AVR port pin.
#[inline(always)]
pub fn infallible<T>(r: Result<T, Infallible>) -> T {
    match r {
        Ok(v) => v,
        Err(never) => match never {},
    }
}
