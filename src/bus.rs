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
//! Two-wire bus primitives.
//!
//! The clock talks to exactly one device and never checks acknowledge bits.
//! Implementations wait for the hardware to finish each step with no timeout,
//! so a device that stops responding stalls the caller for good.

/// Byte level access to the two-wire bus.
pub trait TimeBus {
    /// Send a start (or repeated start) condition and wait for it to complete.
    fn start(&mut self);

    /// Send a stop condition. Does not wait.
    fn stop(&mut self);

    /// Clock out one byte and wait for the transfer to complete.
    fn write_byte(&mut self, byte: u8);

    /// Clock in one byte and return it once the transfer completes.
    fn read_byte(&mut self) -> u8;
}

impl<T: TimeBus + ?Sized> TimeBus for &mut T {
    fn start(&mut self) {
        (**self).start();
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte);
    }

    fn read_byte(&mut self) -> u8 {
        (**self).read_byte()
    }
}
