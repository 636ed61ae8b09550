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
//! Trace output.
//!
//! The clock reports mode changes and RTC writes as `ufmt` text lines to any
//! [`uWrite`] sink. The board has no spare serial lines, so firmware builds use
//! [`Silent`].

use core::convert::Infallible;

use ufmt::{uDisplay, uWrite, Formatter};

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl uWrite for Silent {
    type Error = Infallible;

    fn write_str(&mut self, _s: &str) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Zero padded two digit field, as in `07`.
pub struct TwoDigits(pub u8);

impl uDisplay for TwoDigits {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_char(char::from(b'0' + (self.0 / 10) % 10))?;
        f.write_char(char::from(b'0' + self.0 % 10))
    }
}
