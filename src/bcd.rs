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
//! Binary coded decimal conversions for the RTC time registers.

/// Decode a BCD byte, tens in the high nibble and units in the low nibble.
#[must_use]
pub const fn bcd2dec(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0f)
}

/// Encode a value in `0..=99` as BCD.
#[must_use]
pub const fn dec2bcd(dec: u8) -> u8 {
    ((dec / 10) << 4) | (dec % 10)
}

/// High and low nibble of a BCD byte, in display order.
#[must_use]
pub const fn nibbles(bcd: u8) -> (u8, u8) {
    ((bcd & 0xf0) >> 4, bcd & 0x0f)
}
