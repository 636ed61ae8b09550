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
//! DS3231 RTC interface

use crate::bcd::{bcd2dec, dec2bcd};
use crate::bus::TimeBus;

// 0x68 is the DS3231 RTC device address
const RTC_ADDRESS: u8 = 0x68;
const ADDRESS_WRITE: u8 = RTC_ADDRESS << 1;
const ADDRESS_READ: u8 = (RTC_ADDRESS << 1) | 1;

/// DS3231 register map.
///
/// Only the three time registers are used by the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    Seconds = 0x00,
    Minutes = 0x01,
    Hours = 0x02,
    Day = 0x03,
    Date = 0x04,
    Month = 0x05,
    Year = 0x06,
    Alarm1Seconds = 0x07,
    Alarm1Minutes = 0x08,
    Alarm1Hours = 0x09,
    Alarm1Day = 0x0a,
    Alarm2Minutes = 0x0b,
    Alarm2Hours = 0x0c,
    Alarm2Day = 0x0d,
    Control = 0x0e,
    Status = 0x0f,
    AgingOffset = 0x10,
    TempMsb = 0x11,
    TempLsb = 0x12,
}

impl Register {
    #[must_use]
    pub const fn address(self) -> u8 {
        self as u8
    }
}

/// Raw register contents of one time read, still BCD encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BcdTime {
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
}

impl BcdTime {
    #[must_use]
    pub const fn hours_dec(&self) -> u8 {
        bcd2dec(self.hours)
    }

    #[must_use]
    pub const fn minutes_dec(&self) -> u8 {
        bcd2dec(self.minutes)
    }

    #[must_use]
    pub const fn seconds_dec(&self) -> u8 {
        bcd2dec(self.seconds)
    }
}

/// Register level access to a real-time clock.
pub trait RtcDevice {
    fn read_register(&mut self, reg: Register) -> u8;

    fn write_register(&mut self, reg: Register, value: u8);

    /// Read seconds, minutes and hours with three separate transactions.
    ///
    /// The device keeps ticking between reads, so a read that straddles a
    /// rollover can return a torn time such as 12:59 followed by 13:00 seconds.
    fn read_time(&mut self) -> BcdTime {
        let seconds = self.read_register(Register::Seconds);
        let minutes = self.read_register(Register::Minutes);
        let hours = self.read_register(Register::Hours);
        BcdTime {
            seconds,
            minutes,
            hours,
        }
    }

    /// Set the time from decimal fields, seconds first.
    fn write_time(&mut self, hours: u8, minutes: u8, seconds: u8) {
        self.write_register(Register::Seconds, dec2bcd(seconds));
        self.write_register(Register::Minutes, dec2bcd(minutes));
        self.write_register(Register::Hours, dec2bcd(hours));
    }
}

/// DS3231 on a [`TimeBus`].
pub struct Ds3231<B> {
    bus: B,
}

impl<B: TimeBus> Ds3231<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: TimeBus> RtcDevice for Ds3231<B> {
    fn read_register(&mut self, reg: Register) -> u8 {
        self.bus.start();
        self.bus.write_byte(ADDRESS_WRITE);
        self.bus.write_byte(reg.address());
        self.bus.start();
        self.bus.write_byte(ADDRESS_READ);
        let value = self.bus.read_byte();
        self.bus.stop();
        value
    }

    fn write_register(&mut self, reg: Register, value: u8) {
        self.bus.start();
        self.bus.write_byte(ADDRESS_WRITE);
        self.bus.write_byte(reg.address());
        self.bus.write_byte(value);
        self.bus.stop();
    }
}
