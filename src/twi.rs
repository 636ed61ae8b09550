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
//! Two-wire bus on the ATmega328p TWI peripheral.
//!
//! Each step sets TWCR and spins on TWINT. There is no timeout and the status
//! register is never checked, so a missing RTC hangs the main loop.

use core::convert::Infallible;

use arduino_hal::hal::port::{PC4, PC5};
use arduino_hal::pac::TWI;
use arduino_hal::port::mode::{Input, PullUp};
use arduino_hal::port::Pin;
use nixieclock::bus::TimeBus;
use nixieclock::infallible;

// SCL = F_CPU / (16 + 2 * TWBR * prescaler), prescaler left at 1.
const BIT_RATE: u8 = 0x02;

pub struct Twi {
    twi: TWI,
    _sda: Pin<Input<PullUp>, PC4>,
    _scl: Pin<Input<PullUp>, PC5>,
}

impl Twi {
    /// Take the TWI block and its pins (with pull-ups enabled) and set the bit rate.
    pub fn new(twi: TWI, sda: Pin<Input<PullUp>, PC4>, scl: Pin<Input<PullUp>, PC5>) -> Self {
        // SAFETY: any TWBR value is a valid bit rate
        twi.twbr.write(|w| unsafe { w.bits(BIT_RATE) });
        Self {
            twi,
            _sda: sda,
            _scl: scl,
        }
    }

    fn poll_complete(&self) -> nb::Result<(), Infallible> {
        if self.twi.twcr.read().twint().bit_is_set() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn wait(&self) {
        infallible(nb::block!(self.poll_complete()));
    }
}

impl TimeBus for Twi {
    fn start(&mut self) {
        self.twi
            .twcr
            .write(|w| w.twint().set_bit().twsta().set_bit().twen().set_bit());
        self.wait();
    }

    fn stop(&mut self) {
        self.twi
            .twcr
            .write(|w| w.twint().set_bit().twsto().set_bit().twen().set_bit());
    }

    fn write_byte(&mut self, byte: u8) {
        // SAFETY: TWDR takes any byte
        self.twi.twdr.write(|w| unsafe { w.bits(byte) });
        self.twi.twcr.write(|w| w.twint().set_bit().twen().set_bit());
        self.wait();
    }

    fn read_byte(&mut self) -> u8 {
        self.twi.twcr.write(|w| w.twint().set_bit().twen().set_bit());
        self.wait();
        self.twi.twdr.read().bits()
    }
}
