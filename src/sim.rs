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
//! Simulated DS3231, output pins and delay for host tests.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::bus::TimeBus;
use crate::display::DisplayDriver;
use crate::ds3231::Register;

const REGISTER_COUNT: usize = 0x13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Start,
    Stop,
    Write(u8),
    Read(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Address,
    Pointer,
    Data,
    Reading,
}

/// Register file plus address pointer, driven byte by byte like the real chip.
pub struct SimRtc {
    registers: [u8; REGISTER_COUNT],
    pointer: usize,
    phase: Phase,
    trace: Vec<BusOp>,
    writes: Vec<(u8, u8)>,
}

impl Default for SimRtc {
    fn default() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            pointer: 0,
            phase: Phase::Idle,
            trace: Vec::new(),
            writes: Vec::new(),
        }
    }
}

impl SimRtc {
    pub fn with_time(seconds: u8, minutes: u8, hours: u8) -> Self {
        let mut sim = Self::default();
        sim.set_time(seconds, minutes, hours);
        sim
    }

    /// Load BCD time registers without recording a bus write.
    pub fn set_time(&mut self, seconds: u8, minutes: u8, hours: u8) {
        self.set_register(Register::Seconds, seconds);
        self.set_register(Register::Minutes, minutes);
        self.set_register(Register::Hours, hours);
    }

    pub fn set_register(&mut self, reg: Register, value: u8) {
        self.registers[usize::from(reg.address())] = value;
    }

    pub fn register(&self, reg: Register) -> u8 {
        self.registers[usize::from(reg.address())]
    }

    pub fn trace(&self) -> &[BusOp] {
        &self.trace
    }

    /// Every register written over the bus, as (address, value).
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    fn advance(&mut self) {
        self.pointer = (self.pointer + 1) % REGISTER_COUNT;
    }
}

impl TimeBus for SimRtc {
    fn start(&mut self) {
        self.trace.push(BusOp::Start);
        self.phase = Phase::Address;
    }

    fn stop(&mut self) {
        self.trace.push(BusOp::Stop);
        self.phase = Phase::Idle;
    }

    fn write_byte(&mut self, byte: u8) {
        self.trace.push(BusOp::Write(byte));
        self.phase = match self.phase {
            Phase::Address if byte == 0xd0 => Phase::Pointer,
            Phase::Address if byte == 0xd1 => Phase::Reading,
            Phase::Pointer => {
                self.pointer = usize::from(byte) % REGISTER_COUNT;
                Phase::Data
            }
            Phase::Data => {
                self.registers[self.pointer] = byte;
                self.writes.push((self.pointer as u8, byte));
                self.advance();
                Phase::Data
            }
            _ => Phase::Idle,
        };
    }

    fn read_byte(&mut self) -> u8 {
        let value = if self.phase == Phase::Reading {
            let value = self.registers[self.pointer];
            self.advance();
            value
        } else {
            0xff
        };
        self.trace.push(BusOp::Read(value));
        value
    }
}

/// Output pin that remembers its level.
#[derive(Debug, Default)]
pub struct TestPin {
    pub high: bool,
}

impl ErrorType for TestPin {
    type Error = Infallible;
}

impl OutputPin for TestPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for TestPin {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.high)
    }
}

pub fn test_display() -> DisplayDriver<TestPin> {
    DisplayDriver::new(core::array::from_fn(|_| TestPin::default()), TestPin::default())
}

/// Delay that returns at once and adds up what was asked for.
#[derive(Debug, Default)]
pub struct CountingDelay {
    ns: u64,
}

impl CountingDelay {
    pub fn total_ms(&self) -> u64 {
        self.ns / 1_000_000
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.ns += u64::from(ns);
    }
}
