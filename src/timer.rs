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
//! Button sampling tick on Timer/Counter 0.
//!
//! TC0 runs free with the 1024 prescaler and interrupts on overflow, every
//! 256 * 1024 / 16 MHz = 16.384 ms. The interrupt owns the debouncer.
//!
//! Timer set-up based on https://blog.rahix.de/005-avr-hal-millis/
use core::cell::RefCell;

use arduino_hal::hal::port::PB5;
use arduino_hal::port::mode::{Input, PullUp};
use arduino_hal::port::Pin;
use avr_device::interrupt::Mutex;
use nixieclock::button::InputDebouncer;

pub type ButtonPin = Pin<Input<PullUp>, PB5>;

static DEBOUNCER: Mutex<RefCell<Option<InputDebouncer<'static, ButtonPin>>>> =
    Mutex::new(RefCell::new(None));

/// Timer/Counter 0 overflow interrupt service routine.
#[avr_device::interrupt(atmega328p)]
fn TIMER0_OVF() {
    avr_device::interrupt::free(|cs| {
        if let Some(debouncer) = DEBOUNCER.borrow(cs).borrow_mut().as_mut() {
            debouncer.tick();
        }
    })
}

/// Hand `debouncer` to the interrupt and start TC0 in normal mode.
/// Sampling begins once interrupts are enabled.
pub fn init_tc0(tc0: arduino_hal::pac::TC0, debouncer: InputDebouncer<'static, ButtonPin>) {
    avr_device::interrupt::free(|cs| {
        DEBOUNCER.borrow(cs).replace(Some(debouncer));
    });

    // Normal mode: count up to 0xff and overflow.
    tc0.tccr0a.reset();
    tc0.tccr0b.write(|w| w.cs0().prescale_1024());

    // Enable overflow interrupt in TIMSK0.
    tc0.timsk0.write(|w| w.toie0().set_bit());
}
