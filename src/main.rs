/*
 Nixie clock firmware.

 Four nixie tubes behind BCD decoders show hours and minutes read from a
 DS3231 RTC on the two-wire bus. One button on PB5: short press toggles the
 backlight, long press sets hours, then minutes, then saves to the RTC.

 Target: ATmega328p, clock at 16 MHz.

 This library is free software: you can redistribute it and/or modify
 it under the terms of the GNU General Public License as published by
 the Free Software Foundation, either version 3 of the License, or
 (at your option) any later version.

 This library is distributed in the hope that it will be useful,
 but WITHOUT ANY WARRANTY; without even the implied warranty of
 MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 GNU General Public License for more details.

 You should have received a copy of the GNU General Public License
 along with this library.  If not, see <http://www.gnu.org/licenses/>.

 */

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

#[cfg(feature = "panic-serial")]
mod panic;
mod timer;
mod twi;

#[cfg(not(feature = "panic-serial"))]
use panic_halt as _;

use nixieclock::button::{ButtonEvents, InputDebouncer};
use nixieclock::controller::ModeController;
use nixieclock::display::DisplayDriver;
use nixieclock::ds3231::Ds3231;
use nixieclock::log::Silent;

static BUTTON_EVENTS: ButtonEvents = ButtonEvents::new();

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);

    // Decoder inputs in `Line` order: PB0..PB4, PC0..PC3, PD0..PD2, PD4..PD7.
    // PD3 is the backlight.
    let lines = [
        pins.d8.into_output().downgrade(),  // PB0
        pins.d9.into_output().downgrade(),  // PB1
        pins.d10.into_output().downgrade(), // PB2
        pins.d11.into_output().downgrade(), // PB3
        pins.d12.into_output().downgrade(), // PB4
        pins.a0.into_output().downgrade(),  // PC0
        pins.a1.into_output().downgrade(),  // PC1
        pins.a2.into_output().downgrade(),  // PC2
        pins.a3.into_output().downgrade(),  // PC3
        pins.d0.into_output().downgrade(),  // PD0
        pins.d1.into_output().downgrade(),  // PD1
        pins.d2.into_output().downgrade(),  // PD2
        pins.d4.into_output().downgrade(),  // PD4
        pins.d5.into_output().downgrade(),  // PD5
        pins.d6.into_output().downgrade(),  // PD6
        pins.d7.into_output().downgrade(),  // PD7
    ];
    let mut display = DisplayDriver::new(lines, pins.d3.into_output().downgrade());

    let bus = twi::Twi::new(
        dp.TWI,
        pins.a4.into_pull_up_input(),
        pins.a5.into_pull_up_input(),
    );
    let rtc = Ds3231::new(bus);

    let button: timer::ButtonPin = pins.d13.into_pull_up_input();

    display.self_test(&mut arduino_hal::Delay::new());

    let (presses, buttons) = BUTTON_EVENTS.split().unwrap();
    timer::init_tc0(dp.TC0, InputDebouncer::new(button, presses));

    // SAFETY: the debouncer is installed before the first overflow can fire
    unsafe { avr_device::interrupt::enable() };

    ModeController::new(rtc, display, buttons, Silent).run()
}
