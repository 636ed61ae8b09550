// Based on https://github.com/Rahix/avr-hal/blob/main/examples/arduino-uno/src/bin/uno-panic.rs
// License MIT
//! Report panics over the USART.
//!
//! PD0/PD1 drive tube 1 in normal operation; after a panic the tubes no longer
//! matter, so the pins are taken over for the serial port.

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    avr_device::interrupt::disable();

    // SAFETY: we never return, so nothing else uses the peripherals again
    let dp = unsafe { arduino_hal::Peripherals::steal() };
    let pins = arduino_hal::pins!(dp);

    // Backlight off so a halted clock is visible.
    pins.d3.into_output().set_low();

    let mut serial = arduino_hal::default_serial!(dp, pins, 57600);
    ufmt::uwrite!(&mut serial, "\r\nnixieclock panic").ok();
    if let Some(loc) = info.location() {
        ufmt::uwrite!(&mut serial, " at {}:{}", loc.file(), loc.line()).ok();
    }
    ufmt::uwriteln!(&mut serial, "\r").ok();

    loop {
        avr_device::asm::sleep();
    }
}
