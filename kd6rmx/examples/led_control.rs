//! LED and correction example

use std::thread;
use std::time::Duration;

use kd6rmx::{LedTarget, Register, Sensor};
use kd6rmx_core::catalog::WHITE_TARGET_DEFAULT;

fn main() -> kd6rmx::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let port = std::env::var("KD6RMX_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    let mut sensor = Sensor::serial(port);

    // Both LEDs, lit half of each period
    sensor.led_control(LedTarget::AB, true, 2)?;
    sensor.led_duty_cycle(LedTarget::A, 500)?;
    sensor.led_duty_cycle(LedTarget::B, 500)?;
    println!("{}", sensor.read_register(Register::LedControl)?);

    println!("Running white correction...");
    sensor.set_white_correction_target(WHITE_TARGET_DEFAULT)?;
    thread::sleep(Duration::from_secs(1));
    sensor.set_white_correction(true)?;

    println!("Saving to preset 1...");
    sensor.save_settings(1)?;

    println!("Done!");

    Ok(())
}
