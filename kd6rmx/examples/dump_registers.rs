//! Register dump example

use std::sync::Arc;

use kd6rmx::{Sensor, TracingSink};
use tracing_subscriber::EnvFilter;

fn main() -> kd6rmx::Result<()> {
    // RUST_LOG=kd6rmx::traffic=info shows every frame on the wire
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let port = std::env::var("KD6RMX_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    println!("Reading registers on {}...", port);

    let mut sensor = Sensor::serial(port).with_traffic_sink(Arc::new(TracingSink));

    for reading in sensor.dump_registers()? {
        println!("{}", reading);
    }

    Ok(())
}
