extern crate radio_link;

use std::time::Duration;

use log::{debug, LevelFilter};

use radio_link::ax25;
use radio_link::frame::Frame;

const SERIAL_PORT: &str = "/dev/ttyUSB0";
const BAUD_RATE: u32 = 9600;

fn main() {
    log::set_max_level(LevelFilter::Debug);
    env_logger::init();

    let mut port = serialport::new(SERIAL_PORT, BAUD_RATE)
        .timeout(Duration::from_millis(100))
        .open()
        .expect("failed to open serial port");

    debug!(target: "serial_ax25", "opened {} at {} baud", SERIAL_PORT, BAUD_RATE);

    let mut beacon = Frame::new();
    beacon.set_dst("APRS", 0);
    beacon.set_src("NOCALL", 0);
    beacon.set_info(b">on the air");

    let mut tx = ax25::Engine::new("tx");
    tx.send(&mut port, &beacon).unwrap();

    let mut rx = ax25::Engine::new("rx");
    let mut received = Frame::new();
    loop {
        match rx.poll(&mut port) {
            Ok(true) => {
                rx.read(&mut received).unwrap();
                println!("{}", received);
            }
            Ok(false) => {}
            Err(e) => {
                debug!(target: "serial_ax25", "{}", e);
            }
        }
    }
}
