extern crate radio_link;

use log::{info, LevelFilter};

use radio_link::ax25;
use radio_link::frame::Frame;

fn main() {
    log::set_max_level(LevelFilter::Debug);
    env_logger::init();

    let mut frame = Frame::new();
    frame.set_dst("TLM100", 0);
    frame.set_src("NOCALL", 0);
    let idx = frame.add_repeater("TEST", 0).unwrap();
    frame.set_repeater_flag(idx, true).unwrap();
    frame.set_info(b">Test 00001: SolarPi APRS");

    let mut channel: Vec<u8> = Vec::new();
    let mut tx = ax25::Engine::new("tx");
    tx.send(&mut channel, &frame).unwrap();
    info!("encoded {} bytes: {}", channel.len(), frame);

    let mut rx = ax25::Engine::new("rx");
    let mut cursor = std::io::Cursor::new(channel);
    let mut received = Frame::new();
    loop {
        if rx.poll(&mut cursor).unwrap() {
            rx.read(&mut received).unwrap();
            break;
        }
    }
    println!("{}", received);
}
