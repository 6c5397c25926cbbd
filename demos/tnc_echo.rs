extern crate radio_link;

use log::{info, LevelFilter};

use radio_link::tnc;

fn main() {
    log::set_max_level(LevelFilter::Debug);
    env_logger::init();

    let payload: Vec<u8> = (0u8..=255).collect();

    let mut channel: Vec<u8> = Vec::new();
    let mut tx = tnc::Engine::new("tx");
    tx.send(&mut channel, &payload).unwrap();
    info!("encoded {} bytes for {} byte payload", channel.len(), payload.len());

    let mut rx = tnc::Engine::new("rx");
    let mut cursor = std::io::Cursor::new(channel);
    loop {
        if rx.poll(&mut cursor).unwrap() {
            let received = rx.read().unwrap();
            assert_eq!(received, payload);
            println!("round-trip ok, {} bytes", received.len());
            break;
        }
    }
}
