use std::io::Cursor;

use radio_link::tnc;

#[test]
fn s3_tnc_round_trip_of_identity_payload() {
    let payload: Vec<u8> = (0u8..=255).collect();

    let mut channel: Vec<u8> = Vec::new();
    tnc::Engine::new("tx").send(&mut channel, &payload).unwrap();

    let mut rx = tnc::Engine::new("rx");
    let mut cursor = Cursor::new(channel);
    assert!(rx.poll(&mut cursor).unwrap());
    assert_eq!(rx.read().unwrap(), payload);
}

#[test]
fn round_trips_every_length_up_to_a_small_bound() {
    for n in 0..64 {
        let payload: Vec<u8> = (0..n).map(|i| (i * 7) as u8).collect();
        let mut channel: Vec<u8> = Vec::new();
        tnc::Engine::new("tx").send(&mut channel, &payload).unwrap();

        let mut rx = tnc::Engine::new("rx");
        let mut cursor = Cursor::new(channel);
        assert!(rx.poll(&mut cursor).unwrap(), "length {} failed to decode", n);
        assert_eq!(rx.read().unwrap(), payload, "length {} mismatch", n);
    }
}

#[test]
fn garbage_outside_frames_is_tolerated() {
    let mut channel: Vec<u8> = Vec::new();
    tnc::Engine::new("tx").send(&mut channel, b"aprs-ish").unwrap();

    let mut stream = vec![0x10, 0x20, 0x30];
    stream.extend_from_slice(&channel);
    stream.extend_from_slice(&[0x40, 0x50]);

    let mut rx = tnc::Engine::new("rx");
    let mut cursor = Cursor::new(stream);
    assert!(rx.poll(&mut cursor).unwrap());
    assert_eq!(rx.read().unwrap(), b"aprs-ish".to_vec());
}

#[test]
fn two_consecutive_messages_decode_independently() {
    let mut first_wire: Vec<u8> = Vec::new();
    tnc::Engine::new("tx").send(&mut first_wire, b"first").unwrap();
    let mut second_wire: Vec<u8> = Vec::new();
    tnc::Engine::new("tx").send(&mut second_wire, b"second").unwrap();

    let mut stream = first_wire;
    stream.extend_from_slice(&second_wire);

    let mut rx = tnc::Engine::new("rx");
    let mut cursor = Cursor::new(stream);

    assert!(rx.poll(&mut cursor).unwrap());
    assert_eq!(rx.read().unwrap(), b"first".to_vec());

    assert!(rx.poll(&mut cursor).unwrap());
    assert_eq!(rx.read().unwrap(), b"second".to_vec());
}
