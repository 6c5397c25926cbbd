use std::io::Cursor;

use radio_link::ax25::{self, AX25_MIN_FRAME_LEN, HDLC_FLAG};
use radio_link::frame::Frame;

fn s1_frame() -> Frame {
    let mut f = Frame::new();
    f.set_dst("TLM100", 0);
    f.set_src("NOCALL", 0);
    let idx = f.add_repeater("TEST", 0).unwrap();
    f.set_repeater_flag(idx, true).unwrap();
    f.set_info(b">Test 00001: SolarPi APRS");
    f
}

#[test]
fn s1_ax25_ui_frame_round_trip() {
    let frame = s1_frame();
    let mut channel: Vec<u8> = Vec::new();
    ax25::Engine::new("tx").send(&mut channel, &frame).unwrap();

    let mut rx = ax25::Engine::new("rx");
    let mut cursor = Cursor::new(channel);
    assert!(rx.poll(&mut cursor).unwrap());

    let mut decoded = Frame::new();
    rx.read(&mut decoded).unwrap();

    assert_eq!(decoded.dst.callsign, "TLM100");
    assert_eq!(decoded.src.callsign, "NOCALL");
    assert_eq!(decoded.repeaters().len(), 1);
    assert_eq!(decoded.repeaters()[0].callsign, "TEST");
    assert!(decoded.repeaters()[0].flag);
    assert_eq!(decoded.ctrl, 0x03);
    assert_eq!(decoded.pid, 0xF0);
    assert_eq!(decoded.info(), frame.info());
}

#[test]
fn s2_monitor_string() {
    assert_eq!(
        s1_frame().to_string(),
        "TLM100>NOCALL,TEST*:>Test 00001: SolarPi APRS"
    );
}

#[test]
fn s5_garbage_tolerance() {
    let frame = s1_frame();
    let mut encoded: Vec<u8> = Vec::new();
    ax25::Engine::new("tx").send(&mut encoded, &frame).unwrap();

    let mut stream = b"garbage".to_vec();
    stream.push(HDLC_FLAG);
    stream.extend_from_slice(&encoded);

    let mut rx = ax25::Engine::new("rx");
    let mut cursor = Cursor::new(stream);
    assert!(rx.poll(&mut cursor).unwrap());

    let mut decoded = Frame::new();
    rx.read(&mut decoded).unwrap();
    assert_eq!(decoded.info(), frame.info());
    assert!(!rx.poll(&mut cursor).unwrap());
}

#[test]
fn s6_corrupted_frame_is_silently_dropped() {
    let frame = s1_frame();
    let mut good: Vec<u8> = Vec::new();
    ax25::Engine::new("tx").send(&mut good, &frame).unwrap();

    let mut corrupted = good.clone();
    let mid = corrupted.len() / 2;
    corrupted[mid] ^= 0x01;

    let mut stream = corrupted;
    stream.extend_from_slice(&good);

    let mut rx = ax25::Engine::new("rx");
    let mut cursor = Cursor::new(stream);
    assert!(rx.poll(&mut cursor).unwrap());

    let mut decoded = Frame::new();
    rx.read(&mut decoded).unwrap();
    assert_eq!(decoded.src.callsign, frame.src.callsign);
    assert_eq!(decoded.info(), frame.info());
}

#[test]
fn frame_shorter_than_minimum_length_is_never_ready() {
    // Two flags with fewer than AX25_MIN_FRAME_LEN bytes between them must
    // never be reported as a ready frame, regardless of CRC.
    let mut stream = vec![HDLC_FLAG];
    stream.extend(std::iter::repeat(0x41u8).take(AX25_MIN_FRAME_LEN - 2));
    stream.push(HDLC_FLAG);

    let mut rx = ax25::Engine::new("rx");
    let mut cursor = Cursor::new(stream);
    assert!(!rx.poll(&mut cursor).unwrap());
}

#[test]
fn empty_info_field_round_trips() {
    let mut f = Frame::new();
    f.set_dst("NOCALL", 0);
    f.set_src("NOCALL", 1);

    let mut channel: Vec<u8> = Vec::new();
    ax25::Engine::new("tx").send(&mut channel, &f).unwrap();

    let mut rx = ax25::Engine::new("rx");
    let mut cursor = Cursor::new(channel);
    assert!(rx.poll(&mut cursor).unwrap());

    let mut decoded = Frame::new();
    rx.read(&mut decoded).unwrap();
    assert!(decoded.info().is_empty());
    assert_eq!(decoded.src.ssid, 1);
}

#[test]
fn eight_repeaters_round_trip_in_order() {
    let mut f = Frame::new();
    f.set_dst("DST", 0);
    f.set_src("SRC", 0);
    for i in 0..8 {
        f.add_repeater(format!("RPT{}", i), i as u8).unwrap();
    }
    f.set_info(b"via eight repeaters");

    let mut channel: Vec<u8> = Vec::new();
    ax25::Engine::new("tx").send(&mut channel, &f).unwrap();

    let mut rx = ax25::Engine::new("rx");
    let mut cursor = Cursor::new(channel);
    assert!(rx.poll(&mut cursor).unwrap());

    let mut decoded = Frame::new();
    rx.read(&mut decoded).unwrap();
    assert_eq!(decoded.repeaters().len(), 8);
    for (i, rpt) in decoded.repeaters().iter().enumerate() {
        assert_eq!(rpt.callsign, format!("RPT{}", i));
        assert_eq!(rpt.ssid, i as u8);
    }
}
