//! Byte-stuffed HDLC transport of AX.25 UI frames (§4.D).
//!
//! One `Engine` owns one direction's worth of state: a transmit CRC
//! accumulator (live only for the duration of a `send`) and the incremental
//! receive state machine described in §4.D.2. At most one completed frame
//! is buffered at a time (`frame_ready`); a caller must `read()` it before
//! the next `poll()` can usefully start a new one — further `poll()` calls
//! while a frame is pending simply stop consuming input, per the invariant
//! in §3.

use std::convert::TryInto;

use log::{debug, error, trace, warn};

use crate::address::Address;
use crate::crc;
use crate::error::Ax25Error;
use crate::frame::{Frame, CTRL_UI, MAX_INFO_LEN, MAX_REPEATERS, PID_NOLAYER3};
use crate::interface::{ByteSink, ByteSource};

/// HDLC flag delimiter.
pub const HDLC_FLAG: u8 = 0x7E;
/// Out-of-band reset byte: aborts the candidate frame in progress.
pub const HDLC_RESET: u8 = 0x7F;
/// Escape byte: the next byte is literal payload, not a delimiter.
pub const AX25_ESC: u8 = 0x1B;

/// Minimum number of raw (unescaped) body bytes for a candidate frame to be
/// considered, per `AX25_MIN_FRAME_LEN`: 2 addresses (14) + ctrl + pid (2) + CRC (2).
pub const AX25_MIN_FRAME_LEN: usize = 18;

/// Running CRC value a correctly received frame body (plus its CRC trailer)
/// must reduce to.
pub const AX25_CRC_CORRECT: u16 = crc::AX25_RESIDUE;

/// Receive buffer capacity: worst case is 2 endpoints + 8 repeaters, each 7
/// bytes, plus ctrl/pid/info/CRC.
const RX_BUF_LEN: usize = (CALL_FIELD_LEN) * (2 + MAX_REPEATERS) + MAX_INFO_LEN + 4;
const CALL_FIELD_LEN: usize = 7;

/// Read a 7-byte address field out of `body` at `pos`, or `None` if fewer
/// than 7 bytes remain. The CRC only guards 16 bits, so a candidate frame
/// can be CRC-valid yet shorter than its own address count implies.
fn take7(body: &[u8], pos: usize) -> Option<[u8; 7]> {
    body.get(pos..pos + 7)?.try_into().ok()
}

/// The AX.25 UI framing engine: one instance per direction of a channel.
pub struct Engine {
    name: String,
    in_sync: bool,
    escape_next: bool,
    rx_buf: [u8; RX_BUF_LEN],
    rx_len: usize,
    rx_crc: u16,
    frame_ready: bool,
    last_error: Option<Ax25Error>,
}

impl Engine {
    /// Construct an engine. `name` is used as the `log` target for every
    /// event this engine emits.
    pub fn new(name: impl Into<String>) -> Self {
        Engine {
            name: name.into(),
            in_sync: false,
            escape_next: false,
            rx_buf: [0u8; RX_BUF_LEN],
            rx_len: 0,
            rx_crc: crc::INIT,
            frame_ready: false,
            last_error: None,
        }
    }

    /// The last error latched on this engine, for diagnostic parity with
    /// the original's `iAx25Error` (§9 design notes). Prefer the returned
    /// `Result` of `send`/`read` for control flow.
    pub fn last_error(&self) -> Option<&Ax25Error> {
        self.last_error.as_ref()
    }

    fn set_error(&mut self, err: Ax25Error) -> Ax25Error {
        warn!(target: self.name.as_str(), "{}", err);
        self.last_error = Some(clone_err(&err));
        err
    }

    /// True once a CRC-valid candidate frame is buffered and waiting for `read()`.
    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    /// Pull as many bytes as `source` currently has available and advance
    /// the receive state machine. Returns `true` iff a frame is ready to be
    /// read (possibly already ready from a previous call, if the caller
    /// hasn't read it out yet).
    pub fn poll<S: ByteSource>(&mut self, source: &mut S) -> Result<bool, Ax25Error> {
        if self.frame_ready {
            return Ok(true);
        }
        let mut buf = [0u8; 256];
        loop {
            let n = source.read(&mut buf)?;
            if n == 0 {
                break;
            }
            for &c in &buf[..n] {
                self.rx_byte(c);
                if self.frame_ready {
                    return Ok(true);
                }
            }
        }
        Ok(self.frame_ready)
    }

    fn rx_byte(&mut self, c: u8) {
        if !self.escape_next {
            if c == HDLC_FLAG {
                if self.rx_len >= AX25_MIN_FRAME_LEN && self.rx_crc == AX25_CRC_CORRECT {
                    debug!(target: self.name.as_str(), "frame found, len={}", self.rx_len);
                    self.frame_ready = true;
                    return;
                }
                if self.in_sync && self.rx_len >= AX25_MIN_FRAME_LEN {
                    trace!(target: self.name.as_str(), "CRC mismatch, computed={:04x}", self.rx_crc);
                }
                self.rx_crc = crc::INIT;
                self.rx_len = 0;
                self.in_sync = true;
                return;
            }
            if c == HDLC_RESET {
                trace!(target: self.name.as_str(), "HDLC reset");
                self.in_sync = false;
                return;
            }
            if c == AX25_ESC {
                self.escape_next = true;
                return;
            }
        }

        if self.in_sync {
            if self.rx_len < RX_BUF_LEN {
                self.rx_buf[self.rx_len] = c;
                self.rx_len += 1;
                self.rx_crc = crc::crc_update(c, self.rx_crc);
            } else {
                warn!(target: self.name.as_str(), "buffer overrun, dropping candidate frame");
                self.in_sync = false;
            }
        }
        self.escape_next = false;
    }

    /// Decode the buffered candidate frame into `out`, clearing receive
    /// state so the next `poll()` starts fresh. Fails with
    /// `NoFrameReceived` if `poll()` hasn't returned `true` since the last
    /// successful `read()`.
    pub fn read(&mut self, out: &mut Frame) -> Result<(), Ax25Error> {
        if !self.frame_ready {
            return Err(self.set_error(Ax25Error::NoFrameReceived));
        }

        out.clear();
        let body = &self.rx_buf[..self.rx_len];
        let mut pos = 0;

        // The CRC only guards 16 bits: a corrupted-but-coincidentally-valid
        // candidate can still claim more addresses, or a longer info field,
        // than the body actually holds. Every access below is bounds-checked
        // and reported as `InvalidFrame` rather than indexed unchecked, so a
        // malformed frame is rejected instead of panicking.
        let dst_bytes = match take7(body, pos) {
            Some(b) => b,
            None => return self.reject(Ax25Error::InvalidFrame("truncated destination address")),
        };
        pos += 7;
        let (dst, _) = Address::decode(&dst_bytes);
        out.dst = dst;

        let src_bytes = match take7(body, pos) {
            Some(b) => b,
            None => return self.reject(Ax25Error::InvalidFrame("truncated source address")),
        };
        pos += 7;
        let (src, mut last) = Address::decode(&src_bytes);
        out.src = src;

        while !last && out.repeaters().len() < MAX_REPEATERS {
            let rpt_bytes = match take7(body, pos) {
                Some(b) => b,
                None => return self.reject(Ax25Error::InvalidFrame("truncated repeater address")),
            };
            pos += 7;
            let (rpt, is_last) = Address::decode(&rpt_bytes);
            let idx = out.add_repeater(rpt.callsign, rpt.ssid).expect("capacity checked above");
            out.set_repeater_flag(idx, rpt.flag).expect("index just added");
            last = is_last;
        }

        let ctrl = match body.get(pos) {
            Some(&b) => b,
            None => return self.reject(Ax25Error::InvalidFrame("missing control byte")),
        };
        pos += 1;
        if ctrl != CTRL_UI {
            return self.reject(Ax25Error::InvalidFrame("unexpected control byte"));
        }
        out.ctrl = ctrl;

        let pid = match body.get(pos) {
            Some(&b) => b,
            None => return self.reject(Ax25Error::InvalidFrame("missing PID byte")),
        };
        pos += 1;
        if pid != PID_NOLAYER3 {
            return self.reject(Ax25Error::InvalidFrame("unexpected PID byte"));
        }
        out.pid = pid;

        let info_len = match body.len().checked_sub(2 + pos) {
            Some(n) => n,
            None => return self.reject(Ax25Error::InvalidFrame("frame too short for CRC trailer")),
        };
        out.set_info(&body[pos..pos + info_len]);

        debug!(
            target: self.name.as_str(),
            "decoded frame: {} -> {}, {} repeater(s), info_len={}",
            out.src,
            out.dst,
            out.repeaters().len(),
            info_len
        );

        self.reset_rx_state();
        Ok(())
    }

    /// Reset receive state and surface `err`, for any point in `read()`
    /// where the CRC-valid candidate turns out to be malformed.
    fn reject(&mut self, err: Ax25Error) -> Result<(), Ax25Error> {
        self.reset_rx_state();
        Err(self.set_error(err))
    }

    fn reset_rx_state(&mut self) {
        self.in_sync = false;
        self.escape_next = false;
        self.rx_len = 0;
        self.rx_crc = crc::INIT;
        self.frame_ready = false;
    }

    /// Encode `frame` and write it to `sink` as a complete HDLC-flagged,
    /// byte-stuffed, CRC-protected AX.25 frame. All-or-nothing: the first
    /// error aborts the remainder of the send (the channel may be left with
    /// a partial frame, which the remote discards at its next flag).
    pub fn send<K: ByteSink>(&mut self, sink: &mut K, frame: &Frame) -> Result<(), Ax25Error> {
        let mut tx_crc = crc::INIT;
        sink.write_byte(HDLC_FLAG)?;

        let last_is_src = frame.repeaters().is_empty();
        self.send_address(sink, &mut tx_crc, &frame.dst, false)?;
        self.send_address(sink, &mut tx_crc, &frame.src, last_is_src)?;
        let rpt_count = frame.repeaters().len();
        for (i, rpt) in frame.repeaters().iter().enumerate() {
            self.send_address(sink, &mut tx_crc, rpt, i == rpt_count - 1)?;
        }

        self.send_stuffed_byte(sink, &mut tx_crc, frame.ctrl)?;
        self.send_stuffed_byte(sink, &mut tx_crc, frame.pid)?;
        for &b in frame.info() {
            self.send_stuffed_byte(sink, &mut tx_crc, b)?;
        }

        // CRC is transmitted in reverse byte order, each byte inverted.
        let crc_lo = (tx_crc & 0xFF) as u8 ^ 0xFF;
        let crc_hi = (tx_crc >> 8) as u8 ^ 0xFF;
        self.send_stuffed_byte(sink, &mut tx_crc, crc_lo)?;
        self.send_stuffed_byte(sink, &mut tx_crc, crc_hi)?;

        if tx_crc != AX25_CRC_CORRECT {
            // Unreachable if the algorithm above is correct; kept as a
            // defensive check per §9's "send CRC self-check" note.
            debug_assert!(false, "tx CRC self-check failed: {:04x}", tx_crc);
            error!(target: self.name.as_str(), "tx CRC self-check failed: {:04x}", tx_crc);
            self.last_error = Some(Ax25Error::CrcError);
            return Err(Ax25Error::CrcError);
        }

        sink.write_byte(HDLC_FLAG)?;
        debug!(target: self.name.as_str(), "sent frame: {} -> {}", frame.src, frame.dst);
        Ok(())
    }

    fn send_address<K: ByteSink>(
        &mut self,
        sink: &mut K,
        tx_crc: &mut u16,
        addr: &Address,
        last: bool,
    ) -> Result<(), Ax25Error> {
        let bytes = addr.encode(last).map_err(|e| self.set_error(e.into()))?;
        for b in bytes {
            self.send_stuffed_byte(sink, tx_crc, b)?;
        }
        Ok(())
    }

    fn send_stuffed_byte<K: ByteSink>(
        &mut self,
        sink: &mut K,
        tx_crc: &mut u16,
        byte: u8,
    ) -> Result<(), Ax25Error> {
        if byte == HDLC_FLAG || byte == HDLC_RESET || byte == AX25_ESC {
            sink.write_byte(AX25_ESC)?;
        }
        sink.write_byte(byte)?;
        *tx_crc = crc::crc_update(byte, *tx_crc);
        Ok(())
    }
}

fn clone_err(e: &Ax25Error) -> Ax25Error {
    match e {
        Ax25Error::IllegalCallsign(c) => Ax25Error::IllegalCallsign(c.clone()),
        Ax25Error::TooManyRepeaters { max } => Ax25Error::TooManyRepeaters { max: *max },
        Ax25Error::IllegalRepeaterIndex { index, len } => Ax25Error::IllegalRepeaterIndex {
            index: *index,
            len: *len,
        },
        Ax25Error::InvalidFrame(s) => Ax25Error::InvalidFrame(s),
        Ax25Error::CrcError => Ax25Error::CrcError,
        Ax25Error::NoFrameReceived => Ax25Error::NoFrameReceived,
        Ax25Error::Io(e) => Ax25Error::Io(std::io::Error::new(e.kind(), e.to_string())),
    }
}
