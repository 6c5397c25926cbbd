//! In-memory AX.25 UI frame model (§4.C).

use crate::address::Address;
use crate::error::Ax25Error;

/// Control field value this library ever sends or accepts: Unnumbered
/// Information, connectionless (`AX25_CTRL_UI`).
pub const CTRL_UI: u8 = 0x03;

/// Protocol ID value meaning "no layer 3 protocol" (`AX25_PID_NOLAYER3`).
pub const PID_NOLAYER3: u8 = 0xF0;

/// Maximum number of repeater addresses a frame may carry (`AX25_MAX_RPT`).
pub const MAX_REPEATERS: usize = 8;

/// Maximum length of the information field (`AX25_INFO_LEN`).
pub const MAX_INFO_LEN: usize = 256;

/// A single AX.25 UI frame: one destination, one source, zero to eight
/// repeaters (in order), a fixed control/PID pair, and an information
/// payload of up to 256 bytes.
///
/// The frame is a plain value type — no heap-allocated address graph, per
/// the systems-language redesign note in §9 — so it can be cleared and
/// reused across transmissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub dst: Address,
    pub src: Address,
    repeaters: [Address; MAX_REPEATERS],
    repeaters_len: usize,
    pub ctrl: u8,
    pub pid: u8,
    info: [u8; MAX_INFO_LEN],
    info_len: usize,
}

impl Default for Frame {
    fn default() -> Self {
        Frame::new()
    }
}

impl Frame {
    /// A cleared frame with the UI/no-layer-3 defaults.
    pub fn new() -> Self {
        Frame {
            dst: Address::default(),
            src: Address::default(),
            repeaters: Default::default(),
            repeaters_len: 0,
            ctrl: CTRL_UI,
            pid: PID_NOLAYER3,
            info: [0u8; MAX_INFO_LEN],
            info_len: 0,
        }
    }

    /// Reset to the empty, default-control/PID state.
    pub fn clear(&mut self) {
        *self = Frame::new();
    }

    pub fn set_dst(&mut self, callsign: impl Into<String>, ssid: u8) {
        self.dst = Address::new(callsign, ssid);
    }

    pub fn set_src(&mut self, callsign: impl Into<String>, ssid: u8) {
        self.src = Address::new(callsign, ssid);
    }

    /// Append a repeater. Returns its index, or `TooManyRepeaters` once
    /// `MAX_REPEATERS` are already present.
    pub fn add_repeater(&mut self, callsign: impl Into<String>, ssid: u8) -> Result<usize, Ax25Error> {
        if self.repeaters_len >= MAX_REPEATERS {
            return Err(Ax25Error::TooManyRepeaters { max: MAX_REPEATERS });
        }
        let index = self.repeaters_len;
        self.repeaters[index] = Address::new(callsign, ssid);
        self.repeaters_len += 1;
        Ok(index)
    }

    /// Set the "has-been-repeated" flag of repeater `index`.
    pub fn set_repeater_flag(&mut self, index: usize, flag: bool) -> Result<(), Ax25Error> {
        if index >= self.repeaters_len {
            return Err(Ax25Error::IllegalRepeaterIndex {
                index,
                len: self.repeaters_len,
            });
        }
        self.repeaters[index].flag = flag;
        Ok(())
    }

    pub fn repeaters(&self) -> &[Address] {
        &self.repeaters[..self.repeaters_len]
    }

    /// Set the information field, truncating to `MAX_INFO_LEN` bytes.
    pub fn set_info(&mut self, info: &[u8]) {
        let len = info.len().min(MAX_INFO_LEN);
        self.info[..len].copy_from_slice(&info[..len]);
        self.info_len = len;
    }

    pub fn info(&self) -> &[u8] {
        &self.info[..self.info_len]
    }
}

impl std::fmt::Display for Frame {
    /// TNC-2 monitor notation: `DEST[-ssid]>SRC[-ssid][,RPT[-ssid][*]]…:<info>`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}>{}", self.dst, self.src)?;
        for rpt in self.repeaters() {
            write!(f, ",{}", rpt)?;
        }
        write!(f, ":")?;
        match std::str::from_utf8(self.info()) {
            Ok(s) => write!(f, "{}", s)?,
            Err(_) => {
                for &b in self.info() {
                    write!(f, "{:02x}", b)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn monitor_string_matches_s2() {
        assert_eq!(
            s1_frame().to_string(),
            "TLM100>NOCALL,TEST*:>Test 00001: SolarPi APRS"
        );
    }

    #[test]
    fn monitor_string_with_no_repeaters() {
        let mut f = Frame::new();
        f.set_dst("TLM100", 0);
        f.set_src("NOCALL", 0);
        f.set_info(b"hello");
        assert_eq!(f.to_string(), "TLM100>NOCALL:hello");
    }

    #[test]
    fn ninth_repeater_is_rejected() {
        let mut f = Frame::new();
        for i in 0..MAX_REPEATERS {
            f.add_repeater(format!("R{}", i), 0).unwrap();
        }
        assert!(f.add_repeater("R8", 0).is_err());
    }

    #[test]
    fn clear_resets_to_defaults() {
        let mut f = s1_frame();
        f.clear();
        assert_eq!(f.ctrl, CTRL_UI);
        assert_eq!(f.pid, PID_NOLAYER3);
        assert!(f.repeaters().is_empty());
        assert!(f.info().is_empty());
    }

    #[test]
    fn info_longer_than_capacity_is_truncated() {
        let mut f = Frame::new();
        let long = vec![0x41u8; MAX_INFO_LEN + 50];
        f.set_info(&long);
        assert_eq!(f.info().len(), MAX_INFO_LEN);
    }
}
