//! Textual callsign <-> 7-byte on-wire AX.25 address codec (§4.B).

use crate::error::AddressError;

/// Number of callsign characters carried on the wire, per `AX25_CALL_LEN`.
pub const CALL_LEN: usize = 6;

/// One AX.25 station address: a callsign, its SSID (0..15), and the
/// "has-been-repeated" flag (meaningful only for repeaters).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    /// Callsign, stored without trailing-space padding (spaces are string
    /// terminators on the wire, per §4.B decode).
    pub callsign: String,
    /// Secondary station identifier, 0..15.
    pub ssid: u8,
    /// "Has been repeated" flag; irrelevant for source/destination.
    pub flag: bool,
}

impl Address {
    pub fn new(callsign: impl Into<String>, ssid: u8) -> Self {
        Address {
            callsign: callsign.into(),
            ssid: ssid & 0x0F,
            flag: false,
        }
    }

    pub fn with_flag(callsign: impl Into<String>, ssid: u8, flag: bool) -> Self {
        Address {
            callsign: callsign.into(),
            ssid: ssid & 0x0F,
            flag,
        }
    }

    /// Encode to the 7-byte on-wire form: 6 shifted-left callsign bytes,
    /// then the SSID/flag byte. `last` sets bit 0 of the final byte, which
    /// terminates the address list.
    pub fn encode(&self, last: bool) -> Result<[u8; 7], AddressError> {
        let mut out = [0u8; 7];
        // Callsigns longer than CALL_LEN are truncated, mirroring the
        // original's `strncpy(callsign, ..., AX25_CALL_LEN)`.
        let chars: Vec<char> = self.callsign.chars().take(CALL_LEN).collect();
        for i in 0..CALL_LEN {
            let c = chars.get(i).copied().unwrap_or(' ');
            if !(c.is_ascii_alphanumeric() || c == ' ') {
                return Err(AddressError::IllegalCallsign(self.callsign.clone()));
            }
            let upper = c.to_ascii_uppercase() as u8;
            out[i] = upper << 1;
        }
        out[6] = 0x60 | (if self.flag { 0x80 } else { 0 }) | (self.ssid << 1) | (last as u8);
        Ok(out)
    }

    /// Decode a 7-byte on-wire address. Returns the address and whether this
    /// was the final address in the list (bit 0 of the seventh byte).
    pub fn decode(bytes: &[u8; 7]) -> (Address, bool) {
        let mut callsign = String::with_capacity(CALL_LEN);
        for &b in &bytes[0..CALL_LEN] {
            let c = (b >> 1) as char;
            if c == ' ' {
                break;
            }
            callsign.push(c);
        }
        let ssid = (bytes[6] >> 1) & 0x0F;
        let flag = bytes[6] & 0x80 != 0;
        let last = bytes[6] & 0x01 != 0;
        (Address { callsign, ssid, flag }, last)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.callsign)?;
        if self.ssid != 0 {
            write!(f, "-{}", self.ssid)?;
        }
        if self.flag {
            write!(f, "*")?;
        }
        Ok(())
    }
}
