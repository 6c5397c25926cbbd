//! Closed error sets for the address codec and the two framing engines.
//!
//! The original C library both returns an error code and latches it on the
//! controlling object for out-of-band inspection (`iAx25Error`/`iTncError`).
//! Each engine here keeps that latch as a `last_error()` accessor, but the
//! primary contract is the returned `Result`.

use std::io;

/// Errors raised while encoding/decoding a single on-wire address.
#[derive(thiserror::Error, Debug)]
pub enum AddressError {
    /// A callsign character was not alphanumeric or space (`AX25_ILLEGAL_CALLSIGN`).
    #[error("illegal callsign: {0:?}")]
    IllegalCallsign(String),
}

/// Errors raised by the AX.25 UI framing engine.
#[derive(thiserror::Error, Debug)]
pub enum Ax25Error {
    /// Non-alphanumeric callsign character (`AX25_ILLEGAL_CALLSIGN`).
    #[error("illegal callsign: {0:?}")]
    IllegalCallsign(String),
    /// More than `AX25_MAX_RPT` repeaters were supplied (`AX25_NOT_ENOUGH_REPEATER`).
    #[error("too many repeaters (max {max})")]
    TooManyRepeaters { max: usize },
    /// Repeater index out of range for `set_repeater_flag` (`AX25_ILLEGAL_REPEATER`).
    #[error("illegal repeater index {index} (have {len})")]
    IllegalRepeaterIndex { index: usize, len: usize },
    /// Control or PID byte was not `AX25_CTRL_UI`/`AX25_PID_NOLAYER3` (`AX25_INVALID_FRAME`).
    #[error("invalid frame: {0}")]
    InvalidFrame(&'static str),
    /// The send-side CRC self-check failed (`AX25_CRC_ERROR`); see §9 design notes.
    #[error("CRC self-check failed")]
    CrcError,
    /// `read()` was called before `poll()` returned a completed frame (`AX25_NO_FRAME_RECEIVED`).
    #[error("no frame received yet")]
    NoFrameReceived,
    /// The underlying byte channel failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised by the TNC ASCII framing engine.
#[derive(thiserror::Error, Debug)]
pub enum TncError {
    /// The trailing four-digit hex CRC did not match the computed one (`TNC_CRC_ERROR`).
    #[error("CRC mismatch")]
    CrcError,
    /// More than four hex digits appeared after `ETX` (`TNC_ILLEGAL_MSG`).
    #[error("illegal message")]
    IllegalMessage,
    /// `read()` was called before `poll()` reached the `EOT` state (`TNC_NO_FRAME_RECEIVED`).
    #[error("no frame received yet")]
    NoFrameReceived,
    /// The underlying byte channel failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<AddressError> for Ax25Error {
    fn from(e: AddressError) -> Self {
        match e {
            AddressError::IllegalCallsign(c) => Ax25Error::IllegalCallsign(c),
        }
    }
}
