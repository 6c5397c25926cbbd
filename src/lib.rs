//! # radio-link
//!
//! AX.25 UI framing and TNC ASCII-armoured framing for amateur-radio
//! packet links: HDLC byte-stuffing and CRC-CCITT framing for connectionless
//! AX.25 traffic, and the SOH/STX/ETX/EOT hex-armoured transport used
//! between a host and a Terminal Node Controller.
//!
//! ## Example
//! ```
//! use radio_link::{ax25, frame::Frame};
//!
//! let mut tx = Frame::new();
//! tx.set_dst("TLM100", 0);
//! tx.set_src("NOCALL", 0);
//! tx.set_info(b"hello");
//!
//! let mut wire: Vec<u8> = Vec::new();
//! ax25::Engine::new("tx").send(&mut wire, &tx).unwrap();
//!
//! let mut rx = ax25::Engine::new("rx");
//! let mut cursor = std::io::Cursor::new(wire);
//! assert!(rx.poll(&mut cursor).unwrap());
//!
//! let mut rx_frame = Frame::new();
//! rx.read(&mut rx_frame).unwrap();
//! assert_eq!(rx_frame.info(), b"hello");
//! ```

pub mod address;
pub mod ax25;
pub mod crc;
pub mod error;
pub mod frame;
pub mod interface;
pub mod ssdv;
pub mod tnc;

pub use address::Address;
pub use error::{AddressError, Ax25Error, TncError};
pub use frame::Frame;
pub use interface::{ByteSink, ByteSource};
