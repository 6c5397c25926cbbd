//! Byte-channel abstraction (§4.F).
//!
//! The core only needs two things from the environment: something it can
//! pull currently-available bytes from without blocking forever, and
//! something it can push bytes to. This generalizes the teacher's
//! `Interface` trait (which exposed `tx_space`/`tx_byte` callbacks tailored
//! to MIN's flow control) down to the plain read/write contract §4.F
//! describes; AX.25/TNC framing needs no flow control of its own.

use std::io;

/// A non-blocking-friendly byte source: `read` may return `Ok(0)` when no
/// data is currently available, `Ok(n)` for `n` bytes read, or `Err` on a
/// genuine I/O failure. Both engines treat `Ok(0)` as "nothing to do yet".
pub trait ByteSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// A byte sink: writes one byte at a time, and can be asked to flush
/// pending output before a send (the TNC engine does this per §4.E.1).
pub trait ByteSink {
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// Anything implementing `std::io::Read` is usable as a `ByteSource`
/// (serial ports, `TcpStream`, `Cursor<Vec<u8>>` in tests).
///
/// Both `WouldBlock` (non-blocking descriptors) and `TimedOut` (a
/// `serialport::SerialPort` configured with `.timeout(...)`, as
/// `demos/serial_ax25.rs` does) mean the same thing to a poll loop: nothing
/// arrived this round, try again later.
impl<T: io::Read + ?Sized> ByteSource for T {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match io::Read::read(self, buf) {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e),
        }
    }
}

/// Anything implementing `std::io::Write` is usable as a `ByteSink`.
impl<T: io::Write + ?Sized> ByteSink for T {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        io::Write::write_all(self, &[byte])
    }

    fn flush(&mut self) -> io::Result<()> {
        io::Write::flush(self)
    }
}
