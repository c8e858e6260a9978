//! Blocking byte stream endpoint.
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};

/// A blocking byte stream that can be closed.
///
/// Reads return `Ok(0)` at end of stream. Closing is idempotent from the exchange point of view,
/// it is called at most once per connection.
pub trait Socket: Read + Write {
    /// Close both halves of the connection.
    fn close(&mut self) -> io::Result<()>;
}

impl Socket for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            // peer already gone
            Err(err) if err.kind() == io::ErrorKind::NotConnected => Ok(()),
            result => result,
        }
    }
}

#[cfg(unix)]
impl Socket for std::os::unix::net::UnixStream {
    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            Err(err) if err.kind() == io::ErrorKind::NotConnected => Ok(()),
            result => result,
        }
    }
}

impl<S: Socket + ?Sized> Socket for &mut S {
    #[inline]
    fn close(&mut self) -> io::Result<()> {
        S::close(self)
    }
}

impl<S: Socket + ?Sized> Socket for Box<S> {
    #[inline]
    fn close(&mut self) -> io::Result<()> {
        S::close(self)
    }
}
