//! In-memory socket for tests.
use std::collections::VecDeque;
use std::io::{self, Read, Write};

use crate::socket::Socket;

enum Script {
    Data(Vec<u8>),
    Error(io::ErrorKind),
}

/// Socket with scripted reads and captured writes.
///
/// Each read returns at most one scripted chunk, reads past the script return end of stream.
#[derive(Default)]
pub(crate) struct MockSocket {
    input: VecDeque<Script>,
    output: Vec<u8>,
    reads: usize,
    writes: usize,
    max_write: Option<usize>,
    fail_write: Option<io::ErrorKind>,
    closed: bool,
}

impl MockSocket {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Socket delivering `input` in a single read.
    pub(crate) fn with_input(input: impl AsRef<[u8]>) -> Self {
        Self::new().chunk(input)
    }

    /// Socket delivering `input` in reads of at most `size` bytes.
    pub(crate) fn with_chunks(input: impl AsRef<[u8]>, size: usize) -> Self {
        input.as_ref().chunks(size).fold(Self::new(), Self::chunk)
    }

    /// Append one scripted read.
    pub(crate) fn chunk(mut self, input: impl AsRef<[u8]>) -> Self {
        self.input.push_back(Script::Data(input.as_ref().to_vec()));
        self
    }

    /// Append one failing read.
    pub(crate) fn read_error(mut self, kind: io::ErrorKind) -> Self {
        self.input.push_back(Script::Error(kind));
        self
    }

    /// Fail every write.
    pub(crate) fn write_error(mut self, kind: io::ErrorKind) -> Self {
        self.fail_write = Some(kind);
        self
    }

    /// Accept at most `max` bytes per write call.
    pub(crate) fn max_write(mut self, max: usize) -> Self {
        self.max_write = Some(max);
        self
    }

    pub(crate) fn output(&self) -> &[u8] {
        &self.output
    }

    pub(crate) fn output_str(&self) -> &str {
        std::str::from_utf8(&self.output).expect("non UTF-8 output")
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Read for MockSocket {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        assert!(!self.closed, "read after close");
        assert!(!buf.is_empty(), "read into empty buffer");
        self.reads += 1;

        match self.input.pop_front() {
            None => Ok(0),
            Some(Script::Error(kind)) => Err(kind.into()),
            Some(Script::Data(mut data)) => {
                let len = data.len().min(buf.len());
                buf[..len].copy_from_slice(&data[..len]);
                if len < data.len() {
                    self.input.push_front(Script::Data(data.split_off(len)));
                }
                Ok(len)
            }
        }
    }
}

impl Write for MockSocket {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        assert!(!self.closed, "write after close");
        self.writes += 1;

        if let Some(kind) = self.fail_write {
            return Err(kind.into());
        }
        let len = self.max_write.map_or(buf.len(), |max| max.min(buf.len()));
        self.output.extend_from_slice(&buf[..len]);
        Ok(len)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Socket for MockSocket {
    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        Ok(())
    }
}

impl std::fmt::Debug for MockSocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSocket")
            .field("pending", &self.input.len())
            .field("output", &String::from_utf8_lossy(&self.output))
            .field("closed", &self.closed)
            .finish()
    }
}
