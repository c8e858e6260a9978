use std::io;

use super::{Exchange, State};
use crate::error::{ExchangeError, ParseError};
use crate::handler::Handler;
use crate::log::debug;
use crate::note::Note;
use crate::socket::Socket;

impl<S, H> Exchange<S, H>
where
    S: Socket,
    H: Handler,
{
    /// One socket read appended at `limit`.
    pub(super) fn input_read(&mut self) {
        self.compact();

        // parsing states check `can_read` before reading
        if self.limit == self.buffer.len() {
            self.reject(ParseError::TooLong);
            return;
        }

        match self.socket.read(&mut self.buffer[self.limit..]) {
            Ok(0) => {
                if self.next_action == State::RequestLine && self.limit == 0 {
                    // idle connection closed by peer
                    debug!("connection closed by peer");
                } else {
                    let err = io::Error::from(io::ErrorKind::UnexpectedEof);
                    self.notes.send(Note::ReadError(&err));
                    self.error = Some(ExchangeError::Io(err));
                }
                self.keep_alive = false;
                self.state = State::Close;
            }
            Ok(read) => {
                self.limit += read;
                self.state = self.next_action;
            }
            Err(err) if is_retry(&err) => { }
            Err(err) => {
                self.notes.send(Note::ReadError(&err));
                self.error = Some(ExchangeError::Io(err));
                self.keep_alive = false;
                self.state = State::Close;
            }
        }
    }

    /// Write `[0, limit)` to socket, then resume `next_action`.
    pub(super) fn output_buffer(&mut self) {
        match self.socket.write_all(&self.buffer[..self.limit]) {
            Ok(()) => {
                self.limit = 0;
                self.state = self.next_action;
            }
            Err(err) => self.write_failed(err),
        }
    }

    /// Write bytes directly to socket, bypassing the buffer.
    pub(super) fn write_direct(&mut self, bytes: &[u8]) -> bool {
        match self.socket.write_all(bytes) {
            Ok(()) => true,
            Err(err) => {
                self.write_failed(err);
                false
            }
        }
    }

    pub(super) fn write_failed(&mut self, err: io::Error) {
        self.error = Some(ExchangeError::Io(err));
        self.keep_alive = false;
        self.state = State::ResultErrorWrite;
    }

    pub(super) fn result_error_write(&mut self) {
        if let Some(ExchangeError::Io(err)) = &self.error {
            self.notes.send(Note::WriteError(err));
        }
        self.state = State::Close;
    }

    pub(super) fn close(&mut self) {
        if let Err(err) = self.socket.flush().and_then(|_| self.socket.close()) {
            self.notes.send(Note::CloseError(&err));
        }
        self.state = State::Stop;
    }
}

fn is_retry(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock)
}
