use super::{Exchange, State};
use crate::error::{ExchangeError, ParseError};
use crate::handler::Handler;
use crate::socket::Socket;

impl<S, H> Exchange<S, H>
where
    S: Socket,
    H: Handler,
{
    /// Returns the unread bytes.
    #[inline]
    pub(super) fn unread(&self) -> &[u8] {
        &self.buffer[self.index..self.limit]
    }

    /// Returns `true` if a read can receive at least one more byte.
    ///
    /// Bytes before `line_start` are consumed and reclaimed by compaction, so only a line that
    /// spans the whole capacity cannot grow.
    #[inline]
    pub(super) fn can_read(&self) -> bool {
        self.limit < self.buffer.len() || self.line_start > 0
    }

    /// The current token is incomplete, read more bytes then resume in `resume`.
    ///
    /// If the buffer cannot receive more bytes, the token exceeds the capacity and the request
    /// is rejected with `full`.
    pub(super) fn read_more(&mut self, resume: State, full: ParseError) {
        if self.can_read() {
            self.next_action = resume;
            self.state = State::InputRead;
        } else {
            self.reject(full);
        }
    }

    /// Shift the current line to offset zero.
    pub(super) fn compact(&mut self) {
        let start = self.line_start;
        if start == 0 {
            return;
        }
        self.buffer.copy_within(start..self.limit, 0);
        self.index -= start;
        self.limit -= start;
        self.line_start = 0;
    }

    /// Mark every byte before `index` as consumed.
    #[inline]
    pub(super) fn consume_line(&mut self) {
        self.line_start = self.index;
    }

    /// Reject the request with a client error response.
    pub(super) fn reject(&mut self, err: ParseError) {
        self.error = Some(ExchangeError::Client(err));
        self.state = State::ClientError;
    }

    /// Remaining write capacity.
    #[inline]
    pub(super) fn spare(&self) -> usize {
        self.buffer.len() - self.limit
    }

    /// Append bytes that are known to fit.
    pub(super) fn put(&mut self, bytes: &[u8]) {
        let end = self.limit + bytes.len();
        self.buffer[self.limit..end].copy_from_slice(bytes);
        self.limit = end;
    }

    /// Flush the buffer, then resume in `resume`.
    #[inline]
    pub(super) fn flush_then(&mut self, resume: State) {
        self.next_action = resume;
        self.state = State::OutputBuffer;
    }
}
