use super::{Exchange, State};
use crate::error::ParseError;
use crate::handler::Handler;
use crate::socket::Socket;

impl<S, H> Exchange<S, H>
where
    S: Socket,
    H: Handler,
{
    pub(super) fn request_body(&mut self) {
        let available = self.limit - self.index;
        if available == 0 {
            return self.read_more(State::RequestBody, ParseError::ContentTooLarge);
        }

        let take = (available as u64).min(self.content_remaining) as usize;
        let end = self.index + take;
        self.content.extend_from_slice(&self.buffer[self.index..end]);
        self.index = end;
        self.consume_line();
        self.content_remaining -= take as u64;

        if self.content_remaining == 0 {
            self.state = State::Handle;
        }
    }

    pub(super) fn request_body_chunked(&mut self) {
        if self.index == self.limit {
            return self.read_more(State::RequestBodyChunked, ParseError::InvalidChunked);
        }

        let Some(decoder) = self.chunked.as_mut() else {
            self.state = State::Handle;
            return;
        };

        let input = &self.buffer[self.index..self.limit];
        let max = self.config.get_max_body_size();
        match decoder.decode(input, &mut self.content, max) {
            Ok(read) => {
                let done = decoder.is_done();
                self.index += read;
                self.consume_line();
                if done {
                    self.chunked = None;
                    self.state = State::Handle;
                }
            }
            Err(err) => self.reject(err),
        }
    }
}
