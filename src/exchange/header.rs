use super::{Exchange, State};
use crate::error::ParseError;
use crate::handler::Handler;
use crate::headers::{Append, HeaderName, HeaderValue, RequestHeaders};
use crate::socket::Socket;

impl<S, H> Exchange<S, H>
where
    S: Socket,
    H: Handler,
{
    pub(super) fn parse_header(&mut self) {
        self.consume_line();

        match self.unread() {
            [] => self.read_more(State::ParseHeader, ParseError::HeaderTooLarge),
            [b'\n', ..] => {
                self.index += 1;
                self.end_headers();
            }
            [b'\r'] => self.read_more(State::ParseHeader, ParseError::HeaderTooLarge),
            [b'\r', b'\n', ..] => {
                self.index += 2;
                self.end_headers();
            }
            // obsolete line folding is rejected
            [b'\r' | b' ' | b'\t', ..] => self.reject(ParseError::InvalidHeader),
            _ => self.state = State::ParseHeaderName,
        }
    }

    pub(super) fn parse_header_name(&mut self) {
        let unread = self.unread();

        let Some(colon) = unread.iter().position(|&b| matches!(b, b':' | b'\n')) else {
            return self.read_more(State::ParseHeaderName, ParseError::HeaderTooLarge);
        };

        if unread[colon] == b'\n' {
            return self.reject(ParseError::InvalidHeader);
        }

        let Some(name) = HeaderName::from_buffer(&unread[..colon]) else {
            return self.reject(ParseError::InvalidHeader);
        };

        self.header_name = Some(name);
        self.index += colon + 1;
        self.state = State::ParseHeaderValue;
    }

    pub(super) fn parse_header_value(&mut self) {
        let unread = self.unread();

        let Some(lf) = unread.iter().position(|&b| b == b'\n') else {
            return self.read_more(State::ParseHeaderValue, ParseError::HeaderTooLarge);
        };

        let Some(value) = HeaderValue::from_buffer(&unread[..lf]) else {
            return self.reject(ParseError::InvalidHeader);
        };

        let Some(name) = self.header_name.take() else {
            return self.reject(ParseError::InvalidHeader);
        };

        let headers = self.headers.get_or_insert_with(RequestHeaders::new);
        if headers.append(name, value) == Append::Conflict {
            return self.reject(ParseError::InvalidContentLength);
        }

        self.index += lf + 1;
        self.state = State::ParseHeader;
    }

    /// Blank line found, select the content framing.
    fn end_headers(&mut self) {
        self.consume_line();

        let Some(headers) = self.headers.as_ref() else {
            self.state = State::Handle;
            return;
        };

        if let Some(coding) = headers.transfer_encoding() {
            // chunked must be the final coding and no other coding is supported
            if !coding.as_bytes().eq_ignore_ascii_case(b"chunked") {
                return self.reject(ParseError::UnsupportedTransferCoding);
            }
            self.ambiguous_length = headers.content_length().is_some();
            self.chunked = Some(crate::body::ChunkedDecoder::new());
            self.state = State::RequestBodyChunked;
            return;
        }

        let Some(length) = headers.content_length() else {
            self.state = State::Handle;
            return;
        };

        let Some(length) = length.parse_u64() else {
            return self.reject(ParseError::InvalidContentLength);
        };

        if length > self.config.get_max_body_size() {
            return self.reject(ParseError::ContentTooLarge);
        }

        if length == 0 {
            self.state = State::Handle;
            return;
        }

        // grows as content arrives beyond the first 64KiB
        self.content.reserve(length.min(1 << 16) as usize);
        self.content_remaining = length;
        self.state = State::RequestBody;
    }
}
