use super::{Exchange, State};
use crate::error::ParseError;
use crate::handler::Handler;
use crate::http::{Candidate, Method, Version};
use crate::socket::Socket;

const VERSION_PREFIX: &[u8; 5] = b"HTTP/";

/// `HTTP/d.d`
const VERSION_LEN: usize = 8;

impl<S, H> Exchange<S, H>
where
    S: Socket,
    H: Handler,
{
    pub(super) fn request_line(&mut self) {
        // empty lines preceding the request line are ignored
        while let Some(b'\r' | b'\n') = self.unread().first() {
            self.index += 1;
        }
        self.consume_line();

        let Some(&first) = self.unread().first() else {
            return self.read_more(State::RequestLine, ParseError::TooLong);
        };

        match Method::candidate(first) {
            Candidate::One(method) => {
                self.method = method;
                self.state = State::RequestLineMethod;
            }
            Candidate::Ambiguous => self.state = State::RequestLineMethodP,
            Candidate::None => self.reject(ParseError::UnknownMethod),
        }
    }

    pub(super) fn request_line_method_p(&mut self) {
        let Some(&second) = self.unread().get(1) else {
            return self.read_more(State::RequestLineMethodP, ParseError::TooLong);
        };

        match Method::candidate_p(second) {
            Some(method) => {
                self.method = method;
                self.state = State::RequestLineMethod;
            }
            None => self.reject(ParseError::UnknownMethod),
        }
    }

    pub(super) fn request_line_method(&mut self) {
        let name = self.method.as_bytes();
        let unread = self.unread();

        // name followed by SP
        let available = unread.len().min(name.len() + 1);
        let matched = unread[..available]
            .iter()
            .zip(name.iter().chain(Some(&b' ')))
            .all(|(a, b)| a == b);

        if !matched {
            return self.reject(ParseError::UnknownMethod);
        }

        if available <= name.len() {
            return self.read_more(State::RequestLineMethod, ParseError::TooLong);
        }

        self.index += available;
        self.state = State::RequestLineTarget;
    }

    pub(super) fn request_line_target(&mut self) {
        let unread = self.unread();

        let mut len = 0;
        for &byte in unread {
            match byte {
                b' ' => break,
                b'\r' | b'\n' => return self.reject(ParseError::InvalidSeparator),
                0x21..=0x7e => len += 1,
                _ => return self.reject(ParseError::InvalidTarget),
            }
        }

        if len == unread.len() {
            return self.read_more(State::RequestLineTarget, ParseError::TooLong);
        }

        if len == 0 {
            return self.reject(ParseError::InvalidTarget);
        }

        // visible ASCII only, each byte is one char
        let end = self.index + len;
        self.target.clear();
        self.target.extend(self.buffer[self.index..end].iter().map(|&b| char::from(b)));

        self.index = end + 1;
        self.state = State::RequestLineVersion;
    }

    pub(super) fn request_line_version(&mut self) {
        let unread = self.unread();

        for (i, &byte) in unread.iter().take(VERSION_LEN).enumerate() {
            let valid = match i {
                0..=4 => byte == VERSION_PREFIX[i],
                6 => byte == b'.',
                _ => byte.is_ascii_digit(),
            };
            if !valid {
                return self.reject(ParseError::InvalidVersion);
            }
        }

        let terminator = match unread.get(VERSION_LEN..) {
            Some([b'\n', ..]) => 1,
            Some([b'\r', b'\n', ..]) => 2,
            Some([] | [b'\r']) | None => {
                return self.read_more(State::RequestLineVersion, ParseError::TooLong);
            }
            Some(_) => return self.reject(ParseError::InvalidVersion),
        };

        let major = unread[5] - b'0';
        let minor = unread[7] - b'0';
        if major != 1 {
            return self.reject(ParseError::UnsupportedVersion);
        }

        self.version = Version::new(major, minor);
        self.index += VERSION_LEN + terminator;
        self.consume_line();
        self.state = State::ParseHeader;
    }
}
