use bytes::{Buf, Bytes};
use std::any::Any;
use std::io::{self, Read};
use std::panic::{AssertUnwindSafe, catch_unwind};

use super::handle::{Framing, panic_message};
use super::{Exchange, Sending, State};
use crate::body::{Body, LAST_CHUNK, encode_chunk};
use crate::error::ExchangeError;
use crate::handler::Handler;
use crate::headers::{HeaderValue, standard};
use crate::http::{Method, StatusCode};
use crate::note::Note;
use crate::socket::Socket;

const VERSION: &[u8] = b"HTTP/1.1";

impl<S, H> Exchange<S, H>
where
    S: Socket,
    H: Handler,
{
    pub(super) fn output(&mut self) {
        self.index = 0;
        self.limit = 0;
        self.line_start = 0;
        self.header_index = 0;
        self.header_offset = 0;

        if self.response.is_close() {
            self.keep_alive = false;
        }

        if self.response.frame(self.version.is_chunked_supported()) == Framing::Close {
            self.keep_alive = false;
        }

        self.state = State::OutputStatus;
    }

    pub(super) fn output_status(&mut self) {
        // buffer is empty and at least `Config::MIN_BUFFER_SIZE`
        let line = self.response.status_or_ok().line();
        self.put(VERSION);
        self.put(line);
        self.state = State::OutputHeader;
    }

    pub(super) fn output_header(&mut self) {
        let Some((name, value)) = self.response.header_at(self.header_index) else {
            self.state = State::OutputTerminator;
            return;
        };

        let segments: [&[u8]; 4] = [name.as_str().as_bytes(), b": ", value.as_bytes(), b"\r\n"];
        let len = segments.iter().map(|e| e.len()).sum::<usize>() - self.header_offset;
        let spare = self.buffer.len() - self.limit;

        if len <= spare {
            copy_segments(&segments, self.header_offset, &mut self.buffer[self.limit..]);
            self.limit += len;
            self.header_index += 1;
            self.header_offset = 0;
            return;
        }

        if self.limit == 0 {
            // header line larger than the whole buffer
            copy_segments(&segments, self.header_offset, &mut self.buffer[..]);
            self.limit = spare;
            self.header_offset += spare;
        }

        self.flush_then(State::OutputHeader);
    }

    pub(super) fn output_terminator(&mut self) {
        if self.spare() < 2 {
            return self.flush_then(State::OutputTerminator);
        }
        self.put(b"\r\n");
        self.prepare_body();
        self.state = State::OutputBody;
    }

    fn prepare_body(&mut self) {
        let status = self.response.status_or_ok();
        let body = self.response.take_body();

        if self.method == Method::HEAD || status.is_bodiless() {
            self.sending = Sending::None;
            return;
        }

        self.sending = match body {
            Body::Empty => Sending::None,
            Body::Bytes(bytes) => {
                self.out = bytes;
                Sending::None
            }
            Body::File { file, len } => Sending::File { file, remaining: len },
            Body::Stream(stream) => Sending::Stream {
                stream,
                ended: false,
                chunked: self.version.is_chunked_supported(),
            },
        };
    }

    pub(super) fn output_body(&mut self) {
        if !self.out.is_empty() {
            return self.write_out();
        }

        match &mut self.sending {
            Sending::None => {
                if self.limit > 0 {
                    self.flush_then(State::OutputBody);
                } else {
                    self.state = State::Result;
                }
            }
            Sending::File { file, remaining } => {
                if *remaining == 0 {
                    self.sending = Sending::None;
                    return;
                }
                if self.limit == self.buffer.len() {
                    return self.flush_then(State::OutputBody);
                }

                let want = (*remaining).min((self.buffer.len() - self.limit) as u64) as usize;
                let end = self.limit + want;
                match file.read(&mut self.buffer[self.limit..end]) {
                    Ok(0) => {
                        let err = io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "file is shorter than its content length",
                        );
                        self.write_failed(err);
                    }
                    Ok(read) => {
                        self.limit += read;
                        *remaining -= read as u64;
                    }
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => { }
                    Err(err) => self.write_failed(err),
                }
            }
            Sending::Stream { stream, ended, chunked } => {
                if *ended {
                    self.sending = Sending::None;
                    return;
                }
                match catch_unwind(AssertUnwindSafe(|| stream.next_chunk())) {
                    Ok(Ok(Some(chunk))) if chunk.is_empty() => { }
                    Ok(Ok(Some(chunk))) if *chunked => self.out = encode_chunk(&chunk),
                    Ok(Ok(Some(chunk))) => self.out = chunk,
                    Ok(Ok(None)) => {
                        *ended = true;
                        if *chunked {
                            self.out = Bytes::from_static(LAST_CHUNK);
                        }
                    }
                    Ok(Err(err)) => self.write_failed(err),
                    Err(panic) => self.stream_panicked(panic),
                }
            }
        }
    }

    /// Body stream panicked mid response, the response is truncated by closing.
    fn stream_panicked(&mut self, panic: Box<dyn Any + Send>) {
        let err = ExchangeError::HandlerPanic(panic_message(panic));
        self.notes.send(Note::HandlerError(&err));
        self.error = Some(err);
        self.keep_alive = false;
        self.sending = Sending::None;
        self.state = State::Close;
    }

    /// Copy pending body bytes into the buffer, flushing when full.
    fn write_out(&mut self) {
        let capacity = self.buffer.len();

        if self.limit == 0 && self.out.len() >= capacity {
            let out = std::mem::take(&mut self.out);
            self.write_direct(&out);
            return;
        }

        let take = self.spare().min(self.out.len());
        let end = self.limit + take;
        self.buffer[self.limit..end].copy_from_slice(&self.out[..take]);
        self.limit = end;
        self.out.advance(take);

        if self.limit == capacity {
            self.flush_then(State::OutputBody);
        }
    }

    pub(super) fn client_error(&mut self) {
        let err = match &self.error {
            Some(ExchangeError::Client(err)) => *err,
            _ => {
                self.state = State::Close;
                return;
            }
        };

        let status = err.status();
        self.notes.send(Note::ClientError(status, err));

        self.keep_alive = false;
        self.response.clear();
        self.response
            .status(status)
            .header_value(standard::CONTENT_LENGTH, HeaderValue::from_static("0"))
            .header_value(standard::CONNECTION, HeaderValue::from_static("close"));

        self.state = State::Output;
    }

    pub(super) fn result(&mut self) {
        self.notes.send(Note::Processed {
            method: self.method,
            target: &self.target,
            status: self.response.get_status().unwrap_or(StatusCode::OK),
        });

        self.state = match self.keep_alive {
            true => State::Setup,
            false => State::Close,
        };
    }
}

/// Copy the concatenated `segments`, skipping the first `skip` bytes, into `dst` as much as
/// it fits.
fn copy_segments(segments: &[&[u8]], mut skip: usize, dst: &mut [u8]) {
    let mut at = 0;
    for segment in segments {
        if skip >= segment.len() {
            skip -= segment.len();
            continue;
        }
        let segment = &segment[skip..];
        skip = 0;

        let take = segment.len().min(dst.len() - at);
        dst[at..at + take].copy_from_slice(&segment[..take]);
        at += take;
        if at == dst.len() {
            break;
        }
    }
}
