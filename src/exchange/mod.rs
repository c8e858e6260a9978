//! HTTP/1.1 Exchange.
//!
//! [`Exchange`] drives one connection through an explicit state machine. Each
//! [`Exchange::step_one`] call performs exactly one state worth of work:
//!
//! - parsing states are bounded in-memory operations on the buffer
//! - [`State::InputRead`] and [`State::OutputBuffer`] perform one socket read or write
//! - [`State::HandleInvoke`] calls the [`Handler`]
//!
//! A step that needs more bytes records the state to resume in `next_action` and moves to
//! [`State::InputRead`].
use bytes::{Bytes, BytesMut};
use std::fs::File;
use std::sync::Arc;

use crate::body::{BodyStream, ChunkedDecoder};
use crate::config::Config;
use crate::error::ExchangeError;
use crate::handler::Handler;
use crate::headers::RequestHeaders;
use crate::http::{Method, Version};
use crate::note::{LogNotes, NoteSink};
use crate::socket::Socket;

mod buffer;
mod request_line;
mod header;
mod body;
mod handle;
mod output;
mod io;

pub use handle::{Request, Response};

/// Exchange state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Reset the exchange for a new request.
    Setup,
    /// Start reading a request.
    Input,
    /// Read from socket, then resume `next_action`.
    InputRead,

    /// Select method candidate from the first byte.
    RequestLine,
    /// Match the method name and its trailing space.
    RequestLineMethod,
    /// Select between PATCH, POST and PUT from the second byte.
    RequestLineMethodP,
    /// Parse the request target up to the next space.
    RequestLineTarget,
    /// Parse `HTTP/<digit>.<digit>` and the line terminator.
    RequestLineVersion,

    /// Check for the blank line ending the header section.
    ParseHeader,
    /// Parse header name up to the colon.
    ParseHeaderName,
    /// Parse header value up to the line terminator.
    ParseHeaderValue,

    /// Read `Content-Length` delimited content.
    RequestBody,
    /// Decode chunked content.
    RequestBodyChunked,

    /// Compute persistence and reset the response.
    Handle,
    /// Invoke the handler.
    HandleInvoke,

    /// Reset the buffer for writing.
    Output,
    /// Write the status line.
    OutputStatus,
    /// Write one response header.
    OutputHeader,
    /// Flush the buffer to socket, then resume `next_action`.
    OutputBuffer,
    /// Write the blank line ending the header section.
    OutputTerminator,
    /// Write the response body.
    OutputBody,

    /// Stage a client error response.
    ClientError,
    /// Response complete, either reuse or close the connection.
    Result,
    /// Response write failed.
    ResultErrorWrite,
    /// Close the socket.
    Close,
    /// Terminal state.
    Stop,
}

/// Response body being written.
enum Sending {
    None,
    File { file: File, remaining: u64 },
    Stream {
        stream: Box<dyn BodyStream + Send>,
        ended: bool,
        /// frame each chunk, otherwise the body ends with the connection
        chunked: bool,
    },
}

/// HTTP/1.1 exchange over a single connection.
///
/// The exchange is reused for every keep-alive request on the connection, the buffer is
/// allocated once.
pub struct Exchange<S, H> {
    socket: S,
    handler: H,
    notes: Arc<dyn NoteSink + Send + Sync>,
    config: Config,

    buffer: Box<[u8]>,
    /// next unread byte
    index: usize,
    /// one past the last valid byte
    limit: usize,
    /// start of the line being parsed, compaction never discards bytes after it
    line_start: usize,

    state: State,
    next_action: State,

    // ===== request =====
    method: Method,
    target: String,
    version: Version,
    header_name: Option<crate::headers::HeaderName>,
    headers: Option<RequestHeaders>,
    content: BytesMut,
    content_remaining: u64,
    chunked: Option<ChunkedDecoder>,
    body: Bytes,
    /// `Transfer-Encoding` and `Content-Length` both present
    ambiguous_length: bool,
    keep_alive: bool,

    // ===== response =====
    response: Response,
    header_index: usize,
    /// bytes of the current header line already written
    header_offset: usize,
    out: Bytes,
    sending: Sending,

    error: Option<ExchangeError>,
}

impl<S, H> Exchange<S, H>
where
    S: Socket,
    H: Handler,
{
    /// Create new exchange in [`State::Setup`].
    pub fn new(socket: S, handler: H, config: Config) -> Self {
        Self {
            socket,
            handler,
            notes: Arc::new(LogNotes),
            buffer: vec![0; config.get_buffer_size()].into_boxed_slice(),
            config,
            index: 0,
            limit: 0,
            line_start: 0,
            state: State::Setup,
            next_action: State::Setup,
            method: Method::GET,
            target: String::new(),
            version: Version::HTTP_11,
            header_name: None,
            headers: None,
            content: BytesMut::new(),
            content_remaining: 0,
            chunked: None,
            body: Bytes::new(),
            ambiguous_length: false,
            keep_alive: false,
            response: Response::new(),
            header_index: 0,
            header_offset: 0,
            out: Bytes::new(),
            sending: Sending::None,
            error: None,
        }
    }

    /// Replace the [`NoteSink`], the default is [`LogNotes`].
    pub fn with_notes<N>(mut self, notes: N) -> Self
    where
        N: NoteSink + Send + Sync + 'static,
    {
        self.notes = Arc::new(notes);
        self
    }

    /// Replace the [`NoteSink`] with a shared one.
    pub fn with_shared_notes(mut self, notes: Arc<dyn NoteSink + Send + Sync>) -> Self {
        self.notes = notes;
        self
    }

    /// Perform exactly one state worth of work.
    ///
    /// This never fails, abnormal completion is reported by [`Exchange::error`] once the
    /// exchange reaches [`State::Stop`].
    pub fn step_one(&mut self) {
        match self.state {
            State::Setup => self.setup(),
            State::Input => self.input(),
            State::InputRead => self.input_read(),

            State::RequestLine => self.request_line(),
            State::RequestLineMethod => self.request_line_method(),
            State::RequestLineMethodP => self.request_line_method_p(),
            State::RequestLineTarget => self.request_line_target(),
            State::RequestLineVersion => self.request_line_version(),

            State::ParseHeader => self.parse_header(),
            State::ParseHeaderName => self.parse_header_name(),
            State::ParseHeaderValue => self.parse_header_value(),

            State::RequestBody => self.request_body(),
            State::RequestBodyChunked => self.request_body_chunked(),

            State::Handle => self.handle(),
            State::HandleInvoke => self.handle_invoke(),

            State::Output => self.output(),
            State::OutputStatus => self.output_status(),
            State::OutputHeader => self.output_header(),
            State::OutputBuffer => self.output_buffer(),
            State::OutputTerminator => self.output_terminator(),
            State::OutputBody => self.output_body(),

            State::ClientError => self.client_error(),
            State::Result => self.result(),
            State::ResultErrorWrite => self.result_error_write(),
            State::Close => self.close(),
            State::Stop => { }
        }
    }

    /// Step until the connection is closed.
    pub fn run(&mut self) {
        while self.is_active() {
            self.step_one();
        }
    }

    /// Returns `false` once the exchange reached [`State::Stop`].
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state != State::Stop
    }

    /// Returns current state.
    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the error that terminated the exchange, if any.
    #[inline]
    pub fn error(&self) -> Option<&ExchangeError> {
        self.error.as_ref()
    }

    /// Returns `true` if the connection is reused after the current response.
    #[inline]
    pub fn keep_alive(&self) -> bool {
        self.keep_alive
    }

    /// Returns the next unread buffer offset.
    #[inline]
    pub fn buffer_index(&self) -> usize {
        self.index
    }

    /// Returns one past the last valid buffer offset.
    #[inline]
    pub fn buffer_limit(&self) -> usize {
        self.limit
    }

    /// Returns the parsed request.
    ///
    /// Fields are only meaningful once header parsing is complete.
    pub fn request(&self) -> Request<'_> {
        Request::new(
            self.method,
            &self.target,
            self.version,
            self.headers.as_ref(),
            &self.body,
        )
    }

    /// Returns the underlying socket.
    #[inline]
    pub fn socket(&self) -> &S {
        &self.socket
    }

    /// Consume the exchange, returning the socket and the error if any.
    pub fn into_parts(self) -> (S, Option<ExchangeError>) {
        (self.socket, self.error)
    }

    // ===== Setup =====

    fn setup(&mut self) {
        self.index = 0;
        self.limit = 0;
        self.line_start = 0;

        self.method = Method::GET;
        self.target.clear();
        self.version = Version::HTTP_11;
        self.header_name = None;
        if let Some(headers) = self.headers.as_mut() {
            headers.clear();
        }
        self.content.clear();
        self.content_remaining = 0;
        self.chunked = None;
        self.body = Bytes::new();
        self.ambiguous_length = false;
        self.keep_alive = false;

        self.response.clear();
        self.out = Bytes::new();
        self.sending = Sending::None;
        self.error = None;

        self.state = State::Input;
    }

    fn input(&mut self) {
        self.next_action = State::RequestLine;
        self.state = State::InputRead;
    }
}

impl<S, H> std::fmt::Debug for Exchange<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exchange")
            .field("state", &self.state)
            .field("next_action", &self.next_action)
            .field("index", &self.index)
            .field("limit", &self.limit)
            .field("capacity", &self.buffer.len())
            .field("keep_alive", &self.keep_alive)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
