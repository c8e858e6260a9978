use bytes::Bytes;
use std::any::Any;
use std::fs::File;
use std::io;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use super::{Exchange, State};
use crate::body::{Body, BodyStream};
use crate::error::ExchangeError;
use crate::handler::Handler;
use crate::headers::{
    AsHeaderName, HeaderName, HeaderValue, InvalidHeaderValue, RequestHeaders, standard,
};
use crate::http::{Method, StatusCode, Version, httpdate_now};
use crate::note::Note;
use crate::socket::Socket;

static EMPTY_HEADERS: RequestHeaders = RequestHeaders::new();

// ===== Request =====

/// Read-only view of the parsed request.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    method: Method,
    target: &'a str,
    version: Version,
    headers: &'a RequestHeaders,
    body: &'a Bytes,
}

impl<'a> Request<'a> {
    pub(super) fn new(
        method: Method,
        target: &'a str,
        version: Version,
        headers: Option<&'a RequestHeaders>,
        body: &'a Bytes,
    ) -> Self {
        Self {
            method,
            target,
            version,
            headers: headers.unwrap_or(&EMPTY_HEADERS),
            body,
        }
    }

    /// Returns the request method.
    #[inline]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the request target as sent by the client.
    #[inline]
    pub fn target(&self) -> &'a str {
        self.target
    }

    /// Returns the target without the query.
    pub fn path(&self) -> &'a str {
        match self.target.split_once('?') {
            Some((path, _)) => path,
            None => self.target,
        }
    }

    /// Returns the target query, without the leading `?`.
    pub fn query(&self) -> Option<&'a str> {
        self.target.split_once('?').map(|(_, query)| query)
    }

    /// Returns the request version.
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the request headers.
    #[inline]
    pub fn headers(&self) -> &'a RequestHeaders {
        self.headers
    }

    /// Returns a header value by standard name or raw string.
    #[inline]
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&'a HeaderValue> {
        self.headers.get(name)
    }

    /// Returns the request content.
    #[inline]
    pub fn body(&self) -> &'a Bytes {
        self.body
    }
}

// ===== Response =====

/// Response staged by the handler.
///
/// Headers are written in insertion order. Body setters never add framing headers except
/// [`send`], [`send_file`] and [`send_stream`].
///
/// [`send`]: Response::send
/// [`send_file`]: Response::send_file
/// [`send_stream`]: Response::send_stream
#[derive(Debug, Default)]
pub struct Response {
    status: Option<StatusCode>,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: Body,
}

impl Response {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.status = None;
        self.headers.clear();
        self.body = Body::Empty;
    }

    /// Set the response status.
    pub fn status(&mut self, status: StatusCode) -> &mut Self {
        self.status = Some(status);
        self
    }

    /// Append a response header.
    ///
    /// # Errors
    ///
    /// Returns error if the value contains CR, LF or other control characters.
    pub fn header<V: Into<Bytes>>(
        &mut self,
        name: HeaderName,
        value: V,
    ) -> Result<&mut Self, InvalidHeaderValue> {
        let value = HeaderValue::from_bytes(value)?;
        self.headers.push((name, value));
        Ok(self)
    }

    /// Append a validated response header.
    pub fn header_value(&mut self, name: HeaderName, value: HeaderValue) -> &mut Self {
        self.headers.push((name, value));
        self
    }

    /// Append `Content-Length` header.
    pub fn content_length(&mut self, len: u64) -> &mut Self {
        self.header_value(standard::CONTENT_LENGTH, HeaderValue::from_u64(len))
    }

    /// Append `Date` header with the current time.
    pub fn date_now(&mut self) -> &mut Self {
        // httpdate is always printable ASCII
        if let Ok(date) = HeaderValue::from_bytes(Bytes::copy_from_slice(&httpdate_now())) {
            self.headers.push((standard::DATE, date));
        }
        self
    }

    /// Set the body, missing framing headers are derived when the response is written.
    pub fn body<B: Into<Body>>(&mut self, body: B) -> &mut Self {
        self.body = body.into();
        self
    }

    /// Set in memory body with its `Content-Length` header.
    pub fn send<B: Into<Bytes>>(&mut self, body: B) -> &mut Self {
        let body = body.into();
        self.content_length(body.len() as u64);
        self.body = Body::Bytes(body);
        self
    }

    /// Set file body with its `Content-Length` header.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or its metadata cannot be read.
    pub fn send_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<&mut Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        self.content_length(len);
        self.body = Body::File { file, len };
        Ok(self)
    }

    /// Set streamed body with `Transfer-Encoding: chunked` header.
    pub fn send_stream<B: BodyStream + Send + 'static>(&mut self, stream: B) -> &mut Self {
        self.header_value(standard::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        self.body = Body::stream(stream);
        self
    }

    /// Returns the staged status.
    #[inline]
    pub fn get_status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns the staged headers in insertion order.
    #[inline]
    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }

    /// Returns the staged body.
    #[inline]
    pub fn get_body(&self) -> &Body {
        &self.body
    }

    pub(super) fn status_or_ok(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub(super) fn take_body(&mut self) -> Body {
        std::mem::take(&mut self.body)
    }

    /// Returns `true` if the response asks to close the connection.
    pub(super) fn is_close(&self) -> bool {
        self.headers
            .iter()
            .any(|(name, value)| *name == standard::CONNECTION && value.contains_token("close"))
    }

    pub(super) fn header_at(&self, index: usize) -> Option<&(HeaderName, HeaderValue)> {
        self.headers.get(index)
    }

    fn contains(&self, name: &HeaderName) -> bool {
        self.headers.iter().any(|(n, _)| n == name)
    }

    fn remove(&mut self, name: &HeaderName) {
        self.headers.retain(|(n, _)| n != name);
    }

    /// Make the framing headers agree with the staged body.
    ///
    /// Without chunked support, a body of unknown length is delimited by closing the
    /// connection.
    pub(super) fn frame(&mut self, chunked_supported: bool) -> Framing {
        if self.status_or_ok().is_bodiless() {
            return Framing::Length;
        }

        match self.body.len() {
            Some(len) => {
                self.remove(&standard::TRANSFER_ENCODING);
                if !self.contains(&standard::CONTENT_LENGTH) {
                    self.content_length(len);
                }
                Framing::Length
            }
            None if chunked_supported => {
                self.remove(&standard::CONTENT_LENGTH);
                if !self.contains(&standard::TRANSFER_ENCODING) {
                    let chunked = HeaderValue::from_static("chunked");
                    self.header_value(standard::TRANSFER_ENCODING, chunked);
                }
                Framing::Chunked
            }
            None => {
                self.remove(&standard::CONTENT_LENGTH);
                self.remove(&standard::TRANSFER_ENCODING);
                Framing::Close
            }
        }
    }
}

/// How the response body is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Framing {
    /// `Content-Length`, or a bodiless status.
    Length,
    /// `Transfer-Encoding: chunked`.
    Chunked,
    /// End of body is the end of the connection.
    Close,
}

// ===== Handle =====

impl<S, H> Exchange<S, H>
where
    S: Socket,
    H: Handler,
{
    pub(super) fn handle(&mut self) {
        self.body = self.content.split().freeze();

        let requested = self.headers.as_ref().and_then(RequestHeaders::connection);
        self.keep_alive = !self.ambiguous_length
            && requested.unwrap_or(self.version.is_keep_alive_default());

        if let Some(headers) = self.headers.as_ref() {
            let unknown = headers.unknown_names().cloned().collect::<Vec<_>>();
            if !unknown.is_empty() {
                self.notes.send(Note::UnknownHeaders(&unknown));
            }
        }

        self.response.clear();
        self.state = State::HandleInvoke;
    }

    pub(super) fn handle_invoke(&mut self) {
        let request = Request::new(
            self.method,
            &self.target,
            self.version,
            self.headers.as_ref(),
            &self.body,
        );
        let handler = &self.handler;
        let response = &mut self.response;

        let result = catch_unwind(AssertUnwindSafe(|| handler.handle(&request, response)));

        let err = match result {
            Ok(Ok(())) if self.response.status.is_some() => {
                self.state = State::Output;
                return;
            }
            Ok(Ok(())) => ExchangeError::NoResponse,
            Ok(Err(err)) => ExchangeError::Handler(err),
            Err(panic) => ExchangeError::HandlerPanic(panic_message(panic)),
        };

        self.notes.send(Note::HandlerError(&err));
        self.error = Some(err);
        self.keep_alive = false;

        // a staged response is still sent
        self.state = match self.response.status {
            Some(_) => State::Output,
            None => State::Close,
        };
    }
}

pub(super) fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(msg) => *msg,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_owned(),
            Err(_) => String::from("unknown panic"),
        },
    }
}
