//! Exchange errors.
use std::io;

use crate::http::StatusCode;

/// Type-erased handler error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP request parsing error.
///
/// Every variant maps to the status code of the client error response, see
/// [`ParseError::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Request line does not start with a supported method.
    UnknownMethod,
    /// Request line cannot complete within the buffer capacity.
    TooLong,
    /// Empty request target or invalid character in request target.
    InvalidTarget,
    /// Malformed `HTTP/<digit>.<digit>` version.
    InvalidVersion,
    /// Version major is not `1`.
    UnsupportedVersion,
    /// Request line have invalid separator.
    InvalidSeparator,
    /// Malformed header line.
    InvalidHeader,
    /// Single header line cannot complete within the buffer capacity.
    HeaderTooLarge,
    /// Malformed or conflicting `Content-Length`.
    InvalidContentLength,
    /// Request content exceeds the configured maximum size.
    ContentTooLarge,
    /// Malformed chunked request content.
    InvalidChunked,
    /// Transfer coding other than `chunked`.
    UnsupportedTransferCoding,
}

impl ParseError {
    /// Returns the status code of the response sent for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::TooLong => StatusCode::URI_TOO_LONG,
            Self::UnsupportedVersion => StatusCode::HTTP_VERSION_NOT_SUPPORTED,
            Self::ContentTooLarge => StatusCode::CONTENT_TOO_LARGE,
            Self::UnsupportedTransferCoding => StatusCode::NOT_IMPLEMENTED,
            Self::UnknownMethod
            | Self::InvalidTarget
            | Self::InvalidVersion
            | Self::InvalidSeparator
            | Self::InvalidHeader
            | Self::HeaderTooLarge
            | Self::InvalidContentLength
            | Self::InvalidChunked => StatusCode::BAD_REQUEST,
        }
    }
}

impl std::error::Error for ParseError { }

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::UnknownMethod => f.write_str("unknown method"),
            Self::TooLong => f.write_str("request line too long"),
            Self::InvalidTarget => f.write_str("invalid request target"),
            Self::InvalidVersion => f.write_str("invalid version"),
            Self::UnsupportedVersion => f.write_str("unsupported version"),
            Self::InvalidSeparator => f.write_str("invalid separator"),
            Self::InvalidHeader => f.write_str("invalid header"),
            Self::HeaderTooLarge => f.write_str("header too large"),
            Self::InvalidContentLength => f.write_str("invalid content length"),
            Self::ContentTooLarge => f.write_str("content too large"),
            Self::InvalidChunked => f.write_str("invalid chunked content"),
            Self::UnsupportedTransferCoding => f.write_str("unsupported transfer coding"),
        }
    }
}

/// Error that terminated an exchange abnormally.
#[derive(Debug)]
pub enum ExchangeError {
    /// Socket read or write failure, including unexpected end of stream.
    Io(io::Error),
    /// Malformed or oversized request, a client error response was attempted.
    Client(ParseError),
    /// Handler returned an error.
    Handler(BoxError),
    /// Handler panicked, contains the panic message if any.
    HandlerPanic(String),
    /// Handler returned without setting a status.
    NoResponse,
}

impl ExchangeError {
    /// Returns `true` if the error came from the socket.
    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Returns the parse error if this is a client error.
    #[inline]
    pub fn as_client(&self) -> Option<&ParseError> {
        match self {
            Self::Client(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for ExchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Client(err) => Some(err),
            Self::Handler(err) => Some(&**err),
            Self::HandlerPanic(_) | Self::NoResponse => None,
        }
    }
}

impl std::fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Client(err) => write!(f, "client error: {err}"),
            Self::Handler(err) => write!(f, "handler error: {err}"),
            Self::HandlerPanic(msg) => write!(f, "handler panicked: {msg}"),
            Self::NoResponse => f.write_str("handler did not set a response status"),
        }
    }
}

impl From<io::Error> for ExchangeError {
    #[inline]
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ParseError> for ExchangeError {
    #[inline]
    fn from(value: ParseError) -> Self {
        Self::Client(value)
    }
}
