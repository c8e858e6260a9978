//! HTTP Message Body.
//!
//! - [`Body`] response body staged by a handler
//! - [`BodyStream`] incremental body source, sent with chunked framing
//! - [`Iter`], [`ReadStream`] stream adapters
mod stream;
mod chunked;

pub use stream::{BodyStream, Iter, ReadStream};
pub(crate) use chunked::{ChunkedDecoder, encode_chunk, LAST_CHUNK};

use bytes::Bytes;
use std::fs::File;

/// Response body.
#[derive(Default)]
pub enum Body {
    /// No content.
    #[default]
    Empty,
    /// In memory content.
    Bytes(Bytes),
    /// File content of known length.
    File {
        file: File,
        len: u64,
    },
    /// Streamed content, written with chunked framing.
    Stream(Box<dyn BodyStream + Send>),
}

impl Body {
    /// Create streamed body.
    pub fn stream<S: BodyStream + Send + 'static>(stream: S) -> Self {
        Self::Stream(Box::new(stream))
    }

    /// Returns the exact content length if known upfront.
    pub fn len(&self) -> Option<u64> {
        match self {
            Self::Empty => Some(0),
            Self::Bytes(bytes) => Some(bytes.len() as u64),
            Self::File { len, .. } => Some(*len),
            Self::Stream(_) => None,
        }
    }

    /// Returns `true` if the body is known to be empty.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

impl From<Bytes> for Body {
    #[inline]
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<&'static str> for Body {
    #[inline]
    fn from(value: &'static str) -> Self {
        Self::Bytes(Bytes::from_static(value.as_bytes()))
    }
}

impl From<&'static [u8]> for Body {
    #[inline]
    fn from(value: &'static [u8]) -> Self {
        Self::Bytes(Bytes::from_static(value))
    }
}

impl From<String> for Body {
    #[inline]
    fn from(value: String) -> Self {
        Self::Bytes(value.into())
    }
}

impl From<Vec<u8>> for Body {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value.into())
    }
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::File { len, .. } => f.debug_struct("File").field("len", len).finish(),
            Self::Stream(_) => f.write_str("Stream"),
        }
    }
}
