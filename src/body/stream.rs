use bytes::{Bytes, BytesMut};
use std::io::{self, Read};

/// Incremental body source.
///
/// Each chunk is written with chunked framing as soon as it is produced. Empty chunks are
/// skipped, `Ok(None)` ends the body.
pub trait BodyStream {
    fn next_chunk(&mut self) -> io::Result<Option<Bytes>>;
}

impl<S: BodyStream + ?Sized> BodyStream for Box<S> {
    #[inline]
    fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        S::next_chunk(self)
    }
}

/// [`BodyStream`] from an iterator of chunks.
///
/// ```
/// # use stepline::body::{Body, Iter};
/// let body = Body::stream(Iter::new(["Hello", " ", "World!"]));
/// assert!(body.len().is_none());
/// ```
#[derive(Debug)]
pub struct Iter<I> {
    iter: I,
}

impl<I> Iter<I> {
    pub fn new<T>(iter: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self { iter: iter.into_iter() }
    }
}

impl<I> BodyStream for Iter<I>
where
    I: Iterator,
    I::Item: Into<Bytes>,
{
    #[inline]
    fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        Ok(self.iter.next().map(Into::into))
    }
}

/// [`BodyStream`] from a reader, producing chunks of at most `chunk_size` bytes.
#[derive(Debug)]
pub struct ReadStream<R> {
    read: R,
    chunk_size: usize,
}

impl<R> ReadStream<R> {
    /// Default chunk size.
    pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

    pub fn new(read: R) -> Self {
        Self { read, chunk_size: Self::DEFAULT_CHUNK_SIZE }
    }

    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(read: R, chunk_size: usize) -> Self {
        assert!(chunk_size != 0, "chunk size cannot be zero");
        Self { read, chunk_size }
    }
}

impl<R: Read> BodyStream for ReadStream<R> {
    fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        let mut chunk = BytesMut::zeroed(self.chunk_size);
        let read = loop {
            match self.read.read(&mut chunk) {
                Ok(read) => break read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        };
        if read == 0 {
            return Ok(None);
        }
        chunk.truncate(read);
        Ok(Some(chunk.freeze()))
    }
}
