use bytes::{BufMut, Bytes, BytesMut};

use crate::error::ParseError;

/// Zero size chunk with empty trailer section.
pub(crate) const LAST_CHUNK: &[u8] = b"0\r\n\r\n";

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Frame a single chunk as `<hex-size>\r\n<data>\r\n`.
///
/// Caller should skip empty chunk, it would be read as the last chunk.
pub(crate) fn encode_chunk(data: &[u8]) -> Bytes {
    debug_assert!(!data.is_empty());

    let mut size = [0u8; 16];
    let mut at = size.len();
    let mut len = data.len();
    loop {
        at -= 1;
        size[at] = HEX[len & 0xf];
        len >>= 4;
        if len == 0 {
            break;
        }
    }

    let mut chunk = BytesMut::with_capacity(size.len() - at + data.len() + 4);
    chunk.put_slice(&size[at..]);
    chunk.put_slice(b"\r\n");
    chunk.put_slice(data);
    chunk.put_slice(b"\r\n");
    chunk.freeze()
}

// 15 hex digits, the size must fit in u64 with room to add to the total
const MAX_SIZE_DIGITS: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Size,
    Extension,
    SizeLf,
    Data,
    DataCr,
    DataLf,
    TrailerStart,
    Trailer,
    EndLf,
    Done,
}

/// Incremental chunked content decoder.
///
/// Input can be split at any byte boundary, each call consumes as much as possible and keeps
/// the position within the framing. Chunk extensions and trailer fields are discarded.
#[derive(Debug)]
pub(crate) struct ChunkedDecoder {
    phase: Phase,
    size: u64,
    digits: u8,
}

impl ChunkedDecoder {
    pub(crate) fn new() -> Self {
        Self { phase: Phase::Size, size: 0, digits: 0 }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Decode from `input` into `content`, returns the number of bytes consumed.
    ///
    /// Stops consuming after the last chunk, anything left belongs to the next request.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidChunked`] for malformed framing, and
    /// [`ParseError::ContentTooLarge`] when `content` would grow past `limit`.
    pub(crate) fn decode(
        &mut self,
        input: &[u8],
        content: &mut BytesMut,
        limit: u64,
    ) -> Result<usize, ParseError> {
        let mut read = 0;

        while read < input.len() {
            if self.phase == Phase::Data {
                let take = ((input.len() - read) as u64).min(self.size) as usize;
                content.extend_from_slice(&input[read..read + take]);
                read += take;
                self.size -= take as u64;
                if self.size == 0 {
                    self.phase = Phase::DataCr;
                }
                continue;
            }

            let byte = input[read];
            read += 1;

            self.phase = match (self.phase, byte) {
                (Phase::Size, b'0'..=b'9' | b'a'..=b'f' | b'A'..=b'F') => {
                    if self.digits == MAX_SIZE_DIGITS {
                        return Err(ParseError::InvalidChunked);
                    }
                    self.digits += 1;
                    self.size = self.size << 4 | hex_value(byte);
                    Phase::Size
                }
                (Phase::Size, _) if self.digits == 0 => return Err(ParseError::InvalidChunked),
                (Phase::Size, b';' | b' ' | b'\t') => Phase::Extension,
                (Phase::Size, b'\r') => Phase::SizeLf,
                (Phase::Size | Phase::Extension | Phase::SizeLf, b'\n') => {
                    self.end_size(content.len() as u64, limit)?
                }
                (Phase::Extension, _) => Phase::Extension,

                (Phase::DataCr, b'\r') => Phase::DataLf,
                (Phase::DataCr | Phase::DataLf, b'\n') => Phase::Size,

                (Phase::TrailerStart, b'\r') => Phase::EndLf,
                (Phase::TrailerStart | Phase::EndLf, b'\n') => {
                    self.phase = Phase::Done;
                    return Ok(read);
                }
                (Phase::Trailer, b'\n') => Phase::TrailerStart,
                (Phase::TrailerStart | Phase::Trailer, _) => Phase::Trailer,

                (Phase::Done, _) => {
                    return Ok(read - 1);
                }
                _ => return Err(ParseError::InvalidChunked),
            };
        }

        Ok(read)
    }

    fn end_size(&mut self, total: u64, limit: u64) -> Result<Phase, ParseError> {
        let size = self.size;
        self.digits = 0;
        if size == 0 {
            return Ok(Phase::TrailerStart);
        }
        if total.saturating_add(size) > limit {
            return Err(ParseError::ContentTooLarge);
        }
        Ok(Phase::Data)
    }
}

const fn hex_value(byte: u8) -> u64 {
    (match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        _ => byte - b'A' + 10,
    }) as u64
}
