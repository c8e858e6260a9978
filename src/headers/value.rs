use bytes::Bytes;

/// HTTP Header Value.
///
/// A value never contains control characters other than HTAB, so it is always safe to write
/// back on a single header line.
#[derive(Clone)]
pub struct HeaderValue {
    /// no CTL except HTAB
    bytes: Bytes,
}

impl HeaderValue {
    /// Parse header value from static string.
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid header value.
    #[inline]
    pub const fn from_static(value: &'static str) -> Self {
        if !is_valid_value(value.as_bytes()) {
            panic!("invalid header value");
        }
        Self { bytes: Bytes::from_static(value.as_bytes()) }
    }

    /// Parse header value from [`Bytes`].
    ///
    /// # Errors
    ///
    /// Returns error if the input contains CR, LF or other control characters.
    #[inline]
    pub fn from_bytes<B: Into<Bytes>>(value: B) -> Result<Self, InvalidHeaderValue> {
        let bytes = value.into();
        match is_valid_value(&bytes) {
            true => Ok(Self { bytes }),
            false => Err(InvalidHeaderValue),
        }
    }

    /// Create header value from integer.
    pub fn from_u64(value: u64) -> Self {
        let mut buf = itoa::Buffer::new();
        Self { bytes: Bytes::copy_from_slice(buf.format(value).as_bytes()) }
    }

    /// Parse request header value from buffer.
    ///
    /// Leading whitespace and trailing whitespace, including the CR of a CRLF line ending, are
    /// removed.
    pub(crate) fn from_buffer(value: &[u8]) -> Option<Self> {
        let value = value.trim_ascii();
        match is_valid_value(value) {
            true => Some(Self { bytes: Bytes::copy_from_slice(value) }),
            false => None,
        }
    }

    /// Returns header value as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns header value as `str` if it is valid UTF-8.
    #[inline]
    pub fn to_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Returns `true` if the comma separated value contains `token`, ignoring ASCII case.
    ///
    /// ```
    /// # use stepline::headers::HeaderValue;
    /// let value = HeaderValue::from_static("keep-alive, Upgrade");
    /// assert!(value.contains_token("upgrade"));
    /// assert!(!value.contains_token("close"));
    /// ```
    pub fn contains_token(&self, token: &str) -> bool {
        self.bytes
            .split(|&b| b == b',')
            .any(|e| e.trim_ascii().eq_ignore_ascii_case(token.as_bytes()))
    }

    /// Parse the value as decimal integer, as used by `Content-Length`.
    pub fn parse_u64(&self) -> Option<u64> {
        if self.bytes.is_empty() {
            return None;
        }
        let mut value: u64 = 0;
        for &b in self.bytes.iter() {
            if !b.is_ascii_digit() {
                return None;
            }
            value = value.checked_mul(10)?.checked_add((b - b'0') as u64)?;
        }
        Some(value)
    }

    pub(crate) fn join(&mut self, other: &HeaderValue) {
        let mut joined = Vec::with_capacity(self.bytes.len() + 2 + other.bytes.len());
        joined.extend_from_slice(&self.bytes);
        joined.extend_from_slice(b", ");
        joined.extend_from_slice(&other.bytes);
        self.bytes = Bytes::from(joined);
    }
}

const fn is_valid_value(mut bytes: &[u8]) -> bool {
    while let [byte, rest @ ..] = bytes {
        if (*byte < 0x20 && *byte != b'\t') || *byte == 0x7f {
            return false;
        }
        bytes = rest;
    }
    true
}

// ===== Traits =====

impl std::fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_str() {
            Some(s) => f.debug_tuple("HeaderValue").field(&s).finish(),
            None => f.debug_tuple("HeaderValue").field(&self.bytes).finish(),
        }
    }
}

impl PartialEq for HeaderValue {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for HeaderValue { }

impl PartialEq<[u8]> for HeaderValue {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl PartialEq<str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

// ===== Error =====

/// Error returned for a header value containing CR, LF or other control characters.
pub struct InvalidHeaderValue;

impl std::error::Error for InvalidHeaderValue { }

impl std::fmt::Debug for InvalidHeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid header value")
    }
}

impl std::fmt::Display for InvalidHeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid header value")
    }
}
