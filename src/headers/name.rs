use bytes::Bytes;
use std::cmp::Ordering;

/// HTTP Header name.
///
/// Names from the [`standard`] table are matched case-insensitively and written back in their
/// canonical casing. Any other valid token is retained as is, so unknown headers never fail a
/// request.
//
// Standard names are a single byte index into `STANDARD`, lookup is a binary search over the
// table sorted by lowercase name.
#[derive(Clone)]
pub struct HeaderName {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Standard(u8),
    /// is valid token
    Other(Bytes),
}

struct Standard {
    canonical: &'static str,
    lowercase: &'static [u8],
}

impl HeaderName {
    /// Parse header name from static string.
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid header name token.
    pub fn from_static(name: &'static str) -> Self {
        match Self::from_bytes(Bytes::from_static(name.as_bytes())) {
            Ok(ok) => ok,
            Err(err) => panic!("{err}: {name:?}"),
        }
    }

    /// Parse header name from bytes.
    ///
    /// # Errors
    ///
    /// Returns error if the input is empty or contains a non token character.
    pub fn from_bytes<B: Into<Bytes>>(name: B) -> Result<Self, InvalidHeaderName> {
        let name = name.into();
        if !is_valid_token(&name) {
            return Err(InvalidHeaderName);
        }
        Ok(match find_standard(&name) {
            Some(idx) => Self::standard(idx),
            None => Self { repr: Repr::Other(name) },
        })
    }

    /// Parse header name from buffer bytes, copying only when the name is not standard.
    pub(crate) fn from_buffer(name: &[u8]) -> Option<Self> {
        if !is_valid_token(name) {
            return None;
        }
        Some(match find_standard(name) {
            Some(idx) => Self::standard(idx),
            None => Self { repr: Repr::Other(Bytes::copy_from_slice(name)) },
        })
    }

    const fn standard(idx: usize) -> Self {
        Self { repr: Repr::Standard(idx as u8) }
    }

    /// Extracts a string slice of the header name.
    ///
    /// Standard headers returns the canonical casing, e.g: `Content-Type`.
    #[inline]
    pub fn as_str(&self) -> &str {
        match &self.repr {
            Repr::Standard(idx) => STANDARD[*idx as usize].canonical,
            // SAFETY: validated as token which is a subset of ASCII
            Repr::Other(bytes) => unsafe { std::str::from_utf8_unchecked(bytes) },
        }
    }

    /// Returns `true` if the name is part of the [`standard`] table.
    #[inline]
    pub fn is_standard(&self) -> bool {
        matches!(self.repr, Repr::Standard(_))
    }

    pub(crate) fn standard_index(&self) -> Option<usize> {
        match self.repr {
            Repr::Standard(idx) => Some(idx as usize),
            Repr::Other(_) => None,
        }
    }

    /// Checks that two header name are an ASCII case-insensitive match.
    #[inline]
    pub fn eq_ignore_ascii_case(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

// ===== Lookup =====

/// tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "." / "^" / "_" / "`" / "|" /
///         "~" / DIGIT / ALPHA
pub(crate) const fn is_token(byte: u8) -> bool {
    matches!(
        byte,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`'
            | b'|' | b'~' | b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z'
    )
}

fn is_valid_token(name: &[u8]) -> bool {
    !name.is_empty() && name.iter().all(|&b| is_token(b))
}

pub(crate) fn find_standard(name: &[u8]) -> Option<usize> {
    STANDARD
        .binary_search_by(|probe| cmp_lowercase(probe.lowercase, name))
        .ok()
}

fn cmp_lowercase(lowercase: &[u8], name: &[u8]) -> Ordering {
    for (a, b) in lowercase.iter().zip(name) {
        match a.cmp(&b.to_ascii_lowercase()) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }
    lowercase.len().cmp(&name.len())
}

// ===== Traits =====

impl std::fmt::Display for HeaderName {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_str(), f)
    }
}

impl std::fmt::Debug for HeaderName {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HeaderName").field(&self.as_str()).finish()
    }
}

impl PartialEq for HeaderName {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Standard(a), Repr::Standard(b)) => a == b,
            (Repr::Other(a), Repr::Other(b)) => a.eq_ignore_ascii_case(b),
            // `Other` never holds a standard name
            _ => false,
        }
    }
}

impl Eq for HeaderName { }

// ===== AsHeaderName =====

/// A type that can be used to look up a header.
pub trait AsHeaderName: sealed::Sealed {
    #[doc(hidden)]
    fn standard_index(&self) -> Option<usize>;

    #[doc(hidden)]
    fn as_bytes(&self) -> &[u8];
}

impl AsHeaderName for HeaderName {
    fn standard_index(&self) -> Option<usize> {
        HeaderName::standard_index(self)
    }

    fn as_bytes(&self) -> &[u8] {
        self.as_str().as_bytes()
    }
}

impl AsHeaderName for &HeaderName {
    fn standard_index(&self) -> Option<usize> {
        HeaderName::standard_index(self)
    }

    fn as_bytes(&self) -> &[u8] {
        self.as_str().as_bytes()
    }
}

impl AsHeaderName for &str {
    fn standard_index(&self) -> Option<usize> {
        find_standard(str::as_bytes(self))
    }

    fn as_bytes(&self) -> &[u8] {
        str::as_bytes(self)
    }
}

mod sealed {
    pub trait Sealed { }
    impl Sealed for super::HeaderName { }
    impl Sealed for &super::HeaderName { }
    impl Sealed for &str { }
}

// ===== Error =====

/// Error returned for a header name that is not a valid token.
pub struct InvalidHeaderName;

impl std::error::Error for InvalidHeaderName { }

impl std::fmt::Debug for InvalidHeaderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid header name")
    }
}

impl std::fmt::Display for InvalidHeaderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid header name")
    }
}

// ===== Standard Headers =====

macro_rules! standard {
    (
        $(
            $idx:literal $id:ident $canonical:literal $lower:literal;
        )*
    ) => {
        pub(crate) const STANDARD_LEN: usize = [$($idx),*].len();

        static STANDARD: [Standard; STANDARD_LEN] = [
            $(
                Standard { canonical: $canonical, lowercase: $lower },
            )*
        ];

        /// Standard header names.
        pub mod standard {
            use super::HeaderName;

            $(
                #[doc = concat!("`", $canonical, "`")]
                pub const $id: HeaderName = HeaderName::standard($idx);
            )*
        }
    };
}

// sorted by lowercase name
standard! {
    0 ACCEPT "Accept" b"accept";
    1 ACCEPT_ENCODING "Accept-Encoding" b"accept-encoding";
    2 ACCEPT_LANGUAGE "Accept-Language" b"accept-language";
    3 ACCEPT_RANGES "Accept-Ranges" b"accept-ranges";
    4 ACCESS_CONTROL_ALLOW_ORIGIN "Access-Control-Allow-Origin" b"access-control-allow-origin";
    5 AGE "Age" b"age";
    6 ALLOW "Allow" b"allow";
    7 AUTHORIZATION "Authorization" b"authorization";
    8 CACHE_CONTROL "Cache-Control" b"cache-control";
    9 CONNECTION "Connection" b"connection";
    10 CONTENT_DISPOSITION "Content-Disposition" b"content-disposition";
    11 CONTENT_ENCODING "Content-Encoding" b"content-encoding";
    12 CONTENT_LANGUAGE "Content-Language" b"content-language";
    13 CONTENT_LENGTH "Content-Length" b"content-length";
    14 CONTENT_RANGE "Content-Range" b"content-range";
    15 CONTENT_TYPE "Content-Type" b"content-type";
    16 COOKIE "Cookie" b"cookie";
    17 DATE "Date" b"date";
    18 ETAG "ETag" b"etag";
    19 EXPECT "Expect" b"expect";
    20 EXPIRES "Expires" b"expires";
    21 HOST "Host" b"host";
    22 IF_MATCH "If-Match" b"if-match";
    23 IF_MODIFIED_SINCE "If-Modified-Since" b"if-modified-since";
    24 IF_NONE_MATCH "If-None-Match" b"if-none-match";
    25 IF_RANGE "If-Range" b"if-range";
    26 IF_UNMODIFIED_SINCE "If-Unmodified-Since" b"if-unmodified-since";
    27 LAST_MODIFIED "Last-Modified" b"last-modified";
    28 LOCATION "Location" b"location";
    29 ORIGIN "Origin" b"origin";
    30 RANGE "Range" b"range";
    31 REFERER "Referer" b"referer";
    32 RETRY_AFTER "Retry-After" b"retry-after";
    33 SERVER "Server" b"server";
    34 SET_COOKIE "Set-Cookie" b"set-cookie";
    35 STRICT_TRANSPORT_SECURITY "Strict-Transport-Security" b"strict-transport-security";
    36 TE "TE" b"te";
    37 TRAILER "Trailer" b"trailer";
    38 TRANSFER_ENCODING "Transfer-Encoding" b"transfer-encoding";
    39 UPGRADE "Upgrade" b"upgrade";
    40 USER_AGENT "User-Agent" b"user-agent";
    41 VARY "Vary" b"vary";
    42 VIA "Via" b"via";
    43 WWW_AUTHENTICATE "WWW-Authenticate" b"www-authenticate";
    44 X_FORWARDED_FOR "X-Forwarded-For" b"x-forwarded-for";
}

pub(crate) fn standard_names() -> impl Iterator<Item = &'static str> {
    STANDARD.iter().map(|e| e.canonical)
}

#[cfg(test)]
pub(crate) fn standard_table() -> impl Iterator<Item = (&'static str, &'static [u8])> {
    STANDARD.iter().map(|e| (e.canonical, e.lowercase))
}
