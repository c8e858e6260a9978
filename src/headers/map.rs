use super::name::{AsHeaderName, HeaderName, STANDARD_LEN, standard_names};
use super::standard::{CONNECTION, CONTENT_LENGTH, TRANSFER_ENCODING};
use super::value::HeaderValue;

/// Request header table.
///
/// Standard headers are stored in a fixed slot per name, other headers are kept in arrival
/// order. A repeated header is merged into the existing value, joined with `", "`.
pub struct RequestHeaders {
    standard: [Option<HeaderValue>; STANDARD_LEN],
    others: Vec<(HeaderName, HeaderValue)>,
    len: usize,
}

/// Outcome of [`RequestHeaders::append`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Append {
    Inserted,
    Merged,
    /// repeated `Content-Length` with a different value
    Conflict,
}

impl RequestHeaders {
    /// Create new empty [`RequestHeaders`].
    pub const fn new() -> Self {
        Self {
            standard: [const { None }; STANDARD_LEN],
            others: Vec::new(),
            len: 0,
        }
    }

    /// Returns the number of distinct header names.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there is no header.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the table contains a value for the given name.
    #[inline]
    pub fn contains_key<K: AsHeaderName>(&self, name: K) -> bool {
        self.get(name).is_some()
    }

    /// Returns a reference to the value of the given header name.
    pub fn get<K: AsHeaderName>(&self, name: K) -> Option<&HeaderValue> {
        match name.standard_index() {
            Some(idx) => self.standard[idx].as_ref(),
            None => {
                let name = name.as_bytes();
                self.others
                    .iter()
                    .find(|(n, _)| n.as_str().as_bytes().eq_ignore_ascii_case(name))
                    .map(|(_, v)| v)
            }
        }
    }

    /// Returns the value of the given header name as `str`.
    ///
    /// Returns `None` if the header is missing or not valid UTF-8.
    pub fn get_str<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.get(name).and_then(HeaderValue::to_str)
    }

    pub(crate) fn append(&mut self, name: HeaderName, value: HeaderValue) -> Append {
        let slot = match name.standard_index() {
            Some(idx) => &mut self.standard[idx],
            None => {
                match self.others.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, existing)) => {
                        existing.join(&value);
                        return Append::Merged;
                    }
                    None => {
                        self.others.push((name, value));
                        self.len += 1;
                        return Append::Inserted;
                    }
                }
            }
        };

        if let Some(existing) = slot.as_mut() {
            if name != CONTENT_LENGTH {
                existing.join(&value);
                Append::Merged
            } else if *existing == value {
                Append::Merged
            } else {
                Append::Conflict
            }
        } else {
            *slot = Some(value);
            self.len += 1;
            Append::Inserted
        }
    }

    /// Returns an iterator over headers, standard headers first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        let standard = standard_names()
            .zip(self.standard.iter())
            .filter_map(|(name, value)| Some((name, value.as_ref()?)));
        let others = self.others.iter().map(|(n, v)| (n.as_str(), v));
        standard.chain(others)
    }

    /// Returns the names of headers outside the standard table, in arrival order.
    pub fn unknown_names(&self) -> impl Iterator<Item = &HeaderName> {
        self.others.iter().map(|(n, _)| n)
    }

    /// Clear all headers, retaining allocated memory.
    pub fn clear(&mut self) {
        self.standard.iter_mut().for_each(|e| *e = None);
        self.others.clear();
        self.len = 0;
    }

    // ===== Framing =====

    /// Returns the persistence requested by the `Connection` header, if any.
    pub(crate) fn connection(&self) -> Option<bool> {
        let value = self.get(&CONNECTION)?;
        if value.contains_token("close") {
            Some(false)
        } else if value.contains_token("keep-alive") {
            Some(true)
        } else {
            None
        }
    }

    pub(crate) fn transfer_encoding(&self) -> Option<&HeaderValue> {
        self.get(&TRANSFER_ENCODING)
    }

    pub(crate) fn content_length(&self) -> Option<&HeaderValue> {
        self.get(&CONTENT_LENGTH)
    }
}

impl Default for RequestHeaders {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RequestHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
