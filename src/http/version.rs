/// HTTP Version.
///
/// The request line tokenizer accepts `HTTP/<digit>.<digit>`, so the version is kept as the
/// pair of digits instead of a closed set.
///
/// [httpwg](https://httpwg.org/specs/rfc9112.html#http.version)
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Version {
    major: u8,
    minor: u8,
}

impl Version {
    /// `HTTP/1.0`
    pub const HTTP_10: Version = Version::new(1, 0);

    /// `HTTP/1.1`
    pub const HTTP_11: Version = Version::new(1, 1);

    /// Create a version from its major and minor digits.
    ///
    /// # Panics
    ///
    /// Panics if either number is greater than 9.
    pub const fn new(major: u8, minor: u8) -> Self {
        assert!(major < 10 && minor < 10, "version number must be a single digit");
        Self { major, minor }
    }

    /// Returns the major version.
    #[inline]
    pub const fn major(&self) -> u8 {
        self.major
    }

    /// Returns the minor version.
    #[inline]
    pub const fn minor(&self) -> u8 {
        self.minor
    }

    /// Returns `true` if connections default to persistent for this version.
    #[inline]
    pub const fn is_keep_alive_default(&self) -> bool {
        self.major == 1 && self.minor >= 1
    }

    /// Returns `true` if the peer understands chunked transfer coding.
    #[inline]
    pub const fn is_chunked_supported(&self) -> bool {
        self.major == 1 && self.minor >= 1
    }
}

impl Default for Version {
    #[inline]
    fn default() -> Version {
        Version::HTTP_11
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

impl std::fmt::Debug for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}
