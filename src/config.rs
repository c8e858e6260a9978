//! Exchange configuration.

/// Exchange configuration.
///
/// ```
/// # use stepline::Config;
/// let config = Config::new().buffer_size(4096).max_body_size(1 << 20);
/// assert_eq!(config.get_buffer_size(), 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    buffer_size: usize,
    max_body_size: u64,
}

impl Config {
    /// Default buffer capacity.
    pub const DEFAULT_BUFFER_SIZE: usize = 1024;

    /// Minimum buffer capacity, the longest status line must fit.
    pub const MIN_BUFFER_SIZE: usize = 64;

    /// Default maximum request content size.
    pub const DEFAULT_MAX_BODY_SIZE: u64 = 64 * 1024;

    /// Create default configuration.
    pub const fn new() -> Self {
        Self {
            buffer_size: Self::DEFAULT_BUFFER_SIZE,
            max_body_size: Self::DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Set the fixed buffer capacity.
    ///
    /// The capacity is the upper bound of a request line and of a single header line.
    ///
    /// # Panics
    ///
    /// Panics if `size` is less than [`Config::MIN_BUFFER_SIZE`].
    pub const fn buffer_size(mut self, size: usize) -> Self {
        assert!(size >= Self::MIN_BUFFER_SIZE, "buffer size must be at least 64 bytes");
        self.buffer_size = size;
        self
    }

    /// Set the maximum request content size, larger content is rejected with
    /// `413 Content Too Large`.
    pub const fn max_body_size(mut self, size: u64) -> Self {
        self.max_body_size = size;
        self
    }

    /// Returns the buffer capacity.
    #[inline]
    pub const fn get_buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Returns the maximum request content size.
    #[inline]
    pub const fn get_max_body_size(&self) -> u64 {
        self.max_body_size
    }
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
