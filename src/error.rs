//! Error types for checksum verification and trailer handling
//!
//! Computing a checksum never fails; these errors only come from comparing
//! against a stored value or from buffers that cannot hold a trailer.

/// Errors that can occur while framing or verifying a checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Buffer too small to hold the payload and its trailer
    ShortBuffer,
    /// Frame shorter than a trailer
    UnexpectedEof,
    /// CRC32C checksum mismatch
    CrcMismatch,
}

impl Error {
    /// Returns a human-readable description of the error
    pub const fn description(&self) -> &'static str {
        match self {
            Error::ShortBuffer => "buffer too small for payload and CRC32C trailer",
            Error::UnexpectedEof => "frame too short to contain a CRC32C trailer",
            Error::CrcMismatch => "CRC32C checksum verification failed",
        }
    }
}

#[cfg(feature = "std")]
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias for chunkcrc operations
pub type Result<T> = core::result::Result<T, Error>;
