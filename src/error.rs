//! All of the errors this crate produces.
//!
//! Every variant carries the offending value(s) and the expected domain, so that a
//! failure while decoding a live MIDI stream can be diagnosed from the error message
//! alone.

use thiserror::Error;

/// The result type used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// An error raised while constructing a value, decoding a message or parsing a
/// SysEx frame.
///
/// Errors are raised synchronously at the point of detection and never retried
/// internally. The stream parser only raises once it has committed to a message it
/// cannot complete; incomplete data is never an error, it simply waits for the next
/// feed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A field was given a value outside its legal numeric domain.
    #[error("{field} out of range: got {value}, expected {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A frame or message has fewer bytes than its layout requires.
    #[error("frame too short: got {len} bytes, need at least {min}")]
    FrameTooShort { len: usize, min: usize },

    /// Extra bytes follow an otherwise complete message.
    #[error("{extra} trailing bytes after a complete message")]
    TrailingBytes { extra: usize },

    /// A frame delimiter byte is not where it should be.
    #[error("bad frame delimiter: expected {expected:#04x}, got {found:#04x}")]
    BadDelimiter { expected: u8, found: u8 },

    /// The manufacturer ID byte is not Roland's.
    #[error("not a Roland frame: manufacturer id {found:#04x}, expected 0x41")]
    BadManufacturer { found: u8 },

    /// The device ID byte is outside the Roland device-addressing domain.
    #[error("device id must be 0x10..=0x1f or 0x7f (broadcast), got {found:#04x}")]
    BadDeviceId { found: u8 },

    /// A structurally valid frame whose embedded checksum does not match the
    /// checksum computed over its own address and data bytes.
    #[error("checksum mismatch: computed {computed:#04x}, frame carries {embedded:#04x}")]
    ChecksumMismatch { computed: u8, embedded: u8 },

    /// A recognized status class with no decoder wired in (System Realtime bodies,
    /// poly and channel aftertouch). Distinct from malformed input.
    #[error("no decoder for message with status {status:#04x}")]
    Unsupported { status: u8 },

    /// A SysEx start byte arrived but the terminator did not show up within the
    /// configured pending-frame limit. The parser drops the pending bytes.
    #[error("pending sysex frame exceeds {limit} bytes without a terminator")]
    PendingOverflow { limit: usize },
}

impl Error {
    /// Whether this error describes a structurally malformed frame.
    #[inline]
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            Error::FrameTooShort { .. }
                | Error::TrailingBytes { .. }
                | Error::BadDelimiter { .. }
                | Error::BadManufacturer { .. }
                | Error::BadDeviceId { .. }
        )
    }

    /// Whether this error is a checksum verification failure.
    #[inline]
    pub fn is_checksum(&self) -> bool {
        matches!(self, Error::ChecksumMismatch { .. })
    }
}
