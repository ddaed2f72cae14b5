//! Restricted integer types for the exotically-sized values the MIDI wire format is
//! built from, plus the 7-bit/14-bit conversion primitives.

use crate::error::{Error, Result};
use core::fmt;

/// Slightly restricted integers.
macro_rules! restricted_int {
    {$(#[$attr:meta])* $name:ident : $inner:tt => $bits:expr} => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
        #[repr(transparent)]
        #[allow(non_camel_case_types)]
        pub struct $name($inner);
        impl From<$inner> for $name {
            /// Lossy conversion, loses the top bits.
            #[inline]
            fn from(raw: $inner) -> $name {
                $name::from_int_lossy(raw)
            }
        }
        impl From<$name> for $inner {
            #[inline]
            fn from(restricted: $name) -> $inner {
                restricted.0
            }
        }
        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
        impl $name {
            const MASK: $inner = (1 << $bits) - 1;

            /// The maximum value that this restricted integer can hold.
            #[inline]
            pub const fn max_value() -> $name {
                $name(Self::MASK)
            }

            /// Creates a restricted int from its non-restricted counterpart by masking
            /// off the extra bits.
            #[inline]
            pub const fn new(raw: $inner) -> $name {
                $name(raw & Self::MASK)
            }

            /// Creates a restricted int from its non-restricted counterpart by masking
            /// off the extra bits.
            #[inline]
            pub const fn from_int_lossy(raw: $inner) -> $name {
                $name(raw & Self::MASK)
            }

            /// Returns `Some` if the raw integer is within range of the restricted
            /// integer, and `None` otherwise.
            #[inline]
            pub fn try_from(raw: $inner) -> Option<$name> {
                if raw <= Self::MASK {
                    Some($name(raw))
                } else {
                    None
                }
            }

            /// Get the inner integer out of the wrapper.
            /// The inner integer is guaranteed to be in range of the restricted wrapper.
            #[inline]
            pub fn as_int(self) -> $inner {
                self.0
            }
        }
        impl PartialEq<$inner> for $name {
            fn eq(&self, rhs: &$inner) -> bool {
                self.as_int() == *rhs
            }
        }
        impl PartialEq<$name> for $inner {
            fn eq(&self, rhs: &$name) -> bool {
                *self == rhs.as_int()
            }
        }
        impl PartialOrd<$inner> for $name {
            fn partial_cmp(&self, rhs: &$inner) -> Option<core::cmp::Ordering> {
                Some(self.as_int().cmp(rhs))
            }
        }
        impl PartialOrd<$name> for $inner {
            fn partial_cmp(&self, rhs: &$name) -> Option<core::cmp::Ordering> {
                Some(self.cmp(&rhs.as_int()))
            }
        }
    };
}

restricted_int! {
    /// A 4-bit integer type, used for MIDI channel numbers.
    ///
    /// Wraps the `u8` type and ensures that the top 4 bits are always zero.
    u4: u8 => 4
}
restricted_int! {
    /// A 7-bit integer type: notes, velocities, controller numbers and values,
    /// program numbers, and every byte of a SysEx payload.
    ///
    /// Wraps the `u8` type and ensures that the top bit is always zero, so the value
    /// can never collide with a status byte on the wire.
    u7: u8 => 7
}
restricted_int! {
    /// A 14-bit integer type, assembled from a 7-bit MSB/LSB pair.
    ///
    /// Wraps the `u16` type and ensures that the top two bits are always zero.
    u14: u16 => 14
}

impl u7 {
    /// Cast a slice of raw bytes to a slice of 7-bit integers, only if there are no
    /// out-of-range bytes.
    #[inline]
    pub fn slice_try_from_int(raw: &[u8]) -> Option<&[u7]> {
        for &int in raw {
            if int > Self::MASK {
                return None;
            }
        }
        unsafe { Some(Self::slice_from_int_unchecked(raw)) }
    }

    /// Cast a slice of raw bytes to a slice of 7-bit integers.
    ///
    /// The slice is truncated up to the first out-of-range byte, if there is any.
    #[inline]
    pub fn slice_from_int(raw: &[u8]) -> &[u7] {
        let first_oob = raw.iter().position(|&b| b > Self::MASK).unwrap_or(raw.len());
        unsafe { Self::slice_from_int_unchecked(&raw[..first_oob]) }
    }

    /// Cast a slice of raw bytes to a slice of 7-bit integers.
    ///
    /// # Safety
    ///
    /// The input slice must not contain any out-of-range bytes.
    #[inline]
    pub unsafe fn slice_from_int_unchecked(raw: &[u8]) -> &[u7] {
        &*(raw as *const [u8] as *const [u7])
    }

    /// Cast a slice of 7-bit integers to the corresponding raw bytes.
    ///
    /// All bytes are guaranteed to be within range of the restricted int.
    #[inline]
    pub fn slice_as_int(slice: &[u7]) -> &[u8] {
        unsafe { &*(slice as *const [u7] as *const [u8]) }
    }
}

impl u14 {
    /// Join a 7-bit MSB/LSB pair into a 14-bit value: `(msb << 7) | lsb`.
    #[inline]
    pub fn from_msb_lsb(msb: u7, lsb: u7) -> u14 {
        u14::new((msb.as_int() as u16) << 7 | lsb.as_int() as u16)
    }

    /// Split into a 7-bit `(msb, lsb)` pair: bits 13-7 and bits 6-0.
    #[inline]
    pub fn msb_lsb(self) -> (u7, u7) {
        (
            u7::new((self.as_int() >> 7) as u8),
            u7::new(self.as_int() as u8),
        )
    }
}

pub(crate) fn check_u4(field: &'static str, value: u8) -> Result<u4> {
    u4::try_from(value).ok_or(Error::OutOfRange {
        field,
        value: value as i64,
        min: 0,
        max: u4::max_value().as_int() as i64,
    })
}

pub(crate) fn check_u7(field: &'static str, value: u8) -> Result<u7> {
    u7::try_from(value).ok_or(Error::OutOfRange {
        field,
        value: value as i64,
        min: 0,
        max: u7::max_value().as_int() as i64,
    })
}
