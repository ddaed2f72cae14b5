//! # Overview
//!
//! `midiwire` is a byte-level codec for the MIDI wire protocol: typed message values,
//! protocol constants, a streaming parser that handles messages split across arbitrary
//! chunk boundaries, and a codec for Roland-style System Exclusive frames.
//!
//! Decoding a raw byte stream is as simple as:
//!
//! ```rust
//! use midiwire::{Message, MidiMessage, StreamParser};
//!
//! let mut parser = StreamParser::new();
//! // A complete Note On may arrive in as many pieces as the transport likes.
//! assert_eq!(parser.feed(&[0x90]).count(), 0);
//! assert_eq!(parser.feed(&[0x3C]).count(), 0);
//! let events: Vec<_> = parser.feed(&[0x40]).collect();
//! match events[0] {
//!     Ok(Message::Channel { channel, message: MidiMessage::NoteOn { key, vel } }) => {
//!         assert_eq!(channel, 0);
//!         assert_eq!(key, 0x3C);
//!         assert_eq!(vel, 0x40);
//!     }
//!     ref other => panic!("unexpected event: {:?}", other),
//! }
//! ```
//!
//! # Roland System Exclusive frames
//!
//! Roland devices exchange parameter data through fixed-layout SysEx frames
//! (`F0 41 <device> <model x4> <command> <address x4> <data...> <checksum> F7`).
//! [`RolandSysEx`](struct.RolandSysEx.html) builds, serializes and verifies them:
//!
//! ```rust
//! use midiwire::RolandSysEx;
//!
//! let frame = RolandSysEx::new(
//!     0x10,
//!     [0x00, 0x00, 0x00, 0x0E],
//!     midiwire::sysex::DT1.as_int(),
//!     [0x18, 0x00, 0x00, 0x10],
//!     &[0x7F],
//! )
//! .unwrap();
//!
//! let bytes = frame.to_bytes();
//! assert_eq!(bytes.len(), 15);
//! assert_eq!(RolandSysEx::parse(&bytes).unwrap(), frame);
//! ```
//!
//! The stream parser delimits SysEx spans but does not decode them: capture the span
//! and hand it to [`RolandSysEx::parse`](struct.RolandSysEx.html#method.parse) when
//! structured access is needed.
//!
//! # What this crate is not
//!
//! `.mid` (SMF) file parsing, System Common/Realtime message bodies and transport
//! bindings (USB, virtual ports, sockets) are out of scope: bytes are expected to
//! arrive as plain in-memory slices from whatever transport the caller owns.

macro_rules! bail {
    ($err:expr) => {{
        return Err($err.into());
    }};
}
macro_rules! ensure {
    ($cond:expr, $err:expr) => {{
        if !$cond {
            bail!($err)
        }
    }};
}

mod error;
mod message;
mod parser;
mod primitive;
mod rpn;

pub mod controller;
pub mod status;
pub mod sysex;
pub mod timing;

mod prelude {
    pub(crate) use crate::error::{Error, Result};
    pub(crate) use crate::primitive::{check_u4, check_u7, u14, u4, u7};
    pub(crate) use core::fmt;
}

pub use crate::{
    error::{Error, Result},
    message::{Message, MidiMessage, PitchBend},
    parser::{Messages, StreamParser, DEFAULT_MAX_PENDING},
    rpn::{Nrpn, Rpn},
    sysex::{roland_checksum, RolandSysEx},
};

/// Exotically-sized integers used by the MIDI standard.
pub mod num {
    pub use crate::primitive::{u14, u4, u7};
}

#[cfg(test)]
mod test;
