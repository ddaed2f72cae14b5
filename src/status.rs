//! Status-byte constants and classification predicates.
//!
//! A status byte (top bit set) opens every non-running-status MIDI message. The high
//! nibble identifies the message type; for channel-voice messages the low nibble is
//! the 0-based channel.

use crate::prelude::*;

// Channel voice messages (0x80-0xEF, low nibble = channel).
pub const NOTE_OFF: u8 = 0x80;
pub const NOTE_ON: u8 = 0x90;
pub const POLY_AFTERTOUCH: u8 = 0xA0;
pub const CONTROL_CHANGE: u8 = 0xB0;
pub const PROGRAM_CHANGE: u8 = 0xC0;
pub const CHANNEL_AFTERTOUCH: u8 = 0xD0;
pub const PITCH_BEND: u8 = 0xE0;

// System common messages (0xF0-0xF7).
pub const SYSEX_START: u8 = 0xF0;
pub const MTC_QUARTER_FRAME: u8 = 0xF1;
pub const SONG_POSITION: u8 = 0xF2;
pub const SONG_SELECT: u8 = 0xF3;
pub const TUNE_REQUEST: u8 = 0xF6;
pub const SYSEX_END: u8 = 0xF7;

// System realtime messages (0xF8-0xFF).
pub const TIMING_CLOCK: u8 = 0xF8;
pub const START: u8 = 0xFA;
pub const CONTINUE: u8 = 0xFB;
pub const STOP: u8 = 0xFC;
pub const ACTIVE_SENSING: u8 = 0xFE;
pub const SYSTEM_RESET: u8 = 0xFF;

/// Whether `status` opens a channel-voice message (`0x80..=0xEF`).
#[inline]
pub fn is_channel_voice(status: u8) -> bool {
    (0x80..=0xEF).contains(&status)
}

/// Whether `status` is a System Common status (`0xF0..=0xF7`, excluding the
/// undefined `0xF4`/`0xF5`).
#[inline]
pub fn is_system_common(status: u8) -> bool {
    matches!(status, 0xF0 | 0xF1 | 0xF2 | 0xF3 | 0xF6 | 0xF7)
}

/// Whether `status` is a single-byte System Realtime status (`0xF8..=0xFF`).
#[inline]
pub fn is_system_realtime(status: u8) -> bool {
    status >= 0xF8
}

/// The message-type part of a status byte (high nibble, channel bits zeroed).
#[inline]
pub fn message_type(status: u8) -> u8 {
    status & 0xF0
}

/// The channel encoded in a channel-voice status byte, `None` for system statuses.
#[inline]
pub fn channel(status: u8) -> Option<u4> {
    if is_channel_voice(status) {
        Some(u4::from_int_lossy(status))
    } else {
        None
    }
}

/// Combine a message-type base (e.g. [`NOTE_ON`]) with a channel number.
#[inline]
pub fn make_status(kind: u8, channel: u4) -> u8 {
    kind | channel.as_int()
}

/// Full length in bytes (status included) of the channel-voice message opened by
/// `status`: 3 for note on/off, poly aftertouch, control change and pitch bend;
/// 2 for program change and channel aftertouch; 0 for non-channel statuses.
#[inline]
pub fn channel_msg_len(status: u8) -> usize {
    const LENGTH_BY_STATUS: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 3, 3, 3, 3, 2, 2, 3, 0];
    LENGTH_BY_STATUS[(status >> 4) as usize] as usize
}

/// Convert a 1-based display channel (`1..=16`) to the 0-based wire channel.
pub fn channel_from_display(display: u8) -> Result<u4> {
    ensure!(
        (1..=16).contains(&display),
        Error::OutOfRange {
            field: "display channel",
            value: display as i64,
            min: 1,
            max: 16,
        }
    );
    Ok(u4::new(display - 1))
}

/// Convert a 0-based wire channel to its 1-based display number (`1..=16`).
#[inline]
pub fn channel_to_display(channel: u4) -> u8 {
    channel.as_int() + 1
}
