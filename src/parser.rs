//! The streaming MIDI parser.
//!
//! Raw MIDI byte streams carry no packet boundaries: a message may arrive split
//! across any number of reads, several messages may arrive in one read, and a status
//! byte may be omitted entirely under the running-status convention. The
//! [`StreamParser`](struct.StreamParser.html) buffers whatever has arrived so far
//! and yields each message exactly once, as soon as it is completable.

use tracing::{debug, trace};

use crate::{
    message::{Message, MidiMessage},
    prelude::*,
    status,
};

/// The default cap on a buffered-but-unterminated SysEx frame.
pub const DEFAULT_MAX_PENDING: usize = 256 * 1024;

/// The outcome of trying to extract one channel-voice message from the buffer front.
enum Step {
    /// Not enough bytes buffered; wait for the next feed.
    Wait,
    /// The buffer front was not what it claimed to be; one byte was dropped,
    /// scanning continues.
    Resync,
    /// A full message span was consumed.
    Done(Result<Message>),
}

/// A streaming raw MIDI parser, taking raw, undelimited MIDI bytes, presumably from
/// a cable.
///
/// One parser owns one logical stream. Calls to [`feed`](#method.feed) on the same
/// instance must be serialized by the caller; independent streams get independent
/// parsers.
///
/// Calling `feed` with many small slices is equivalent to calling `feed` with one
/// large concatenation of them all.
#[derive(Clone, Debug)]
pub struct StreamParser {
    buffer: Vec<u8>,
    running_status: Option<u8>,
    max_pending: usize,
    decode_running_status: bool,
}

impl Default for StreamParser {
    fn default() -> StreamParser {
        StreamParser::new()
    }
}

impl StreamParser {
    /// Create a fresh stream parser with the default pending-frame cap.
    #[inline]
    pub fn new() -> StreamParser {
        StreamParser::with_max_pending(DEFAULT_MAX_PENDING)
    }

    /// Create a fresh stream parser that drops an unterminated SysEx frame once it
    /// exceeds `max_pending` buffered bytes, yielding
    /// [`Error::PendingOverflow`](enum.Error.html) instead of growing without bound.
    pub fn with_max_pending(max_pending: usize) -> StreamParser {
        StreamParser {
            buffer: Vec::new(),
            running_status: None,
            max_pending,
            decode_running_status: false,
        }
    }

    /// Enable or disable decoding of status-omitted messages via the running-status
    /// convention.
    ///
    /// Disabled by default: the parser always *tracks* the last channel-voice
    /// status, but only applies it to synthesize status-less messages when this is
    /// enabled. When disabled, leading data bytes are dropped as unsynchronized.
    pub fn decode_running_status(&mut self, enabled: bool) {
        self.decode_running_status = enabled;
    }

    /// The last channel-voice status byte seen, if any.
    #[inline]
    pub fn running_status(&self) -> Option<u8> {
        self.running_status
    }

    /// Clear the buffer and the running status. Idempotent; already-yielded
    /// messages are unaffected.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.running_status = None;
    }

    /// Append `bytes` to the internal buffer and return a lazy iterator over every
    /// message completable with the data buffered so far.
    ///
    /// Incomplete trailing data stays buffered for the next `feed`; a call that adds
    /// zero bytes still drains any already-complete messages. If a message fails to
    /// decode, the iterator yields the error and stops for this call — messages
    /// yielded before the failure remain valid, the failing span is consumed, and
    /// the next `feed` resumes right after it.
    pub fn feed(&mut self, bytes: &[u8]) -> Messages<'_> {
        self.buffer.extend_from_slice(bytes);
        Messages {
            parser: self,
            done: false,
        }
    }

    /// Try to extract one message from the buffer front, consuming its span.
    /// Returns `None` when the buffered data holds no complete message.
    fn next_message(&mut self) -> Option<Result<Message>> {
        loop {
            let &first = self.buffer.first()?;

            if status::is_system_realtime(first) {
                // Delimited but not decoded: a single byte per message.
                self.consume(1);
                return Some(Err(Error::Unsupported { status: first }));
            }

            if status::is_channel_voice(first) {
                match self.take_channel_voice(first, true) {
                    Step::Wait => return None,
                    Step::Resync => continue,
                    Step::Done(res) => return Some(res),
                }
            }

            if first == status::SYSEX_START {
                match self.buffer.iter().position(|&b| b == status::SYSEX_END) {
                    Some(end) => {
                        // The parser only delimits exclusive frames; callers wanting
                        // the payload capture the span and use RolandSysEx::parse.
                        trace!(len = end + 1, "skipping sysex span");
                        self.consume(end + 1);
                        continue;
                    }
                    None => {
                        if self.buffer.len() > self.max_pending {
                            debug!(
                                limit = self.max_pending,
                                buffered = self.buffer.len(),
                                "unterminated sysex frame exceeds limit, dropping"
                            );
                            self.buffer.clear();
                            return Some(Err(Error::PendingOverflow {
                                limit: self.max_pending,
                            }));
                        }
                        return None;
                    }
                }
            }

            if first < 0x80 {
                if self.decode_running_status {
                    if let Some(rs) = self.running_status {
                        match self.take_channel_voice(rs, false) {
                            Step::Wait => return None,
                            Step::Resync => continue,
                            Step::Done(res) => return Some(res),
                        }
                    }
                }
                trace!(byte = first, "dropping unsynchronized data byte");
                self.consume(1);
                continue;
            }

            // System Common other than sysex start (0xF1..=0xF7): no decoder and no
            // reliable length, resynchronize one byte at a time.
            trace!(byte = first, "dropping unsynchronized byte");
            self.consume(1);
        }
    }

    /// Extract one channel-voice message for `status` from the buffer front.
    /// `prefixed` says whether the status byte itself sits in the buffer (false
    /// when re-synthesizing a status-omitted message via running status).
    fn take_channel_voice(&mut self, status: u8, prefixed: bool) -> Step {
        let head = usize::from(prefixed);
        let data_len = status::channel_msg_len(status) - 1;
        let span = head + data_len;
        if self.buffer.len() < span {
            return Step::Wait;
        }

        // A high-bit byte where a data byte belongs means the message was cut short
        // by a new status: abandon the front byte and rescan from the interruption.
        if self.buffer[head..span].iter().any(|&b| b >= 0x80) {
            trace!(status, "message interrupted by a new status, resyncing");
            self.consume(1);
            return Step::Resync;
        }

        let d1 = u7::new(self.buffer[head]);
        let d2 = if data_len == 2 {
            u7::new(self.buffer[head + 1])
        } else {
            u7::new(0)
        };
        self.consume(span);
        self.running_status = Some(status);

        Step::Done(MidiMessage::read(status, [d1, d2]).map(|message| Message::Channel {
            channel: u4::from_int_lossy(status),
            message,
        }))
    }

    #[inline]
    fn consume(&mut self, len: usize) {
        self.buffer.drain(..len);
    }
}

/// Lazy iterator over the messages completable in one [`StreamParser::feed`] call.
///
/// Yields `Result<Message>`; after yielding an error the iterator is done for this
/// call, but the parser itself stays usable.
pub struct Messages<'a> {
    parser: &'a mut StreamParser,
    done: bool,
}

impl<'a> Iterator for Messages<'a> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Result<Message>> {
        if self.done {
            return None;
        }
        match self.parser.next_message() {
            None => {
                self.done = true;
                None
            }
            Some(Ok(msg)) => Some(Ok(msg)),
            Some(Err(err)) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
