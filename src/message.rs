//! Decoded MIDI messages and their canonical byte encoding.

use crate::{prelude::*, status, sysex::RolandSysEx};

/// A channel-voice MIDI message, without its channel.
///
/// This is a closed union: poly aftertouch (`0xA0`) and channel aftertouch (`0xD0`)
/// are delimited on the wire but have no decoded representation, and surface as
/// [`Error::Unsupported`](enum.Error.html).
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum MidiMessage {
    /// Stop playing a note.
    NoteOff {
        /// The MIDI key to stop playing.
        key: u7,
        /// The velocity with which to release it.
        vel: u7,
    },
    /// Start playing a note.
    NoteOn {
        /// The key to start playing.
        key: u7,
        /// The velocity (strength) with which to press it.
        ///
        /// Note that by convention a `NoteOn` with a velocity of 0 is equivalent to
        /// a `NoteOff`.
        vel: u7,
    },
    /// Modify the value of a MIDI controller.
    Controller {
        /// The controller to modify (see the [`controller`](../controller/index.html)
        /// constants).
        controller: u7,
        /// The value to set it to.
        value: u7,
    },
    /// Change the program (also known as instrument) for a channel.
    ProgramChange {
        /// The new program to use for the channel.
        program: u7,
    },
    /// Set the pitch bend value for the entire channel.
    PitchBend {
        /// The new pitch-bend value.
        bend: PitchBend,
    },
}

impl MidiMessage {
    /// Receives the full status byte and both data bytes (the second one is zero for
    /// 2-byte messages). The caller guarantees `status` is channel-voice.
    pub(crate) fn read(status: u8, data: [u7; 2]) -> Result<MidiMessage> {
        let msg = match status >> 4 {
            0x8 => MidiMessage::NoteOff {
                key: data[0],
                vel: data[1],
            },
            0x9 => MidiMessage::NoteOn {
                key: data[0],
                vel: data[1],
            },
            0xB => MidiMessage::Controller {
                controller: data[0],
                value: data[1],
            },
            0xC => MidiMessage::ProgramChange { program: data[0] },
            0xE => {
                // The wire carries LSB first, then MSB.
                MidiMessage::PitchBend {
                    bend: PitchBend::from_14bit(u14::from_msb_lsb(data[1], data[0])),
                }
            }
            _ => bail!(Error::Unsupported { status }),
        };
        Ok(msg)
    }

    /// The raw status nibble for this message type.
    pub(crate) fn status_nibble(&self) -> u8 {
        match self {
            MidiMessage::NoteOff { .. } => 0x8,
            MidiMessage::NoteOn { .. } => 0x9,
            MidiMessage::Controller { .. } => 0xB,
            MidiMessage::ProgramChange { .. } => 0xC,
            MidiMessage::PitchBend { .. } => 0xE,
        }
    }

    /// Write the data part of this message, not including the status.
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        match self {
            MidiMessage::NoteOff { key, vel } | MidiMessage::NoteOn { key, vel } => {
                out.extend_from_slice(&[key.as_int(), vel.as_int()])
            }
            MidiMessage::Controller { controller, value } => {
                out.extend_from_slice(&[controller.as_int(), value.as_int()])
            }
            MidiMessage::ProgramChange { program } => out.push(program.as_int()),
            MidiMessage::PitchBend { bend } => {
                let (msb, lsb) = bend.as_14bit().msb_lsb();
                out.extend_from_slice(&[lsb.as_int(), msb.as_int()]);
            }
        }
    }
}

/// The value of a pitch bend, a 14-bit quantity centered on `0x2000`.
///
/// The public signed domain is `-8192..=8191`, where `0` means no bend.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct PitchBend(u14);

impl PitchBend {
    /// The middle value, indicating no bend.
    #[inline]
    pub const fn mid() -> PitchBend {
        PitchBend(u14::new(0x2000))
    }

    /// Create a `PitchBend` from a signed value in `-8192..=8191`.
    pub fn try_from_int(int: i16) -> Result<PitchBend> {
        ensure!(
            (-8192..=8191).contains(&int),
            Error::OutOfRange {
                field: "pitch bend",
                value: int as i64,
                min: -8192,
                max: 8191,
            }
        );
        Ok(PitchBend(u14::new((int + 8192) as u16)))
    }

    /// Create a `PitchBend` from a signed value, clamping it into `-8192..=8191`.
    ///
    /// This is the only place the crate clamps; decoding and the checked
    /// constructors always reject out-of-domain values instead.
    #[inline]
    pub fn from_int_clamped(int: i16) -> PitchBend {
        PitchBend(u14::new((int.max(-8192).min(8191) + 8192) as u16))
    }

    /// Create a `PitchBend` from its unsigned 14-bit wire representation.
    #[inline]
    pub fn from_14bit(raw: u14) -> PitchBend {
        PitchBend(raw)
    }

    /// The unsigned 14-bit wire representation (`0x2000` = no bend).
    #[inline]
    pub fn as_14bit(self) -> u14 {
        self.0
    }

    /// The signed value, in `-8192..=8191`.
    #[inline]
    pub fn as_int(self) -> i16 {
        self.0.as_int() as i16 - 8192
    }
}

/// A complete decoded MIDI message with a canonical byte representation.
///
/// Every `Message` is fully validated at construction; encoding it always produces a
/// wire-valid byte sequence, and `decode(encode(msg)) == msg` within each variant's
/// domain.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum Message {
    /// A message associated with a MIDI channel, carrying musical data.
    Channel {
        /// The 0-based MIDI channel this message is addressed to.
        channel: u4,
        /// The message type and associated data.
        message: MidiMessage,
    },
    /// A Roland System Exclusive frame.
    SysEx(RolandSysEx),
}

impl Message {
    /// Build a validated Note On from raw integers.
    pub fn note_on(channel: u8, key: u8, vel: u8) -> Result<Message> {
        Ok(Message::Channel {
            channel: check_u4("channel", channel)?,
            message: MidiMessage::NoteOn {
                key: check_u7("note", key)?,
                vel: check_u7("velocity", vel)?,
            },
        })
    }

    /// Build a validated Note Off from raw integers.
    pub fn note_off(channel: u8, key: u8, vel: u8) -> Result<Message> {
        Ok(Message::Channel {
            channel: check_u4("channel", channel)?,
            message: MidiMessage::NoteOff {
                key: check_u7("note", key)?,
                vel: check_u7("velocity", vel)?,
            },
        })
    }

    /// Build a validated Control Change from raw integers.
    pub fn control_change(channel: u8, controller: u8, value: u8) -> Result<Message> {
        Ok(Message::Channel {
            channel: check_u4("channel", channel)?,
            message: MidiMessage::Controller {
                controller: check_u7("controller", controller)?,
                value: check_u7("control value", value)?,
            },
        })
    }

    /// Build a validated Program Change from raw integers.
    pub fn program_change(channel: u8, program: u8) -> Result<Message> {
        Ok(Message::Channel {
            channel: check_u4("channel", channel)?,
            message: MidiMessage::ProgramChange {
                program: check_u7("program number", program)?,
            },
        })
    }

    /// Build a validated Pitch Bend from a raw channel and a signed bend value.
    pub fn pitch_bend(channel: u8, value: i16) -> Result<Message> {
        Ok(Message::Channel {
            channel: check_u4("channel", channel)?,
            message: MidiMessage::PitchBend {
                bend: PitchBend::try_from_int(value)?,
            },
        })
    }

    /// The canonical wire bytes for this message.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Message::Channel { channel, message } => {
                let mut out = Vec::with_capacity(3);
                out.push(message.status_nibble() << 4 | channel.as_int());
                message.write(&mut out);
                out
            }
            Message::SysEx(frame) => frame.to_bytes(),
        }
    }

    /// Decode exactly one complete, delimited message from its raw bytes.
    ///
    /// This is for packet-like input where message boundaries are already known (OS
    /// MIDI APIs, or a SysEx span captured from a stream). Undelimited byte streams
    /// go through [`StreamParser`](struct.StreamParser.html) instead.
    pub fn decode(raw: &[u8]) -> Result<Message> {
        let &status = raw.first().ok_or(Error::FrameTooShort { len: 0, min: 2 })?;
        if status::is_channel_voice(status) {
            let len = status::channel_msg_len(status);
            ensure!(
                raw.len() >= len,
                Error::FrameTooShort {
                    len: raw.len(),
                    min: len,
                }
            );
            ensure!(
                raw.len() == len,
                Error::TrailingBytes {
                    extra: raw.len() - len,
                }
            );
            let d1 = check_u7("data byte", raw[1])?;
            let d2 = if len == 3 {
                check_u7("data byte", raw[2])?
            } else {
                u7::new(0)
            };
            let message = MidiMessage::read(status, [d1, d2])?;
            Ok(Message::Channel {
                channel: u4::from_int_lossy(status),
                message,
            })
        } else if status == status::SYSEX_START {
            Ok(Message::SysEx(RolandSysEx::parse(raw)?))
        } else {
            Err(Error::Unsupported { status })
        }
    }
}

impl fmt::Display for Message {
    /// Renders the canonical bytes as spaced uppercase hex, e.g. `B0 07 64`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, byte) in self.encode().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}
