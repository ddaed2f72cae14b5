//! The Roland System Exclusive frame codec.
//!
//! Roland devices exchange parameter data through DT1 ("data set") and RQ1 ("data
//! request") exclusive messages with a fixed layout:
//!
//! ```text
//! F0 41 <device_id> <model_id x4> <command> <address x4> <data x N> <checksum> F7
//! ```
//!
//! Every byte between the delimiters is 7-bit safe. The checksum covers the address
//! and data bytes: `(128 - (sum mod 128)) mod 128`, so that the payload plus its
//! checksum sums to a multiple of 128.

use crate::prelude::*;

/// Roland's manufacturer ID, the second byte of every frame.
pub const MANUFACTURER_ID: u8 = 0x41;

/// The "data set" command byte: write `data` to `address`.
pub const DT1: u7 = u7::new(0x12);

/// The "data request" command byte: ask for data starting at `address`.
pub const RQ1: u7 = u7::new(0x11);

/// The device ID addressing every device on the bus.
pub const DEVICE_ID_BROADCAST: u8 = 0x7F;

/// The length of a frame with an empty data payload, the minimum valid frame.
pub const MIN_FRAME_LEN: usize = 14;

/// Compute the Roland checksum over a 7-bit payload.
///
/// The result is always in `0..=127`, and `(sum(payload) + checksum) % 128 == 0`.
pub fn roland_checksum<'a, I>(payload: I) -> u7
where
    I: IntoIterator<Item = &'a u7>,
{
    let sum: u32 = payload.into_iter().map(|b| b.as_int() as u32).sum();
    u7::new(((128 - (sum & 0x7F)) & 0x7F) as u8)
}

/// One Roland DT1/RQ1-style System Exclusive frame.
///
/// Constructed either programmatically through [`new`](#method.new) (checksum
/// computed on demand) or by [`parse`](#method.parse) from a captured byte span
/// (checksum verified eagerly, construction fails otherwise). All fields are stored
/// as strict 7-bit integers; raw-integer conversion happens once, at the
/// constructor boundary.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct RolandSysEx {
    device_id: u7,
    model_id: [u7; 4],
    command: u7,
    address: [u7; 4],
    data: Vec<u7>,
}

impl RolandSysEx {
    /// Build a frame from raw integers, validating every field.
    ///
    /// `device_id` must be in `0x10..=0x1F` or be [`DEVICE_ID_BROADCAST`]; every
    /// byte of `model_id`, `address` and `data`, and `command`, must be 7-bit safe.
    pub fn new(
        device_id: u8,
        model_id: [u8; 4],
        command: u8,
        address: [u8; 4],
        data: &[u8],
    ) -> Result<RolandSysEx> {
        ensure!(
            (0x10..=0x1F).contains(&device_id) || device_id == DEVICE_ID_BROADCAST,
            Error::BadDeviceId { found: device_id }
        );
        let mut model = [u7::new(0); 4];
        for (dst, &src) in model.iter_mut().zip(model_id.iter()) {
            *dst = check_u7("model id byte", src)?;
        }
        let mut addr = [u7::new(0); 4];
        for (dst, &src) in addr.iter_mut().zip(address.iter()) {
            *dst = check_u7("address byte", src)?;
        }
        let data = data
            .iter()
            .map(|&b| check_u7("data byte", b))
            .collect::<Result<Vec<u7>>>()?;
        Ok(RolandSysEx {
            device_id: u7::new(device_id),
            model_id: model,
            command: check_u7("command", command)?,
            address: addr,
            data,
        })
    }

    /// The device ID (`0x10..=0x1F`, or `0x7F` for broadcast).
    #[inline]
    pub fn device_id(&self) -> u7 {
        self.device_id
    }

    /// The 4-byte model identifier.
    #[inline]
    pub fn model_id(&self) -> [u7; 4] {
        self.model_id
    }

    /// The command byte ([`DT1`], [`RQ1`], or any other 7-bit command).
    #[inline]
    pub fn command(&self) -> u7 {
        self.command
    }

    /// The 4-byte parameter address.
    #[inline]
    pub fn address(&self) -> [u7; 4] {
        self.address
    }

    /// The variable-length data payload.
    #[inline]
    pub fn data(&self) -> &[u7] {
        &self.data
    }

    /// The checksum over this frame's address and data bytes.
    pub fn checksum(&self) -> u7 {
        roland_checksum(self.address.iter().chain(self.data.iter()))
    }

    /// Serialize the frame, delimiters and checksum included.
    ///
    /// The total length is always [`MIN_FRAME_LEN`]` + data.len()`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MIN_FRAME_LEN + self.data.len());
        out.push(crate::status::SYSEX_START);
        out.push(MANUFACTURER_ID);
        out.push(self.device_id.as_int());
        out.extend_from_slice(u7::slice_as_int(&self.model_id));
        out.push(self.command.as_int());
        out.extend_from_slice(u7::slice_as_int(&self.address));
        out.extend_from_slice(u7::slice_as_int(&self.data));
        out.push(self.checksum().as_int());
        out.push(crate::status::SYSEX_END);
        out
    }

    /// Parse and verify a captured frame, delimiters included.
    ///
    /// The embedded checksum is verified against the checksum computed over the
    /// *parsed* address and data bytes, never against caller-supplied values, so a
    /// frame whose claimed checksum does not match its claimed payload is rejected
    /// with [`Error::ChecksumMismatch`](enum.Error.html).
    pub fn parse(raw: &[u8]) -> Result<RolandSysEx> {
        ensure!(
            raw.len() >= MIN_FRAME_LEN,
            Error::FrameTooShort {
                len: raw.len(),
                min: MIN_FRAME_LEN,
            }
        );
        ensure!(
            raw[0] == crate::status::SYSEX_START,
            Error::BadDelimiter {
                expected: crate::status::SYSEX_START,
                found: raw[0],
            }
        );
        let last = raw[raw.len() - 1];
        ensure!(
            last == crate::status::SYSEX_END,
            Error::BadDelimiter {
                expected: crate::status::SYSEX_END,
                found: last,
            }
        );
        ensure!(
            raw[1] == MANUFACTURER_ID,
            Error::BadManufacturer { found: raw[1] }
        );

        let frame = RolandSysEx::new(
            raw[2],
            [raw[3], raw[4], raw[5], raw[6]],
            raw[7],
            [raw[8], raw[9], raw[10], raw[11]],
            &raw[12..raw.len() - 2],
        )?;
        let computed = frame.checksum();
        let embedded = raw[raw.len() - 2];
        ensure!(
            computed.as_int() == embedded,
            Error::ChecksumMismatch {
                computed: computed.as_int(),
                embedded,
            }
        );
        Ok(frame)
    }
}

/// Split a packed 28-bit parameter address into its 4-byte wire form, 7 bits per
/// byte, most significant group first.
pub fn address_from_packed(packed: u32) -> Result<[u7; 4]> {
    ensure!(
        packed < 1 << 28,
        Error::OutOfRange {
            field: "packed address",
            value: packed as i64,
            min: 0,
            max: (1 << 28) - 1,
        }
    );
    Ok([
        u7::new((packed >> 21) as u8),
        u7::new((packed >> 14) as u8),
        u7::new((packed >> 7) as u8),
        u7::new(packed as u8),
    ])
}

/// Join a 4-byte wire address back into its packed 28-bit form.
#[inline]
pub fn address_packed(address: [u7; 4]) -> u32 {
    (address[0].as_int() as u32) << 21
        | (address[1].as_int() as u32) << 14
        | (address[2].as_int() as u32) << 7
        | address[3].as_int() as u32
}
