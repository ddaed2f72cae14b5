use crate::{
    num::{u14, u4, u7},
    status, sysex, timing, Error, Message, Nrpn, PitchBend, Rpn, RolandSysEx, StreamParser,
};

/// Feed `bytes` and collect everything the parser yields.
fn drain(parser: &mut StreamParser, bytes: &[u8]) -> Vec<crate::Result<Message>> {
    parser.feed(bytes).collect()
}

fn note_on(channel: u8, key: u8, vel: u8) -> Message {
    Message::note_on(channel, key, vel).unwrap()
}

/// The 15-byte DT1 frame used throughout: device 0x10, model GS (00 00 00 0E),
/// address 18 00 00 10, one data byte 0x7F.
fn dt1_frame() -> RolandSysEx {
    RolandSysEx::new(
        0x10,
        [0x00, 0x00, 0x00, 0x0E],
        sysex::DT1.as_int(),
        [0x18, 0x00, 0x00, 0x10],
        &[0x7F],
    )
    .unwrap()
}

mod message {
    use super::*;

    #[test]
    fn control_change_bytes() {
        let msg = Message::control_change(0, 7, 100).unwrap();
        assert_eq!(msg.encode(), [0xB0, 0x07, 0x64]);
        assert_eq!(msg.to_string(), "B0 07 64");
    }

    #[test]
    fn note_bytes() {
        assert_eq!(note_on(2, 0x3C, 0x40).encode(), [0x92, 0x3C, 0x40]);
        assert_eq!(
            Message::note_off(15, 0x7F, 0).unwrap().encode(),
            [0x8F, 0x7F, 0x00]
        );
        assert_eq!(
            Message::program_change(9, 42).unwrap().encode(),
            [0xC9, 0x2A]
        );
    }

    #[test]
    fn pitch_bend_wire_order() {
        // No bend is 0x2000: LSB 0x00 on the wire first, then MSB 0x40.
        assert_eq!(
            Message::pitch_bend(0, 0).unwrap().encode(),
            [0xE0, 0x00, 0x40]
        );
        assert_eq!(
            Message::pitch_bend(3, -8192).unwrap().encode(),
            [0xE3, 0x00, 0x00]
        );
        assert_eq!(
            Message::pitch_bend(3, 8191).unwrap().encode(),
            [0xE3, 0x7F, 0x7F]
        );
    }

    #[test]
    fn pitch_bend_round_trip_full_domain() {
        for v in -8192..=8191i16 {
            let bend = PitchBend::try_from_int(v).unwrap();
            assert_eq!(bend.as_int(), v);
            assert_eq!(PitchBend::from_14bit(bend.as_14bit()), bend);
        }
        assert!(PitchBend::try_from_int(-8193).is_err());
        assert!(PitchBend::try_from_int(8192).is_err());
    }

    #[test]
    fn pitch_bend_clamping() {
        assert_eq!(PitchBend::from_int_clamped(9000).as_int(), 8191);
        assert_eq!(PitchBend::from_int_clamped(-9000).as_int(), -8192);
        assert_eq!(PitchBend::from_int_clamped(0), PitchBend::mid());
    }

    #[test]
    fn constructors_reject_out_of_range() {
        assert!(matches!(
            Message::note_on(16, 60, 64),
            Err(Error::OutOfRange { value: 16, .. })
        ));
        assert!(matches!(
            Message::note_on(0, 128, 64),
            Err(Error::OutOfRange { value: 128, .. })
        ));
        assert!(matches!(
            Message::control_change(0, 7, 200),
            Err(Error::OutOfRange { value: 200, .. })
        ));
    }

    #[test]
    fn decode_round_trip() {
        let messages = [
            note_on(0, 60, 64),
            Message::note_off(5, 60, 0).unwrap(),
            Message::control_change(1, 7, 100).unwrap(),
            Message::program_change(9, 42).unwrap(),
            Message::pitch_bend(3, -1234).unwrap(),
            Message::SysEx(dt1_frame()),
        ];
        for msg in &messages {
            assert_eq!(&Message::decode(&msg.encode()).unwrap(), msg);
        }
    }

    #[test]
    fn note_on_round_trip_exhaustive() {
        for channel in 0..16 {
            for key in 0..128 {
                for vel in (0..128).step_by(17) {
                    let msg = note_on(channel, key, vel);
                    assert_eq!(Message::decode(&msg.encode()).unwrap(), msg);
                }
            }
        }
    }

    #[test]
    fn decode_rejects_malformed() {
        assert!(matches!(
            Message::decode(&[]),
            Err(Error::FrameTooShort { len: 0, .. })
        ));
        assert!(matches!(
            Message::decode(&[0x90, 0x3C]),
            Err(Error::FrameTooShort { len: 2, min: 3 })
        ));
        assert!(matches!(
            Message::decode(&[0x90, 0x3C, 0x40, 0x00]),
            Err(Error::TrailingBytes { extra: 1 })
        ));
        assert!(matches!(
            Message::decode(&[0x90, 0x3C, 0x80]),
            Err(Error::OutOfRange { value: 0x80, .. })
        ));
        assert!(matches!(
            Message::decode(&[0xA0, 0x3C, 0x40]),
            Err(Error::Unsupported { status: 0xA0 })
        ));
        assert!(matches!(
            Message::decode(&[0xF8]),
            Err(Error::Unsupported { status: 0xF8 })
        ));
    }
}

mod roland {
    use super::*;

    #[test]
    fn dt1_frame_bytes() {
        // sum(address ++ data) = 0x18 + 0x10 + 0x7F = 0xA7; 0xA7 % 128 = 0x27;
        // checksum = 0x80 - 0x27 = 0x59.
        let bytes = dt1_frame().to_bytes();
        assert_eq!(
            bytes,
            [0xF0, 0x41, 0x10, 0x00, 0x00, 0x00, 0x0E, 0x12, 0x18, 0x00, 0x00, 0x10, 0x7F, 0x59, 0xF7]
        );
        assert_eq!(bytes.len(), sysex::MIN_FRAME_LEN + 1);
    }

    #[test]
    fn checksum_invariant() {
        let payloads: [&[u8]; 4] = [
            &[],
            &[0x18, 0x00, 0x00, 0x10, 0x7F],
            &[0x7F; 7],
            &[0x00, 0x01, 0x02, 0x03, 0x7D, 0x7E, 0x7F],
        ];
        for payload in payloads {
            let payload: Vec<u7> = payload.iter().map(|&b| u7::new(b)).collect();
            let checksum = sysex::roland_checksum(&payload);
            let sum: u32 = payload.iter().map(|b| b.as_int() as u32).sum();
            assert_eq!((sum + checksum.as_int() as u32) % 128, 0);
        }
    }

    #[test]
    fn parse_round_trip() {
        let frame = dt1_frame();
        let parsed = RolandSysEx::parse(&frame.to_bytes()).unwrap();
        assert_eq!(parsed, frame);
        assert_eq!(parsed.device_id(), 0x10);
        assert_eq!(parsed.command(), sysex::DT1);
        assert_eq!(u7::slice_as_int(parsed.data()), [0x7F]);
    }

    #[test]
    fn rq1_empty_payload() {
        let frame = RolandSysEx::new(
            sysex::DEVICE_ID_BROADCAST,
            [0x00, 0x00, 0x00, 0x0E],
            sysex::RQ1.as_int(),
            [0x40, 0x00, 0x7F, 0x00],
            &[],
        )
        .unwrap();
        let bytes = frame.to_bytes();
        assert_eq!(bytes.len(), sysex::MIN_FRAME_LEN);
        assert_eq!(RolandSysEx::parse(&bytes).unwrap(), frame);
    }

    #[test]
    fn parse_error_precedence() {
        let good = dt1_frame().to_bytes();

        let err = RolandSysEx::parse(&good[..13]).unwrap_err();
        assert!(matches!(err, Error::FrameTooShort { len: 13, min: 14 }));
        assert!(err.is_format());

        let mut bad = good.clone();
        bad[0] = 0x41;
        assert!(matches!(
            RolandSysEx::parse(&bad),
            Err(Error::BadDelimiter { expected: 0xF0, found: 0x41 })
        ));

        let mut bad = good.clone();
        *bad.last_mut().unwrap() = 0x00;
        assert!(matches!(
            RolandSysEx::parse(&bad),
            Err(Error::BadDelimiter { expected: 0xF7, found: 0x00 })
        ));

        let mut bad = good.clone();
        bad[1] = 0x43;
        assert!(matches!(
            RolandSysEx::parse(&bad),
            Err(Error::BadManufacturer { found: 0x43 })
        ));

        let mut bad = good.clone();
        bad[2] = 0x05;
        assert!(matches!(
            RolandSysEx::parse(&bad),
            Err(Error::BadDeviceId { found: 0x05 })
        ));
    }

    #[test]
    fn checksum_tamper_detected() {
        // Flip one data byte; the embedded checksum no longer matches.
        let mut bytes = dt1_frame().to_bytes();
        bytes[12] = 0x00;
        let err = RolandSysEx::parse(&bytes).unwrap_err();
        assert!(matches!(err, Error::ChecksumMismatch { embedded: 0x59, .. }));
        assert!(err.is_checksum());
        assert!(!err.is_format());

        // Flipping any bit of the checksum byte itself is also caught.
        let good = dt1_frame().to_bytes();
        let checksum_at = good.len() - 2;
        for bit in 0..7 {
            let mut bytes = good.clone();
            bytes[checksum_at] ^= 1 << bit;
            assert!(RolandSysEx::parse(&bytes).unwrap_err().is_checksum());
        }
    }

    #[test]
    fn bad_device_id_at_construction() {
        assert!(matches!(
            RolandSysEx::new(0x05, [0; 4], 0x12, [0; 4], &[]),
            Err(Error::BadDeviceId { found: 0x05 })
        ));
        assert!(matches!(
            RolandSysEx::new(0x10, [0; 4], 0x12, [0x80, 0, 0, 0], &[]),
            Err(Error::OutOfRange { value: 0x80, .. })
        ));
        assert!(RolandSysEx::new(0x1F, [0; 4], 0x12, [0; 4], &[]).is_ok());
    }

    #[test]
    fn packed_address_round_trip() {
        for packed in [0u32, 1, 0x7F, 0x80, 0x18_0010, (1 << 28) - 1] {
            let address = sysex::address_from_packed(packed).unwrap();
            assert_eq!(sysex::address_packed(address), packed);
        }
        assert!(sysex::address_from_packed(1 << 28).is_err());
    }
}

mod stream {
    use super::*;

    #[test]
    fn split_across_feeds() {
        let mut parser = StreamParser::new();
        assert_eq!(drain(&mut parser, &[0x90]).len(), 0);
        assert_eq!(drain(&mut parser, &[0x3C]).len(), 0);
        let events = drain(&mut parser, &[0x40]);
        assert_eq!(events, [Ok(note_on(0, 0x3C, 0x40))]);
    }

    #[test]
    fn multiple_messages_in_one_feed() {
        let mut parser = StreamParser::new();
        let events = drain(&mut parser, &[0x90, 0x3C, 0x40, 0x80, 0x3C, 0x00, 0xC2, 0x05]);
        assert_eq!(
            events,
            [
                Ok(note_on(0, 0x3C, 0x40)),
                Ok(Message::note_off(0, 0x3C, 0x00).unwrap()),
                Ok(Message::program_change(2, 5).unwrap()),
            ]
        );
    }

    #[test]
    fn empty_feed_drains_pending() {
        let mut parser = StreamParser::new();
        // Drop the iterator without pulling from it; the bytes stay buffered.
        drop(parser.feed(&[0x90, 0x3C, 0x40]));
        assert_eq!(drain(&mut parser, &[]), [Ok(note_on(0, 0x3C, 0x40))]);
    }

    #[test]
    fn sysex_span_skipped() {
        let mut parser = StreamParser::new();
        let mut bytes = dt1_frame().to_bytes();
        bytes.extend_from_slice(&[0x90, 0x3C, 0x40]);
        let events = drain(&mut parser, &bytes);
        assert_eq!(events, [Ok(note_on(0, 0x3C, 0x40))]);
    }

    #[test]
    fn sysex_split_across_feeds_waits() {
        let mut parser = StreamParser::new();
        let bytes = dt1_frame().to_bytes();
        let (head, tail) = bytes.split_at(5);
        assert_eq!(drain(&mut parser, head).len(), 0);
        assert_eq!(drain(&mut parser, tail).len(), 0);
        // The span is gone; a following message parses cleanly.
        assert_eq!(
            drain(&mut parser, &[0x90, 0x3C, 0x40]),
            [Ok(note_on(0, 0x3C, 0x40))]
        );
    }

    #[test]
    fn running_status_disabled_by_default() {
        let mut parser = StreamParser::new();
        let events = drain(&mut parser, &[0x90, 0x3C, 0x40, 0x3E, 0x40]);
        assert_eq!(events, [Ok(note_on(0, 0x3C, 0x40))]);
        assert_eq!(parser.running_status(), Some(0x90));
    }

    #[test]
    fn running_status_opt_in() {
        let mut parser = StreamParser::new();
        parser.decode_running_status(true);
        let events = drain(&mut parser, &[0x90, 0x3C, 0x40, 0x3E, 0x40]);
        assert_eq!(
            events,
            [Ok(note_on(0, 0x3C, 0x40)), Ok(note_on(0, 0x3E, 0x40))]
        );

        // A status-omitted message also completes across feed boundaries.
        assert_eq!(drain(&mut parser, &[0x3F]).len(), 0);
        assert_eq!(drain(&mut parser, &[0x01]), [Ok(note_on(0, 0x3F, 0x01))]);
    }

    #[test]
    fn running_status_cleared_by_reset() {
        let mut parser = StreamParser::new();
        parser.decode_running_status(true);
        drain(&mut parser, &[0x90, 0x3C, 0x40]);
        parser.reset();
        assert_eq!(parser.running_status(), None);
        // Without an active status, a bare data byte is dropped.
        assert_eq!(drain(&mut parser, &[0x3E, 0x40]).len(), 0);
    }

    #[test]
    fn interrupted_message_resyncs() {
        let mut parser = StreamParser::new();
        // The first Note On is cut short by a second status byte: the committed
        // status is abandoned without an error and parsing restarts there.
        let events = drain(&mut parser, &[0x90, 0x3C, 0x91, 0x3C, 0x40]);
        assert_eq!(events, [Ok(note_on(1, 0x3C, 0x40))]);
    }

    #[test]
    fn leading_garbage_dropped() {
        let mut parser = StreamParser::new();
        let events = drain(&mut parser, &[0x3C, 0x40, 0xF6, 0x90, 0x3C, 0x40]);
        assert_eq!(events, [Ok(note_on(0, 0x3C, 0x40))]);
    }

    #[test]
    fn realtime_and_aftertouch_are_unsupported() {
        let mut parser = StreamParser::new();
        assert_eq!(
            drain(&mut parser, &[0xF8]),
            [Err(Error::Unsupported { status: 0xF8 })]
        );
        // The error ends the iterator for that call, not the parser: the poly
        // aftertouch span is consumed and the message after it still parses.
        assert_eq!(
            drain(&mut parser, &[0xA0, 0x3C, 0x40]),
            [Err(Error::Unsupported { status: 0xA0 })]
        );
        assert_eq!(
            drain(&mut parser, &[0xD1, 0x3C]),
            [Err(Error::Unsupported { status: 0xD1 })]
        );
        assert_eq!(
            drain(&mut parser, &[0x90, 0x3C, 0x40]),
            [Ok(note_on(0, 0x3C, 0x40))]
        );
    }

    #[test]
    fn error_stops_the_iterator_after_yielded_messages() {
        let mut parser = StreamParser::new();
        let mut iter = parser.feed(&[0x90, 0x3C, 0x40, 0xA5, 0x01, 0x02, 0x91, 0x3C, 0x40]);
        assert_eq!(iter.next(), Some(Ok(note_on(0, 0x3C, 0x40))));
        assert_eq!(iter.next(), Some(Err(Error::Unsupported { status: 0xA5 })));
        assert_eq!(iter.next(), None);
        drop(iter);
        // The message after the failing span surfaces on the next feed.
        assert_eq!(drain(&mut parser, &[]), [Ok(note_on(1, 0x3C, 0x40))]);
    }

    #[test]
    fn pending_overflow_leaves_parser_reusable() {
        let mut parser = StreamParser::with_max_pending(16);
        let mut bytes = vec![0xF0];
        bytes.extend_from_slice(&[0x00; 20]);
        assert_eq!(
            drain(&mut parser, &bytes),
            [Err(Error::PendingOverflow { limit: 16 })]
        );
        assert_eq!(
            drain(&mut parser, &[0x90, 0x3C, 0x40]),
            [Ok(note_on(0, 0x3C, 0x40))]
        );
    }
}

mod numeric {
    use super::*;

    #[test]
    fn restricted_ints() {
        assert_eq!(u4::max_value(), 15);
        assert_eq!(u7::max_value(), 127);
        assert_eq!(u14::max_value(), 16383);
        assert_eq!(u7::new(0x95), 0x15);
        assert_eq!(u7::try_from(128), None);
        assert_eq!(u7::try_from(127), Some(u7::new(127)));
    }

    #[test]
    fn msb_lsb_split() {
        let v = u14::new(0x2345);
        let (msb, lsb) = v.msb_lsb();
        assert_eq!(msb, 0x46);
        assert_eq!(lsb, 0x45);
        assert_eq!(u14::from_msb_lsb(msb, lsb), v);
    }

    #[test]
    fn u7_slice_casts() {
        assert_eq!(u7::slice_try_from_int(&[1, 2, 0x80]), None);
        let slice = u7::slice_try_from_int(&[1, 2, 3]).unwrap();
        assert_eq!(u7::slice_as_int(slice), &[1, 2, 3]);
        assert_eq!(u7::slice_from_int(&[1, 2, 0x80, 3]).len(), 2);
    }

    #[test]
    fn status_classification() {
        assert!(status::is_channel_voice(0x80));
        assert!(status::is_channel_voice(0xEF));
        assert!(!status::is_channel_voice(0x7F));
        assert!(!status::is_channel_voice(0xF0));
        assert!(status::is_system_common(0xF0));
        assert!(!status::is_system_common(0xF4));
        assert!(status::is_system_realtime(0xF8));
        assert_eq!(status::message_type(0x93), 0x90);
        assert_eq!(status::channel(0x93), Some(u4::new(3)));
        assert_eq!(status::channel(0xF0), None);
        assert_eq!(status::make_status(status::NOTE_ON, u4::new(3)), 0x93);
    }

    #[test]
    fn channel_msg_lengths() {
        assert_eq!(status::channel_msg_len(0x80), 3);
        assert_eq!(status::channel_msg_len(0x9F), 3);
        assert_eq!(status::channel_msg_len(0xA0), 3);
        assert_eq!(status::channel_msg_len(0xB0), 3);
        assert_eq!(status::channel_msg_len(0xC0), 2);
        assert_eq!(status::channel_msg_len(0xD0), 2);
        assert_eq!(status::channel_msg_len(0xE0), 3);
        assert_eq!(status::channel_msg_len(0xF0), 0);
    }

    #[test]
    fn display_channels() {
        assert_eq!(status::channel_from_display(1).unwrap(), u4::new(0));
        assert_eq!(status::channel_from_display(16).unwrap(), u4::new(15));
        assert!(status::channel_from_display(0).is_err());
        assert!(status::channel_from_display(17).is_err());
        assert_eq!(status::channel_to_display(u4::new(9)), 10);
    }
}

mod parameters {
    use super::*;

    #[test]
    fn rpn_quadruple() {
        // RPN 0 (pitch-bend range) set to 2 semitones.
        let rpn = Rpn {
            channel: u4::new(0),
            parameter: u14::new(0),
            value: u14::new(2),
        };
        let encoded: Vec<Vec<u8>> = rpn.messages().iter().map(Message::encode).collect();
        assert_eq!(
            encoded,
            [
                [0xB0, 101, 0],
                [0xB0, 100, 0],
                [0xB0, 6, 0],
                [0xB0, 38, 2],
            ]
        );
    }

    #[test]
    fn rpn_14bit_value_split() {
        let rpn = Rpn {
            channel: u4::new(4),
            parameter: u14::new(0x0102),
            value: u14::new(0x2345),
        };
        let encoded: Vec<Vec<u8>> = rpn.messages().iter().map(Message::encode).collect();
        assert_eq!(
            encoded,
            [
                [0xB4, 101, 0x02],
                [0xB4, 100, 0x02],
                [0xB4, 6, 0x46],
                [0xB4, 38, 0x45],
            ]
        );
    }

    #[test]
    fn nrpn_quadruple_and_msb_only() {
        let nrpn = Nrpn {
            channel: u4::new(9),
            parameter: u14::new(0x0134),
            value: u14::new(0x40),
        };
        let encoded: Vec<Vec<u8>> = nrpn.messages().iter().map(Message::encode).collect();
        assert_eq!(
            encoded,
            [
                [0xB9, 99, 0x02],
                [0xB9, 98, 0x34],
                [0xB9, 6, 0x00],
                [0xB9, 38, 0x40],
            ]
        );
        let short: Vec<Vec<u8>> = nrpn
            .messages_msb_only()
            .iter()
            .map(Message::encode)
            .collect();
        assert_eq!(short, [[0xB9, 99, 0x02], [0xB9, 98, 0x34], [0xB9, 6, 0x40]]);
    }
}

mod tempo {
    use super::*;

    #[test]
    fn bpm_conversions() {
        assert_eq!(timing::bpm_to_micros_per_beat(120.0), Some(500_000));
        assert_eq!(timing::bpm_to_micros_per_beat(60.0), Some(1_000_000));
        assert_eq!(timing::bpm_to_micros_per_beat(0.0), None);
        assert_eq!(timing::bpm_to_micros_per_beat(-1.0), None);
        assert_eq!(timing::bpm_to_micros_per_beat(f64::NAN), None);
        assert_eq!(timing::micros_per_beat_to_bpm(500_000), Some(120.0));
        assert_eq!(timing::micros_per_beat_to_bpm(0), None);
    }

    #[test]
    fn tick_conversions() {
        // One beat at 120 BPM is half a second.
        assert_eq!(timing::ticks_to_seconds(480, 120.0, 480), Some(0.5));
        assert_eq!(timing::ticks_to_millis(480, 120.0, 480), Some(500.0));
        assert_eq!(timing::seconds_to_ticks(0.5, 120.0, 480), Some(480));
        assert_eq!(timing::millis_to_ticks(500.0, 120.0, 480), Some(480));
        assert_eq!(timing::ticks_to_seconds(480, 0.0, 480), None);
        assert_eq!(timing::ticks_to_seconds(480, 120.0, 0), None);
        assert_eq!(timing::seconds_to_ticks(-0.1, 120.0, 480), None);
    }
}
