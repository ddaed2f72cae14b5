//! Tempo and tick arithmetic for the timing-sensitive side of MIDI.
//!
//! All conversions return `None` on non-positive or non-finite inputs instead of
//! producing garbage; a tempo of zero BPM is not a number, it is a stopped clock.

/// Convert beats per minute to microseconds per beat.
///
/// Returns `None` if `bpm` is not finite and positive, or if the result does not fit
/// a `u32`.
pub fn bpm_to_micros_per_beat(bpm: f64) -> Option<u32> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return None;
    }
    let micros = 60_000_000.0 / bpm;
    if micros > u32::MAX as f64 {
        return None;
    }
    Some(micros.round() as u32)
}

/// Convert microseconds per beat to beats per minute.
///
/// Returns `None` if `micros_per_beat` is zero.
pub fn micros_per_beat_to_bpm(micros_per_beat: u32) -> Option<f64> {
    if micros_per_beat == 0 {
        return None;
    }
    Some(60_000_000.0 / micros_per_beat as f64)
}

/// Convert a tick count to seconds, given a tempo and a ticks-per-beat resolution.
pub fn ticks_to_seconds(ticks: u32, bpm: f64, ticks_per_beat: u32) -> Option<f64> {
    if !bpm.is_finite() || bpm <= 0.0 || ticks_per_beat == 0 {
        return None;
    }
    Some(ticks as f64 * 60.0 / (bpm * ticks_per_beat as f64))
}

/// Convert a duration in seconds to the nearest tick count.
///
/// Returns `None` on non-positive tempo or resolution, negative durations, or
/// results beyond `u32`.
pub fn seconds_to_ticks(seconds: f64, bpm: f64, ticks_per_beat: u32) -> Option<u32> {
    if !bpm.is_finite() || bpm <= 0.0 || ticks_per_beat == 0 {
        return None;
    }
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let ticks = seconds * bpm * ticks_per_beat as f64 / 60.0;
    if ticks > u32::MAX as f64 {
        return None;
    }
    Some(ticks.round() as u32)
}

/// Convert a tick count to milliseconds.
pub fn ticks_to_millis(ticks: u32, bpm: f64, ticks_per_beat: u32) -> Option<f64> {
    ticks_to_seconds(ticks, bpm, ticks_per_beat).map(|s| s * 1000.0)
}

/// Convert a duration in milliseconds to the nearest tick count.
pub fn millis_to_ticks(millis: f64, bpm: f64, ticks_per_beat: u32) -> Option<u32> {
    if !millis.is_finite() {
        return None;
    }
    seconds_to_ticks(millis / 1000.0, bpm, ticks_per_beat)
}
