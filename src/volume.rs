//! Duty table for linear perceived loudness
//!
//! The volume scale runs 0 to 10 (0 = off, 10 = max) and is realized as a
//! fixed table of duty divisors rather than a formula: the pulse width for
//! volume `v` is `top / DUTY_DIVISORS[v - 1]`. The steps are non-linear on
//! purpose, producing a roughly linear loudness impression on a small
//! speaker. The values are empirically tuned hardware constants, not a
//! mathematical law.

/// Maximum volume level (loudest)
pub const MAX_VOLUME: u8 = 10;

/// Duty divisors for volumes 1 through 10, monotonically decreasing.
///
/// A larger divisor yields a narrower pulse and a quieter note; volume 10
/// divides the period by 2, i.e. a full 50% duty square wave.
pub const DUTY_DIVISORS: [u32; 10] = [150, 72, 51, 38, 32, 23, 20, 19, 10, 2];

/// Clamp a requested volume into the valid 0..=10 range.
///
/// Out-of-range requests are a caller error, but clamping keeps playback
/// audible instead of silently doing nothing.
pub fn clamp_volume(volume: u8) -> u8 {
    volume.min(MAX_VOLUME)
}

/// Duty divisor for a volume in 1..=10
pub fn duty_divisor(volume: u8) -> u32 {
    debug_assert!(
        (1..=MAX_VOLUME).contains(&volume),
        "volume {} outside 1..=10",
        volume
    );
    DUTY_DIVISORS[(volume - 1) as usize]
}

/// Duty compare value for a counter top and a volume in 1..=10
///
/// At high frequencies combined with low volumes the integer division can
/// reach zero; the output pins then stop toggling but remain driven, which
/// matches the hardware behavior of the period being too short to carry
/// the requested pulse width.
pub fn duty_compare(top: u32, volume: u8) -> u32 {
    top / duty_divisor(volume)
}
