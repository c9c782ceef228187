//! Small numeric helpers shared by the filters.

/// Values below this magnitude are treated as denormal and flushed.
const DENORMAL_THRESHOLD: f32 = 1.0e-15;

/// Force near-zero values to exactly zero.
///
/// Filter memories decaying towards zero eventually reach the subnormal
/// range, where arithmetic on most CPUs becomes dramatically slower.
#[inline]
pub fn flush_denormal(value: f32) -> f32 {
    if value.abs() < DENORMAL_THRESHOLD {
        0.0
    } else {
        value
    }
}

/// Convert an interval in semitones to a frequency ratio.
///
/// Block-rate helper; not meant for per-sample use.
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    2.0_f32.powf(semitones / 12.0)
}
