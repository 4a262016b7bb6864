//! Numeric and byte-pattern constants shared across probers and the coordinator.
//!
//! Centralizing these (rather than scattering magic numbers through every
//! prober) mirrors how the teacher crate keeps its mess/coherence thresholds
//! in one place, and lets `DetectorSettings` (see [`crate::entity`]) override
//! them without touching prober logic.

/// Above this confidence, while still `DETECTING`, a prober self-promotes to `FOUND_IT`.
pub const SHORTCUT_THRESHOLD: f64 = 0.95;

/// Below this confidence at `close()`, the coordinator refuses to guess.
pub const MINIMUM_THRESHOLD: f64 = 0.2;

/// Distribution analyzer: returned when there isn't enough (or any) signal.
pub const SURE_NO: f64 = 0.01;
/// Distribution analyzer: returned when every observed char hit the frequency table.
pub const SURE_YES: f64 = 0.99;
/// Distribution analyzer: below this many frequent chars, don't even try.
pub const MINIMUM_DATA_THRESHOLD: u32 = 3;
/// Distribution analyzer: `got_enough_data()` threshold.
pub const DISTRIBUTION_ENOUGH_DATA_THRESHOLD: u32 = 1024;

/// Single-byte sequence analyzer: sample size used to scale the raw ratio.
pub const SB_SAMPLE_SIZE: u32 = 64;
/// Single-byte sequence analyzer: total_seqs threshold before judging.
pub const SB_ENOUGH_REL_THRESHOLD: u32 = 1024;
pub const SB_POSITIVE_SHORTCUT_THRESHOLD: f64 = 0.95;
pub const SB_NEGATIVE_SHORTCUT_THRESHOLD: f64 = 0.05;

/// UTF-16/32 prober: minimum quads/pairs observed before a verdict is possible.
pub const UTF1632_MIN_CHARS_FOR_DETECTION: u32 = 20;
/// UTF-16/32 prober: fraction of zero bytes at the right modulo that counts as a hit.
pub const UTF1632_EXPECTED_RATIO: f64 = 0.94;

/// Hebrew arbiter: minimum |logical - visual| final-letter score gap to call it outright.
pub const HEBREW_MIN_FINAL_CHAR_DISTANCE: i32 = 5;
/// Hebrew arbiter: minimum confidence gap between the two model probers to break a tie.
pub const HEBREW_MIN_MODEL_DISTANCE: f64 = 0.01;

/// UTF-8 prober: per-char probability used to build the "too few multibyte chars yet" curve.
pub const UTF8_ONE_CHAR_PROB: f64 = 0.5;
/// UTF-8 prober: below this many observed multi-byte chars, use the [`UTF8_ONE_CHAR_PROB`] curve.
pub const UTF8_FEW_MB_CHARS: u32 = 6;

/// High bytes, signalling the `HIGH_BYTE` input regime.
pub const HIGH_BYTE_RANGE: std::ops::RangeInclusive<u8> = 0x80..=0xFF;
/// Windows-125x byte range; presence flips ISO-8859-* results to their Windows equivalents.
pub const WIN_BYTE_RANGE: std::ops::RangeInclusive<u8> = 0x80..=0x9F;
/// ESC byte that can start an ISO-2022 escape sequence.
pub const ESC_BYTE: u8 = 0x1B;

pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
pub const UTF32_LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];
pub const UTF32_BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Error sentinel stored in a `class_table`; any byte mapped to this class is illegal.
pub const ERROR_CLASS: u8 = u8::MAX;
