//! Core data model: the state enums `ProbingState` and `InputState`, the
//! coordinator's `DetectionResult`, the `LanguageFilter` bitmask, and the
//! `DetectorSettings` the engine is tuned with.

use bitflags::bitflags;
use serde::Serialize;
use std::fmt;

/////////////////////////////////////////////////////////////////////////////////////
// ProbingState / InputState
/////////////////////////////////////////////////////////////////////////////////////

/// State of a single prober (or group prober). Monotonic within one feed
/// episode: once `FoundIt` or `NotMe`, only `reset()` can move it back to
/// `Detecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbingState {
    Detecting,
    FoundIt,
    NotMe,
}

/// Regime the universal coordinator has classified the input stream into.
/// Upgrades are monotonic: `PureAscii -> EscAscii` (on `0x1B` or `~{`),
/// `PureAscii -> HighByte` (on a byte in `0x80..=0xFF`). `HighByte` wins if
/// both conditions are seen, and is absorbing relative to `EscAscii`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    PureAscii,
    EscAscii,
    HighByte,
}

/////////////////////////////////////////////////////////////////////////////////////
// Language
/////////////////////////////////////////////////////////////////////////////////////

/// Coarse language tag attached to a prober or model. Not exact language
/// identification (see spec Non-goals) — just the label a given statistical
/// model was trained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Japanese,
    Chinese,
    Korean,
    Russian,
    Greek,
    Hebrew,
    Bulgarian,
    Thai,
    Hungarian,
    Unknown,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/////////////////////////////////////////////////////////////////////////////////////
// LanguageFilter
/////////////////////////////////////////////////////////////////////////////////////

bitflags! {
    /// A prober participates in a group race iff `(prober.language_class() &
    /// lang_filter) != LanguageFilter::empty()`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LanguageFilter: u8 {
        const CHINESE_SIMPLIFIED = 0b0000_0001;
        const CHINESE_TRADITIONAL = 0b0000_0010;
        const JAPANESE = 0b0000_0100;
        const KOREAN = 0b0000_1000;
        const NON_CJK = 0b0001_0000;
        const CHINESE = Self::CHINESE_SIMPLIFIED.bits() | Self::CHINESE_TRADITIONAL.bits();
        const CJK = Self::CHINESE.bits() | Self::JAPANESE.bits() | Self::KOREAN.bits();
        const ALL = 0b0001_1111;
    }
}

impl Default for LanguageFilter {
    fn default() -> Self {
        LanguageFilter::ALL
    }
}

/////////////////////////////////////////////////////////////////////////////////////
// DetectionResult
/////////////////////////////////////////////////////////////////////////////////////

/// The coordinator's verdict. `encoding` and `language` are `None` until
/// a prober has spoken with enough confidence, or forever if the engine
/// never decides (see spec §7, "insufficient data").
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectionResult {
    pub encoding: Option<String>,
    pub confidence: f64,
    pub language: Option<String>,
}

impl DetectionResult {
    pub(crate) fn new(
        encoding: impl Into<String>,
        confidence: f64,
        language: impl Into<String>,
    ) -> Self {
        let language = language.into();
        DetectionResult {
            encoding: Some(encoding.into()),
            confidence,
            language: if language.is_empty() {
                None
            } else {
                Some(language)
            },
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////////
// DetectorSettings
/////////////////////////////////////////////////////////////////////////////////////

/// Tunables for the detection engine. Defaults reproduce the literal
/// thresholds named throughout the spec; override only for experimentation
/// (e.g. loosening `minimum_threshold` to force a guess on thin input).
#[derive(Debug, Clone)]
pub struct DetectorSettings {
    pub lang_filter: LanguageFilter,
    pub shortcut_threshold: f64,
    pub minimum_threshold: f64,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        DetectorSettings {
            lang_filter: LanguageFilter::ALL,
            shortcut_threshold: crate::consts::SHORTCUT_THRESHOLD,
            minimum_threshold: crate::consts::MINIMUM_THRESHOLD,
        }
    }
}
