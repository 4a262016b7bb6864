//! Universal coordinator (spec.md §4.7): owns the whole detector
//! lifecycle (`reset -> feed* -> close -> result`), BOM sniffing, input
//! regime classification, dispatch to the escape/UTF-16-32/group/Latin-1
//! probers, and the final verdict reconciliation (ISO->Windows
//! substitution, UTF-16/32 label normalization, minimum-threshold gate).

use crate::charsetgroupprober::{MbcsGroupProber, SbcsGroupProber};
use crate::consts::{
    ESC_BYTE, HIGH_BYTE_RANGE, UTF16_BE_BOM, UTF16_LE_BOM, UTF32_BE_BOM, UTF32_LE_BOM, UTF8_BOM,
    WIN_BYTE_RANGE,
};
use crate::entity::{DetectionResult, DetectorSettings, InputState, Language, LanguageFilter, ProbingState};
use crate::escprober::{EscCharSetProber, EscKind};
use crate::latin1prober::Latin1Prober;
use crate::utf1632prober::Utf1632Prober;
use log::{debug, trace};

/// Maps an ISO-8859-* label (lowercase) to its Windows-125x equivalent,
/// applied at `close()` when `has_win_bytes` is set (spec.md §4.7).
const ISO_TO_WINDOWS: &[(&str, &str)] = &[
    ("iso-8859-1", "Windows-1252"),
    ("iso-8859-2", "Windows-1250"),
    ("iso-8859-5", "Windows-1251"),
    ("iso-8859-6", "Windows-1256"),
    ("iso-8859-7", "Windows-1253"),
    ("iso-8859-8", "Windows-1255"),
    ("iso-8859-9", "Windows-1254"),
    ("iso-8859-13", "Windows-1257"),
];

const ESC_KINDS: [EscKind; 4] = [
    EscKind::Iso2022Jp,
    EscKind::Iso2022Kr,
    EscKind::Iso2022Cn,
    EscKind::HzGb2312,
];

/// Sniffs a BOM off the very first non-empty chunk only (spec.md §4.7,
/// §3's "BOM detection happens exclusively on the first non-empty
/// chunk" invariant). Longer prefixes are checked first so `FF FE 00 00`
/// resolves to UTF-32LE rather than UTF-16LE.
fn detect_bom(buf: &[u8]) -> Option<DetectionResult> {
    if buf.starts_with(&UTF8_BOM) {
        return Some(DetectionResult::new("UTF-8-SIG", 1.0, ""));
    }
    if buf.starts_with(&UTF32_LE_BOM) || buf.starts_with(&UTF32_BE_BOM) {
        return Some(DetectionResult::new("UTF-32", 1.0, ""));
    }
    if buf.starts_with(&UTF16_LE_BOM) || buf.starts_with(&UTF16_BE_BOM) {
        return Some(DetectionResult::new("UTF-16", 1.0, ""));
    }
    None
}

/// "UTF-16LE"/"UTF-16BE" -> "UTF-16", "UTF-32LE"/"UTF-32BE" -> "UTF-32".
fn normalize_utf_label(name: &str) -> &str {
    if name.starts_with("UTF-16") {
        "UTF-16"
    } else if name.starts_with("UTF-32") {
        "UTF-32"
    } else {
        name
    }
}

struct Candidate {
    name: &'static str,
    confidence: f64,
    language: Option<Language>,
}

/// Keeps `best` unless `candidate` strictly beats it, so the first
/// candidate registered (UTF-16/32, then MBCS, then SBCS, then Latin-1,
/// matching spec.md §4.7's feed order) wins ties.
fn consider(best: &mut Option<Candidate>, candidate: Option<Candidate>) {
    if let Some(c) = candidate {
        match best {
            Some(b) if b.confidence >= c.confidence => {}
            _ => *best = Some(c),
        }
    }
}

pub struct UniversalDetector {
    settings: DetectorSettings,
    input_state: InputState,
    got_data: bool,
    has_win_bytes: bool,
    done: bool,
    result: DetectionResult,
    esc_probers: [EscCharSetProber; 4],
    mbcs_group: MbcsGroupProber,
    sbcs_group: SbcsGroupProber,
    latin1: Latin1Prober,
    utf1632: Utf1632Prober,
}

impl UniversalDetector {
    pub fn new(lang_filter: LanguageFilter) -> Self {
        UniversalDetector::with_settings(DetectorSettings {
            lang_filter,
            ..Default::default()
        })
    }

    pub fn with_settings(settings: DetectorSettings) -> Self {
        UniversalDetector {
            esc_probers: ESC_KINDS.map(EscCharSetProber::new),
            mbcs_group: MbcsGroupProber::new(settings.lang_filter),
            sbcs_group: SbcsGroupProber::new(settings.lang_filter),
            latin1: Latin1Prober::new(),
            utf1632: Utf1632Prober::new(),
            settings,
            input_state: InputState::PureAscii,
            got_data: false,
            has_win_bytes: false,
            done: false,
            result: DetectionResult::default(),
        }
    }

    pub fn reset(&mut self) {
        self.input_state = InputState::PureAscii;
        self.got_data = false;
        self.has_win_bytes = false;
        self.done = false;
        self.result = DetectionResult::default();
        for esc in &mut self.esc_probers {
            esc.reset();
        }
        self.mbcs_group.reset();
        self.sbcs_group.reset();
        self.latin1.reset();
        self.utf1632.reset();
    }

    pub fn result(&self) -> &DetectionResult {
        &self.result
    }

    /// Classifies (and upgrades) the input regime against this chunk.
    /// `HIGH_BYTE` is absorbing and dominates `ESC_ASCII` even if this
    /// same chunk also contains an escape sequence (spec.md §3).
    fn classify_regime(&mut self, buf: &[u8]) {
        if buf.iter().any(|b| WIN_BYTE_RANGE.contains(b)) {
            self.has_win_bytes = true;
        }
        if self.input_state == InputState::HighByte {
            return;
        }
        if buf.iter().any(|b| HIGH_BYTE_RANGE.contains(b)) {
            self.input_state = InputState::HighByte;
            return;
        }
        if self.input_state == InputState::PureAscii {
            let saw_esc = buf.contains(&ESC_BYTE) || buf.windows(2).any(|w| w == b"~{");
            if saw_esc {
                self.input_state = InputState::EscAscii;
            }
        }
    }

    pub fn feed(&mut self, buf: &[u8]) {
        if self.done || buf.is_empty() {
            return;
        }
        if !self.got_data {
            self.got_data = true;
            if let Some(bom_result) = detect_bom(buf) {
                trace!("BOM detected: {:?}", bom_result.encoding);
                self.result = bom_result;
                self.done = true;
                return;
            }
        }

        self.classify_regime(buf);

        match self.input_state {
            InputState::PureAscii => {}
            InputState::EscAscii => {
                for esc in &mut self.esc_probers {
                    if esc.feed(buf) == ProbingState::FoundIt {
                        debug!("escape prober matched {}", esc.charset_name());
                        self.result = DetectionResult::new(esc.charset_name(), 0.99, esc.language().to_string());
                        self.done = true;
                        return;
                    }
                }
            }
            InputState::HighByte => {
                self.utf1632.feed(buf);
                self.mbcs_group.feed(buf);
                self.sbcs_group.feed(buf);
                self.latin1.feed(buf);
            }
        }
    }

    pub fn close(&mut self) -> &DetectionResult {
        if self.done {
            return &self.result;
        }
        self.done = true;

        if !self.got_data {
            self.result = DetectionResult::default();
            return &self.result;
        }

        if self.input_state == InputState::PureAscii {
            self.result = DetectionResult::new("ascii", 1.0, "");
            return &self.result;
        }

        let mut best: Option<Candidate> = None;

        if self.input_state == InputState::HighByte {
            if self.utf1632.state() != ProbingState::NotMe {
                if let Some(name) = self.utf1632.charset_name() {
                    consider(
                        &mut best,
                        Some(Candidate { name, confidence: self.utf1632.get_confidence(), language: None }),
                    );
                }
            }
            if self.mbcs_group.state() != ProbingState::NotMe {
                if let Some(name) = self.mbcs_group.charset_name() {
                    let lang = self.mbcs_group.language().filter(|l| *l != Language::Unknown);
                    consider(
                        &mut best,
                        Some(Candidate { name, confidence: self.mbcs_group.get_confidence(), language: lang }),
                    );
                }
            }
            if self.sbcs_group.state() != ProbingState::NotMe {
                if let Some(name) = self.sbcs_group.charset_name() {
                    consider(
                        &mut best,
                        Some(Candidate {
                            name,
                            confidence: self.sbcs_group.get_confidence(),
                            language: self.sbcs_group.language(),
                        }),
                    );
                }
            }
            consider(
                &mut best,
                Some(Candidate {
                    name: self.latin1.charset_name(),
                    confidence: self.latin1.get_confidence(),
                    language: None,
                }),
            );
        }

        let Some(winner) = best else {
            self.result = DetectionResult::default();
            return &self.result;
        };

        let mut name = winner.name.to_string();
        let mut confidence = winner.confidence;

        if self.has_win_bytes {
            if let Some((_, win_name)) = ISO_TO_WINDOWS
                .iter()
                .find(|(iso, _)| iso.eq_ignore_ascii_case(&name))
            {
                name = (*win_name).to_string();
                confidence *= 0.9;
            }
        }
        name = normalize_utf_label(&name).to_string();

        if confidence <= self.settings.minimum_threshold {
            self.result = DetectionResult::default();
            return &self.result;
        }

        let language = winner.language.map(|l| l.to_string()).unwrap_or_default();
        debug!("coordinator verdict: {} ({:.2}, {})", name, confidence, language);
        self.result = DetectionResult::new(name, confidence, language);
        &self.result
    }
}

impl Default for UniversalDetector {
    fn default() -> Self {
        UniversalDetector::new(LanguageFilter::default())
    }
}

/// Construct a detector, feed `bytes` once, and close it (spec.md §6).
pub fn detect(bytes: &[u8]) -> DetectionResult {
    detect_with_filter(bytes, LanguageFilter::ALL)
}

pub fn detect_with_filter(bytes: &[u8], lang_filter: LanguageFilter) -> DetectionResult {
    let mut detector = UniversalDetector::new(lang_filter);
    detector.feed(bytes);
    detector.close().clone()
}

/// Reads `path` whole and runs [`detect`] over its bytes. Mirrors the
/// teacher's `from_path`: I/O errors are stringified rather than routed
/// through a custom error type, since the detection engine itself is
/// infallible and the only fallible step here is the read.
pub fn detect_path(path: impl AsRef<std::path::Path>) -> Result<DetectionResult, String> {
    let bytes = std::fs::read(path).map_err(|err| err.to_string())?;
    Ok(detect(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_sig_bom_is_immediate() {
        let result = detect(&[0xEF, 0xBB, 0xBF, b'h', b'i']);
        assert_eq!(result.encoding.as_deref(), Some("UTF-8-SIG"));
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn utf32le_bom_wins_over_utf16le_prefix() {
        let result = detect(&[0xFF, 0xFE, 0x00, 0x00, 0x41, 0x00, 0x00, 0x00]);
        assert_eq!(result.encoding.as_deref(), Some("UTF-32"));
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn pure_ascii_is_ascii() {
        let result = detect(b"Hello");
        assert_eq!(result.encoding.as_deref(), Some("ascii"));
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.language.as_deref(), None);
    }

    #[test]
    fn detect_path_reads_and_detects() {
        let mut path = std::env::temp_dir();
        path.push("charset-detector-rs-detect-path-test.txt");
        std::fs::write(&path, b"plain ascii file contents").unwrap();
        let result = detect_path(&path).unwrap();
        assert_eq!(result.encoding.as_deref(), Some("ascii"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn detect_path_surfaces_io_error() {
        let result = detect_path("/nonexistent/path/does-not-exist.txt");
        assert!(result.is_err());
    }

    #[test]
    fn empty_input_gives_null_result() {
        let result = detect(b"");
        assert_eq!(result.encoding, None);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn escape_sequence_detects_iso2022jp() {
        let mut body = b"\x1B$B".to_vec();
        body.extend_from_slice(b"some jis text\x1B(B");
        let result = detect(&body);
        assert_eq!(result.encoding.as_deref(), Some("ISO-2022-JP"));
    }

    #[test]
    fn well_formed_utf8_is_detected() {
        let mut payload = Vec::new();
        for _ in 0..100 {
            payload.extend_from_slice(&[0xC3, 0xA9]); // 'e' with acute, repeated
        }
        let result = detect(&payload);
        assert_eq!(result.encoding.as_deref(), Some("UTF-8"));
        assert!(result.confidence >= 0.5);
    }

    #[test]
    fn invalid_utf8_continuation_excludes_utf8() {
        let mut payload = b"plain ascii text around ".to_vec();
        payload.extend_from_slice(&[0xC3, 0x28]);
        payload.extend_from_slice(b" more ascii text here");
        let result = detect(&payload);
        assert_ne!(result.encoding.as_deref(), Some("UTF-8"));
    }

    #[test]
    fn chunking_invariance_for_utf8_sample() {
        let mut payload = Vec::new();
        for _ in 0..150 {
            payload.extend_from_slice(&[0xC3, 0xA9]);
        }
        let whole = detect(&payload);

        let mut chunked = UniversalDetector::default();
        for chunk in payload.chunks(7) {
            chunked.feed(chunk);
        }
        let chunked_result = chunked.close().clone();

        assert_eq!(whole.encoding, chunked_result.encoding);
    }

    #[test]
    fn reset_fidelity() {
        let payload = [0xC3, 0xA9, 0xC3, 0xA9, 0xC3, 0xA9];
        let mut d = UniversalDetector::default();
        d.feed(&payload);
        d.close();
        let first = d.result().clone();

        d.reset();
        d.feed(&payload);
        d.close();
        let second = d.result().clone();

        assert_eq!(first, second);
    }

    #[test]
    fn language_filter_excludes_japanese_results() {
        let filter = LanguageFilter::ALL - LanguageFilter::JAPANESE;
        let mut payload = Vec::new();
        for _ in 0..200 {
            payload.extend_from_slice(&[0x82, 0xA0]); // Hiragana "a" in Shift_JIS
        }
        let result = detect_with_filter(&payload, filter);
        assert_ne!(result.language.as_deref(), Some("Japanese"));
    }

    #[test]
    fn minimum_threshold_override_forces_a_guess() {
        use crate::entity::DetectorSettings;
        // A single high byte: every multi-byte coding state machine
        // rejects it as an invalid lead (MBCS group -> NOT_ME), and every
        // single-byte/Latin-1 prober sees too little data to form even
        // one sequence, so every surviving candidate sits at the floor
        // confidence of 0.01 - below the default MINIMUM_THRESHOLD.
        let payload = [0xFF];
        let default_result = detect(&payload);
        assert_eq!(default_result.encoding, None);

        let mut lenient = UniversalDetector::with_settings(DetectorSettings {
            minimum_threshold: 0.0,
            ..Default::default()
        });
        lenient.feed(&payload);
        let forced = lenient.close();
        assert!(forced.encoding.is_some());
    }

    #[test]
    fn feed_after_done_is_a_no_op() {
        let mut d = UniversalDetector::default();
        d.feed(&[0xEF, 0xBB, 0xBF]);
        assert!(d.done);
        let before = d.result().clone();
        d.feed(b"more data that would otherwise change things");
        assert_eq!(d.result(), &before);
    }
}
