//! Multi-byte probers (spec.md §4.3): one [`CodingStateMachine`] validates
//! structure, one [`DistributionAnalyzer`] scores character frequency,
//! and — for Shift_JIS/EUC-JP only — a [`JapaneseContextAnalyzer`] adds a
//! third signal. Represented as a single struct parameterized by a
//! `MbcsKind` tag rather than one struct-per-encoding-with-a-trait-object,
//! per spec.md §9's tagged-union guidance: the hot `feed` loop never
//! dispatches through a vtable.

use crate::chardistribution::DistributionAnalyzer;
use crate::codingstatemachine::{CodingStateMachine, MachineState};
use crate::consts::{SHORTCUT_THRESHOLD, SURE_NO, UTF8_FEW_MB_CHARS, UTF8_ONE_CHAR_PROB};
use crate::entity::{Language, ProbingState};
use crate::jpcntx::{JapaneseContextAnalyzer, JapaneseEncodingShape};
use crate::models::{mbcs_freq, mbcs_sm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MbcsKind {
    Utf8,
    ShiftJis,
    EucJp,
    EucKr,
    Cp949,
    Big5,
    EucTw,
    Gb2312,
    Johab,
}

impl MbcsKind {
    pub fn charset_name(&self) -> &'static str {
        match self {
            MbcsKind::Utf8 => "UTF-8",
            MbcsKind::ShiftJis => "Shift_JIS",
            MbcsKind::EucJp => "EUC-JP",
            MbcsKind::EucKr => "EUC-KR",
            MbcsKind::Cp949 => "CP949",
            MbcsKind::Big5 => "Big5",
            MbcsKind::EucTw => "EUC-TW",
            MbcsKind::Gb2312 => "GB2312",
            MbcsKind::Johab => "JOHAB",
        }
    }

    pub fn language(&self) -> Language {
        match self {
            MbcsKind::Utf8 => Language::Unknown,
            MbcsKind::ShiftJis | MbcsKind::EucJp => Language::Japanese,
            MbcsKind::EucKr | MbcsKind::Cp949 => Language::Korean,
            MbcsKind::Big5 | MbcsKind::EucTw | MbcsKind::Gb2312 => Language::Chinese,
            MbcsKind::Johab => Language::Korean,
        }
    }

    /// Language-filter bitmask this encoding participates under (spec.md
    /// §4.6/§6). UTF-8 isn't tied to any one language, so it races
    /// regardless of which classes the caller has disabled.
    pub fn language_class(&self) -> crate::entity::LanguageFilter {
        use crate::entity::LanguageFilter as LF;
        match self {
            MbcsKind::Utf8 => LF::ALL,
            MbcsKind::ShiftJis | MbcsKind::EucJp => LF::JAPANESE,
            MbcsKind::EucKr | MbcsKind::Cp949 | MbcsKind::Johab => LF::KOREAN,
            MbcsKind::Big5 | MbcsKind::EucTw => LF::CHINESE_TRADITIONAL,
            MbcsKind::Gb2312 => LF::CHINESE_SIMPLIFIED,
        }
    }
}

pub struct MbCharSetProber {
    kind: MbcsKind,
    coding_sm: CodingStateMachine,
    distribution: DistributionAnalyzer,
    context: Option<JapaneseContextAnalyzer>,
    state: ProbingState,
    num_mb_chars: u32,
    pending_lead: Option<u8>,
}

impl MbCharSetProber {
    pub fn new(kind: MbcsKind) -> Self {
        let coding_sm = CodingStateMachine::new(match kind {
            MbcsKind::Utf8 => &mbcs_sm::UTF8_MODEL,
            MbcsKind::ShiftJis => &mbcs_sm::SJIS_MODEL,
            MbcsKind::EucJp => &mbcs_sm::EUC_JP_MODEL,
            MbcsKind::EucKr => &mbcs_sm::EUC_KR_MODEL,
            MbcsKind::Cp949 => &mbcs_sm::CP949_MODEL,
            MbcsKind::Big5 => &mbcs_sm::BIG5_MODEL,
            MbcsKind::EucTw => &mbcs_sm::EUC_TW_MODEL,
            MbcsKind::Gb2312 => &mbcs_sm::GB2312_MODEL,
            MbcsKind::Johab => &mbcs_sm::JOHAB_MODEL,
        });
        let dist_model: &'static _ = match kind {
            MbcsKind::Utf8 => Box::leak(Box::new(mbcs_freq::utf8_distribution())),
            MbcsKind::ShiftJis => Box::leak(Box::new(mbcs_freq::sjis_distribution())),
            MbcsKind::EucJp => Box::leak(Box::new(mbcs_freq::euc_jp_distribution())),
            MbcsKind::EucKr => Box::leak(Box::new(mbcs_freq::euc_kr_distribution())),
            MbcsKind::Cp949 => Box::leak(Box::new(mbcs_freq::cp949_distribution())),
            MbcsKind::Big5 => Box::leak(Box::new(mbcs_freq::big5_distribution())),
            MbcsKind::EucTw => Box::leak(Box::new(mbcs_freq::euc_tw_distribution())),
            MbcsKind::Gb2312 => Box::leak(Box::new(mbcs_freq::gb2312_distribution())),
            MbcsKind::Johab => Box::leak(Box::new(mbcs_freq::johab_distribution())),
        };
        let context = match kind {
            MbcsKind::ShiftJis => Some(JapaneseContextAnalyzer::new(JapaneseEncodingShape::ShiftJis)),
            MbcsKind::EucJp => Some(JapaneseContextAnalyzer::new(JapaneseEncodingShape::EucJp)),
            _ => None,
        };
        MbCharSetProber {
            kind,
            coding_sm,
            distribution: DistributionAnalyzer::new(dist_model),
            context,
            state: ProbingState::Detecting,
            num_mb_chars: 0,
            pending_lead: None,
        }
    }

    pub fn reset(&mut self) {
        self.coding_sm.reset();
        self.distribution.reset();
        if let Some(ctx) = &mut self.context {
            ctx.reset();
        }
        self.state = ProbingState::Detecting;
        self.num_mb_chars = 0;
        self.pending_lead = None;
    }

    pub fn state(&self) -> ProbingState {
        self.state
    }

    pub fn charset_name(&self) -> &'static str {
        self.kind.charset_name()
    }

    pub fn language(&self) -> Language {
        self.kind.language()
    }

    pub fn feed(&mut self, buf: &[u8]) -> ProbingState {
        if self.state == ProbingState::NotMe || self.state == ProbingState::FoundIt {
            return self.state;
        }

        for &byte in buf {
            match self.coding_sm.next_state(byte) {
                MachineState::Error => {
                    self.state = ProbingState::NotMe;
                    break;
                }
                MachineState::ItsMe => {
                    self.state = ProbingState::FoundIt;
                    break;
                }
                MachineState::Pending => {
                    if self.pending_lead.is_none() {
                        self.pending_lead = Some(byte);
                    }
                }
                MachineState::Start => {
                    let char_len = self.coding_sm.current_char_len();
                    let lead = self.pending_lead.unwrap_or(byte);
                    self.pending_lead = None;
                    if char_len >= 2 {
                        self.num_mb_chars += 1;
                    }
                    self.distribution.feed(lead, char_len);
                    if let Some(ctx) = &mut self.context {
                        ctx.feed(lead, byte, char_len);
                    }
                }
            }
        }

        if self.state == ProbingState::Detecting && self.distribution.got_enough_data()
            && self.get_confidence() > SHORTCUT_THRESHOLD
        {
            self.state = ProbingState::FoundIt;
        }
        self.state
    }

    pub fn get_confidence(&self) -> f64 {
        if self.state == ProbingState::NotMe {
            return SURE_NO;
        }
        if self.kind == MbcsKind::Utf8 && self.num_mb_chars < UTF8_FEW_MB_CHARS {
            return 1.0 - UTF8_ONE_CHAR_PROB.powi(self.num_mb_chars as i32);
        }
        let dist_conf = self.distribution.get_confidence();
        match &self.context {
            Some(ctx) if ctx.got_enough_data() => dist_conf.max(ctx.get_confidence()),
            _ => dist_conf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_stays_detecting() {
        let mut p = MbCharSetProber::new(MbcsKind::Utf8);
        assert_eq!(p.feed(b"hello world"), ProbingState::Detecting);
    }

    #[test]
    fn invalid_utf8_lead_byte_excludes() {
        let mut p = MbCharSetProber::new(MbcsKind::Utf8);
        assert_eq!(p.feed(&[0xFF, 0xFE]), ProbingState::NotMe);
    }

    #[test]
    fn reset_clears_state() {
        let mut p = MbCharSetProber::new(MbcsKind::Utf8);
        p.feed(&[0xFF]);
        assert_eq!(p.state(), ProbingState::NotMe);
        p.reset();
        assert_eq!(p.state(), ProbingState::Detecting);
    }

    #[test]
    fn utf8_one_char_prob_curve_below_threshold() {
        let mut p = MbCharSetProber::new(MbcsKind::Utf8);
        p.feed(&[0xC2, 0xA9]); // single 2-byte char: copyright sign
        assert!(p.get_confidence() < SHORTCUT_THRESHOLD);
    }

    #[test]
    fn ascii_padding_does_not_count_as_multibyte_chars() {
        // Two real 2-byte chars plus plenty of 1-byte ASCII completions:
        // num_mb_chars must stay at 2, not 2 + the ASCII byte count, so
        // the ONE_CHAR_PROB curve (not the distribution analyzer's floor)
        // still governs get_confidence() here.
        let mut p = MbCharSetProber::new(MbcsKind::Utf8);
        let mut buf = b"ascii ascii ascii ".to_vec();
        buf.extend_from_slice(&[0xC2, 0xA9]);
        buf.extend_from_slice(b" more ascii text ");
        buf.extend_from_slice(&[0xC2, 0xA9]);
        p.feed(&buf);
        assert_eq!(p.num_mb_chars, 2);
        let expected = 1.0 - UTF8_ONE_CHAR_PROB.powi(2);
        assert!((p.get_confidence() - expected).abs() < 1e-9);
    }
}
