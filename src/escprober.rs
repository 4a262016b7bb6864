//! ISO-2022 escape-sequence prober (spec.md §2, `ESC_ASCII` regime).
//! `original_source/chardet`'s `escprober.py`/`escsm.py` weren't present
//! in the filtered retrieval pack, so this follows spec.md's generic
//! prober contract directly: match known escape-designator byte
//! sequences rather than drive them through the shared coding state
//! machine, since ISO-2022 designators are few, fixed-length, and don't
//! benefit from a class/state table.

use crate::entity::{Language, ProbingState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscKind {
    Iso2022Jp,
    Iso2022Kr,
    Iso2022Cn,
    HzGb2312,
}

impl EscKind {
    fn sequences(&self) -> &'static [&'static [u8]] {
        match self {
            EscKind::Iso2022Jp => &[
                b"\x1B(B",
                b"\x1B(J",
                b"\x1B$@",
                b"\x1B$B",
                b"\x1B$(D",
                b"\x1B(I",
                b"\x1B.A",
                b"\x1B.F",
            ],
            EscKind::Iso2022Kr => &[b"\x1B$)C"],
            EscKind::Iso2022Cn => &[b"\x1B$)A", b"\x1B$)G", b"\x1B$*H", b"\x1B$)E"],
            EscKind::HzGb2312 => &[b"~{"],
        }
    }

    pub fn charset_name(&self) -> &'static str {
        match self {
            EscKind::Iso2022Jp => "ISO-2022-JP",
            EscKind::Iso2022Kr => "ISO-2022-KR",
            EscKind::Iso2022Cn => "ISO-2022-CN",
            EscKind::HzGb2312 => "HZ-GB-2312",
        }
    }

    pub fn language(&self) -> Language {
        match self {
            EscKind::Iso2022Jp => Language::Japanese,
            EscKind::Iso2022Kr => Language::Korean,
            EscKind::Iso2022Cn | EscKind::HzGb2312 => Language::Chinese,
        }
    }

    fn starter(&self) -> u8 {
        match self {
            EscKind::HzGb2312 => b'~',
            _ => 0x1B,
        }
    }
}

pub struct EscCharSetProber {
    kind: EscKind,
    partial: Vec<u8>,
    state: ProbingState,
}

impl EscCharSetProber {
    pub fn new(kind: EscKind) -> Self {
        EscCharSetProber {
            kind,
            partial: Vec::new(),
            state: ProbingState::Detecting,
        }
    }

    pub fn reset(&mut self) {
        self.partial.clear();
        self.state = ProbingState::Detecting;
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
        if self.state != ProbingState::Detecting {
            return self.state;
        }
        let sequences = self.kind.sequences();
        for &byte in buf {
            if self.partial.is_empty() {
                if byte == self.kind.starter() {
                    self.partial.push(byte);
                }
                continue;
            }
            self.partial.push(byte);
            if sequences.iter().any(|s| *s == self.partial.as_slice()) {
                self.state = ProbingState::FoundIt;
                return self.state;
            }
            if !sequences.iter().any(|s| s.starts_with(self.partial.as_slice())) {
                // Not a prefix of anything we recognize; allow the ASCII
                // byte that broke the match to re-start a fresh candidate.
                self.partial.clear();
                if byte == self.kind.starter() {
                    self.partial.push(byte);
                }
            }
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_iso2022jp_designator() {
        let mut p = EscCharSetProber::new(EscKind::Iso2022Jp);
        assert_eq!(p.feed(b"plain text \x1B$Bjis text\x1B(B"), ProbingState::FoundIt);
    }

    #[test]
    fn recognizes_hz_gb2312_designator() {
        let mut p = EscCharSetProber::new(EscKind::HzGb2312);
        assert_eq!(p.feed(b"before ~{ chinese ~} after"), ProbingState::FoundIt);
    }

    #[test]
    fn non_matching_escape_stays_detecting() {
        let mut p = EscCharSetProber::new(EscKind::Iso2022Kr);
        assert_eq!(p.feed(b"plain ascii only, no escapes here"), ProbingState::Detecting);
    }

    #[test]
    fn reset_clears_partial_match() {
        let mut p = EscCharSetProber::new(EscKind::Iso2022Jp);
        p.feed(b"\x1B$");
        assert_eq!(p.state(), ProbingState::Detecting);
        p.reset();
        assert!(p.partial.is_empty());
    }
}
