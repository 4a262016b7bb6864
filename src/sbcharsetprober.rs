//! Single-byte prober (spec.md §4.4): scores text by how often
//! consecutive high-byte "order ranks" land in the model's likely/
//! positive buckets, after running the shared filters so only
//! alphabetic/international runs are scored.

use crate::consts::{SB_ENOUGH_REL_THRESHOLD, SB_NEGATIVE_SHORTCUT_THRESHOLD, SB_POSITIVE_SHORTCUT_THRESHOLD, SB_SAMPLE_SIZE};
use crate::entity::{Language, ProbingState};
use crate::filters::{filter_international_words, filter_with_english_letters};
use crate::models::sbcs::{SbcsModel, CONTROL, COMMON_CHARS, POSITIVE, UNDEFINED};

pub struct SbCharSetProber {
    model: &'static SbcsModel,
    last_order: u8,
    total_seqs: u32,
    seq_counters: [u32; 4],
    total_char: u32,
    freq_char: u32,
    state: ProbingState,
}

impl SbCharSetProber {
    pub fn new(model: &'static SbcsModel) -> Self {
        SbCharSetProber {
            model,
            last_order: UNDEFINED,
            total_seqs: 0,
            seq_counters: [0; 4],
            total_char: 0,
            freq_char: 0,
            state: ProbingState::Detecting,
        }
    }

    pub fn reset(&mut self) {
        self.last_order = UNDEFINED;
        self.total_seqs = 0;
        self.seq_counters = [0; 4];
        self.total_char = 0;
        self.freq_char = 0;
        self.state = ProbingState::Detecting;
    }

    pub fn state(&self) -> ProbingState {
        self.state
    }

    pub fn charset_name(&self) -> &'static str {
        self.model.name
    }

    pub fn language(&self) -> Language {
        self.model.language
    }

    pub fn feed(&mut self, buf: &[u8]) -> ProbingState {
        if self.state == ProbingState::NotMe || self.state == ProbingState::FoundIt {
            return self.state;
        }

        // spec.md §4.4: conditionally strip to international-only runs
        // first, then always run the looser English-letter filter on top.
        // Either stage returning empty keeps the current state rather
        // than scoring a blank buffer.
        let stage1 = if self.model.keep_ascii_letters {
            buf.to_vec()
        } else {
            filter_international_words(buf)
        };
        if stage1.is_empty() {
            return self.state;
        }
        let filtered = filter_with_english_letters(&stage1);
        if filtered.is_empty() {
            return self.state;
        }

        for &byte in &filtered {
            self.total_char += 1;
            let order = self.model.char_to_order_map[byte as usize];
            if (order as u16) < CONTROL as u16 {
                self.freq_char += 1;
            }
            let prev = self.last_order;
            if (prev as usize) < COMMON_CHARS && (order as usize) < COMMON_CHARS {
                self.total_seqs += 1;
                let cat = if self.model.is_reversed {
                    self.model.language_model[order as usize][prev as usize]
                } else {
                    self.model.language_model[prev as usize][order as usize]
                };
                self.seq_counters[cat as usize] += 1;
            }
            self.last_order = order;
        }

        if self.total_seqs > SB_ENOUGH_REL_THRESHOLD {
            let conf = self.get_confidence();
            if conf >= SB_POSITIVE_SHORTCUT_THRESHOLD {
                self.state = ProbingState::FoundIt;
            } else if conf <= SB_NEGATIVE_SHORTCUT_THRESHOLD {
                self.state = ProbingState::NotMe;
            }
        }

        self.state
    }

    /// `r = (seq_counters[POSITIVE] / total_seqs) / typical_positive_ratio`,
    /// scaled by how far `total_seqs` is into its first `SAMPLE_SIZE`
    /// sequences (spec.md §4.4), clamped to the usual `[0.01, 0.99]` band.
    pub fn get_confidence(&self) -> f64 {
        if self.total_seqs == 0 {
            return 0.01;
        }
        let positive = self.seq_counters[POSITIVE as usize] as f64;
        let r = (positive / self.total_seqs as f64) / self.model.typical_positive_ratio;
        let scale = (self.total_seqs as f64 / SB_SAMPLE_SIZE as f64).min(1.0);
        (r * scale).clamp(0.01, 0.99)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sbcs::WINDOWS_1251;

    #[test]
    fn pure_ascii_never_errors() {
        let mut p = SbCharSetProber::new(&WINDOWS_1251);
        assert_eq!(p.feed(b"hello world, this is plain text"), ProbingState::Detecting);
    }

    #[test]
    fn high_byte_text_accumulates_sequences() {
        let mut p = SbCharSetProber::new(&WINDOWS_1251);
        let cyrillic_like: Vec<u8> = (0..200).map(|i| 0xC0 + (i % 48) as u8).collect();
        p.feed(&cyrillic_like);
        assert!(p.get_confidence() >= 0.0);
    }

    #[test]
    fn reset_clears_counters() {
        let mut p = SbCharSetProber::new(&WINDOWS_1251);
        p.feed(&[0xC0; 50]);
        p.reset();
        assert_eq!(p.get_confidence(), 0.01);
    }
}
