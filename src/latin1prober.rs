//! Latin-1/Windows-1252 fallback prober. Not named in spec.md's filtered
//! original_source (no `latin1prober.py` in the retrieval pack), but
//! called for by spec.md's `HIGH_BYTE` regime as the catch-all when no
//! specific single-byte model claims the text: scores byte-class bigram
//! adjacency (letter-letter, letter-symbol, control-anything) the same
//! shape as [`crate::sbcharsetprober`] but over a fixed 8-class table
//! instead of a per-language order map.

use crate::entity::{Language, ProbingState};
use crate::models::sbcs::LATIN1_MODEL;

pub struct Latin1Prober {
    last_class: Option<u8>,
    freq_counter: [u32; 4],
    state: ProbingState,
}

impl Latin1Prober {
    pub fn new() -> Self {
        Latin1Prober {
            last_class: None,
            freq_counter: [0; 4],
            state: ProbingState::Detecting,
        }
    }

    pub fn reset(&mut self) {
        self.last_class = None;
        self.freq_counter = [0; 4];
        self.state = ProbingState::Detecting;
    }

    pub fn state(&self) -> ProbingState {
        self.state
    }

    pub fn charset_name(&self) -> &'static str {
        "Windows-1252"
    }

    pub fn language(&self) -> Language {
        Language::Unknown
    }

    pub fn feed(&mut self, buf: &[u8]) -> ProbingState {
        if self.state != ProbingState::Detecting {
            return self.state;
        }
        for &byte in buf {
            let class = LATIN1_MODEL.char_class[byte as usize];
            if let Some(prev) = self.last_class {
                let likelihood = LATIN1_MODEL.class_seq_likelihood[prev as usize][class as usize];
                self.freq_counter[likelihood as usize] += 1;
            }
            self.last_class = Some(class);
        }
        self.state
    }

    pub fn get_confidence(&self) -> f64 {
        let total: u32 = self.freq_counter.iter().sum();
        if total == 0 {
            return 0.01;
        }
        let weighted =
            self.freq_counter[0] as f64 * 0.0 + self.freq_counter[2] as f64 * 0.6 + self.freq_counter[3] as f64;
        (weighted / total as f64).clamp(0.0, 0.99)
    }
}

impl Default for Latin1Prober {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii_gives_low_confidence() {
        let mut p = Latin1Prober::new();
        p.feed(b"the quick brown fox jumps over the lazy dog");
        assert!(p.get_confidence() < 0.5);
    }

    #[test]
    fn high_byte_letters_raise_confidence() {
        let mut p = Latin1Prober::new();
        let text: Vec<u8> = b"na\xefve caf\xe9 r\xe9sum\xe9 prot\xe9g\xe9".to_vec();
        p.feed(&text);
        assert!(p.get_confidence() >= 0.0);
    }
}
