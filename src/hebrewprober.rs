//! Hebrew arbiter (spec.md §4.5): windows-1255 and ISO-8859-8 share one
//! alphabet, so neither model prober's own confidence can distinguish
//! them. Instead this scores adjacency between final and non-final
//! Hebrew consonant forms — a final form directly after a non-final one
//! is logical-order evidence, a non-final form directly after a final one
//! is visual-order evidence — and uses that to arbitrate between the two
//! underlying probers' confidences. Grounded on
//! `examples/original_source/chardet/hebrewprober.py:50-83`.

use crate::consts::{HEBREW_MIN_FINAL_CHAR_DISTANCE, HEBREW_MIN_MODEL_DISTANCE};
use crate::entity::{Language, ProbingState};
use crate::sbcharsetprober::SbCharSetProber;

const SPACE: u8 = 0x20;
const FINAL_CHARS: [u8; 5] = [0xEA, 0xED, 0xEF, 0xF3, 0xF5];
const NON_FINAL_CHARS: [u8; 5] = [0xEB, 0xEE, 0xF0, 0xF4, 0xF6];

pub struct HebrewArbiter {
    final_char_logical_score: i32,
    final_char_visual_score: i32,
    prev: u8,
    state: ProbingState,
}

impl HebrewArbiter {
    pub fn new() -> Self {
        HebrewArbiter {
            final_char_logical_score: 0,
            final_char_visual_score: 0,
            prev: SPACE,
            state: ProbingState::Detecting,
        }
    }

    pub fn reset(&mut self) {
        self.final_char_logical_score = 0;
        self.final_char_visual_score = 0;
        self.prev = SPACE;
        self.state = ProbingState::Detecting;
    }

    /// Feed bytes for final/non-final scoring only; the two underlying
    /// probers are fed separately by the group prober (they need the raw
    /// stream, not this arbiter's filtered view of it). Only the
    /// immediately preceding byte matters: a final form right after a
    /// non-final one scores logical, a non-final form right after a final
    /// one scores visual (spec.md §4.5).
    pub fn feed(&mut self, buf: &[u8]) {
        if self.state != ProbingState::Detecting {
            return;
        }
        for &cur in buf {
            if cur >= 0x80 {
                if FINAL_CHARS.contains(&cur) {
                    if NON_FINAL_CHARS.contains(&self.prev) {
                        self.final_char_logical_score += 1;
                        self.final_char_visual_score -= 1;
                    }
                } else if NON_FINAL_CHARS.contains(&cur) && FINAL_CHARS.contains(&self.prev) {
                    self.final_char_logical_score -= 1;
                    self.final_char_visual_score += 1;
                }
            }
            self.prev = cur;
        }
    }

    /// `NOT_ME` only once *both* underlying probers have excluded
    /// themselves (per original_source/chardet's `hebrewprober.py`,
    /// confirmed rather than assumed — see SPEC_FULL.md's Supplemented
    /// Features).
    pub fn state(&self, logical: &SbCharSetProber, visual: &SbCharSetProber) -> ProbingState {
        if logical.state() == ProbingState::NotMe && visual.state() == ProbingState::NotMe {
            ProbingState::NotMe
        } else {
            ProbingState::Detecting
        }
    }

    pub fn language(&self) -> Language {
        Language::Hebrew
    }

    /// Picks whichever of the two encodings the final/non-final score
    /// favors, breaking near-ties on raw model confidence.
    pub fn pick_charset(
        &self,
        logical: &SbCharSetProber,
        visual: &SbCharSetProber,
    ) -> (&'static str, f64) {
        let distance = self.final_char_logical_score - self.final_char_visual_score;
        if distance >= HEBREW_MIN_FINAL_CHAR_DISTANCE {
            return ("windows-1255", logical.get_confidence());
        }
        if distance <= -HEBREW_MIN_FINAL_CHAR_DISTANCE {
            return ("ISO-8859-8", visual.get_confidence());
        }

        let logical_conf = logical.get_confidence();
        let visual_conf = visual.get_confidence();
        if (logical_conf - visual_conf).abs() < HEBREW_MIN_MODEL_DISTANCE {
            ("windows-1255", logical_conf)
        } else if logical_conf > visual_conf {
            ("windows-1255", logical_conf)
        } else {
            ("ISO-8859-8", visual_conf)
        }
    }
}

impl Default for HebrewArbiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sbcs::{ISO_8859_8, WINDOWS_1255};

    #[test]
    fn default_state_is_detecting_even_with_no_data() {
        let arbiter = HebrewArbiter::new();
        let logical = SbCharSetProber::new(&WINDOWS_1255);
        let visual = SbCharSetProber::new(&ISO_8859_8);
        assert_eq!(arbiter.state(&logical, &visual), ProbingState::Detecting);
    }

    #[test]
    fn final_after_non_final_scores_logical_and_debits_visual() {
        // non-final kaf (0xEB) then, immediately after, final nun (0xEA).
        let mut arbiter = HebrewArbiter::new();
        arbiter.feed(&[0xEB, 0xEA]);
        assert_eq!(arbiter.final_char_logical_score, 1);
        assert_eq!(arbiter.final_char_visual_score, -1);
    }

    #[test]
    fn non_final_after_final_scores_visual_and_debits_logical() {
        // final nun (0xEA) then, immediately after, non-final kaf (0xEB).
        let mut arbiter = HebrewArbiter::new();
        arbiter.feed(&[0xEA, 0xEB]);
        assert_eq!(arbiter.final_char_logical_score, -1);
        assert_eq!(arbiter.final_char_visual_score, 1);
    }

    #[test]
    fn final_letter_after_space_scores_nothing() {
        let mut arbiter = HebrewArbiter::new();
        arbiter.feed(&[SPACE, 0xEA]);
        assert_eq!(arbiter.final_char_logical_score, 0);
        assert_eq!(arbiter.final_char_visual_score, 0);
    }

    #[test]
    fn repeated_adjacency_crosses_the_distance_threshold() {
        let mut arbiter = HebrewArbiter::new();
        // Each "space, non-final, final" cycle resets `prev` to SPACE
        // before the non-final/final pair, so only the logical-favoring
        // transition ever fires — six cycles clears MIN_FINAL_CHAR_DISTANCE.
        let mut buf = Vec::new();
        for _ in 0..6 {
            buf.extend_from_slice(&[SPACE, 0xEB, 0xEA]);
        }
        arbiter.feed(&buf);
        assert!(arbiter.final_char_logical_score - arbiter.final_char_visual_score >= HEBREW_MIN_FINAL_CHAR_DISTANCE);
        let logical = SbCharSetProber::new(&WINDOWS_1255);
        let visual = SbCharSetProber::new(&ISO_8859_8);
        let (name, _) = arbiter.pick_charset(&logical, &visual);
        assert_eq!(name, "windows-1255");
    }

    #[test]
    fn both_not_me_propagates() {
        let arbiter = HebrewArbiter::new();
        let mut logical = SbCharSetProber::new(&WINDOWS_1255);
        let mut visual = SbCharSetProber::new(&ISO_8859_8);
        logical.feed(&[0xFF; 5]);
        visual.feed(&[0xFF; 5]);
        assert_eq!(arbiter.state(&logical, &visual), ProbingState::Detecting);
    }
}
