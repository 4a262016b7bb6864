//! Group probers (spec.md §4.6): race a fixed set of sub-probers,
//! dropping losers as they self-exclude, and elect the max-confidence
//! survivor. Two instances are wired up: [`MbcsGroupProber`] for the
//! multi-byte encodings, [`SbcsGroupProber`] for the single-byte ones
//! (the latter also owns the Hebrew pair, arbitrated rather than raced
//! directly — see spec.md §9's non-owning-index design note: the two
//! Hebrew model probers live directly as this struct's `hebrew_logical`/
//! `hebrew_visual` fields rather than in the group's slot vector, so the
//! arbiter can be handed `&` references to both without aliasing a `Vec`
//! element and its owner simultaneously).

use crate::entity::{Language, LanguageFilter, ProbingState};
use crate::hebrewprober::HebrewArbiter;
use crate::mbcharsetprober::{MbCharSetProber, MbcsKind};
use crate::models::sbcs::{self, WINDOWS_1255, ISO_8859_8};
use crate::sbcharsetprober::SbCharSetProber;

/// Every multi-byte encoding the engine knows how to race, in spec.md
/// §4.6's registration order.
const ALL_MBCS_KINDS: [MbcsKind; 9] = [
    MbcsKind::Utf8,
    MbcsKind::ShiftJis,
    MbcsKind::EucJp,
    MbcsKind::Gb2312,
    MbcsKind::EucKr,
    MbcsKind::Cp949,
    MbcsKind::Big5,
    MbcsKind::EucTw,
    MbcsKind::Johab,
];

pub struct MbcsGroupProber {
    probers: Vec<MbCharSetProber>,
    active: Vec<bool>,
    num_active: usize,
    state: ProbingState,
    best_guess_idx: Option<usize>,
}

impl MbcsGroupProber {
    pub fn new(lang_filter: LanguageFilter) -> Self {
        let probers: Vec<MbCharSetProber> = ALL_MBCS_KINDS
            .iter()
            .filter(|k| k.language_class().intersects(lang_filter))
            .map(|&k| MbCharSetProber::new(k))
            .collect();
        let n = probers.len();
        MbcsGroupProber {
            probers,
            active: vec![true; n],
            num_active: n,
            state: if n == 0 { ProbingState::NotMe } else { ProbingState::Detecting },
            best_guess_idx: None,
        }
    }

    pub fn reset(&mut self) {
        for p in &mut self.probers {
            p.reset();
        }
        for a in &mut self.active {
            *a = true;
        }
        self.num_active = self.probers.len();
        self.state = if self.probers.is_empty() {
            ProbingState::NotMe
        } else {
            ProbingState::Detecting
        };
        self.best_guess_idx = None;
    }

    pub fn state(&self) -> ProbingState {
        self.state
    }

    pub fn feed(&mut self, buf: &[u8]) -> ProbingState {
        if self.state != ProbingState::Detecting {
            return self.state;
        }
        for i in 0..self.probers.len() {
            if !self.active[i] {
                continue;
            }
            match self.probers[i].feed(buf) {
                ProbingState::FoundIt => {
                    self.best_guess_idx = Some(i);
                    self.state = ProbingState::FoundIt;
                    return self.state;
                }
                ProbingState::NotMe => {
                    self.active[i] = false;
                    self.num_active -= 1;
                    if self.num_active == 0 {
                        self.state = ProbingState::NotMe;
                    }
                }
                ProbingState::Detecting => {}
            }
        }
        self.state
    }

    fn ensure_best_guess(&mut self) {
        if self.best_guess_idx.is_some() {
            return;
        }
        let mut best: Option<(usize, f64)> = None;
        for i in 0..self.probers.len() {
            if !self.active[i] {
                continue;
            }
            let conf = self.probers[i].get_confidence();
            match best {
                Some((_, b)) if conf <= b => {}
                _ => best = Some((i, conf)),
            }
        }
        self.best_guess_idx = best.map(|(i, _)| i);
    }

    /// Memoized once computed; only `reset()` clears the memo (spec.md
    /// §4.6). Later feeds still affect the chosen prober's own
    /// confidence, just never change *which* prober won.
    pub fn get_confidence(&mut self) -> f64 {
        self.ensure_best_guess();
        self.best_guess_idx.map_or(0.0, |i| self.probers[i].get_confidence())
    }

    pub fn charset_name(&mut self) -> Option<&'static str> {
        self.ensure_best_guess();
        self.best_guess_idx.map(|i| self.probers[i].charset_name())
    }

    pub fn language(&mut self) -> Option<Language> {
        self.ensure_best_guess();
        self.best_guess_idx.map(|i| self.probers[i].language())
    }
}

/// Every plain single-byte model the engine races directly (the Hebrew
/// pair is handled separately by the arbiter below), in spec.md §4.6's
/// registration order.
fn lang_class_for(language: Language) -> LanguageFilter {
    // Every single-byte script this engine models (Russian, Greek,
    // Bulgarian, Thai, Hungarian, Hebrew) is non-CJK.
    let _ = language;
    LanguageFilter::NON_CJK
}

pub struct SbcsGroupProber {
    probers: Vec<SbCharSetProber>,
    active: Vec<bool>,
    hebrew_logical: SbCharSetProber,
    hebrew_visual: SbCharSetProber,
    hebrew_arbiter: HebrewArbiter,
    hebrew_enabled: bool,
    hebrew_active: bool,
    num_active: usize,
    state: ProbingState,
    best_guess: Option<Winner>,
}

#[derive(Clone, Copy)]
enum Winner {
    Named(usize),
    Hebrew,
}

impl SbcsGroupProber {
    pub fn new(lang_filter: LanguageFilter) -> Self {
        let probers: Vec<SbCharSetProber> = sbcs::all_models()
            .into_iter()
            .filter(|m| lang_class_for(m.language).intersects(lang_filter))
            .map(|m| SbCharSetProber::new(m))
            .collect();
        let n = probers.len();
        let hebrew_enabled = LanguageFilter::NON_CJK.intersects(lang_filter);
        let mut num_active = n;
        if hebrew_enabled {
            num_active += 1;
        }
        SbcsGroupProber {
            probers,
            active: vec![true; n],
            hebrew_logical: SbCharSetProber::new(&WINDOWS_1255),
            hebrew_visual: SbCharSetProber::new(&ISO_8859_8),
            hebrew_arbiter: HebrewArbiter::new(),
            hebrew_enabled,
            hebrew_active: hebrew_enabled,
            num_active,
            state: if num_active == 0 { ProbingState::NotMe } else { ProbingState::Detecting },
            best_guess: None,
        }
    }

    pub fn reset(&mut self) {
        for p in &mut self.probers {
            p.reset();
        }
        for a in &mut self.active {
            *a = true;
        }
        self.hebrew_logical.reset();
        self.hebrew_visual.reset();
        self.hebrew_arbiter.reset();
        self.hebrew_active = self.hebrew_enabled;
        self.num_active = self.probers.len() + if self.hebrew_enabled { 1 } else { 0 };
        self.state = if self.num_active == 0 { ProbingState::NotMe } else { ProbingState::Detecting };
        self.best_guess = None;
    }

    pub fn state(&self) -> ProbingState {
        self.state
    }

    pub fn feed(&mut self, buf: &[u8]) -> ProbingState {
        if self.state != ProbingState::Detecting {
            return self.state;
        }
        for i in 0..self.probers.len() {
            if !self.active[i] {
                continue;
            }
            match self.probers[i].feed(buf) {
                ProbingState::FoundIt => {
                    self.best_guess = Some(Winner::Named(i));
                    self.state = ProbingState::FoundIt;
                    return self.state;
                }
                ProbingState::NotMe => {
                    self.active[i] = false;
                    self.num_active -= 1;
                    if self.num_active == 0 {
                        self.state = ProbingState::NotMe;
                    }
                }
                ProbingState::Detecting => {}
            }
        }

        if self.hebrew_active {
            self.hebrew_logical.feed(buf);
            self.hebrew_visual.feed(buf);
            self.hebrew_arbiter.feed(buf);
            if self.hebrew_arbiter.state(&self.hebrew_logical, &self.hebrew_visual) == ProbingState::NotMe {
                self.hebrew_active = false;
                self.num_active -= 1;
                if self.num_active == 0 {
                    self.state = ProbingState::NotMe;
                }
            }
        }

        self.state
    }

    fn ensure_best_guess(&mut self) {
        if self.best_guess.is_some() {
            return;
        }
        let mut best: Option<(Winner, f64)> = None;
        for i in 0..self.probers.len() {
            if !self.active[i] {
                continue;
            }
            let conf = self.probers[i].get_confidence();
            match best {
                Some((_, b)) if conf <= b => {}
                _ => best = Some((Winner::Named(i), conf)),
            }
        }
        if self.hebrew_active {
            let (_, conf) = self.hebrew_arbiter.pick_charset(&self.hebrew_logical, &self.hebrew_visual);
            match best {
                Some((_, b)) if conf <= b => {}
                _ => best = Some((Winner::Hebrew, conf)),
            }
        }
        self.best_guess = best.map(|(w, _)| w);
    }

    pub fn get_confidence(&mut self) -> f64 {
        self.ensure_best_guess();
        match self.best_guess {
            Some(Winner::Named(i)) => self.probers[i].get_confidence(),
            Some(Winner::Hebrew) => {
                self.hebrew_arbiter.pick_charset(&self.hebrew_logical, &self.hebrew_visual).1
            }
            None => 0.0,
        }
    }

    pub fn charset_name(&mut self) -> Option<&'static str> {
        self.ensure_best_guess();
        match self.best_guess {
            Some(Winner::Named(i)) => Some(self.probers[i].charset_name()),
            Some(Winner::Hebrew) => {
                Some(self.hebrew_arbiter.pick_charset(&self.hebrew_logical, &self.hebrew_visual).0)
            }
            None => None,
        }
    }

    pub fn language(&mut self) -> Option<Language> {
        self.ensure_best_guess();
        match self.best_guess {
            Some(Winner::Named(i)) => Some(self.probers[i].language()),
            Some(Winner::Hebrew) => Some(self.hebrew_arbiter.language()),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mbcs_group_excludes_invalid_utf8_but_keeps_others() {
        let mut g = MbcsGroupProber::new(LanguageFilter::ALL);
        g.feed(&[0xFF, 0xFE, 0xFD]);
        assert_ne!(g.state(), ProbingState::NotMe);
    }

    #[test]
    fn mbcs_group_all_not_me_when_every_candidate_fails() {
        let mut g = MbcsGroupProber::new(LanguageFilter::ALL);
        // 0xFF is illegal in every registered multi-byte grammar's lead
        // position except none (all treat high invalid bytes as error).
        for _ in 0..5 {
            g.feed(&[0xFF]);
        }
        assert_eq!(g.state(), ProbingState::NotMe);
    }

    #[test]
    fn mbcs_language_filter_excludes_japanese() {
        let g = MbcsGroupProber::new(LanguageFilter::ALL - LanguageFilter::JAPANESE);
        assert!(!g.probers.iter().any(|p| p.charset_name() == "Shift_JIS"));
    }

    #[test]
    fn sbcs_group_reports_detecting_on_empty_feed() {
        let mut g = SbcsGroupProber::new(LanguageFilter::ALL);
        assert_eq!(g.feed(b""), ProbingState::Detecting);
    }

    #[test]
    fn sbcs_group_empty_filter_is_not_me() {
        let g = SbcsGroupProber::new(LanguageFilter::empty());
        assert_eq!(g.state(), ProbingState::NotMe);
    }
}
