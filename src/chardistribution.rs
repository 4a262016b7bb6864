//! Distribution analyzer (spec.md §4.2): scores a multi-byte prober's
//! candidate text by how often its 2-byte characters land in the
//! encoding's frequency-order table, rather than validating structure
//! (the coding state machine's job).

use crate::consts::{
    DISTRIBUTION_ENOUGH_DATA_THRESHOLD, MINIMUM_DATA_THRESHOLD, SURE_NO, SURE_YES,
};
use crate::models::mbcs_freq::{DistributionModel, UNDEFINED_ORDER};

pub struct DistributionAnalyzer {
    model: &'static DistributionModel,
    total_chars: u32,
    freq_chars: u32,
    done: bool,
}

impl DistributionAnalyzer {
    pub fn new(model: &'static DistributionModel) -> Self {
        DistributionAnalyzer {
            model,
            total_chars: 0,
            freq_chars: 0,
            done: false,
        }
    }

    pub fn reset(&mut self) {
        self.total_chars = 0;
        self.freq_chars = 0;
        self.done = false;
    }

    /// Feed one validated multi-byte character. `char_len == 2` is the
    /// only length this table scores; longer/shorter chars (and bytes
    /// whose rank falls outside the table) never move either counter.
    pub fn feed(&mut self, first_byte: u8, char_len: u8) {
        if self.done || char_len != 2 {
            return;
        }
        let order = self.model.char_to_freq_order[first_byte as usize];
        if order == UNDEFINED_ORDER || (order as u32) >= self.model.table_size {
            return;
        }
        self.total_chars += 1;
        if (order as u32) < 512 {
            self.freq_chars += 1;
        }
    }

    pub fn got_enough_data(&self) -> bool {
        self.total_chars > DISTRIBUTION_ENOUGH_DATA_THRESHOLD
    }

    pub fn get_confidence(&self) -> f64 {
        if self.total_chars == 0 || self.freq_chars <= MINIMUM_DATA_THRESHOLD {
            return SURE_NO;
        }
        if self.freq_chars != self.total_chars {
            let r = self.freq_chars as f64
                / ((self.total_chars - self.freq_chars) as f64 * self.model.typical_distribution_ratio);
            if r < SURE_YES {
                return r;
            }
        }
        SURE_YES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mbcs_freq::utf8_distribution;

    #[test]
    fn no_data_is_sure_no() {
        let model: &'static _ = Box::leak(Box::new(utf8_distribution()));
        let analyzer = DistributionAnalyzer::new(model);
        assert_eq!(analyzer.get_confidence(), SURE_NO);
    }

    #[test]
    fn frequent_chars_raise_confidence() {
        let model: &'static _ = Box::leak(Box::new(utf8_distribution()));
        let mut analyzer = DistributionAnalyzer::new(model);
        for _ in 0..50 {
            analyzer.feed(0xC2, 2);
        }
        assert!(analyzer.get_confidence() > SURE_NO);
    }

    #[test]
    fn enough_data_threshold() {
        let model: &'static _ = Box::leak(Box::new(utf8_distribution()));
        let mut analyzer = DistributionAnalyzer::new(model);
        assert!(!analyzer.got_enough_data());
        for _ in 0..2000 {
            analyzer.feed(0xC2, 2);
        }
        assert!(analyzer.got_enough_data());
    }
}
