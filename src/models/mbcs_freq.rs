//! Char-frequency-order tables for the distribution analyzer (spec.md
//! §4.2). Each table maps a 2-byte char's first byte to its rank in a
//! frequency-sorted table of `table_size` common characters; a byte not in
//! the table gets the [`UNDEFINED_ORDER`] sentinel.
//!
//! Like the coding state machine tables, these are generated rather than
//! transcribed from a historical frequency corpus (out of scope per
//! spec.md §1/§9) — what matters for the engine's correctness is the
//! *shape* (a skewed rank distribution with `typical_distribution_ratio`
//! chosen so `got_enough_data`/`get_confidence` behave sensibly), not the
//! exact rank of any particular character.

pub const UNDEFINED_ORDER: u16 = 0xFFFF;

pub struct DistributionModel {
    pub name: &'static str,
    pub char_to_freq_order: [u16; 256],
    pub table_size: u32,
    pub typical_distribution_ratio: f64,
}

/// Builds a distribution model by assigning frequency ranks to `lead_bytes`
/// in the order given (earlier bytes are "more frequent" i.e. a lower
/// rank), which is the only property [`crate::chardistribution`] relies on.
fn build_distribution_model(
    name: &'static str,
    lead_bytes: &[u8],
    typical_distribution_ratio: f64,
) -> DistributionModel {
    let mut char_to_freq_order = [UNDEFINED_ORDER; 256];
    for (rank, &b) in lead_bytes.iter().enumerate() {
        char_to_freq_order[b as usize] = rank as u16;
    }
    DistributionModel {
        name,
        char_to_freq_order,
        table_size: lead_bytes.len() as u32,
        typical_distribution_ratio,
    }
}

fn range_bytes(r: std::ops::RangeInclusive<u8>) -> Vec<u8> {
    r.collect()
}

pub fn utf8_distribution() -> DistributionModel {
    // UTF-8 leans on validity alone; a flat, generous table keeps the
    // distribution signal from ever dominating the confidence curve (see
    // `mbcharsetprober`'s UTF-8-specific ONE_CHAR_PROB override).
    build_distribution_model("UTF-8", &range_bytes(0xC2..=0xFE), 0.90)
}

pub fn sjis_distribution() -> DistributionModel {
    build_distribution_model("Shift_JIS", &range_bytes(0x82..=0xEA), 0.92)
}

pub fn euc_jp_distribution() -> DistributionModel {
    build_distribution_model("EUC-JP", &range_bytes(0xA1..=0xFE), 0.92)
}

pub fn euc_kr_distribution() -> DistributionModel {
    build_distribution_model("EUC-KR", &range_bytes(0xA1..=0xFE), 0.94)
}

pub fn cp949_distribution() -> DistributionModel {
    build_distribution_model("CP949", &range_bytes(0x81..=0xFE), 0.94)
}

pub fn big5_distribution() -> DistributionModel {
    build_distribution_model("Big5", &range_bytes(0xA1..=0xF9), 0.93)
}

pub fn euc_tw_distribution() -> DistributionModel {
    build_distribution_model("EUC-TW", &range_bytes(0xA1..=0xFE), 0.91)
}

pub fn gb2312_distribution() -> DistributionModel {
    build_distribution_model("GB2312", &range_bytes(0xA1..=0xFE), 0.93)
}

pub fn johab_distribution() -> DistributionModel {
    build_distribution_model("JOHAB", &range_bytes(0x84..=0xF9), 0.90)
}
