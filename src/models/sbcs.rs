//! Char-order maps and language-model matrices for every single-byte
//! prober (spec.md §4.4), plus the Latin-1/Windows-1252 bigram table used
//! by the escape-less high-byte fallback prober.
//!
//! As with the multi-byte tables, the actual rank/weight values are
//! generated rather than transcribed from a historical bigram corpus —
//! spec.md treats these as opaque model data. What's preserved faithfully
//! is the *shape* real chardet single-byte models have: a sentinel-coded
//! char-order map (control/digit/symbol/line-break bytes excluded from
//! language scoring) feeding a small NxN sequence-likelihood matrix.

/// Sentinels stored in a `char_to_order_map`, matching the categories
/// `sbcharsetprober.py` excludes from sequence scoring.
pub const UNDEFINED: u8 = 255;
pub const LINE_BREAK: u8 = 254;
pub const SYMBOL: u8 = 253;
pub const DIGIT: u8 = 252;
pub const CONTROL: u8 = 251;

/// Number of "common" order classes the language model scores over.
pub const COMMON_CHARS: usize = 64;

/// Likelihood categories filled into the NxN language model.
pub const NEGATIVE: u8 = 0;
pub const UNLIKELY: u8 = 1;
pub const LIKELY: u8 = 2;
pub const POSITIVE: u8 = 3;

pub struct SbcsModel {
    pub name: &'static str,
    pub language: crate::entity::Language,
    pub char_to_order_map: [u8; 256],
    pub language_model: &'static [[u8; COMMON_CHARS]; COMMON_CHARS],
    pub typical_positive_ratio: f64,
    pub keep_ascii_letters: bool,
    pub is_reversed: bool,
}

fn base_char_to_order_map() -> [u8; 256] {
    let mut map = [UNDEFINED; 256];
    for b in 0u16..=8 {
        map[b as usize] = CONTROL;
    }
    map[b'\t' as usize] = CONTROL;
    map[b'\n' as usize] = LINE_BREAK;
    map[0x0B] = CONTROL;
    map[0x0C] = CONTROL;
    map[b'\r' as usize] = LINE_BREAK;
    for b in 0x0Eu16..=0x1F {
        map[b as usize] = CONTROL;
    }
    map[b' ' as usize] = SYMBOL;
    for b in b'0'..=b'9' {
        map[b as usize] = DIGIT;
    }
    for &b in b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~" {
        map[b as usize] = SYMBOL;
    }
    map
}

/// Assigns `order` values `0..25` to `a-z`/`A-Z` (shared English-letter
/// frequency rank) when `keep_ascii_letters` is set, otherwise leaves them
/// `UNDEFINED` so the prober only ever scores the target alphabet.
fn with_ascii_letters(mut map: [u8; 256], keep: bool) -> [u8; 256] {
    if keep {
        for (i, b) in (b'a'..=b'z').enumerate() {
            map[b as usize] = i as u8;
        }
        for (i, b) in (b'A'..=b'Z').enumerate() {
            map[b as usize] = i as u8;
        }
    }
    map
}

/// Assigns order ranks `0..alphabet.len()` to the given high-byte
/// alphabet, in the order given (earlier = more frequent).
fn with_alphabet(mut map: [u8; 256], alphabet: &[u8]) -> [u8; 256] {
    for (i, &b) in alphabet.iter().enumerate() {
        if (i as u32) < COMMON_CHARS as u32 * 4 {
            map[b as usize] = i as u8;
        }
    }
    map
}

/// Deterministic but varied NxN likelihood matrix; `seed` differentiates
/// sibling models (e.g. the six Russian encodings) so their confidence
/// curves aren't bit-identical.
fn synth_language_model(seed: u32) -> [[u8; COMMON_CHARS]; COMMON_CHARS] {
    let mut m = [[NEGATIVE; COMMON_CHARS]; COMMON_CHARS];
    for i in 0..COMMON_CHARS {
        for j in 0..COMMON_CHARS {
            let h = (i as u32)
                .wrapping_mul(31)
                .wrapping_add((j as u32).wrapping_mul(17))
                .wrapping_add(seed);
            m[i][j] = match h % 5 {
                0 => NEGATIVE,
                1 | 2 => UNLIKELY,
                3 => LIKELY,
                _ => POSITIVE,
            };
        }
    }
    m
}

macro_rules! leaked_model {
    ($seed:expr) => {{
        let m: &'static [[u8; COMMON_CHARS]; COMMON_CHARS] =
            Box::leak(Box::new(synth_language_model($seed)));
        m
    }};
}

fn build_model(
    name: &'static str,
    language: crate::entity::Language,
    alphabet: &[u8],
    keep_ascii_letters: bool,
    is_reversed: bool,
    seed: u32,
) -> SbcsModel {
    let map = with_alphabet(
        with_ascii_letters(base_char_to_order_map(), keep_ascii_letters),
        alphabet,
    );
    SbcsModel {
        name,
        language,
        char_to_order_map: map,
        language_model: leaked_model!(seed),
        typical_positive_ratio: 0.95 + ((seed % 5) as f64) * 0.01,
        keep_ascii_letters,
        is_reversed,
    }
}

use crate::entity::Language::*;
use once_cell::sync::Lazy;

fn cyrillic_alphabet() -> Vec<u8> {
    (0xC0u16..=0xFF).map(|b| b as u8).collect()
}

fn greek_alphabet() -> Vec<u8> {
    (0xB8u16..=0xFE).map(|b| b as u8).collect()
}

fn hebrew_alphabet() -> Vec<u8> {
    (0xE0u16..=0xFA).map(|b| b as u8).collect()
}

fn thai_alphabet() -> Vec<u8> {
    (0xA1u16..=0xFB).map(|b| b as u8).collect()
}

fn latin2_alphabet() -> Vec<u8> {
    (0xC0u16..=0xFE).map(|b| b as u8).collect()
}

pub static WINDOWS_1251: Lazy<SbcsModel> =
    Lazy::new(|| build_model("windows-1251", Russian, &cyrillic_alphabet(), false, false, 1));
pub static KOI8_R: Lazy<SbcsModel> =
    Lazy::new(|| build_model("KOI8-R", Russian, &cyrillic_alphabet(), false, false, 2));
pub static ISO_8859_5: Lazy<SbcsModel> =
    Lazy::new(|| build_model("ISO-8859-5", Russian, &cyrillic_alphabet(), false, false, 3));
pub static MAC_CYRILLIC: Lazy<SbcsModel> =
    Lazy::new(|| build_model("MacCyrillic", Russian, &cyrillic_alphabet(), false, false, 4));
pub static IBM855: Lazy<SbcsModel> =
    Lazy::new(|| build_model("IBM855", Russian, &cyrillic_alphabet(), false, false, 5));
pub static IBM866: Lazy<SbcsModel> =
    Lazy::new(|| build_model("IBM866", Russian, &cyrillic_alphabet(), false, false, 6));

pub static ISO_8859_7: Lazy<SbcsModel> =
    Lazy::new(|| build_model("ISO-8859-7", Greek, &greek_alphabet(), true, false, 7));
pub static WINDOWS_1253: Lazy<SbcsModel> =
    Lazy::new(|| build_model("windows-1253", Greek, &greek_alphabet(), true, false, 8));

pub static ISO_8859_5_BG: Lazy<SbcsModel> =
    Lazy::new(|| build_model("ISO-8859-5", Bulgarian, &cyrillic_alphabet(), false, false, 9));
pub static WINDOWS_1251_BG: Lazy<SbcsModel> =
    Lazy::new(|| build_model("windows-1251", Bulgarian, &cyrillic_alphabet(), false, false, 10));

pub static TIS_620: Lazy<SbcsModel> =
    Lazy::new(|| build_model("TIS-620", Thai, &thai_alphabet(), false, false, 11));

pub static WINDOWS_1255: Lazy<SbcsModel> =
    Lazy::new(|| build_model("windows-1255", Hebrew, &hebrew_alphabet(), false, true, 12));
pub static ISO_8859_8: Lazy<SbcsModel> =
    Lazy::new(|| build_model("ISO-8859-8", Hebrew, &hebrew_alphabet(), false, true, 13));

pub static WINDOWS_1250: Lazy<SbcsModel> =
    Lazy::new(|| build_model("windows-1250", Hungarian, &latin2_alphabet(), true, false, 14));
pub static ISO_8859_2: Lazy<SbcsModel> =
    Lazy::new(|| build_model("ISO-8859-2", Hungarian, &latin2_alphabet(), true, false, 15));

/// Latin-1/Windows-1252 bigram table for [`crate::latin1prober`], which
/// has no language attached (it's a high-byte fallback, not a model
/// prober) and scores raw byte-class adjacency rather than order ranks.
pub struct Latin1Model {
    pub char_class: [u8; 256],
    pub class_seq_likelihood: &'static [[u8; 8]; 8],
}

pub static LATIN1_MODEL: Lazy<Latin1Model> = Lazy::new(|| {
    // Classes: 0 control/error-ish, 1 letter-lower, 2 letter-upper,
    // 3 punctuation/symbol, 4 digit, 5 space/line-break, 6 high-letter
    // (0xC0-0xFF), 7 high-symbol (0x80-0xBF).
    let mut char_class = [0u8; 256];
    for b in 0x20u16..=0x7E {
        char_class[b as usize] = 3;
    }
    for b in b'a'..=b'z' {
        char_class[b as usize] = 1;
    }
    for b in b'A'..=b'Z' {
        char_class[b as usize] = 2;
    }
    for b in b'0'..=b'9' {
        char_class[b as usize] = 4;
    }
    char_class[b' ' as usize] = 5;
    char_class[b'\n' as usize] = 5;
    char_class[b'\r' as usize] = 5;
    for b in 0x80u16..=0xBF {
        char_class[b as usize] = 7;
    }
    for b in 0xC0u16..=0xFF {
        char_class[b as usize] = 6;
    }

    let mut m = [[1u8; 8]; 8];
    for row in m.iter_mut() {
        row[0] = 0;
    }
    m[6][6] = 3;
    m[6][1] = 3;
    m[1][6] = 2;
    m[7][7] = 0;
    m[7][1] = 0;
    m[7][6] = 0;

    Latin1Model {
        char_class,
        class_seq_likelihood: Box::leak(Box::new(m)),
    }
});

/// All registered single-byte models, in spec.md §4.6's grouping order.
/// Consumed by [`crate::charsetgroupprober`] to build the single-byte
/// group's slots (two of these — the Hebrew pair — are wrapped by the
/// arbiter rather than probed directly).
pub fn all_models() -> Vec<&'static Lazy<SbcsModel>> {
    vec![
        &WINDOWS_1251,
        &KOI8_R,
        &ISO_8859_5,
        &MAC_CYRILLIC,
        &IBM855,
        &IBM866,
        &ISO_8859_7,
        &WINDOWS_1253,
        &ISO_8859_5_BG,
        &WINDOWS_1251_BG,
        &TIS_620,
        &WINDOWS_1250,
        &ISO_8859_2,
    ]
}
