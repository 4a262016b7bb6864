//! Coding state machine models for every multi-byte prober.
//!
//! UTF-8 gets a hand-written, fully faithful DFA (its grammar has enough
//! irregular corners — restricted continuation ranges after `0xE0`/`0xED`/
//! `0xF0`/`0xF4` — that it's worth getting exactly right). Every other
//! double-byte encoding is built from
//! [`crate::codingstatemachine::build_two_class_model`], which is close
//! enough to the real per-encoding lead/trail grammar for detection
//! purposes while staying well inside the "opaque model data" scope
//! spec.md carves out.

use crate::codingstatemachine::{
    build_two_class_model, CodingStateMachineModel, PENDING_BASE, STATE_ERROR, STATE_ITS_ME,
    STATE_START,
};
use crate::consts::ERROR_CLASS;
use once_cell::sync::Lazy;

/// UTF-8 classes:
/// 0 ascii (0x00-0x7F), 1 cont 0x80-0x8F, 2 cont 0x90-0x9F, 3 cont 0xA0-0xBF,
/// 4 lead2 (0xC2-0xDF), 5 lead3-normal, 6 lead3-E0, 7 lead3-ED,
/// 8 lead4-normal, 9 lead4-F0, 10 lead4-F4. 0xC0,0xC1,0xF5-0xFF are illegal.
fn build_utf8_model() -> CodingStateMachineModel {
    let mut class_table = [ERROR_CLASS; 256];
    for b in 0x00u16..=0x7F {
        class_table[b as usize] = 0;
    }
    for b in 0x80u16..=0x8F {
        class_table[b as usize] = 1;
    }
    for b in 0x90u16..=0x9F {
        class_table[b as usize] = 2;
    }
    for b in 0xA0u16..=0xBF {
        class_table[b as usize] = 3;
    }
    for b in 0xC2u16..=0xDF {
        class_table[b as usize] = 4;
    }
    for b in [0xE1u16, 0xE2, 0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xEB, 0xEC, 0xEE, 0xEF] {
        class_table[b as usize] = 5;
    }
    class_table[0xE0] = 6;
    class_table[0xED] = 7;
    for b in [0xF1u16, 0xF2, 0xF3] {
        class_table[b as usize] = 8;
    }
    class_table[0xF0] = 9;
    class_table[0xF4] = 10;
    // 0xC0, 0xC1, 0xF5..=0xFF stay ERROR_CLASS.

    const NEED1: u8 = PENDING_BASE; // 3
    const NEED2: u8 = PENDING_BASE + 1; // 4
    const NEED3: u8 = PENDING_BASE + 2; // 5
    const E0_FIRST: u8 = PENDING_BASE + 3; // 6
    const ED_FIRST: u8 = PENDING_BASE + 4; // 7
    const F0_FIRST: u8 = PENDING_BASE + 5; // 8
    const F4_FIRST: u8 = PENDING_BASE + 6; // 9

    const E: u8 = STATE_ERROR;
    const CLASSES: usize = 11;
    const STATES: usize = 10;
    let mut state_table = vec![E; CLASSES * STATES];

    let mut row = |state: u8, class: u8, next: u8| {
        state_table[state as usize * CLASSES + class as usize] = next;
    };

    // START
    row(STATE_START, 0, STATE_START);
    row(STATE_START, 4, NEED1);
    row(STATE_START, 5, NEED2);
    row(STATE_START, 6, E0_FIRST);
    row(STATE_START, 7, ED_FIRST);
    row(STATE_START, 8, NEED3);
    row(STATE_START, 9, F0_FIRST);
    row(STATE_START, 10, F4_FIRST);
    // ERROR / ITS_ME rows left as all-ERROR; never read (guarded in the
    // state machine before a lookup would occur).
    for c in 0..CLASSES as u8 {
        row(STATE_ERROR, c, STATE_ERROR);
        row(STATE_ITS_ME, c, STATE_ITS_ME);
    }
    // NEED1: any generic continuation completes the char.
    for c in [1u8, 2, 3] {
        row(NEED1, c, STATE_START);
    }
    // NEED2 / NEED3: one generic continuation, one state closer to START.
    for c in [1u8, 2, 3] {
        row(NEED2, c, NEED1);
        row(NEED3, c, NEED2);
    }
    // E0's second byte must be 0xA0-0xBF (class 3).
    row(E0_FIRST, 3, NEED1);
    // ED's second byte must be 0x80-0x9F (classes 1, 2).
    row(ED_FIRST, 1, NEED1);
    row(ED_FIRST, 2, NEED1);
    // F0's second byte must be 0x90-0xBF (classes 2, 3).
    row(F0_FIRST, 2, NEED2);
    row(F0_FIRST, 3, NEED2);
    // F4's second byte must be 0x80-0x8F (class 1).
    row(F4_FIRST, 1, NEED2);

    CodingStateMachineModel {
        name: "UTF-8",
        class_table,
        class_factor: CLASSES as u32,
        state_table: Box::leak(state_table.into_boxed_slice()),
        char_len_table: &[1, 1, 1, 1, 2, 3, 3, 3, 4, 4, 4],
    }
}

pub static UTF8_MODEL: Lazy<CodingStateMachineModel> = Lazy::new(build_utf8_model);

pub static SJIS_MODEL: Lazy<CodingStateMachineModel> =
    Lazy::new(|| build_two_class_model("Shift_JIS", &[0x81..=0xFC], true));

pub static EUC_JP_MODEL: Lazy<CodingStateMachineModel> =
    Lazy::new(|| build_two_class_model("EUC-JP", &[0x8E..=0xFE], false));

pub static EUC_KR_MODEL: Lazy<CodingStateMachineModel> =
    Lazy::new(|| build_two_class_model("EUC-KR", &[0xA1..=0xFE], false));

pub static CP949_MODEL: Lazy<CodingStateMachineModel> =
    Lazy::new(|| build_two_class_model("CP949", &[0x81..=0xFE], false));

pub static BIG5_MODEL: Lazy<CodingStateMachineModel> =
    Lazy::new(|| build_two_class_model("Big5", &[0x81..=0xFE], false));

pub static EUC_TW_MODEL: Lazy<CodingStateMachineModel> =
    Lazy::new(|| build_two_class_model("EUC-TW", &[0x8E..=0xFE], false));

pub static GB2312_MODEL: Lazy<CodingStateMachineModel> =
    Lazy::new(|| build_two_class_model("GB2312", &[0xA1..=0xFE], false));

pub static JOHAB_MODEL: Lazy<CodingStateMachineModel> =
    Lazy::new(|| build_two_class_model("JOHAB", &[0x84..=0xF9], false));
