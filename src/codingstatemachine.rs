//! Generic table-driven DFA that validates one encoding's byte grammar one
//! byte at a time, per spec.md §3's coding model and §4.1's state machine.
//!
//! A [`CodingStateMachineModel`] is the "opaque model data" spec.md §1
//! calls out as out of scope for hand-derivation: `class_table` buckets
//! each of the 256 byte values into a small alphabet, `state_table` is the
//! transition matrix (`row = state * class_factor + class`), and
//! `char_len_table` records how many bytes a complete code point in a
//! given starting class takes. The machinery that interprets those tables
//! is the part this module actually implements.

use crate::consts::ERROR_CLASS;

/// Raw DFA state values doubling as `state_table` row indices. Any value
/// `>= PENDING_BASE` is a model-specific "still accumulating a multi-byte
/// char" state; the machine doesn't need to know what it means, only that
/// it isn't one of the three named sentinels.
pub const STATE_START: u8 = 0;
pub const STATE_ERROR: u8 = 1;
pub const STATE_ITS_ME: u8 = 2;
pub const PENDING_BASE: u8 = 3;

/// Classification of a DFA transition, handed back to the prober that owns
/// this state machine. `Pending` collapses every intermediate state into
/// one case — the prober only needs to know whether to keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    Start,
    Pending,
    Error,
    ItsMe,
}

fn classify(raw: u8) -> MachineState {
    match raw {
        STATE_START => MachineState::Start,
        STATE_ERROR => MachineState::Error,
        STATE_ITS_ME => MachineState::ItsMe,
        _ => MachineState::Pending,
    }
}

/// Static per-encoding DFA description. `state_table` must have at least
/// `class_factor * (highest state value + 1)` entries.
pub struct CodingStateMachineModel {
    pub name: &'static str,
    pub class_table: [u8; 256],
    pub class_factor: u32,
    pub state_table: &'static [u8],
    pub char_len_table: &'static [u8],
}

/// Runtime cursor over a [`CodingStateMachineModel`]. Cheap to construct;
/// probers keep one per encoding variant they validate.
pub struct CodingStateMachine {
    model: &'static CodingStateMachineModel,
    curr_state: u8,
    curr_byte_pos: u32,
    curr_char_len: u8,
}

impl CodingStateMachine {
    pub fn new(model: &'static CodingStateMachineModel) -> Self {
        CodingStateMachine {
            model,
            curr_state: STATE_START,
            curr_byte_pos: 0,
            curr_char_len: 0,
        }
    }

    pub fn reset(&mut self) {
        self.curr_state = STATE_START;
        self.curr_byte_pos = 0;
        self.curr_char_len = 0;
    }

    pub fn name(&self) -> &'static str {
        self.model.name
    }

    /// Number of bytes into the current (possibly still incomplete)
    /// character, not counting the byte just fed.
    pub fn current_byte_pos(&self) -> u32 {
        self.curr_byte_pos
    }

    /// Length, in bytes, of the character currently being validated, set
    /// the moment the machine leaves `START`.
    pub fn current_char_len(&self) -> u8 {
        self.curr_char_len
    }

    /// Feed one byte and return the new classification. `ERROR` and
    /// `ITS_ME` are absorbing until [`Self::reset`] is called.
    pub fn next_state(&mut self, byte: u8) -> MachineState {
        if self.curr_state == STATE_ERROR || self.curr_state == STATE_ITS_ME {
            return classify(self.curr_state);
        }

        let cls = self.model.class_table[byte as usize];
        if cls == ERROR_CLASS {
            self.curr_state = STATE_ERROR;
            return MachineState::Error;
        }

        if self.curr_state == STATE_START {
            self.curr_byte_pos = 0;
            self.curr_char_len = self.model.char_len_table[cls as usize];
        }

        let idx = self.curr_state as u32 * self.model.class_factor + cls as u32;
        self.curr_state = self.model.state_table[idx as usize];
        self.curr_byte_pos += 1;
        classify(self.curr_state)
    }
}

/// Builds a two-class (ASCII vs. "everything else relevant to this
/// encoding") model: the common shape of every double-byte encoding in
/// this crate except UTF-8, whose grammar is irregular enough to need its
/// own hand-written table (see [`crate::models::mbcs_sm::utf8_model`]).
///
/// `dbcs_ranges` is read both as "byte that can start a 2-byte char" and
/// "byte that can complete one" — the same class reinterpreted by
/// `state_table` row depending on whether the machine is at `START` or
/// mid-character, which is exactly how real double-byte grammars overlap
/// lead and trail ranges. `ascii_is_valid_trail` additionally allows a
/// plain ASCII byte to complete a pending character (true only for
/// Shift_JIS, whose trail bytes include `0x40..=0x7E`).
pub fn build_two_class_model(
    name: &'static str,
    dbcs_ranges: &[std::ops::RangeInclusive<u8>],
    ascii_is_valid_trail: bool,
) -> CodingStateMachineModel {
    let mut class_table = [ERROR_CLASS; 256];
    for b in 0x00u16..=0x7F {
        class_table[b as usize] = 0;
    }
    for range in dbcs_ranges {
        for b in range.clone() {
            class_table[b as usize] = 1;
        }
    }

    let pending_trail_next = if ascii_is_valid_trail {
        STATE_START
    } else {
        STATE_ERROR
    };

    // Rows for states START(0), ERROR(1, unused), ITS_ME(2, unused),
    // PENDING(3), two columns each (class 0, class 1).
    let state_table: &'static [u8] = Box::leak(Box::new([
        STATE_START, PENDING_BASE, // row 0: START
        STATE_ERROR, STATE_ERROR, // row 1: ERROR (absorbing, unread)
        STATE_ITS_ME, STATE_ITS_ME, // row 2: ITS_ME (absorbing, unread)
        pending_trail_next, STATE_START, // row 3: PENDING
    ]));
    let char_len_table: &'static [u8] = &[1, 2];

    CodingStateMachineModel {
        name,
        class_table,
        class_factor: 2,
        state_table,
        char_len_table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii_only_model() -> CodingStateMachineModel {
        build_two_class_model("test-ascii", &[0xA1..=0xFE], false)
    }

    #[test]
    fn plain_ascii_stays_start() {
        let model: &'static _ = Box::leak(Box::new(ascii_only_model()));
        let mut sm = CodingStateMachine::new(model);
        for b in b"hello" {
            assert_eq!(sm.next_state(*b), MachineState::Start);
        }
    }

    #[test]
    fn two_byte_char_completes() {
        let model: &'static _ = Box::leak(Box::new(ascii_only_model()));
        let mut sm = CodingStateMachine::new(model);
        assert_eq!(sm.next_state(0xA1), MachineState::Pending);
        assert_eq!(sm.current_char_len(), 2);
        assert_eq!(sm.next_state(0xA2), MachineState::Start);
    }

    #[test]
    fn truncated_trail_errors() {
        let model: &'static _ = Box::leak(Box::new(ascii_only_model()));
        let mut sm = CodingStateMachine::new(model);
        assert_eq!(sm.next_state(0xA1), MachineState::Pending);
        assert_eq!(sm.next_state(b'a'), MachineState::Error);
    }

    #[test]
    fn error_is_absorbing_until_reset() {
        let model: &'static _ = Box::leak(Box::new(ascii_only_model()));
        let mut sm = CodingStateMachine::new(model);
        sm.next_state(0xA1);
        sm.next_state(b'a');
        assert_eq!(sm.next_state(b'x'), MachineState::Error);
        sm.reset();
        assert_eq!(sm.next_state(b'x'), MachineState::Start);
    }
}
