//! Static, opaque "model data" per spec.md §1 and §9: DFA tables for the
//! multi-byte probers, char-frequency-order tables for the distribution
//! analyzer, and char-order/language-model matrices for the single-byte
//! probers. Every table here is generated by the constructors below rather
//! than transcribed from a historical corpus — spec.md explicitly scopes
//! exact table values out of the ≈1500-line core ("treated as opaque
//! read-only model data supplied by build-time generation").

pub mod mbcs_freq;
pub mod mbcs_sm;
pub mod sbcs;
