//! charset-detector-rs
//! ===================
//!
//! A universal charset detector in pure Rust, built on the same
//! architecture as the Python `chardet`/`cchardet` family: per-encoding
//! coding state machines validate byte structure, distribution and
//! sequence analyzers score character frequency, group probers race
//! same-family candidates to a verdict, and a top-level coordinator
//! reconciles BOM sniffing, escape sequences, and high-byte statistics
//! into one best guess.
//!
//! This crate does not transcode text, validate already-known
//! encodings, or perform exact natural-language identification — see
//! each module's documentation for what it does cover.
//!
//! # Library
//!
//! The entry points are [`detect`] and [`detect_with_filter`] for a
//! single-shot guess over a complete byte slice, and
//! [`UniversalDetector`] for streaming input across multiple `feed`
//! calls before calling `close`.
//!
//! ## Example
//!
//! ```rust
//! use charset_detector_rs::detect;
//!
//! let result = detect(b"Hello, world!");
//! assert_eq!(result.encoding.as_deref(), Some("ascii"));
//! ```
//!
//! # CLI tool
//!
//! A binary CLI tool, `charsetdetect`, is included behind the `cli`
//! feature. It mirrors the shape of Python's `chardetect`: point it at
//! one or more files and it prints its best guess for each.

pub mod chardistribution;
pub mod charsetgroupprober;
pub mod codingstatemachine;
pub mod consts;
pub mod entity;
pub mod escprober;
pub mod filters;
pub mod hebrewprober;
pub mod jpcntx;
pub mod latin1prober;
pub mod mbcharsetprober;
pub mod models;
pub mod sbcharsetprober;
pub mod universaldetector;
pub mod utf1632prober;

pub use entity::{DetectionResult, DetectorSettings, Language, LanguageFilter};
pub use universaldetector::{detect, detect_path, detect_with_filter, UniversalDetector};
