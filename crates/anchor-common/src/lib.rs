//! Common utilities for the anchor positioning polyfill.
//!
//! This crate provides shared infrastructure used by all polyfill components:
//! - **Warning System** - deduplicated reports of unsupported CSS, routed
//!   through the [`log`] facade

pub mod warning;
