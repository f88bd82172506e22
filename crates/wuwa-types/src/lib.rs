//! Foundation types shared by every launcher crate.
//!
//! Error taxonomy, platform-agnostic input events and the window geometry
//! value types persisted in the preferences document. No I/O lives here.

pub mod error;
pub mod geometry;
pub mod input;
