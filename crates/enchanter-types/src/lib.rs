//! Record types built on top of the canonical result.
//!
//! The core never stores anything; these are the values callers persist.

pub mod outputs;

pub use outputs::EnchantedResult;
