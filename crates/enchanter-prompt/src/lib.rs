//! Instruction texts for the Enchanter SDK.
//!
//! * [`modes`] – the mode catalog (`instruction_for`).
//! * [`contract`] – per-adapter output-format reminders.
//! * [`builder`] – the fluent markdown builder both are written with.

pub mod builder;
pub mod contract;
pub mod modes;

pub use contract::instruction_with_contract;
pub use modes::instruction_for;
