//! Domain layer for the Zalculator plugin.
//!
//! This module contains the core domain types for the calculator, independent
//! of Zellij-specific APIs or infrastructure concerns: the tagged accumulator,
//! the binary operator vocabulary, and the plugin error type.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`accumulator`]: The number-in-progress vs finalized-value accumulator
//! - [`operator`]: Binary operator ids and arithmetic

pub mod accumulator;
pub mod error;
pub mod operator;

pub use accumulator::{format_value, Accumulator};
pub use error::{Result, ZalcError};
pub use operator::Operator;
