//! Application layer: state, event handling, actions, and modes.

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{DisplayMode, OpEmphasis};
pub use state::{CalcState, DigitKey};
