//! Terminal UI components for the tally system.

pub mod styles;
pub mod terminal;
