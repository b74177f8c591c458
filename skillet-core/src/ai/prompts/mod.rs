//! Prompt templates for the two relays.

pub mod extract;
pub mod generate;
