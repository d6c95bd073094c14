//! Terminal prompts

pub mod terminal;
