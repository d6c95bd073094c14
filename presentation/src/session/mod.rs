//! Front-ends driving the session controller

pub mod oneshot;
pub mod presenter;
pub mod repl;
