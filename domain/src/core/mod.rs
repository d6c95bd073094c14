//! Core domain concepts shared across all subdomains.
//!
//! - [`task::Task`] - the natural-language task a plan is generated for
//! - [`string::truncate`] - UTF-8 safe truncation for display

pub mod string;
pub mod task;
