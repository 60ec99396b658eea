//! Command-line harness for Refapp ATS config documents.
//!
//! Stands in for the form UI: loads a config document from a file or a
//! built-in sample, validates it with `refapp-ats-fields`, and prints what a
//! renderer and a form submission would see.

pub mod cli;
pub mod commands;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod settings;
pub mod source;
