//! Command-line front end of the cloud proxy application.
//!
//! The ICAP rebuild service launches the application with `-f <file id>`,
//! `-i <input path>` and `-o <output path>`. This crate maps those switches to
//! configuration keys and binds their values.

pub mod args;
pub mod config;
pub mod logging;
