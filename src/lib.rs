//! `td-scrape` library crate.
//!
//! The binary (`td`) is a thin wrapper around this library so that:
//!
//! - parsing and assembly are testable without spawning processes
//! - the HTTP layer can be pointed at a local server in tests

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod parse;
pub mod report;
