//! Core library for the `warden` CLI.
//!
//! `warden` reads request files (JSON front matter, a `---` divider line,
//! then the literal request body), fires every request concurrently with a
//! per-request timeout, and checks each response body against the
//! request's regex assertions. The library holds the document parser, the
//! dispatch engine, the result formatter and the directory scanner; the
//! binary adds argument parsing, configuration and logging setup.
pub mod args;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod report;
pub mod request;
pub mod scan;
