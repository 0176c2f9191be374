//! Command-line interface implementations.
//!
//! Each subcommand lives in its own file and follows the same propagation
//! policy: the library layer raises typed [`crate::error::ApiError`]s, and
//! the commands here catch at each stage boundary, report the failure, and
//! degrade to the next fallback. Only missing configuration (and the
//! exhaustion of every fallback) terminates the process.
//!
//! - [`check`] - Verify Spotify API access and print a track-energy report
//! - [`bpm`] - Look up BPM and key for a track via GetSongBPM

mod bpm;
mod check;

pub use bpm::bpm;
pub use check::check;
