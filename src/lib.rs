//! Music-metadata API checks from the command line.
//!
//! This library backs the `tunecheck` binary, which bundles two small
//! utilities: a Spotify Web API access check (OAuth 2.0 authorization-code
//! flow with a local callback listener, refresh and client-credentials
//! fallbacks, plus a track-energy report) and a GetSongBPM tempo/key lookup.
//!
//! # Modules
//!
//! - `analysis` - Joining tracks with audio features, ranking and averaging
//! - `api` - HTTP endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Environment variables and `.env` handling
//! - `error` - The crate-wide error type
//! - `getsongbpm` - GetSongBPM API client
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod getsongbpm;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Waiting for authorization (timeout {}s)...", 120);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to provide positive feedback when an operation completes
/// successfully, e.g. after a finished OAuth exchange.
///
/// # Example
///
/// ```
/// success!("Authentication successful!");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Immediately terminates the process with exit code 1 after printing.
/// Reserved for unrecoverable failures such as missing configuration or the
/// exhaustion of every authentication fallback; recoverable stage failures
/// use `warning!` instead so the caller can degrade to the next path.
///
/// # Example
///
/// ```
/// error!("Missing configuration: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, most prominently for reporting a failed
/// authentication or fetch stage right before degrading to a fallback.
/// No caught failure is ever swallowed silently.
///
/// # Example
///
/// ```
/// warning!("Token refresh failed: {}. Trying the interactive flow...", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
