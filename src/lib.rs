//! Resolution of installable SDK build versions from artifact registry listings.
//!
//! - [`version`]: version extraction and registry resolution
//! - [`config`]: configuration file and path handling
//! - [`logging`]: tracing subscriber setup
//! - [`cli`]: command handlers used by the `sdk-resolver` binary

pub mod cli;
pub mod config;
pub mod logging;
pub mod version;
