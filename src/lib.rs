//! Check that a database accepts connections
//!
//! The library exposes [`probe::ConnectionProbe`], which performs one
//! connect, validate and release cycle and reports a
//! [`probe::ConnectionOutcome`]. The `dbprobe` binary wraps it with flag,
//! environment and DSN configuration, reporting and exit codes.

pub mod check;
pub mod cli;
pub mod envfile;
pub mod probe;
pub mod tls;
