//! Errors surfaced by the command-line driver.
//!
//! The filtering library itself is total over `u64` input and never fails;
//! only turning command-line text into candidates can.

use std::io;
use std::num::ParseIntError;

use thiserror::Error;

/// Result type alias for the driver.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// No candidates on the command line.
    #[error("Usage: batch_sieve <n1> <n2> ...")]
    Usage,

    /// Argument is not an unsigned decimal integer (strict mode only).
    #[error("invalid candidate {arg:?}: {source}")]
    Parse {
        arg: String,
        #[source]
        source: ParseIntError,
    },

    /// Writing verdicts to stdout failed (closed pipe, full disk, …).
    #[error("failed to write results: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    pub fn parse(arg: impl Into<String>, source: ParseIntError) -> Self {
        Self::Parse { arg: arg.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::Usage;
        assert!(format!("{err}").starts_with("Usage:"));

        let source = "12x".parse::<u64>().unwrap_err();
        let err = CliError::parse("12x", source);
        let msg = format!("{err}");
        assert!(msg.contains("\"12x\""));
        assert!(msg.contains("invalid digit"));
    }
}
