//! Crate-level error type and exit codes.

use crate::config::ConfigError;
use crate::entropy::SeedError;
use crate::spec::ValidationError;
use crate::stream::StreamError;
use thiserror::Error;

/// Exit code for malformed invocations and invalid parameters.
pub const EXIT_USAGE: u8 = 1;

/// Exit code for entropy and output failures.
pub const EXIT_IO: u8 = 2;

/// Any failure that ends an invocation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(_) | Error::Validation(_) => EXIT_USAGE,
            Error::Seed(_) | Error::Stream(_) => EXIT_IO,
        }
    }
}

/// Result alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;
