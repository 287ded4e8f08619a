//! Entropy source abstraction.
//!
//! A source is opened once per invocation and read until the sponge state
//! is full. Real sources are the random-byte device and the getrandom
//! syscall; [`MockEntropy`] replays fixed bytes for tests.

use super::SeedError;
use rand_core::{OsRng, RngCore};
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

/// Device read when no other path is configured.
///
/// Set `KRANDOM_URANDOM` at build time to change it.
pub const DEFAULT_ENTROPY_DEVICE: &str = match option_env!("KRANDOM_URANDOM") {
    Some(path) => path,
    None => "/dev/urandom",
};

/// Trait for entropy source implementations.
pub trait EntropySource {
    /// Opens the source for reading.
    fn open(&self) -> Result<Box<dyn Read>, SeedError>;

    /// Human-readable name used in diagnostics.
    fn name(&self) -> String;
}

/// A random-byte device (or any file) opened read-only.
#[derive(Debug, Clone)]
pub struct DeviceSource {
    path: PathBuf,
}

impl DeviceSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the device path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for DeviceSource {
    fn default() -> Self {
        Self::new(DEFAULT_ENTROPY_DEVICE)
    }
}

impl EntropySource for DeviceSource {
    fn open(&self) -> Result<Box<dyn Read>, SeedError> {
        let file = File::open(&self.path).map_err(|error| SeedError::SourceUnavailable {
            source_name: self.name(),
            error,
        })?;
        tracing::debug!(path = %self.path.display(), "Opened entropy device");
        Ok(Box::new(file))
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}

/// The operating system RNG (getrandom).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSource;

impl EntropySource for OsSource {
    fn open(&self) -> Result<Box<dyn Read>, SeedError> {
        Ok(Box::new(OsReader))
    }

    fn name(&self) -> String {
        "getrandom".to_owned()
    }
}

/// Adapts `OsRng` to `Read`; every read fills the whole buffer.
struct OsReader;

impl Read for OsReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        Ok(buf.len())
    }
}

/// Mock entropy source that replays fixed bytes.
///
/// Reads hand out at most `chunk_size` bytes at a time. Once the data is
/// exhausted the reader reports end-of-stream, or the configured error.
#[derive(Debug, Clone)]
pub struct MockEntropy {
    data: Vec<u8>,
    chunk_size: usize,
    failure: Option<io::ErrorKind>,
    available: bool,
}

impl MockEntropy {
    /// Creates a mock source over `data`.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            chunk_size: usize::MAX,
            failure: None,
            available: true,
        }
    }

    /// Limits every read to `chunk_size` bytes (at least 1).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Fails with `kind` instead of reporting end-of-stream.
    pub fn failing_with(mut self, kind: io::ErrorKind) -> Self {
        self.failure = Some(kind);
        self
    }

    /// A source that cannot be opened.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(Vec::new())
        }
    }
}

impl EntropySource for MockEntropy {
    fn open(&self) -> Result<Box<dyn Read>, SeedError> {
        if !self.available {
            return Err(SeedError::SourceUnavailable {
                source_name: self.name(),
                error: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        Ok(Box::new(MockReader {
            data: Cursor::new(self.data.clone()),
            chunk_size: self.chunk_size,
            failure: self.failure,
        }))
    }

    fn name(&self) -> String {
        "mock entropy".to_owned()
    }
}

struct MockReader {
    data: Cursor<Vec<u8>>,
    chunk_size: usize,
    failure: Option<io::ErrorKind>,
}

impl Read for MockReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let limit = buf.len().min(self.chunk_size);
        let n = self.data.read(&mut buf[..limit])?;
        match (n, self.failure) {
            (0, Some(kind)) if limit > 0 => Err(io::Error::from(kind)),
            _ => Ok(n),
        }
    }
}
