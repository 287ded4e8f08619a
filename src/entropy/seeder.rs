//! Sponge state seeding.

use super::EntropySource;
use crate::sponge::SpongeState;
use std::io::{self, Read};
use thiserror::Error;
use zeroize::Zeroizing;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("{source_name} contained less than {needed} bytes")]
    InsufficientEntropy { source_name: String, needed: usize },
    #[error("{source_name}: {error}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        error: io::Error,
    },
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Opens `source` and fills `state` from it.
pub fn seed(source: &dyn EntropySource, state: &mut SpongeState) -> Result<(), SeedError> {
    let mut reader = source.open()?;
    seed_from_reader(&mut reader, &source.name(), state)
}

/// Fills `state` with exactly `state.len()` bytes from `reader`.
///
/// Short reads are retried until the state is full. Bytes are collected in
/// a scratch buffer that is wiped afterwards; `state` is only written once
/// all of them have arrived, so a failed seed leaves it untouched.
pub fn seed_from_reader<R: Read + ?Sized>(
    reader: &mut R,
    source_name: &str,
    state: &mut SpongeState,
) -> Result<(), SeedError> {
    let needed = state.len();
    let mut buffer = Zeroizing::new(vec![0u8; needed]);
    let mut filled = 0;

    while filled < needed {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => {
                tracing::warn!(
                    source = source_name,
                    got = filled,
                    needed,
                    "Entropy source ended early"
                );
                return Err(SeedError::InsufficientEntropy {
                    source_name: source_name.to_owned(),
                    needed,
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(SeedError::Io(e)),
        }
    }

    state.as_bytes_mut().copy_from_slice(&buffer);

    tracing::debug!(source = source_name, bytes = needed, "Sponge state seeded");
    Ok(())
}
