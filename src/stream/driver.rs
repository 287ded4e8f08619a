//! Squeeze/write loop.
//!
//! The driver owns the sponge state for its whole life and moves through
//! an explicit set of phases:
//!
//! ```text
//! Uninitialized --seed--> Seeded --run--> Streaming --+--> Closed  (consumer gone)
//!       |                                             +--> Failed  (write error)
//!       +--seed error--> Failed
//! ```
//!
//! `Closed` and `Failed` are terminal and wipe the state through the engine.

use crate::entropy::{self, EntropySource, SeedError};
use crate::spec::{Spec, ValidationError};
use crate::sponge::{SpongeEngine, SpongeState};
use std::io::{self, Write};
use thiserror::Error;
use zeroize::Zeroizing;

/// Errors that end a stream abnormally.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("{0}")]
    Write(#[source] io::Error),
    #[error("the sponge state was not seeded before streaming")]
    Unseeded,
    #[error("cannot allocate memory for a {bits}-bit output block")]
    BlockAllocation { bits: i64 },
}

/// Lifecycle phase of a [`StreamDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    /// State allocated, not yet seeded.
    Uninitialized,
    /// State fully seeded.
    Seeded,
    /// Inside the squeeze/write loop.
    Streaming,
    /// The consumer disconnected. Normal termination.
    Closed,
    /// Seeding or writing failed.
    Failed,
}

impl StreamPhase {
    /// Returns true for `Closed` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, StreamPhase::Closed | StreamPhase::Failed)
    }
}

/// Output counters for one stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Blocks written in full.
    pub blocks: u64,
    /// Bytes written in full blocks.
    pub bytes: u64,
}

/// Drives one sponge from seeding to termination.
pub struct StreamDriver<'e, E: SpongeEngine + ?Sized> {
    engine: &'e E,
    state: SpongeState,
    phase: StreamPhase,
    destroyed: bool,
    stats: StreamStats,
}

impl<'e, E: SpongeEngine + ?Sized> StreamDriver<'e, E> {
    /// Allocates the sponge state for `spec`.
    pub fn new(engine: &'e E, spec: &Spec) -> Result<Self, ValidationError> {
        Ok(Self {
            engine,
            state: engine.initialize(spec)?,
            phase: StreamPhase::Uninitialized,
            destroyed: false,
            stats: StreamStats::default(),
        })
    }

    /// Returns the current phase.
    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// Returns counters for the blocks written so far.
    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    /// Returns the sponge state.
    pub fn state(&self) -> &SpongeState {
        &self.state
    }

    /// Seeds the state from `source`.
    ///
    /// On failure the driver becomes `Failed` and the state is destroyed.
    pub fn seed(&mut self, source: &dyn EntropySource) -> Result<(), SeedError> {
        if self.phase != StreamPhase::Uninitialized {
            tracing::warn!(phase = ?self.phase, "Ignoring repeated seed request");
            return Ok(());
        }
        match entropy::seed(source, &mut self.state) {
            Ok(()) => {
                self.phase = StreamPhase::Seeded;
                Ok(())
            }
            Err(e) => {
                self.finish(StreamPhase::Failed);
                Err(e)
            }
        }
    }

    /// Squeezes blocks into `sink` until it stops accepting them.
    ///
    /// A broken pipe is the normal way out and returns the final counters.
    /// Any other write error is returned as [`StreamError::Write`], and an
    /// output block too large to allocate as [`StreamError::BlockAllocation`].
    /// Either way the state is destroyed before returning.
    pub fn run<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<StreamStats, StreamError> {
        if self.phase != StreamPhase::Seeded {
            return Err(StreamError::Unseeded);
        }
        self.phase = StreamPhase::Streaming;

        let Some(mut block) = self.state.spec().output_bytes().and_then(zeroed_block) else {
            let bits = self.state.spec().output_size;
            self.finish(StreamPhase::Failed);
            tracing::warn!(output_size = bits, "Cannot allocate output block");
            return Err(StreamError::BlockAllocation { bits });
        };
        let block_len = block.len();
        tracing::info!(block_len, "Streaming started");

        loop {
            self.engine.squeeze(&mut self.state, &mut block);
            match sink.write_all(&block) {
                Ok(()) => {
                    self.stats.blocks += 1;
                    self.stats.bytes += block_len as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    self.finish(StreamPhase::Closed);
                    tracing::info!(
                        blocks = self.stats.blocks,
                        bytes = self.stats.bytes,
                        "Output consumer disconnected"
                    );
                    return Ok(self.stats);
                }
                Err(e) => {
                    self.finish(StreamPhase::Failed);
                    tracing::warn!(
                        blocks = self.stats.blocks,
                        error = %e,
                        "Stream failed"
                    );
                    return Err(StreamError::Write(e));
                }
            }
        }
    }

    fn finish(&mut self, phase: StreamPhase) {
        self.phase = phase;
        self.destroy_state();
    }

    fn destroy_state(&mut self) {
        if !self.destroyed {
            self.engine.destroy(&mut self.state);
            self.destroyed = true;
        }
    }
}

/// Allocates a zeroed block, or `None` if the allocator refuses.
fn zeroed_block(len: usize) -> Option<Zeroizing<Vec<u8>>> {
    let mut block = Vec::new();
    block.try_reserve_exact(len).ok()?;
    block.resize(len, 0);
    Some(Zeroizing::new(block))
}

impl<E: SpongeEngine + ?Sized> Drop for StreamDriver<'_, E> {
    fn drop(&mut self) {
        self.destroy_state();
    }
}

impl<E: SpongeEngine + ?Sized> std::fmt::Debug for StreamDriver<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamDriver")
            .field("phase", &self.phase)
            .field("stats", &self.stats)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
