//! OS entropy and sponge seeding.
//!
//! The sponge state is seeded exactly once, before any output, with
//! `state_size / 8` bytes read from an [`EntropySource`].

mod seeder;
mod source;

pub use seeder::{seed, seed_from_reader, SeedError};
pub use source::{DeviceSource, EntropySource, MockEntropy, OsSource, DEFAULT_ENTROPY_DEVICE};
