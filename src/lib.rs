//! krandom
//!
//! A pseudorandom byte stream generator built on the Keccak sponge. The
//! sponge state is seeded once from the operating system and then squeezed
//! block after block into an output sink until the consumer disconnects.
//!
//! # Architecture
//!
//! ```text
//! GeneralizedSpec → spec::resolve → Spec
//!                                    ↓
//!      entropy source → seed → StreamDriver → squeeze → sink
//!                                    ↓
//!                            destroy (wipe state)
//! ```
//!
//! # Design Principles
//!
//! - **One stream per run**: no reseeding, no rekeying
//! - **Permutation is pluggable**: [`sponge::SpongeEngine`] is the seam;
//!   the Keccak-f permutations come from the `keccak` crate
//! - **Always wipe**: the sponge state is zeroized on every exit path
//! - **Disconnect is success**: a broken pipe ends the stream normally
//!
//! # Example
//!
//! ```no_run
//! use krandom::{
//!     diagnostics::Diagnostics,
//!     entropy::DeviceSource,
//!     pipeline::generate,
//!     spec::GeneralizedSpec,
//!     sponge::KeccakSponge,
//! };
//!
//! let gspec = GeneralizedSpec {
//!     capacity: Some(512),
//!     ..Default::default()
//! };
//! let mut diagnostics = Diagnostics::stderr("krandom").verbose(true);
//! let stdout = std::io::stdout();
//!
//! let stats = generate(
//!     &gspec,
//!     &KeccakSponge::new(),
//!     &DeviceSource::default(),
//!     &mut stdout.lock(),
//!     &mut diagnostics,
//! )?;
//! eprintln!("wrote {} blocks", stats.blocks);
//! # Ok::<(), krandom::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod entropy;
pub mod error;
pub mod pipeline;
pub mod spec;
pub mod sponge;
pub mod stream;

// Re-export commonly used types at crate root
pub use diagnostics::Diagnostics;
pub use entropy::{DeviceSource, EntropySource, MockEntropy, OsSource, SeedError};
pub use error::{Error, Result};
pub use pipeline::generate;
pub use spec::{resolve, GeneralizedSpec, Spec, ValidationError};
pub use sponge::{KeccakSponge, MockSponge, SpongeEngine, SpongeState};
pub use stream::{StreamDriver, StreamError, StreamPhase, StreamStats};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
