//! Sponge engines.
//!
//! The permutation is a collaborator, not something this crate implements:
//! [`SpongeEngine`] is the seam, [`KeccakSponge`] plugs in the Keccak-f
//! family from the `keccak` crate and [`MockSponge`] is a deterministic
//! stand-in for tests.

mod keccak;
mod mock;
mod state;

pub use keccak::KeccakSponge;
pub use mock::MockSponge;
pub use state::SpongeState;

use crate::spec::{Spec, ValidationError};
use zeroize::Zeroize;

/// Trait for sponge implementations.
pub trait SpongeEngine {
    /// Allocates a zeroed state for `spec`.
    ///
    /// Fails if `spec` breaks any parameter rule.
    fn initialize(&self, spec: &Spec) -> Result<SpongeState, ValidationError> {
        SpongeState::new(*spec)
    }

    /// Fills `block` with the next output, advancing `state`.
    ///
    /// Repeated calls without absorbing anything extend the same
    /// deterministic output stream.
    fn squeeze(&self, state: &mut SpongeState, block: &mut [u8]);

    /// Securely wipes `state`.
    fn destroy(&self, state: &mut SpongeState) {
        state.zeroize();
    }
}

/// Squeezes `block.len()` bytes out of `state`.
///
/// Each rate-sized chunk of the block is preceded by one call to `permute`.
/// When `block` is exactly one output block and the output size is not a
/// whole number of bytes, the unused high bits of the last byte are cleared.
pub fn squeeze_with<F>(state: &mut SpongeState, block: &mut [u8], mut permute: F)
where
    F: FnMut(&mut SpongeState),
{
    let rate = state.rate_bytes();
    for chunk in block.chunks_mut(rate) {
        permute(state);
        chunk.copy_from_slice(&state.as_bytes()[..chunk.len()]);
    }

    let spec = state.spec();
    let spare_bits = spec.output_size % 8;
    if spare_bits != 0 && Some(block.len()) == spec.output_bytes() {
        if let Some(last) = block.last_mut() {
            *last &= (1u8 << spare_bits) - 1;
        }
    }
}
