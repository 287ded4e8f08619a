//! Keccak-f\[25w\] sponge.
//!
//! Word sizes 8, 16, 32 and 64 select Keccak-f\[200\], \[400\], \[800\] and
//! \[1600\] respectively, with the standard round counts.

use super::{squeeze_with, SpongeEngine, SpongeState};
use zeroize::Zeroize;

/// Loads the 25 little-endian lanes, permutes them and stores them back.
macro_rules! permute_lanes {
    ($bytes:expr, $lane:ty, $permutation:path) => {{
        const WIDTH: usize = std::mem::size_of::<$lane>();
        let mut lanes = [<$lane>::default(); 25];
        for (lane, chunk) in lanes.iter_mut().zip($bytes.chunks_exact(WIDTH)) {
            let mut raw = [0u8; WIDTH];
            raw.copy_from_slice(chunk);
            *lane = <$lane>::from_le_bytes(raw);
        }
        $permutation(&mut lanes);
        for (lane, chunk) in lanes.iter().zip($bytes.chunks_exact_mut(WIDTH)) {
            chunk.copy_from_slice(&lane.to_le_bytes());
        }
        lanes.zeroize();
    }};
}

/// Sponge engine backed by the Keccak-f permutations.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeccakSponge;

impl KeccakSponge {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Applies the permutation matching the state's word size in place.
    pub fn permute(state: &mut SpongeState) {
        let word_size = state.spec().word_size;
        let bytes = state.as_bytes_mut();
        match word_size {
            8 => permute_lanes!(bytes, u8, keccak::f200),
            16 => permute_lanes!(bytes, u16, keccak::f400),
            32 => permute_lanes!(bytes, u32, keccak::f800),
            64 => permute_lanes!(bytes, u64, keccak::f1600),
            other => unreachable!("word size {other} passed Spec::check"),
        }
    }
}

impl SpongeEngine for KeccakSponge {
    fn squeeze(&self, state: &mut SpongeState, block: &mut [u8]) {
        squeeze_with(state, block, Self::permute);
    }
}
