//! Deterministic sponge for testing.

use super::{squeeze_with, SpongeEngine, SpongeState};
use std::cell::{Cell, RefCell};
use zeroize::Zeroize;

/// Mock sponge whose "permutation" increments the state as a little-endian
/// counter.
///
/// NOT a pseudorandom function: it exists so that stream tests can predict
/// every output byte. It also keeps a copy of each state it destroys, taken
/// after the wipe, so tests can check that nothing survived.
#[derive(Debug, Default)]
pub struct MockSponge {
    squeezes: Cell<u64>,
    destroyed: RefCell<Vec<Vec<u8>>>,
}

impl MockSponge {
    /// Creates a new mock engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the counter step to the whole state.
    pub fn permute(state: &mut SpongeState) {
        for byte in state.as_bytes_mut() {
            let (next, overflow) = byte.overflowing_add(1);
            *byte = next;
            if !overflow {
                break;
            }
        }
    }

    /// Number of squeeze calls so far.
    pub fn squeeze_count(&self) -> u64 {
        self.squeezes.get()
    }

    /// Post-wipe copies of every destroyed state, in order.
    pub fn destroyed_states(&self) -> Vec<Vec<u8>> {
        self.destroyed.borrow().clone()
    }
}

impl SpongeEngine for MockSponge {
    fn squeeze(&self, state: &mut SpongeState, block: &mut [u8]) {
        self.squeezes.set(self.squeezes.get() + 1);
        squeeze_with(state, block, Self::permute);
    }

    fn destroy(&self, state: &mut SpongeState) {
        state.zeroize();
        self.destroyed.borrow_mut().push(state.as_bytes().to_vec());
    }
}
