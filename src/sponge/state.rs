//! Sponge state buffer.

use crate::spec::{Spec, ValidationError};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The raw state of a sponge: `state_size / 8` bytes.
///
/// Lanes are stored little-endian, lane `i` at bytes
/// `i * word_size / 8 ..`. The buffer is zeroed when allocated and wiped
/// again when dropped. It cannot be cloned.
pub struct SpongeState {
    bytes: Vec<u8>,
    spec: Spec,
}

impl SpongeState {
    /// Allocates a zeroed state for `spec`.
    ///
    /// The spec is checked first, so every state carries a word size with a
    /// matching permutation.
    pub fn new(spec: Spec) -> Result<Self, ValidationError> {
        spec.check()?;
        Ok(Self {
            bytes: vec![0u8; spec.state_bytes()],
            spec,
        })
    }

    /// Returns the spec this state was allocated for.
    #[inline]
    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    /// Returns the state bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the state bytes mutably.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Returns the state length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the state has no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the rate portion of the state in bytes.
    #[inline]
    pub fn rate_bytes(&self) -> usize {
        self.spec.rate_bytes()
    }

    /// Returns true if every byte of the state is zero.
    pub fn is_wiped(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }
}

impl Zeroize for SpongeState {
    /// Overwrites the state with zeros, keeping its length.
    fn zeroize(&mut self) {
        self.bytes.as_mut_slice().zeroize();
    }
}

impl Drop for SpongeState {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl ZeroizeOnDrop for SpongeState {}

impl std::fmt::Debug for SpongeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpongeState")
            .field("spec", &self.spec)
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{resolve, GeneralizedSpec};

    #[test]
    fn test_new_state_is_zeroed_and_sized() {
        let spec = resolve(&GeneralizedSpec::default()).unwrap();
        let state = SpongeState::new(spec).unwrap();
        assert_eq!(state.len(), 200);
        assert_eq!(state.rate_bytes(), 128);
        assert!(state.is_wiped());
    }

    #[test]
    fn test_zeroize_keeps_length() {
        let spec = resolve(&GeneralizedSpec {
            word_size: Some(8),
            ..Default::default()
        })
        .unwrap();
        let mut state = SpongeState::new(spec).unwrap();
        state.as_bytes_mut().fill(0xA5);
        assert!(!state.is_wiped());

        state.zeroize();
        assert_eq!(state.len(), 25);
        assert!(state.is_wiped());
    }

    #[test]
    fn test_debug_hides_contents() {
        let spec = resolve(&GeneralizedSpec::default()).unwrap();
        let mut state = SpongeState::new(spec).unwrap();
        state.as_bytes_mut()[0] = 0xEE;
        let rendered = format!("{state:?}");
        assert!(!rendered.contains("238"));
        assert!(rendered.contains("len: 200"));
    }

    #[test]
    fn test_unchecked_spec_rejected() {
        let spec = Spec {
            bitrate: 64,
            capacity: 36,
            output_size: 64,
            state_size: 100,
            word_size: 4,
        };
        assert_eq!(
            SpongeState::new(spec).unwrap_err(),
            ValidationError::WordMod8
        );
    }
}
