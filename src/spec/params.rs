//! Generalized and concrete sponge specifications.
//!
//! # Resolution order
//!
//! Supplied fields are validated first, in the order state size, word size,
//! capacity, rate, output size. A supplied word size fixes the state size.
//! Missing fields are then inferred:
//!
//! | rate | capacity | inferred |
//! |------|----------|----------|
//! | unset | unset | rate and capacity split the state (default 1600) so that the default output is a third of it |
//! | unset | set | rate = state − capacity |
//! | set | unset | capacity = state − rate |
//! | set | set | state = rate + capacity |
//!
//! Whenever capacity was supplied or derived from a supplied rate, the
//! default output size is half the capacity (but at least 8 bits).
//! The inferred [`Spec`] is finally run through [`Spec::check`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest supported state size in bits (Keccak-f\[1600\]).
pub const MAX_STATE_SIZE: i64 = 1600;

/// Largest supported lane width in bits.
pub const MAX_WORD_SIZE: i64 = 64;

/// Number of lanes in a Keccak state.
pub const LANES: i64 = 25;

/// A violated parameter rule.
///
/// Exactly one rule is reported per failed resolution: the first one hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("the state size must be positive")]
    StateNonPositive,
    #[error("the state size is too large, may not exceed 1600")]
    StateTooLarge,
    #[error("the state size must be a multiple of 25")]
    StateMod25,
    #[error("the word size must be positive")]
    WordNonPositive,
    #[error("the word size is too large, may not exceed 64")]
    WordTooLarge,
    #[error("the state size must be exactly 25 times the word size")]
    StateWordIncoherent,
    #[error("the capacity must be positive")]
    CapacityNonPositive,
    #[error("the capacity must be a multiple of 8")]
    CapacityMod8,
    #[error("the rate must be positive")]
    BitrateNonPositive,
    #[error("the rate must be a multiple of 8")]
    BitrateMod8,
    #[error("the output size must be positive")]
    OutputNonPositive,
    #[error("the word size must be a power of 2")]
    WordNotPowerOfTwo,
    #[error("the word size must be a multiple of 8")]
    WordMod8,
    #[error("the state size must equal the rate plus the capacity")]
    StateRateCapacityIncoherent,
}

/// A partially specified parameter set. `None` means "infer this".
///
/// All sizes are in bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralizedSpec {
    /// Rate (bitrate).
    #[serde(rename = "rate")]
    pub bitrate: Option<i64>,
    /// Capacity.
    pub capacity: Option<i64>,
    /// Output block size.
    pub output_size: Option<i64>,
    /// Total state size.
    pub state_size: Option<i64>,
    /// Lane width.
    pub word_size: Option<i64>,
}

impl GeneralizedSpec {
    /// Merges two partial specs; every field set in `other` wins.
    pub fn overridden_by(&self, other: &GeneralizedSpec) -> GeneralizedSpec {
        GeneralizedSpec {
            bitrate: other.bitrate.or(self.bitrate),
            capacity: other.capacity.or(self.capacity),
            output_size: other.output_size.or(self.output_size),
            state_size: other.state_size.or(self.state_size),
            word_size: other.word_size.or(self.word_size),
        }
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == GeneralizedSpec::default()
    }
}

/// A fully determined, consistent sponge specification.
///
/// Values produced by [`resolve`] always satisfy [`Spec::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spec {
    /// Rate in bits.
    pub bitrate: i64,
    /// Capacity in bits.
    pub capacity: i64,
    /// Output block size in bits.
    pub output_size: i64,
    /// State size in bits.
    pub state_size: i64,
    /// Lane width in bits.
    pub word_size: i64,
}

impl Spec {
    /// Checks every invariant of a concrete spec.
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.bitrate <= 0 {
            return Err(ValidationError::BitrateNonPositive);
        }
        if self.bitrate % 8 != 0 {
            return Err(ValidationError::BitrateMod8);
        }
        if self.capacity <= 0 {
            return Err(ValidationError::CapacityNonPositive);
        }
        if self.capacity % 8 != 0 {
            return Err(ValidationError::CapacityMod8);
        }
        if self.output_size <= 0 {
            return Err(ValidationError::OutputNonPositive);
        }
        if self.state_size <= 0 {
            return Err(ValidationError::StateNonPositive);
        }
        if self.state_size > MAX_STATE_SIZE {
            return Err(ValidationError::StateTooLarge);
        }
        if self.state_size % LANES != 0 {
            return Err(ValidationError::StateMod25);
        }
        if self.word_size % 8 != 0 {
            return Err(ValidationError::WordMod8);
        }
        if self.word_size <= 0 || !(self.word_size as u64).is_power_of_two() {
            return Err(ValidationError::WordNotPowerOfTwo);
        }
        if self.word_size > MAX_WORD_SIZE {
            return Err(ValidationError::WordTooLarge);
        }
        if self.state_size != self.word_size * LANES {
            return Err(ValidationError::StateWordIncoherent);
        }
        if self.state_size != self.bitrate.saturating_add(self.capacity) {
            return Err(ValidationError::StateRateCapacityIncoherent);
        }
        Ok(())
    }

    /// Length in bytes of one output block, `ceil(output_size / 8)`.
    ///
    /// `None` when the output size is negative or the block would not be
    /// addressable on this platform.
    #[inline]
    pub fn output_bytes(&self) -> Option<usize> {
        usize::try_from(self.output_size)
            .ok()
            .map(|bits| bits.div_ceil(8))
    }

    /// Length in bytes of the sponge state.
    #[inline]
    pub fn state_bytes(&self) -> usize {
        (self.state_size / 8) as usize
    }

    /// Length in bytes of the rate portion of the state.
    #[inline]
    pub fn rate_bytes(&self) -> usize {
        (self.bitrate / 8) as usize
    }
}

/// Resolves a partial spec into a concrete one.
///
/// See the module documentation for the inference order.
pub fn resolve(gspec: &GeneralizedSpec) -> Result<Spec, ValidationError> {
    let mut state_size = gspec.state_size;

    if let Some(state) = state_size {
        if state <= 0 {
            return Err(ValidationError::StateNonPositive);
        }
        if state > MAX_STATE_SIZE {
            return Err(ValidationError::StateTooLarge);
        }
        if state % LANES != 0 {
            return Err(ValidationError::StateMod25);
        }
    }

    if let Some(word) = gspec.word_size {
        if word <= 0 {
            return Err(ValidationError::WordNonPositive);
        }
        if word > MAX_WORD_SIZE {
            return Err(ValidationError::WordTooLarge);
        }
        match state_size {
            Some(state) if state != word * LANES => {
                return Err(ValidationError::StateWordIncoherent);
            }
            Some(_) => {}
            None => state_size = Some(word * LANES),
        }
    }

    if let Some(capacity) = gspec.capacity {
        if capacity <= 0 {
            return Err(ValidationError::CapacityNonPositive);
        }
        if capacity % 8 != 0 {
            return Err(ValidationError::CapacityMod8);
        }
    }

    if let Some(bitrate) = gspec.bitrate {
        if bitrate <= 0 {
            return Err(ValidationError::BitrateNonPositive);
        }
        if bitrate % 8 != 0 {
            return Err(ValidationError::BitrateMod8);
        }
    }

    if let Some(output) = gspec.output_size {
        if output <= 0 {
            return Err(ValidationError::OutputNonPositive);
        }
    }

    let (bitrate, capacity, state_size) = match (gspec.bitrate, gspec.capacity) {
        (None, None) => {
            let state = state_size.unwrap_or(MAX_STATE_SIZE);
            let bitrate = default_output_for_state(state) * 2;
            (bitrate, state - bitrate, state)
        }
        (None, Some(capacity)) => {
            let state = state_size.unwrap_or(MAX_STATE_SIZE);
            (state - capacity, capacity, state)
        }
        (Some(bitrate), None) => {
            let state = state_size.unwrap_or(MAX_STATE_SIZE);
            (bitrate, state - bitrate, state)
        }
        (Some(bitrate), Some(capacity)) => {
            let state = bitrate.saturating_add(capacity);
            if state_size.is_some_and(|given| given != state) {
                return Err(ValidationError::StateRateCapacityIncoherent);
            }
            (bitrate, capacity, state)
        }
    };

    let output_size = gspec.output_size.unwrap_or_else(|| {
        if gspec.bitrate.is_none() && gspec.capacity.is_none() {
            default_output_for_state(state_size).max(8)
        } else {
            default_output_for_capacity(capacity)
        }
    });

    let spec = Spec {
        bitrate,
        capacity,
        output_size,
        state_size,
        word_size: state_size / LANES,
    };
    spec.check()?;

    tracing::debug!(
        bitrate = spec.bitrate,
        capacity = spec.capacity,
        output_size = spec.output_size,
        state_size = spec.state_size,
        word_size = spec.word_size,
        "Resolved sponge spec"
    );

    Ok(spec)
}

/// About a third of the state, rounded up to whole bytes.
fn default_output_for_state(state_size: i64) -> i64 {
    ((state_size * 32) / 100 + 7) & !7
}

fn default_output_for_capacity(capacity: i64) -> i64 {
    if capacity == 8 {
        8
    } else {
        capacity / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gspec(
        bitrate: Option<i64>,
        capacity: Option<i64>,
        output_size: Option<i64>,
        state_size: Option<i64>,
        word_size: Option<i64>,
    ) -> GeneralizedSpec {
        GeneralizedSpec {
            bitrate,
            capacity,
            output_size,
            state_size,
            word_size,
        }
    }

    fn assert_invariants(spec: &Spec) {
        assert_eq!(spec.state_size, spec.bitrate + spec.capacity);
        assert_eq!(spec.state_size, LANES * spec.word_size);
        assert_eq!(spec.state_size % 25, 0);
        assert!(spec.state_size <= MAX_STATE_SIZE);
        assert!((spec.word_size as u64).is_power_of_two());
        assert_eq!(spec.word_size % 8, 0);
        assert!(spec.word_size <= MAX_WORD_SIZE);
        assert!(spec.bitrate > 0 && spec.bitrate % 8 == 0);
        assert!(spec.capacity > 0 && spec.capacity % 8 == 0);
        assert!(spec.output_size > 0);
    }

    #[test]
    fn test_fully_specified_spec_resolves() {
        let spec = resolve(&gspec(Some(1344), Some(256), Some(512), Some(1600), Some(64))).unwrap();
        assert_eq!(
            spec,
            Spec {
                bitrate: 1344,
                capacity: 256,
                output_size: 512,
                state_size: 1600,
                word_size: 64,
            }
        );
    }

    #[test]
    fn test_empty_spec_uses_keccak_defaults() {
        let spec = resolve(&GeneralizedSpec::default()).unwrap();
        assert_eq!(spec.bitrate, 1024);
        assert_eq!(spec.capacity, 576);
        assert_eq!(spec.output_size, 512);
        assert_eq!(spec.state_size, 1600);
        assert_eq!(spec.word_size, 64);
    }

    #[test]
    fn test_word_size_alone_scales_defaults() {
        let spec = resolve(&gspec(None, None, None, None, Some(8))).unwrap();
        assert_eq!(spec.state_size, 200);
        assert_eq!(spec.bitrate, 128);
        assert_eq!(spec.capacity, 72);
        assert_eq!(spec.output_size, 64);

        let spec = resolve(&gspec(None, None, None, None, Some(32))).unwrap();
        assert_eq!(spec.state_size, 800);
        assert_eq!(spec.bitrate, 512);
        assert_eq!(spec.capacity, 288);
        assert_eq!(spec.output_size, 256);
    }

    #[test]
    fn test_capacity_alone_derives_rate_and_output() {
        let spec = resolve(&gspec(None, Some(512), None, None, None)).unwrap();
        assert_eq!(spec.bitrate, 1088);
        assert_eq!(spec.output_size, 256);
        assert_eq!(spec.state_size, 1600);
    }

    #[test]
    fn test_rate_alone_derives_capacity() {
        let spec = resolve(&gspec(Some(1088), None, None, None, None)).unwrap();
        assert_eq!(spec.capacity, 512);
        assert_eq!(spec.output_size, 256);
    }

    #[test]
    fn test_rate_and_capacity_fix_state() {
        let spec = resolve(&gspec(Some(576), Some(1024), None, None, None)).unwrap();
        assert_eq!(spec.state_size, 1600);
        assert_eq!(spec.output_size, 512);
    }

    #[test]
    fn test_small_capacity_output_floor() {
        let spec = resolve(&gspec(None, Some(8), None, None, None)).unwrap();
        assert_eq!(spec.bitrate, 1592);
        assert_eq!(spec.output_size, 8);
    }

    #[test]
    fn test_output_alone_keeps_default_split() {
        let spec = resolve(&gspec(None, None, Some(256), None, None)).unwrap();
        assert_eq!(spec.bitrate, 1024);
        assert_eq!(spec.capacity, 576);
        assert_eq!(spec.output_size, 256);
    }

    #[test]
    fn test_state_word_incoherent() {
        assert_eq!(
            resolve(&gspec(None, None, None, Some(1600), Some(50))),
            Err(ValidationError::StateWordIncoherent)
        );
        assert_eq!(
            resolve(&gspec(None, None, None, Some(1600), Some(32))),
            Err(ValidationError::StateWordIncoherent)
        );
    }

    #[test]
    fn test_each_rule_reported_individually() {
        use ValidationError::*;

        let cases = [
            (gspec(None, None, None, Some(0), None), StateNonPositive),
            (gspec(None, None, None, Some(1625), None), StateTooLarge),
            (gspec(None, None, None, Some(1599), None), StateMod25),
            (gspec(None, None, None, None, Some(0)), WordNonPositive),
            (gspec(None, None, None, None, Some(72)), WordTooLarge),
            (gspec(None, Some(0), None, None, None), CapacityNonPositive),
            (gspec(None, Some(254), None, None, None), CapacityMod8),
            (gspec(Some(-8), None, None, None, None), BitrateNonPositive),
            (gspec(Some(1343), None, None, None, None), BitrateMod8),
            (gspec(None, None, Some(0), None, None), OutputNonPositive),
            (gspec(None, None, None, None, Some(24)), WordNotPowerOfTwo),
            (
                gspec(Some(1024), Some(256), None, Some(1600), None),
                StateRateCapacityIncoherent,
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(resolve(&input), Err(expected), "input: {input:?}");
        }
    }

    #[test]
    fn test_derived_rate_must_be_positive() {
        assert_eq!(
            resolve(&gspec(None, Some(1600), None, None, None)),
            Err(ValidationError::BitrateNonPositive)
        );
    }

    #[test]
    fn test_oversized_rate_plus_capacity() {
        assert_eq!(
            resolve(&gspec(Some(1600), Some(8), None, None, None)),
            Err(ValidationError::StateTooLarge)
        );
    }

    #[test]
    fn test_first_violation_wins() {
        // Both the state size and the capacity are bad; state is checked first.
        assert_eq!(
            resolve(&gspec(None, Some(3), None, Some(-25), None)),
            Err(ValidationError::StateNonPositive)
        );
    }

    #[test]
    fn test_check_rejects_word_not_multiple_of_8() {
        let spec = Spec {
            bitrate: 64,
            capacity: 32,
            output_size: 8,
            state_size: 100,
            word_size: 4,
        };
        assert_eq!(spec.check(), Err(ValidationError::WordMod8));
    }

    #[test]
    fn test_block_length_rounds_up() {
        let mut spec = resolve(&gspec(None, None, Some(200), None, None)).unwrap();
        assert_eq!(spec.output_bytes(), Some(25));
        spec.output_size = 201;
        assert_eq!(spec.output_bytes(), Some(26));
        spec.output_size = 7;
        assert_eq!(spec.output_bytes(), Some(1));
        spec.output_size = -8;
        assert_eq!(spec.output_bytes(), None);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_block_length_of_largest_output_size() {
        let spec = resolve(&gspec(None, None, Some(i64::MAX), None, None)).unwrap();
        assert_eq!(spec.output_bytes(), Some(1 << 60));
    }

    #[test]
    fn test_overridden_by_prefers_other() {
        let file = gspec(Some(1024), Some(576), None, Some(1600), None);
        let cli = gspec(None, Some(512), Some(256), None, None);
        let merged = file.overridden_by(&cli);
        assert_eq!(merged, gspec(Some(1024), Some(512), Some(256), Some(1600), None));
    }

    proptest! {
        #[test]
        fn prop_resolved_specs_satisfy_invariants(
            bitrate in proptest::option::of(-16i64..1700),
            capacity in proptest::option::of(-16i64..1700),
            output_size in proptest::option::of(-16i64..4096),
            state_size in proptest::option::of(-25i64..1700),
            word_size in proptest::option::of(-8i64..80),
        ) {
            let input = gspec(bitrate, capacity, output_size, state_size, word_size);
            if let Ok(spec) = resolve(&input) {
                assert_invariants(&spec);
                prop_assert_eq!(spec.check(), Ok(()));
            }
        }

        #[test]
        fn prop_word_and_capacity_always_resolve(
            word_exp in 3u32..7,
            capacity_bytes in 1i64..200,
        ) {
            let word = 1i64 << word_exp;
            let state = word * LANES;
            let capacity = (capacity_bytes * 8) % (state - 8) + 8;
            let spec = resolve(&gspec(None, Some(capacity), None, None, Some(word))).unwrap();
            assert_invariants(&spec);
            prop_assert_eq!(spec.bitrate, state - capacity);
        }
    }
}
