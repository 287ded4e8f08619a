//! Sponge algorithm parameters.
//!
//! A [`GeneralizedSpec`] is what the caller asks for: any subset of the
//! five parameters. [`resolve`] fills in the rest and checks that the
//! result describes a Keccak sponge that can actually be instantiated.

mod params;

pub use params::{
    resolve, GeneralizedSpec, Spec, ValidationError, LANES, MAX_STATE_SIZE, MAX_WORD_SIZE,
};
