//! Output streaming.
//!
//! The stream has no natural end: it runs until the consumer closes its
//! side of the sink (a broken pipe) or a write fails for another reason.

mod driver;
pub mod sink;

pub use driver::{StreamDriver, StreamError, StreamPhase, StreamStats};
