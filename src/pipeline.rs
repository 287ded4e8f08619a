//! The core pipeline: resolve, seed, stream, tear down.

use crate::diagnostics::Diagnostics;
use crate::entropy::EntropySource;
use crate::error::Result;
use crate::spec::{resolve, GeneralizedSpec};
use crate::sponge::SpongeEngine;
use crate::stream::{StreamDriver, StreamStats};
use std::io::Write;

/// Runs one complete stream into `sink`.
///
/// Returns the stream counters when the consumer disconnects. The sponge
/// state is wiped on every path out of this function.
pub fn generate<E, W, D>(
    gspec: &GeneralizedSpec,
    engine: &E,
    source: &dyn EntropySource,
    sink: &mut W,
    diagnostics: &mut Diagnostics<D>,
) -> Result<StreamStats>
where
    E: SpongeEngine + ?Sized,
    W: Write + ?Sized,
    D: Write,
{
    let spec = resolve(gspec)?;
    diagnostics.echo_spec(&spec);

    let mut driver = StreamDriver::new(engine, &spec)?;
    driver.seed(source)?;
    let stats = driver.run(sink)?;
    Ok(stats)
}
