//! Command-line interface.

use crate::spec::GeneralizedSpec;
use clap::Parser;
use std::path::PathBuf;

/// Keccak sponge pseudorandom byte stream.
///
/// Writes random bytes to standard output until the reader goes away.
/// Unset parameters are inferred from the ones given.
#[derive(Debug, Parser)]
#[command(name = "krandom", version)]
pub struct Cli {
    /// Rate in bits
    #[arg(
        short = 'R',
        long = "rate",
        visible_alias = "bitrate",
        value_name = "RATE",
        value_parser = parse_bits
    )]
    pub rate: Option<i64>,

    /// Capacity in bits
    #[arg(
        short = 'C',
        long = "capacity",
        value_name = "CAPACITY",
        value_parser = parse_bits
    )]
    pub capacity: Option<i64>,

    /// Output block size in bits
    #[arg(
        short = 'N',
        short_alias = 'O',
        long = "output-size",
        visible_alias = "output",
        value_name = "OUTPUT-SIZE",
        value_parser = parse_bits
    )]
    pub output_size: Option<i64>,

    /// State size in bits
    #[arg(
        short = 'S',
        short_alias = 'B',
        long = "state-size",
        visible_alias = "state",
        value_name = "STATE-SIZE",
        value_parser = parse_bits
    )]
    pub state_size: Option<i64>,

    /// Word (lane) size in bits
    #[arg(
        short = 'W',
        long = "word-size",
        visible_alias = "word",
        value_name = "WORD-SIZE",
        value_parser = parse_bits
    )]
    pub word_size: Option<i64>,

    /// Print the resolved parameters to standard error
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parameters given on the command line; unset flags stay unset.
    pub fn generalized_spec(&self) -> GeneralizedSpec {
        GeneralizedSpec {
            bitrate: self.rate,
            capacity: self.capacity,
            output_size: self.output_size,
            state_size: self.state_size,
            word_size: self.word_size,
        }
    }
}

/// Parses a bit count written as plain decimal digits.
///
/// Signs and leading whitespace are rejected; the range rules are applied
/// later, during resolution.
fn parse_bits(arg: &str) -> Result<i64, String> {
    if !arg.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(format!("`{arg}` is not a decimal number"));
    }
    arg.parse()
        .map_err(|e: std::num::ParseIntError| format!("`{arg}`: {e}"))
}
