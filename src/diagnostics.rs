//! Diagnostic output.
//!
//! Messages go to the diagnostic stream prefixed with the program name,
//! one line per message. The program name travels in a [`Diagnostics`]
//! value instead of global state.

use crate::spec::Spec;
use std::io::{self, Write};

/// Program name, verbosity and the stream diagnostics are written to.
#[derive(Debug)]
pub struct Diagnostics<W: Write = io::Stderr> {
    program: String,
    verbose: bool,
    out: W,
}

impl Diagnostics<io::Stderr> {
    /// Diagnostics on standard error.
    pub fn stderr(program: impl Into<String>) -> Self {
        Self::with_writer(program, io::stderr())
    }
}

impl<W: Write> Diagnostics<W> {
    /// Diagnostics on an arbitrary writer.
    pub fn with_writer(program: impl Into<String>, out: W) -> Self {
        Self {
            program: program.into(),
            verbose: false,
            out,
        }
    }

    /// Enables or disables the resolved-spec echo.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns true if verbose output is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Returns the program name used as prefix.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Writes `<program>: <message>`.
    pub fn report(&mut self, message: &dyn std::fmt::Display) {
        // Nothing sensible is left to do if the diagnostic stream is gone.
        let _ = writeln!(self.out, "{}: {}", self.program, message);
    }

    /// Echoes the resolved parameters when verbose.
    pub fn echo_spec(&mut self, spec: &Spec) {
        if !self.verbose {
            return;
        }
        let lines = [
            ("rate", spec.bitrate),
            ("capacity", spec.capacity),
            ("output size", spec.output_size),
            ("state size", spec.state_size),
            ("word size", spec.word_size),
        ];
        for (label, value) in lines {
            let _ = writeln!(self.out, "{}: {}: {}", self.program, label, value);
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
