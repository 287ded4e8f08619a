//! Output handles.
//!
//! `std::io::Stdout` is line buffered, which would hold back the tail of a
//! block until some later block happens to contain a newline. The stream
//! instead writes to its own duplicate of the descriptor, so every
//! `write_all` reaches the consumer before the next block is squeezed.

use std::fs::File;
use std::io;

/// Returns an unbuffered handle onto the same open file as `handle`.
#[cfg(unix)]
pub fn unbuffered<H: std::os::fd::AsFd>(handle: H) -> io::Result<File> {
    Ok(File::from(handle.as_fd().try_clone_to_owned()?))
}

/// Returns an unbuffered handle onto the same open file as `handle`.
#[cfg(windows)]
pub fn unbuffered<H: std::os::windows::io::AsHandle>(handle: H) -> io::Result<File> {
    Ok(File::from(handle.as_handle().try_clone_to_owned()?))
}

/// Returns an unbuffered handle onto standard output.
pub fn stdout() -> io::Result<File> {
    unbuffered(io::stdout())
}
