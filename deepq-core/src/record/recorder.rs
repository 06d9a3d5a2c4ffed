use super::Record;
use anyhow::Result;

/// Writes a record to an output destination.
///
/// A recorder may be invoked at high frequency from the training loop.
/// Errors are reported to the caller, which treats them as non-fatal.
pub trait Recorder {
    /// Write a record to the [`Recorder`].
    fn write(&mut self, record: Record) -> Result<()>;
}
