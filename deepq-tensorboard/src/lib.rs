//! Progress sink writing TensorBoard event files.
use anyhow::Result;
use deepq_core::{
    error::DqnError,
    record::{Record, RecordValue, Recorder},
};
use log::trace;
use std::path::Path;
use tensorboard_rs::summary_writer::SummaryWriter;

/// Write records to TFRecord.
pub struct TensorboardRecorder {
    writer: SummaryWriter,
    step_key: String,
    ignore_unsupported_value: bool,
}

impl TensorboardRecorder {
    /// Construct a [`TensorboardRecorder`].
    ///
    /// TFRecord will be stored in `logdir`. Scalars are written at the step
    /// given by the `frame_idx` entry of each record.
    pub fn new<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            writer: SummaryWriter::new(logdir),
            step_key: "frame_idx".to_string(),
            ignore_unsupported_value: true,
        }
    }

    /// Construct a [`TensorboardRecorder`] with checking unsupported record value.
    ///
    /// TFRecord will be stored in `logdir`.
    pub fn new_with_check_unsupported_value<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            ignore_unsupported_value: false,
            ..Self::new(logdir)
        }
    }
}

impl Recorder for TensorboardRecorder {
    /// Write a given [Record] into a TFRecord.
    ///
    /// This method handles [RecordValue::Scalar] in the [Record].
    /// [RecordValue::DateTime] is discarded; other variants are skipped, or
    /// rejected if constructed with
    /// [`new_with_check_unsupported_value`](TensorboardRecorder::new_with_check_unsupported_value).
    fn write(&mut self, record: Record) -> Result<()> {
        let step = record.get_scalar(&self.step_key)? as usize;

        for (k, v) in record.iter() {
            if *k != self.step_key {
                match v {
                    RecordValue::Scalar(v) => self.writer.add_scalar(k, *v, step),
                    RecordValue::DateTime(_) => {} // discard value
                    _ => {
                        if !self.ignore_unsupported_value {
                            return Err(DqnError::RecordValueTypeError(k.clone()).into());
                        }
                        trace!("Skip {} at step {}", k, step);
                    }
                };
            }
        }
        self.writer.flush();

        Ok(())
    }
}
