//! Submit sinks: where a validated value set goes.

use std::io::Write;

use tracing::warn;

use crate::error::{FormError, Result};
use crate::values::SignupValues;

/// Consumer of successful submissions.
///
/// The form calls [`accept`](Sink::accept) exactly once per successful
/// submission. Sinks that can fail must deal with the failure themselves; the
/// form treats delivery as always succeeding.
pub trait Sink {
    /// Receives the final values of a submission.
    fn accept(&mut self, values: &SignupValues);
}

impl<F> Sink for F
where
    F: FnMut(&SignupValues),
{
    fn accept(&mut self, values: &SignupValues) {
        self(values);
    }
}

/// Serializes a value set as two-space indented JSON.
///
/// # Errors
///
/// Returns [`FormError::Sink`] if serialization fails.
pub fn to_json_record(values: &SignupValues) -> Result<String> {
    serde_json::to_string_pretty(values).map_err(|e| FormError::sink(e.to_string()))
}

/// Writes every submission as a pretty JSON document to a writer.
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonSink<W> {
    /// Creates a sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written successfully.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, values: &SignupValues) -> Result<()> {
        let record = to_json_record(values)?;
        writeln!(self.writer, "{record}").map_err(|e| FormError::sink(e.to_string()))?;
        self.writer
            .flush()
            .map_err(|e| FormError::sink(e.to_string()))
    }
}

impl<W: Write> Sink for JsonSink<W> {
    fn accept(&mut self, values: &SignupValues) {
        match self.write_record(values) {
            Ok(()) => self.written += 1,
            Err(err) => warn!(error = %err, "failed to write submission"),
        }
    }
}

/// Keeps every submission in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    submissions: Vec<SignupValues>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded submissions, oldest first.
    pub fn submissions(&self) -> &[SignupValues] {
        &self.submissions
    }

    /// The most recent submission.
    pub fn last(&self) -> Option<&SignupValues> {
        self.submissions.last()
    }

    /// Number of recorded submissions.
    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

impl Sink for RecordingSink {
    fn accept(&mut self, values: &SignupValues) {
        self.submissions.push(values.clone());
    }
}
