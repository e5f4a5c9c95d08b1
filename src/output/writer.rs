//! JSON lines writer

use super::message::Message;
use crate::error::{Error, Result};
use crate::reports::Report;
use crate::state::State;
use crate::types::CleanedRecord;
use chrono::Utc;
use std::io::{self, Stdout, Write};

/// Destination of everything a sync emits
pub trait RecordSink {
    /// Announce a stream's schema
    fn write_schema(&mut self, report: &Report) -> Result<()>;

    /// Emit one cleaned record
    fn write_record(&mut self, stream: &str, record: &CleanedRecord) -> Result<()>;

    /// Emit the current state
    fn write_state(&mut self, state: &State) -> Result<()>;
}

/// Sink writing one JSON message per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    pretty: bool,
    messages_written: usize,
}

impl JsonLinesSink<Stdout> {
    /// Sink on standard output
    pub fn stdout(pretty: bool) -> Self {
        Self::new(io::stdout()).pretty(pretty)
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Create a sink over `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
            messages_written: 0,
        }
    }

    /// Pretty-print messages instead of one per line
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Write one message and flush
    pub fn write_message(&mut self, message: &Message) -> Result<()> {
        let line = if self.pretty {
            serde_json::to_string_pretty(message)?
        } else {
            serde_json::to_string(message)?
        };

        writeln!(self.writer, "{line}")
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::output(format!("Failed to write message: {e}")))?;

        self.messages_written += 1;
        Ok(())
    }

    /// Number of messages written so far
    pub fn messages_written(&self) -> usize {
        self.messages_written
    }

    /// Get the underlying writer back
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write_schema(&mut self, report: &Report) -> Result<()> {
        self.write_message(&Message::schema(report))
    }

    fn write_record(&mut self, stream: &str, record: &CleanedRecord) -> Result<()> {
        self.write_message(&Message::record(stream, record.clone(), Utc::now()))
    }

    fn write_state(&mut self, state: &State) -> Result<()> {
        self.write_message(&Message::state(state.clone()))
    }
}
