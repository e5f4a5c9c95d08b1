//! Output module
//!
//! Serializes the tap's output as JSON lines on stdout.
//!
//! # Overview
//!
//! This module provides:
//! - `Message` - the `SCHEMA`, `RECORD`, `STATE` and `CONNECTION_STATUS`
//!   messages the tap emits
//! - `RecordSink` - where the sync engine sends schemas, records and state
//! - `JsonLinesSink` - a sink writing one message per line to any writer

mod message;
mod writer;

pub use message::{ConnectionStatus, Message, Status};
pub use writer::{JsonLinesSink, RecordSink};
