//! Input delivery module
//!
//! Event sink and debug hook interfaces, plus an in-memory recording sink.

pub mod recording;
pub mod sink;

pub use recording::RecordingSink;
pub use sink::{DebugHook, EventSink, HookError, LogHook, SinkError};
