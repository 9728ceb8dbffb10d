//! Analytics collaborator
//!
//! Best-effort records of topics, generated answers and match results, plus
//! the aggregate view over a recorded file.

mod sink;
mod summary;

pub use sink::{
    AnalyticsEvent, AnalyticsSink, BackgroundSink, JsonlSink, NullSink, RecordedWord, SinkError,
    record_best_effort,
};
pub use summary::{AnalyticsSummary, WordUsage, load_events, summarize, summarize_file, word_usage};

#[cfg(test)]
pub(crate) use sink::tests::{FailingSink, MemorySink};
