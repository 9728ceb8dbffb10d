//! Fire-and-forget analytics records
//!
//! Sinks record which topics and answers were used and how matches went.
//! Nothing in a solve session depends on a record being written: callers log
//! failures and move on.

use crate::core::WordClue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure writing an analytics record
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("analytics I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("analytics encoding error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("analytics worker has shut down")]
    Closed,
}

/// An answer as it was handed to the layout engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedWord {
    pub word: String,
    pub clue: String,
}

impl From<&WordClue> for RecordedWord {
    fn from(word: &WordClue) -> Self {
        Self {
            word: word.text().to_string(),
            clue: word.clue().to_string(),
        }
    }
}

/// One analytics record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    TopicUsed {
        topic: String,
        timestamp: DateTime<Utc>,
    },
    WordsGenerated {
        topic: String,
        words: Vec<RecordedWord>,
        timestamp: DateTime<Utc>,
    },
    MatchPlayed {
        topic: String,
        correct: u32,
        total: u32,
        percentage: u32,
        elapsed_seconds: u64,
        final_score: u32,
        hints_used: u32,
        timestamp: DateTime<Utc>,
    },
}

impl AnalyticsEvent {
    #[must_use]
    pub fn topic_used(topic: &str) -> Self {
        Self::TopicUsed {
            topic: topic.to_lowercase(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn words_generated(topic: &str, words: &[WordClue]) -> Self {
        Self::WordsGenerated {
            topic: topic.to_lowercase(),
            words: words.iter().map(RecordedWord::from).collect(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        match self {
            Self::TopicUsed { topic, .. }
            | Self::WordsGenerated { topic, .. }
            | Self::MatchPlayed { topic, .. } => topic,
        }
    }
}

/// Destination for analytics records
pub trait AnalyticsSink: Send + Sync {
    /// Record one event
    ///
    /// # Errors
    ///
    /// Returns `SinkError` when the record could not be written. Callers are
    /// expected to log and ignore it.
    fn record(&self, event: AnalyticsEvent) -> Result<(), SinkError>;
}

/// Record `event`, logging instead of propagating any failure
pub fn record_best_effort(sink: &dyn AnalyticsSink, event: AnalyticsEvent) {
    if let Err(err) = sink.record(event) {
        warn!(error = %err, "analytics record dropped");
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AnalyticsSink for NullSink {
    fn record(&self, _event: AnalyticsEvent) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Appends records as JSON lines to a file
#[derive(Debug)]
pub struct JsonlSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl JsonlSink {
    /// Open `path` for appending, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnalyticsSink for JsonlSink {
    fn record(&self, event: AnalyticsEvent) -> Result<(), SinkError> {
        let line = serde_json::to_string(&event)?;
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        writeln!(writer, "{line}")?;
        writer.flush()?;
        Ok(())
    }
}

/// Hands records to a worker thread so callers never block on I/O
///
/// Dropping the sink closes the channel and waits for queued records to be
/// written.
pub struct BackgroundSink {
    sender: Option<Sender<AnalyticsEvent>>,
    worker: Option<JoinHandle<()>>,
}

impl BackgroundSink {
    /// Spawn a worker that forwards every record to `inner`
    #[must_use]
    pub fn spawn(inner: Box<dyn AnalyticsSink>) -> Self {
        let (sender, receiver) = mpsc::channel::<AnalyticsEvent>();
        let worker = std::thread::spawn(move || {
            for event in receiver {
                debug!(topic = event.topic(), "writing analytics record");
                record_best_effort(inner.as_ref(), event);
            }
        });
        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }
}

impl AnalyticsSink for BackgroundSink {
    fn record(&self, event: AnalyticsEvent) -> Result<(), SinkError> {
        self.sender
            .as_ref()
            .ok_or(SinkError::Closed)?
            .send(event)
            .map_err(|_| SinkError::Closed)
    }
}

impl Drop for BackgroundSink {
    fn drop(&mut self) {
        drop(self.sender.take());
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warn!("analytics worker panicked");
        }
    }
}
