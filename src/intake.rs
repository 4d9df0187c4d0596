//! Asynchronous source-byte acquisition.
//!
//! All conversions are pure and synchronous; the one asynchronous boundary
//! is reading uploaded bytes. [`SourceIntake`] implements latest-wins
//! semantics: when a new read starts before a prior one finishes, the prior
//! read's result is discarded rather than partially applied.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Errors from source intake. Distinct from [`FormatError`](crate::FormatError)
/// because nothing here involves a codec.
#[derive(Debug)]
pub enum IntakeError {
    /// The underlying read failed
    Io(std::io::Error),
    /// Input exceeds the configured byte ceiling
    TooLarge { actual: usize, limit: usize },
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeError::Io(e) => write!(f, "Read failed: {e}"),
            IntakeError::TooLarge { actual, limit } => {
                write!(f, "Input of {actual} bytes exceeds the {limit} byte limit")
            }
        }
    }
}

impl std::error::Error for IntakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntakeError::Io(e) => Some(e),
            IntakeError::TooLarge { .. } => None,
        }
    }
}

/// Latest-wins file reader with an optional size ceiling.
///
/// Each `read` call takes a generation ticket; a read whose ticket is stale
/// by the time its bytes arrive resolves to `Ok(None)` and its bytes are
/// dropped. Decoders are O(n) in input length but allocate proportional
/// intermediate structures, so callers serving untrusted uploads should set
/// `max_bytes`.
#[derive(Debug, Default)]
pub struct SourceIntake {
    latest: AtomicU64,
    max_bytes: Option<usize>,
}

impl SourceIntake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject reads whose content exceeds `max_bytes` before any decoder
    /// sees them.
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        SourceIntake {
            latest: AtomicU64::new(0),
            max_bytes: Some(max_bytes),
        }
    }

    /// Read a file without blocking the caller's thread.
    ///
    /// Returns `Ok(None)` when a newer read superseded this one while it
    /// was in flight.
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<Option<Vec<u8>>, IntakeError> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let bytes = tokio::fs::read(path).await.map_err(IntakeError::Io)?;

        if let Some(limit) = self.max_bytes {
            if bytes.len() > limit {
                return Err(IntakeError::TooLarge {
                    actual: bytes.len(),
                    limit,
                });
            }
        }

        if self.latest.load(Ordering::SeqCst) != ticket {
            log::debug!("discarding stale read result (ticket {ticket})");
            return Ok(None);
        }
        Ok(Some(bytes))
    }
}
