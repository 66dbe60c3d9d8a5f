use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing question-answering activity.
#[derive(Default)]
pub struct QaMetrics {
    requests_processed: AtomicU64,
    questions_answered: AtomicU64,
    last_chunk_count: AtomicU64,
}

impl QaMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed run with its question count and the number of chunks queried.
    pub fn record_request(&self, question_count: u64, chunk_count: u64) {
        self.requests_processed.fetch_add(1, Ordering::Relaxed);
        self.questions_answered
            .fetch_add(question_count, Ordering::Relaxed);
        self.last_chunk_count.store(chunk_count, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests_processed = self.requests_processed.load(Ordering::Relaxed);
        MetricsSnapshot {
            requests_processed,
            questions_answered: self.questions_answered.load(Ordering::Relaxed),
            last_chunk_count: (requests_processed > 0)
                .then(|| self.last_chunk_count.load(Ordering::Relaxed)),
        }
    }
}

/// Immutable view of request counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Number of run requests completed since startup.
    pub requests_processed: u64,
    /// Total question count answered across all completed runs.
    pub questions_answered: u64,
    /// Chunk count used by the most recent run, absent before the first run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_chunk_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_requests_and_questions() {
        let metrics = QaMetrics::new();
        metrics.record_request(2, 3);
        metrics.record_request(5, 1);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_processed, 2);
        assert_eq!(snapshot.questions_answered, 7);
        assert_eq!(snapshot.last_chunk_count, Some(1));
    }

    #[test]
    fn snapshot_before_first_request_has_no_chunk_count() {
        let metrics = QaMetrics::new();
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_processed, 0);
        assert_eq!(snapshot.last_chunk_count, None);
    }
}
