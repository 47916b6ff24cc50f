//! Query timing metrics.

use ::metrics::histogram;
use std::time::Instant;

/// Records the wall-clock duration of a database query under the
/// `db_query_duration_seconds` histogram, labeled by query name.
pub struct QueryTimer {
    name: &'static str,
    start: Instant,
}

impl QueryTimer {
    /// Starts a timer for the named query.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Records the elapsed time.
    pub fn record(self) {
        histogram!("db_query_duration_seconds", "query" => self.name)
            .record(self.start.elapsed().as_secs_f64());
    }
}
