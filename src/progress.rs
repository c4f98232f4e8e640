use std::time::{Duration, Instant};

/// Cadence for progress reports: fire after `lines` new unique lines or
/// after `interval` has elapsed, whichever comes first.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub lines: u64,
    pub interval: Duration,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            lines: 1000,
            interval: Duration::from_millis(500),
        }
    }
}

/// One progress snapshot, surfaced to the shell for rendering.
#[derive(Debug, Clone)]
pub struct ProgressReport {
    /// Unique lines written so far.
    pub written: u64,
    /// Search-tree leaves visited inside the length window.
    pub attempted: u64,
    /// Durable output size in bytes.
    pub bytes_written: u64,
    /// DP estimate of ordered sequences in the window.
    pub estimated_total: u128,
}

impl ProgressReport {
    /// Percent of estimated sequences attempted. The estimate counts
    /// ordered sequences — the same quantity `attempted` counts — so
    /// this tops out at 100 in a correct run; it is still approximate
    /// relative to unique output lines.
    pub fn percent(&self) -> f64 {
        if self.estimated_total == 0 {
            100.0
        } else {
            self.attempted as f64 / self.estimated_total as f64 * 100.0
        }
    }
}

/// Decides when the generator should emit the next report.
#[derive(Debug)]
pub struct ReportScheduler {
    settings: ReportSettings,
    last_report: Instant,
    writes_since: u64,
}

impl ReportScheduler {
    pub fn new(settings: ReportSettings) -> Self {
        Self {
            settings,
            last_report: Instant::now(),
            writes_since: 0,
        }
    }

    pub fn note_write(&mut self) {
        self.writes_since += 1;
    }

    pub fn due(&self) -> bool {
        self.writes_since >= self.settings.lines
            || self.last_report.elapsed() >= self.settings.interval
    }

    pub fn mark_reported(&mut self) {
        self.last_report = Instant::now();
        self.writes_since = 0;
    }
}
