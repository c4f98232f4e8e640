use std::collections::HashSet;

use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::estimate::{count_sequences, Window};
use crate::pool::TokenPool;
use crate::progress::{ProgressReport, ReportScheduler, ReportSettings};
use crate::sink::OutputSink;
use crate::stats::RunStats;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
}

/// Final counters for one generation run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcome: Outcome,
    pub written: u64,
    pub attempted: u64,
    pub bytes_written: u64,
    pub estimated_total: u128,
    pub elapsed_secs: f64,
}

impl RunSummary {
    /// Percent of estimated sequences attempted; approximate relative to
    /// unique output because the estimate counts ordered sequences.
    pub fn percent(&self) -> f64 {
        if self.estimated_total == 0 {
            100.0
        } else {
            self.attempted as f64 / self.estimated_total as f64 * 100.0
        }
    }
}

/// Depth-first sequence generator.
///
/// Walks the tree of token concatenations rooted at the empty string,
/// pruning any branch that would exceed the window maximum, and streams
/// each distinct in-window string to the sink exactly once, in discovery
/// order. Traversal is pre-order with children visited in pool order, so
/// output is fully deterministic for a fixed pool and window.
pub struct Engine {
    pool: TokenPool,
    window: Window,
    report: ReportSettings,
    estimated: u128,
}

impl Engine {
    /// Build an engine, computing the sequence estimate up front. A zero
    /// estimate means the window admits no concatenation at all and is
    /// rejected before any output is produced.
    pub fn new(pool: TokenPool, window: Window, report: ReportSettings) -> Result<Self> {
        let estimated = count_sequences(pool.char_lens(), window.min, window.max);
        if estimated == 0 {
            return Err(Error::NoCombinations {
                min: window.min,
                max: window.max,
            });
        }

        Ok(Self {
            pool,
            window,
            report,
            estimated,
        })
    }

    pub fn estimated_total(&self) -> u128 {
        self.estimated
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn pool(&self) -> &TokenPool {
        &self.pool
    }

    /// Run the generation to completion or cancellation, writing unique
    /// in-window strings to `sink` and delivering progress reports to
    /// `on_report`. A final report is always delivered, after the sink
    /// has been flushed, so observed byte counts are durable.
    pub fn run<F>(
        &self,
        sink: &mut OutputSink,
        cancel: &CancelToken,
        mut on_report: F,
    ) -> Result<RunSummary>
    where
        F: FnMut(&ProgressReport),
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut stats = RunStats::new();
        let mut scheduler = ReportScheduler::new(self.report.clone());

        // Explicit work stack instead of recursion: depth is bounded by
        // max_len / min_token_len, which for one-character tokens and a
        // large window would overflow the call stack. Children are
        // pushed in reverse pool order so pops follow pool order,
        // matching the recursive pre-order trace.
        let mut stack: Vec<(String, usize)> = vec![(String::new(), 0)];
        let mut cancelled = false;

        while let Some((curr, cur_len)) = stack.pop() {
            if cancel.is_tripped() {
                cancelled = true;
                break;
            }

            if self.window.contains(cur_len) {
                stats.note_attempt();
                // The empty root can be "attempted" when min_len is 0,
                // but the empty string is never written.
                if !curr.is_empty() && !seen.contains(&curr) {
                    sink.write_line(&curr)?;
                    seen.insert(curr.clone());
                    stats.note_write();
                    scheduler.note_write();
                }
            }

            if cur_len < self.window.max {
                for (token, token_len) in self.pool.iter().rev() {
                    let child_len = cur_len + token_len;
                    if child_len > self.window.max {
                        continue;
                    }
                    let mut child = String::with_capacity(curr.len() + token.len());
                    child.push_str(&curr);
                    child.push_str(token);
                    stack.push((child, child_len));
                }
            }

            if scheduler.due() {
                sink.flush()?;
                on_report(&self.snapshot(&stats, sink));
                scheduler.mark_reported();
            }
        }

        sink.flush()?;
        let final_report = self.snapshot(&stats, sink);
        on_report(&final_report);

        Ok(RunSummary {
            outcome: if cancelled {
                Outcome::Cancelled
            } else {
                Outcome::Completed
            },
            written: stats.written(),
            attempted: stats.attempted(),
            bytes_written: sink.bytes_written(),
            estimated_total: self.estimated,
            elapsed_secs: stats.elapsed(),
        })
    }

    fn snapshot(&self, stats: &RunStats, sink: &OutputSink) -> ProgressReport {
        ProgressReport {
            written: stats.written(),
            attempted: stats.attempted(),
            bytes_written: sink.bytes_written(),
            estimated_total: self.estimated,
        }
    }
}
