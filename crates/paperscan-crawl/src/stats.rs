//! Statistics collection and reporting for a crawl run.
//!
//! Statistics hierarchy:
//! - Partition-level: `PartitionStats`, filled in by one worker
//! - Run-level: `Summary`, aggregated after all partitions finish

use std::time::Duration;

use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use paperscan_core::fmt_num;

/// Per-partition counters.
///
/// Every candidate is either fetched or pruned; every fetch ends in exactly
/// one of found / not found / transport error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionStats {
    pub partition: usize,
    /// Candidates assigned to the partition
    pub candidates: usize,
    /// Fetch calls made
    pub fetched: usize,
    /// Candidates skipped after a not-found in the same group
    pub pruned: usize,
    pub found: usize,
    pub not_found: usize,
    pub transport_errors: usize,
    /// Found documents whose text could not be extracted
    pub extraction_errors: usize,
    pub elapsed: Duration,
}

impl PartitionStats {
    pub fn new(partition: usize, candidates: usize) -> Self {
        Self {
            partition,
            candidates,
            ..Default::default()
        }
    }

    /// Log partition completion (non-TTY mode only).
    pub fn log(&self) {
        log::info!(
            "partition_{:02}: {} found, {} fetched, {} pruned of {} [{:.1}s]",
            self.partition,
            fmt_num(self.found),
            fmt_num(self.fetched),
            fmt_num(self.pruned),
            fmt_num(self.candidates),
            self.elapsed.as_secs_f64()
        );
    }
}

/// Aggregated statistics for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_candidates: usize,
    pub partitions: usize,
    pub failed_partitions: usize,
    pub fetched: usize,
    pub pruned: usize,
    pub found: usize,
    pub not_found: usize,
    pub transport_errors: usize,
    pub extraction_errors: usize,
    pub elapsed: Duration,
}

impl Summary {
    /// Aggregate from the partitions that completed.
    pub fn from_partitions(
        parts: &[PartitionStats],
        total_candidates: usize,
        partitions: usize,
        failed_partitions: usize,
        elapsed: Duration,
    ) -> Self {
        let mut summary = Self {
            total_candidates,
            partitions,
            failed_partitions,
            elapsed,
            ..Default::default()
        };
        for p in parts {
            summary.fetched += p.fetched;
            summary.pruned += p.pruned;
            summary.found += p.found;
            summary.not_found += p.not_found;
            summary.transport_errors += p.transport_errors;
            summary.extraction_errors += p.extraction_errors;
        }
        summary
    }

    /// Format summary table as a string.
    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Crawl")
                    .fg(Color::Cyan)
                    .add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").fg(Color::Cyan),
                Cell::new("%").fg(Color::Cyan),
            ]);

        let total = self.total_candidates;
        table.add_row(vec![
            Cell::new("Partitions"),
            Cell::new(format!(
                "{}/{} ({} failed)",
                self.partitions - self.failed_partitions.min(self.partitions),
                self.partitions,
                self.failed_partitions
            )),
            Cell::new(""),
        ]);
        table.add_row(vec![
            Cell::new("Candidates"),
            Cell::new(fmt_num(total)),
            Cell::new(""),
        ]);
        table.add_row(vec![
            Cell::new("Fetched"),
            Cell::new(fmt_num(self.fetched)),
            Cell::new(format!("{:.1}", pct(self.fetched, total))),
        ]);
        table.add_row(vec![
            Cell::new("Pruned"),
            Cell::new(fmt_num(self.pruned)),
            Cell::new(format!("{:.1}", pct(self.pruned, total))),
        ]);
        table.add_row(vec![
            Cell::new("Not found"),
            Cell::new(fmt_num(self.not_found)),
            Cell::new(""),
        ]);
        table.add_row(vec![
            Cell::new("Transport errors"),
            Cell::new(fmt_num(self.transport_errors)),
            Cell::new(""),
        ]);
        table.add_row(vec![
            Cell::new("Extraction errors"),
            Cell::new(fmt_num(self.extraction_errors)),
            Cell::new(""),
        ]);
        table.add_row(vec![
            Cell::new("Documents found").fg(Color::Green),
            Cell::new(fmt_num(self.found)).fg(Color::Green),
            Cell::new(format!("{:.1}", pct(self.found, self.fetched))).fg(Color::Green),
        ]);
        table.add_row(vec![
            Cell::new("Time"),
            Cell::new(format!("{:.1}s", self.elapsed.as_secs_f64())),
            Cell::new(""),
        ]);

        format!("\n{table}")
    }

    /// Print table on stderr (TTY mode).
    pub fn print(&self) {
        eprintln!("{}", self.format_table());
    }

    /// Log minimal summary (non-TTY mode).
    pub fn log(&self) {
        log::info!(
            "Crawl complete: {} documents, {} fetched, {} pruned of {} candidates ({} transport errors, {} extraction errors) in {:.1}s",
            fmt_num(self.found),
            fmt_num(self.fetched),
            fmt_num(self.pruned),
            fmt_num(self.total_candidates),
            self.transport_errors,
            self.extraction_errors,
            self.elapsed.as_secs_f64()
        );
        if self.failed_partitions > 0 {
            log::warn!(
                "{}/{} partitions failed; their candidates are missing from the output",
                self.failed_partitions,
                self.partitions
            );
        }
    }
}

fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(idx: usize, fetched: usize, pruned: usize, found: usize) -> PartitionStats {
        PartitionStats {
            partition: idx,
            candidates: fetched + pruned,
            fetched,
            pruned,
            found,
            not_found: fetched - found,
            ..Default::default()
        }
    }

    #[test]
    fn summary_sums_partitions() {
        let parts = vec![part(0, 10, 90, 8), part(1, 5, 95, 4)];
        let s = Summary::from_partitions(&parts, 200, 2, 0, Duration::from_secs(3));
        assert_eq!(s.fetched, 15);
        assert_eq!(s.pruned, 185);
        assert_eq!(s.found, 12);
        assert_eq!(s.not_found, 3);
        assert_eq!(s.total_candidates, 200);
    }

    #[test]
    fn table_mentions_counts() {
        let s = Summary::from_partitions(&[part(0, 4, 6, 3)], 10, 1, 0, Duration::ZERO);
        let table = s.format_table();
        assert!(table.contains("Pruned"));
        assert!(table.contains("60.0"));
        assert!(table.contains("1/1 (0 failed)"));
    }

    #[test]
    fn pct_zero_whole() {
        assert_eq!(pct(5, 0), 0.0);
        assert_eq!(pct(1, 4), 25.0);
    }

    #[test]
    fn log_does_not_panic() {
        part(0, 1, 1, 1).log();
        Summary::default().log();
    }
}
