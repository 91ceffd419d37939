//! # High-Score Ledger
//!
//! A bounded table of the best runs, sorted by score. Equal scores keep
//! their insertion order, so a later run that only ties an existing score
//! ranks below it.
//!
//! The ledger is plain text, one record per line:
//!
//! ```text
//! 1203 69.23
//! 877 50.48
//! ```
//!
//! Reading and writing the file is up to the host; this module only converts
//! between the text form and [`HighScoreLedger`].

use std::fmt;

/// Maximum number of records a ledger keeps.
pub const MAX_SCORES: usize = 10;

/// A finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighScore {
    pub score: u32,
    /// Percent of the board cleared, `0.0..=100.0`.
    pub percent: f64,
}

impl HighScore {
    pub fn new(score: u32, percent: f64) -> Self {
        HighScore { score, percent }
    }
}

/// Where a newly recorded run landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded {
    /// Zero-based rank of the new entry, `None` if it did not make the table.
    pub rank: Option<usize>,
    /// The new entry is at the top of the table.
    pub is_new_best: bool,
}

/// Best runs, highest score first, at most [`MAX_SCORES`] of them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HighScoreLedger {
    records: Vec<HighScore>,
}

impl HighScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already-ordered records, dropping anything past [`MAX_SCORES`].
    pub fn from_records(mut records: Vec<HighScore>) -> Self {
        records.truncate(MAX_SCORES);
        HighScoreLedger { records }
    }

    /// Parse the text form.
    ///
    /// Tokens are read in `score percent` pairs. Reading stops quietly at the
    /// first pair that does not parse or once [`MAX_SCORES`] records are in,
    /// so a damaged tail costs only the records after the damage.
    pub fn parse(text: &str) -> Self {
        let mut records = Vec::new();
        let mut tokens = text.split_whitespace();
        while records.len() < MAX_SCORES {
            let (Some(score), Some(percent)) = (tokens.next(), tokens.next()) else {
                break;
            };
            match (score.parse::<u32>(), percent.parse::<f64>()) {
                (Ok(score), Ok(percent)) if percent.is_finite() => {
                    records.push(HighScore::new(score, percent));
                }
                _ => break,
            }
        }
        HighScoreLedger { records }
    }

    /// The text form: one `score percent` line per record, percent with two
    /// decimals.
    pub fn to_text(&self) -> String {
        self.records
            .iter()
            .map(|r| format!("{} {:.2}\n", r.score, r.percent))
            .collect()
    }

    pub fn records(&self) -> &[HighScore] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The top record, if any.
    pub fn best(&self) -> Option<&HighScore> {
        self.records.first()
    }

    /// Add a finished run.
    ///
    /// The run is appended, the table is stably sorted by score (highest
    /// first) and cut back to [`MAX_SCORES`]. The new entry's rank follows
    /// from the stable sort: it sits right after every older record with an
    /// equal or higher score.
    ///
    /// The entry is found by position, not by comparing `(score, percent)`
    /// values, so no float tolerance is involved. An older record with the
    /// same score and percent therefore keeps first place and the new run is
    /// not a new best. Matching by value with a tolerance would pick the
    /// older record instead.
    pub fn record(&mut self, score: u32, percent: f64) -> Recorded {
        self.records.push(HighScore::new(score, percent));
        self.records.sort_by(|a, b| b.score.cmp(&a.score));

        let position = self
            .records
            .iter()
            .filter(|r| r.score >= score)
            .count()
            - 1;
        self.records.truncate(MAX_SCORES);

        let rank = (position < self.records.len()).then_some(position);
        Recorded {
            rank,
            is_new_best: rank == Some(0),
        }
    }

    /// A ranked, printable view of the table with `marked` flagged.
    pub fn report(&self, marked: Option<usize>) -> Report<'_> {
        Report {
            ledger: self,
            marked,
        }
    }
}

/// Human-readable ranking produced after a run is recorded.
pub struct Report<'a> {
    ledger: &'a HighScoreLedger,
    marked: Option<usize>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== HIGH SCORES ===")?;
        for (i, r) in self.ledger.records.iter().enumerate() {
            write!(f, "{}. {} - {:.2}%", i + 1, r.score, r.percent)?;
            if self.marked == Some(i) {
                write!(f, "  <--")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(ledger: &HighScoreLedger) -> Vec<u32> {
        ledger.records().iter().map(|r| r.score).collect()
    }

    fn full_ledger() -> HighScoreLedger {
        let mut ledger = HighScoreLedger::new();
        for score in [100, 90, 80, 70, 60, 50, 40, 30, 20, 10] {
            ledger.record(score, score as f64 / 10.0);
        }
        ledger
    }

    // -------------------------------------------------------------------------
    // Ranking
    // -------------------------------------------------------------------------

    #[test]
    fn test_record_sorts_descending() {
        let mut ledger = HighScoreLedger::new();
        ledger.record(100, 10.0);
        ledger.record(200, 20.0);
        ledger.record(150, 15.0);
        assert_eq!(
            ledger.records(),
            &[
                HighScore::new(200, 20.0),
                HighScore::new(150, 15.0),
                HighScore::new(100, 10.0)
            ]
        );
    }

    #[test]
    fn test_first_record_is_new_best() {
        let mut ledger = HighScoreLedger::new();
        let recorded = ledger.record(12, 0.69);
        assert_eq!(
            recorded,
            Recorded {
                rank: Some(0),
                is_new_best: true
            }
        );
    }

    #[test]
    fn test_new_top_score_is_new_best() {
        let mut ledger = HighScoreLedger::new();
        ledger.record(100, 10.0);
        ledger.record(50, 5.0);
        let recorded = ledger.record(300, 30.0);
        assert!(recorded.is_new_best);
        assert_eq!(recorded.rank, Some(0));
    }

    #[test]
    fn test_tie_with_top_is_not_new_best() {
        let mut ledger = HighScoreLedger::new();
        ledger.record(200, 20.0);
        ledger.record(100, 10.0);
        // Same score and same percent: the older entry keeps first place.
        let recorded = ledger.record(200, 20.0);
        assert!(!recorded.is_new_best);
        assert_eq!(recorded.rank, Some(1));
        assert_eq!(scores(&ledger), vec![200, 200, 100]);
    }

    #[test]
    fn test_identical_loaded_record_keeps_top() {
        let mut ledger = HighScoreLedger::parse("200 20.00\n100 10.00\n");
        let recorded = ledger.record(200, 20.0);
        assert_eq!(
            recorded,
            Recorded {
                rank: Some(1),
                is_new_best: false
            }
        );
        assert_eq!(
            ledger.report(recorded.rank).to_string(),
            "=== HIGH SCORES ===\n1. 200 - 20.00%\n2. 200 - 20.00%  <--\n3. 100 - 10.00%\n"
        );
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut ledger = HighScoreLedger::new();
        ledger.record(50, 1.0);
        ledger.record(50, 2.0);
        ledger.record(60, 3.0);
        ledger.record(50, 4.0);
        let percents: Vec<f64> = ledger.records().iter().map(|r| r.percent).collect();
        assert_eq!(percents, vec![3.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_middle_rank() {
        let mut ledger = HighScoreLedger::new();
        ledger.record(300, 3.0);
        ledger.record(100, 1.0);
        let recorded = ledger.record(200, 2.0);
        assert_eq!(recorded.rank, Some(1));
        assert!(!recorded.is_new_best);
    }

    // -------------------------------------------------------------------------
    // Truncation
    // -------------------------------------------------------------------------

    #[test]
    fn test_eleventh_score_drops_lowest() {
        let mut ledger = full_ledger();
        assert_eq!(ledger.len(), MAX_SCORES);
        let recorded = ledger.record(55, 5.5);
        assert_eq!(ledger.len(), MAX_SCORES);
        assert_eq!(recorded.rank, Some(5));
        assert_eq!(
            scores(&ledger),
            vec![100, 90, 80, 70, 60, 55, 50, 40, 30, 20]
        );
    }

    #[test]
    fn test_too_low_score_does_not_place() {
        let mut ledger = full_ledger();
        let before = ledger.clone();
        let recorded = ledger.record(5, 0.5);
        assert_eq!(
            recorded,
            Recorded {
                rank: None,
                is_new_best: false
            }
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_tie_with_lowest_in_full_table_does_not_place() {
        let mut ledger = full_ledger();
        let recorded = ledger.record(10, 1.0);
        assert_eq!(recorded.rank, None);
    }

    #[test]
    fn test_from_records_truncates() {
        let records = (0..15).map(|i| HighScore::new(100 - i, 1.0)).collect();
        let ledger = HighScoreLedger::from_records(records);
        assert_eq!(ledger.len(), MAX_SCORES);
        assert_eq!(ledger.best(), Some(&HighScore::new(100, 1.0)));
    }

    // -------------------------------------------------------------------------
    // Text form
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_keeps_file_order() {
        let ledger = HighScoreLedger::parse("10 1.00\n30 3.00\n20 2.50\n");
        assert_eq!(scores(&ledger), vec![10, 30, 20]);
        assert_eq!(ledger.records()[2].percent, 2.5);
    }

    #[test]
    fn test_parse_stops_at_damage() {
        let ledger = HighScoreLedger::parse("10 1.00\n20 oops\n30 3.00\n");
        assert_eq!(scores(&ledger), vec![10]);
        let ledger = HighScoreLedger::parse("10 1.00\n20");
        assert_eq!(scores(&ledger), vec![10]);
        assert!(HighScoreLedger::parse("").is_empty());
    }

    #[test]
    fn test_parse_reads_at_most_max_scores() {
        let text: String = (0..20).map(|i| format!("{} 1.00\n", i)).collect();
        assert_eq!(HighScoreLedger::parse(&text).len(), MAX_SCORES);
    }

    #[test]
    fn test_to_text_format() {
        let mut ledger = HighScoreLedger::new();
        ledger.record(1203, 69.2307);
        ledger.record(877, 50.5);
        assert_eq!(ledger.to_text(), "1203 69.23\n877 50.50\n");
        assert_eq!(
            scores(&HighScoreLedger::parse(&ledger.to_text())),
            vec![1203, 877]
        );
    }

    #[test]
    fn test_report_marks_new_entry() {
        let mut ledger = HighScoreLedger::new();
        ledger.record(200, 20.0);
        let recorded = ledger.record(200, 20.0);
        let report = ledger.report(recorded.rank).to_string();
        assert_eq!(
            report,
            "=== HIGH SCORES ===\n1. 200 - 20.00%\n2. 200 - 20.00%  <--\n"
        );
    }

    #[test]
    fn test_report_without_mark() {
        let ledger = full_ledger();
        let report = ledger.report(None).to_string();
        assert!(!report.contains("<--"));
        assert!(report.contains("10. 10 - 1.00%"));
    }
}
