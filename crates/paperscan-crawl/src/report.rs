//! Per-year term counts over a result file

use std::collections::BTreeMap;

use comfy_table::{Cell, CellAlignment, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use paperscan_core::fmt_num;

use crate::sink::ResultRecord;
use crate::vocabulary::Vocabulary;

/// Number of documents per year that contain each vocabulary term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCounts {
    /// Column order (vocabulary order)
    terms: Vec<String>,
    /// year → (per-term counts, documents that year)
    years: BTreeMap<String, (Vec<usize>, usize)>,
}

impl TermCounts {
    /// Tally records. Terms not in the vocabulary are ignored.
    pub fn from_records(records: &[ResultRecord], vocabulary: &Vocabulary) -> Self {
        let terms: Vec<String> = vocabulary.texts().map(str::to_string).collect();
        let mut years: BTreeMap<String, (Vec<usize>, usize)> = BTreeMap::new();

        for record in records {
            let (counts, docs) = years
                .entry(record.candidate.year.clone())
                .or_insert_with(|| (vec![0; terms.len()], 0));
            *docs += 1;
            for (i, term) in terms.iter().enumerate() {
                if record.matched_terms.contains(term) {
                    counts[i] += 1;
                }
            }
        }

        Self { terms, years }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Years present in the records, ascending
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.years.keys().map(String::as_str)
    }

    /// Documents from `year` containing `term` (0 if either is unknown)
    pub fn count(&self, year: &str, term: &str) -> usize {
        let Some(col) = self.terms.iter().position(|t| t == term) else {
            return 0;
        };
        self.years.get(year).map_or(0, |(counts, _)| counts[col])
    }

    /// Documents retrieved for `year`
    pub fn documents(&self, year: &str) -> usize {
        self.years.get(year).map_or(0, |(_, docs)| *docs)
    }

    /// Rows = years, columns = terms
    pub fn format_table(&self) -> String {
        let mut table = Table::new();
        let mut header = vec![
            Cell::new("Year")
                .fg(Color::Cyan)
                .add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Docs").fg(Color::Cyan),
        ];
        header.extend(self.terms.iter().map(|t| Cell::new(t).fg(Color::Cyan)));
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(header);

        for (year, (counts, docs)) in &self.years {
            let mut row = vec![
                Cell::new(year),
                Cell::new(fmt_num(*docs)).set_alignment(CellAlignment::Right),
            ];
            row.extend(
                counts
                    .iter()
                    .map(|c| Cell::new(fmt_num(*c)).set_alignment(CellAlignment::Right)),
            );
            table.add_row(row);
        }

        format!("{table}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;

    fn record(year: &str, seq: u32, terms: &[&str]) -> ResultRecord {
        let candidate = Candidate::new("P", year, "1", seq);
        ResultRecord {
            url: candidate.id(),
            candidate,
            matched_terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn counts_documents_per_year() {
        let vocab = Vocabulary::new(["bert", "attention is all you need"]).unwrap();
        let records = vec![
            record("18", 1, &["bert"]),
            record("18", 2, &["bert", "attention is all you need"]),
            record("19", 1, &[]),
            record("17", 3, &["attention is all you need"]),
        ];
        let counts = TermCounts::from_records(&records, &vocab);

        assert_eq!(counts.years().collect::<Vec<_>>(), vec!["17", "18", "19"]);
        assert_eq!(counts.count("18", "bert"), 2);
        assert_eq!(counts.count("18", "attention is all you need"), 1);
        assert_eq!(counts.count("19", "bert"), 0);
        assert_eq!(counts.documents("19"), 1);
        assert_eq!(counts.count("20", "bert"), 0);
        assert_eq!(counts.count("18", "gpt"), 0);
    }

    #[test]
    fn unknown_terms_ignored() {
        let vocab = Vocabulary::new(["bert"]).unwrap();
        let counts = TermCounts::from_records(&[record("18", 1, &["elmo"])], &vocab);
        assert_eq!(counts.terms(), ["bert"]);
        assert_eq!(counts.count("18", "bert"), 0);
        assert_eq!(counts.documents("18"), 1);
    }

    #[test]
    fn table_has_term_columns() {
        let vocab = Vocabulary::new(["bert", "elmo"]).unwrap();
        let counts = TermCounts::from_records(&[record("18", 1, &["elmo"])], &vocab);
        let table = counts.format_table();
        assert!(table.contains("bert"));
        assert!(table.contains("elmo"));
        assert!(table.contains("18"));
    }
}
