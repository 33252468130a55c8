use csv::StringRecord;

use crate::error::{PlotError, Result};

const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Measurements of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub generate_ns: u64,
    pub size_bytes: u64,
    pub transfer_ns: u64,
}

impl Record {
    pub const FIELDS: [&'static str; 3] = ["generate", "size", "transfer"];

    pub fn new(generate_ns: u64, size_bytes: u64, transfer_ns: u64) -> Self {
        Self {
            generate_ns,
            size_bytes,
            transfer_ns,
        }
    }

    /// Parse a record from a CSV row found at `line` of the input.
    pub fn from_csv_record(record: &StringRecord, line: usize) -> Result<Self> {
        if record.len() != Self::FIELDS.len() {
            return Err(PlotError::FieldCount {
                line,
                expected: Self::FIELDS.len(),
                found: record.len(),
            });
        }

        let field = |offset: usize| -> Result<u64> {
            let value = &record[offset];
            value.trim().parse().map_err(|source| PlotError::Parse {
                line,
                field: Self::FIELDS[offset],
                value: value.to_string(),
                source,
            })
        };

        Ok(Record {
            generate_ns: field(0)?,
            size_bytes: field(1)?,
            transfer_ns: field(2)?,
        })
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.generate_ns, self.size_bytes, self.transfer_ns
        )
    }
}

/// A measured quantity plotted as one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Generate,
    Size,
    Transfer,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Generate, Metric::Size, Metric::Transfer];

    /// Plotted value of this metric for `record`. Times are in milliseconds.
    pub fn value(&self, record: &Record) -> f64 {
        match self {
            Metric::Generate => record.generate_ns as f64 / NANOS_PER_MILLI,
            Metric::Size => record.size_bytes as f64,
            Metric::Transfer => record.transfer_ns as f64 / NANOS_PER_MILLI,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::Generate => "GENERATE TOKEN",
            Metric::Size => "TOKEN SIZE",
            Metric::Transfer => "DATA TRANSFER",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            Metric::Generate | Metric::Transfer => "time (ms)",
            Metric::Size => "size (bytes)",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Metric::Generate => "generate.png",
            Metric::Size => "size.png",
            Metric::Transfer => "transfer.png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_record() {
        let row = StringRecord::from(vec!["1500", "312", " 2750000"]);
        let record = Record::from_csv_record(&row, 1).unwrap();

        assert_eq!(record, Record::new(1500, 312, 2_750_000));
        assert_eq!(record.to_string(), "1500,312,2750000");
    }

    #[test]
    fn rejects_non_integer_field() {
        let row = StringRecord::from(vec!["abc", "20", "30"]);
        let err = Record::from_csv_record(&row, 7).unwrap_err();

        match err {
            PlotError::Parse { line, field, value, .. } => {
                assert_eq!(line, 7);
                assert_eq!(field, "generate");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_wrong_field_count() {
        let row = StringRecord::from(vec!["1", "2", "3", "4"]);
        let err = Record::from_csv_record(&row, 3).unwrap_err();

        assert!(matches!(
            err,
            PlotError::FieldCount { line: 3, expected: 3, found: 4 }
        ));
    }

    #[test]
    fn scales_times_to_milliseconds() {
        let record = Record::new(1_000_000, 512, 2_500_000);

        assert_eq!(Metric::Generate.value(&record), 1.0);
        assert_eq!(Metric::Size.value(&record), 512.0);
        assert_eq!(Metric::Transfer.value(&record), 2.5);

        let record = Record::new(2_500_000, 0, 0);
        assert_eq!(Metric::Generate.value(&record), 2.5);
    }

    #[test]
    fn metric_outputs() {
        let names: Vec<_> = Metric::ALL.iter().map(Metric::file_name).collect();
        assert_eq!(names, ["generate.png", "size.png", "transfer.png"]);
        assert_eq!(Metric::Size.y_label(), "size (bytes)");
        assert_eq!(Metric::Transfer.y_label(), "time (ms)");
    }
}
