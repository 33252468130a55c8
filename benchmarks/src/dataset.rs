//! Reading and writing grouped benchmark results.
//!
//! A results file holds one group of rows per scheme, in scheme order, with
//! groups separated by a blank line:
//!
//! ```text
//! 1843520,343,2231045
//! 1790112,343,1984331
//!
//! 160811,235,721994
//! ...
//! ```
//!
//! Each row is `generate_ns,size_bytes,transfer_ns`. There is no header.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use jwt_bench_config::{PlotConfig, Scheme};

use crate::error::{PlotError, Result};
use crate::models::Record;

pub const LOG_TARGET: &str = "jwt-bench::dataset";

/// Trials of one scheme in measurement order.
pub type Group = Vec<Record>;

/// Measured groups, each paired with the scheme it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    groups: Vec<(Scheme, Group)>,
}

impl Dataset {
    pub fn new(groups: Vec<(Scheme, Group)>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[(Scheme, Group)] {
        &self.groups
    }

    pub fn group(&self, scheme: Scheme) -> Option<&Group> {
        self.groups
            .iter()
            .find(|(s, _)| *s == scheme)
            .map(|(_, group)| group)
    }

    /// Read the results file named by `config.input`.
    pub fn from_path(config: &PlotConfig) -> Result<Self> {
        let path = &config.input;
        let file = File::open(path).map_err(|source| PlotError::FileAccess {
            path: path.clone(),
            source,
        })?;

        let dataset = Self::from_reader(BufReader::new(file), &config.schemes).map_err(
            |err| match err {
                PlotError::FileAccess { source, .. } => PlotError::FileAccess {
                    path: path.clone(),
                    source,
                },
                err => err,
            },
        )?;

        tracing::info!(
            target: LOG_TARGET,
            path = %path.display(),
            groups = dataset.groups.len(),
            "loaded results",
        );
        Ok(dataset)
    }

    /// Parse grouped results, assigning groups to `schemes` in order.
    ///
    /// Blank lines at the very end of the input are ignored; every other blank
    /// line starts the next group.
    pub fn from_reader<R: BufRead>(reader: R, schemes: &[Scheme]) -> Result<Self> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|source| PlotError::FileAccess {
                path: Default::default(),
                source,
            })?;
            lines.push(line);
        }
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let mut groups: Vec<(Scheme, Group)> =
            schemes.iter().map(|scheme| (*scheme, Group::new())).collect();
        let mut index = 0;

        for (number, line) in lines.iter().enumerate() {
            let number = number + 1;

            if line.is_empty() {
                index += 1;
                if index >= groups.len() {
                    return Err(PlotError::TooManyGroups {
                        line: number,
                        group: index + 1,
                        limit: groups.len(),
                    });
                }
                tracing::debug!(
                    target: LOG_TARGET,
                    line = number,
                    scheme = %groups[index].0,
                    "starting next group",
                );
                continue;
            }

            let Some((_, group)) = groups.get_mut(index) else {
                return Err(PlotError::TooManyGroups {
                    line: number,
                    group: index + 1,
                    limit: schemes.len(),
                });
            };
            let row = parse_row(line, number)?;
            group.push(Record::from_csv_record(&row, number)?);
        }

        Ok(Self { groups })
    }

    /// Write the dataset in the format [`Dataset::from_reader`] reads.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), std::io::Error> {
        for (position, (_, group)) in self.groups.iter().enumerate() {
            if position > 0 {
                writer.write_all(b"\n")?;
            }

            let mut csv = WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut writer);
            for record in group {
                csv.write_record([
                    record.generate_ns.to_string(),
                    record.size_bytes.to_string(),
                    record.transfer_ns.to_string(),
                ])?;
            }
            csv.flush()?;
        }
        writer.flush()
    }

    /// Write the dataset to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file_access = |source| PlotError::FileAccess {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(file_access)?;
        self.write_to(std::io::BufWriter::new(file))
            .map_err(file_access)?;

        tracing::info!(
            target: LOG_TARGET,
            path = %path.display(),
            "saved results",
        );
        Ok(())
    }
}

fn parse_row(line: &str, number: usize) -> Result<StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut row = StringRecord::new();
    reader
        .read_record(&mut row)
        .map_err(|source| PlotError::Csv {
            line: number,
            source,
        })?;
    Ok(row)
}
