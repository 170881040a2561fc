//! Row sinks for periodic statistics export
//!
//! The engine never writes files itself. Drivers hand rows to anything that
//! implements [`RowSink`]; [`CsvSink`] is the file-backed implementation and
//! [`MemorySink`] keeps rows around for inspection.

use std::io::Write;

use crate::core::error::{Result, SimError};
use crate::core::types::{Tick, Wealth};
use crate::stats::classes::ClassCounts;
use crate::stats::gini::gini;
use crate::stats::snapshot::Snapshot;

/// One periodic record
#[derive(Debug, Clone, Copy)]
pub enum Row<'a> {
    /// Tercile counts and Gini of one world
    Classes(&'a Snapshot),
    /// Raw per-turtle wealth list, in slot order
    Wealths { tick: Tick, wealths: &'a [Wealth] },
    /// One world's statistics inside a side-by-side comparison
    Labeled {
        label: &'a str,
        snapshot: &'a Snapshot,
    },
}

/// Anything that accepts rows
pub trait RowSink {
    fn accept(&mut self, row: &Row<'_>) -> Result<()>;
}

/// Sink that drops every row
#[derive(Debug, Default)]
pub struct NullSink;

impl RowSink for NullSink {
    fn accept(&mut self, _row: &Row<'_>) -> Result<()> {
        Ok(())
    }
}

/// Column layout of a CSV file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    /// `Round,Poor_Count,Middle_Count,Rich_Count,Gini_Coefficient`
    Classes,
    /// `Round,Agent,Wealth`, one line per turtle
    Wealths,
    /// `Round,Model_Type,Population,Poor_Count,Middle_Count,Rich_Count,Avg_Wealth,Gini_Coefficient`
    Comparison,
}

impl CsvLayout {
    pub fn header(self) -> &'static str {
        match self {
            CsvLayout::Classes => "Round,Poor_Count,Middle_Count,Rich_Count,Gini_Coefficient",
            CsvLayout::Wealths => "Round,Agent,Wealth",
            CsvLayout::Comparison => {
                "Round,Model_Type,Population,Poor_Count,Middle_Count,Rich_Count,Avg_Wealth,Gini_Coefficient"
            }
        }
    }

    fn name(self) -> &'static str {
        match self {
            CsvLayout::Classes => "classes",
            CsvLayout::Wealths => "wealths",
            CsvLayout::Comparison => "comparison",
        }
    }
}

/// CSV writer over any `Write`
///
/// The header goes out on construction. Rows are left to the writer's own
/// buffering; `into_inner` flushes.
pub struct CsvSink<W: Write> {
    writer: W,
    layout: CsvLayout,
    rows: usize,
}

impl<W: Write> CsvSink<W> {
    pub fn new(mut writer: W, layout: CsvLayout) -> Result<Self> {
        writeln!(writer, "{}", layout.header())?;
        Ok(Self {
            writer,
            layout,
            rows: 0,
        })
    }

    pub fn layout(&self) -> CsvLayout {
        self.layout
    }

    /// Data lines written so far, header excluded
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_classes(&mut self, tick: Tick, classes: &ClassCounts, gini: f64) -> Result<()> {
        writeln!(
            self.writer,
            "{},{},{},{},{:.4}",
            tick, classes.poor, classes.middle, classes.rich, gini
        )?;
        self.rows += 1;
        Ok(())
    }

    fn mismatch(&self) -> SimError {
        SimError::LayoutMismatch {
            expected: self.layout.name(),
        }
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn accept(&mut self, row: &Row<'_>) -> Result<()> {
        match (self.layout, *row) {
            (CsvLayout::Classes, Row::Classes(snapshot)) => {
                self.write_classes(snapshot.tick, &snapshot.classes, snapshot.gini)?;
            }
            // a wealth list is summarised on the fly; empty lists are skipped
            (CsvLayout::Classes, Row::Wealths { tick, wealths }) => {
                if !wealths.is_empty() {
                    self.write_classes(tick, &ClassCounts::tally(wealths), gini(wealths))?;
                }
            }
            (CsvLayout::Wealths, Row::Wealths { tick, wealths }) => {
                for (slot, wealth) in wealths.iter().enumerate() {
                    writeln!(self.writer, "{},{},{}", tick, slot, wealth)?;
                    self.rows += 1;
                }
            }
            (CsvLayout::Comparison, Row::Labeled { label, snapshot }) => {
                writeln!(
                    self.writer,
                    "{},{},{},{},{},{},{:.2},{:.4}",
                    snapshot.tick,
                    label,
                    snapshot.population,
                    snapshot.classes.poor,
                    snapshot.classes.middle,
                    snapshot.classes.rich,
                    snapshot.mean_wealth,
                    snapshot.gini
                )?;
                self.rows += 1;
            }
            _ => return Err(self.mismatch()),
        }
        Ok(())
    }
}

/// Owned copy of a [`Row`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRow {
    Classes(Snapshot),
    Wealths { tick: Tick, wealths: Vec<Wealth> },
    Labeled { label: String, snapshot: Snapshot },
}

impl From<&Row<'_>> for RecordedRow {
    fn from(row: &Row<'_>) -> Self {
        match *row {
            Row::Classes(snapshot) => RecordedRow::Classes(snapshot.clone()),
            Row::Wealths { tick, wealths } => RecordedRow::Wealths {
                tick,
                wealths: wealths.to_vec(),
            },
            Row::Labeled { label, snapshot } => RecordedRow::Labeled {
                label: label.to_string(),
                snapshot: snapshot.clone(),
            },
        }
    }
}

/// Keeps every row in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    rows: Vec<RecordedRow>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[RecordedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RowSink for MemorySink {
    fn accept(&mut self, row: &Row<'_>) -> Result<()> {
        self.rows.push(RecordedRow::from(row));
        Ok(())
    }
}
