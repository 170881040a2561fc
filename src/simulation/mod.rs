//! Engine state, the tick, and the drivers built on top of it

pub mod comparison;
pub mod recorder;
pub mod tick;
pub mod world;

pub use comparison::{Comparison, ComparisonSummary, VariantRun, VariantSummary};
pub use recorder::{CsvLayout, CsvSink, MemorySink, NullSink, RecordedRow, Row, RowSink};
pub use tick::run_tick;
pub use world::{TickOutcome, World};
