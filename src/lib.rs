//! logseg library
//!
//! Splits large, unstructured log files into entry-aligned chunk files that
//! downstream LLM tooling can process one at a time, and recovers JSON from
//! the free-form text such tooling sends back.

pub mod chunk;
pub mod cli;
pub mod config;
pub mod extract;
pub mod pipeline;
pub mod segment;

pub use chunk::{ChunkStore, ChunkWriter, FsStore, MemoryStore};
pub use config::{Config, ConfigError, RunConfig};
pub use extract::extract_json;
pub use pipeline::{run, RunError, RunSummary, Runner};
pub use segment::{BoundaryPattern, LineGroup, OrphanPolicy, Segmenter};
