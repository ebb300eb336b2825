//! Chunk artifacts on disk.
//!
//! Each group from the segmenter becomes one `chunk_NNNN.log` file holding
//! exactly the group's bytes. A fresh run first clears chunk files left in
//! the same directory by a previous run.

mod naming;
mod store;
mod writer;

pub use naming::{chunk_file_name, is_chunk_file_name};
pub use store::{ChunkStore, FsStore, MemoryStore};
pub use writer::{ChunkWriter, PrepareReport, WriteError};
