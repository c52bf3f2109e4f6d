//! Snapshot export
//!
//! Writes channel images to TIFF so a frame can be inspected offline.

mod writer;
mod tiff_writer;


pub use writer::SnapshotWriter;
pub use tiff_writer::TiffSnapshotWriter;
