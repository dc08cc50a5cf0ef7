//! Narrow interfaces the pipeline stages delegate to.
//!
//! Stages never touch the filesystem or the network directly; they receive a
//! [`FileAccess`] and a [`TextGenerator`] so tests can substitute fakes.

mod files;
mod generation;

pub use files::{FileAccess, LocalFiles, WriteMode, WriteStatus};
pub use generation::TextGenerator;
