use std::path::PathBuf;

use thiserror::Error;

use crate::inference::EndpointError;
use crate::pipeline::{Slot, Stage};

/// Fatal errors that end a tailoring run.
///
/// Write failures are deliberately absent: they are reported through
/// [`WriteStatus`](crate::capability::WriteStatus) and never abort a run.
#[derive(Debug, Error)]
pub enum TailorError {
    #[error("Failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Text generation failed")]
    Endpoint(#[from] EndpointError),

    #[error("Stage {stage} requires `{slot}`, which has not been set")]
    MissingSlot { stage: Stage, slot: Slot },

    #[error("Config error: {0}")]
    Config(String),
}

impl TailorError {
    /// True when the run failed because an input file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TailorError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
