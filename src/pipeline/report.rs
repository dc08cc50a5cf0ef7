use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::Stage;
use crate::capability::WriteStatus;

/// Summary of a run that reached the end of the chain.
///
/// Produced even when the final write failed; check [`RunReport::persisted`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub stages: Vec<Stage>,
    pub write_status: WriteStatus,
    pub output_path: PathBuf,
    pub tailored_chars: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
}

impl RunReport {
    pub fn new(
        run_id: Uuid,
        stages: Vec<Stage>,
        write_status: WriteStatus,
        tailored_chars: usize,
        started_at: DateTime<Utc>,
    ) -> Self {
        let completed_at = Utc::now();
        Self {
            run_id,
            stages,
            output_path: write_status.path().to_path_buf(),
            write_status,
            tailored_chars,
            started_at,
            completed_at,
            duration_ms: (completed_at - started_at).num_milliseconds(),
        }
    }

    /// Whether the tailored resume actually reached disk.
    pub fn persisted(&self) -> bool {
        self.write_status.is_written()
    }
}
