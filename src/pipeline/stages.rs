//! The four stage functions. The three producing stages take the shared state
//! by `&mut`, read the slots they depend on, and fill exactly one slot.
//! `save_resume` only reads `tailored_resume` and performs the external write.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::prompt::render_prompt;
use super::state::{PipelineState, Slot, Stage};
use crate::capability::{FileAccess, TextGenerator, WriteStatus};
use crate::error::TailorError;

/// Input and output locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    pub resume: PathBuf,
    pub description: PathBuf,
    pub output: PathBuf,
}

impl Default for PipelinePaths {
    fn default() -> Self {
        Self {
            resume: PathBuf::from("resume.txt"),
            description: PathBuf::from("description.txt"),
            output: PathBuf::from("new_resume.txt"),
        }
    }
}

pub async fn read_resume(
    state: &mut PipelineState,
    files: &impl FileAccess,
    path: &Path,
) -> Result<(), TailorError> {
    read_into(state, files, path, Slot::ResumeData).await
}

pub async fn read_description(
    state: &mut PipelineState,
    files: &impl FileAccess,
    path: &Path,
) -> Result<(), TailorError> {
    read_into(state, files, path, Slot::JobData).await
}

async fn read_into(
    state: &mut PipelineState,
    files: &impl FileAccess,
    path: &Path,
    slot: Slot,
) -> Result<(), TailorError> {
    let content = files
        .read(path)
        .await
        .map_err(|source| TailorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), chars = content.chars().count(), %slot, "file read");
    state.set(slot, content);
    Ok(())
}

/// Build the tailoring prompt from `resume_data` and `job_data` and store the
/// model's answer in `tailored_resume`.
pub async fn tailor_resume(
    state: &mut PipelineState,
    generator: &impl TextGenerator,
) -> Result<(), TailorError> {
    let prompt = {
        let resume = require(state, Stage::TailorResume, Slot::ResumeData)?;
        let job = require(state, Stage::TailorResume, Slot::JobData)?;
        render_prompt(resume, job)
    };
    debug!(prompt_chars = prompt.chars().count(), "prompt rendered");

    let tailored = generator.generate(&prompt).await?;
    state.set(Slot::TailoredResume, tailored);
    Ok(())
}

/// Write `tailored_resume` to `path`.
///
/// The returned status is informational; a failed write is not an error.
pub async fn save_resume(
    state: &PipelineState,
    files: &impl FileAccess,
    path: &Path,
) -> Result<WriteStatus, TailorError> {
    let content = require(state, Stage::SaveResume, Slot::TailoredResume)?;
    let status = files.write(path, content).await;
    if !status.is_written() {
        warn!(path = %path.display(), %status, "tailored resume was not saved");
    }
    Ok(status)
}

fn require(state: &PipelineState, stage: Stage, slot: Slot) -> Result<&str, TailorError> {
    state
        .get(slot)
        .ok_or(TailorError::MissingSlot { stage, slot })
}
