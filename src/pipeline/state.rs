use std::fmt;

use serde::{Deserialize, Serialize};

/// The named fields of [`PipelineState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    ResumeData,
    JobData,
    TailoredResume,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::ResumeData => write!(f, "resume_data"),
            Slot::JobData => write!(f, "job_data"),
            Slot::TailoredResume => write!(f, "tailored_resume"),
        }
    }
}

/// Shared record threaded through every stage of a run.
///
/// Slots start unset and are filled in stage order. Nothing prevents a slot
/// from being written twice; the last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineState {
    pub resume_data: Option<String>,
    pub job_data: Option<String>,
    pub tailored_resume: Option<String>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::ResumeData => self.resume_data.as_deref(),
            Slot::JobData => self.job_data.as_deref(),
            Slot::TailoredResume => self.tailored_resume.as_deref(),
        }
    }

    pub fn set(&mut self, slot: Slot, value: String) {
        let field = match slot {
            Slot::ResumeData => &mut self.resume_data,
            Slot::JobData => &mut self.job_data,
            Slot::TailoredResume => &mut self.tailored_resume,
        };
        *field = Some(value);
    }

    pub fn is_set(&self, slot: Slot) -> bool {
        self.get(slot).is_some()
    }
}

/// The four stages of a tailoring run, in execution order.
///
/// start → READ_RESUME → READ_DESCRIPTION → TAILOR_RESUME → SAVE_RESUME → end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ReadResume,
    ReadDescription,
    TailorResume,
    SaveResume,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::ReadResume,
        Stage::ReadDescription,
        Stage::TailorResume,
        Stage::SaveResume,
    ];

    /// Slots that must be set before this stage may run.
    pub fn reads(self) -> &'static [Slot] {
        match self {
            Stage::ReadResume | Stage::ReadDescription => &[],
            Stage::TailorResume => &[Slot::ResumeData, Slot::JobData],
            Stage::SaveResume => &[Slot::TailoredResume],
        }
    }

    /// Slot this stage fills, if any. `SaveResume` only has an external effect.
    pub fn writes(self) -> Option<Slot> {
        match self {
            Stage::ReadResume => Some(Slot::ResumeData),
            Stage::ReadDescription => Some(Slot::JobData),
            Stage::TailorResume => Some(Slot::TailoredResume),
            Stage::SaveResume => None,
        }
    }

    /// First declared input that is still unset in `state`.
    pub fn missing_input(self, state: &PipelineState) -> Option<Slot> {
        self.reads().iter().copied().find(|slot| !state.is_set(*slot))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::ReadResume => write!(f, "READ_RESUME"),
            Stage::ReadDescription => write!(f, "READ_DESCRIPTION"),
            Stage::TailorResume => write!(f, "TAILOR_RESUME"),
            Stage::SaveResume => write!(f, "SAVE_RESUME"),
        }
    }
}
