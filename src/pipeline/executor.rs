use chrono::Utc;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

use super::report::RunReport;
use super::stages::{
    PipelinePaths, read_description, read_resume, save_resume, tailor_resume,
};
use super::state::{PipelineState, Slot, Stage};
use crate::capability::{FileAccess, TextGenerator, WriteStatus};
use crate::error::TailorError;

/// Runs the fixed stage chain over a fresh [`PipelineState`].
///
/// No retries and no branching: the first stage error ends the run and is
/// returned as is. A failed write is not an error and still yields a report.
pub struct Executor<'a, F, G> {
    files: &'a F,
    generator: &'a G,
    paths: PipelinePaths,
}

impl<'a, F: FileAccess, G: TextGenerator> Executor<'a, F, G> {
    pub fn new(files: &'a F, generator: &'a G, paths: PipelinePaths) -> Self {
        Self {
            files,
            generator,
            paths,
        }
    }

    pub async fn run(&self) -> Result<RunReport, TailorError> {
        self.run_with(|_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_stage` right before each stage starts.
    pub async fn run_with(&self, mut on_stage: impl FnMut(Stage)) -> Result<RunReport, TailorError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let span = info_span!("run", run_id = %run_id);

        async move {
            let mut state = PipelineState::new();
            let write_status = self
                .run_stages(&Stage::ALL, &mut state, &mut on_stage)
                .await?
                .unwrap_or_else(|| WriteStatus::Failed {
                    path: self.paths.output.clone(),
                    reason: "save stage was not executed".into(),
                });
            let tailored_chars = state
                .get(Slot::TailoredResume)
                .map_or(0, |text| text.chars().count());

            let report = RunReport::new(
                run_id,
                Stage::ALL.to_vec(),
                write_status,
                tailored_chars,
                started_at,
            );
            info!(
                persisted = report.persisted(),
                duration_ms = report.duration_ms,
                "run complete"
            );
            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// Execute `stages` in order against `state`.
    ///
    /// Refuses to start a stage whose declared inputs are unset. Returns the
    /// write status if `SaveResume` was among the stages.
    pub async fn run_stages(
        &self,
        stages: &[Stage],
        state: &mut PipelineState,
        on_stage: &mut impl FnMut(Stage),
    ) -> Result<Option<WriteStatus>, TailorError> {
        let mut write_status = None;

        for &stage in stages {
            if let Some(slot) = stage.missing_input(state) {
                return Err(TailorError::MissingSlot { stage, slot });
            }
            on_stage(stage);
            info!(%stage, "stage started");

            match stage {
                Stage::ReadResume => {
                    read_resume(state, self.files, &self.paths.resume).await?;
                }
                Stage::ReadDescription => {
                    read_description(state, self.files, &self.paths.description).await?;
                }
                Stage::TailorResume => tailor_resume(state, self.generator).await?,
                Stage::SaveResume => {
                    let status = save_resume(&*state, self.files, &self.paths.output).await?;
                    info!(%status, "save finished");
                    write_status = Some(status);
                }
            }
            debug!(%stage, writes = ?stage.writes(), "stage finished");
        }

        Ok(write_status)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::capability::{LocalFiles, WriteMode};
    use crate::inference::{GenerationParameters, InferenceClient};
    use crate::pipeline::fakes::{FakeGenerator, MemoryFiles};

    const RESUME: &str = "EXPERIENCE\nAcme Corp, 2020-2022, Engineer\n...";
    const JOB: &str = "Seeking a backend engineer with Go experience.";

    fn inputs() -> MemoryFiles {
        MemoryFiles::with(&[("resume.txt", RESUME), ("description.txt", JOB)])
    }

    fn paths_in(dir: &TempDir) -> PipelinePaths {
        PipelinePaths {
            resume: dir.path().join("resume.txt"),
            description: dir.path().join("description.txt"),
            output: dir.path().join("new_resume.txt"),
        }
    }

    fn write_inputs(dir: &TempDir) {
        std::fs::write(dir.path().join("resume.txt"), RESUME).unwrap();
        std::fs::write(dir.path().join("description.txt"), JOB).unwrap();
    }

    #[tokio::test]
    async fn happy_path_runs_every_stage_in_order() {
        let files = inputs();
        let generator = FakeGenerator::replying("TAILORED RESUME");
        let executor = Executor::new(&files, &generator, PipelinePaths::default());

        let mut seen = Vec::new();
        let report = executor.run_with(|stage| seen.push(stage)).await.unwrap();

        assert_eq!(seen, Stage::ALL.to_vec());
        assert_eq!(report.stages, Stage::ALL.to_vec());
        assert!(report.persisted());
        assert_eq!(report.output_path, PathBuf::from("new_resume.txt"));
        assert_eq!(report.tailored_chars, 15);
        assert_eq!(
            *files.reads.borrow(),
            vec![PathBuf::from("resume.txt"), PathBuf::from("description.txt")]
        );
        assert_eq!(
            files.content("new_resume.txt").as_deref(),
            Some("TAILORED RESUME")
        );
    }

    #[tokio::test]
    async fn tailored_length_counts_characters_not_bytes() {
        let files = inputs();
        let generator = FakeGenerator::replying("Currículo técnico");
        let report = Executor::new(&files, &generator, PipelinePaths::default())
            .run()
            .await
            .unwrap();

        assert_eq!(report.tailored_chars, 17);
        assert_eq!(
            files.content("new_resume.txt").as_deref(),
            Some("Currículo técnico")
        );
    }

    #[tokio::test]
    async fn prompt_contains_both_inputs_verbatim() {
        let files = inputs();
        let generator = FakeGenerator::replying("ok");
        Executor::new(&files, &generator, PipelinePaths::default())
            .run()
            .await
            .unwrap();

        let prompts = generator.prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(RESUME));
        assert!(prompts[0].contains(JOB));
    }

    #[tokio::test]
    async fn resume_read_failure_stops_before_anything_else() {
        let files = MemoryFiles::with(&[("description.txt", JOB)]);
        let generator = FakeGenerator::replying("unused");
        let executor = Executor::new(&files, &generator, PipelinePaths::default());

        let mut seen = Vec::new();
        let err = executor.run_with(|stage| seen.push(stage)).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(seen, vec![Stage::ReadResume]);
        assert_eq!(*files.reads.borrow(), vec![PathBuf::from("resume.txt")]);
        assert!(generator.prompts.borrow().is_empty());
        assert!(files.writes.borrow().is_empty());
    }

    #[tokio::test]
    async fn endpoint_failure_aborts_without_writing() {
        let files = inputs();
        let generator = FakeGenerator::failing(503);
        let executor = Executor::new(&files, &generator, PipelinePaths::default());

        let err = executor.run().await.unwrap_err();

        assert!(matches!(err, TailorError::Endpoint(_)));
        assert!(files.writes.borrow().is_empty());
    }

    #[tokio::test]
    async fn failed_write_still_completes_the_run() {
        let files = inputs().failing_writes();
        let generator = FakeGenerator::replying("TAILORED");
        let executor = Executor::new(&files, &generator, PipelinePaths::default());

        let report = executor.run().await.unwrap();

        assert!(!report.persisted());
        assert_eq!(report.stages, Stage::ALL.to_vec());
        assert_eq!(
            report.write_status.to_string(),
            "Error writing file: disk full"
        );
        assert_eq!(files.writes.borrow().len(), 1);
    }

    #[tokio::test]
    async fn stage_with_unset_inputs_is_never_invoked() {
        let files = inputs();
        let generator = FakeGenerator::replying("unused");
        let executor = Executor::new(&files, &generator, PipelinePaths::default());
        let mut state = PipelineState::new();

        let err = executor
            .run_stages(&[Stage::TailorResume], &mut state, &mut |_: Stage| {})
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TailorError::MissingSlot {
                stage: Stage::TailorResume,
                slot: Slot::ResumeData
            }
        ));
        assert!(generator.prompts.borrow().is_empty());

        let err = executor
            .run_stages(&[Stage::SaveResume], &mut state, &mut |_: Stage| {})
            .await
            .unwrap_err();
        assert!(matches!(err, TailorError::MissingSlot { .. }));
        assert!(files.writes.borrow().is_empty());
    }

    #[tokio::test]
    async fn read_stages_alone_fill_inputs() {
        let files = inputs();
        let generator = FakeGenerator::replying("unused");
        let executor = Executor::new(&files, &generator, PipelinePaths::default());
        let mut state = PipelineState::new();

        let status = executor
            .run_stages(
                &[Stage::ReadResume, Stage::ReadDescription],
                &mut state,
                &mut |_: Stage| {},
            )
            .await
            .unwrap();

        assert!(status.is_none());
        assert_eq!(state.resume_data.as_deref(), Some(RESUME));
        assert_eq!(state.job_data.as_deref(), Some(JOB));
        assert!(state.tailored_resume.is_none());
    }

    #[tokio::test]
    async fn rerun_overwrites_existing_output() {
        let dir = TempDir::new().unwrap();
        write_inputs(&dir);
        std::fs::write(dir.path().join("new_resume.txt"), "stale content from last week").unwrap();

        let files = LocalFiles::new(WriteMode::Overwrite);
        let generator = FakeGenerator::replying("fresh");
        let executor = Executor::new(&files, &generator, paths_in(&dir));

        let first = executor.run().await.unwrap();
        let second = executor.run().await.unwrap();

        assert!(first.persisted());
        assert!(second.persisted());
        assert_ne!(first.run_id, second.run_id);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("new_resume.txt")).unwrap(),
            "fresh"
        );
    }

    #[tokio::test]
    async fn create_new_mode_reports_existing_output() {
        let dir = TempDir::new().unwrap();
        write_inputs(&dir);
        std::fs::write(dir.path().join("new_resume.txt"), "keep").unwrap();

        let files = LocalFiles::new(WriteMode::CreateNew);
        let generator = FakeGenerator::replying("fresh");
        let report = Executor::new(&files, &generator, paths_in(&dir))
            .run()
            .await
            .unwrap();

        assert!(matches!(report.write_status, WriteStatus::AlreadyExists { .. }));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("new_resume.txt")).unwrap(),
            "keep"
        );
    }

    #[tokio::test]
    async fn end_to_end_against_http_endpoint() {
        let dir = TempDir::new().unwrap();
        write_inputs(&dir);
        std::fs::write(dir.path().join("new_resume.txt"), "previous").unwrap();

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"generated_text": "\n  EXPERIENCE\nAcme Corp, 2020-2022, Engineer\n- Go services  \n"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = InferenceClient::with_base_url(
            "hf_test".into(),
            &server.uri(),
            "Qwen/Qwen2.5-72B-Instruct",
            GenerationParameters::new(0.5, 1024),
            Duration::from_secs(5),
        )
        .unwrap();
        let files = LocalFiles::default();

        let report = Executor::new(&files, &client, paths_in(&dir))
            .run()
            .await
            .unwrap();

        assert!(report.persisted());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("new_resume.txt")).unwrap(),
            "EXPERIENCE\nAcme Corp, 2020-2022, Engineer\n- Go services"
        );

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let inputs = body["inputs"].as_str().unwrap();
        assert!(inputs.contains(RESUME));
        assert!(inputs.contains(JOB));
    }
}
