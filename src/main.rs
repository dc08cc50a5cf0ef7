mod capability;
mod cli;
mod config;
mod error;
mod inference;
mod pipeline;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use capability::LocalFiles;
use cli::{Cli, Command};
use config::TailorConfig;
use error::TailorError;
use inference::InferenceClient;
use pipeline::{Executor, PipelineState, Stage, render_prompt};
use ui::{RunProgress, SpinnerAwareWriter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let spinner = ProgressBar::new_spinner();
    init_tracing(cli.verbose, spinner.clone());

    match run(cli, spinner).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool, spinner: ProgressBar) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("resume_tailor={default_level}"))),
        )
        .with_writer(SpinnerAwareWriter::new(spinner, std::io::stderr))
        .with_target(false)
        .init();
}

async fn run(cli: Cli, spinner: ProgressBar) -> Result<()> {
    let mut config = TailorConfig::load()?;
    config.apply_cli(&cli);
    config.validate()?;

    let files = LocalFiles::new(config.write_mode);
    let client = InferenceClient::from_config(&config)?;
    let executor = Executor::new(&files, &client, config.pipeline_paths());

    match cli.command {
        Command::Run { .. } => {
            if config.api_token.is_empty() {
                warn!("HF_TOKEN is not set; the endpoint will likely reject the request");
            }

            let progress = RunProgress::start(spinner);
            match executor.run_with(|stage| progress.stage(stage)).await {
                Ok(report) => {
                    progress.complete(&report);
                    if cli.verbose {
                        progress.print_report(&report);
                    }
                    Ok(())
                }
                Err(err) => {
                    progress.fail();
                    hint(&err);
                    Err(err.into())
                }
            }
        }
        Command::Prompt { .. } => {
            let mut state = PipelineState::new();
            executor
                .run_stages(
                    &[Stage::ReadResume, Stage::ReadDescription],
                    &mut state,
                    &mut |_: Stage| {},
                )
                .await?;
            if let (Some(resume), Some(job)) = (&state.resume_data, &state.job_data) {
                println!("{}", render_prompt(resume, job));
            }
            Ok(())
        }
    }
}

fn hint(err: &TailorError) {
    match err {
        TailorError::Read { .. } if err.is_not_found() => {
            warn!("input files are read relative to the working directory; pass --resume/--description to point elsewhere");
        }
        TailorError::Endpoint(e) if e.is_auth() => {
            warn!("the endpoint rejected the credentials; check HF_TOKEN or api_token in tailor.toml");
        }
        _ => {}
    }
}
