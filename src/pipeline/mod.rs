mod executor;
#[cfg(test)]
mod fakes;
mod prompt;
mod report;
mod stages;
mod state;

pub use executor::Executor;
pub use prompt::render_prompt;
pub use report::RunReport;
pub use stages::PipelinePaths;
pub use state::{PipelineState, Slot, Stage};
