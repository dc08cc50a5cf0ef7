use crate::inference::EndpointError;

/// One-shot text generation: a single prompt in, a single trimmed text out.
///
/// No conversation state and no tool loop. Errors are never recovered
/// locally; callers propagate them.
pub trait TextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, EndpointError>;
}
