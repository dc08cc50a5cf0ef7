pub mod client;
pub mod error;
pub mod types;

pub use client::InferenceClient;
pub use error::EndpointError;
pub use types::GenerationParameters;
