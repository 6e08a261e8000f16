pub mod analysis;
pub mod client;
pub mod credential;

pub use analysis::{AnalysisBackend, AnalysisError, run_analysis};
pub use client::{AnalysisClient, ChatCompletion, DEFAULT_ENDPOINT, DEFAULT_MODEL, RemoteError};
pub use credential::{CREDENTIAL_NAME, lookup};
