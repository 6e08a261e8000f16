pub mod classify;
pub mod flow;
pub mod keywords;
pub mod prompt;
pub mod request;

pub use classify::{CANDIDATE_LABELS, ClassificationResult, ZeroShotClassifier};
pub use flow::{ScanError, ScanReport, run_scan};
pub use keywords::{RiskBucket, keyword_score};
pub use prompt::build_prompt;
pub use request::{ContextCategory, ValidationError};
