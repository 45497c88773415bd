pub mod collect;
pub mod types;

pub use collect::ResponseDraft;
pub use types::{ResponseItem, ResponseValue, Submission, SubmissionPayload};
