pub mod submission;
pub mod user;

pub use submission::{Submission, SubmissionPayload};
pub use user::User;
