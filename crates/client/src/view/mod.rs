mod review;
mod submission;

#[cfg(test)]
pub(crate) mod fake;

pub use self::review::{ReviewBoard, ReviewError};
pub use self::submission::{SubmissionForm, SubmissionInvalid, SubmitError};
