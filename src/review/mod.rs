pub mod response;
pub mod status;

pub use response::{check_response, PollResult};
pub use status::{render_status, HomeworkStatus, Submission, NO_SUBMISSIONS_TEXT};
