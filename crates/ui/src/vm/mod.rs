mod attempt_vm;
mod exam_vm;
mod subject_vm;
mod time_fmt;

pub use attempt_vm::{AttemptCardVm, map_attempt_cards};
pub use exam_vm::{ExamVm, OptionVm};
pub use subject_vm::{CURRENT_EXAM_YEAR, SubjectCardVm, map_subject_cards};
pub use time_fmt::{format_countdown, format_datetime, format_elapsed};
