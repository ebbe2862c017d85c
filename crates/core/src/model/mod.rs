mod attempt;
mod ids;
mod ledger;
mod question;
mod score;
mod subject;
mod timer;

pub use attempt::{AttemptError, AttemptSummary};
pub use ids::{AttemptId, ParseIdError, QuestionId, SubjectId};
pub use ledger::AnswerLedger;
pub use question::{ExamType, OptionLabel, ParseExamTypeError, ParseOptionLabelError, Question, QuestionError};
pub use score::{score, GradeBand, ReviewRecord, ScoreReport};
pub use subject::{ExamSelection, Subject, SubjectError};
pub use timer::{QuestionTimer, Tick, TimerPhase};
