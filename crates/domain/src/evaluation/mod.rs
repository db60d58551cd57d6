mod record;
mod repository;

pub use record::{
    AttendanceDate, AttendanceMark, AttendantEvaluation, DatedScore, ScoreEntry, ScoredEntry,
    WeeklyEvaluation, score_batch,
};
pub use repository::{AttendanceRepository, EvaluationRepository};
