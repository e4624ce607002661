pub mod progress;
pub mod schedule;

pub use progress::{ProgressSummary, SubjectPlan, SubjectProgress};
pub use schedule::{ScheduleEntry, Session, Slot, StudyDay, Subject};
