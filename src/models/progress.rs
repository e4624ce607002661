use serde::{Deserialize, Serialize};

use crate::models::Subject;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub completed_count: u32,
    pub total_count: u32,
    pub percent: f64,
}

impl SubjectProgress {
    pub fn new(completed_count: u32, total_count: u32) -> Self {
        Self {
            completed_count,
            total_count,
            percent: percent_of(completed_count, total_count),
        }
    }

    pub fn ratio(&self) -> f64 {
        (self.percent / 100.0).clamp(0.0, 1.0)
    }
}

pub fn percent_of(completed: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * completed as f64 / total as f64
    }
}

/// Derived on demand from the schedule and completion state; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub api: SubjectProgress,
    pub statistics: SubjectProgress,
    pub llm: SubjectProgress,
    pub overall: SubjectProgress,
}

impl ProgressSummary {
    pub fn subject(&self, subject: Subject) -> &SubjectProgress {
        match subject {
            Subject::Api => &self.api,
            Subject::Statistics => &self.statistics,
            Subject::Llm => &self.llm,
        }
    }

    pub fn subject_mut(&mut self, subject: Subject) -> &mut SubjectProgress {
        match subject {
            Subject::Api => &mut self.api,
            Subject::Statistics => &mut self.statistics,
            Subject::Llm => &mut self.llm,
        }
    }
}

/// Planned workload for one subject, shown on the summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectPlan {
    pub sessions: u32,
    pub minutes: u32,
    pub min_session_minutes: u32,
    pub max_session_minutes: u32,
}

impl SubjectPlan {
    pub fn hours(&self) -> f64 {
        self.minutes as f64 / 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_zero_for_empty_total() {
        assert_eq!(percent_of(3, 0), 0.0);
        assert_eq!(SubjectProgress::new(0, 0).ratio(), 0.0);
    }

    #[test]
    fn percent_of_configured_total() {
        assert!((percent_of(1, 25) - 4.0).abs() < f64::EPSILON);
        assert!((percent_of(1, 2) - 50.0).abs() < f64::EPSILON);
    }
}
