use log::debug;
use std::collections::BTreeMap;

use crate::config::{ProgressConfig, TotalsMode};
use crate::models::{ProgressSummary, ScheduleEntry, Slot, Subject, SubjectPlan, SubjectProgress};
use crate::store::CompletionState;

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    completed: u32,
    scheduled: u32,
}

/// Count completed and scheduled slots per subject, skipping dividers and
/// rest days, then turn them into percentages.
///
/// `completed_count` is always counted. Which denominator a subject uses
/// depends on [`TotalsMode`]; the overall figure always divides by the
/// number of slots the plan actually contains.
pub fn compute_progress(
    schedule: &[ScheduleEntry],
    state: &CompletionState,
    config: &ProgressConfig,
) -> ProgressSummary {
    let mut tallies: BTreeMap<Subject, Tally> = BTreeMap::new();

    for (idx, entry) in schedule.iter().enumerate() {
        let Some(day) = entry.as_study_day() else {
            continue;
        };
        for slot in Slot::all() {
            let Some(session) = day.session(slot) else {
                continue;
            };
            let tally = tallies.entry(session.subject).or_default();
            tally.scheduled += 1;
            if state.is_completed(idx, slot) {
                tally.completed += 1;
            }
        }
    }

    let mut summary = ProgressSummary::default();
    let mut overall = Tally::default();
    for subject in Subject::all() {
        let tally = tallies.get(&subject).copied().unwrap_or_default();
        overall.completed += tally.completed;
        overall.scheduled += tally.scheduled;

        let total = match config.totals {
            TotalsMode::Configured => config.configured_total(subject),
            TotalsMode::Scheduled => tally.scheduled,
        };
        *summary.subject_mut(subject) = SubjectProgress::new(tally.completed, total);
    }
    summary.overall = SubjectProgress::new(overall.completed, overall.scheduled);

    debug!(
        "Progress: {}/{} sessions ({:.1}%)",
        overall.completed, overall.scheduled, summary.overall.percent
    );
    summary
}

/// Planned sessions and minutes per subject, straight from the schedule.
pub fn subject_plans(schedule: &[ScheduleEntry]) -> BTreeMap<Subject, SubjectPlan> {
    let mut plans: BTreeMap<Subject, SubjectPlan> = BTreeMap::new();
    let sessions = schedule
        .iter()
        .filter_map(|e| e.as_study_day())
        .flat_map(|day| [day.morning, day.evening])
        .flatten();

    for session in sessions {
        let plan = plans.entry(session.subject).or_default();
        plan.sessions += 1;
        plan.minutes += session.minutes;
        if plan.min_session_minutes == 0 || session.minutes < plan.min_session_minutes {
            plan.min_session_minutes = session.minutes;
        }
        plan.max_session_minutes = plan.max_session_minutes.max(session.minutes);
    }
    plans
}
