pub mod plan;

pub use plan::get_schedule;

use crate::models::{ScheduleEntry, StudyDay};

/// Locate a study day by its plan day number ("Day 7" → 7), returning its
/// entry index alongside it.
pub fn find_study_day(schedule: &[ScheduleEntry], day_number: u32) -> Option<(usize, &StudyDay)> {
    schedule
        .iter()
        .enumerate()
        .find_map(|(idx, entry)| match entry.as_study_day() {
            Some(day) if day.day_number == day_number => Some((idx, day)),
            _ => None,
        })
}

/// Entry indices of the study days, in calendar order.
pub fn study_day_indices(schedule: &[ScheduleEntry]) -> Vec<usize> {
    schedule
        .iter()
        .enumerate()
        .filter(|(_, e)| e.as_study_day().is_some())
        .map(|(idx, _)| idx)
        .collect()
}

/// Split the plan into (week label, entries) groups, keeping entry indices.
pub fn weeks(schedule: &[ScheduleEntry]) -> Vec<(String, Vec<(usize, &ScheduleEntry)>)> {
    let mut groups: Vec<(String, Vec<(usize, &ScheduleEntry)>)> = Vec::new();
    for (idx, entry) in schedule.iter().enumerate() {
        match entry.week_label() {
            Some(label) => groups.push((label.to_string(), Vec::new())),
            None => match groups.last_mut() {
                Some((_, rows)) => rows.push((idx, entry)),
                None => groups.push((String::new(), vec![(idx, entry)])),
            },
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_day_by_number() {
        let schedule = get_schedule();
        let (idx, day) = find_study_day(&schedule, 7).unwrap();
        assert_eq!(idx, 9);
        assert_eq!(day.day_label, "Day 7 (Monday)");
        assert!(find_study_day(&schedule, 35).is_none());
    }

    #[test]
    fn groups_by_week() {
        let schedule = get_schedule();
        let groups = weeks(&schedule);
        assert_eq!(groups.len(), 6);
        assert_eq!(groups[5].0, "FINAL DAYS");
        assert!(groups.iter().all(|(_, rows)| rows.len() == 7));
        assert_eq!(study_day_indices(&schedule).len(), 36);
    }
}
