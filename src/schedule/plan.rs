use std::collections::HashMap;

use crate::models::{ScheduleEntry, Session, StudyDay, Subject};

use Subject::{Api, Llm, Statistics};

/// Nominal length of one session of each subject, in minutes.
pub fn nominal_minutes(subject: Subject) -> u32 {
    match subject {
        Subject::Api => 45,
        Subject::Statistics => 50,
        Subject::Llm => 75,
    }
}

enum PlanRow {
    Week(&'static str),
    Rest(&'static str),
    Day {
        day: u32,
        weekday: &'static str,
        date: &'static str,
        morning: Option<Subject>,
        evening: Option<Subject>,
    },
}

const fn day(
    day: u32,
    weekday: &'static str,
    date: &'static str,
    morning: Subject,
    evening: Subject,
) -> PlanRow {
    PlanRow::Day {
        day,
        weekday,
        date,
        morning: Some(morning),
        evening: Some(evening),
    }
}

#[rustfmt::skip]
const PLAN: &[PlanRow] = &[
    PlanRow::Week("WEEK 1"),
    day(1, "Monday", "Jun 9", Api, Statistics),
    day(2, "Tuesday", "Jun 10", Statistics, Llm),
    day(3, "Wednesday", "Jun 11", Api, Llm),
    day(4, "Thursday", "Jun 12", Api, Statistics),
    day(5, "Friday", "Jun 13", Statistics, Llm),
    PlanRow::Rest("Jun 14"),
    day(6, "Sunday", "Jun 15", Api, Llm),

    PlanRow::Week("WEEK 2"),
    day(7, "Monday", "Jun 16", Api, Statistics),
    day(8, "Tuesday", "Jun 17", Statistics, Llm),
    day(9, "Wednesday", "Jun 18", Api, Llm),
    day(10, "Thursday", "Jun 19", Api, Statistics),
    day(11, "Friday", "Jun 20", Statistics, Llm),
    PlanRow::Rest("Jun 21"),
    day(12, "Sunday", "Jun 22", Api, Llm),

    PlanRow::Week("WEEK 3"),
    day(13, "Monday", "Jun 23", Api, Statistics),
    day(14, "Tuesday", "Jun 24", Statistics, Llm),
    day(15, "Wednesday", "Jun 25", Api, Llm),
    day(16, "Thursday", "Jun 26", Api, Statistics),
    day(17, "Friday", "Jun 27", Statistics, Llm),
    PlanRow::Rest("Jun 28"),
    day(18, "Sunday", "Jun 29", Api, Llm),

    PlanRow::Week("WEEK 4"),
    day(19, "Monday", "Jun 30", Api, Statistics),
    day(20, "Tuesday", "Jul 1", Statistics, Llm),
    day(21, "Wednesday", "Jul 2", Api, Llm),
    day(22, "Thursday", "Jul 3", Api, Statistics),
    day(23, "Friday", "Jul 4", Statistics, Llm),
    PlanRow::Rest("Jul 5"),
    day(24, "Sunday", "Jul 6", Api, Llm),

    PlanRow::Week("WEEK 5"),
    day(25, "Monday", "Jul 7", Api, Statistics),
    day(26, "Tuesday", "Jul 8", Statistics, Llm),
    day(27, "Wednesday", "Jul 9", Api, Llm),
    day(28, "Thursday", "Jul 10", Api, Statistics),
    day(29, "Friday", "Jul 11", Statistics, Llm),
    PlanRow::Rest("Jul 12"),
    day(30, "Sunday", "Jul 13", Api, Llm),

    PlanRow::Week("FINAL DAYS"),
    day(40, "Thursday", "Jul 24", Api, Statistics),
    day(41, "Friday", "Jul 25", Statistics, Llm),
    PlanRow::Rest("Jul 26"),
    day(42, "Sunday", "Jul 27", Api, Llm),
    day(43, "Monday", "Jul 28", Api, Statistics),
    day(44, "Tuesday", "Jul 29", Statistics, Llm),
    day(45, "Wednesday", "Jul 30", Api, Llm),
];

/// Build the full plan in calendar order.
///
/// Session numbers run 1..N per subject, counted independently in the order
/// the subject appears (morning before evening within a day).
pub fn get_schedule() -> Vec<ScheduleEntry> {
    let mut counters: HashMap<Subject, u32> = HashMap::new();
    let mut next_session = |subject: Option<Subject>| {
        subject.map(|subject| {
            let counter = counters.entry(subject).or_insert(0);
            *counter += 1;
            Session {
                subject,
                number: *counter,
                minutes: nominal_minutes(subject),
            }
        })
    };

    PLAN.iter()
        .map(|row| match row {
            PlanRow::Week(label) => ScheduleEntry::WeekDivider {
                week_label: label.to_string(),
            },
            PlanRow::Rest(date) => ScheduleEntry::RestDay {
                day_label: "Saturday".to_string(),
                date: date.to_string(),
            },
            PlanRow::Day {
                day,
                weekday,
                date,
                morning,
                evening,
            } => {
                let morning = next_session(*morning);
                let evening = next_session(*evening);
                ScheduleEntry::Study(StudyDay {
                    day_number: *day,
                    day_label: format!("Day {} ({})", day, weekday),
                    date: date.to_string(),
                    morning,
                    evening,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slot;

    #[test]
    fn every_entry_has_exactly_one_kind() {
        for entry in get_schedule() {
            let kinds = [
                matches!(entry, ScheduleEntry::WeekDivider { .. }),
                matches!(entry, ScheduleEntry::RestDay { .. }),
                entry.as_study_day().is_some(),
            ];
            assert_eq!(kinds.iter().filter(|k| **k).count(), 1, "{:?}", entry);
        }
    }

    #[test]
    fn schedule_is_deterministic() {
        assert_eq!(get_schedule(), get_schedule());
    }

    #[test]
    fn plan_shape() {
        let schedule = get_schedule();
        assert_eq!(schedule.len(), 48);
        assert_eq!(schedule[0].week_label(), Some("WEEK 1"));

        let first = schedule[1].as_study_day().unwrap();
        assert_eq!(first.day_label, "Day 1 (Monday)");
        assert_eq!(first.date, "Jun 9");

        let study_days = schedule.iter().filter_map(|e| e.as_study_day()).count();
        let rest_days = schedule.iter().filter(|e| matches!(e, ScheduleEntry::RestDay { .. })).count();
        let dividers = schedule.iter().filter(|e| e.week_label().is_some()).count();
        assert_eq!((study_days, rest_days, dividers), (36, 6, 6));
    }

    #[test]
    fn session_numbers_run_per_subject() {
        let schedule = get_schedule();
        for subject in Subject::all() {
            let numbers: Vec<u32> = schedule
                .iter()
                .filter_map(|e| e.as_study_day())
                .flat_map(|d| Slot::all().into_iter().filter_map(move |s| d.session(s)))
                .filter(|s| s.subject == subject)
                .map(|s| s.number)
                .collect();
            let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
            assert_eq!(numbers, expected, "{}", subject);
            assert_eq!(numbers.len(), 24);
        }
    }

    #[test]
    fn day_two_continues_statistics_numbering() {
        let schedule = get_schedule();
        let day2 = schedule[2].as_study_day().unwrap();
        let morning = day2.morning.unwrap();
        assert_eq!(morning.subject, Subject::Statistics);
        assert_eq!(morning.number, 2);
        assert_eq!(morning.label(), "📊 Statistics: Session 2 (50 min)");
        assert_eq!(day2.evening.unwrap().number, 1);
    }
}
