use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Api,
    Statistics,
    Llm,
}

impl Subject {
    pub fn all() -> [Subject; 3] {
        [Subject::Api, Subject::Statistics, Subject::Llm]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Subject::Api => "API",
            Subject::Statistics => "Statistics",
            Subject::Llm => "LLM",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Subject::Api => "🔧",
            Subject::Statistics => "📊",
            Subject::Llm => "🤖",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Morning,
    Evening,
}

impl Slot {
    pub fn all() -> [Slot; 2] {
        [Slot::Morning, Slot::Evening]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Morning => "morning",
            Slot::Evening => "evening",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Slot::Morning => "Morning",
            Slot::Evening => "Evening",
        }
    }
}

impl FromStr for Slot {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" | "am" | "m" => Ok(Slot::Morning),
            "evening" | "pm" | "e" => Ok(Slot::Evening),
            _ => Err(anyhow::anyhow!("Unknown slot: {}", s)),
        }
    }
}

/// One planned study block. `number` is the subject's running session
/// counter, assigned once when the schedule is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub subject: Subject,
    pub number: u32,
    pub minutes: u32,
}

impl Session {
    pub fn label(&self) -> String {
        format!(
            "{} {}: Session {} ({} min)",
            self.subject.icon(),
            self.subject.display_name(),
            self.number,
            self.minutes
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyDay {
    pub day_number: u32,
    pub day_label: String,
    pub date: String,
    pub morning: Option<Session>,
    pub evening: Option<Session>,
}

impl StudyDay {
    pub fn session(&self, slot: Slot) -> Option<&Session> {
        match slot {
            Slot::Morning => self.morning.as_ref(),
            Slot::Evening => self.evening.as_ref(),
        }
    }
}

/// A row of the plan. Dividers and rest days are their own variants, so an
/// entry is always exactly one of the three kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleEntry {
    WeekDivider { week_label: String },
    RestDay { day_label: String, date: String },
    Study(StudyDay),
}

impl ScheduleEntry {
    pub fn as_study_day(&self) -> Option<&StudyDay> {
        match self {
            ScheduleEntry::Study(day) => Some(day),
            _ => None,
        }
    }

    pub fn week_label(&self) -> Option<&str> {
        match self {
            ScheduleEntry::WeekDivider { week_label } => Some(week_label),
            _ => None,
        }
    }
}
