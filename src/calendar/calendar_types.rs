use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::CalendarError;

/// Priority assigned to an event when it was triaged.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
    Irrelevant,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Irrelevant => "Irrelevant",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Priority {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            "irrelevant" => Ok(Priority::Irrelevant),
            other => Err(CalendarError::InvalidPriority(other.to_string())),
        }
    }
}

/// First day of a calendar week row.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    Monday,
}

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart::Sunday
    }
}

/// A scheduled event. Only `date` participates in calendar indexing; the
/// descriptive fields are carried through to the views unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: String,
}

impl Event {
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date,
            location: String::new(),
            organization: String::new(),
            theme: String::new(),
            priority: Priority::default(),
            status: String::new(),
        }
    }

    /// Workflow statuses use a free-text label; anything starting with
    /// "Completed" counts as done.
    pub fn is_completed(&self) -> bool {
        self.status.starts_with("Completed")
    }
}

/// One row of a month grid: 7 consecutive days plus the events that fall on
/// them, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarWeek {
    pub start: NaiveDate,
    pub days: [NaiveDate; 7],
    pub events: Vec<Event>,
}

impl CalendarWeek {
    pub fn end(&self) -> NaiveDate {
        self.days[6]
    }

    /// True when `date` lies within this week's 7-day window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }
}
