mod calendar_types;
mod calendar_validation;
mod calendar_weeks;

pub use calendar_types::*;
pub use calendar_validation::*;
pub use calendar_weeks::*;

/// Custom error type for calendar operations
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("invalid date key '{0}': expected YYYY-MM-DD naming a real calendar date")]
    InvalidDateKey(String),
    #[error("invalid month anchor '{0}': expected YYYY-MM")]
    InvalidMonthAnchor(String),
    #[error("invalid month number: {0}")]
    InvalidMonth(u32),
    #[error("invalid priority '{0}': expected high, medium, low or irrelevant")]
    InvalidPriority(String),
}
