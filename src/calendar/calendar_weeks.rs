//! Month-grid generation and per-day event grouping.
//
// Events are distributed into week buckets in a single pass over the input,
// so rendering a day costs only that day's own events.

use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use log::debug;
use std::collections::HashMap;

use super::{CalendarError, CalendarWeek, Event, WeekStart};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Canonical `YYYY-MM-DD` key for a calendar day. Month and day are
/// zero-padded to width 2; the year is not padded. Producer and consumer of
/// day buckets must both go through this function.
pub fn date_key(date: NaiveDate) -> String {
    format!("{}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Key for the current local day. Call once per render pass and thread the
/// result through, so a render that straddles midnight stays consistent.
pub fn today_key() -> String {
    date_key(Local::now().date_naive())
}

/// Whether a grid cell is the current day.
pub fn is_today(date_key: &str, today_key: &str) -> bool {
    date_key == today_key
}

/// English month name for a 1-based month number.
pub fn month_name(month: u32) -> Result<&'static str, CalendarError> {
    if month == 0 || month > 12 {
        return Err(CalendarError::InvalidMonth(month));
    }
    Ok(MONTH_NAMES[(month - 1) as usize])
}

fn days_from_week_start(date: NaiveDate, week_start: WeekStart) -> u32 {
    match week_start {
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        WeekStart::Monday => date.weekday().num_days_from_monday(),
    }
}

/// Generate the ordered week rows covering the month of `anchor`, each
/// pre-populated with the events falling inside its 7-day window.
///
/// The grid starts on the `week_start` day on or before the 1st of the month
/// and ends on the week end on or after the month's last day, so the first
/// and last rows may carry filler days from adjacent months. Events outside
/// the displayed range are skipped; weeks without events still appear.
pub fn build_weeks(events: &[Event], anchor: NaiveDate, week_start: WeekStart) -> Vec<CalendarWeek> {
    let month_first = anchor - Duration::days(i64::from(anchor.day()) - 1);
    let month_last = month_first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(month_first);

    let grid_start = month_first - Duration::days(i64::from(days_from_week_start(month_first, week_start)));
    let grid_end = month_last + Duration::days(i64::from(6 - days_from_week_start(month_last, week_start)));

    let total_days = (grid_end - grid_start).num_days() + 1;
    let week_count = (total_days / 7) as usize;

    // Single pass: drop each event into its week bucket by day offset.
    let mut per_week: Vec<Vec<Event>> = vec![Vec::new(); week_count];
    for event in events {
        let offset = (event.date - grid_start).num_days();
        if offset < 0 || offset >= total_days {
            debug!("event {} ({}) outside displayed range, skipping", event.id, event.date);
            continue;
        }
        per_week[(offset / 7) as usize].push(event.clone());
    }

    per_week
        .into_iter()
        .enumerate()
        .map(|(index, week_events)| {
            let start = grid_start + Duration::days(index as i64 * 7);
            let mut days = [start; 7];
            for (day_index, day) in days.iter_mut().enumerate() {
                *day = start + Duration::days(day_index as i64);
            }
            CalendarWeek { start, days, events: week_events }
        })
        .collect()
}

/// Build the per-day buckets for one week's events in a single pass.
/// Bucket contents preserve the relative order of `week_events`.
pub fn group_by_date<'a>(week_events: &'a [Event]) -> HashMap<String, Vec<&'a Event>> {
    let mut buckets: HashMap<String, Vec<&Event>> = HashMap::new();
    for event in week_events {
        buckets.entry(date_key(event.date)).or_default().push(event);
    }
    buckets
}
