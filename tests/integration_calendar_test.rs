use anyhow::Result;
use chrono::NaiveDate;
use datebook::calendar::{self, CalendarError};
use datebook::view_cache::MonthViewCache;
use datebook::{Event, WeekStart};
use std::collections::HashSet;
use std::rc::Rc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_month() -> Vec<Event> {
    let mut events = Vec::new();
    for (id, day) in [("1", 5), ("2", 5), ("3", 7), ("4", 12), ("5", 28), ("6", 31)] {
        events.push(Event::new(id, format!("Event {}", id), date(2024, 3, day)));
    }
    // Filler-day and out-of-range neighbors
    events.push(Event::new("filler", "Leading filler", date(2024, 2, 26)));
    events.push(Event::new("outside", "Far away", date(2024, 7, 1)));
    events
}

#[test]
fn month_grid_partitions_in_range_events_exactly_once() -> Result<()> {
    let events = sample_month();
    let weeks = calendar::build_weeks(&events, date(2024, 3, 1), WeekStart::Sunday);

    let displayed: Vec<&str> =
        weeks.iter().flat_map(|w| w.events.iter()).map(|e| e.id.as_str()).collect();

    // Each in-range event appears exactly once across all weeks.
    let unique: HashSet<&&str> = displayed.iter().collect();
    assert_eq!(unique.len(), displayed.len());
    assert_eq!(displayed.len(), 7);
    assert!(!displayed.contains(&"outside"));

    // And the union of all day buckets reconstructs the same set.
    let mut bucketed = 0usize;
    for week in &weeks {
        let buckets = calendar::group_by_date(&week.events);
        for day in &week.days {
            if let Some(day_events) = buckets.get(&calendar::date_key(*day)) {
                bucketed += day_events.len();
                for event in day_events {
                    assert_eq!(calendar::date_key(event.date), calendar::date_key(*day));
                }
            }
        }
    }
    assert_eq!(bucketed, displayed.len());

    Ok(())
}

#[test]
fn producer_and_consumer_agree_on_the_date_key_contract() {
    let events = sample_month();
    let weeks = calendar::build_weeks(&events, date(2024, 3, 1), WeekStart::Sunday);

    for week in &weeks {
        let buckets = calendar::group_by_date(&week.events);
        for event in &week.events {
            let key = calendar::date_key(event.date);
            assert!(buckets[&key].iter().any(|e| e.id == event.id));
            // Round-trip through the serialized form
            assert_eq!(calendar::parse_date_key(&key).unwrap(), event.date);
        }
    }
}

#[test]
fn malformed_dates_are_rejected_with_a_calendar_error() {
    let err = calendar::parse_date_key("2024-02-30").unwrap_err();
    assert!(matches!(err, CalendarError::InvalidDateKey(_)));
    assert!(err.to_string().contains("2024-02-30"));

    let err = calendar::parse_month_anchor("2024-00").unwrap_err();
    assert!(matches!(err, CalendarError::InvalidMonthAnchor(_)));
}

#[test]
fn month_view_cache_serves_repeated_renders_without_rebuilding() {
    let events = sample_month();
    let mut cache = MonthViewCache::new();
    let anchor = date(2024, 3, 1);

    let first = cache.month_view(&events, 0, anchor, WeekStart::Sunday);
    let second = cache.month_view(&events, 0, anchor, WeekStart::Sunday);
    assert!(Rc::ptr_eq(&first, &second));

    // A list change means a new version, which misses and rebuilds.
    let mut changed = events.clone();
    changed.push(Event::new("7", "Added later", date(2024, 3, 14)));
    let rebuilt = cache.month_view(&changed, 1, anchor, WeekStart::Sunday);
    assert!(!Rc::ptr_eq(&first, &rebuilt));

    let total: usize = rebuilt.iter().map(|w| w.events.len()).sum();
    assert_eq!(total, 8);
}

#[test]
fn week_windows_always_span_the_whole_month() {
    for (year, month) in [(2024, 2), (2024, 12), (2025, 6), (2026, 1)] {
        let anchor = date(year, month, 1);
        let weeks = calendar::build_weeks(&[], anchor, WeekStart::Sunday);

        assert!(!weeks.is_empty());
        assert!(weeks[0].contains(anchor));
        let last_day = weeks.last().unwrap().end();
        assert!(last_day.signed_duration_since(anchor).num_days() >= 27);
        for week in &weeks {
            assert_eq!(week.end().signed_duration_since(week.start).num_days(), 6);
        }
    }
}
