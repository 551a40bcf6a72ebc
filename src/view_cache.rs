//! Memoized derived views.
//
// Rebuilding a month grid is a cache-invalidation event, not a per-render
// cost: views are keyed by the source list's version, so repeated renders of
// an unchanged list are cheap and any mutation invalidates naturally.

use chrono::{Datelike, NaiveDate};
use log::debug;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::rc::Rc;

use crate::calendar::{build_weeks, CalendarWeek, Event, WeekStart};

// A season's worth of months; older views age out.
const MONTH_VIEW_CAPACITY: usize = 12;

type MonthKey = (u64, i32, u32, WeekStart);

/// LRU cache of built month grids, keyed by (events version, year, month,
/// week start). Queries never mutate the underlying events.
pub struct MonthViewCache {
    cache: LruCache<MonthKey, Rc<Vec<CalendarWeek>>>,
}

impl MonthViewCache {
    pub fn new() -> Self {
        Self { cache: LruCache::new(NonZeroUsize::new(MONTH_VIEW_CAPACITY).unwrap()) }
    }

    /// The week rows for the month of `anchor`, building them only when no
    /// view for this (version, month) pair is cached.
    pub fn month_view(
        &mut self,
        events: &[Event],
        version: u64,
        anchor: NaiveDate,
        week_start: WeekStart,
    ) -> Rc<Vec<CalendarWeek>> {
        let key = (version, anchor.year(), anchor.month(), week_start);
        if let Some(weeks) = self.cache.get(&key) {
            debug!("month view cache hit for {}-{:02} (version {})", key.1, key.2, version);
            return Rc::clone(weeks);
        }

        debug!("building month view for {}-{:02} (version {})", key.1, key.2, version);
        let weeks = Rc::new(build_weeks(events, anchor, week_start));
        self.cache.put(key, Rc::clone(&weeks));
        weeks
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for MonthViewCache {
    fn default() -> Self {
        Self::new()
    }
}
