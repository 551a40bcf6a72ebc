use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rustyline::DefaultEditor;

use crate::calendar::{date_key, group_by_date, month_name, CalendarWeek, Event, WeekStart};
use crate::command_processor::{CommandArgs, CommandProcessor};
use crate::config::Config;
use crate::contacts::Contact;
use crate::state::StateManager;
use crate::view_cache::MonthViewCache;

/// In-memory event list plus a version counter. Every mutation bumps the
/// version, which is what invalidates derived views.
#[derive(Debug, Default)]
pub struct EventStore {
    items: Vec<Event>,
    version: u64,
}

impl EventStore {
    pub fn new(items: Vec<Event>) -> Self {
        Self { items, version: 0 }
    }

    pub fn items(&self) -> &[Event] {
        &self.items
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn push(&mut self, event: Event) {
        self.items.push(event);
        self.version += 1;
    }

    pub fn extend(&mut self, events: Vec<Event>) {
        self.items.extend(events);
        self.version += 1;
    }
}

/// In-memory contact list with the same versioning scheme as [`EventStore`].
#[derive(Debug, Default)]
pub struct ContactDirectory {
    items: Vec<Contact>,
    version: u64,
}

impl ContactDirectory {
    pub fn new(items: Vec<Contact>) -> Self {
        Self { items, version: 0 }
    }

    pub fn items(&self) -> &[Contact] {
        &self.items
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn push(&mut self, contact: Contact) {
        self.items.push(contact);
        self.version += 1;
    }

    pub fn extend(&mut self, contacts: Vec<Contact>) {
        self.items.extend(contacts);
        self.version += 1;
    }
}

pub struct Application {
    pub config: Config,
    pub events: EventStore,
    pub contacts: ContactDirectory,
    pub month_cache: MonthViewCache,
    state: StateManager,
}

impl Application {
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        let state = StateManager::new()?;
        let events = EventStore::new(state.load()?);
        let contacts = ContactDirectory::new(state.load()?);
        log::debug!(
            "loaded {} events and {} contacts",
            events.items().len(),
            contacts.items().len()
        );

        Ok(Self { config, events, contacts, month_cache: MonthViewCache::new(), state })
    }

    pub fn run(&mut self) -> Result<()> {
        log::info!("Starting Datebook Terminal");

        let mut rl = DefaultEditor::new()?;

        println!("Welcome to Datebook! Type 'help' for commands.");
        let prompt = "📅 ";

        loop {
            match rl.readline(prompt) {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    if line.trim().is_empty() {
                        continue;
                    }
                    if let Err(err) = self.process_input(&line) {
                        log::error!("Failed to process command: {:?}", err);
                        println!("Error: {}", err);
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    pub fn process_input(&mut self, input: &str) -> Result<()> {
        let args = CommandArgs::parse(input)?;
        log::debug!("Processing command: {}", args.command);
        CommandProcessor::new().execute(self, args)
    }

    pub fn add_event(&mut self, event: Event) -> Result<()> {
        self.events.push(event);
        self.state.save(self.events.items())
    }

    pub fn add_events(&mut self, events: Vec<Event>) -> Result<()> {
        self.events.extend(events);
        self.state.save(self.events.items())
    }

    pub fn add_contact(&mut self, contact: Contact) -> Result<()> {
        self.contacts.push(contact);
        self.state.save(self.contacts.items())
    }

    pub fn add_contacts(&mut self, contacts: Vec<Contact>) -> Result<()> {
        self.contacts.extend(contacts);
        self.state.save(self.contacts.items())
    }
}

/// Render a month grid plus its per-day event listing.
///
/// `today_key` is computed once by the caller for the whole render pass so
/// every cell agrees on what "today" is.
pub fn render_month(
    weeks: &[CalendarWeek],
    anchor: NaiveDate,
    today_key: &str,
    week_start: WeekStart,
) -> String {
    let day_names: [&str; 7] = match week_start {
        WeekStart::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
        WeekStart::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
    };

    let title = format!("{} {}", month_name(anchor.month()).unwrap_or("?"), anchor.year());
    let mut output = format!("{:^28}\n", title);
    for name in day_names {
        output.push_str(&format!("{:>3} ", name));
    }
    output.push('\n');

    for week in weeks {
        for day in &week.days {
            let marker = if crate::calendar::is_today(&date_key(*day), today_key) { "*" } else { " " };
            output.push_str(&format!("{:>3}{}", day.day(), marker));
        }
        output.push('\n');
    }

    let mut listed_any = false;
    for week in weeks {
        let buckets = group_by_date(&week.events);
        for day in &week.days {
            if let Some(day_events) = buckets.get(&date_key(*day)) {
                for event in day_events {
                    if !listed_any {
                        output.push('\n');
                        listed_any = true;
                    }
                    let mut line = format!("{}  {} [{}]", date_key(event.date), event.title, event.priority);
                    if !event.location.is_empty() {
                        line.push_str(&format!(" @ {}", event.location));
                    }
                    output.push_str(&line);
                    output.push('\n');
                }
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::build_weeks;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn version_bumps_on_every_mutation() {
        let mut store = EventStore::default();
        assert_eq!(store.version(), 0);
        store.push(Event::new("1", "Standup", date(2024, 3, 5)));
        assert_eq!(store.version(), 1);
        store.extend(vec![Event::new("2", "Review", date(2024, 3, 6))]);
        assert_eq!(store.version(), 2);
        assert_eq!(store.items().len(), 2);
    }

    #[test]
    fn render_marks_today_and_lists_events_by_day() {
        let events = vec![
            Event::new("1", "Standup", date(2024, 3, 5)),
            Event::new("2", "Review", date(2024, 3, 7)),
        ];
        let weeks = build_weeks(&events, date(2024, 3, 1), WeekStart::Sunday);
        let rendered = render_month(&weeks, date(2024, 3, 1), "2024-03-05", WeekStart::Sunday);

        assert!(rendered.contains("March 2024"));
        assert!(rendered.contains("  5*"));
        assert!(rendered.contains("2024-03-05  Standup [Medium]"));
        assert!(rendered.contains("2024-03-07  Review [Medium]"));
    }

    #[test]
    fn render_lists_events_in_grid_order() {
        let events = vec![
            Event::new("late", "Late", date(2024, 3, 20)),
            Event::new("early", "Early", date(2024, 3, 2)),
        ];
        let weeks = build_weeks(&events, date(2024, 3, 1), WeekStart::Sunday);
        let rendered = render_month(&weeks, date(2024, 3, 1), "1970-01-01", WeekStart::Sunday);

        let early = rendered.find("Early").unwrap();
        let late = rendered.find("Late").unwrap();
        assert!(early < late);
    }

    #[test]
    fn monday_grid_headers_start_on_monday() {
        let weeks = build_weeks(&[], date(2024, 3, 1), WeekStart::Monday);
        let rendered = render_month(&weeks, date(2024, 3, 1), "1970-01-01", WeekStart::Monday);
        let header_line = rendered.lines().nth(1).unwrap();
        assert!(header_line.trim_start().starts_with("Mo"));
        assert!(header_line.trim_end().ends_with("Su"));
    }
}
