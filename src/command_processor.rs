use anyhow::{anyhow, Result};
use log::debug;
use std::collections::HashMap;

use crate::app::{render_month, Application};
use crate::calendar::{date_key, parse_date_key, parse_month_anchor, today_key, Priority};
use crate::contact_search::ContactSearchIndex;
use crate::contacts::Contact;
use crate::import::{import_contacts_csv, import_events_csv};
use crate::stakeholders::aggregate_stakeholders;
use crate::version;

/// Command line arguments structure
#[derive(Debug, Clone)]
pub struct CommandArgs {
    pub command: String,
    pub args: Vec<String>,
    pub flags: HashMap<String, Option<String>>,
}

impl CommandArgs {
    pub fn parse(input: &str) -> Result<Self> {
        // Normalize input by replacing non-breaking spaces and multiple spaces with a single space
        let normalized_input =
            input.replace('\u{a0}', " ").split_whitespace().collect::<Vec<_>>().join(" ");

        debug!("Normalized input: {}", normalized_input);

        // Handle exit commands
        if normalized_input.eq_ignore_ascii_case("exit")
            || normalized_input.eq_ignore_ascii_case("quit")
            || normalized_input.eq_ignore_ascii_case("datebook exit")
            || normalized_input.eq_ignore_ascii_case("datebook quit")
        {
            return Ok(CommandArgs {
                command: "exit".to_string(),
                args: vec![],
                flags: HashMap::new(),
            });
        }

        // Special case for help commands
        if normalized_input.eq_ignore_ascii_case("help")
            || normalized_input.eq_ignore_ascii_case("datebook help")
            || normalized_input.eq_ignore_ascii_case("datebook --help")
            || normalized_input.eq_ignore_ascii_case("datebook -h")
            || normalized_input.eq_ignore_ascii_case("--help")
            || normalized_input.eq_ignore_ascii_case("-h")
        {
            return Ok(CommandArgs {
                command: "help".to_string(),
                args: vec![],
                flags: HashMap::new(),
            });
        }

        // Special case for version commands
        if normalized_input.eq_ignore_ascii_case("version")
            || normalized_input.eq_ignore_ascii_case("datebook version")
            || normalized_input.eq_ignore_ascii_case("datebook --version")
            || normalized_input.eq_ignore_ascii_case("datebook -v")
            || normalized_input.eq_ignore_ascii_case("--version")
            || normalized_input.eq_ignore_ascii_case("-v")
        {
            return Ok(CommandArgs {
                command: "version".to_string(),
                args: vec![],
                flags: HashMap::new(),
            });
        }

        let mut parts = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut escaped = false;

        for c in normalized_input.chars() {
            match c {
                '\\' if !escaped => {
                    escaped = true;
                }
                '"' if !escaped => {
                    in_quotes = !in_quotes;
                    if !in_quotes && !current.is_empty() {
                        parts.push(current.clone());
                        current.clear();
                    }
                }
                ' ' if !in_quotes && !escaped => {
                    if !current.is_empty() {
                        parts.push(current.clone());
                        current.clear();
                    }
                }
                _ => {
                    current.push(c);
                    escaped = false;
                }
            }
        }
        if !current.is_empty() {
            parts.push(current);
        }

        if parts.is_empty() {
            return Err(anyhow!("No command provided"));
        }

        // Allow the binary name as an optional prefix
        if parts[0].eq_ignore_ascii_case("datebook") && parts.len() > 1 {
            parts.remove(0);
        }

        let command = parts.remove(0);
        let mut args = Vec::new();
        let mut flags = HashMap::new();
        let mut i = 0;

        while i < parts.len() {
            if parts[i].starts_with("--") {
                let flag = parts[i].clone();
                if i + 1 < parts.len() && !parts[i + 1].starts_with("--") {
                    flags.insert(flag, Some(parts[i + 1].clone()));
                    i += 1;
                } else {
                    flags.insert(flag, None);
                }
            } else {
                args.push(parts[i].clone());
            }
            i += 1;
        }

        Ok(CommandArgs { command, args, flags })
    }

    fn flag_value(&self, flag: &str) -> Option<&str> {
        self.flags.get(flag).and_then(|v| v.as_deref())
    }
}

pub struct CommandProcessor;

impl CommandProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, app: &mut Application, args: CommandArgs) -> Result<()> {
        match args.command.as_str() {
            "calendar" => self.handle_calendar(app, &args),
            "event" => self.handle_event(app, &args),
            "contact" => self.handle_contact(app, &args),
            "search" => self.handle_search(app, &args),
            "stakeholders" => self.handle_stakeholders(app),
            "import" => self.handle_import(app, &args),
            "help" => {
                self.print_help();
                Ok(())
            }
            "version" => {
                println!("datebook {}", version::get_display_version());
                Ok(())
            }
            "exit" => {
                std::process::exit(0);
            }
            _ => {
                println!("Unknown command. Type 'help' for available commands.");
                Ok(())
            }
        }
    }

    fn handle_calendar(&self, app: &mut Application, args: &CommandArgs) -> Result<()> {
        let anchor = match args.args.first() {
            Some(month) => parse_month_anchor(month)?,
            None => chrono::Local::now().date_naive(),
        };

        // One clock read per render pass
        let today = today_key();
        let week_start = app.config.calendar.week_start;
        let version = app.events.version();
        let weeks = app.month_cache.month_view(app.events.items(), version, anchor, week_start);

        print!("{}", render_month(&weeks, anchor, &today, week_start));
        Ok(())
    }

    fn handle_event(&self, app: &mut Application, args: &CommandArgs) -> Result<()> {
        match args.args.first().map(String::as_str) {
            Some("add") => {
                if args.args.len() < 3 {
                    println!(
                        "Usage: event add \"<title>\" <date> [--location \"<location>\"] \
                         [--organization \"<organization>\"] [--theme \"<theme>\"] \
                         [--priority <priority>] [--status \"<status>\"]"
                    );
                    return Ok(());
                }

                let date = parse_date_key(&args.args[2])?;
                let mut event = crate::calendar::Event::new(
                    uuid::Uuid::new_v4().to_string(),
                    args.args[1].clone(),
                    date,
                );
                if let Some(location) = args.flag_value("--location") {
                    event.location = location.to_string();
                }
                if let Some(organization) = args.flag_value("--organization") {
                    event.organization = organization.to_string();
                }
                if let Some(theme) = args.flag_value("--theme") {
                    event.theme = theme.to_string();
                }
                if let Some(priority) = args.flag_value("--priority") {
                    event.priority = priority.parse::<Priority>()?;
                }
                if let Some(status) = args.flag_value("--status") {
                    event.status = status.to_string();
                }

                let summary = format!("Added event '{}' on {}", event.title, date_key(event.date));
                app.add_event(event)?;
                println!("{}", summary);
                Ok(())
            }
            Some("list") => {
                let mut events = app.events.items().to_vec();
                events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));

                if events.is_empty() {
                    println!("No events recorded.");
                }
                for event in &events {
                    let mut line = format!("{}  {} [{}]", date_key(event.date), event.title, event.priority);
                    if !event.location.is_empty() {
                        line.push_str(&format!(" @ {}", event.location));
                    }
                    if !event.organization.is_empty() {
                        line.push_str(&format!(" ({})", event.organization));
                    }
                    println!("{}", line);
                }
                Ok(())
            }
            _ => {
                println!("Usage: event <add|list>");
                Ok(())
            }
        }
    }

    fn handle_contact(&self, app: &mut Application, args: &CommandArgs) -> Result<()> {
        match args.args.first().map(String::as_str) {
            Some("add") => {
                if args.args.len() < 2 {
                    println!(
                        "Usage: contact add \"<name>\" [--email <email>] \
                         [--organization \"<organization>\"] [--role \"<role>\"] \
                         [--notes \"<notes>\"]"
                    );
                    return Ok(());
                }

                let mut contact = Contact::new(args.args[1].clone());
                if let Some(email) = args.flag_value("--email") {
                    contact.email = email.to_string();
                }
                contact.organization = match args.flag_value("--organization") {
                    Some(organization) => organization.to_string(),
                    None => app.config.contacts.default_organization.clone().unwrap_or_default(),
                };
                if let Some(role) = args.flag_value("--role") {
                    contact.role = role.to_string();
                }
                if let Some(notes) = args.flag_value("--notes") {
                    contact.notes = notes.to_string();
                }

                let summary = format!("Added contact '{}'", contact.name);
                app.add_contact(contact)?;
                println!("{}", summary);
                Ok(())
            }
            Some("list") => {
                if app.contacts.items().is_empty() {
                    println!("No contacts recorded.");
                }
                for contact in app.contacts.items() {
                    println!("{}", contact.display());
                }
                Ok(())
            }
            _ => {
                println!("Usage: contact <add|list>");
                Ok(())
            }
        }
    }

    fn handle_search(&self, app: &mut Application, args: &CommandArgs) -> Result<()> {
        let query = args.args.join(" ");

        // Normalized once per directory change; every query against this
        // build reuses the same lower-cased projections.
        let index = ContactSearchIndex::build(app.contacts.items());
        let results = index.filter(&query);

        if results.is_empty() {
            println!("No contacts match '{}'.", query);
            return Ok(());
        }
        println!("{} of {} contacts:", results.len(), index.len());
        for contact in results {
            println!("{}", contact.display());
        }
        Ok(())
    }

    fn handle_stakeholders(&self, app: &mut Application) -> Result<()> {
        let stats = aggregate_stakeholders(app.events.items());
        if stats.is_empty() {
            println!("No events recorded.");
            return Ok(());
        }

        for entry in &stats {
            let mut line = format!(
                "{}: {} events ({} completed)",
                entry.name, entry.total_events, entry.completed_events
            );
            if !entry.themes.is_empty() {
                line.push_str(&format!(" | themes: {}", entry.themes.join(", ")));
            }
            println!("{}", line);
        }
        Ok(())
    }

    fn handle_import(&self, app: &mut Application, args: &CommandArgs) -> Result<()> {
        if args.args.len() < 2 {
            println!("Usage: import <contacts|events> <file.csv>");
            return Ok(());
        }

        let path = std::path::Path::new(&args.args[1]);
        match args.args[0].as_str() {
            "contacts" => {
                let contacts = import_contacts_csv(path)?;
                let count = contacts.len();
                app.add_contacts(contacts)?;
                println!("Imported {} contacts from {}", count, path.display());
                Ok(())
            }
            "events" => {
                let events = import_events_csv(path)?;
                let count = events.len();
                app.add_events(events)?;
                println!("Imported {} events from {}", count, path.display());
                Ok(())
            }
            other => {
                println!("Unknown import target '{}'. Use 'contacts' or 'events'.", other);
                Ok(())
            }
        }
    }

    fn print_help(&self) {
        println!("Available commands:");
        println!("  calendar [YYYY-MM] - Show the month grid with events per day");
        println!("  event add \"<title>\" <date> [flags] - Record an event (date is YYYY-MM-DD)");
        println!("  event list - List all events chronologically");
        println!("  contact add \"<name>\" [flags] - Add a contact to the directory");
        println!("  contact list - List all contacts");
        println!("  search <query> - Search contacts by name, email or organization");
        println!("  stakeholders - Engagement rollup per organization");
        println!("  import <contacts|events> <file.csv> - Import records from CSV");
        println!("  help - Show this help");
        println!("  version - Show version information");
        println!("  exit - Exit the application");
    }
}

impl Default for CommandProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_quoted_arguments_and_flags() {
        let args =
            CommandArgs::parse("event add \"Policy roundtable\" 2026-02-10 --priority high")
                .unwrap();
        assert_eq!(args.command, "event");
        assert_eq!(args.args, vec!["add", "Policy roundtable", "2026-02-10"]);
        assert_eq!(args.flags.get("--priority"), Some(&Some("high".to_string())));
    }

    #[test]
    fn binary_name_prefix_is_stripped() {
        let args = CommandArgs::parse("datebook contact list").unwrap();
        assert_eq!(args.command, "contact");
        assert_eq!(args.args, vec!["list"]);
    }

    #[test]
    fn exit_aliases_normalize() {
        for input in ["exit", "quit", "datebook exit", "QUIT"] {
            let args = CommandArgs::parse(input).unwrap();
            assert_eq!(args.command, "exit");
        }
    }

    #[test]
    fn help_and_version_aliases_normalize() {
        assert_eq!(CommandArgs::parse("-h").unwrap().command, "help");
        assert_eq!(CommandArgs::parse("datebook --version").unwrap().command, "version");
    }

    #[test]
    fn valueless_flags_are_recorded() {
        let args = CommandArgs::parse("event list --verbose").unwrap();
        assert_eq!(args.flags.get("--verbose"), Some(&None));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(CommandArgs::parse("   ").is_err());
    }

    #[test]
    fn escaped_quotes_stay_literal() {
        let args = CommandArgs::parse(r#"contact add "Ann \"The Planner\" Lee""#).unwrap();
        assert_eq!(args.args[1], r#"Ann "The Planner" Lee"#);
    }
}
