//! CSV import for contacts and events.
//
// Import is all-or-nothing: a malformed row fails the whole file with row
// context, so a partial list is never handed to the caller.

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::path::Path;
use uuid::Uuid;

use crate::calendar::{parse_date_key, Event, Priority};
use crate::contacts::Contact;

#[derive(Debug, Deserialize)]
struct ContactRow {
    #[serde(default)]
    id: String,
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    organization: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    notes: String,
}

#[derive(Debug, Deserialize)]
struct EventRow {
    #[serde(default)]
    id: String,
    title: String,
    date: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    organization: String,
    #[serde(default)]
    theme: String,
    #[serde(default)]
    priority: String,
    #[serde(default)]
    status: String,
}

fn row_id(id: String) -> String {
    if id.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        id
    }
}

/// Read contacts from a headered CSV file (`name` required; `id`, `email`,
/// `organization`, `role`, `notes` optional).
pub fn import_contacts_csv(path: &Path) -> Result<Vec<Contact>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut contacts = Vec::new();
    for (index, result) in reader.deserialize::<ContactRow>().enumerate() {
        let row = result.with_context(|| format!("Invalid contact row {}", index + 1))?;
        contacts.push(Contact {
            id: row_id(row.id),
            name: row.name,
            email: row.email,
            organization: row.organization,
            role: row.role,
            notes: row.notes,
        });
    }

    info!("imported {} contacts from {}", contacts.len(), path.display());
    Ok(contacts)
}

/// Read events from a headered CSV file (`title` and `date` required; the
/// rest optional). Dates must be canonical `YYYY-MM-DD` keys.
pub fn import_events_csv(path: &Path) -> Result<Vec<Event>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut events = Vec::new();
    for (index, result) in reader.deserialize::<EventRow>().enumerate() {
        let row = result.with_context(|| format!("Invalid event row {}", index + 1))?;
        let date = parse_date_key(&row.date)
            .with_context(|| format!("Invalid date in event row {}", index + 1))?;
        let priority = if row.priority.is_empty() {
            Priority::default()
        } else {
            row.priority
                .parse::<Priority>()
                .with_context(|| format!("Invalid priority in event row {}", index + 1))?
        };

        events.push(Event {
            id: row_id(row.id),
            title: row.title,
            date,
            location: row.location,
            organization: row.organization,
            theme: row.theme,
            priority,
            status: row.status,
        });
    }

    info!("imported {} events from {}", events.len(), path.display());
    Ok(events)
}
