use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use crate::calendar::Event;
use crate::contacts::Contact;

const STATE_DIR: &str = ".datebook";
const EVENTS_FILE: &str = "events.json";
const CONTACTS_FILE: &str = "contacts.json";
// Maximum allowed size for state files (10MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
// Maximum number of records per state file
const MAX_ITEMS: usize = 10_000;

// Trait for items that can be persisted
pub trait Persistent: Sized + Serialize + for<'de> Deserialize<'de> {
    fn filename() -> &'static str;
}

impl Persistent for Event {
    fn filename() -> &'static str {
        EVENTS_FILE
    }
}

impl Persistent for Contact {
    fn filename() -> &'static str {
        CONTACTS_FILE
    }
}

pub struct StateManager {
    state_dir: PathBuf,
}

impl StateManager {
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        let mut state_dir = home_dir;
        state_dir.push(STATE_DIR);
        std::fs::create_dir_all(&state_dir)?;
        Ok(Self { state_dir })
    }

    /// Load all records of one kind. Loading is all-or-nothing: any parse
    /// failure surfaces as an error instead of a partial list.
    pub fn load<T: Persistent>(&self) -> Result<Vec<T>> {
        let path = self.state_dir.join(T::filename());
        if !path.exists() {
            return Ok(Vec::new());
        }

        let metadata = std::fs::metadata(&path)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(anyhow!("State file {} exceeds size limits", T::filename()));
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)
            .map_err(|e| anyhow!("Failed to parse {}: {}", T::filename(), e))?;

        if let Some(array) = json_value.as_array() {
            if array.len() > MAX_ITEMS {
                return Err(anyhow!("Too many items in {} (maximum {})", T::filename(), MAX_ITEMS));
            }
        }

        let items: Vec<T> = serde_json::from_value(json_value)
            .map_err(|e| anyhow!("Failed to deserialize {}: {}", T::filename(), e))?;

        Ok(items)
    }

    pub fn save<T: Persistent>(&self, items: &[T]) -> Result<()> {
        let path = self.state_dir.join(T::filename());
        let file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, items)?;
        Ok(())
    }

    pub fn add<T: Persistent>(&self, item: T) -> Result<()> {
        let mut items = self.load::<T>()?;
        items.push(item);
        self.save(&items)
    }
}
