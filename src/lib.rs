pub mod app;
pub mod calendar;
pub mod command_processor;
pub mod config;
pub mod contact_search;
pub mod contacts;
pub mod import;
pub mod stakeholders;
pub mod state;
pub mod version;
pub mod view_cache;

use anyhow::Result;
use log::*;

pub fn run() -> Result<()> {
    // Create and run the application
    let mut app = app::Application::new()?;
    info!("Initializing Datebook application");
    app.run()
}

pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

// Re-export commonly used types
pub use calendar::{CalendarWeek, Event, Priority, WeekStart};
pub use config::Config;
pub use contact_search::ContactSearchIndex;
pub use contacts::Contact;
