//! Per-organization engagement rollup for the overview screen.

use std::collections::HashMap;

use crate::calendar::Event;

const UNKNOWN_STAKEHOLDER: &str = "Unknown Stakeholder";

/// Aggregated engagement figures for one organization.
#[derive(Debug, Clone, PartialEq)]
pub struct StakeholderStats {
    pub name: String,
    pub total_events: usize,
    pub completed_events: usize,
    /// Themes in first-seen order, deduplicated.
    pub themes: Vec<String>,
}

/// Group events by trimmed organization name and tally activity.
/// Sorted by total events descending, then name, so output is deterministic.
pub fn aggregate_stakeholders(events: &[Event]) -> Vec<StakeholderStats> {
    let mut groups: HashMap<String, StakeholderStats> = HashMap::new();

    for event in events {
        let trimmed = event.organization.trim();
        let name = if trimmed.is_empty() { UNKNOWN_STAKEHOLDER } else { trimmed };

        let entry = groups.entry(name.to_string()).or_insert_with(|| StakeholderStats {
            name: name.to_string(),
            total_events: 0,
            completed_events: 0,
            themes: Vec::new(),
        });

        entry.total_events += 1;
        if event.is_completed() {
            entry.completed_events += 1;
        }
        if !event.theme.is_empty() && !entry.themes.contains(&event.theme) {
            entry.themes.push(event.theme.clone());
        }
    }

    let mut stats: Vec<StakeholderStats> = groups.into_values().collect();
    stats.sort_by(|a, b| b.total_events.cmp(&a.total_events).then_with(|| a.name.cmp(&b.name)));
    stats
}
