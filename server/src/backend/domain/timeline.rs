//! Timeline formatting for the health journal.
//!
//! Turns raw health entries into display-ready days so every client renders
//! the 30-day history the same way.
//!
//! ## Formatting Rules
//!
//! - Dates read as "Friday, Feb 13, 2026"; unparseable dates pass through unchanged
//! - Metrics on the 1-10 scale read as "7/10"; mood also gets a glyph
//! - Bowel data reads as "2 (solid)", or whichever half is present

use chrono::NaiveDate;
use shared::{HealthEntry, TimelineDay, TimelineResponse};

/// Stateless formatter for the timeline view
#[derive(Clone, Default)]
pub struct TimelineService;

impl TimelineService {
    pub fn new() -> Self {
        Self
    }

    /// Format entries for display, keeping their order
    pub fn build_timeline(&self, entries: &[HealthEntry]) -> TimelineResponse {
        TimelineResponse {
            days: entries.iter().map(|entry| self.format_day(entry)).collect(),
        }
    }

    pub fn format_day(&self, entry: &HealthEntry) -> TimelineDay {
        TimelineDay {
            entry_id: entry.id.clone(),
            date: entry.date.clone(),
            formatted_date: self.format_date(&entry.date),
            mood: entry
                .mood
                .map(|mood| format!("{} {}", self.format_scale(mood), self.mood_glyph(mood))),
            energy: entry.energy.map(|energy| self.format_scale(energy)),
            inflammation: entry.inflammation.map(|level| self.format_scale(level)),
            bowel: self.format_bowel(entry),
            notes: entry.notes.clone().filter(|notes| !notes.trim().is_empty()),
        }
    }

    pub fn format_date(&self, iso_date: &str) -> String {
        match NaiveDate::parse_from_str(iso_date, "%Y-%m-%d") {
            Ok(date) => date.format("%A, %b %-d, %Y").to_string(),
            Err(_) => iso_date.to_string(),
        }
    }

    pub fn mood_glyph(&self, mood: i32) -> &'static str {
        match mood {
            m if m >= 9 => "😄",
            m if m >= 7 => "🙂",
            m if m >= 5 => "😐",
            m if m >= 3 => "😟",
            _ => "😢",
        }
    }

    fn format_scale(&self, value: i32) -> String {
        format!("{}/10", value)
    }

    fn format_bowel(&self, entry: &HealthEntry) -> Option<String> {
        match (entry.bowel_movements, entry.bowel_quality) {
            (Some(count), Some(quality)) => Some(format!("{} ({})", count, quality)),
            (Some(count), None) => Some(count.to_string()),
            (None, Some(quality)) => Some(quality.to_string()),
            (None, None) => None,
        }
    }
}
