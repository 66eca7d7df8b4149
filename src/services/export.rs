//! Export and share helpers
//!
//! Serialisers for the engine's filtered and sorted output: a spreadsheet
//! friendly CSV, plain-text detail sheets and WhatsApp share links.

use chrono::NaiveDate;
use crate::models::Event;
use crate::utils::helpers::{capitalize, csv_quote, DateFormatter};
use crate::utils::logging::log_export;

const NOT_AVAILABLE: &str = "N/A";

const CSV_HEADERS: [&str; 18] = [
    "Day", "Date", "Time", "Duration (min)", "Place", "Participants",
    "Participation Type", "Event Reason", "Meeting Date", "Meeting Time",
    "Meeting Place", "Vehicle", "Camera Man", "Songs Used", "Dress Details",
    "Status", "Created", "Updated",
];

/// Renders event views for download and sharing
#[derive(Debug, Clone, Default)]
pub struct ExportService {
    dates: DateFormatter,
}

impl ExportService {
    pub fn new(dates: DateFormatter) -> Self {
        Self { dates }
    }

    /// One header row plus one row per event, in the given order
    pub fn to_csv(&self, events: &[&Event]) -> String {
        let mut lines = Vec::with_capacity(events.len() + 1);
        lines.push(CSV_HEADERS.join(","));

        for event in events {
            let row = [
                csv_quote(&event.day),
                csv_quote(&self.dates.format(&event.date)),
                csv_quote(&event.time),
                event.duration.to_string(),
                csv_quote(&event.place),
                event.number_of_participants.to_string(),
                csv_quote(or_na(&event.participation_type)),
                csv_quote(or_na(&event.event_reason)),
                csv_quote(&self.optional_date(&event.meeting_date)),
                csv_quote(or_na(&event.meeting_time)),
                csv_quote(or_na(&event.place_of_meeting)),
                csv_quote(or_na(&event.vehicle)),
                csv_quote(or_na(&event.camera_man)),
                csv_quote(&joined_or_na(event.songs.iter().map(|s| s.title.as_str()), "; ")),
                csv_quote(&joined_or_na(event.dress_details.iter().map(|d| d.description.as_str()), "; ")),
                csv_quote(event.status.as_str()),
                csv_quote(&self.dates.format_instant(event.created_at)),
                csv_quote(&self.dates.format_instant(event.updated_at)),
            ];
            lines.push(row.join(","));
        }

        log_export("csv", events.len());
        lines.join("\n")
    }

    /// Plain-text detail sheet for a single event
    pub fn event_summary(&self, event: &Event) -> String {
        let bullets = |items: Vec<&str>| {
            if items.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                items.iter().map(|item| format!("- {}", item)).collect::<Vec<_>>().join("\n")
            }
        };

        format!(
            "Event Details\n\
             =============\n\
             \n\
             Event Information:\n\
             - Day: {day}\n\
             - Date: {date}\n\
             - Time: {time}\n\
             - Duration: {duration} minutes\n\
             - Place: {place}\n\
             \n\
             Participation Details:\n\
             - Type: {kind}\n\
             - Reason: {reason}\n\
             - Participants: {participants}\n\
             \n\
             Meeting Information:\n\
             - Meeting Date: {meeting_date}\n\
             - Meeting Time: {meeting_time}\n\
             - Meeting Place: {meeting_place}\n\
             \n\
             Logistics:\n\
             - Vehicle: {vehicle}\n\
             - Camera Person: {camera}\n\
             \n\
             Songs Used:\n\
             {songs}\n\
             \n\
             Dress Details:\n\
             {dress}\n\
             \n\
             Status: {status}\n\
             Created: {created}\n\
             Updated: {updated}\n",
            day = event.day,
            date = self.dates.format(&event.date),
            time = event.time,
            duration = event.duration,
            place = event.place,
            kind = or_na(&event.participation_type),
            reason = or_na(&event.event_reason),
            participants = event.number_of_participants,
            meeting_date = self.optional_date(&event.meeting_date),
            meeting_time = or_na(&event.meeting_time),
            meeting_place = or_na(&event.place_of_meeting),
            vehicle = or_na(&event.vehicle),
            camera = or_na(&event.camera_man),
            songs = bullets(event.songs.iter().map(|s| s.title.as_str()).collect()),
            dress = bullets(event.dress_details.iter().map(|d| d.description.as_str()).collect()),
            status = capitalize(event.status.as_str()),
            created = self.dates.format_instant(event.created_at),
            updated = self.dates.format_instant(event.updated_at),
        )
    }

    /// Multi-event summary for bulk sharing
    pub fn bulk_summary(&self, events: &[&Event], generated_on: NaiveDate) -> String {
        let mut out = format!(
            "Events Summary\n\
             ==============\n\
             \n\
             Total Events: {}\n\
             Generated: {}\n",
            events.len(),
            self.dates.format_date(generated_on),
        );

        for (index, event) in events.iter().enumerate() {
            out.push_str(&format!(
                "\nEvent {}:\n\
                 - Day: {}\n\
                 - Date: {}\n\
                 - Time: {}\n\
                 - Duration: {} minutes\n\
                 - Place: {}\n\
                 - Participants: {}\n\
                 - Status: {}\n\
                 - Participation Type: {}\n\
                 - Reason: {}\n",
                index + 1,
                event.day,
                self.dates.format(&event.date),
                event.time,
                event.duration,
                event.place,
                event.number_of_participants,
                capitalize(event.status.as_str()),
                or_na(&event.participation_type),
                or_na(&event.event_reason),
            ));
            if !event.songs.is_empty() {
                let titles: Vec<_> = event.songs.iter().map(|s| s.title.as_str()).collect();
                out.push_str(&format!("- Songs: {}\n", titles.join(", ")));
            }
            if !event.dress_details.is_empty() {
                let dress: Vec<_> = event.dress_details.iter().map(|d| d.description.as_str()).collect();
                out.push_str(&format!("- Dress: {}\n", dress.join(", ")));
            }
        }

        log_export("bulk_summary", events.len());
        out
    }

    fn optional_date(&self, value: &Option<String>) -> String {
        match value.as_deref().filter(|v| !v.is_empty()) {
            Some(date) => self.dates.format(date),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

/// WhatsApp deep link carrying a bolded title and the summary text
///
/// Underline rules (`=`) are dropped and `-` bullets become `•`.
pub fn whatsapp_link(title: &str, text: &str) -> String {
    let body = text.replace('=', "").replace('-', "•");
    let message = format!("*{}*\n\n{}", title, body);
    format!("https://wa.me/?text={}", urlencoding::encode(&message))
}

/// Download file name such as `events-2024-06-01.csv`
pub fn export_file_name(prefix: &str, date: NaiveDate, extension: &str) -> String {
    format!("{}-{}.{}", prefix, date.format("%Y-%m-%d"), extension)
}

fn or_na(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

fn joined_or_na<'a>(items: impl Iterator<Item = &'a str>, separator: &str) -> String {
    let items: Vec<&str> = items.collect();
    if items.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        items.join(separator)
    }
}
