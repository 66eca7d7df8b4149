//! Event model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::utils::errors::{PartyBoardError, Result};
use crate::utils::helpers::parse_date;
use super::wire::string_or_number;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub day: String,
    pub date: String,
    pub time: String,
    /// Minutes
    pub duration: u32,
    pub place: String,
    pub number_of_participants: u32,
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_meeting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_man: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_reason: Option<String>,
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default)]
    pub dress_details: Vec<DressDetail>,
    #[serde(default)]
    pub participants: Vec<EventParticipant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DressDetail {
    pub description: String,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventParticipant {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub is_confirmed: bool,
}

/// Lifecycle status; transitions are decided by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Pending,
        EventStatus::Confirmed,
        EventStatus::Completed,
        EventStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Confirmed => "confirmed",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the event still belongs in the "upcoming" lists
    pub fn is_open(&self) -> bool {
        matches!(self, EventStatus::Pending | EventStatus::Confirmed)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = PartyBoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(EventStatus::Pending),
            "confirmed" => Ok(EventStatus::Confirmed),
            "completed" => Ok(EventStatus::Completed),
            "cancelled" => Ok(EventStatus::Cancelled),
            _ => Err(PartyBoardError::InvalidStatus(s.to_string())),
        }
    }
}

/// Payload for `POST /events/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub day: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub place: String,
    pub number_of_participants: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_meeting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_man: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_reason: Option<String>,
    pub songs_data: Vec<SongInput>,
    pub dress_details_data: Vec<String>,
    /// User ids of the assigned participants
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongInput {
    pub title: String,
    pub artist: String,
    pub duration: Option<u32>,
}

impl SongInput {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: String::new(),
            duration: None,
        }
    }
}

impl CreateEventRequest {
    /// Check required fields before submission
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("day", &self.day),
            ("date", &self.date),
            ("time", &self.time),
            ("place", &self.place),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(PartyBoardError::InvalidInput(format!("{} is required", name)));
        }
        if self.duration == 0 {
            return Err(PartyBoardError::InvalidInput("duration must be greater than 0".to_string()));
        }
        if parse_date(&self.date).is_none() {
            return Err(PartyBoardError::InvalidInput(format!("invalid date: {}", self.date)));
        }
        if let Some(meeting_date) = self.meeting_date.as_deref().filter(|d| !d.trim().is_empty()) {
            if parse_date(meeting_date).is_none() {
                return Err(PartyBoardError::InvalidInput(format!("invalid meeting date: {}", meeting_date)));
            }
        }
        Ok(())
    }

    /// Drop blank song and dress entries left over from the form
    pub fn normalized(mut self) -> Self {
        self.songs_data.retain(|song| !song.title.trim().is_empty());
        self.dress_details_data.retain(|detail| !detail.trim().is_empty());
        for optional in [
            &mut self.meeting_time,
            &mut self.meeting_date,
            &mut self.place_of_meeting,
            &mut self.vehicle,
            &mut self.camera_man,
            &mut self.participation_type,
            &mut self.event_reason,
        ] {
            if optional.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *optional = None;
            }
        }
        self
    }
}

/// Payload for `PATCH /events/{id}/`; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_meeting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_man: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub songs_data: Option<Vec<SongInput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dress_details_data: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,
}

/// Payload for `PATCH /events/{id}/status/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: EventStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sample_json() -> &'static str {
        r#"{
            "id": 42,
            "day": "Friday",
            "date": "2024-03-01",
            "time": "19:30:00",
            "duration": 90,
            "place": "Grand Hall",
            "number_of_participants": 12,
            "status": "confirmed",
            "vehicle": "Van",
            "songs": [{"id": 1, "title": "Tala al Badru", "order": 1, "created_at": "2024-02-01T10:00:00Z"}],
            "participants": [{"id": 3, "user": "amina", "user_id": 7, "user_name": "Amina", "joined_at": "2024-02-02T10:00:00Z", "is_confirmed": true}],
            "created_at": "2024-02-01T10:00:00Z",
            "updated_at": "2024-02-03T10:00:00Z"
        }"#
    }

    #[test]
    fn test_event_deserialization() {
        let event: Event = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(event.id, "42");
        assert_eq!(event.status, EventStatus::Confirmed);
        assert_eq!(event.vehicle.as_deref(), Some("Van"));
        assert_eq!(event.camera_man, None);
        assert_eq!(event.songs.len(), 1);
        assert!(event.dress_details.is_empty());
        assert_eq!(event.participants[0].user_id, "7");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Pending".parse::<EventStatus>().unwrap(), EventStatus::Pending);
        assert_matches!("archived".parse::<EventStatus>(), Err(PartyBoardError::InvalidStatus(_)));
        assert!(EventStatus::Confirmed.is_open());
        assert!(!EventStatus::Cancelled.is_open());
    }

    #[test]
    fn test_create_request_validation() {
        let request = CreateEventRequest {
            day: "Friday".to_string(),
            date: "2024-03-01".to_string(),
            time: "19:30".to_string(),
            duration: 60,
            place: "Grand Hall".to_string(),
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        let missing_place = CreateEventRequest { place: "  ".to_string(), ..request.clone() };
        assert_matches!(missing_place.validate(), Err(PartyBoardError::InvalidInput(msg)) if msg.contains("place"));

        let zero_duration = CreateEventRequest { duration: 0, ..request.clone() };
        assert!(zero_duration.validate().is_err());

        let bad_date = CreateEventRequest { date: "tomorrow".to_string(), ..request };
        assert!(bad_date.validate().is_err());
    }

    #[test]
    fn test_create_request_normalization() {
        let request = CreateEventRequest {
            songs_data: vec![SongInput::titled("Nasheed"), SongInput::titled("  ")],
            dress_details_data: vec!["White thobe".to_string(), String::new()],
            vehicle: Some(" ".to_string()),
            camera_man: Some("Yusuf".to_string()),
            ..Default::default()
        }
        .normalized();

        assert_eq!(request.songs_data, vec![SongInput::titled("Nasheed")]);
        assert_eq!(request.dress_details_data, vec!["White thobe".to_string()]);
        assert_eq!(request.vehicle, None);
        assert_eq!(request.camera_man.as_deref(), Some("Yusuf"));

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("vehicle").is_none());
    }
}
