//! Test data helpers for creating events and users

use chrono::{DateTime, TimeZone, Utc};
use PartyBoard::models::{DressDetail, Event, EventParticipant, EventStatus, Role, Song, User};

/// Builder for test events with sensible defaults
#[derive(Debug, Clone)]
pub struct TestEvent {
    event: Event,
}

impl TestEvent {
    pub fn new(id: &str) -> Self {
        Self {
            event: Event {
                id: id.to_string(),
                day: "Friday".to_string(),
                date: "2024-01-15".to_string(),
                time: "18:00".to_string(),
                duration: 60,
                place: "Community Hall".to_string(),
                number_of_participants: 10,
                status: EventStatus::Pending,
                meeting_time: None,
                meeting_date: None,
                place_of_meeting: None,
                vehicle: None,
                camera_man: None,
                participation_type: None,
                event_reason: None,
                songs: vec![],
                dress_details: vec![],
                participants: vec![],
                created_at: timestamp(2024, 1, 1),
                updated_at: timestamp(2024, 1, 1),
            },
        }
    }

    pub fn with_day(mut self, day: &str) -> Self {
        self.event.day = day.to_string();
        self
    }

    pub fn with_date(mut self, date: &str) -> Self {
        self.event.date = date.to_string();
        self
    }

    pub fn with_time(mut self, time: &str) -> Self {
        self.event.time = time.to_string();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.event.duration = minutes;
        self
    }

    pub fn with_place(mut self, place: &str) -> Self {
        self.event.place = place.to_string();
        self
    }

    pub fn with_participants(mut self, count: u32) -> Self {
        self.event.number_of_participants = count;
        self
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.event.status = status;
        self
    }

    pub fn with_vehicle(mut self, vehicle: &str) -> Self {
        self.event.vehicle = Some(vehicle.to_string());
        self
    }

    pub fn with_camera_man(mut self, name: &str) -> Self {
        self.event.camera_man = Some(name.to_string());
        self
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.event.event_reason = Some(reason.to_string());
        self
    }

    pub fn with_meeting(mut self, date: Option<&str>, time: Option<&str>, place: Option<&str>) -> Self {
        self.event.meeting_date = date.map(str::to_string);
        self.event.meeting_time = time.map(str::to_string);
        self.event.place_of_meeting = place.map(str::to_string);
        self
    }

    pub fn with_songs(mut self, titles: &[&str]) -> Self {
        self.event.songs = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Song {
                title: title.to_string(),
                artist: None,
                duration: None,
                order: i as u32 + 1,
            })
            .collect();
        self
    }

    pub fn with_dress(mut self, descriptions: &[&str]) -> Self {
        self.event.dress_details = descriptions
            .iter()
            .enumerate()
            .map(|(i, d)| DressDetail {
                description: d.to_string(),
                order: i as u32 + 1,
            })
            .collect();
        self
    }

    pub fn with_selected(mut self, names: &[&str]) -> Self {
        self.event.participants = names
            .iter()
            .enumerate()
            .map(|(i, name)| EventParticipant {
                user_id: (i + 1).to_string(),
                user_name: name.to_string(),
                is_confirmed: true,
            })
            .collect();
        self
    }

    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.event.created_at = at;
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}

pub fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).unwrap()
}

/// Ids of a view, in order
pub fn ids(events: &[&Event]) -> Vec<String> {
    events.iter().map(|e| e.id.clone()).collect()
}

/// Three events spread over January and February 2024
pub fn calendar_events() -> Vec<Event> {
    vec![
        TestEvent::new("jan-1").with_date("2024-01-01").build(),
        TestEvent::new("jan-15").with_date("2024-01-15").build(),
        TestEvent::new("feb-1").with_date("2024-02-01").build(),
    ]
}

/// Mixed statuses and times used by the combined filter and sort checks
pub fn mixed_status_events() -> Vec<Event> {
    vec![
        TestEvent::new("1").with_date("2024-03-10").with_time("18:00").with_status(EventStatus::Pending).build(),
        TestEvent::new("2").with_date("2024-03-05").with_time("20:00").with_status(EventStatus::Confirmed).build(),
        TestEvent::new("3").with_date("2024-03-05").with_time("09:30").with_status(EventStatus::Pending).build(),
        TestEvent::new("4").with_date("2024-02-28").with_time("12:00").with_status(EventStatus::Cancelled).build(),
        TestEvent::new("5").with_date("2024-03-05").with_time("19:00").with_status(EventStatus::Pending).build(),
    ]
}

pub fn test_user(id: &str, username: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        name: None,
        role,
        permissions: Default::default(),
        is_active: true,
        created_at: timestamp(2024, 1, 1),
        updated_at: timestamp(2024, 1, 1),
    }
}
