//! Sort key extraction and comparison

use std::cmp::Ordering;

use chrono::{NaiveDateTime, NaiveTime};
use crate::models::Event;
use crate::utils::helpers::{parse_date, parse_date_time};
use super::spec::{SortDirection, SortKey};

/// Comparable value pulled out of an event for one sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SortValue<'a> {
    Text(&'a str),
    Number(u64),
    Moment(NaiveDateTime),
    /// A date or time that failed to parse; always placed last
    Invalid,
    /// Unknown key; equal to everything
    Neutral,
}

impl<'a> SortValue<'a> {
    pub(crate) fn extract(event: &'a Event, key: &SortKey) -> SortValue<'a> {
        match key {
            SortKey::Day => SortValue::Text(&event.day),
            SortKey::Date => midnight(&event.date),
            SortKey::Time => SortValue::Text(&event.time),
            SortKey::DateTime => parse_date_time(&event.date, &event.time)
                .map_or(SortValue::Invalid, SortValue::Moment),
            SortKey::Duration => SortValue::Number(event.duration.into()),
            SortKey::Place => SortValue::Text(&event.place),
            SortKey::Participants => SortValue::Number(event.number_of_participants.into()),
            SortKey::ParticipationType => optional_text(&event.participation_type),
            SortKey::EventReason => optional_text(&event.event_reason),
            SortKey::MeetingDate => match event.meeting_date.as_deref().filter(|d| !d.trim().is_empty()) {
                Some(date) => midnight(date),
                None => SortValue::Moment(NaiveDateTime::default()),
            },
            SortKey::MeetingTime => optional_text(&event.meeting_time),
            SortKey::MeetingPlace => optional_text(&event.place_of_meeting),
            SortKey::Vehicle => optional_text(&event.vehicle),
            SortKey::CameraMan => optional_text(&event.camera_man),
            SortKey::SongsCount => SortValue::Number(event.songs.len() as u64),
            SortKey::DressCount => SortValue::Number(event.dress_details.len() as u64),
            SortKey::SelectedParticipants => SortValue::Number(event.participants.len() as u64),
            SortKey::Status => SortValue::Text(event.status.as_str()),
            SortKey::Created => SortValue::Moment(event.created_at.naive_utc()),
            SortKey::Updated => SortValue::Moment(event.updated_at.naive_utc()),
            SortKey::Other(_) => SortValue::Neutral,
        }
    }

    /// Order two values; invalid values go last in either direction
    pub(crate) fn compare(&self, other: &SortValue<'_>, direction: SortDirection) -> Ordering {
        match (self, other) {
            (SortValue::Invalid, SortValue::Invalid) => Ordering::Equal,
            (SortValue::Invalid, _) => Ordering::Greater,
            (_, SortValue::Invalid) => Ordering::Less,
            _ => {
                let ordering = self.compare_valid(other);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
        }
    }

    fn compare_valid(&self, other: &SortValue<'_>) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.cmp(b),
            (SortValue::Moment(a), SortValue::Moment(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

fn midnight(raw: &str) -> SortValue<'_> {
    parse_date(raw).map_or(SortValue::Invalid, |date| {
        SortValue::Moment(date.and_time(NaiveTime::default()))
    })
}

fn optional_text(value: &Option<String>) -> SortValue<'_> {
    SortValue::Text(value.as_deref().unwrap_or(""))
}
