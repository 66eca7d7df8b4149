//! Ready-made event views for the party and dashboard screens

use chrono::NaiveDate;
use serde::Serialize;
use crate::models::{Event, EventStatus};
use crate::utils::helpers::parse_date;
use super::engine::sort_events;
use super::spec::{SortDirection, SortKey, SortState};

/// Events with exactly `status`, in input order
pub fn by_status<'a, I>(events: I, status: EventStatus) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events.into_iter().filter(|event| event.status == status).collect()
}

/// Per-status tallies shown on the party tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        events.into_iter().fold(Self::default(), |mut counts, event| {
            *counts.slot(event.status) += 1;
            counts
        })
    }

    pub fn get(&self, status: EventStatus) -> usize {
        match status {
            EventStatus::Pending => self.pending,
            EventStatus::Confirmed => self.confirmed,
            EventStatus::Completed => self.completed,
            EventStatus::Cancelled => self.cancelled,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.confirmed + self.completed + self.cancelled
    }

    fn slot(&mut self, status: EventStatus) -> &mut usize {
        match status {
            EventStatus::Pending => &mut self.pending,
            EventStatus::Confirmed => &mut self.confirmed,
            EventStatus::Completed => &mut self.completed,
            EventStatus::Cancelled => &mut self.cancelled,
        }
    }
}

/// Open events dated today or later, soonest first
pub fn upcoming<'a, I>(events: I, today: NaiveDate) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let open = events.into_iter().filter(|event| {
        event.status.is_open() && parse_date(&event.date).is_some_and(|date| date >= today)
    });
    sort_events(open, &SortState::new(SortKey::DateTime, SortDirection::Ascending))
}

/// Events dated before today, most recent first
pub fn past<'a, I>(events: I, today: NaiveDate) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let earlier = events
        .into_iter()
        .filter(|event| parse_date(&event.date).is_some_and(|date| date < today));
    sort_events(earlier, &SortState::new(SortKey::DateTime, SortDirection::Descending))
}

/// Dashboard "nearest party": the soonest event from today on, whatever its
/// status, or the earliest event on record when nothing lies ahead
pub fn nearest_event<'a, I>(events: I, today: NaiveDate) -> Option<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let by_date_time = SortState::new(SortKey::DateTime, SortDirection::Ascending);
    let ordered = sort_events(events, &by_date_time);

    ordered
        .iter()
        .copied()
        .find(|event| parse_date(&event.date).is_some_and(|date| date >= today))
        .or_else(|| ordered.first().copied())
}
