//! Event query engine
//!
//! Filters, searches and sorts an event list that has already been fetched.
//! Every operation borrows its input and returns a freshly built view, so the
//! same `(events, spec)` pair always yields the same ordering.

use std::borrow::Cow;

use tracing::{debug, trace};
use crate::config::QueryConfig;
use crate::models::Event;
use crate::utils::helpers::{parse_date, DateFormatter};
use crate::utils::logging::log_query_applied;
use super::keys::SortValue;
use super::spec::{DateRange, FieldFilters, FilterField, QuerySpec, SortState};

/// Filter/sort pipeline shared by the event management and party screens
#[derive(Debug, Clone, Default)]
pub struct EventQueryEngine {
    dates: DateFormatter,
}

impl EventQueryEngine {
    pub fn new(dates: DateFormatter) -> Self {
        Self { dates }
    }

    pub fn from_config(config: &QueryConfig) -> Self {
        Self::new(DateFormatter::new(config.date_display_format.clone()))
    }

    pub fn date_formatter(&self) -> &DateFormatter {
        &self.dates
    }

    /// Filter then sort, the full pipeline behind one table render
    pub fn apply<'a, I>(&self, events: I, spec: &QuerySpec) -> Vec<&'a Event>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let events: Vec<&'a Event> = events.into_iter().collect();
        let total = events.len();
        let view = self.sort(self.filter(events, spec), &spec.sort);
        log_query_applied(total, view.len(), spec.sort.key.as_ref().map(|k| k.as_str()));
        view
    }

    /// Events matching the global search, every active field filter and the
    /// date range, in input order
    pub fn filter<'a, I>(&self, events: I, spec: &QuerySpec) -> Vec<&'a Event>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let needle = spec.global_search.to_lowercase();
        events
            .into_iter()
            .filter(|event| {
                self.matches_global_search(event, &needle)
                    && self.matches_field_filters(event, &spec.field_filters)
                    && matches_date_range(event, &spec.date_range)
            })
            .collect()
    }

    /// Events whose date lies inside `range`, in input order
    pub fn search<'a, I>(&self, events: I, range: &DateRange) -> Vec<&'a Event>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        events
            .into_iter()
            .filter(|event| matches_date_range(event, range))
            .collect()
    }

    /// Stable sort by the active key; an inactive state keeps input order
    pub fn sort<'a, I>(&self, events: I, sort: &SortState) -> Vec<&'a Event>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        sort_events(events, sort)
    }

    /// Text of a filterable column, `None` when an optional field is absent
    pub fn field_text<'a>(&self, event: &'a Event, field: FilterField) -> Option<Cow<'a, str>> {
        match field {
            FilterField::Day => Some(Cow::Borrowed(event.day.as_str())),
            FilterField::Date => Some(Cow::Owned(self.dates.format(&event.date))),
            FilterField::Time => Some(Cow::Borrowed(event.time.as_str())),
            FilterField::Place => Some(Cow::Borrowed(event.place.as_str())),
            FilterField::ParticipationType => event.participation_type.as_deref().map(Cow::Borrowed),
            FilterField::EventReason => event.event_reason.as_deref().map(Cow::Borrowed),
            FilterField::Status => Some(Cow::Borrowed(event.status.as_str())),
            FilterField::MeetingDate => event.meeting_date.as_deref().map(|d| Cow::Owned(self.dates.format(d))),
            FilterField::Vehicle => event.vehicle.as_deref().map(Cow::Borrowed),
            FilterField::CameraMan => event.camera_man.as_deref().map(Cow::Borrowed),
        }
    }

    /// Values scanned by the free-text search box
    fn searchable_fields<'a>(&self, event: &'a Event) -> [Cow<'a, str>; 12] {
        let optional = |value: &'a Option<String>| Cow::Borrowed(value.as_deref().unwrap_or(""));
        [
            Cow::Borrowed(event.day.as_str()),
            Cow::Owned(self.dates.format(&event.date)),
            Cow::Borrowed(event.time.as_str()),
            Cow::Borrowed(event.place.as_str()),
            optional(&event.participation_type),
            optional(&event.event_reason),
            Cow::Borrowed(event.status.as_str()),
            event
                .meeting_date
                .as_deref()
                .map_or(Cow::Borrowed(""), |d| Cow::Owned(self.dates.format(d))),
            optional(&event.vehicle),
            optional(&event.camera_man),
            Cow::Owned(event.number_of_participants.to_string()),
            Cow::Owned(event.duration.to_string()),
        ]
    }

    fn matches_global_search(&self, event: &Event, needle: &str) -> bool {
        needle.is_empty()
            || self
                .searchable_fields(event)
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }

    fn matches_field_filters(&self, event: &Event, filters: &FieldFilters) -> bool {
        filters.active().all(|(field, pattern)| match self.field_text(event, field) {
            Some(text) => text.to_lowercase().contains(&pattern.to_lowercase()),
            None => {
                trace!(event_id = %event.id, field = field.as_str(), "Filter excludes event without value");
                false
            }
        })
    }
}

/// Date-range predicate shared by [`EventQueryEngine::filter`] and
/// [`EventQueryEngine::search`]
fn matches_date_range(event: &Event, range: &DateRange) -> bool {
    range.contains(parse_date(&event.date))
}

/// Stable sort of an event view by `sort`
pub fn sort_events<'a, I>(events: I, sort: &SortState) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let Some((key, direction)) = sort.active() else {
        return events.into_iter().collect();
    };

    let mut keyed: Vec<(SortValue<'a>, &'a Event)> = events
        .into_iter()
        .map(|event| (SortValue::extract(event, key), event))
        .collect();
    // slice::sort_by is stable, equal keys keep their input order
    keyed.sort_by(|a, b| a.0.compare(&b.0, direction));

    debug!(key = key.as_str(), direction = direction.as_str(), count = keyed.len(), "Sorted events");
    keyed.into_iter().map(|(_, event)| event).collect()
}
