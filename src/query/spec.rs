//! Query specification types
//!
//! A [`QuerySpec`] is rebuilt for every render of an event list: free-text
//! search, per-field substring filters, an inclusive date range and the sort
//! directive toggled from the column headers.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use crate::utils::errors::{PartyBoardError, Result};
use crate::utils::helpers::parse_date;

/// Sort order for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = PartyBoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(PartyBoardError::InvalidInput(format!("unknown sort direction: {}", other))),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sortable columns of the event tables
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortKey {
    Day,
    Date,
    Time,
    DateTime,
    Duration,
    Place,
    Participants,
    ParticipationType,
    EventReason,
    MeetingDate,
    MeetingTime,
    MeetingPlace,
    Vehicle,
    CameraMan,
    SongsCount,
    DressCount,
    SelectedParticipants,
    Status,
    Created,
    Updated,
    /// Unrecognised column name; sorts as a no-op
    Other(String),
}

impl SortKey {
    pub const KNOWN: [SortKey; 20] = [
        SortKey::Day,
        SortKey::Date,
        SortKey::Time,
        SortKey::DateTime,
        SortKey::Duration,
        SortKey::Place,
        SortKey::Participants,
        SortKey::ParticipationType,
        SortKey::EventReason,
        SortKey::MeetingDate,
        SortKey::MeetingTime,
        SortKey::MeetingPlace,
        SortKey::Vehicle,
        SortKey::CameraMan,
        SortKey::SongsCount,
        SortKey::DressCount,
        SortKey::SelectedParticipants,
        SortKey::Status,
        SortKey::Created,
        SortKey::Updated,
    ];

    pub fn from_name(name: &str) -> SortKey {
        match name.trim() {
            "day" => SortKey::Day,
            "date" => SortKey::Date,
            "time" => SortKey::Time,
            "date_time" => SortKey::DateTime,
            "duration" => SortKey::Duration,
            "place" => SortKey::Place,
            "participants" => SortKey::Participants,
            "participation_type" => SortKey::ParticipationType,
            "event_reason" => SortKey::EventReason,
            "meeting_date" => SortKey::MeetingDate,
            "meeting_time" => SortKey::MeetingTime,
            "meeting_place" => SortKey::MeetingPlace,
            "vehicle" => SortKey::Vehicle,
            "camera_man" => SortKey::CameraMan,
            "songs_count" => SortKey::SongsCount,
            "dress_count" => SortKey::DressCount,
            "selected_participants" => SortKey::SelectedParticipants,
            "status" => SortKey::Status,
            "created" => SortKey::Created,
            "updated" => SortKey::Updated,
            other => SortKey::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SortKey::Day => "day",
            SortKey::Date => "date",
            SortKey::Time => "time",
            SortKey::DateTime => "date_time",
            SortKey::Duration => "duration",
            SortKey::Place => "place",
            SortKey::Participants => "participants",
            SortKey::ParticipationType => "participation_type",
            SortKey::EventReason => "event_reason",
            SortKey::MeetingDate => "meeting_date",
            SortKey::MeetingTime => "meeting_time",
            SortKey::MeetingPlace => "meeting_place",
            SortKey::Vehicle => "vehicle",
            SortKey::CameraMan => "camera_man",
            SortKey::SongsCount => "songs_count",
            SortKey::DressCount => "dress_count",
            SortKey::SelectedParticipants => "selected_participants",
            SortKey::Status => "status",
            SortKey::Created => "created",
            SortKey::Updated => "updated",
            SortKey::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SortKey::Other(_))
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
        Ok(SortKey::from_name(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current sort directive of a table
///
/// Both halves are set together or cleared together by [`SortState::toggle`];
/// a state with either half missing leaves the list in its original order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction: Some(direction),
        }
    }

    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Key and direction, when both are set
    pub fn active(&self) -> Option<(&SortKey, SortDirection)> {
        Some((self.key.as_ref()?, self.direction?))
    }

    pub fn is_active(&self) -> bool {
        self.active().is_some()
    }

    /// Next state after a click on the `key` column header
    ///
    /// A new column starts ascending, the same column goes ascending ->
    /// descending -> unsorted.
    pub fn toggle(&self, key: SortKey) -> SortState {
        if self.key.as_ref() == Some(&key) {
            match self.direction {
                Some(SortDirection::Ascending) => return SortState::new(key, SortDirection::Descending),
                Some(SortDirection::Descending) => return SortState::unsorted(),
                None => {}
            }
        }
        SortState::new(key, SortDirection::Ascending)
    }
}

/// Free-function form of [`SortState::toggle`]
pub fn toggle_sort(current: &SortState, key: SortKey) -> SortState {
    current.toggle(key)
}

/// Columns that accept a per-field filter pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterField {
    Day,
    Date,
    Time,
    Place,
    ParticipationType,
    EventReason,
    Status,
    MeetingDate,
    Vehicle,
    CameraMan,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Day => "day",
            FilterField::Date => "date",
            FilterField::Time => "time",
            FilterField::Place => "place",
            FilterField::ParticipationType => "participation_type",
            FilterField::EventReason => "event_reason",
            FilterField::Status => "status",
            FilterField::MeetingDate => "meeting_date",
            FilterField::Vehicle => "vehicle",
            FilterField::CameraMan => "camera_man",
        }
    }
}

impl FromStr for FilterField {
    type Err = PartyBoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "day" => Ok(FilterField::Day),
            "date" => Ok(FilterField::Date),
            "time" => Ok(FilterField::Time),
            "place" => Ok(FilterField::Place),
            "participation_type" => Ok(FilterField::ParticipationType),
            "event_reason" => Ok(FilterField::EventReason),
            "status" => Ok(FilterField::Status),
            "meeting_date" => Ok(FilterField::MeetingDate),
            "vehicle" => Ok(FilterField::Vehicle),
            "camera_man" => Ok(FilterField::CameraMan),
            other => Err(PartyBoardError::InvalidInput(format!("unknown filter field: {}", other))),
        }
    }
}

/// Status filter value meaning "any status"
pub const ALL_STATUSES: &str = "all";

/// Field name -> substring pattern, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFilters {
    patterns: BTreeMap<FilterField, String>,
}

impl FieldFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FilterField, pattern: impl Into<String>) -> Self {
        self.set(field, pattern);
        self
    }

    pub fn set(&mut self, field: FilterField, pattern: impl Into<String>) {
        self.patterns.insert(field, pattern.into());
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.patterns.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.patterns.clear();
    }

    /// Parse a `field=pattern` expression
    pub fn parse_assignment(&mut self, expr: &str) -> Result<()> {
        let (field, pattern) = expr
            .split_once('=')
            .ok_or_else(|| PartyBoardError::InvalidInput(format!("expected field=pattern, got: {}", expr)))?;
        self.set(field.parse()?, pattern.trim());
        Ok(())
    }

    /// Patterns that actually constrain the result
    ///
    /// Empty patterns and the status sentinel `"all"` are skipped.
    pub fn active(&self) -> impl Iterator<Item = (FilterField, &str)> {
        self.patterns
            .iter()
            .filter(|(field, pattern)| {
                !pattern.is_empty()
                    && !(**field == FilterField::Status && pattern.eq_ignore_ascii_case(ALL_STATUSES))
            })
            .map(|(field, pattern)| (*field, pattern.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

/// Inclusive calendar-date bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self::new(Some(from), Some(to))
    }

    /// Build a range from raw form input; blank bounds are unset
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let bound = |raw: Option<&str>| -> Result<Option<NaiveDate>> {
            match raw.map(str::trim).filter(|s| !s.is_empty()) {
                Some(value) => parse_date(value)
                    .map(Some)
                    .ok_or_else(|| PartyBoardError::InvalidInput(format!("invalid date: {}", value))),
                None => Ok(None),
            }
        };
        Ok(Self::new(bound(from)?, bound(to)?))
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether `date` satisfies every set bound
    ///
    /// An unparseable date (`None`) only passes an unbounded range.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Everything applied to an event list for one render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    pub global_search: String,
    pub field_filters: FieldFilters,
    pub date_range: DateRange,
    pub sort: SortState,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.global_search = term.into();
        self
    }

    pub fn filter(mut self, field: FilterField, pattern: impl Into<String>) -> Self {
        self.field_filters.set(field, pattern);
        self
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    pub fn sorted_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = SortState::new(key, direction);
        self
    }

    /// Reset search, filters and range; the sort directive is kept
    pub fn clear_filters(&mut self) {
        self.global_search.clear();
        self.field_filters.clear();
        self.date_range = DateRange::default();
    }
}
