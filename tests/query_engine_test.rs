//! Query engine behaviour over realistic event lists

mod helpers;

use helpers::*;
use chrono::NaiveDate;
use proptest::prelude::*;
use PartyBoard::models::{Event, EventStatus};
use PartyBoard::query::{
    nearest_event, sort_events, toggle_sort, upcoming, DateRange, EventQueryEngine, FilterField, QuerySpec,
    SortDirection, SortKey, SortState, StatusCounts,
};
use PartyBoard::utils::helpers::DateFormatter;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_empty_spec_returns_input_order() {
    let events = mixed_status_events();
    let engine = EventQueryEngine::default();
    let view = engine.apply(&events, &QuerySpec::new());
    assert_eq!(ids(&view), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_global_search_matches_any_field_case_insensitively() {
    let events = vec![
        TestEvent::new("a").with_place("The Grand Ballroom").build(),
        TestEvent::new("b").with_place("Small Tent").build(),
        TestEvent::new("c").with_reason("GRAND opening").build(),
    ];
    let engine = EventQueryEngine::default();

    let view = engine.apply(&events, &QuerySpec::new().search("grand"));
    assert_eq!(ids(&view), vec!["a", "c"]);

    let view = engine.apply(&events, &QuerySpec::new().search("zzz"));
    assert!(view.is_empty());
}

#[test]
fn test_global_search_uses_formatted_date() {
    let events = vec![
        TestEvent::new("a").with_date("2024-01-15").build(),
        TestEvent::new("b").with_date("2024-02-15").build(),
    ];
    let engine = EventQueryEngine::default();
    let view = engine.apply(&events, &QuerySpec::new().search("1/15/2024"));
    assert_eq!(ids(&view), vec!["a"]);

    let iso = EventQueryEngine::new(DateFormatter::new("%Y-%m-%d"));
    let view = iso.apply(&events, &QuerySpec::new().search("2024-02"));
    assert_eq!(ids(&view), vec!["b"]);
}

#[test]
fn test_display_format_must_render_dates() {
    let mut settings = PartyBoard::Settings::default();
    settings.query.date_display_format = "%Y-%m-%d %H:%M".to_string();
    assert!(settings.validate().is_err());

    // An engine built from such a pattern still answers instead of panicking
    let events = vec![TestEvent::new("a").with_place("Grand Hall").build()];
    let engine = EventQueryEngine::from_config(&settings.query);
    let view = engine.apply(&events, &QuerySpec::new().search("hall"));
    assert_eq!(ids(&view), vec!["a"]);
    assert_eq!(engine.date_formatter().format("2024-01-15"), "2024-01-15");
}

#[test]
fn test_field_filter_excludes_events_missing_the_field() {
    let events = vec![
        TestEvent::new("a").with_vehicle("Blue Van").build(),
        TestEvent::new("b").build(),
        TestEvent::new("c").with_vehicle("Bus").build(),
    ];
    let engine = EventQueryEngine::default();
    let view = engine.apply(&events, &QuerySpec::new().filter(FilterField::Vehicle, "van"));
    assert_eq!(ids(&view), vec!["a"]);
}

#[test]
fn test_field_filters_combine_with_and() {
    let events = vec![
        TestEvent::new("a").with_place("Hall A").with_camera_man("Omar").build(),
        TestEvent::new("b").with_place("Hall B").with_camera_man("Sara").build(),
        TestEvent::new("c").with_place("Garden").with_camera_man("Omar").build(),
    ];
    let engine = EventQueryEngine::default();
    let spec = QuerySpec::new()
        .filter(FilterField::Place, "hall")
        .filter(FilterField::CameraMan, "omar");
    assert_eq!(ids(&engine.apply(&events, &spec)), vec!["a"]);
}

#[test]
fn test_status_all_and_empty_patterns_do_not_constrain() {
    let events = mixed_status_events();
    let engine = EventQueryEngine::default();
    let spec = QuerySpec::new()
        .filter(FilterField::Status, "ALL")
        .filter(FilterField::Place, "");
    assert_eq!(engine.apply(&events, &spec).len(), events.len());
}

#[test]
fn test_date_range_is_inclusive() {
    let events = calendar_events();
    let engine = EventQueryEngine::default();

    let range = DateRange::between(date(2024, 1, 1), date(2024, 1, 15));
    assert_eq!(ids(&engine.search(&events, &range)), vec!["jan-1", "jan-15"]);

    let from_only = DateRange::new(Some(date(2024, 1, 15)), None);
    assert_eq!(ids(&engine.search(&events, &from_only)), vec!["jan-15", "feb-1"]);

    let to_only = DateRange::new(None, Some(date(2024, 1, 1)));
    assert_eq!(ids(&engine.search(&events, &to_only)), vec!["jan-1"]);
}

#[test]
fn test_malformed_date_only_survives_unbounded_range() {
    let mut events = calendar_events();
    events.push(TestEvent::new("broken").with_date("someday").build());
    let engine = EventQueryEngine::default();

    assert_eq!(engine.search(&events, &DateRange::default()).len(), 4);
    let range = DateRange::between(date(2023, 1, 1), date(2025, 1, 1));
    assert!(!ids(&engine.search(&events, &range)).contains(&"broken".to_string()));
}

#[test]
fn test_combined_status_filter_and_date_time_sort() {
    let events = mixed_status_events();
    let engine = EventQueryEngine::default();
    let spec = QuerySpec::new()
        .filter(FilterField::Status, "pending")
        .sorted_by(SortKey::DateTime, SortDirection::Ascending);
    assert_eq!(ids(&engine.apply(&events, &spec)), vec!["3", "5", "1"]);
}

#[test]
fn test_sort_by_participants_descending() {
    let events = vec![
        TestEvent::new("a").with_participants(5).build(),
        TestEvent::new("b").with_participants(20).build(),
        TestEvent::new("c").with_participants(12).build(),
    ];
    let sort = SortState::new(SortKey::Participants, SortDirection::Descending);
    assert_eq!(ids(&sort_events(&events, &sort)), vec!["b", "c", "a"]);
}

#[test]
fn test_sort_by_collection_sizes() {
    let events = vec![
        TestEvent::new("a").with_songs(&["one", "two"]).with_dress(&["white"]).build(),
        TestEvent::new("b").build(),
        TestEvent::new("c").with_songs(&["one"]).with_selected(&["Ali", "Huda", "Mona"]).build(),
    ];
    let songs = SortState::new(SortKey::SongsCount, SortDirection::Ascending);
    assert_eq!(ids(&sort_events(&events, &songs)), vec!["b", "c", "a"]);

    let selected = SortState::new(SortKey::SelectedParticipants, SortDirection::Descending);
    assert_eq!(ids(&sort_events(&events, &selected)), vec!["c", "a", "b"]);
}

#[test]
fn test_missing_meeting_date_sorts_as_earliest() {
    let events = vec![
        TestEvent::new("a").with_meeting(Some("2024-05-01"), None, None).build(),
        TestEvent::new("b").build(),
        TestEvent::new("c").with_meeting(Some("2024-04-01"), None, None).build(),
    ];
    let sort = SortState::new(SortKey::MeetingDate, SortDirection::Ascending);
    assert_eq!(ids(&sort_events(&events, &sort)), vec!["b", "c", "a"]);
}

#[test]
fn test_unparseable_dates_sort_last_in_both_directions() {
    let events = vec![
        TestEvent::new("bad").with_date("not a date").build(),
        TestEvent::new("early").with_date("2024-01-01").build(),
        TestEvent::new("late").with_date("2024-06-01").build(),
    ];
    let asc = SortState::new(SortKey::Date, SortDirection::Ascending);
    assert_eq!(ids(&sort_events(&events, &asc)), vec!["early", "late", "bad"]);

    let desc = SortState::new(SortKey::Date, SortDirection::Descending);
    assert_eq!(ids(&sort_events(&events, &desc)), vec!["late", "early", "bad"]);
}

#[test]
fn test_unknown_sort_key_keeps_input_order() {
    let events = mixed_status_events();
    let sort = SortState::new(SortKey::from_name("colour"), SortDirection::Descending);
    assert_eq!(ids(&sort_events(&events, &sort)), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_toggle_cycle() {
    let start = SortState::unsorted();
    let first = toggle_sort(&start, SortKey::Place);
    assert_eq!(first, SortState::new(SortKey::Place, SortDirection::Ascending));

    let second = toggle_sort(&first, SortKey::Place);
    assert_eq!(second, SortState::new(SortKey::Place, SortDirection::Descending));

    let third = toggle_sort(&second, SortKey::Place);
    assert!(!third.is_active());

    let switched = toggle_sort(&second, SortKey::Date);
    assert_eq!(switched, SortState::new(SortKey::Date, SortDirection::Ascending));
}

#[test]
fn test_party_views() {
    let events = mixed_status_events();
    let counts = StatusCounts::from_events(&events);
    assert_eq!(counts.get(EventStatus::Pending), 3);
    assert_eq!(counts.total(), 5);

    let today = date(2024, 3, 1);
    let next = nearest_event(&events, today).unwrap();
    assert_eq!(next.id, "3");

    // Cancelled events never count as upcoming
    let ahead = upcoming(&events, date(2024, 2, 1));
    assert_eq!(ids(&ahead), vec!["3", "5", "2", "1"]);
}

fn arb_event() -> impl Strategy<Value = Event> {
    (
        0u32..40,
        prop_oneof![Just("2024-01-10"), Just("2024-02-20"), Just("2024-03-30"), Just("garbage")],
        prop_oneof![Just("Hall"), Just("Garden"), Just("Beach"), Just("hall annex")],
        prop_oneof![Just(EventStatus::Pending), Just(EventStatus::Confirmed), Just(EventStatus::Cancelled)],
    )
        .prop_map(|(participants, date, place, status)| {
            TestEvent::new(&participants.to_string())
                .with_participants(participants)
                .with_date(date)
                .with_place(place)
                .with_status(status)
                .build()
        })
}

fn arb_spec() -> impl Strategy<Value = QuerySpec> {
    (
        prop_oneof![Just(""), Just("hall"), Just("2024"), Just("x")],
        prop_oneof![Just("all"), Just("pending"), Just("")],
        prop_oneof![
            Just(SortKey::Place),
            Just(SortKey::Participants),
            Just(SortKey::Date),
            Just(SortKey::DateTime),
            Just(SortKey::Status),
        ],
        any::<bool>(),
    )
        .prop_map(|(search, status, key, desc)| {
            let direction = if desc { SortDirection::Descending } else { SortDirection::Ascending };
            QuerySpec::new()
                .search(search)
                .filter(FilterField::Status, status)
                .sorted_by(key, direction)
        })
}

proptest! {
    #[test]
    fn prop_result_is_subset_of_input(events in prop::collection::vec(arb_event(), 0..20), spec in arb_spec()) {
        let engine = EventQueryEngine::default();
        let view = engine.apply(&events, &spec);
        prop_assert!(view.len() <= events.len());

        let positions: Vec<usize> = view
            .iter()
            .map(|event| events.iter().position(|e| std::ptr::eq(e, *event)))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| TestCaseError::fail("view holds an event not in the input"))?;
        let mut distinct = positions.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(distinct.len(), positions.len());
    }

    #[test]
    fn prop_filter_keeps_input_order(events in prop::collection::vec(arb_event(), 0..20), spec in arb_spec()) {
        let engine = EventQueryEngine::default();
        let view = engine.filter(&events, &spec);
        let positions: Vec<usize> = view
            .iter()
            .filter_map(|event| events.iter().position(|e| std::ptr::eq(e, *event)))
            .collect();
        prop_assert_eq!(positions.len(), view.len());
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prop_apply_is_idempotent(events in prop::collection::vec(arb_event(), 0..20), spec in arb_spec()) {
        let engine = EventQueryEngine::default();
        let once = engine.apply(&events, &spec);
        let twice = engine.apply(once.iter().copied(), &spec);
        prop_assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn prop_sort_is_stable(events in prop::collection::vec(arb_event(), 0..20)) {
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sort = SortState::new(SortKey::Status, direction);
            let sorted = sort_events(&events, &sort);
            prop_assert_eq!(sorted.len(), events.len());
            for pair in sorted.windows(2) {
                if pair[0].status == pair[1].status {
                    let first = events.iter().position(|e| std::ptr::eq(e, pair[0])).unwrap();
                    let second = events.iter().position(|e| std::ptr::eq(e, pair[1])).unwrap();
                    prop_assert!(first < second, "{:?} broke input order", direction);
                }
            }
        }
    }
}
