use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use events_directory::config::DirectoryConfig;
use events_directory::contract::{
    DirectoryError, Event, EventPatch, EventsDirectoryApi, FilterSpec, FormatPreference,
    LoginRequest, NewEventRequest, PreferenceSet, RegisterUserRequest, Theme, User, UserId,
    UserPatch,
};
use events_directory::EventsDirectory;

fn client() -> Arc<dyn EventsDirectoryApi> {
    EventsDirectory::new(&DirectoryConfig::default()).client()
}

fn themes(list: &[Theme]) -> PreferenceSet {
    list.iter().copied().collect()
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 11, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn register(api: &dyn EventsDirectoryApi, email: &str, prefs: PreferenceSet) -> User {
    let request = RegisterUserRequest::builder()
        .name(email.split('@').next().unwrap())
        .email(email)
        .password("hunter2")
        .location("Lisbon")
        .birth_date(NaiveDate::from_ymd_opt(1988, 7, 21).unwrap())
        .themes(prefs)
        .build()
        .expect("complete registration request");
    api.register_user(request).expect("registration succeeds")
}

fn create(
    api: &dyn EventsDirectoryApi,
    organizer: UserId,
    title: &str,
    prefs: PreferenceSet,
    format: FormatPreference,
) -> Event {
    let request = NewEventRequest::builder()
        .organizer(organizer)
        .title(title)
        .description("An evening together")
        .format(format)
        .location("Rua Augusta 1")
        .schedule(at(3, 18), at(3, 21))
        .max_participants(2)
        .themes(prefs)
        .build()
        .expect("complete event request");
    api.create_event(request).expect("event creation succeeds")
}

fn ids(events: &[Event]) -> Vec<u64> {
    events.iter().map(|e| e.id.0).collect()
}

#[test]
fn catalog_scenario_filters_by_theme_and_format() {
    let api = client();
    let a = register(api.as_ref(), "a@x.com", themes(&[Theme::Cultural]));
    let b = register(api.as_ref(), "b@x.com", themes(&[Theme::Sports]));

    let e1 = create(
        api.as_ref(),
        a.id,
        "Gallery night",
        themes(&[Theme::Cultural]),
        FormatPreference::online(),
    );
    let e2 = create(
        api.as_ref(),
        b.id,
        "Five-a-side",
        themes(&[Theme::Sports]),
        FormatPreference::in_person(),
    );

    let cultural = FilterSpec::new(themes(&[Theme::Cultural]), None);
    assert_eq!(ids(&api.filter_events(&cultural)), vec![e1.id.0]);

    let cultural_or_sports_online = FilterSpec::new(
        themes(&[Theme::Cultural, Theme::Sports]),
        Some(FormatPreference::online()),
    );
    assert_eq!(
        ids(&api.filter_events(&cultural_or_sports_online)),
        vec![e1.id.0]
    );

    let in_person = FilterSpec::any().with_format(FormatPreference::in_person());
    assert_eq!(ids(&api.filter_events(&in_person)), vec![e2.id.0]);

    assert!(api.remove_event(e1.id));
    assert!(api.get_event(e1.id).is_none());
    assert!(api.filter_events(&cultural).is_empty());
}

#[test]
fn empty_filter_returns_all_events_once_in_creation_order() {
    let api = client();
    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());
    let created: Vec<_> = ["one", "two", "three", "four"]
        .iter()
        .map(|title| {
            create(
                api.as_ref(),
                org.id,
                title,
                PreferenceSet::none(),
                FormatPreference::hybrid(),
            )
        })
        .collect();

    let all = api.filter_events(&FilterSpec::any());
    assert_eq!(all, created);
    assert_eq!(all, api.list_events());
}

#[test]
fn disjoint_themes_yield_nothing() {
    let api = client();
    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());
    create(
        api.as_ref(),
        org.id,
        "Charity run",
        themes(&[Theme::Charitable, Theme::Sports]),
        FormatPreference::in_person(),
    );

    let filter = FilterSpec::new(themes(&[Theme::Religious, Theme::Corporate]), None);
    assert!(api.filter_events(&filter).is_empty());
}

#[test]
fn filter_result_is_a_snapshot() {
    let api = client();
    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());
    let first = create(
        api.as_ref(),
        org.id,
        "First",
        PreferenceSet::none(),
        FormatPreference::online(),
    );

    let snapshot = api.filter_events(&FilterSpec::any());

    create(
        api.as_ref(),
        org.id,
        "Second",
        PreferenceSet::none(),
        FormatPreference::online(),
    );
    api.update_event(
        first.id,
        EventPatch {
            title: Some("Renamed".to_string()),
            ..EventPatch::default()
        },
    )
    .unwrap();
    api.remove_event(first.id);

    assert_eq!(snapshot, vec![first]);
}

#[test]
fn ids_are_unique_and_never_reused() {
    let api = client();
    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());

    let mut seen = HashSet::new();
    for round in 0..6 {
        let event = create(
            api.as_ref(),
            org.id,
            &format!("round {round}"),
            PreferenceSet::none(),
            FormatPreference::online(),
        );
        assert!(seen.insert(event.id), "id {} reused", event.id);
        assert_eq!(api.get_event(event.id), Some(event.clone()));
        assert!(api.remove_event(event.id));
        assert!(api.get_event(event.id).is_none());
    }

    let removed = register(api.as_ref(), "gone@x.com", PreferenceSet::none());
    assert!(api.remove_user(removed.id));
    let replacement = register(api.as_ref(), "gone@x.com", PreferenceSet::none());
    assert_ne!(replacement.id, removed.id);
    assert!(api.get_user(removed.id).is_none());
}

#[test]
fn removing_unknown_entities_reports_false() {
    let api = client();
    assert!(!api.remove_user(UserId(42)));
    assert!(!api.remove_event(events_directory::contract::EventId(42)));
}

#[test]
fn duplicate_email_is_a_conflict() {
    let api = client();
    register(api.as_ref(), "same@x.com", PreferenceSet::none());

    let request = RegisterUserRequest::builder()
        .name("Copy")
        .email("Same@X.com")
        .password("pw")
        .location("Porto")
        .birth_date(NaiveDate::from_ymd_opt(1999, 9, 9).unwrap())
        .build()
        .unwrap();

    assert_eq!(
        api.register_user(request),
        Err(DirectoryError::conflict("Same@X.com".to_string()))
    );
}

#[test]
fn missing_required_field_fails_at_construction() {
    let err = RegisterUserRequest::builder()
        .name("No email")
        .password("pw")
        .location("Porto")
        .birth_date(NaiveDate::from_ymd_opt(1999, 9, 9).unwrap())
        .build()
        .unwrap_err();
    assert_eq!(err, DirectoryError::missing_field("email"));

    let err = NewEventRequest::builder()
        .organizer(UserId(1))
        .title("No schedule")
        .format(FormatPreference::online())
        .location("Online")
        .max_participants(3)
        .build()
        .unwrap_err();
    assert_eq!(err, DirectoryError::missing_field("starts_at"));

    let err = LoginRequest::builder().email("a@x.com").build().unwrap_err();
    assert_eq!(err, DirectoryError::missing_field("password"));
}

#[test]
fn empty_patch_leaves_entities_unchanged() {
    let api = client();
    let user = register(api.as_ref(), "same@x.com", themes(&[Theme::Social]));
    let event = create(
        api.as_ref(),
        user.id,
        "Picnic",
        themes(&[Theme::Social]),
        FormatPreference::in_person(),
    );
    let user = api.get_user(user.id).unwrap();

    assert!(UserPatch::default().is_empty());
    let patched_user = api.update_user(user.id, UserPatch::default()).unwrap();
    assert_eq!(patched_user, user);
    assert_eq!(api.get_user(user.id), Some(user));

    let patched_event = api.update_event(event.id, EventPatch::default()).unwrap();
    assert_eq!(patched_event, event);
}

#[test]
fn single_field_patch_changes_only_that_field() {
    let api = client();
    let user = register(api.as_ref(), "one@x.com", themes(&[Theme::Educational]));

    let patched = api
        .update_user(
            user.id,
            UserPatch {
                location: Some("Madeira".to_string()),
                ..UserPatch::default()
            },
        )
        .unwrap();
    assert_eq!(
        patched,
        User {
            location: "Madeira".to_string(),
            ..user.clone()
        }
    );

    let event = create(
        api.as_ref(),
        user.id,
        "Lecture",
        themes(&[Theme::Educational]),
        FormatPreference::hybrid(),
    );
    let cleared = api
        .update_event(
            event.id,
            EventPatch {
                description: Some(String::new()),
                ..EventPatch::default()
            },
        )
        .unwrap();
    assert_eq!(
        cleared,
        Event {
            description: String::new(),
            ..event
        }
    );
}

#[test]
fn photo_can_be_cleared_or_kept() {
    let api = client();
    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());
    let request = NewEventRequest::builder()
        .organizer(org.id)
        .title("Exhibition")
        .photo("poster.jpg")
        .format(FormatPreference::in_person())
        .location("Museum")
        .schedule(at(5, 10), at(5, 17))
        .max_participants(40)
        .build()
        .unwrap();
    let event = api.create_event(request).unwrap();
    assert_eq!(event.photo.as_deref(), Some("poster.jpg"));

    let kept = api
        .update_event(
            event.id,
            EventPatch {
                certified: Some(true),
                ..EventPatch::default()
            },
        )
        .unwrap();
    assert_eq!(kept.photo.as_deref(), Some("poster.jpg"));
    assert!(kept.certified);

    let cleared = api
        .update_event(
            event.id,
            EventPatch {
                photo: Some(None),
                ..EventPatch::default()
            },
        )
        .unwrap();
    assert_eq!(cleared.photo, None);
}

#[test]
fn inverted_schedule_is_rejected_on_create_and_edit() {
    let api = client();
    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());

    let inverted = NewEventRequest::builder()
        .organizer(org.id)
        .title("Backwards")
        .format(FormatPreference::online())
        .location("Online")
        .schedule(at(4, 12), at(4, 9))
        .max_participants(5)
        .build()
        .unwrap();
    assert!(matches!(
        api.create_event(inverted),
        Err(DirectoryError::Validation { .. })
    ));
    assert!(api.list_events().is_empty());

    let event = create(
        api.as_ref(),
        org.id,
        "Forwards",
        PreferenceSet::none(),
        FormatPreference::online(),
    );
    let moved_end = EventPatch {
        ends_at: Some(event.starts_at),
        ..EventPatch::default()
    };
    assert!(matches!(
        api.update_event(event.id, moved_end),
        Err(DirectoryError::Validation { .. })
    ));
    assert_eq!(api.get_event(event.id), Some(event));
}

#[test]
fn removing_event_scrubs_back_references() {
    let api = client();
    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());
    let guest = register(api.as_ref(), "guest@x.com", PreferenceSet::none());
    let event = create(
        api.as_ref(),
        org.id,
        "Workshop",
        PreferenceSet::none(),
        FormatPreference::online(),
    );

    api.join_event(guest.id, event.id).unwrap();
    assert!(api.get_user(org.id).unwrap().organizes(event.id));
    assert!(api.get_user(guest.id).unwrap().participates_in(event.id));

    assert!(api.remove_event(event.id));
    assert!(api.get_user(org.id).unwrap().organizing.is_empty());
    assert!(api.get_user(guest.id).unwrap().participating.is_empty());
}

#[test]
fn removing_user_cascades_to_organized_events_and_memberships() {
    let api = client();
    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());
    let guest = register(api.as_ref(), "guest@x.com", PreferenceSet::none());
    let own = create(
        api.as_ref(),
        org.id,
        "Organized by org",
        PreferenceSet::none(),
        FormatPreference::online(),
    );
    let other = create(
        api.as_ref(),
        guest.id,
        "Organized by guest",
        PreferenceSet::none(),
        FormatPreference::online(),
    );
    api.join_event(guest.id, own.id).unwrap();
    api.join_event(org.id, other.id).unwrap();

    assert!(api.remove_user(org.id));

    assert!(api.get_event(own.id).is_none());
    assert!(api.get_event(other.id).unwrap().participants.is_empty());
    let guest = api.get_user(guest.id).unwrap();
    assert!(guest.participating.is_empty());
    assert_eq!(guest.organizing, vec![other.id]);
}

#[test]
fn join_and_leave_keep_both_sides_consistent() {
    let api = client();
    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());
    let a = register(api.as_ref(), "a@x.com", PreferenceSet::none());
    let b = register(api.as_ref(), "b@x.com", PreferenceSet::none());
    let c = register(api.as_ref(), "c@x.com", PreferenceSet::none());
    let event = create(
        api.as_ref(),
        org.id,
        "Small room",
        PreferenceSet::none(),
        FormatPreference::in_person(),
    );

    api.join_event(a.id, event.id).unwrap();
    // joining twice is a no-op
    let again = api.join_event(a.id, event.id).unwrap();
    assert_eq!(again.participants, vec![a.id]);

    api.join_event(b.id, event.id).unwrap();
    assert_eq!(
        api.join_event(c.id, event.id),
        Err(DirectoryError::EventFull {
            id: event.id,
            capacity: 2
        })
    );

    assert_eq!(api.leave_event(a.id, event.id), Ok(true));
    assert_eq!(api.leave_event(a.id, event.id), Ok(false));
    assert!(api.get_user(a.id).unwrap().participating.is_empty());

    let joined = api.join_event(c.id, event.id).unwrap();
    assert_eq!(joined.participants, vec![b.id, c.id]);
}

#[test]
fn events_for_user_follow_preferences() {
    let api = client();
    let fan = register(api.as_ref(), "fan@x.com", themes(&[Theme::Sports, Theme::Social]));
    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());
    let match_day = create(
        api.as_ref(),
        org.id,
        "Match",
        themes(&[Theme::Sports]),
        FormatPreference::in_person(),
    );
    create(
        api.as_ref(),
        org.id,
        "Sermon",
        themes(&[Theme::Religious]),
        FormatPreference::online(),
    );
    let party = create(
        api.as_ref(),
        org.id,
        "Party",
        themes(&[Theme::Social, Theme::Cultural]),
        FormatPreference::hybrid(),
    );

    assert_eq!(
        ids(&api.events_for_user(fan.id).unwrap()),
        vec![match_day.id.0, party.id.0]
    );
    assert_eq!(
        api.events_for_user(UserId(999)),
        Err(DirectoryError::user_not_found(UserId(999)))
    );
}

#[test]
fn authentication_checks_password_and_activation() {
    let api = client();
    let user = register(api.as_ref(), "login@x.com", PreferenceSet::none());

    let ok = LoginRequest::builder()
        .email("LOGIN@x.com")
        .password("hunter2")
        .build()
        .unwrap();
    assert_eq!(api.authenticate(ok.clone()).map(|u| u.id), Ok(user.id));

    let wrong = LoginRequest::builder()
        .email("login@x.com")
        .password("nope")
        .build()
        .unwrap();
    assert!(matches!(
        api.authenticate(wrong),
        Err(DirectoryError::Unauthorized { .. })
    ));

    api.set_user_enabled(user.id, false).unwrap();
    assert!(matches!(
        api.authenticate(ok),
        Err(DirectoryError::Unauthorized { .. })
    ));
}

#[test]
fn edits_on_unknown_entities_fail() {
    let api = client();
    assert_eq!(
        api.update_user(UserId(7), UserPatch::default()),
        Err(DirectoryError::user_not_found(UserId(7)))
    );
    let missing = events_directory::contract::EventId(7);
    assert_eq!(
        api.update_event(missing, EventPatch::default()),
        Err(DirectoryError::event_not_found(missing))
    );
}

#[test]
fn directory_is_built_from_app_config() {
    let mut app = runtime::AppConfig::default();
    app.modules.insert(
        events_directory::MODULE_NAME.to_string(),
        serde_json::json!({ "enforce_capacity": false }),
    );

    let api = EventsDirectory::from_app_config(&app).unwrap().client();
    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());
    let event = create(
        api.as_ref(),
        org.id,
        "Unlimited",
        PreferenceSet::none(),
        FormatPreference::online(),
    );
    for email in ["a@x.com", "b@x.com", "c@x.com"] {
        let user = register(api.as_ref(), email, PreferenceSet::none());
        api.join_event(user.id, event.id).unwrap();
    }
    assert_eq!(api.get_event(event.id).unwrap().participants.len(), 3);
}

#[test]
fn organized_and_participating_views_resolve_back_references() {
    let api = client();
    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());
    let guest = register(api.as_ref(), "guest@x.com", PreferenceSet::none());
    let first = create(
        api.as_ref(),
        org.id,
        "First",
        PreferenceSet::none(),
        FormatPreference::online(),
    );
    let second = create(
        api.as_ref(),
        org.id,
        "Second",
        PreferenceSet::none(),
        FormatPreference::online(),
    );
    api.join_event(guest.id, second.id).unwrap();
    api.join_event(guest.id, first.id).unwrap();

    assert_eq!(
        ids(&api.organized_events(org.id).unwrap()),
        vec![first.id.0, second.id.0]
    );
    assert_eq!(
        ids(&api.participating_events(guest.id).unwrap()),
        vec![second.id.0, first.id.0]
    );

    api.remove_event(second.id);
    assert_eq!(ids(&api.organized_events(org.id).unwrap()), vec![first.id.0]);
    assert_eq!(
        ids(&api.participating_events(guest.id).unwrap()),
        vec![first.id.0]
    );
    assert!(api.organized_events(UserId(404)).is_err());
}

#[derive(Default)]
struct CollectingPublisher {
    seen: parking_lot::Mutex<Vec<events_directory::domain::events::DirectoryEvent>>,
}

impl events_directory::domain::ports::EventPublisher<events_directory::domain::events::DirectoryEvent>
    for CollectingPublisher
{
    fn publish(&self, event: &events_directory::domain::events::DirectoryEvent) {
        self.seen.lock().push(event.clone());
    }
}

#[test]
fn custom_publisher_receives_domain_events() {
    use events_directory::domain::events::DirectoryEvent;

    let publisher = Arc::new(CollectingPublisher::default());
    let api = EventsDirectory::with_publisher(&DirectoryConfig::default(), publisher.clone())
        .client();

    let org = register(api.as_ref(), "org@x.com", PreferenceSet::none());
    let event = create(
        api.as_ref(),
        org.id,
        "Observed",
        PreferenceSet::none(),
        FormatPreference::online(),
    );
    api.remove_event(event.id);

    let seen = publisher.seen.lock();
    assert_eq!(seen.len(), 3);
    assert!(matches!(seen[0], DirectoryEvent::UserRegistered { id, .. } if id == org.id));
    assert!(matches!(
        seen[1],
        DirectoryEvent::EventCreated { id, organizer, .. } if id == event.id && organizer == org.id
    ));
    assert!(matches!(seen[2], DirectoryEvent::EventRemoved { id, .. } if id == event.id));
}
