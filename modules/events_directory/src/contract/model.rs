use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// Registry-assigned identity of a user. Never reused once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(pub u64);

/// Registry-assigned identity of an event. Never reused once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Community an event belongs to, or a user is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Corporate,
    Charitable,
    Educational,
    Cultural,
    Sports,
    Religious,
    Social,
}

impl Theme {
    pub const ALL: [Theme; 7] = [
        Theme::Corporate,
        Theme::Charitable,
        Theme::Educational,
        Theme::Cultural,
        Theme::Sports,
        Theme::Religious,
        Theme::Social,
    ];
}

/// Fixed-shape set of theme flags. Every combination is valid, including none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PreferenceSet {
    pub corporate: bool,
    pub charitable: bool,
    pub educational: bool,
    pub cultural: bool,
    pub sports: bool,
    pub religious: bool,
    pub social: bool,
}

impl PreferenceSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, theme: Theme) -> bool {
        match theme {
            Theme::Corporate => self.corporate,
            Theme::Charitable => self.charitable,
            Theme::Educational => self.educational,
            Theme::Cultural => self.cultural,
            Theme::Sports => self.sports,
            Theme::Religious => self.religious,
            Theme::Social => self.social,
        }
    }

    pub fn set(&mut self, theme: Theme, enabled: bool) {
        let flag = match theme {
            Theme::Corporate => &mut self.corporate,
            Theme::Charitable => &mut self.charitable,
            Theme::Educational => &mut self.educational,
            Theme::Cultural => &mut self.cultural,
            Theme::Sports => &mut self.sports,
            Theme::Religious => &mut self.religious,
            Theme::Social => &mut self.social,
        };
        *flag = enabled;
    }

    pub fn with(mut self, theme: Theme) -> Self {
        self.set(theme, true);
        self
    }

    /// Themes whose flag is set, in declaration order.
    pub fn themes(&self) -> impl Iterator<Item = Theme> + '_ {
        Theme::ALL.into_iter().filter(move |t| self.contains(*t))
    }

    pub fn is_empty(&self) -> bool {
        self.themes().next().is_none()
    }

    /// True when at least one theme is set in both sets.
    pub fn intersects(&self, other: &PreferenceSet) -> bool {
        self.themes().any(|t| other.contains(t))
    }
}

impl FromIterator<Theme> for PreferenceSet {
    fn from_iter<I: IntoIterator<Item = Theme>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), PreferenceSet::with)
    }
}

/// A single way of attending an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventFormat {
    InPerson,
    Online,
    Hybrid,
}

/// Fixed-shape set of format flags describing how an event can be attended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FormatPreference {
    pub in_person: bool,
    pub online: bool,
    pub hybrid: bool,
}

impl FormatPreference {
    pub fn in_person() -> Self {
        EventFormat::InPerson.into()
    }

    pub fn online() -> Self {
        EventFormat::Online.into()
    }

    pub fn hybrid() -> Self {
        EventFormat::Hybrid.into()
    }

    pub fn contains(&self, format: EventFormat) -> bool {
        match format {
            EventFormat::InPerson => self.in_person,
            EventFormat::Online => self.online,
            EventFormat::Hybrid => self.hybrid,
        }
    }
}

impl From<EventFormat> for FormatPreference {
    fn from(format: EventFormat) -> Self {
        Self {
            in_person: format == EventFormat::InPerson,
            online: format == EventFormat::Online,
            hybrid: format == EventFormat::Hybrid,
        }
    }
}

/// Opaque credential. Its `Debug` output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn matches(&self, candidate: &Password) -> bool {
        self.0 == candidate.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Registered user.
///
/// `participating` and `organizing` hold event ids, not events: the event registry owns
/// event lifetime and a stale id resolves to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: Password,
    pub location: String,
    pub birth_date: NaiveDate,
    pub themes: PreferenceSet,
    pub participating: Vec<EventId>,
    pub organizing: Vec<EventId>,
    pub enabled: bool,
}

impl User {
    pub fn participates_in(&self, event: EventId) -> bool {
        self.participating.contains(&event)
    }

    pub fn organizes(&self, event: EventId) -> bool {
        self.organizing.contains(&event)
    }
}

/// Scheduled event. `starts_at` is always strictly before `ends_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub organizer: UserId,
    pub title: String,
    pub photo: Option<String>,
    pub description: String,
    pub format: FormatPreference,
    pub location: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub max_participants: u32,
    pub rating: u8,
    pub certified: bool,
    pub themes: PreferenceSet,
    pub participants: Vec<UserId>,
}

impl Event {
    pub fn has_participant(&self, user: UserId) -> bool {
        self.participants.contains(&user)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants as usize
    }
}

/// Per-query selection criteria: any-match over `communities` plus an optional exact
/// format. An empty community set places no constraint on themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSpec {
    pub communities: PreferenceSet,
    pub format: Option<FormatPreference>,
}

impl FilterSpec {
    /// Matches every event.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn new(communities: PreferenceSet, format: Option<FormatPreference>) -> Self {
        Self {
            communities,
            format,
        }
    }

    /// Events relevant to a user's theme affinities, in any format.
    pub fn for_user(user: &User) -> Self {
        Self::new(user.themes, None)
    }

    pub fn with_format(mut self, format: impl Into<FormatPreference>) -> Self {
        self.format = Some(format.into());
        self
    }
}
