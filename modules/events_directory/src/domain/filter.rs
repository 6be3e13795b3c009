//! Event selection by community and format.
//!
//! A theme criterion is "any match": an event qualifies when it shares at least one
//! theme with the filter, and an empty filter set accepts every event. A format
//! criterion must equal the event's format exactly.

use crate::contract::model::{Event, FilterSpec};

pub fn matches(filter: &FilterSpec, event: &Event) -> bool {
    let theme_ok = filter.communities.is_empty() || filter.communities.intersects(&event.themes);
    let format_ok = filter.format.map_or(true, |format| format == event.format);
    theme_ok && format_ok
}

/// Matching events, copied out in iteration order.
///
/// The result owns its events, so later changes to the source never show up in it.
pub fn filter_events<'a, I>(filter: &FilterSpec, events: I) -> Vec<Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| matches(filter, event))
        .cloned()
        .collect()
}
