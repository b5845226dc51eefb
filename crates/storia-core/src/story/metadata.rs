//! Derived labels shown alongside a story: author handle, share slug and
//! visit dates.

use alloc::string::String;

use super::Story;

/// Normalizes a social handle to a single leading `@`.
///
/// Returns `None` when nothing is left after trimming.
pub fn normalize_handle(raw: &str) -> Option<String> {
    let bare = handle_slug(raw)?;
    let mut out = String::with_capacity(bare.len() + 1);
    out.push('@');
    out.push_str(bare);
    Some(out)
}

/// Handle without any leading `@`, suitable for building profile links.
pub fn handle_slug(raw: &str) -> Option<&str> {
    let bare = raw.trim().trim_start_matches('@');
    if bare.is_empty() { None } else { Some(bare) }
}

/// Public slug used in share links: the handle when set, otherwise the id.
pub fn share_slug(story: &Story) -> &str {
    story
        .handle
        .as_deref()
        .map(str::trim)
        .filter(|handle| !handle.is_empty())
        .unwrap_or(&story.id)
}

/// Calendar date (`YYYY-MM-DD`) part of an ISO-8601 timestamp.
pub fn calendar_date(timestamp: &str) -> &str {
    let trimmed = timestamp.trim();
    let end = trimmed
        .find(|ch: char| ch == 'T' || ch == ' ')
        .unwrap_or(trimmed.len());
    &trimmed[..end]
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VisitSummary<'a> {
    /// First and last visit happened on the same day.
    SameDay { date: &'a str },
    Visits {
        last: &'a str,
        first: Option<&'a str>,
    },
}

/// Summarizes visit dates; the last visit falls back to the publish date.
pub fn visit_summary(story: &Story) -> VisitSummary<'_> {
    let last = story
        .last_visit
        .as_deref()
        .unwrap_or(story.published_at.as_str());
    let first = story.first_visit.as_deref();

    match first {
        Some(first) if calendar_date(first) == calendar_date(last) => VisitSummary::SameDay {
            date: calendar_date(last),
        },
        _ => VisitSummary::Visits {
            last: calendar_date(last),
            first: first.map(calendar_date),
        },
    }
}
