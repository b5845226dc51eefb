use std::{fs, io, path::Path};

use log::info;
use serde::Deserialize;
use storia_core::{
    content::StaticFeed,
    story::{Highlight, Story, StoryError},
};
use thiserror::Error;

/// Provider export: stories plus the highlights that point into them.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct FeedDocument {
    pub stories: Vec<Story>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    /// Story the viewer opens on.
    #[serde(default)]
    pub start_story_id: Option<String>,
}

#[derive(Debug, Error)]
pub(super) enum FeedError {
    #[error("failed to read feed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse feed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid feed: {0}")]
    Story(#[from] StoryError),
}

pub(super) struct LoadedFeed {
    pub feed: StaticFeed,
    pub start_story_id: Option<String>,
}

pub(super) fn load(path: &Path) -> Result<LoadedFeed, FeedError> {
    let raw = fs::read_to_string(path)?;
    let document: FeedDocument = serde_json::from_str(&raw)?;
    let start_story_id = document.start_story_id;
    let feed = StaticFeed::from_records(document.stories, document.highlights)?;

    info!(
        "feed: loaded path={} stories={} highlights={}",
        path.display(),
        feed.stories().len(),
        feed.highlights().len()
    );
    Ok(LoadedFeed {
        feed,
        start_story_id,
    })
}

/// Built-in feed used when no path is given.
pub(super) fn sample() -> LoadedFeed {
    info!("feed: no path given, using the built-in sample");
    LoadedFeed {
        feed: StaticFeed::sample(),
        start_story_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_parses_provider_field_names() {
        let raw = r#"{
            "startStoryId": "s1",
            "stories": [{
                "id": "s1",
                "title": "Title",
                "author": "ana",
                "publishedAt": "2024-05-01T10:00:00Z",
                "tags": ["city"],
                "geo": { "lat": 41.38, "lng": 2.17 },
                "panels": [
                    { "id": "p2", "type": "video", "media": "clip.mp4", "orderIndex": 1 },
                    { "id": "p1", "type": "text", "content": "Hi", "orderIndex": 0, "durationMs": 3000 }
                ]
            }],
            "highlights": [{ "id": "h1", "title": "Best", "panelIds": ["p2"] }]
        }"#;

        let document: FeedDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(document.start_story_id.as_deref(), Some("s1"));

        let feed = StaticFeed::from_records(document.stories, document.highlights).unwrap();
        let story = &feed.stories()[0];
        assert_eq!(story.panels[0].id, "p1");
        assert_eq!(story.panels[0].duration_ms, Some(3_000));
        assert!(story.tags.contains("city"));
        assert_eq!(feed.highlights()[0].first_panel_id(), Some("p2"));
    }

    #[test]
    fn order_gap_is_a_feed_error() {
        let raw = r#"{
            "stories": [{
                "id": "s1", "title": "T", "author": "a", "publishedAt": "2024-05-01",
                "panels": [{ "id": "p1", "type": "text", "orderIndex": 1 }]
            }]
        }"#;
        let document: FeedDocument = serde_json::from_str(raw).unwrap();
        let err = StaticFeed::from_records(document.stories, document.highlights).unwrap_err();
        assert!(matches!(FeedError::from(err), FeedError::Story(_)));
    }
}
