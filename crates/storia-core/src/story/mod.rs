//! Story records as delivered by the data provider.
//!
//! The engine treats these as immutable for the duration of a viewing
//! session. Field names follow the provider's camelCase JSON when the
//! `serde` feature is enabled.

pub mod geo;
pub mod metadata;

use alloc::{collections::BTreeSet, string::String, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use geo::{Coordinates, GeoError};

/// Content variant of a panel.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PanelKind {
    Text,
    Image,
    Video,
    Quote,
}

impl PanelKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
            Self::Quote => "quote",
        }
    }

    /// Whether the `media` reference carries meaning for this variant.
    pub const fn uses_media(self) -> bool {
        matches!(self, Self::Image | Self::Video)
    }
}

/// One timed unit of story content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Panel {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: PanelKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub content: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub media: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alt_text: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub caption: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slug: Option<String>,
    /// Display time override for clock-driven panels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_ms: Option<u32>,
    pub order_index: u32,
}

impl Panel {
    pub fn new(id: impl Into<String>, kind: PanelKind, order_index: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            title: None,
            content: None,
            media: None,
            alt_text: None,
            caption: None,
            slug: None,
            duration_ms: None,
            order_index,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Media reference, only for variants where it is meaningful.
    pub fn media_ref(&self) -> Option<&str> {
        if !self.kind.uses_media() {
            return None;
        }
        self.media.as_deref().filter(|media| !media.trim().is_empty())
    }
}

/// Curated list a story belongs to.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StoryList {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slug: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub thumbnail: Option<String>,
}

/// Ordered sequence of panels with shared metadata.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Story {
    pub id: String,
    pub title: String,
    pub author: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub subtitle: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub handle: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub username: Option<String>,
    /// ISO-8601 timestamp.
    pub published_at: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub first_visit: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_visit: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub panels: Vec<Panel>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub thumbnail: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, rename = "thumbnailPanelId"))]
    pub thumbnail_panel: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub geo: Option<Coordinates>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lists: Vec<StoryList>,
}

impl Story {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        published_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            subtitle: None,
            handle: None,
            username: None,
            published_at: published_at.into(),
            first_visit: None,
            last_visit: None,
            panels: Vec::new(),
            thumbnail: None,
            thumbnail_panel: None,
            rating: None,
            tags: BTreeSet::new(),
            address: None,
            description: None,
            geo: None,
            lists: Vec::new(),
        }
    }

    /// Appends a panel, assigning the next dense order index.
    pub fn with_panel(mut self, mut panel: Panel) -> Self {
        panel.order_index = self.panels.len() as u32;
        self.panels.push(panel);
        self
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn panel_index_of(&self, panel_id: &str) -> Option<usize> {
        self.panels.iter().position(|panel| panel.id == panel_id)
    }

    pub fn last_panel_index(&self) -> Option<usize> {
        self.panels.len().checked_sub(1)
    }

    /// Puts panels into display order. Providers are expected to deliver
    /// them ordered already; this repairs feeds that do not.
    pub fn sort_panels(&mut self) {
        self.panels.sort_by_key(|panel| panel.order_index);
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), StoryError> {
        if self.id.trim().is_empty() {
            return Err(StoryError::EmptyStoryId);
        }

        let mut seen = BTreeSet::new();
        for (position, panel) in self.panels.iter().enumerate() {
            if panel.id.trim().is_empty() {
                return Err(StoryError::EmptyPanelId {
                    story: self.id.clone(),
                    position,
                });
            }
            if panel.order_index as usize != position {
                return Err(StoryError::PanelOrderGap {
                    story: self.id.clone(),
                    panel: panel.id.clone(),
                    expected: position as u32,
                    found: panel.order_index,
                });
            }
            if !seen.insert(panel.id.as_str()) {
                return Err(StoryError::DuplicatePanelId {
                    story: self.id.clone(),
                    panel: panel.id.clone(),
                });
            }
        }

        if let Some(geo) = self.geo {
            geo.validate()
                .map_err(|source| StoryError::InvalidCoordinates {
                    story: self.id.clone(),
                    source,
                })?;
        }

        Ok(())
    }
}

/// Named subset of panels offering a direct jump target.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Highlight {
    pub id: String,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub thumbnail: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub panel_ids: Vec<String>,
}

impl Highlight {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            thumbnail: String::new(),
            panel_ids: Vec::new(),
        }
    }

    pub fn with_panel_id(mut self, panel_id: impl Into<String>) -> Self {
        self.panel_ids.push(panel_id.into());
        self
    }

    pub fn first_panel_id(&self) -> Option<&str> {
        self.panel_ids.first().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StoryError {
    #[error("story has an empty id")]
    EmptyStoryId,
    #[error("story {story}: panel at position {position} has an empty id")]
    EmptyPanelId { story: String, position: usize },
    #[error("story {story}: panel {panel} has order index {found}, expected {expected}")]
    PanelOrderGap {
        story: String,
        panel: String,
        expected: u32,
        found: u32,
    },
    #[error("story {story}: duplicate panel id {panel}")]
    DuplicatePanelId { story: String, panel: String },
    #[error("story {story}: {source}")]
    InvalidCoordinates {
        story: String,
        #[source]
        source: GeoError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_panel_story() -> Story {
        Story::new("s1", "Lisbon", "ana", "2024-05-01T10:00:00Z")
            .with_panel(Panel::new("p1", PanelKind::Text, 0).with_title("Hello"))
            .with_panel(Panel::new("p2", PanelKind::Image, 0).with_media("a.jpg"))
    }

    #[test]
    fn with_panel_assigns_dense_order() {
        let story = two_panel_story();
        assert_eq!(story.panels[0].order_index, 0);
        assert_eq!(story.panels[1].order_index, 1);
        assert!(story.validate().is_ok());
    }

    #[test]
    fn order_gap_is_reported() {
        let mut story = two_panel_story();
        story.panels[1].order_index = 4;
        assert_eq!(
            story.validate(),
            Err(StoryError::PanelOrderGap {
                story: "s1".into(),
                panel: "p2".into(),
                expected: 1,
                found: 4,
            })
        );
    }

    #[test]
    fn sort_repairs_shuffled_panels() {
        let mut story = two_panel_story();
        story.panels.swap(0, 1);
        assert!(story.validate().is_err());
        story.sort_panels();
        assert!(story.validate().is_ok());
        assert_eq!(story.panel_index_of("p2"), Some(1));
    }

    #[test]
    fn duplicate_panel_ids_are_rejected() {
        let mut story = two_panel_story();
        story.panels[1].id = "p1".into();
        assert!(matches!(
            story.validate(),
            Err(StoryError::DuplicatePanelId { .. })
        ));
    }

    #[test]
    fn media_ref_ignored_for_text_panels() {
        let panel = Panel::new("t", PanelKind::Text, 0).with_media("x.mp4");
        assert_eq!(panel.media_ref(), None);

        let blank = Panel::new("v", PanelKind::Video, 0).with_media("  ");
        assert_eq!(blank.media_ref(), None);

        let video = Panel::new("v", PanelKind::Video, 0).with_media("clip.mp4");
        assert_eq!(video.media_ref(), Some("clip.mp4"));
    }

    #[test]
    fn invalid_geo_fails_validation() {
        let mut story = two_panel_story();
        story.geo = Some(Coordinates::new(90.0, Some(10.0)));
        assert!(matches!(
            story.validate(),
            Err(StoryError::InvalidCoordinates { .. })
        ));
    }
}
