use alloc::vec::Vec;

use log::debug;

use super::{HighlightCatalog, StoryFeed};
use crate::story::{Highlight, Panel, PanelKind, Story, StoryError};

/// In-memory feed of stories and highlights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticFeed {
    stories: Vec<Story>,
    highlights: Vec<Highlight>,
}

impl StaticFeed {
    pub fn new(stories: Vec<Story>, highlights: Vec<Highlight>) -> Self {
        Self {
            stories,
            highlights,
        }
    }

    /// Builds a feed from provider records: panels are put into display
    /// order, then every story is validated.
    pub fn from_records(
        mut stories: Vec<Story>,
        highlights: Vec<Highlight>,
    ) -> Result<Self, StoryError> {
        for story in stories.iter_mut() {
            story.sort_panels();
            story.validate()?;
        }
        debug!(
            "feed: loaded stories={} highlights={}",
            stories.len(),
            highlights.len()
        );
        Ok(Self::new(stories, highlights))
    }

    /// Small built-in feed used when no provider data is available.
    pub fn sample() -> Self {
        let harbour = Story::new("harbour", "Harbour walk", "Marta", "2024-04-12T09:30:00Z")
            .with_panel(
                Panel::new("harbour-1", PanelKind::Text, 0)
                    .with_title("Morning at the docks")
                    .with_content("Fishing boats come in before seven."),
            )
            .with_panel(
                Panel::new("harbour-2", PanelKind::Image, 0)
                    .with_title("Nets")
                    .with_media("media/harbour-nets.jpg"),
            )
            .with_panel(
                Panel::new("harbour-3", PanelKind::Video, 0).with_media("media/harbour-gulls.mp4"),
            );

        let market = Story::new("market", "Covered market", "Marta", "2024-04-13T11:00:00Z")
            .with_panel(
                Panel::new("market-1", PanelKind::Quote, 0)
                    .with_title("Stall owner")
                    .with_content("Come back at noon, the bread is still warm."),
            )
            .with_panel(
                Panel::new("market-2", PanelKind::Image, 0)
                    .with_media("media/market-fruit.jpg")
                    .with_duration_ms(3_000),
            );

        let highlights = alloc::vec![
            Highlight::new("best-views", "Best views").with_panel_id("harbour-2"),
            Highlight::new("quotes", "Quotes").with_panel_id("market-1"),
        ];

        Self::new(alloc::vec![harbour, market], highlights)
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }
}

impl StoryFeed for StaticFeed {
    fn story_count(&self) -> usize {
        self.stories.len()
    }

    fn story_at(&self, index: usize) -> Option<&Story> {
        self.stories.get(index)
    }
}

impl HighlightCatalog for StaticFeed {
    fn highlight_count(&self) -> usize {
        self.highlights.len()
    }

    fn highlight_at(&self, index: usize) -> Option<&Highlight> {
        self.highlights.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PanelLocation;

    #[test]
    fn sample_feed_is_valid() {
        let feed = StaticFeed::sample();
        assert_eq!(feed.story_count(), 2);
        for story in feed.stories() {
            assert!(story.validate().is_ok());
        }
    }

    #[test]
    fn panels_are_located_across_stories() {
        let feed = StaticFeed::sample();
        assert_eq!(
            feed.locate_panel("market-2"),
            Some(PanelLocation {
                story_index: 1,
                panel_index: 1,
            })
        );
        assert_eq!(feed.locate_panel("missing"), None);
        assert_eq!(feed.story_index_of("market"), Some(1));
    }

    #[test]
    fn highlights_resolve_by_id() {
        let feed = StaticFeed::sample();
        let quotes = feed.highlight_by_id("quotes").unwrap();
        assert_eq!(quotes.first_panel_id(), Some("market-1"));
        assert!(feed.highlight_by_id("nope").is_none());
    }

    #[test]
    fn records_are_sorted_then_validated() {
        let mut story = Story::new("s", "T", "a", "2024-01-01")
            .with_panel(Panel::new("a", PanelKind::Text, 0))
            .with_panel(Panel::new("b", PanelKind::Text, 0));
        story.panels.swap(0, 1);

        let feed = StaticFeed::from_records(alloc::vec![story], Vec::new()).unwrap();
        assert_eq!(feed.stories()[0].panels[0].id, "a");

        let mut broken = Story::new("x", "T", "a", "2024-01-01")
            .with_panel(Panel::new("a", PanelKind::Text, 0));
        broken.panels[0].order_index = 2;
        assert!(StaticFeed::from_records(alloc::vec![broken], Vec::new()).is_err());
    }
}
