//! Read-only story and highlight providers.

mod static_feed;

pub use static_feed::StaticFeed;

use crate::story::{Highlight, Story};

/// Where a panel lives inside a feed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PanelLocation {
    pub story_index: usize,
    pub panel_index: usize,
}

/// Ordered stories available to the player.
pub trait StoryFeed {
    fn story_count(&self) -> usize;

    fn story_at(&self, index: usize) -> Option<&Story>;

    fn story_index_of(&self, story_id: &str) -> Option<usize> {
        (0..self.story_count()).find(|&index| {
            self.story_at(index)
                .is_some_and(|story| story.id == story_id)
        })
    }

    /// Resolves a panel id to its story and position.
    fn locate_panel(&self, panel_id: &str) -> Option<PanelLocation> {
        (0..self.story_count()).find_map(|story_index| {
            let story = self.story_at(story_index)?;
            let panel_index = story.panel_index_of(panel_id)?;
            Some(PanelLocation {
                story_index,
                panel_index,
            })
        })
    }
}

/// Curated highlights offering jump targets into the feed.
pub trait HighlightCatalog {
    fn highlight_count(&self) -> usize;

    fn highlight_at(&self, index: usize) -> Option<&Highlight>;

    fn highlight_by_id(&self, highlight_id: &str) -> Option<&Highlight> {
        (0..self.highlight_count())
            .filter_map(|index| self.highlight_at(index))
            .find(|highlight| highlight.id == highlight_id)
    }
}

impl StoryFeed for [Story] {
    fn story_count(&self) -> usize {
        self.len()
    }

    fn story_at(&self, index: usize) -> Option<&Story> {
        self.get(index)
    }
}

impl StoryFeed for alloc::vec::Vec<Story> {
    fn story_count(&self) -> usize {
        self.len()
    }

    fn story_at(&self, index: usize) -> Option<&Story> {
        self.get(index)
    }
}

impl HighlightCatalog for [Highlight] {
    fn highlight_count(&self) -> usize {
        self.len()
    }

    fn highlight_at(&self, index: usize) -> Option<&Highlight> {
        self.get(index)
    }
}
