//! View models handed to the presentation surface.

use alloc::{string::String, vec::Vec};

use crate::{
    driver::DriverKind,
    progress::SegmentFill,
    story::{Panel, PanelKind, Story},
    text_policy::panel_tile_label,
};

/// Everything needed to draw the active panel and its progress bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackView<'a> {
    pub story: &'a Story,
    pub panel: &'a Panel,
    pub story_index: usize,
    pub panel_index: usize,
    /// Progress of the active panel, `0.0..=1.0`.
    pub progress: f32,
    /// One fill per panel of `story`.
    pub segments: &'a [SegmentFill],
    /// `current / total`, 1-based.
    pub counter: &'a str,
    pub muted: bool,
    /// Whether a mute toggle makes sense (video with bound media).
    pub show_mute: bool,
    pub driver: DriverKind,
}

/// App-level view model consumed by a renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen<'a> {
    /// No story with panels to show.
    Empty,
    Playing(PlaybackView<'a>),
    /// The last panel of the last story completed; the final frame stays.
    Finished(PlaybackView<'a>),
    Closed,
}

/// One thumbnail in the story gallery overlay.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GalleryTile {
    pub label: String,
    /// 1-based position.
    pub number: usize,
    pub is_current: bool,
    pub has_image: bool,
}

pub fn gallery_tiles(story: &Story, current_panel: usize) -> Vec<GalleryTile> {
    story
        .panels
        .iter()
        .enumerate()
        .map(|(index, panel)| GalleryTile {
            label: panel_tile_label(panel, index),
            number: index + 1,
            is_current: index == current_panel,
            has_image: panel.kind == PanelKind::Image && panel.media_ref().is_some(),
        })
        .collect()
}
