//! Translate external selections into player jump commands.
//!
//! Both bridges are stateless: they only build a [`Command`] that the
//! caller hands to the player, and never touch the playback position.

use alloc::string::String;

use log::debug;

use crate::{content::StoryFeed, input::Command, story::Highlight};

/// Jump for a picked highlight: the story and position of its first
/// referenced panel. `None` when that panel is not in the feed.
pub fn highlight_jump<F>(feed: &F, highlight: &Highlight) -> Option<Command>
where
    F: StoryFeed + ?Sized,
{
    let Some(panel_id) = highlight.first_panel_id() else {
        debug!("bridge: highlight={} references no panels", highlight.id);
        return None;
    };

    let Some(location) = feed.locate_panel(panel_id) else {
        debug!(
            "bridge: highlight={} panel={} not in feed",
            highlight.id, panel_id
        );
        return None;
    };

    let story = feed.story_at(location.story_index)?;
    debug!(
        "bridge: highlight={} -> story={} panel_index={}",
        highlight.id, story.id, location.panel_index
    );
    Some(Command::JumpTo {
        story_id: story.id.clone(),
        panel_index: location.panel_index,
    })
}

/// Jump for a thumbnail picked in the open story's gallery.
pub fn gallery_jump(current_story_id: &str, chosen_index: usize) -> Command {
    Command::JumpTo {
        story_id: String::from(current_story_id),
        panel_index: chosen_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::StaticFeed;

    #[test]
    fn highlight_resolves_first_panel() {
        let feed = StaticFeed::sample();
        let highlight = Highlight::new("h", "Mixed")
            .with_panel_id("market-2")
            .with_panel_id("harbour-1");

        assert_eq!(
            highlight_jump(&feed, &highlight),
            Some(Command::JumpTo {
                story_id: "market".into(),
                panel_index: 1,
            })
        );
    }

    #[test]
    fn unresolvable_highlight_yields_nothing() {
        let feed = StaticFeed::sample();
        assert_eq!(highlight_jump(&feed, &Highlight::new("empty", "Empty")), None);

        let dangling = Highlight::new("h", "Gone").with_panel_id("deleted");
        assert_eq!(highlight_jump(&feed, &dangling), None);
    }

    #[test]
    fn gallery_passes_index_through() {
        assert_eq!(
            gallery_jump("harbour", 7),
            Command::JumpTo {
                story_id: "harbour".into(),
                panel_index: 7,
            }
        );
    }
}
