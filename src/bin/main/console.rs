use heapless::String as HeaplessString;
use log::{debug, info};
use storia_core::{
    app::PlayerSignal,
    progress::fill_percent,
    render::{PlaybackView, Screen, gallery_tiles},
    story::{
        Story,
        metadata::{VisitSummary, share_slug, visit_summary},
    },
    text_policy::{TILE_MAX_CHARS, TILE_MAX_WORDS, preview_limited},
};

const BAR_CELLS: usize = 8;
const BAR_BYTES: usize = 96;

/// Key of the last frame logged at `info`; progress-only redraws go to
/// `debug`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum FrameKey {
    Empty,
    Playing { story: usize, panel: usize },
    Finished,
    Closed,
}

/// Renders player screens as log lines.
#[derive(Debug, Default)]
pub(super) struct ConsoleRenderer {
    last: Option<FrameKey>,
    last_story: Option<usize>,
    frames: u64,
}

impl ConsoleRenderer {
    pub(super) fn render(&mut self, now_ms: u64, screen: Screen<'_>) {
        self.frames = self.frames.saturating_add(1);
        let key = match screen {
            Screen::Empty => FrameKey::Empty,
            Screen::Playing(view) => FrameKey::Playing {
                story: view.story_index,
                panel: view.panel_index,
            },
            Screen::Finished(_) => FrameKey::Finished,
            Screen::Closed => FrameKey::Closed,
        };
        let changed = self.last != Some(key);
        self.last = Some(key);

        match screen {
            Screen::Empty => info!("[{:>6}ms] nothing to play", now_ms),
            Screen::Closed => info!("[{:>6}ms] viewer closed", now_ms),
            Screen::Finished(view) => {
                info!("[{:>6}ms] finished on {}", now_ms, describe(&view));
            }
            Screen::Playing(view) if changed => {
                if self.last_story != Some(view.story_index) {
                    self.last_story = Some(view.story_index);
                    info!("[{:>6}ms] {}", now_ms, story_header(view.story));
                }
                info!("[{:>6}ms] {}", now_ms, describe(&view));
                let tiles = gallery_tiles(view.story, view.panel_index);
                for tile in tiles {
                    debug!(
                        "  tile {}{} {}{}",
                        tile.number,
                        if tile.is_current { "*" } else { "" },
                        tile.label,
                        if tile.has_image { " [img]" } else { "" }
                    );
                }
            }
            Screen::Playing(view) => {
                debug!(
                    "[{:>6}ms] {} {}",
                    now_ms,
                    segment_bar(view.segments).as_str(),
                    view.counter
                );
            }
        }
    }

    pub(super) fn frames(&self) -> u64 {
        self.frames
    }
}

pub(super) fn log_signal(now_ms: u64, signal: PlayerSignal) {
    match signal {
        PlayerSignal::PositionChanged {
            story_index,
            panel_index,
        } => debug!(
            "[{:>6}ms] signal: position story_index={} panel_index={}",
            now_ms, story_index, panel_index
        ),
        PlayerSignal::Finished => info!("[{:>6}ms] signal: finished", now_ms),
        PlayerSignal::Closed => info!("[{:>6}ms] signal: closed", now_ms),
    }
}

fn story_header(story: &Story) -> String {
    let visits = match visit_summary(story) {
        VisitSummary::SameDay { date } => format!("visited {date}"),
        VisitSummary::Visits {
            last,
            first: Some(first),
        } => format!("visited {first} .. {last}"),
        VisitSummary::Visits { last, first: None } => format!("last seen {last}"),
    };
    format!(
        "story /{} \"{}\" panels={} {}",
        share_slug(story),
        story.title,
        story.panel_count(),
        visits
    )
}

fn describe(view: &PlaybackView<'_>) -> String {
    let body = view
        .panel
        .title
        .as_deref()
        .or(view.panel.content.as_deref())
        .or(view.panel.media.as_deref())
        .unwrap_or_default();
    let mut line = format!(
        "{} by {} | {} {} {} \"{}\"",
        view.story.title,
        view.story.author,
        segment_bar(view.segments).as_str(),
        view.counter,
        view.panel.kind.label(),
        preview_limited(body, TILE_MAX_WORDS, TILE_MAX_CHARS),
    );
    if view.show_mute {
        line.push_str(if view.muted { " (muted)" } else { " (sound on)" });
    }
    line
}

/// One bracketed cell group per panel, filled in proportion to its segment.
fn segment_bar(segments: &[f32]) -> HeaplessString<BAR_BYTES> {
    let mut bar = HeaplessString::new();
    for fill in segments {
        let filled = usize::from(fill_percent(*fill)) * BAR_CELLS / 100;
        if bar.push('[').is_err() {
            break;
        }
        for cell in 0..BAR_CELLS {
            let _ = bar.push(if cell < filled { '#' } else { '.' });
        }
        let _ = bar.push(']');
    }
    bar
}
