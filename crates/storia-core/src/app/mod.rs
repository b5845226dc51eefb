//! Story player: the navigation state machine.
//!
//! Holds the single playback position, applies navigation transitions and
//! installs one driver (clock or media) per panel. Input, media reports and
//! clock ticks are queued as [`Message`]s and applied one at a time in
//! arrival order.

use alloc::{string::String, vec::Vec};

use heapless::Deque;
use log::{debug, trace, warn};

use crate::{
    clock::{ClockEvent, PlaybackClock},
    content::StoryFeed,
    driver::{DriverEvent, DriverEventKind, DriverKind, DriverTag},
    input::{Command, GestureConfig, InputProvider},
    media::{MediaSignal, MediaSurface, MediaSync},
    progress::{clamp_fraction, segments},
    render::{PlaybackView, Screen},
    story::{PanelKind, Story},
    text_policy::counter_label,
};

const INBOX_DEPTH: usize = 32;
const OUTBOX_DEPTH: usize = 16;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlayerConfig {
    /// Display time of clock-driven panels without an override.
    pub default_panel_ms: u32,
    pub min_panel_ms: u32,
    pub max_panel_ms: u32,
    /// Interval between clock progress emissions.
    pub tick_ms: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_panel_ms: 5_000,
            min_panel_ms: 1_000,
            max_panel_ms: 60_000,
            tick_ms: 50,
        }
    }
}

impl PlayerConfig {
    fn normalized(mut self) -> Self {
        if self.max_panel_ms < self.min_panel_ms {
            core::mem::swap(&mut self.max_panel_ms, &mut self.min_panel_ms);
        }
        self.min_panel_ms = self.min_panel_ms.max(1);
        self.max_panel_ms = self.max_panel_ms.max(self.min_panel_ms);
        self.default_panel_ms = self
            .default_panel_ms
            .clamp(self.min_panel_ms, self.max_panel_ms);
        self.tick_ms = self.tick_ms.max(1);
        self
    }

    /// Display time for a panel, honouring its override within bounds.
    pub fn panel_duration_ms(&self, override_ms: Option<u32>) -> u32 {
        override_ms
            .unwrap_or(self.default_panel_ms)
            .clamp(self.min_panel_ms, self.max_panel_ms)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlayerStatus {
    /// No story with panels; every transition is a no-op.
    Empty,
    Playing,
    /// Reached the end of the last story. Backward moves and jumps resume
    /// playback.
    Finished,
    /// Viewer closed; the position is gone and nothing responds any more.
    Closed,
}

/// The engine's only mutable state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackPosition {
    pub story_index: usize,
    pub panel_index: usize,
    /// `0.0..=1.0`; never decreases while one driver is installed.
    pub progress: f32,
    pub driver: DriverKind,
}

/// Notifications for the presentation layer, drained with
/// [`StoryPlayer::drain_signals`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlayerSignal {
    PositionChanged {
        story_index: usize,
        panel_index: usize,
    },
    Finished,
    Closed,
}

/// One unit of work on the player's queue.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Command(Command),
    Media(MediaSignal),
    Clock(DriverEvent),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Transition {
    Stay,
    Finish,
    Move {
        story_index: usize,
        panel_index: usize,
        /// Reinstall the driver even when the position does not change.
        restart: bool,
    },
}

pub struct StoryPlayer<F, M, IN>
where
    F: StoryFeed,
    M: MediaSurface,
    IN: InputProvider,
{
    feed: F,
    surface: M,
    input: IN,
    config: PlayerConfig,
    gestures: GestureConfig,
    status: PlayerStatus,
    position: Option<PlaybackPosition>,
    clock: PlaybackClock,
    media: MediaSync,
    active: Option<DriverTag>,
    generation: u32,
    inbox: Deque<Message, INBOX_DEPTH>,
    outbox: Deque<PlayerSignal, OUTBOX_DEPTH>,
    pending_redraw: bool,
    panels_since_drain: u32,
}

include!("view.rs");
include!("input.rs");
include!("runtime.rs");
include!("navigation.rs");
