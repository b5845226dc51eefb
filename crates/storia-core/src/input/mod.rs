//! Input abstraction layer.
//!
//! The presentation surface reports raw pointer and keyboard input as
//! [`InputEvent`]s; [`InputEvent::command`] maps them onto the player's
//! [`Command`] set.

pub mod mock;

use alloc::string::String;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Escape,
    Char(char),
}

/// Raw input forwarded by the presentation surface.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputEvent {
    /// Tap at horizontal position `x` on a surface `width` wide.
    Tap { x: u32, width: u32 },
    /// Completed swipe; positive `dx` is rightwards, positive `dy` downwards.
    Swipe { dx: i32, dy: i32 },
    Key(Key),
    CloseButton,
    MuteButton,
    /// Direct jump requested by the surface (deep link, gallery, highlight).
    Jump {
        story_id: String,
        panel_index: usize,
    },
}

/// Logical actions consumed by the story player.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    NextPanel,
    PrevPanel,
    NextStory,
    PrevStory,
    JumpTo {
        story_id: String,
        panel_index: usize,
    },
    ToggleMute,
    Close,
}

impl Command {
    /// Commands that move the position and therefore pre-empt the driver.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NextPanel | Self::PrevPanel | Self::NextStory | Self::PrevStory | Self::JumpTo { .. }
        )
    }
}

/// Tap-zone and swipe thresholds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GestureConfig {
    /// Taps left of this share of the width go back a panel.
    pub prev_zone_percent: u8,
    /// Minimum travel before a swipe counts.
    pub swipe_threshold: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            prev_zone_percent: 33,
            swipe_threshold: 40,
        }
    }
}

impl InputEvent {
    pub fn command(&self) -> Option<Command> {
        self.command_with(&GestureConfig::default())
    }

    pub fn command_with(&self, gestures: &GestureConfig) -> Option<Command> {
        match self {
            Self::Tap { x, width } => {
                let width = (*width).max(1) as u64;
                let boundary = width * gestures.prev_zone_percent.min(100) as u64 / 100;
                if (*x as u64) < boundary {
                    Some(Command::PrevPanel)
                } else {
                    Some(Command::NextPanel)
                }
            }
            Self::Swipe { dx, dy } => {
                let threshold = gestures.swipe_threshold.max(1);
                let horizontal = dx.unsigned_abs() >= dy.unsigned_abs();
                if horizontal {
                    if dx.unsigned_abs() < threshold {
                        None
                    } else if *dx < 0 {
                        Some(Command::NextStory)
                    } else {
                        Some(Command::PrevStory)
                    }
                } else if *dy >= threshold as i32 {
                    Some(Command::Close)
                } else {
                    None
                }
            }
            Self::Key(key) => match key {
                Key::ArrowRight | Key::Space => Some(Command::NextPanel),
                Key::ArrowLeft => Some(Command::PrevPanel),
                Key::ArrowDown => Some(Command::NextStory),
                Key::ArrowUp => Some(Command::PrevStory),
                Key::Escape => Some(Command::Close),
                Key::Char('m' | 'M') => Some(Command::ToggleMute),
                Key::Char(_) => None,
            },
            Self::CloseButton => Some(Command::Close),
            Self::MuteButton => Some(Command::ToggleMute),
            Self::Jump {
                story_id,
                panel_index,
            } => Some(Command::JumpTo {
                story_id: story_id.clone(),
                panel_index: *panel_index,
            }),
        }
    }
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
