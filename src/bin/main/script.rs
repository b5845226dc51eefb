use std::{collections::VecDeque, convert::Infallible};

use storia_core::{
    bridge::highlight_jump,
    content::{HighlightCatalog, StoryFeed},
    input::{Command, InputEvent, InputProvider, Key},
};
use thiserror::Error;

const DEFAULT_STEP_MS: u64 = 1_500;
const TAP_WIDTH: u32 = 300;

#[derive(Debug, Error, Eq, PartialEq)]
pub(super) enum ScriptError {
    #[error("unknown script step `{0}`")]
    UnknownStep(String),
    #[error("bad argument in script step `{0}`")]
    BadArgument(String),
    #[error("highlight `{0}` does not resolve to a panel")]
    UnresolvedHighlight(String),
}

#[derive(Clone, Debug, PartialEq)]
struct TimedEvent {
    at_ms: u64,
    event: InputEvent,
}

/// Input provider replaying a comma-separated script against the virtual
/// clock.
///
/// Steps: `next`, `prev`, `next-story`, `prev-story`, `mute`, `close`,
/// `tap:X`, `swipe:DX:DY`, `jump:STORY:PANEL`, `highlight:ID` and
/// `wait:MS`. Every step other than `wait` fires `DEFAULT_STEP_MS` after
/// the previous one.
#[derive(Debug, Default)]
pub(super) struct ScriptInput {
    events: VecDeque<TimedEvent>,
    now_ms: u64,
}

impl ScriptInput {
    pub(super) fn parse<F>(script: &str, feed: &F) -> Result<Self, ScriptError>
    where
        F: StoryFeed + HighlightCatalog,
    {
        let mut events = VecDeque::new();
        let mut at_ms = 0u64;

        for step in script.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let mut parts = step.split(':');
            let name = parts.next().unwrap_or_default();
            let args: Vec<&str> = parts.collect();

            if name == "wait" {
                at_ms = at_ms.saturating_add(parse_arg(step, &args, 0)?);
                continue;
            }

            let event = match (name, args.len()) {
                ("next", 0) => InputEvent::Key(Key::ArrowRight),
                ("prev", 0) => InputEvent::Key(Key::ArrowLeft),
                ("next-story", 0) => InputEvent::Key(Key::ArrowDown),
                ("prev-story", 0) => InputEvent::Key(Key::ArrowUp),
                ("mute", 0) => InputEvent::MuteButton,
                ("close", 0) => InputEvent::CloseButton,
                ("tap", 1) => InputEvent::Tap {
                    x: parse_arg(step, &args, 0)?,
                    width: TAP_WIDTH,
                },
                ("swipe", 2) => InputEvent::Swipe {
                    dx: parse_arg(step, &args, 0)?,
                    dy: parse_arg(step, &args, 1)?,
                },
                ("jump", 2) => InputEvent::Jump {
                    story_id: args[0].to_string(),
                    panel_index: parse_arg(step, &args, 1)?,
                },
                ("highlight", 1) => highlight_event(feed, args[0])?,
                ("next" | "prev" | "next-story" | "prev-story" | "mute" | "close", _)
                | ("tap" | "swipe" | "jump" | "highlight", _) => {
                    return Err(ScriptError::BadArgument(step.to_string()));
                }
                _ => return Err(ScriptError::UnknownStep(step.to_string())),
            };

            at_ms = at_ms.saturating_add(DEFAULT_STEP_MS);
            events.push_back(TimedEvent { at_ms, event });
        }

        Ok(Self { events, now_ms: 0 })
    }

    /// Moves the script's clock; events due by `now_ms` become pollable.
    pub(super) fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub(super) fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }

    /// Time of the last scripted event.
    pub(super) fn last_event_ms(&self) -> u64 {
        self.events.back().map_or(0, |timed| timed.at_ms)
    }
}

impl InputProvider for ScriptInput {
    type Error = Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        match self.events.front() {
            Some(timed) if timed.at_ms <= self.now_ms => {
                Ok(self.events.pop_front().map(|timed| timed.event))
            }
            _ => Ok(None),
        }
    }
}

fn parse_arg<T: core::str::FromStr>(
    step: &str,
    args: &[&str],
    index: usize,
) -> Result<T, ScriptError> {
    args.get(index)
        .and_then(|raw| raw.trim().parse().ok())
        .ok_or_else(|| ScriptError::BadArgument(step.to_string()))
}

fn highlight_event<F>(feed: &F, highlight_id: &str) -> Result<InputEvent, ScriptError>
where
    F: StoryFeed + HighlightCatalog,
{
    feed.highlight_by_id(highlight_id)
        .and_then(|highlight| highlight_jump(feed, highlight))
        .and_then(|command| match command {
            Command::JumpTo {
                story_id,
                panel_index,
            } => Some(InputEvent::Jump {
                story_id,
                panel_index,
            }),
            _ => None,
        })
        .ok_or_else(|| ScriptError::UnresolvedHighlight(highlight_id.to_string()))
}
